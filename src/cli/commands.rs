use clap::{Parser, Subcommand};

use crate::entity::NoteTag;

#[derive(Parser, Debug)]
#[command(name = "notehub")]
#[command(version, about = "Browse, search, create and delete NoteHub notes")]
#[command(propagate_version = true)]
pub struct Cli {
    /// API root (overrides NOTEHUB_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List one page of notes
    List {
        /// Page number (1-based)
        #[arg(long, short = 'p', default_value_t = 1)]
        page: u32,

        /// Only notes matching this text
        #[arg(long, short = 's')]
        search: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a new note
    Create {
        /// Note title
        title: String,

        /// Note body
        #[arg(long, short = 'c', conflicts_with = "stdin")]
        content: Option<String>,

        /// Tag (Todo, Work, Personal, Meeting, Shopping)
        #[arg(long, short = 't', default_value = "Todo")]
        tag: NoteTag,

        /// Read content from stdin
        #[arg(long)]
        stdin: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a note by ID
    Delete {
        /// Note ID
        id: String,

        /// Skip the confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive list view with debounced search
    Browse,
}
