//! Interactive list view over a [`Session`].

use tokio::io::{stdin, AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::client::NoteService;
use crate::config::ClientConfig;
use crate::entity::{NoteDraft, NoteTag};
use crate::error::{NotehubError, Result};
use crate::ui::{render_screen, Session};

const HELP: &str = "\
Commands:
  s <text>      search (empty text clears the search)
  page <n>      go to page n
  next | prev   move one page
  new           create a note
  cancel        close the create form
  rm <id>       delete a note
  r             refresh
  q             quit
";

#[derive(Debug, PartialEq, Eq)]
enum Input {
    Search(String),
    Page(u32),
    Next,
    Prev,
    New,
    Cancel,
    Delete(String),
    Refresh,
    Help,
    Quit,
    Unknown(String),
}

fn parse_input(line: &str) -> Input {
    let line = line.trim_end_matches(['\r', '\n']);
    let (cmd, rest) = match line.split_once(' ') {
        Some((cmd, rest)) => (cmd, rest),
        None => (line, ""),
    };
    match cmd {
        "s" | "search" => Input::Search(rest.to_string()),
        "page" => match rest.trim().parse() {
            Ok(page) => Input::Page(page),
            Err(_) => Input::Unknown(line.to_string()),
        },
        "next" | "n" => Input::Next,
        "prev" | "p" => Input::Prev,
        "new" => Input::New,
        "cancel" => Input::Cancel,
        "rm" | "delete" if !rest.trim().is_empty() => Input::Delete(rest.trim().to_string()),
        "r" | "refresh" | "" => Input::Refresh,
        "h" | "help" | "?" => Input::Help,
        "q" | "quit" | "exit" => Input::Quit,
        _ => Input::Unknown(line.to_string()),
    }
}

pub async fn handle_browse(config: &ClientConfig) -> Result<()> {
    let session = Session::new(NoteService::new(config)?, config);
    let mut lines = BufReader::new(stdin()).lines();

    session.refresh().await;
    print!("{}", render_screen(&session.screen().await));
    println!("(type 'help' for commands)");

    while let Some(line) = lines.next_line().await? {
        match parse_input(&line) {
            Input::Search(text) => {
                session.type_search(&text).await;
                session.settle_search().await;
            }
            Input::Page(page) => session.set_page(page).await,
            Input::Next => {
                let ui = session.ui().await;
                let screen = session.screen().await;
                let last = screen.pagination.map(|p| p.page_count).unwrap_or(1);
                if ui.current_page < last {
                    session.set_page(ui.current_page + 1).await;
                }
            }
            Input::Prev => {
                let ui = session.ui().await;
                session.set_page(ui.current_page.saturating_sub(1)).await;
            }
            Input::New => {
                session.open_modal().await;
                print!("{}", render_screen(&session.screen().await));
                if let Some(form) = read_form(&mut lines).await? {
                    match form.into_draft() {
                        Ok(draft) => {
                            if let Ok(note) = session.submit_create(&draft).await {
                                println!("Created note {} - {}", note.id, note.title);
                            }
                        }
                        Err(e) => session.reject_form(e.to_string()).await,
                    }
                }
            }
            Input::Cancel => session.close_modal().await,
            Input::Delete(id) => match session.delete_note(&id).await {
                Ok(note) => println!("Deleted note {} - {}", note.id, note.title),
                Err(e) => eprintln!("Error: {}", e),
            },
            Input::Refresh => {}
            Input::Help => {
                print!("{}", HELP);
                continue;
            }
            Input::Quit => break,
            Input::Unknown(line) => {
                eprintln!("Unknown command: {} (type 'help')", line);
                continue;
            }
        }

        session.refresh().await;
        print!("{}", render_screen(&session.screen().await));
    }

    Ok(())
}

/// Create form fields as typed.
#[derive(Debug, Default)]
struct FormInput {
    title: String,
    content: Option<String>,
    tag: Option<String>,
}

impl FormInput {
    /// A blank tag means the default tag.
    fn into_draft(self) -> Result<NoteDraft> {
        let tag = match self.tag.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => {
                raw.parse::<NoteTag>().map_err(NotehubError::InvalidInput)?
            }
            _ => NoteTag::default(),
        };
        NoteDraft::new(self.title, self.content, tag)
    }
}

/// Prompt for the create form fields. Returns `None` on end of input.
async fn read_form(lines: &mut Lines<BufReader<Stdin>>) -> Result<Option<FormInput>> {
    println!("Title:");
    let Some(title) = lines.next_line().await? else {
        return Ok(None);
    };
    println!("Content (optional):");
    let content = lines.next_line().await?;
    println!("Tag [Todo/Work/Personal/Meeting/Shopping] (default Todo):");
    let tag = lines.next_line().await?;

    Ok(Some(FormInput {
        title,
        content,
        tag,
    }))
}
