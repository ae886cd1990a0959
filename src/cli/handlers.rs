use std::io::{self, Read};

use crate::client::{NoteService, NotesApi};
use crate::config::ClientConfig;
use crate::entity::{NoteDraft, NoteTag, PageResult};
use crate::error::{NotehubError, Result};
use crate::ui::render_note;

/// Environment config with an optional command-line URL override.
pub fn load_config(api_url: Option<String>) -> Result<ClientConfig> {
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = api_url {
        config.base_url = url.trim_end_matches('/').to_string();
    }
    Ok(config)
}

pub async fn handle_list(
    config: &ClientConfig,
    page: u32,
    search: Option<String>,
    json: bool,
) -> Result<()> {
    let service = NoteService::new(config)?;
    let result = service
        .fetch_page(page, config.per_page, search.as_deref())
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", format_page(&result, page));
    }

    Ok(())
}

fn format_page(result: &PageResult, page: u32) -> String {
    if result.notes.is_empty() {
        return "No notes found.\n".to_string();
    }
    let mut out = format!("Notes (page {} of {}):\n\n", page, result.total_pages.max(1));
    for note in &result.notes {
        out.push_str(&render_note(note));
    }
    out
}

pub async fn handle_create(
    config: &ClientConfig,
    title: String,
    content: Option<String>,
    tag: NoteTag,
    stdin: bool,
    json: bool,
) -> Result<()> {
    let content = if stdin {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Some(buf)
    } else {
        content
    };

    let draft = NoteDraft::new(title, content, tag)?;
    let service = NoteService::new(config)?;
    let note = service.create_note(&draft).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&note)?);
    } else {
        println!("Created note {} [{}] - {}", note.id, note.tag, note.title);
    }

    Ok(())
}

pub async fn handle_delete(config: &ClientConfig, id: String, force: bool, json: bool) -> Result<()> {
    if !force {
        eprintln!("Delete note {}? [y/N] ", id);

        if atty::is(atty::Stream::Stdin) {
            let mut input = String::new();
            io::stdin().read_line(&mut input)?;
            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Cancelled.");
                return Ok(());
            }
        } else {
            return Err(NotehubError::InvalidInput(
                "Use --force to delete in non-interactive mode".to_string(),
            ));
        }
    }

    let service = NoteService::new(config)?;
    let note = service.delete_note(&id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&note)?);
    } else {
        println!("Deleted note {} - {}", note.id, note.title);
    }

    Ok(())
}
