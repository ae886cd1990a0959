//! Plain-text rendering of a [`Screen`] for the terminal front-end.

use std::fmt::Write;

use super::view::{ListView, ModalView, PaginationView, Screen};
use crate::entity::Note;

pub fn render_screen(screen: &Screen) -> String {
    let mut out = String::new();

    let _ = write!(out, "Search: [{}]", screen.search_query);
    if let Some(pagination) = &screen.pagination {
        let _ = write!(out, "   {}", render_pagination(pagination));
    }
    out.push_str("   [Create note +]\n\n");

    match &screen.list {
        ListView::Idle => {}
        ListView::Loading => out.push_str("Loading...\n"),
        ListView::Error(message) => {
            let _ = writeln!(out, "Error: {}", message);
        }
        ListView::Empty => out.push_str("No notes found.\n"),
        ListView::Populated(notes) => {
            for note in notes {
                out.push_str(&render_note(note));
            }
        }
    }

    if let ModalView::Open { submitting, error } = &screen.modal {
        out.push_str("\n-- New note --\n");
        if *submitting {
            out.push_str("Creating...\n");
        }
        if let Some(error) = error {
            let _ = writeln!(out, "Error: {}", error);
        }
    }

    out
}

/// `< 1 [2] 3 >` style control, current page bracketed.
pub fn render_pagination(pagination: &PaginationView) -> String {
    let pages: Vec<String> = (1..=pagination.page_count)
        .map(|p| {
            if p == pagination.current_page {
                format!("[{}]", p)
            } else {
                p.to_string()
            }
        })
        .collect();
    format!("< {} >", pages.join(" "))
}

pub fn render_note(note: &Note) -> String {
    let mut out = format!("  {} [{}] {}\n", note.id, note.tag, note.title);
    if let Some(content) = &note.content {
        for line in content.lines() {
            let _ = writeln!(out, "      {}", line);
        }
    }
    out
}
