// src/entity/note.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::NoteTag;
use crate::error::{NotehubError, Result};

/// A note as returned by the server. Never edited locally; a refetch
/// replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub tag: NoteTag,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDraft {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub tag: NoteTag,
}

impl NoteDraft {
    /// Build a draft, trimming the title and dropping empty content.
    pub fn new(title: impl Into<String>, content: Option<String>, tag: NoteTag) -> Result<Self> {
        let title = title.into().trim().to_string();
        if title.is_empty() {
            return Err(NotehubError::InvalidInput("Title is required".to_string()));
        }
        let content = content.filter(|c| !c.trim().is_empty());
        Ok(Self {
            title,
            content,
            tag,
        })
    }
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}
