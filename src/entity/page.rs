// src/entity/page.rs
use serde::{Deserialize, Serialize};

use super::Note;
use crate::config::DEFAULT_PER_PAGE;
use crate::search::normalize_search;

/// One page of the notes listing to request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageRequest {
    pub page: u32,
    pub per_page: u32,
    pub search: Option<String>,
}

impl PageRequest {
    /// Pages are 1-based; zero is clamped to the first page.
    pub fn new(page: u32, per_page: u32, search: Option<&str>) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
            search: search.and_then(normalize_search),
        }
    }

    pub fn first() -> Self {
        Self::new(1, DEFAULT_PER_PAGE, None)
    }

    /// Query string pairs; `search` is only present when non-empty.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("perPage", self.per_page.to_string()),
        ];
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        pairs
    }
}

/// A page of notes as reported by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult {
    pub notes: Vec<Note>,
    pub total_pages: u32,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub total_notes: u32,
}

impl PageResult {
    pub fn empty() -> Self {
        Self {
            notes: Vec::new(),
            total_pages: 0,
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            total_notes: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}
