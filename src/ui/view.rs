//! Render model derived from session state.

use crate::cache::{QueryState, QueryStatus};
use crate::entity::Note;

/// What the list area shows. A pure function of the active read.
#[derive(Debug, Clone, PartialEq)]
pub enum ListView {
    Idle,
    Loading,
    Error(String),
    Empty,
    Populated(Vec<Note>),
}

impl ListView {
    pub fn from_state(state: Option<&QueryState>) -> Self {
        let Some(state) = state else {
            return ListView::Idle;
        };
        match &state.status {
            QueryStatus::Pending => ListView::Loading,
            QueryStatus::Error(err) => ListView::Error(err.to_string()),
            QueryStatus::Success(page) if page.notes.is_empty() => ListView::Empty,
            QueryStatus::Success(page) => ListView::Populated(page.notes.clone()),
        }
    }
}

/// Pagination control model, mirroring a zero-based paginator widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationView {
    pub page_count: u32,
    pub current_page: u32,
    /// Zero-based selected index, always `current_page - 1`.
    pub force_page: u32,
}

impl PaginationView {
    /// Only present when there is more than one page.
    pub fn new(page_count: u32, current_page: u32) -> Option<Self> {
        if page_count <= 1 {
            return None;
        }
        let current_page = current_page.max(1);
        Some(Self {
            page_count,
            current_page,
            force_page: current_page - 1,
        })
    }

    /// Translate a zero-based selection back into a page number.
    pub fn page_for_selection(selected: u32) -> u32 {
        selected + 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalView {
    Closed,
    Open {
        submitting: bool,
        error: Option<String>,
    },
}

/// Everything a front-end needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    pub search_query: String,
    pub pagination: Option<PaginationView>,
    pub list: ListView,
    pub modal: ModalView,
}
