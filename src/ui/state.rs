/// Whether the create-note form is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Open,
}

/// User-controlled view state. Updates return a new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    pub current_page: u32,
    /// Raw text of the search box, before debouncing.
    pub search_query: String,
    pub modal: ModalState,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            current_page: 1,
            search_query: String::new(),
            modal: ModalState::Closed,
        }
    }
}

impl UiState {
    /// New search text always sends the user back to page 1.
    pub fn with_search(self, query: impl Into<String>) -> Self {
        Self {
            search_query: query.into(),
            current_page: 1,
            ..self
        }
    }

    pub fn with_page(self, page: u32) -> Self {
        Self {
            current_page: page.max(1),
            ..self
        }
    }

    pub fn open_modal(self) -> Self {
        Self {
            modal: ModalState::Open,
            ..self
        }
    }

    pub fn close_modal(self) -> Self {
        Self {
            modal: ModalState::Closed,
            ..self
        }
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal == ModalState::Open
    }
}
