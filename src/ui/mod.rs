//! UI composition: view state, render model and the session that ties the
//! debouncer and cache together.

mod render;
mod session;
mod state;
mod view;

pub use render::{render_note, render_pagination, render_screen};
pub use session::Session;
pub use state::{ModalState, UiState};
pub use view::{ListView, ModalView, PaginationView, Screen};
