mod http;
mod service;

pub use http::HttpClient;
pub use service::{NoteService, NotesApi};
