pub mod cache;
pub mod cli;
pub mod client;
pub mod config;
pub mod entity;
pub mod error;
pub mod search;
pub mod ui;

#[cfg(test)]
mod test_support;

pub use cache::{QueryCache, QueryKey};
pub use client::{NoteService, NotesApi};
pub use config::ClientConfig;
pub use error::{NotehubError, Result};
pub use ui::Session;
