mod note;
mod page;
mod tag;

pub use note::{Note, NoteDraft};
pub use page::{PageRequest, PageResult};
pub use tag::NoteTag;
