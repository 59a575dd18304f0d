//! Note service: the single entry point for reading and mutating notes.

mod clock;
mod error;
mod note_service;


pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{NoteError, NoteResult};
pub use note_service::NoteService;
