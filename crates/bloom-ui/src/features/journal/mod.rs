//! Journal feature wiring: photo albums and notes behind two tabs.
//!
//! # Design
//! - One controller owns both collections so search spans the active tab.
//! - Remote failures surface inline; the collections are never cleared by a failed mutation.

pub mod actions;
pub mod logic;
pub mod state;
pub mod sync;

pub use logic::{JournalInputError, JournalTab};
pub use state::{AlbumForm, JournalState, NoteForm};
pub use sync::JournalController;
