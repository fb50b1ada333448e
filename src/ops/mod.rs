//! High-level operations behind each command.
//!
//! Every operation takes the entry store plus an output sink and renders
//! its result as plain text, so the binary only has to pick one.

pub mod account;
pub mod dashboard;
pub mod entries;

pub use account::{login, logout, whoami};
pub use dashboard::show_stats;
pub use entries::{add_entry, delete_entry, edit_entry, list_entries, EntryChanges, NewEntry};
