/*!
# Moodlog

Moodlog is a tiny local mood journal. Each entry records a date, free text, a
mood emoji and optionally a photo URI. Entries live in a single in-process
store that persists a snapshot to disk after every change and restores it on
the next start.

## Core Features

- Log in with a display name; logging out erases every entry
- Add, edit and delete entries
- List entries grouped by date, newest first
- Mood histogram and per-date entry counts

## Architecture

- `cli`: Command-line interface handling using clap
- `config`: Configuration loading and validation
- `errors`: Error handling infrastructure
- `journal_core`: Entry and mood types, date helpers and stats projections
- `journal_io`: Key/value storage adapters and the background persistence writer
- `store`: The entry store and its session
- `ops`: Command operations rendering plain text

## Usage Example

```rust,no_run
use moodlog::journal_core::{generate_entry_id, today_entry_date, JournalEntry, Mood};
use moodlog::journal_io::FileStorage;
use moodlog::{Config, EntryStore};
use std::sync::Arc;

fn main() -> moodlog::AppResult<()> {
    let config = Config::load()?;
    config.validate()?;

    let storage = Arc::new(FileStorage::open(&config.data_dir)?);
    let mut store = EntryStore::open(storage, config.store_policy())?;

    store.login("ada")?;
    store.add_entry(JournalEntry::new(
        generate_entry_id(),
        today_entry_date(),
        "A good day",
        Mood::Happy,
    ))?;
    Ok(())
}
```
*/

/// Command-line interface for parsing and handling user arguments
pub mod cli;
/// Configuration loading and management
pub mod config;
pub mod constants;
/// Error types and utilities for error handling
pub mod errors;
pub mod journal_core;
pub mod journal_io;
/// Command operations
pub mod ops;
pub mod store;

// Re-export important types for convenience
pub use cli::CliArgs;
pub use config::Config;
pub use errors::{AppError, AppResult, PersistenceError};
pub use journal_core::{JournalEntry, Mood};
pub use store::{EntryStore, StorePolicy};
