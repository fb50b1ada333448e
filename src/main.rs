/*!
# Moodlog - A Tiny Local Mood Journal

This file contains the main application flow: it sets up logging, loads the
configuration, opens the entry store and runs one command against it.

## Usage

```
moodlog [OPTIONS] <COMMAND>

Commands:
  login   Log in with a display name
  logout  Log out; erases every entry
  whoami  Show who is logged in
  add     Write a new entry
  edit    Replace parts of an existing entry
  delete  Delete an entry
  list    List entries grouped by date, newest first
  stats   Show mood and entry frequency statistics

Options:
  -v, --verbose              Print verbose output
      --log-format <FORMAT>  Log output format [default: text] [possible values: text, json]
```

## Configuration

- `MOODLOG_DIR`: Directory holding the persisted store (defaults to "~/.moodlog")
- `MOODLOG_REQUIRE_LOGIN`: Whether entry changes need a logged-in user (defaults to true)
- `RUST_LOG`: Log filter (defaults to "info")
*/

use clap::Parser;
use moodlog::cli::{CliArgs, Command};
use moodlog::constants::{
    DEFAULT_LOG_LEVEL, LOG_FORMAT_JSON, TRACING_ROOT_SPAN_NAME, TRACING_SERVICE_NAME,
};
use moodlog::errors::AppResult;
use moodlog::journal_io::FileStorage;
use moodlog::ops::{self, EntryChanges, NewEntry};
use moodlog::{Config, EntryStore};
use std::io::{self, IsTerminal};
use std::process;
use std::sync::Arc;
use tracing::{debug, error, info, info_span};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

fn main() {
    let args = CliArgs::parse();
    init_tracing(args.verbose, &args.log_format);

    let correlation_id = Uuid::new_v4();
    let root_span = info_span!(
        TRACING_ROOT_SPAN_NAME,
        service_name = TRACING_SERVICE_NAME,
        correlation_id = %correlation_id
    );
    let _guard = root_span.enter();

    if let Err(e) = run(args) {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Installs the global subscriber; logs go to stderr so stdout stays clean.
fn init_tracing(verbose: bool, log_format: &str) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal());

    if log_format == LOG_FORMAT_JSON {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Runs one command.
///
/// The store is dropped before returning, which drains the persistence
/// writer so every change made here reaches disk.
fn run(args: CliArgs) -> AppResult<()> {
    debug!("CLI arguments: {:?}", args);

    let config = Config::load()?;
    config.validate()?;
    debug!(config = ?config, "Configuration loaded");

    let storage = Arc::new(FileStorage::open(&config.data_dir)?);
    let mut store = EntryStore::open(storage, config.store_policy())?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Command::Login { name } => ops::login(&mut store, &name, &mut out)?,
        Command::Logout => ops::logout(&mut store, &mut out)?,
        Command::Whoami => ops::whoami(&store, &mut out)?,
        Command::Add(add) => {
            let new = NewEntry {
                text: add.text,
                mood: add.mood,
                image: add.image,
                date: add.date,
            };
            ops::add_entry(&mut store, new, &mut out)?;
        }
        Command::Edit(edit) => {
            let image = if edit.clear_image {
                Some(None)
            } else {
                edit.image.map(Some)
            };
            let changes = EntryChanges {
                text: edit.text,
                mood: edit.mood,
                image,
                date: edit.date,
            };
            ops::edit_entry(&mut store, &edit.id, changes, &mut out)?;
        }
        Command::Delete { id } => ops::delete_entry(&mut store, &id, &mut out)?,
        Command::List => ops::list_entries(&store, &mut out)?,
        Command::Stats => ops::show_stats(&store, &mut out)?,
    }

    drop(store);
    info!("Command completed");
    Ok(())
}
