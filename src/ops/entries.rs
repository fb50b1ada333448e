//! Writing, editing, deleting and listing entries.

use crate::errors::{AppError, AppResult};
use crate::journal_core::{
    format_entry_date, generate_entry_id, group_by_date, parse_entry_date, today_entry_date,
    JournalEntry, Mood,
};
use crate::store::EntryStore;
use std::io::Write;
use tracing::info;

/// Content for a new entry. Id and (by default) date are stamped on add.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewEntry {
    pub text: String,
    pub mood: Mood,
    pub image: Option<String>,
    /// `MM/DD/YYYY`; today when absent.
    pub date: Option<String>,
}

/// Partial changes to an existing entry. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryChanges {
    pub text: Option<String>,
    pub mood: Option<Mood>,
    /// `Some(None)` removes the photo.
    pub image: Option<Option<String>>,
    pub date: Option<String>,
}

impl EntryChanges {
    /// Builds the full replacement for `entry`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidInput` if a new date does not parse.
    pub fn apply(self, entry: JournalEntry) -> AppResult<JournalEntry> {
        let date = match self.date {
            Some(raw) => normalize_date(&raw)?,
            None => entry.date,
        };

        Ok(JournalEntry {
            id: entry.id,
            date,
            text: self.text.unwrap_or(entry.text),
            mood: self.mood.unwrap_or(entry.mood),
            image: self.image.unwrap_or(entry.image),
        })
    }
}

/// Stamps `new` with a fresh id, adds it and prints the id.
///
/// Returns the generated id.
///
/// # Errors
///
/// Returns an error if:
/// - The date is not a valid `MM/DD/YYYY` date
/// - Nobody is logged in and the store requires a session
pub fn add_entry(store: &mut EntryStore, new: NewEntry, out: &mut dyn Write) -> AppResult<String> {
    let date = match new.date {
        Some(raw) => normalize_date(&raw)?,
        None => today_entry_date(),
    };

    let entry = JournalEntry {
        id: generate_entry_id(),
        date,
        text: new.text,
        mood: new.mood,
        image: new.image,
    };
    let id = entry.id.clone();

    store.add_entry(entry)?;
    info!(id = %id, "Entry added");
    writeln!(out, "Added entry {}", id)?;
    Ok(id)
}

/// Applies `changes` to the entry with `id` and stores the result.
///
/// # Errors
///
/// - `AppError::EntryNotFound` if there is no entry with `id`
/// - `AppError::InvalidInput` for a malformed date
/// - `AppError::NotAuthenticated` if the store requires a session and none is open
pub fn edit_entry(
    store: &mut EntryStore,
    id: &str,
    changes: EntryChanges,
    out: &mut dyn Write,
) -> AppResult<()> {
    let current = store
        .get_entry(id)
        .ok_or_else(|| AppError::EntryNotFound(id.to_string()))?;
    let updated = changes.apply(current)?;

    if !store.update_entry(updated)? {
        return Err(AppError::EntryNotFound(id.to_string()));
    }
    info!(id, "Entry updated");
    writeln!(out, "Updated entry {}", id)?;
    Ok(())
}

/// Deletes the entry with `id`.
///
/// # Errors
///
/// - `AppError::EntryNotFound` if there is no entry with `id`
/// - `AppError::NotAuthenticated` if the store requires a session and none is open
pub fn delete_entry(store: &mut EntryStore, id: &str, out: &mut dyn Write) -> AppResult<()> {
    if !store.delete_entry(id)? {
        return Err(AppError::EntryNotFound(id.to_string()));
    }
    info!(id, "Entry deleted");
    writeln!(out, "Deleted entry {}", id)?;
    Ok(())
}

/// Prints every entry, in date sections, newest first.
pub fn list_entries(store: &EntryStore, out: &mut dyn Write) -> AppResult<()> {
    let entries = store.list_entries();
    if entries.is_empty() {
        writeln!(out, "No entries yet.")?;
        return Ok(());
    }

    for (index, group) in group_by_date(&entries).iter().enumerate() {
        if index > 0 {
            writeln!(out)?;
        }
        writeln!(out, "{}", group.date)?;
        for entry in &group.entries {
            write_entry(entry, out)?;
        }
    }
    Ok(())
}

fn write_entry(entry: &JournalEntry, out: &mut dyn Write) -> AppResult<()> {
    writeln!(
        out,
        "  {} {:<11} {}",
        entry.mood.symbol(),
        entry.mood.label(),
        entry.id
    )?;
    for line in entry.text.lines() {
        writeln!(out, "      {}", line)?;
    }
    if let Some(image) = &entry.image {
        writeln!(out, "      [photo] {}", image)?;
    }
    Ok(())
}

fn normalize_date(raw: &str) -> AppResult<String> {
    parse_entry_date(raw).map(format_entry_date)
}
