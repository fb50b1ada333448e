//! The entry store: single owner of journal entries and the session.
//!
//! Every mutation goes through [`EntryStore`]. After each successful change
//! the store serializes a full snapshot and hands it to the persistence
//! writer without waiting for the write. On startup it restores the last
//! snapshot, falling back to an empty, logged-out store when the slot is
//! missing or unreadable.

pub mod session;
pub mod snapshot;

pub use session::Session;
pub use snapshot::StoreSnapshot;

use crate::constants::STORE_KEY;
use crate::errors::{AppError, AppResult};
use crate::journal_io::{KeyValueStorage, PersistenceWriter};
use crate::journal_core::JournalEntry;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Behavioural switches of a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorePolicy {
    /// Reject add/update/delete with `AppError::NotAuthenticated` while logged out.
    pub require_session: bool,
}

impl Default for StorePolicy {
    fn default() -> Self {
        StorePolicy {
            require_session: true,
        }
    }
}

impl StorePolicy {
    /// A policy that lets mutations through regardless of session.
    pub fn ungated() -> Self {
        StorePolicy {
            require_session: false,
        }
    }
}

/// Owns the entry collection and the session user.
///
/// Mutations take `&mut self`; the store is meant to be owned by one
/// collaborator and lent out by reference.
///
/// # Examples
///
/// ```
/// use moodlog::journal_core::{JournalEntry, Mood};
/// use moodlog::journal_io::MemoryStorage;
/// use moodlog::store::{EntryStore, StorePolicy};
/// use std::sync::Arc;
///
/// let storage = Arc::new(MemoryStorage::new());
/// let mut store = EntryStore::open(storage, StorePolicy::default())?;
///
/// store.login("ada")?;
/// store.add_entry(JournalEntry::new("a", "01/01/2025", "hi", Mood::Happy))?;
/// store.update_entry(JournalEntry::new("a", "01/01/2025", "bye", Mood::Sad))?;
///
/// let entries = store.list_entries();
/// assert_eq!(entries.len(), 1);
/// assert_eq!(entries[0].text, "bye");
/// # Ok::<(), moodlog::AppError>(())
/// ```
pub struct EntryStore {
    entries: Vec<JournalEntry>,
    session: Session,
    policy: StorePolicy,
    key: String,
    writer: PersistenceWriter,
}

impl EntryStore {
    /// Opens a store over `storage`, restoring the last persisted snapshot.
    ///
    /// A missing, unreadable or corrupt snapshot is logged and replaced by an
    /// empty, logged-out store.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Io` only if the persistence writer thread cannot start.
    pub fn open(storage: Arc<dyn KeyValueStorage>, policy: StorePolicy) -> AppResult<Self> {
        let key = STORE_KEY.to_string();
        let (entries, session) = restore(storage.as_ref(), &key);
        info!(
            entries = entries.len(),
            logged_in = session.is_logged_in(),
            "Entry store opened"
        );

        Ok(EntryStore {
            entries,
            session,
            policy,
            key,
            writer: PersistenceWriter::spawn(storage)?,
        })
    }

    /// Returns a copy of every entry.
    pub fn list_entries(&self) -> Vec<JournalEntry> {
        self.entries.clone()
    }

    /// Returns a copy of the entry with `id`, if present.
    pub fn get_entry(&self, id: &str) -> Option<JournalEntry> {
        self.entries.iter().find(|entry| entry.id == id).cloned()
    }

    pub fn current_user(&self) -> Option<&str> {
        self.session.user()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Logs `name` in.
    ///
    /// # Errors
    ///
    /// - `AppError::InvalidInput` if `name` is blank
    /// - `AppError::SessionActive` if another user is logged in
    pub fn login(&mut self, name: &str) -> AppResult<()> {
        if self.session.login(name)? {
            debug!("User logged in");
            self.persist();
        }
        Ok(())
    }

    /// Logs out and discards every entry. Succeeds from any state.
    pub fn logout(&mut self) {
        let discarded = self.entries.len();
        self.entries.clear();
        self.session.logout();
        debug!(discarded, "User logged out; entries cleared");
        self.persist();
    }

    /// Appends `entry`.
    ///
    /// # Errors
    ///
    /// - `AppError::NotAuthenticated` if the policy requires a session and none is open
    /// - `AppError::DuplicateEntry` if an entry with the same id exists
    pub fn add_entry(&mut self, entry: JournalEntry) -> AppResult<()> {
        self.ensure_session()?;
        if self.position(&entry.id).is_some() {
            return Err(AppError::DuplicateEntry(entry.id));
        }

        debug!(id = %entry.id, "Adding entry");
        self.entries.push(entry);
        self.persist();
        Ok(())
    }

    /// Replaces the entry with the same id as `entry`, wholesale.
    ///
    /// Returns `false` and changes nothing if no such entry exists.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotAuthenticated` if the policy requires a session and none is open.
    pub fn update_entry(&mut self, entry: JournalEntry) -> AppResult<bool> {
        self.ensure_session()?;
        match self.position(&entry.id) {
            Some(index) => {
                debug!(id = %entry.id, "Replacing entry");
                self.entries[index] = entry;
                self.persist();
                Ok(true)
            }
            None => {
                debug!(id = %entry.id, "Update of unknown entry ignored");
                Ok(false)
            }
        }
    }

    /// Removes the entry with `id`.
    ///
    /// Returns `false` and changes nothing if no such entry exists.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotAuthenticated` if the policy requires a session and none is open.
    pub fn delete_entry(&mut self, id: &str) -> AppResult<bool> {
        self.ensure_session()?;
        match self.position(id) {
            Some(index) => {
                debug!(id, "Deleting entry");
                self.entries.remove(index);
                self.persist();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Blocks until every snapshot scheduled so far has been written or has failed.
    pub fn flush(&self) {
        self.writer.flush();
    }

    fn ensure_session(&self) -> AppResult<()> {
        if self.policy.require_session && !self.session.is_logged_in() {
            return Err(AppError::NotAuthenticated);
        }
        Ok(())
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    fn persist(&self) {
        let snapshot = StoreSnapshot::new(
            self.session.user().map(str::to_string),
            self.entries.clone(),
        );
        match snapshot.encode() {
            Ok(bytes) => self.writer.submit(&self.key, bytes),
            Err(e) => warn!(error = %e, "Snapshot encoding failed; state kept in memory only"),
        }
    }
}

fn restore(storage: &dyn KeyValueStorage, key: &str) -> (Vec<JournalEntry>, Session) {
    let bytes = match storage.load(key) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => {
            debug!("No stored snapshot; starting empty");
            return (Vec::new(), Session::LoggedOut);
        }
        Err(e) => {
            warn!(error = %e, "Could not read stored snapshot; starting empty");
            return (Vec::new(), Session::LoggedOut);
        }
    };

    let snapshot = match StoreSnapshot::decode(key, &bytes) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!(error = %e, "Could not decode stored snapshot; starting empty");
            return (Vec::new(), Session::LoggedOut);
        }
    };

    let mut seen = HashSet::new();
    let total = snapshot.entries.len();
    let entries: Vec<JournalEntry> = snapshot
        .entries
        .into_iter()
        .filter(|entry| seen.insert(entry.id.clone()))
        .collect();
    if entries.len() != total {
        warn!(
            dropped = total - entries.len(),
            "Stored snapshot held duplicate entry ids; kept first occurrences"
        );
    }

    (entries, Session::from_user(snapshot.user))
}
