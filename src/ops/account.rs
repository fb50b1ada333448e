//! Login, logout and session inspection.

use crate::errors::AppResult;
use crate::store::EntryStore;
use std::io::Write;
use tracing::info;

/// Logs `name` in and greets them.
///
/// # Errors
///
/// Propagates `AppError::InvalidInput` for a blank name and
/// `AppError::SessionActive` when someone else is logged in.
pub fn login(store: &mut EntryStore, name: &str, out: &mut dyn Write) -> AppResult<()> {
    store.login(name)?;
    if let Some(user) = store.current_user() {
        info!("Session started");
        writeln!(out, "Welcome, {}!", user)?;
    }
    Ok(())
}

/// Logs out. Every entry is erased along with the session.
pub fn logout(store: &mut EntryStore, out: &mut dyn Write) -> AppResult<()> {
    let erased = store.list_entries().len();
    store.logout();
    info!(erased, "Session ended");
    writeln!(out, "Logged out. {} erased.", count_noun(erased, "entry", "entries"))?;
    Ok(())
}

pub fn whoami(store: &EntryStore, out: &mut dyn Write) -> AppResult<()> {
    match store.current_user() {
        Some(user) => writeln!(out, "Logged in as {}", user)?,
        None => writeln!(out, "Not logged in")?,
    }
    Ok(())
}

/// `1 entry`, `2 entries`.
pub(crate) fn count_noun(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::journal_core::{JournalEntry, Mood};
    use crate::journal_io::MemoryStorage;
    use crate::store::StorePolicy;
    use std::sync::Arc;

    fn open_store() -> EntryStore {
        EntryStore::open(Arc::new(MemoryStorage::new()), StorePolicy::default()).unwrap()
    }

    fn rendered(out: Vec<u8>) -> String {
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_login_greets_trimmed_name() {
        let mut store = open_store();
        let mut out = Vec::new();
        login(&mut store, "  ada ", &mut out).unwrap();
        assert_eq!(rendered(out), "Welcome, ada!\n");
    }

    #[test]
    fn test_login_blank_name_writes_nothing() {
        let mut store = open_store();
        let mut out = Vec::new();
        assert!(matches!(
            login(&mut store, " ", &mut out),
            Err(AppError::InvalidInput(_))
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn test_logout_reports_erased_entries() {
        let mut store = open_store();
        store.login("ada").unwrap();
        store
            .add_entry(JournalEntry::new("a", "01/01/2025", "", Mood::Happy))
            .unwrap();

        let mut out = Vec::new();
        logout(&mut store, &mut out).unwrap();
        assert_eq!(rendered(out), "Logged out. 1 entry erased.\n");

        let mut out = Vec::new();
        logout(&mut store, &mut out).unwrap();
        assert_eq!(rendered(out), "Logged out. 0 entries erased.\n");
    }

    #[test]
    fn test_whoami() {
        let mut store = open_store();
        let mut out = Vec::new();
        whoami(&store, &mut out).unwrap();
        assert_eq!(rendered(out), "Not logged in\n");

        store.login("ada").unwrap();
        let mut out = Vec::new();
        whoami(&store, &mut out).unwrap();
        assert_eq!(rendered(out), "Logged in as ada\n");
    }

    #[test]
    fn test_count_noun() {
        assert_eq!(count_noun(0, "time", "times"), "0 times");
        assert_eq!(count_noun(1, "time", "times"), "1 time");
        assert_eq!(count_noun(12, "entry", "entries"), "12 entries");
    }
}
