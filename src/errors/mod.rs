//! Error handling utilities for the moodlog application.
//!
//! This module provides the central error type `AppError` which represents all
//! possible error conditions that might occur in the application, as well as the
//! convenience type alias `AppResult` for functions that can return these errors.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Represents failures of the durable storage behind the entry store.
///
/// The entry store never surfaces these from its mutating operations: they are
/// logged and swallowed, and the in-memory state stays authoritative. Storage
/// adapters and the snapshot codec return them directly.
///
/// # Examples
///
/// ```
/// use moodlog::errors::PersistenceError;
/// use std::io::{self, ErrorKind};
///
/// let error = PersistenceError::Write {
///     key: "root".to_string(),
///     source: io::Error::new(ErrorKind::PermissionDenied, "permission denied"),
/// };
///
/// assert!(format!("{}", error).contains("root"));
/// assert!(format!("{}", error).contains("permission denied"));
/// ```
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Reading a storage slot failed.
    #[error("Failed to read storage slot '{key}': {source}")]
    Read {
        /// The storage key being read
        key: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Writing a storage slot failed.
    #[error("Failed to write storage slot '{key}': {source}. Changes are kept in memory until a later write succeeds.")]
    Write {
        /// The storage key being written
        key: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The advisory lock on the data directory could not be taken.
    #[error("Failed to lock data directory {path}: {source}")]
    Lock {
        /// The lock file path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A snapshot could not be encoded.
    #[error("Failed to encode snapshot: {0}")]
    Encode(#[source] serde_json::Error),

    /// A stored snapshot could not be decoded.
    #[error("Stored snapshot in slot '{key}' is corrupt: {source}")]
    Corrupt {
        /// The storage key that held the data
        key: String,
        /// The underlying decoding error
        #[source]
        source: serde_json::Error,
    },

    /// A stored snapshot was written by an unknown layout version.
    #[error("Stored snapshot has unsupported version {0}")]
    UnsupportedVersion(u32),

    /// Storage writes were rejected on purpose (in-memory test storage).
    #[error("Storage is unavailable")]
    Unavailable,
}

/// Represents all possible errors that can occur in the moodlog application.
///
/// # Examples
///
/// ```
/// use moodlog::errors::AppError;
///
/// let error = AppError::InvalidInput("Display name cannot be empty".to_string());
/// assert_eq!(format!("{}", error), "Invalid input: Display name cannot be empty");
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors from filesystem operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Rejected caller input (empty display name, unknown mood, malformed date).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A mutation was attempted while no user is logged in.
    #[error("Not logged in. Run `moodlog login <NAME>` first.")]
    NotAuthenticated,

    /// Another user already holds the session.
    #[error("'{0}' is already logged in. Log out first; logging out erases all entries.")]
    SessionActive(String),

    /// An entry with the same id already exists.
    #[error("An entry with id '{0}' already exists")]
    DuplicateEntry(String),

    /// No entry with the given id (reported by collaborators, never by the store).
    #[error("No entry with id '{0}'")]
    EntryNotFound(String),

    /// Errors related to the durable storage.
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
///
/// # Examples
///
/// ```
/// use moodlog::errors::{AppResult, AppError};
///
/// fn require_name(name: &str) -> AppResult<&str> {
///     if name.trim().is_empty() {
///         return Err(AppError::InvalidInput("empty name".to_string()));
///     }
///     Ok(name.trim())
/// }
///
/// assert!(require_name("  ").is_err());
/// ```
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn test_app_error_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let app_error: AppError = io_error.into();

        match app_error {
            AppError::Io(inner) => {
                assert_eq!(inner.kind(), io::ErrorKind::NotFound);
            }
            _ => panic!("Expected AppError::Io variant"),
        }
    }

    #[test]
    fn test_app_error_display() {
        let config_error = AppError::Config("Invalid configuration".to_string());
        assert_eq!(
            format!("{}", config_error),
            "Configuration error: Invalid configuration"
        );

        assert!(format!("{}", AppError::NotAuthenticated).contains("Not logged in"));

        let active = AppError::SessionActive("ada".to_string());
        assert!(format!("{}", active).contains("'ada' is already logged in"));

        let dup = AppError::DuplicateEntry("42".to_string());
        assert_eq!(format!("{}", dup), "An entry with id '42' already exists");

        let missing = AppError::EntryNotFound("7".to_string());
        assert_eq!(format!("{}", missing), "No entry with id '7'");
    }

    #[test]
    fn test_persistence_error_conversion_to_app_error() {
        let app_error: AppError = PersistenceError::Unavailable.into();
        match app_error {
            AppError::Persistence(PersistenceError::Unavailable) => {}
            other => panic!("Expected Persistence variant, got {:?}", other),
        }
        assert_eq!(
            format!("{}", AppError::Persistence(PersistenceError::Unavailable)),
            "Persistence error: Storage is unavailable"
        );
    }

    #[test]
    fn test_persistence_error_source_chaining() {
        let error = PersistenceError::Read {
            key: "root".to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let source = error.source().expect("Read should carry a source");
        assert_eq!(source.to_string(), "denied");

        let corrupt = PersistenceError::Corrupt {
            key: "root".to_string(),
            source: serde_json::from_str::<u32>("not json").unwrap_err(),
        };
        assert!(corrupt.source().is_some());
        assert!(format!("{}", corrupt).contains("corrupt"));

        assert!(PersistenceError::UnsupportedVersion(9).source().is_none());
    }

    #[test]
    fn test_app_error_source_chaining() {
        let app_error: AppError = PersistenceError::Lock {
            path: PathBuf::from("/tmp/.moodlog.lock"),
            source: io::Error::new(io::ErrorKind::WouldBlock, "busy"),
        }
        .into();

        let first = app_error.source().expect("AppError should expose its source");
        assert!(first.to_string().contains(".moodlog.lock"));
        let second = first.source().expect("Lock should expose the io error");
        assert_eq!(second.to_string(), "busy");
    }
}
