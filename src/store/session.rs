//! Session state of the single local user.

use crate::errors::{AppError, AppResult};

/// Whether someone is logged in, and who.
///
/// A session carries nothing but a display name; there are no credentials.
///
/// # Examples
///
/// ```
/// use moodlog::store::Session;
///
/// let session = Session::default();
/// assert!(!session.is_logged_in());
/// assert_eq!(session.user(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    LoggedOut,
    LoggedIn(String),
}

impl Session {
    /// Rebuilds a session from a persisted user name.
    ///
    /// Blank names are treated as logged out.
    pub fn from_user(user: Option<String>) -> Self {
        match user {
            Some(name) if !name.trim().is_empty() => Session::LoggedIn(name.trim().to_string()),
            _ => Session::LoggedOut,
        }
    }

    pub fn user(&self) -> Option<&str> {
        match self {
            Session::LoggedIn(name) => Some(name),
            Session::LoggedOut => None,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self, Session::LoggedIn(_))
    }

    /// Moves to `LoggedIn(name)`.
    ///
    /// Returns `true` if the state changed, `false` if `name` was already
    /// logged in.
    ///
    /// # Errors
    ///
    /// - `AppError::InvalidInput` if `name` is blank
    /// - `AppError::SessionActive` if a different user is logged in
    pub(crate) fn login(&mut self, name: &str) -> AppResult<bool> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidInput(
                "Display name cannot be empty".to_string(),
            ));
        }

        match self {
            Session::LoggedIn(current) if current.as_str() == name => Ok(false),
            Session::LoggedIn(current) => Err(AppError::SessionActive(current.clone())),
            Session::LoggedOut => {
                *self = Session::LoggedIn(name.to_string());
                Ok(true)
            }
        }
    }

    pub(crate) fn logout(&mut self) {
        *self = Session::LoggedOut;
    }
}
