//! Core journal types without I/O operations.
//!
//! This module contains the journal entry record, the mood catalogue, the
//! caller-side utilities for stamping new entries (ids and dates) and the
//! date grouping used by list views. Nothing here touches storage.

pub mod stats;

use crate::constants::ENTRY_DATE_FORMAT;
use crate::errors::{AppError, AppResult};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A mood attached to a journal entry.
///
/// Moods are stored as their emoji symbol. Values outside the catalogue are
/// kept verbatim in `Unrecognized` so they survive a save/load cycle; they
/// display with the label `unknown`.
///
/// # Examples
///
/// ```
/// use moodlog::journal_core::Mood;
///
/// assert_eq!(Mood::from_symbol("😊"), Mood::Happy);
/// assert_eq!(Mood::Happy.symbol(), "😊");
///
/// let odd = Mood::from_symbol("🦆");
/// assert_eq!(odd.symbol(), "🦆");
/// assert_eq!(odd.label(), "unknown");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Mood {
    #[default]
    Happy,
    Sad,
    Angry,
    Tired,
    Excited,
    Celebrating,
    Neutral,
    /// A symbol outside the catalogue, preserved as written.
    Unrecognized(UnknownMood),
}

/// A mood symbol that is not in the catalogue.
///
/// Only [`Mood::from_symbol`] builds one, so it never holds a catalogue symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnknownMood(String);

impl UnknownMood {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Mood {
    /// Every mood in the catalogue, in picker order.
    pub const CATALOGUE: [Mood; 7] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Angry,
        Mood::Tired,
        Mood::Excited,
        Mood::Celebrating,
        Mood::Neutral,
    ];

    /// Maps a stored symbol to a mood. Never fails.
    pub fn from_symbol(symbol: &str) -> Self {
        Self::CATALOGUE
            .iter()
            .find(|mood| mood.symbol() == symbol)
            .cloned()
            .unwrap_or_else(|| Mood::Unrecognized(UnknownMood(symbol.to_string())))
    }

    /// The emoji symbol this mood is stored as.
    pub fn symbol(&self) -> &str {
        match self {
            Mood::Happy => "😊",
            Mood::Sad => "😢",
            Mood::Angry => "😡",
            Mood::Tired => "😴",
            Mood::Excited => "🤩",
            Mood::Celebrating => "🥳",
            Mood::Neutral => "😐",
            Mood::Unrecognized(raw) => raw.as_str(),
        }
    }

    /// Human readable name, `unknown` for values outside the catalogue.
    pub fn label(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Angry => "angry",
            Mood::Tired => "tired",
            Mood::Excited => "excited",
            Mood::Celebrating => "celebrating",
            Mood::Neutral => "neutral",
            Mood::Unrecognized(_) => "unknown",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl From<String> for Mood {
    fn from(raw: String) -> Self {
        Mood::from_symbol(&raw)
    }
}

impl From<Mood> for String {
    fn from(mood: Mood) -> Self {
        match mood {
            Mood::Unrecognized(raw) => raw.0,
            known => known.symbol().to_string(),
        }
    }
}

/// Parses user input: a catalogue name (`happy`) or symbol (`😊`).
///
/// Unlike [`Mood::from_symbol`], unknown input is rejected, so new entries
/// only ever carry catalogue moods.
impl FromStr for Mood {
    type Err = AppError;

    fn from_str(input: &str) -> AppResult<Self> {
        let wanted = input.trim();
        Self::CATALOGUE
            .iter()
            .find(|mood| mood.symbol() == wanted || mood.label().eq_ignore_ascii_case(wanted))
            .cloned()
            .ok_or_else(|| {
                let names: Vec<&str> = Self::CATALOGUE.iter().map(Mood::label).collect();
                AppError::InvalidInput(format!(
                    "Unknown mood '{}'. Expected one of: {}",
                    wanted,
                    names.join(", ")
                ))
            })
    }
}

/// One journaling record.
///
/// `image` is omitted from the serialized form when absent, so a stored entry
/// without a photo reads back without one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: String,
    /// Calendar date in `MM/DD/YYYY` form; the grouping key.
    pub date: String,
    #[serde(default)]
    pub text: String,
    pub mood: Mood,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl JournalEntry {
    pub fn new(
        id: impl Into<String>,
        date: impl Into<String>,
        text: impl Into<String>,
        mood: Mood,
    ) -> Self {
        Self {
            id: id.into(),
            date: date.into(),
            text: text.into(),
            mood,
            image: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// Generates a fresh opaque entry id.
pub fn generate_entry_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Formats a date as an entry `date` field.
///
/// ```
/// use chrono::NaiveDate;
/// use moodlog::journal_core::format_entry_date;
///
/// let date = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
/// assert_eq!(format_entry_date(date), "01/02/2025");
/// ```
pub fn format_entry_date(date: NaiveDate) -> String {
    date.format(ENTRY_DATE_FORMAT).to_string()
}

/// Today's date in entry format, using the local timezone.
pub fn today_entry_date() -> String {
    format_entry_date(Local::now().date_naive())
}

/// Parses an entry `date` field.
///
/// # Errors
///
/// Returns `AppError::InvalidInput` if the text is not a valid `MM/DD/YYYY` date.
pub fn parse_entry_date(text: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), ENTRY_DATE_FORMAT).map_err(|e| {
        AppError::InvalidInput(format!(
            "Invalid date '{}': {}. Expected MM/DD/YYYY",
            text, e
        ))
    })
}

/// All entries sharing one `date`, as shown in a list section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateGroup {
    pub date: String,
    pub entries: Vec<JournalEntry>,
}

/// Groups entries into date sections, newest first.
///
/// Sections whose date does not parse come after every valid date, ordered
/// by their raw text. Entries keep their collection order inside a section.
pub fn group_by_date(entries: &[JournalEntry]) -> Vec<DateGroup> {
    let mut groups: Vec<DateGroup> = Vec::new();
    for entry in entries {
        match groups.iter_mut().find(|group| group.date == entry.date) {
            Some(group) => group.entries.push(entry.clone()),
            None => groups.push(DateGroup {
                date: entry.date.clone(),
                entries: vec![entry.clone()],
            }),
        }
    }

    groups.sort_by(|a, b| compare_entry_dates(&a.date, &b.date));
    groups
}

/// Orders entry `date` fields newest first.
///
/// Dates that do not parse sort after every valid date, by their raw text.
pub fn compare_entry_dates(a: &str, b: &str) -> Ordering {
    match (parse_entry_date(a).ok(), parse_entry_date(b).ok()) {
        (Some(left), Some(right)) => right.cmp(&left),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}
