//! Aggregate views over a snapshot of entries.
//!
//! Both projections are single-pass counts, recomputed from scratch on every
//! call. They never mutate or persist anything.

use super::{JournalEntry, Mood};
use std::collections::BTreeMap;

/// Count of entries per mood. Moods with no entries are absent.
pub type MoodHistogram = BTreeMap<Mood, usize>;

/// Count of entries per `date` value.
pub type DateFrequency = BTreeMap<String, usize>;

/// Counts entries per mood.
///
/// # Examples
///
/// ```
/// use moodlog::journal_core::{JournalEntry, Mood};
/// use moodlog::journal_core::stats::mood_histogram;
///
/// let entries = vec![
///     JournalEntry::new("1", "01/01/2025", "", Mood::Happy),
///     JournalEntry::new("2", "01/01/2025", "", Mood::Happy),
///     JournalEntry::new("3", "01/02/2025", "", Mood::Sad),
/// ];
///
/// let histogram = mood_histogram(&entries);
/// assert_eq!(histogram.get(&Mood::Happy), Some(&2));
/// assert_eq!(histogram.get(&Mood::Sad), Some(&1));
/// assert_eq!(histogram.get(&Mood::Angry), None);
/// ```
pub fn mood_histogram(entries: &[JournalEntry]) -> MoodHistogram {
    entries.iter().fold(BTreeMap::new(), |mut acc, entry| {
        *acc.entry(entry.mood.clone()).or_insert(0) += 1;
        acc
    })
}

/// Counts entries per date.
pub fn entry_frequency_by_date(entries: &[JournalEntry]) -> DateFrequency {
    entries.iter().fold(BTreeMap::new(), |mut acc, entry| {
        *acc.entry(entry.date.clone()).or_insert(0) += 1;
        acc
    })
}
