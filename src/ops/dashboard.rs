//! Mood trends and entry frequency rendered as text bar charts.

use crate::constants::{STATS_BAR_CHAR, STATS_BAR_WIDTH};
use crate::errors::AppResult;
use crate::journal_core::compare_entry_dates;
use crate::journal_core::stats::{entry_frequency_by_date, mood_histogram};
use crate::ops::account::count_noun;
use crate::store::EntryStore;
use std::io::Write;
use tracing::debug;

/// Prints the mood histogram and the per-date entry counts.
///
/// Moods are listed most frequent first, dates newest first. Bars are
/// scaled so the largest bucket in each chart fills the full width.
pub fn show_stats(store: &EntryStore, out: &mut dyn Write) -> AppResult<()> {
    let entries = store.list_entries();
    let moods = mood_histogram(&entries);
    let dates = entry_frequency_by_date(&entries);
    debug!(moods = moods.len(), dates = dates.len(), "Rendering stats");

    writeln!(out, "Mood Trends")?;
    if moods.is_empty() {
        writeln!(out, "  No mood data yet.")?;
    } else {
        let mut rows: Vec<_> = moods.into_iter().collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        let max = rows.first().map(|(_, count)| *count).unwrap_or(0);
        for (mood, count) in &rows {
            writeln!(
                out,
                "  {} {:<11} {} {}",
                mood.symbol(),
                mood.label(),
                bar(*count, max),
                count_noun(*count, "time", "times")
            )?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Entry Frequency")?;
    if dates.is_empty() {
        writeln!(out, "  No entries yet.")?;
    } else {
        let max = dates.values().copied().max().unwrap_or(0);
        let mut rows: Vec<_> = dates.into_iter().collect();
        rows.sort_by(|a, b| compare_entry_dates(&a.0, &b.0));
        for (date, count) in &rows {
            writeln!(
                out,
                "  {:<10} {} {}",
                date,
                bar(*count, max),
                count_noun(*count, "entry", "entries")
            )?;
        }
    }
    Ok(())
}

/// A bar proportional to `count / max`, at least one cell for any non-zero count.
fn bar(count: usize, max: usize) -> String {
    if count == 0 || max == 0 {
        return String::new();
    }
    let cells = ((count * STATS_BAR_WIDTH + max / 2) / max).clamp(1, STATS_BAR_WIDTH);
    std::iter::repeat(STATS_BAR_CHAR).take(cells).collect()
}
