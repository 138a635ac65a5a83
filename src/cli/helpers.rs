//! Shared helper functions for CLI commands

use chrono::NaiveDate;

use crate::core::{JsonStore, Ledger, StoreError};
use crate::cli::GlobalOpts;

/// Open the ledger behind the data file named by the global options.
pub fn open_ledger(global: &GlobalOpts) -> Result<Ledger<JsonStore>, StoreError> {
    Ledger::open(JsonStore::new(&global.data))
}

/// Format an optional civil date for table cells ("-" when absent).
pub fn fmt_opt_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Format operating hours with one decimal place ("-" when never recorded).
pub fn fmt_opt_hours(hours: Option<f64>) -> String {
    hours
        .map(|h| format!("{h:.1}"))
        .unwrap_or_else(|| "-".to_string())
}

/// Format an optional count for table cells ("-" when absent).
pub fn fmt_opt_count(count: Option<u32>) -> String {
    count
        .map(|c| c.to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Truncate a string to max_len, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    }
}

/// Escape a string for CSV output
///
/// Handles commas, quotes, and newlines according to RFC 4180.
pub fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
