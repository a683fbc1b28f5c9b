//! Display formatting for terminal output
//!
//! Tables for transactions, budgets and reconciliation are rendered with
//! `tabled`; shorter views are plain formatted text.

pub mod budget;
pub mod reconciliation;
pub mod taxonomy;
pub mod transaction;

pub use budget::format_budget_table;
pub use reconciliation::format_reconciliation;
pub use taxonomy::format_vocabulary;
pub use transaction::{format_transaction_details, format_transaction_table};

use chrono::NaiveDate;

/// Render an optional date, or a placeholder when unknown
pub fn format_date(date: Option<NaiveDate>, format: &str) -> String {
    date.map(|d| d.format(format).to_string())
        .unwrap_or_else(|| "(no date)".to_string())
}

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct > 0.0 && pct < 0.1 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Fixed-width progress bar for a ratio in [0, 1]
pub fn format_bar(ratio: f64, width: usize) -> String {
    let filled = ((ratio.clamp(0.0, 1.0)) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Shorten a string to `max_chars`, marking the cut with "..."
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept)
}
