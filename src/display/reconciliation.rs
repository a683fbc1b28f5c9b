//! Reconciliation report formatting
//!
//! One row per budgeted pair with limit, usage, remaining and a progress bar.
//! A zero limit has no defined progress and is shown as "n/a".

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::services::{ReconciliationReport, ReconciliationRow};

use super::{format_bar, format_percentage};

const BAR_WIDTH: usize = 10;

#[derive(Tabled)]
struct ReconciliationLine {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "Limit")]
    limit: String,
    #[tabled(rename = "Usage")]
    usage: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Progress")]
    progress: String,
}

impl ReconciliationLine {
    fn new(row: &ReconciliationRow, symbol: &str) -> Self {
        let progress = match row.progress() {
            Ok(p) => {
                let marker = if p.is_over() { " OVER" } else { "" };
                format!(
                    "{} {}{}",
                    format_bar(p.clamped(), BAR_WIDTH),
                    format_percentage(p.ratio * 100.0),
                    marker
                )
            }
            Err(_) => "n/a".to_string(),
        };

        Self {
            category: row.category.clone(),
            item: row.item.clone(),
            limit: row.limit.format_with_symbol(symbol),
            usage: row.usage_total.format_with_symbol(symbol),
            remaining: row.remaining.format_with_symbol(symbol),
            progress,
        }
    }
}

/// Format a reconciliation report
pub fn format_reconciliation(report: &ReconciliationReport, symbol: &str) -> String {
    let mut output = String::new();

    match report.date_range {
        Some(range) => output.push_str(&format!(
            "Budget vs usage: {} to {}\n",
            range.start, range.end
        )),
        None => output.push_str("Budget vs usage: all dates\n"),
    }

    if report.rows.is_empty() {
        output.push_str("No budgets set.\n");
    } else {
        let lines = report.rows.iter().map(|r| ReconciliationLine::new(r, symbol));
        let mut table = Table::new(lines);
        table
            .with(Style::rounded())
            .with(Modify::new(Columns::new(2..5)).with(Alignment::right()));
        output.push_str(&format!("{}\n", table));
        output.push_str(&format!(
            "Total limit {}  Total usage {}\n",
            report.total_limit().format_with_symbol(symbol),
            report.total_usage().format_with_symbol(symbol)
        ));

        let over = report.over_budget();
        if !over.is_empty() {
            output.push_str(&format!("{} budget(s) over limit\n", over.len()));
        }
    }

    if !report.unbudgeted.is_empty() {
        output.push_str("\nUsage without a budget:\n");
        for entry in &report.unbudgeted {
            output.push_str(&format!(
                "  {} / {}: {}\n",
                entry.category,
                entry.item.as_deref().unwrap_or("(no item)"),
                entry.usage_total.format_with_symbol(symbol)
            ));
        }
    }

    output
}
