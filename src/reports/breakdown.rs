//! Category Breakdown Report
//!
//! Totals per category for one kind over a filtered view, with each
//! category's share of the kind's total. This is the data behind the
//! "expenses by category" and "usage by category" charts.

use std::collections::HashMap;
use std::io::Write;

use serde::Serialize;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Kind, Money};
use crate::services::{LedgerService, TransactionFilter};
use crate::storage::Storage;

/// Totals for one category
#[derive(Debug, Clone, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub total: Money,
    pub transaction_count: usize,
    /// Share of the kind's total, in percent
    pub percentage: f64,
}

/// Per-category totals for one kind, largest first
#[derive(Debug, Clone, Serialize)]
pub struct BreakdownReport {
    pub kind: Kind,
    pub categories: Vec<CategoryShare>,
    pub total: Money,
}

impl BreakdownReport {
    /// Generate a breakdown of `kind` over the transactions matching `filter`
    ///
    /// Any kind restriction already on the filter is replaced by `kind`.
    pub fn generate(
        storage: &Storage,
        kind: Kind,
        filter: &TransactionFilter,
    ) -> TrackerResult<Self> {
        let mut filter = filter.clone();
        filter.kinds.clear();
        let filter = filter.kind(kind);

        let transactions = LedgerService::new(storage).query(&filter)?;

        let mut by_category: HashMap<&str, (Money, usize)> = HashMap::new();
        let mut total = Money::zero();
        for txn in &transactions {
            let entry = by_category
                .entry(txn.category.as_str())
                .or_insert((Money::zero(), 0));
            entry.0 += txn.amount;
            entry.1 += 1;
            total += txn.amount;
        }

        let mut categories: Vec<CategoryShare> = by_category
            .into_iter()
            .map(|(category, (amount, count))| CategoryShare {
                category: category.to_string(),
                total: amount,
                transaction_count: count,
                percentage: if total.is_zero() {
                    0.0
                } else {
                    amount.cents() as f64 / total.cents() as f64 * 100.0
                },
            })
            .collect();

        // Largest first, ties by name so output is stable
        categories.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));

        Ok(Self {
            kind,
            categories,
            total,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("{} by category\n", self.kind));
        output.push_str(&"=".repeat(60));
        output.push('\n');

        if self.is_empty() {
            output.push_str(&format!("No {} to chart.\n", self.kind.as_str().to_lowercase()));
            return output;
        }

        output.push_str(&format!(
            "{:<30} {:>12} {:>6} {:>8}\n",
            "Category", "Amount", "Count", "%"
        ));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for share in &self.categories {
            let name = if share.category.is_empty() {
                "(none)"
            } else {
                share.category.as_str()
            };
            output.push_str(&format!(
                "{:<30} {:>12} {:>6} {:>7.1}%\n",
                name, share.total, share.transaction_count, share.percentage
            ));
        }

        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!("{:<30} {:>12}\n", "TOTAL", self.total));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> TrackerResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["Type", "Category", "Amount", "Transaction Count", "Percentage"])?;
        for share in &self.categories {
            csv.write_record([
                self.kind.as_str(),
                share.category.as_str(),
                &share.total.to_decimal_string(),
                &share.transaction_count.to_string(),
                &format!("{:.2}", share.percentage),
            ])?;
        }
        csv.flush().map_err(|e| TrackerError::Export(e.to_string()))?;
        Ok(())
    }

    /// Keep only the `limit` largest categories; percentages are unchanged
    pub fn keep_top(&mut self, limit: usize) {
        self.categories.truncate(limit);
    }
}
