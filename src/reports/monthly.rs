//! Monthly Roll-up
//!
//! Per calendar month totals for each kind, always over the full ledger.
//! Transactions without a date have no month and are left out.

use std::collections::BTreeMap;

use chrono::Datelike;
use serde::Serialize;

use crate::error::TrackerResult;
use crate::models::{Kind, Money};
use crate::services::{KindTotals, LedgerService, TransactionFilter};
use crate::storage::Storage;

/// One calendar month of totals
#[derive(Debug, Clone, Serialize)]
pub struct MonthRow {
    pub year: i32,
    pub month: u32,
    pub totals: KindTotals,
}

impl MonthRow {
    /// Month label in `YYYY-MM` form
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

/// Monthly totals in ascending month order
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyRollup {
    pub months: Vec<MonthRow>,
    /// Transactions skipped because their date is unknown
    pub undated: usize,
}

impl MonthlyRollup {
    pub fn generate(storage: &Storage) -> TrackerResult<Self> {
        let transactions = LedgerService::new(storage).query(&TransactionFilter::new())?;

        let mut by_month: BTreeMap<(i32, u32), KindTotals> = BTreeMap::new();
        let mut undated = 0;

        for txn in &transactions {
            match txn.date {
                Some(date) => by_month
                    .entry((date.year(), date.month()))
                    .or_default()
                    .add(txn.kind, txn.amount),
                None => undated += 1,
            }
        }

        let months = by_month
            .into_iter()
            .map(|((year, month), totals)| MonthRow {
                year,
                month,
                totals,
            })
            .collect();

        Ok(Self { months, undated })
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("Monthly overview (full dataset)\n");
        output.push_str(&"=".repeat(62));
        output.push('\n');
        output.push_str(&format!(
            "{:<10} {:>12} {:>12} {:>12} {:>12}\n",
            "Month", "Income", "Expense", "Usage", "Net"
        ));
        output.push_str(&"-".repeat(62));
        output.push('\n');

        for row in &self.months {
            output.push_str(&format!(
                "{:<10} {:>12} {:>12} {:>12} {:>12}\n",
                row.label(),
                row.totals.get(Kind::Income),
                row.totals.get(Kind::Expense),
                row.totals.get(Kind::Usage),
                row.totals.net()
            ));
        }

        if self.months.is_empty() {
            output.push_str("No dated transactions.\n");
        }
        if self.undated > 0 {
            output.push_str(&format!(
                "\n{} transaction(s) without a date were skipped\n",
                self.undated
            ));
        }

        output
    }

    /// Grand total per kind across all months
    pub fn totals(&self) -> KindTotals {
        let mut totals = KindTotals::default();
        for row in &self.months {
            for (kind, amount) in row.totals.iter() {
                totals.add(kind, amount);
            }
        }
        totals
    }

    pub fn get(&self, year: i32, month: u32, kind: Kind) -> Money {
        self.months
            .iter()
            .find(|row| row.year == year && row.month == month)
            .map(|row| row.totals.get(kind))
            .unwrap_or_default()
    }
}
