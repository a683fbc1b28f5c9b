//! Summary Report
//!
//! Income, expense and usage totals plus net over a filtered view of the
//! ledger.

use serde::Serialize;

use crate::error::TrackerResult;
use crate::models::{Kind, Money};
use crate::services::{DateRange, LedgerService, TransactionFilter};
use crate::storage::Storage;

/// Totals for the transactions matching a filter
#[derive(Debug, Clone, Serialize)]
pub struct SummaryReport {
    /// Date range the filter applied, if any
    pub date_range: Option<DateRange>,
    pub income: Money,
    pub expense: Money,
    pub usage: Money,
    /// income - (expense + usage)
    pub net: Money,
    pub transaction_count: usize,
}

impl SummaryReport {
    /// Generate a summary for the transactions matching `filter`
    pub fn generate(storage: &Storage, filter: &TransactionFilter) -> TrackerResult<Self> {
        let ledger = LedgerService::new(storage);
        let matching = ledger.query(filter)?;
        let totals = ledger.sum_by_kind(filter)?;

        Ok(Self {
            date_range: filter.date_range,
            income: totals.get(Kind::Income),
            expense: totals.get(Kind::Expense),
            usage: totals.get(Kind::Usage),
            net: totals.net(),
            transaction_count: matching.len(),
        })
    }

    /// True when no transaction matched
    pub fn is_empty(&self) -> bool {
        self.transaction_count == 0
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let mut output = String::new();

        match self.date_range {
            Some(range) => output.push_str(&format!("Summary: {} to {}\n", range.start, range.end)),
            None => output.push_str("Summary: all dates\n"),
        }
        output.push_str(&"=".repeat(40));
        output.push('\n');

        if self.is_empty() {
            output.push_str("No records match your filters.\n");
            return output;
        }

        for (label, amount) in [
            ("Income total", self.income),
            ("Expense total", self.expense),
            ("Usage total", self.usage),
        ] {
            output.push_str(&format!(
                "{:<20} {:>18}\n",
                label,
                amount.format_with_symbol(currency_symbol)
            ));
        }
        output.push_str(&"-".repeat(40));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>18}\n",
            "Net",
            self.net.format_with_symbol(currency_symbol)
        ));
        output.push_str(&format!("{:<20} {:>18}\n", "Transactions", self.transaction_count));

        output
    }
}
