//! Transaction display formatting

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::config::Settings;
use crate::models::Transaction;

use super::{format_date, truncate};

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl TransactionRow {
    fn new(txn: &Transaction, settings: &Settings) -> Self {
        Self {
            id: txn.id.to_string(),
            date: format_date(txn.date, &settings.date_format),
            kind: txn.kind.to_string(),
            category: txn.category.clone(),
            item: txn.item.clone().unwrap_or_default(),
            amount: txn.amount.format_with_symbol(&settings.currency_symbol),
            description: truncate(txn.description.as_deref().unwrap_or(""), 30),
        }
    }
}

/// Format transactions as a table
pub fn format_transaction_table(transactions: &[Transaction], settings: &Settings) -> String {
    if transactions.is_empty() {
        return "No records match your filters.\n".to_string();
    }

    let rows: Vec<_> = transactions
        .iter()
        .map(|t| TransactionRow::new(t, settings))
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::single(5)).with(Alignment::right()));

    format!("{}\n{} transaction(s)\n", table, transactions.len())
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!(
        "Date:        {}\n",
        format_date(txn.date, &settings.date_format)
    ));
    output.push_str(&format!("Type:        {}\n", txn.kind));
    output.push_str(&format!(
        "Amount:      {}\n",
        txn.amount.format_with_symbol(&settings.currency_symbol)
    ));

    if txn.category.is_empty() {
        output.push_str("Category:    (none)\n");
    } else {
        output.push_str(&format!("Category:    {}\n", txn.category));
    }
    if let Some(item) = &txn.item {
        output.push_str(&format!("Item:        {}\n", item));
    }
    if let Some(description) = &txn.description {
        output.push_str(&format!("Description: {}\n", description));
    }

    output
}
