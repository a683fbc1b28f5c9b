//! Budget registry display formatting

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::Budget;

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "Limit")]
    limit: String,
}

/// Format budgets as a table in registry order
pub fn format_budget_table(budgets: &[Budget], currency_symbol: &str) -> String {
    if budgets.is_empty() {
        return "No budgets set.\n".to_string();
    }

    let rows = budgets.iter().map(|b| BudgetRow {
        id: b.id.to_string(),
        category: b.category.clone(),
        item: b.item.clone(),
        limit: b.limit.format_with_symbol(currency_symbol),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::single(3)).with(Alignment::right()));

    format!("{}\n", table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetId, Money};

    #[test]
    fn test_budget_table() {
        let budgets = vec![
            Budget::new(BudgetId::from_raw(1), "Food", "Groceries", Money::from_cents(10000)),
            Budget::new(BudgetId::from_raw(2), "Utilities", "Electricity", Money::from_cents(5000)),
        ];
        let output = format_budget_table(&budgets, "€");
        assert!(output.contains("bud-1"));
        assert!(output.contains("€100.00"));
        assert!(output.contains("Electricity"));
    }

    #[test]
    fn test_empty_budget_table() {
        assert_eq!(format_budget_table(&[], ""), "No budgets set.\n");
    }
}
