//! Reconciliation service
//!
//! Joins usage totals from the ledger against the budget registry. Budgets
//! for the same (category, item) pair are merged by summing their limits into
//! one row at the position of the first such budget. Usage that no budget
//! covers is reported separately instead of being dropped.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Kind, Money};
use crate::storage::Storage;

use super::ledger::{DateRange, TransactionFilter};

/// Usage relative to a budget limit
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
    /// usage / limit, unclamped; above 1.0 means overrun
    pub ratio: f64,
}

impl Progress {
    /// Ratio limited to [0, 1] for progress bars
    pub fn clamped(&self) -> f64 {
        self.ratio.clamp(0.0, 1.0)
    }

    pub fn is_over(&self) -> bool {
        self.ratio > 1.0
    }
}

/// One budget line joined with its usage
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconciliationRow {
    pub category: String,
    pub item: String,
    /// Sum of the limits of every budget for this pair
    pub limit: Money,
    pub usage_total: Money,
    /// limit - usage_total; negative means overrun
    pub remaining: Money,
    /// How many budget records were merged into this row
    pub budget_count: usize,
    /// Filled by `reconcile`; `None` when the limit is zero
    pub progress: Option<Progress>,
}

impl ReconciliationRow {
    /// usage_total / limit
    ///
    /// # Errors
    ///
    /// `DivisionUndefined` when the limit is zero.
    pub fn progress(&self) -> TrackerResult<Progress> {
        if self.limit.is_zero() {
            return Err(TrackerError::DivisionUndefined {
                category: self.category.clone(),
                item: self.item.clone(),
            });
        }
        Ok(Progress {
            ratio: self.usage_total.cents() as f64 / self.limit.cents() as f64,
        })
    }

    /// Usage exceeds the limit
    pub fn is_over_budget(&self) -> bool {
        self.remaining.is_negative()
    }
}

/// Usage for a pair that has no budget
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnbudgetedUsage {
    pub category: String,
    pub item: Option<String>,
    pub usage_total: Money,
}

/// Result of a reconciliation run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReconciliationReport {
    /// One row per budgeted pair, in registry order
    pub rows: Vec<ReconciliationRow>,
    /// Usage with no matching budget, sorted by category then item
    pub unbudgeted: Vec<UnbudgetedUsage>,
    pub date_range: Option<DateRange>,
}

impl ReconciliationReport {
    pub fn over_budget(&self) -> Vec<&ReconciliationRow> {
        self.rows.iter().filter(|r| r.is_over_budget()).collect()
    }

    pub fn total_limit(&self) -> Money {
        self.rows.iter().map(|r| r.limit).sum()
    }

    pub fn total_usage(&self) -> Money {
        self.rows.iter().map(|r| r.usage_total).sum()
    }
}

/// Service for budget-vs-usage reconciliation
pub struct ReconciliationService<'a> {
    storage: &'a Storage,
}

impl<'a> ReconciliationService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Reconcile the whole ledger, or only usage inside `date_range`
    pub fn reconcile(&self, date_range: Option<DateRange>) -> TrackerResult<ReconciliationReport> {
        let mut filter = TransactionFilter::new().kind(Kind::Usage);
        filter.date_range = date_range;

        let mut usage: BTreeMap<(String, Option<String>), Money> = BTreeMap::new();
        for txn in self.storage.ledger.get_all()? {
            if filter.matches(&txn) {
                *usage.entry((txn.category, txn.item)).or_default() += txn.amount;
            }
        }

        let mut rows: Vec<ReconciliationRow> = Vec::new();
        let mut row_index: HashMap<(String, String), usize> = HashMap::new();

        for budget in self.storage.budgets.get_all()? {
            let key = (budget.category.clone(), budget.item.clone());
            match row_index.get(&key) {
                Some(&index) => {
                    let row = &mut rows[index];
                    row.limit += budget.limit;
                    row.budget_count += 1;
                }
                None => {
                    row_index.insert(key, rows.len());
                    rows.push(ReconciliationRow {
                        category: budget.category,
                        item: budget.item,
                        limit: budget.limit,
                        usage_total: Money::zero(),
                        remaining: Money::zero(),
                        budget_count: 1,
                        progress: None,
                    });
                }
            }
        }

        let mut unbudgeted = Vec::new();
        for ((category, item), total) in usage {
            let matched = item
                .as_ref()
                .and_then(|i| row_index.get(&(category.clone(), i.clone())));
            match matched {
                Some(&index) => rows[index].usage_total = total,
                None => unbudgeted.push(UnbudgetedUsage {
                    category,
                    item,
                    usage_total: total,
                }),
            }
        }

        for row in &mut rows {
            row.remaining = row.limit - row.usage_total;
            row.progress = row.progress().ok();
        }

        Ok(ReconciliationReport {
            rows,
            unbudgeted,
            date_range,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::TrackerPaths;
    use crate::config::BudgetPolicy;
    use crate::models::TransactionDraft;
    use crate::services::{BudgetService, LedgerService};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, month, day).unwrap()
    }

    fn add(storage: &Storage, kind: Kind, category: &str, item: Option<&str>, cents: i64) {
        add_on(storage, date(1, 10), kind, category, item, cents);
    }

    fn add_on(
        storage: &Storage,
        on: NaiveDate,
        kind: Kind,
        category: &str,
        item: Option<&str>,
        cents: i64,
    ) {
        let mut draft = TransactionDraft::new(on, kind, category, Money::from_cents(cents));
        if let Some(item) = item {
            draft = draft.item(item);
        }
        LedgerService::new(storage).add(draft).unwrap();
    }

    fn set(storage: &Storage, category: &str, item: &str, cents: i64) {
        BudgetService::new(storage, BudgetPolicy::default())
            .set(category, item, Money::from_cents(cents))
            .unwrap();
    }

    #[test]
    fn test_remaining_and_progress() {
        let (_temp_dir, storage) = create_test_storage();
        set(&storage, "Food", "Groceries", 10000);
        add(&storage, Kind::Usage, "Food", Some("Groceries"), 3000);
        add(&storage, Kind::Usage, "Food", Some("Groceries"), 4500);

        let report = ReconciliationService::new(&storage).reconcile(None).unwrap();
        let row = &report.rows[0];

        assert_eq!(row.usage_total.cents(), 7500);
        assert_eq!(row.remaining.cents(), 2500);
        assert!((row.progress().unwrap().ratio - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_zero_limit_is_division_undefined() {
        let (_temp_dir, storage) = create_test_storage();
        set(&storage, "Food", "Snacks", 0);
        add(&storage, Kind::Usage, "Food", Some("Snacks"), 1200);

        let report = ReconciliationService::new(&storage).reconcile(None).unwrap();
        let row = &report.rows[0];

        assert!(matches!(
            row.progress(),
            Err(TrackerError::DivisionUndefined { .. })
        ));
        assert_eq!(row.remaining.cents(), -1200);
        assert!(row.is_over_budget());
    }

    #[test]
    fn test_budget_without_usage_still_appears() {
        let (_temp_dir, storage) = create_test_storage();
        set(&storage, "Utilities", "Electricity", 5000);

        let report = ReconciliationService::new(&storage).reconcile(None).unwrap();
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].usage_total, Money::zero());
        assert_eq!(report.rows[0].remaining.cents(), 5000);
        assert_eq!(report.rows[0].progress().unwrap().ratio, 0.0);
    }

    #[test]
    fn test_only_usage_counts() {
        let (_temp_dir, storage) = create_test_storage();
        set(&storage, "Food", "Groceries", 10000);
        add(&storage, Kind::Expense, "Food", Some("Groceries"), 5000);
        add(&storage, Kind::Income, "Food", Some("Groceries"), 5000);

        let report = ReconciliationService::new(&storage).reconcile(None).unwrap();
        assert_eq!(report.rows[0].usage_total, Money::zero());
    }

    #[test]
    fn test_duplicates_merge_at_first_position() {
        let (_temp_dir, storage) = create_test_storage();
        set(&storage, "Food", "Groceries", 10000);
        set(&storage, "Utilities", "Electricity", 5000);
        set(&storage, "Food", "Groceries", 2000);
        add(&storage, Kind::Usage, "Food", Some("Groceries"), 6000);

        let report = ReconciliationService::new(&storage).reconcile(None).unwrap();

        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].category, "Food");
        assert_eq!(report.rows[0].limit.cents(), 12000);
        assert_eq!(report.rows[0].budget_count, 2);
        assert_eq!(report.rows[0].remaining.cents(), 6000);
        assert_eq!(report.rows[1].item, "Electricity");
        assert_eq!(report.total_limit().cents(), 17000);
    }

    #[test]
    fn test_unbudgeted_usage_is_surfaced() {
        let (_temp_dir, storage) = create_test_storage();
        set(&storage, "Food", "Groceries", 10000);
        add(&storage, Kind::Usage, "Food", Some("Coffee"), 500);
        add(&storage, Kind::Usage, "Transport", None, 300);

        let report = ReconciliationService::new(&storage).reconcile(None).unwrap();

        assert_eq!(report.rows[0].usage_total, Money::zero());
        assert_eq!(
            report.unbudgeted,
            vec![
                UnbudgetedUsage {
                    category: "Food".into(),
                    item: Some("Coffee".into()),
                    usage_total: Money::from_cents(500),
                },
                UnbudgetedUsage {
                    category: "Transport".into(),
                    item: None,
                    usage_total: Money::from_cents(300),
                },
            ]
        );
    }

    #[test]
    fn test_over_budget_and_clamped_progress() {
        let (_temp_dir, storage) = create_test_storage();
        set(&storage, "Food", "Groceries", 1000);
        set(&storage, "Food", "Snacks", 1000);
        add(&storage, Kind::Usage, "Food", Some("Groceries"), 1500);

        let report = ReconciliationService::new(&storage).reconcile(None).unwrap();
        let over = report.over_budget();

        assert_eq!(over.len(), 1);
        let progress = over[0].progress().unwrap();
        assert!((progress.ratio - 1.5).abs() < 1e-9);
        assert_eq!(progress.clamped(), 1.0);
        assert!(progress.is_over());
    }

    #[test]
    fn test_date_range_restricts_usage() {
        let (_temp_dir, storage) = create_test_storage();
        set(&storage, "Food", "Groceries", 10000);
        add_on(&storage, date(1, 5), Kind::Usage, "Food", Some("Groceries"), 1000);
        add_on(&storage, date(2, 5), Kind::Usage, "Food", Some("Groceries"), 2000);

        let range = DateRange::new(date(2, 1), date(2, 28));
        let report = ReconciliationService::new(&storage)
            .reconcile(Some(range))
            .unwrap();
        assert_eq!(report.rows[0].usage_total.cents(), 2000);
    }

    #[test]
    fn test_end_to_end_scenario() {
        let (_temp_dir, storage) = create_test_storage();
        add(&storage, Kind::Income, "Salary", None, 100000);
        add(&storage, Kind::Usage, "Food", Some("Groceries"), 4000);
        set(&storage, "Food", "Groceries", 10000);

        let report = ReconciliationService::new(&storage).reconcile(None).unwrap();
        let row = &report.rows[0];
        assert_eq!(row.usage_total.cents(), 4000);
        assert_eq!(row.remaining.cents(), 6000);
        assert!((row.progress().unwrap().ratio - 0.40).abs() < 1e-9);
        assert_eq!(row.progress, row.progress().ok());

        let totals = LedgerService::new(&storage)
            .sum_by_kind(&TransactionFilter::new())
            .unwrap();
        assert_eq!(totals.get(Kind::Income).cents(), 100000);
        assert_eq!(totals.get(Kind::Usage).cents(), 4000);
        assert_eq!(totals.get(Kind::Expense), Money::zero());
    }

    #[test]
    fn test_json_rows_carry_progress() {
        let (_temp_dir, storage) = create_test_storage();
        set(&storage, "Food", "Groceries", 10000);
        set(&storage, "Food", "Snacks", 0);
        add(&storage, Kind::Usage, "Food", Some("Groceries"), 7500);
        add(&storage, Kind::Usage, "Food", Some("Snacks"), 1200);

        let report = ReconciliationService::new(&storage).reconcile(None).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        let groceries = &json["rows"][0];
        assert_eq!(groceries["remaining"], 2500);
        let ratio = groceries["progress"]["ratio"].as_f64().unwrap();
        assert!((ratio - 0.75).abs() < 1e-9);

        // Zero limit: the key is present but the ratio is undefined
        let snacks = json["rows"][1].as_object().unwrap();
        assert!(snacks.contains_key("progress"));
        assert!(snacks["progress"].is_null());
        assert_eq!(snacks["remaining"], -1200);
    }
}
