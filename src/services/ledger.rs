//! Ledger service
//!
//! Append, update, delete and query transactions. Every mutation validates
//! first, writes through to disk, then records an audit entry.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::audit::{diff_entities, EntityType};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{
    Kind, Money, Transaction, TransactionDraft, TransactionId, TransactionPatch,
    TransactionValidationError,
};
use crate::storage::Storage;

/// Inclusive calendar range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Restricts a query by kind, category and date
///
/// An empty kind or category set places no restriction on that dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub kinds: BTreeSet<Kind>,
    pub categories: BTreeSet<String>,
    pub date_range: Option<DateRange>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: Kind) -> Self {
        self.kinds.insert(kind);
        self
    }

    pub fn kinds(mut self, kinds: impl IntoIterator<Item = Kind>) -> Self {
        self.kinds.extend(kinds);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.categories.insert(category.into());
        self
    }

    pub fn categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories.extend(categories.into_iter().map(Into::into));
        self
    }

    pub fn date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.date_range = Some(DateRange::new(start, end));
        self
    }

    pub fn matches(&self, txn: &Transaction) -> bool {
        if !self.kinds.is_empty() && !self.kinds.contains(&txn.kind) {
            return false;
        }
        if !self.categories.is_empty() && !self.categories.contains(&txn.category) {
            return false;
        }
        match (self.date_range, txn.date) {
            (None, _) => true,
            (Some(range), Some(date)) => range.contains(date),
            // An unreadable date never falls inside a range
            (Some(_), None) => false,
        }
    }
}

/// Total amount per kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KindTotals {
    totals: BTreeMap<Kind, Money>,
}

impl KindTotals {
    pub fn add(&mut self, kind: Kind, amount: Money) {
        *self.totals.entry(kind).or_default() += amount;
    }

    /// Total for a kind; zero when nothing of that kind was seen
    pub fn get(&self, kind: Kind) -> Money {
        self.totals.get(&kind).copied().unwrap_or_default()
    }

    /// Kinds that actually occurred
    pub fn iter(&self) -> impl Iterator<Item = (Kind, Money)> + '_ {
        self.totals.iter().map(|(k, v)| (*k, *v))
    }

    /// Income minus expense and usage
    pub fn net(&self) -> Money {
        self.get(Kind::Income) - (self.get(Kind::Expense) + self.get(Kind::Usage))
    }
}

impl<'t> FromIterator<&'t Transaction> for KindTotals {
    fn from_iter<I: IntoIterator<Item = &'t Transaction>>(iter: I) -> Self {
        let mut totals = Self::default();
        for txn in iter {
            totals.add(txn.kind, txn.amount);
        }
        totals
    }
}

/// Service for ledger management
pub struct LedgerService<'a> {
    storage: &'a Storage,
}

impl<'a> LedgerService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Append a transaction and return its new id
    pub fn add(&self, draft: TransactionDraft) -> TrackerResult<TransactionId> {
        let draft = draft.normalized();
        if draft.date.is_none() {
            return Err(validation(TransactionValidationError::MissingDate));
        }
        draft.validate().map_err(validation)?;

        let id = self.storage.sequence.next_transaction_id()?;
        let txn = Transaction::from_draft(id, draft);

        self.storage.ledger.upsert(txn.clone())?;
        self.storage.ledger.save()?;
        self.storage.sequence.save()?;

        debug!(id = %id, kind = %txn.kind, amount = %txn.amount, "transaction added");

        self.storage.log_create(
            EntityType::Transaction,
            id.to_string(),
            Some(display_name(&txn)),
            &txn,
        )?;

        Ok(id)
    }

    /// Replace the fields named in the patch
    pub fn update(&self, id: TransactionId, patch: TransactionPatch) -> TrackerResult<Transaction> {
        let before = self
            .storage
            .ledger
            .get(id)?
            .ok_or_else(|| TrackerError::transaction_not_found(id.to_string()))?;

        let mut txn = before.clone();
        patch.apply(&mut txn);
        txn.validate().map_err(validation)?;

        self.storage.ledger.upsert(txn.clone())?;
        self.storage.ledger.save()?;

        debug!(id = %id, "transaction updated");

        self.storage.log_update(
            EntityType::Transaction,
            id.to_string(),
            Some(display_name(&txn)),
            &before,
            &txn,
            diff_entities(&before, &txn),
        )?;

        Ok(txn)
    }

    /// Remove a transaction; other ids are untouched
    pub fn delete(&self, id: TransactionId) -> TrackerResult<Transaction> {
        let txn = self
            .storage
            .ledger
            .delete(id)?
            .ok_or_else(|| TrackerError::transaction_not_found(id.to_string()))?;

        self.storage.ledger.save()?;

        debug!(id = %id, "transaction deleted");

        self.storage.log_delete(
            EntityType::Transaction,
            id.to_string(),
            Some(display_name(&txn)),
            &txn,
        )?;

        Ok(txn)
    }

    pub fn get(&self, id: TransactionId) -> TrackerResult<Option<Transaction>> {
        self.storage.ledger.get(id)
    }

    /// Matching transactions in id order
    pub fn query(&self, filter: &TransactionFilter) -> TrackerResult<Vec<Transaction>> {
        let mut transactions = self.storage.ledger.get_all()?;
        transactions.retain(|t| filter.matches(t));
        Ok(transactions)
    }

    pub fn sum_by_kind(&self, filter: &TransactionFilter) -> TrackerResult<KindTotals> {
        let transactions = self.query(filter)?;
        Ok(transactions.iter().collect())
    }

    pub fn count(&self) -> TrackerResult<usize> {
        self.storage.ledger.count()
    }

    /// Distinct categories used by the ledger, sorted
    pub fn categories_in_use(&self) -> TrackerResult<Vec<String>> {
        let categories: BTreeSet<String> = self
            .storage
            .ledger
            .get_all()?
            .into_iter()
            .map(|t| t.category)
            .collect();
        Ok(categories.into_iter().collect())
    }
}

fn validation(err: TransactionValidationError) -> TrackerError {
    TrackerError::Validation(err.to_string())
}

fn display_name(txn: &Transaction) -> String {
    match &txn.item {
        Some(item) => format!("{} {} / {}", txn.kind, txn.category, item),
        None => format!("{} {}", txn.kind, txn.category),
    }
}
