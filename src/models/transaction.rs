//! Transaction model
//!
//! A ledger entry: a dated income, expense or usage amount tagged with a
//! category and an optional item.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::TransactionId;
use super::money::Money;

/// The kind of a ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Kind {
    Income,
    Expense,
    Usage,
}

impl Kind {
    /// All kinds, in report order
    pub const ALL: [Kind; 3] = [Kind::Income, Kind::Expense, Kind::Usage];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
            Self::Usage => "Usage",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = KindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            "usage" => Ok(Self::Usage),
            _ => Err(KindParseError(s.trim().to_string())),
        }
    }
}

/// Error for an unrecognized kind string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindParseError(pub String);

impl fmt::Display for KindParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown transaction type '{}' (expected Income, Expense or Usage)",
            self.0
        )
    }
}

impl std::error::Error for KindParseError {}

/// A ledger entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Issued on creation, never reused
    pub id: TransactionId,

    /// None only for imported rows whose date could not be read
    pub date: Option<NaiveDate>,

    pub kind: Kind,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub item: Option<String>,

    /// Non-negative amount
    pub amount: Money,

    #[serde(default)]
    pub description: Option<String>,
}

impl Transaction {
    /// Build a transaction from a validated draft
    pub fn from_draft(id: TransactionId, draft: TransactionDraft) -> Self {
        Self {
            id,
            date: draft.date,
            kind: draft.kind,
            category: draft.category,
            item: draft.item,
            amount: draft.amount,
            description: draft.description,
        }
    }

    /// Check if this entry carries the given item
    pub fn has_item(&self, item: &str) -> bool {
        self.item.as_deref() == Some(item)
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.amount.is_negative() {
            return Err(TransactionValidationError::NegativeAmount(self.amount));
        }
        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let date = self
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "----------".to_string());
        write!(f, "{} {} {} {}", date, self.kind, self.category, self.amount)
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NegativeAmount(Money),
    MissingDate,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount(amount) => {
                write!(f, "Amount must not be negative (got {})", amount)
            }
            Self::MissingDate => write!(f, "A transaction date is required"),
        }
    }
}

impl std::error::Error for TransactionValidationError {}

/// A transaction that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDraft {
    pub date: Option<NaiveDate>,
    pub kind: Kind,
    pub category: String,
    pub item: Option<String>,
    pub amount: Money,
    pub description: Option<String>,
}

impl TransactionDraft {
    pub fn new(date: NaiveDate, kind: Kind, category: impl Into<String>, amount: Money) -> Self {
        Self {
            date: Some(date),
            kind,
            category: category.into().trim().to_string(),
            item: None,
            amount,
            description: None,
        }
    }

    pub fn item(mut self, item: impl Into<String>) -> Self {
        self.item = normalize_optional(Some(item.into()));
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = normalize_optional(Some(description.into()));
        self
    }

    /// Trim text fields; empty optional text becomes None
    pub fn normalized(mut self) -> Self {
        self.category = self.category.trim().to_string();
        self.item = normalize_optional(self.item);
        self.description = normalize_optional(self.description);
        self
    }

    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.amount.is_negative() {
            return Err(TransactionValidationError::NegativeAmount(self.amount));
        }
        Ok(())
    }
}

/// Field changes for an existing transaction
///
/// `None` leaves a field alone. For `item` and `description`, `Some(None)`
/// clears the field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionPatch {
    pub date: Option<NaiveDate>,
    pub kind: Option<Kind>,
    pub category: Option<String>,
    pub item: Option<Option<String>>,
    pub amount: Option<Money>,
    pub description: Option<Option<String>>,
}

impl TransactionPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the changes in place
    pub fn apply(&self, txn: &mut Transaction) {
        if let Some(date) = self.date {
            txn.date = Some(date);
        }
        if let Some(kind) = self.kind {
            txn.kind = kind;
        }
        if let Some(category) = &self.category {
            txn.category = category.trim().to_string();
        }
        if let Some(item) = &self.item {
            txn.item = normalize_optional(item.clone());
        }
        if let Some(amount) = self.amount {
            txn.amount = amount;
        }
        if let Some(description) = &self.description {
            txn.description = normalize_optional(description.clone());
        }
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    #[test]
    fn test_kind_parse_is_case_insensitive() {
        assert_eq!("usage".parse::<Kind>().unwrap(), Kind::Usage);
        assert_eq!(" INCOME ".parse::<Kind>().unwrap(), Kind::Income);
        assert_eq!("Expense".parse::<Kind>().unwrap(), Kind::Expense);
        assert!("refund".parse::<Kind>().is_err());
    }

    #[test]
    fn test_draft_trims_text() {
        let draft =
            TransactionDraft::new(test_date(), Kind::Usage, "  Food ", Money::from_cents(4000))
                .item(" Groceries ")
            .description("   ");

        assert_eq!(draft.category, "Food");
        assert_eq!(draft.item.as_deref(), Some("Groceries"));
        assert_eq!(draft.description, None);
    }

    #[test]
    fn test_negative_amount_rejected() {
        let draft =
            TransactionDraft::new(test_date(), Kind::Expense, "Rent", Money::from_cents(-1));
        assert_eq!(
            draft.validate(),
            Err(TransactionValidationError::NegativeAmount(Money::from_cents(-1)))
        );

        let zero = TransactionDraft::new(test_date(), Kind::Expense, "Rent", Money::zero());
        assert!(zero.validate().is_ok());
    }

    #[test]
    fn test_patch_clears_optional_fields() {
        let draft = TransactionDraft::new(test_date(), Kind::Usage, "Food", Money::from_cents(100))
            .item("Snacks")
            .description("vending machine");
        let mut txn = Transaction::from_draft(TransactionId::from_raw(1), draft);

        let patch = TransactionPatch {
            item: Some(None),
            amount: Some(Money::from_cents(250)),
            ..Default::default()
        };
        patch.apply(&mut txn);

        assert_eq!(txn.item, None);
        assert_eq!(txn.amount.cents(), 250);
        assert_eq!(txn.description.as_deref(), Some("vending machine"));
        assert_eq!(txn.id.get(), 1);
    }

    #[test]
    fn test_empty_patch() {
        assert!(TransactionPatch::default().is_empty());
        let patch = TransactionPatch {
            kind: Some(Kind::Income),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_serialization() {
        let txn = Transaction::from_draft(
            TransactionId::from_raw(3),
            TransactionDraft::new(test_date(), Kind::Income, "Salary", Money::from_cents(100000)),
        );
        let json = serde_json::to_string(&txn).unwrap();
        assert!(json.contains("\"kind\":\"Income\""));
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(txn, back);
    }
}
