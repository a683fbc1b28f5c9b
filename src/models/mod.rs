//! Core data models for the finance tracker
//!
//! Ledger entries, the category and item vocabularies, and budget ceilings.

pub mod budget;
pub mod ids;
pub mod money;
pub mod taxonomy;
pub mod transaction;

pub use budget::{validate_limit, Budget, BudgetValidationError};
pub use ids::{BudgetId, TransactionId};
pub use money::{Money, MoneyParseError};
pub use taxonomy::{Vocabulary, VocabularyError, VocabularyKind};
pub use transaction::{
    Kind, KindParseError, Transaction, TransactionDraft, TransactionPatch,
    TransactionValidationError,
};
