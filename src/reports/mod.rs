//! Reports module for the finance tracker
//!
//! Provides the kind summary with net, the monthly roll-up, and the
//! per-category breakdown for a kind.

pub mod breakdown;
pub mod monthly;
pub mod summary;

pub use breakdown::{BreakdownReport, CategoryShare};
pub use monthly::{MonthRow, MonthlyRollup};
pub use summary::SummaryReport;
