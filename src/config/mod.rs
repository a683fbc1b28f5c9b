//! Configuration module
//!
//! - Data directory resolution
//! - User settings persistence, including integrity policies

pub mod paths;
pub mod settings;

pub use paths::TrackerPaths;
pub use settings::{BudgetPolicy, Settings, TaxonomyPolicy};
