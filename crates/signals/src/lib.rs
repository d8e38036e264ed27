// In crates/signals/src/lib.rs

pub mod error;
pub mod evaluator;
pub mod formatter;
pub mod types;

pub use error::{Error, Result};
pub use evaluator::SignalEvaluator;
pub use formatter::AlertFormatter;
pub use types::RuleSettings;
