//! Local (offline) resolution stages: exact phrases, then regex patterns

pub mod patterns;
pub mod table;

pub use patterns::{PatternMatcher, PatternRule};
pub use table::IntentTable;
