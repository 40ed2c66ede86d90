//! Command execution pipeline
//!
//! raw text -> Command -> Resolution (table | patterns | remote)
//! -> ContextResolver -> Dispatcher -> host actions

pub mod executor;
pub mod pipeline;
pub mod resolver;

pub use executor::{DispatchReport, Dispatcher, Step};
pub use pipeline::{CommandPipeline, Outcome};
pub use resolver::{ContextResolver, MatchReason, ResolveFailure};
