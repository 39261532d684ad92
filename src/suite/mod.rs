//! Suite orchestration and multi-model aggregation.
//!
//! [`SuiteOrchestrator`] runs N iterations of every scenario against one model and
//! folds the outcomes into a [`SuiteReport`]. [`MultiModelDriver`] repeats that for
//! each configured model and produces a [`RunSummary`]. Execution is strictly
//! sequential: one request in flight at a time.

pub mod driver;
pub mod error;
pub mod orchestrator;
pub mod report;

pub use driver::MultiModelDriver;
pub use error::FatalError;
pub use orchestrator::SuiteOrchestrator;
pub use report::{OutcomeRecord, RunSummary, ScenarioTally, SuiteReport};
