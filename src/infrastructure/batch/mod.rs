//! Batch orchestration - issue, render and dispatch credentials for a roster

mod orchestrator;
mod summary;

pub use orchestrator::{write_token_records, BatchOrchestrator, RunMode};
pub use summary::BatchSummary;
