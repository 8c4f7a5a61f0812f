mod classify;
mod orchestrator;
mod request;
mod result;

pub use classify::{classify_failure, ServiceFailure, ValidationIssue};
pub use orchestrator::{resolve_tasks, AnalyzeInput, Orchestrator, ServiceOutcome};
pub use request::{AnalyzeOptions, AnalyzeRequest, WeightsMode};
pub use result::{
    resolve_results, resolve_suggestions, AnalyzeResult, SuccessBody, SuggestBody, Suggestion,
};
