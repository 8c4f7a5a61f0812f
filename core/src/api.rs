//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `taskrank_core::api` instead of reaching into internal modules.

pub use crate::analyze::{
    classify_failure, resolve_tasks, AnalyzeInput, AnalyzeOptions, AnalyzeRequest, AnalyzeResult,
    Orchestrator, ServiceFailure, ServiceOutcome, Suggestion, ValidationIssue, WeightsMode,
};
pub use crate::config::{
    load_default, load_from_path, AppConfig, LoggingConfig, ServiceConfig, SessionConfig,
};
pub use crate::context::{AppContext, Services, ServicesFactory};
pub use crate::error::{
    AnalyzeError, CliError, IntakeError, TransportError, TransportErrorKind,
};
pub use crate::label::{score_to_label, ScoreLabel};
pub use crate::strategy::{resolve_weights, Strategy, StrategyWeights};
pub use crate::task::{
    parse_dependencies, Dependency, FormField, OutboundTask, TaskForm, TaskListStore, TaskRecord,
};
pub use crate::transport::{AnalyzeTransport, Endpoint, RawResponse};
