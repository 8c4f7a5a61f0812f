use thiserror::Error;

use super::transport::TransportError;

/// Problems with the task data supplied by the user. Raised before any
/// request leaves the process.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntakeError {
    #[error("Please paste a JSON array of tasks in the input or add tasks to the list.")]
    NoTaskData,
    #[error("Please provide at least a title or a due date before adding.")]
    MissingTitleOrDueDate,
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),
    #[error("Invalid JSON: task {index} is not an object")]
    TaskNotObject { index: usize },
}

/// Failure of a single analyze/suggest invocation that never produced a
/// classifiable service response.
#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error(transparent)]
    Usage(#[from] IntakeError),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("config error: {0}")]
    Config(String),
    #[error("command failed: {0}")]
    Command(String),
    #[error("{0}")]
    Analyze(#[from] AnalyzeError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("internal error: {0}")]
    Anyhow(#[from] anyhow::Error),
}
