use serde::Serialize;

use crate::strategy::{Strategy, StrategyWeights};
use crate::task::{OutboundTask, TaskRecord};

/// Where scoring weights come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeightsMode {
    /// Send the selected strategy's preset.
    #[default]
    Preset,
    /// Omit weights so the service uses its built-in defaults.
    Service,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AnalyzeOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weights: Option<StrategyWeights>,
}

/// `{ tasks, options: { weights } }`, built fresh for each invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyzeRequest {
    pub tasks: Vec<OutboundTask>,
    pub options: AnalyzeOptions,
}

impl AnalyzeRequest {
    pub fn new(tasks: Vec<OutboundTask>, strategy: Strategy, mode: WeightsMode) -> Self {
        let weights = match mode {
            WeightsMode::Preset => Some(strategy.weights()),
            WeightsMode::Service => None,
        };
        Self {
            tasks,
            options: AnalyzeOptions { weights },
        }
    }
}
