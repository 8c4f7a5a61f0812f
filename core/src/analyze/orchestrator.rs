use std::sync::Arc;

use serde::de::DeserializeOwned;

use super::classify::{classify_failure, ServiceFailure};
use super::request::{AnalyzeRequest, WeightsMode};
use super::result::{
    resolve_results, resolve_suggestions, AnalyzeResult, SuccessBody, SuggestBody, Suggestion,
};
use crate::error::{AnalyzeError, IntakeError, TransportError};
use crate::strategy::Strategy;
use crate::task::{parse_task_input, OutboundTask, TaskForm, TaskListStore};
use crate::transport::{AnalyzeTransport, Endpoint, RawResponse};
use crate::util::preview_body;

/// Everything the user has entered at the moment analyze is triggered.
#[derive(Debug, Clone, Default)]
pub struct AnalyzeInput {
    /// Freeform JSON input; takes priority when non-empty.
    pub freeform: String,
    pub form: TaskForm,
    pub strategy: String,
    pub weights_mode: WeightsMode,
}

/// Result of an exchange that reached the service.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceOutcome<T> {
    Success(T),
    Failed(ServiceFailure),
}

/// Picks the tasks to send: pasted JSON first (objects passed through as
/// written), then the stored list, then a single record from the form.
pub fn resolve_tasks(
    freeform: &str,
    store: &TaskListStore,
    form: &TaskForm,
) -> Result<Vec<OutboundTask>, IntakeError> {
    if !freeform.trim().is_empty() {
        let tasks = parse_task_input(freeform)?;
        tracing::debug!(target: "taskrank.intake", source = "input", tasks = tasks.len());
        return Ok(tasks.into_iter().map(OutboundTask::from).collect());
    }
    if !store.is_empty() {
        tracing::debug!(target: "taskrank.intake", source = "store", tasks = store.len());
        return Ok(store
            .snapshot()
            .iter()
            .cloned()
            .map(OutboundTask::from)
            .collect());
    }
    let single = form.build_for_analyze()?;
    tracing::debug!(target: "taskrank.intake", source = "form", tasks = 1);
    Ok(vec![single.into()])
}

#[derive(Clone)]
pub struct Orchestrator {
    transport: Arc<dyn AnalyzeTransport>,
}

impl Orchestrator {
    pub fn new(transport: Arc<dyn AnalyzeTransport>) -> Self {
        Self { transport }
    }

    /// Steps that need no network: task resolution and weight selection.
    pub fn build_request(
        input: &AnalyzeInput,
        store: &TaskListStore,
    ) -> Result<AnalyzeRequest, IntakeError> {
        let tasks = resolve_tasks(&input.freeform, store, &input.form)?;
        let strategy = Strategy::resolve(&input.strategy);
        Ok(AnalyzeRequest::new(tasks, strategy, input.weights_mode))
    }

    pub async fn analyze(
        &self,
        input: &AnalyzeInput,
        store: &TaskListStore,
    ) -> Result<ServiceOutcome<Vec<AnalyzeResult>>, AnalyzeError> {
        let request = Self::build_request(input, store)?;
        self.submit(&request).await
    }

    pub async fn submit(
        &self,
        request: &AnalyzeRequest,
    ) -> Result<ServiceOutcome<Vec<AnalyzeResult>>, AnalyzeError> {
        let outcome = self
            .exchange::<SuccessBody>(Endpoint::Analyze, request)
            .await?;
        Ok(match outcome {
            ServiceOutcome::Success(body) => ServiceOutcome::Success(resolve_results(body)),
            ServiceOutcome::Failed(failure) => ServiceOutcome::Failed(failure),
        })
    }

    pub async fn suggest(
        &self,
        request: &AnalyzeRequest,
    ) -> Result<ServiceOutcome<Vec<Suggestion>>, AnalyzeError> {
        let outcome = self
            .exchange::<SuggestBody>(Endpoint::Suggest, request)
            .await?;
        Ok(match outcome {
            ServiceOutcome::Success(body) => ServiceOutcome::Success(resolve_suggestions(body)),
            ServiceOutcome::Failed(failure) => ServiceOutcome::Failed(failure),
        })
    }

    #[tracing::instrument(
        name = "analyze.exchange",
        skip(self, request),
        fields(request_id = %uuid::Uuid::new_v4(), transport = self.transport.name())
    )]
    async fn exchange<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        request: &AnalyzeRequest,
    ) -> Result<ServiceOutcome<T>, AnalyzeError> {
        tracing::debug!(
            target: "taskrank.analyze",
            stage = "analyze.request.out",
            tasks = request.tasks.len(),
            preset_weights = request.options.weights.is_some()
        );
        let response = self.transport.post(endpoint, request).await.map_err(|e| {
            tracing::error!(target: "taskrank.analyze", stage = "analyze.transport.failed", error = %e);
            e
        })?;
        tracing::debug!(
            target: "taskrank.analyze",
            stage = "analyze.response.in",
            status = response.status,
            body_len = response.body.len()
        );
        interpret(response)
    }
}

fn interpret<T: DeserializeOwned>(response: RawResponse) -> Result<ServiceOutcome<T>, AnalyzeError> {
    if !response.is_success() {
        let failure = classify_failure(&response.body);
        tracing::info!(
            target: "taskrank.analyze",
            stage = "analyze.response.failed",
            status = response.status,
            kind = failure.kind()
        );
        return Ok(ServiceOutcome::Failed(failure));
    }
    let body = serde_json::from_str::<T>(&response.body).map_err(|err| {
        let preview = preview_body(&response.body);
        tracing::error!(target: "taskrank.analyze", stage = "analyze.response.decode", error = %err);
        TransportError::decode(response.status, err, &preview)
    })?;
    Ok(ServiceOutcome::Success(body))
}
