use serde::Serialize;
use serde_json::Value;

use crate::util::{is_truthy, value_text};

const FIELD_PLACEHOLDER: &str = "(field)";

/// One itemized problem from a structured validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Task position as reported by the service, when present.
    pub index: Option<String>,
    pub field: String,
    pub problem: String,
}

/// How a non-2xx service response is presented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ServiceFailure {
    Validation { issues: Vec<ValidationIssue> },
    Server { message: String },
    Unclassified { body: String },
}

impl ServiceFailure {
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceFailure::Validation { .. } => "validation",
            ServiceFailure::Server { .. } => "server",
            ServiceFailure::Unclassified { .. } => "unclassified",
        }
    }
}

type Classifier = fn(&Value) -> Option<ServiceFailure>;

/// Tried in order against the parsed body; the first match wins.
const CLASSIFIERS: &[(&str, Classifier)] = &[
    ("validation", classify_validation),
    ("message", classify_message),
];

fn classify_validation(body: &Value) -> Option<ServiceFailure> {
    let entries = body.get("errors")?.as_array()?;
    if entries.is_empty() {
        return None;
    }
    let issues = entries.iter().map(validation_issue).collect();
    Some(ServiceFailure::Validation { issues })
}

fn validation_issue(entry: &Value) -> ValidationIssue {
    let index = entry.get("index").map(value_text);
    let field = entry
        .get("field")
        .filter(|v| is_truthy(v))
        .map(value_text)
        .unwrap_or_else(|| FIELD_PLACEHOLDER.to_string());
    let problem = entry
        .get("problem")
        .filter(|v| is_truthy(v))
        .map(value_text)
        .unwrap_or_else(|| entry.to_string());
    ValidationIssue {
        index,
        field,
        problem,
    }
}

fn classify_message(body: &Value) -> Option<ServiceFailure> {
    ["error", "message"]
        .iter()
        .filter_map(|key| body.get(*key))
        .find(|v| is_truthy(v))
        .map(|v| ServiceFailure::Server {
            message: value_text(v),
        })
}

/// Classifies the body of an error-status response.
pub fn classify_failure(body: &str) -> ServiceFailure {
    let parsed = serde_json::from_str::<Value>(body).ok();
    let matched = parsed.as_ref().and_then(|value| {
        CLASSIFIERS.iter().find_map(|(name, classify)| {
            let out = classify(value)?;
            tracing::debug!(target: "taskrank.analyze", classifier = name, "failure classified");
            Some(out)
        })
    });
    matched.unwrap_or_else(|| ServiceFailure::Unclassified {
        body: body.to_string(),
    })
}
