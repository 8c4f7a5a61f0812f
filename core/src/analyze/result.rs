use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::label::ScoreLabel;
use crate::util::{is_truthy, json_number, value_text};

/// Success bodies come in more than one shape; this is resolved once, at the
/// response boundary, into a plain list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SuccessBody {
    List(Vec<Value>),
    Wrapped { tasks: Vec<Value> },
    Other(Value),
}

impl SuccessBody {
    pub fn into_items(self) -> Vec<Value> {
        match self {
            SuccessBody::List(items) | SuccessBody::Wrapped { tasks: items } => items,
            SuccessBody::Other(value) => {
                tracing::warn!(
                    target: "taskrank.analyze",
                    stage = "analyze.result.unexpected_shape",
                    kind = json_kind(&value),
                    "success body is not a task list; nothing to show"
                );
                Vec::new()
            }
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn serialize_score<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    json_number(*value).serialize(serializer)
}

/// One scored task as returned by the service. Fields the service echoes
/// back are kept loosely typed since they are only displayed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyzeResult {
    pub title: String,
    pub due_date: String,
    pub estimated_hours: Value,
    pub importance: Value,
    pub dependencies: Vec<Value>,
    #[serde(serialize_with = "serialize_score")]
    pub score: f64,
    pub explanation: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AnalyzeResult {
    pub fn from_value(value: Value) -> Self {
        let mut obj = match value {
            Value::Object(obj) => obj,
            other => {
                tracing::debug!(
                    target: "taskrank.analyze",
                    kind = json_kind(&other),
                    "non-object result entry"
                );
                Map::new()
            }
        };
        let title = take_text(&mut obj, "title");
        let due_date = take_text(&mut obj, "due_date");
        let estimated_hours = obj.remove("estimated_hours").unwrap_or(Value::Null);
        let importance = obj.remove("importance").unwrap_or(Value::Null);
        let dependencies = match obj.remove("dependencies") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        };
        let score = take_score(&mut obj, "score");
        let explanation = take_text(&mut obj, "explanation");
        Self {
            title,
            due_date,
            estimated_hours,
            importance,
            dependencies,
            score,
            explanation,
            extra: obj,
        }
    }

    pub fn label(&self) -> ScoreLabel {
        ScoreLabel::from_score(self.score)
    }
}

/// A top-ranked task from the suggest endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub title: String,
    pub due_date: String,
    #[serde(serialize_with = "serialize_score")]
    pub score: f64,
    pub why: String,
}

impl Suggestion {
    pub fn from_value(value: Value) -> Self {
        let mut obj = match value {
            Value::Object(obj) => obj,
            _ => Map::new(),
        };
        Self {
            title: take_text(&mut obj, "title"),
            due_date: take_text(&mut obj, "due_date"),
            score: take_score(&mut obj, "score"),
            why: take_text(&mut obj, "why"),
        }
    }

    pub fn label(&self) -> ScoreLabel {
        ScoreLabel::from_score(self.score)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SuggestBody {
    Wrapped { suggestions: Vec<Value> },
    List(Vec<Value>),
    Other(Value),
}

impl SuggestBody {
    pub fn into_items(self) -> Vec<Value> {
        match self {
            SuggestBody::Wrapped { suggestions: items } | SuggestBody::List(items) => items,
            SuggestBody::Other(value) => {
                tracing::warn!(
                    target: "taskrank.analyze",
                    stage = "suggest.result.unexpected_shape",
                    kind = json_kind(&value),
                    "suggest body has no suggestions list"
                );
                Vec::new()
            }
        }
    }
}

fn take_text(obj: &mut Map<String, Value>, key: &str) -> String {
    match obj.remove(key) {
        Some(v) if is_truthy(&v) => value_text(&v),
        _ => String::new(),
    }
}

/// Missing or non-numeric scores display as 0.
fn take_score(obj: &mut Map<String, Value>, key: &str) -> f64 {
    obj.remove(key)
        .as_ref()
        .and_then(Value::as_f64)
        .unwrap_or(0.0)
}

pub fn resolve_results(body: SuccessBody) -> Vec<AnalyzeResult> {
    body.into_items()
        .into_iter()
        .map(AnalyzeResult::from_value)
        .collect()
}

pub fn resolve_suggestions(body: SuggestBody) -> Vec<Suggestion> {
    body.into_items()
        .into_iter()
        .map(Suggestion::from_value)
        .collect()
}
