use std::str::FromStr;

use serde_json::{Map, Value};

use super::deps::{parse_dependencies, parse_number};
use super::record::{TaskRecord, DEFAULT_ESTIMATED_HOURS, DEFAULT_IMPORTANCE};
use crate::error::IntakeError;

const EXPECTED_SHAPE: &str = "Expected a JSON array of task objects or { tasks: [...] }.";

/// Field values from the single-task entry form as raw text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub due_date: String,
    pub estimated_hours: String,
    pub importance: String,
    pub dependencies: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    DueDate,
    EstimatedHours,
    Importance,
    Dependencies,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Title,
        FormField::DueDate,
        FormField::EstimatedHours,
        FormField::Importance,
        FormField::Dependencies,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FormField::Title => "title",
            FormField::DueDate => "due",
            FormField::EstimatedHours => "hours",
            FormField::Importance => "importance",
            FormField::Dependencies => "deps",
        }
    }
}

impl FromStr for FormField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(FormField::Title),
            "due" | "due_date" | "due-date" => Ok(FormField::DueDate),
            "hours" | "estimated_hours" | "effort" => Ok(FormField::EstimatedHours),
            "importance" => Ok(FormField::Importance),
            "deps" | "dependencies" => Ok(FormField::Dependencies),
            other => Err(format!(
                "unknown field '{other}' (expected one of: title, due, hours, importance, deps)"
            )),
        }
    }
}

impl TaskForm {
    /// The form as it looks right after a successful add.
    pub fn after_add() -> Self {
        Self {
            estimated_hours: "1".to_string(),
            importance: "5".to_string(),
            ..Self::default()
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::DueDate => &self.due_date,
            FormField::EstimatedHours => &self.estimated_hours,
            FormField::Importance => &self.importance,
            FormField::Dependencies => &self.dependencies,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::Title => &mut self.title,
            FormField::DueDate => &mut self.due_date,
            FormField::EstimatedHours => &mut self.estimated_hours,
            FormField::Importance => &mut self.importance,
            FormField::Dependencies => &mut self.dependencies,
        };
        *slot = value.into();
    }

    pub fn reset(&mut self) {
        *self = Self::after_add();
    }

    /// True when every field is empty after trimming.
    pub fn is_blank(&self) -> bool {
        FormField::ALL
            .iter()
            .all(|field| self.get(*field).trim().is_empty())
    }

    /// Builds a record with defaults applied. Never fails; see
    /// [`TaskForm::build_for_add`] and [`TaskForm::build_for_analyze`] for
    /// the checks each caller needs.
    pub fn to_record(&self) -> TaskRecord {
        TaskRecord {
            title: self.title.trim().to_string(),
            due_date: self.due_date.trim().to_string(),
            estimated_hours: coerce_hours(&self.estimated_hours),
            importance: coerce_importance(&self.importance),
            dependencies: parse_dependencies(&self.dependencies),
        }
    }

    /// Adding to the list needs at least a title or a due date.
    pub fn build_for_add(&self) -> Result<TaskRecord, IntakeError> {
        if self.title.trim().is_empty() && self.due_date.trim().is_empty() {
            return Err(IntakeError::MissingTitleOrDueDate);
        }
        Ok(self.to_record())
    }

    /// Analyzing straight from the form needs at least one field filled in.
    pub fn build_for_analyze(&self) -> Result<TaskRecord, IntakeError> {
        if self.is_blank() {
            return Err(IntakeError::NoTaskData);
        }
        Ok(self.to_record())
    }
}

fn coerce_hours(raw: &str) -> f64 {
    let hours = coerce_text_number(raw, DEFAULT_ESTIMATED_HOURS, "estimated_hours");
    non_negative(hours)
}

fn coerce_importance(raw: &str) -> f64 {
    coerce_text_number(raw, DEFAULT_IMPORTANCE, "importance")
}

fn coerce_text_number(raw: &str, default: f64, field: &'static str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return default;
    }
    match parse_number(trimmed) {
        Some(n) => n,
        None => {
            tracing::warn!(
                target: "taskrank.intake",
                field = field,
                raw = %trimmed,
                default = default,
                "non-numeric value replaced by default"
            );
            default
        }
    }
}

fn non_negative(hours: f64) -> f64 {
    if hours < 0.0 {
        tracing::warn!(
            target: "taskrank.intake",
            field = "estimated_hours",
            value = hours,
            "negative value replaced by 0"
        );
        DEFAULT_ESTIMATED_HOURS
    } else {
        hours
    }
}

/// Reads pasted JSON: either an array of task objects or `{ "tasks": [...] }`.
/// Each object is kept as written; only the overall shape is checked.
pub fn parse_task_input(raw: &str) -> Result<Vec<Map<String, Value>>, IntakeError> {
    let parsed: Value =
        serde_json::from_str(raw.trim()).map_err(|e| IntakeError::InvalidJson(e.to_string()))?;
    let items = match parsed {
        Value::Array(items) => items,
        Value::Object(mut obj) => match obj.remove("tasks") {
            Some(Value::Array(items)) => items,
            _ => return Err(IntakeError::InvalidJson(EXPECTED_SHAPE.to_string())),
        },
        _ => return Err(IntakeError::InvalidJson(EXPECTED_SHAPE.to_string())),
    };
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(obj) => Ok(obj),
            _ => Err(IntakeError::TaskNotObject { index }),
        })
        .collect()
}
