//! Plain-text presentation of task lists, results and failures.
//!
//! Styling (colour) is left to the terminal front-end; everything here is
//! deterministic text so it can be asserted on.

use std::fmt::{self, Write as _};

use serde_json::Value;

use crate::analyze::{AnalyzeResult, ServiceFailure, Suggestion};
use crate::label::ScoreLabel;
use crate::task::TaskRecord;
use crate::util::{is_truthy, json_number, value_text};

const DASH: &str = "—";
const NO_TITLE: &str = "(no title)";

fn text_or_dash(s: &str) -> &str {
    if s.is_empty() {
        DASH
    } else {
        s
    }
}

fn number_or_dash(n: f64) -> String {
    if n == 0.0 || n.is_nan() {
        DASH.to_string()
    } else {
        json_number(n).to_string()
    }
}

fn value_or_dash(v: &Value) -> String {
    if is_truthy(v) {
        value_text(v)
    } else {
        DASH.to_string()
    }
}

fn detail_line(due: &str, effort: &str, importance: &str) -> String {
    format!("Due: {due} • Effort: {effort}h • Importance: {importance}")
}

pub fn render_task_list(tasks: &[TaskRecord]) -> String {
    if tasks.is_empty() {
        return "No tasks yet".to_string();
    }
    let mut out = String::new();
    for (i, t) in tasks.iter().enumerate() {
        let title = if t.title.is_empty() { NO_TITLE } else { &t.title };
        let _ = writeln!(out, "{}. {}", i + 1, title);
        let _ = writeln!(
            out,
            "   {}",
            detail_line(
                text_or_dash(&t.due_date),
                &number_or_dash(t.estimated_hours),
                &number_or_dash(t.importance)
            )
        );
    }
    out.truncate(out.trim_end().len());
    out
}

/// Display-ready pieces of one scored task.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultCard {
    pub title: String,
    pub details: String,
    pub why: Vec<String>,
    pub score: String,
    pub label: ScoreLabel,
}

impl ResultCard {
    pub fn from_result(result: &AnalyzeResult) -> Self {
        let title = if result.title.is_empty() {
            NO_TITLE.to_string()
        } else {
            result.title.clone()
        };
        let why = if result.explanation.is_empty() {
            vec![DASH.to_string()]
        } else {
            result.explanation.lines().map(str::to_string).collect()
        };
        Self {
            title,
            details: detail_line(
                text_or_dash(&result.due_date),
                &value_or_dash(&result.estimated_hours),
                &value_or_dash(&result.importance),
            ),
            why,
            score: json_number(result.score).to_string(),
            label: result.label(),
        }
    }
}

impl fmt::Display for ResultCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}  [{} {}]", self.title, self.score, self.label)?;
        writeln!(f, "  {}", self.details)?;
        let mut lines = self.why.iter();
        if let Some(first) = lines.next() {
            write!(f, "  Why: {first}")?;
        }
        for line in lines {
            write!(f, "\n       {line}")?;
        }
        Ok(())
    }
}

pub fn result_cards(results: &[AnalyzeResult]) -> Vec<ResultCard> {
    results.iter().map(ResultCard::from_result).collect()
}

pub fn render_results(results: &[AnalyzeResult]) -> String {
    if results.is_empty() {
        return "No tasks returned.".to_string();
    }
    result_cards(results)
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn render_suggestions(items: &[Suggestion]) -> String {
    if items.is_empty() {
        return "No suggestions returned.".to_string();
    }
    let mut out = String::new();
    for (i, s) in items.iter().enumerate() {
        let title = if s.title.is_empty() { NO_TITLE } else { &s.title };
        let _ = writeln!(
            out,
            "{}. {}  [{} {}]",
            i + 1,
            title,
            json_number(s.score),
            s.label()
        );
        let _ = writeln!(out, "   Due: {}", text_or_dash(&s.due_date));
        let _ = writeln!(out, "   Why: {}", text_or_dash(&s.why));
    }
    out.truncate(out.trim_end().len());
    out
}

pub fn render_failure(failure: &ServiceFailure) -> String {
    match failure {
        ServiceFailure::Validation { issues } => {
            let mut out = String::from("Validation errors:");
            for issue in issues {
                let task = match &issue.index {
                    Some(i) => format!("Task {i}"),
                    None => "Task".to_string(),
                };
                let _ = write!(out, "\n  - {task} — {}: {}", issue.field, issue.problem);
            }
            out
        }
        ServiceFailure::Server { message } => format!("Error: {message}"),
        ServiceFailure::Unclassified { body } => format!("Server error:\n{body}"),
    }
}

pub fn added_status(record: &TaskRecord) -> String {
    format!("Added: {}", record.display_title())
}

pub fn removed_status(record: &TaskRecord) -> String {
    format!("Removed: {}", record.display_title())
}
