use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Number, Value};

use crate::util::json_number;

pub const DEFAULT_ESTIMATED_HOURS: f64 = 0.0;
pub const DEFAULT_IMPORTANCE: f64 = 1.0;

/// One task to be prioritized. Every field is always populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub due_date: String,
    #[serde(default, serialize_with = "serialize_number")]
    pub estimated_hours: f64,
    #[serde(default = "default_importance", serialize_with = "serialize_number")]
    pub importance: f64,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
}

fn default_importance() -> f64 {
    DEFAULT_IMPORTANCE
}

fn serialize_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    json_number(*value).serialize(serializer)
}

impl Default for TaskRecord {
    fn default() -> Self {
        Self {
            title: String::new(),
            due_date: String::new(),
            estimated_hours: DEFAULT_ESTIMATED_HOURS,
            importance: DEFAULT_IMPORTANCE,
            dependencies: Vec::new(),
        }
    }
}

impl TaskRecord {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Title for status lines, `(no title)` when empty.
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "(no title)"
        } else {
            &self.title
        }
    }
}

/// A reference to another task: an index, a title, or whatever the user put
/// in a JSON dependency array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dependency {
    Id(Number),
    Name(String),
    Other(Value),
}

impl Dependency {
    pub fn from_f64(value: f64) -> Self {
        Dependency::Id(json_number(value))
    }
}

impl From<Value> for Dependency {
    fn from(value: Value) -> Self {
        match value {
            Value::Number(n) => Dependency::Id(n),
            Value::String(s) => Dependency::Name(s),
            other => Dependency::Other(other),
        }
    }
}

impl From<i64> for Dependency {
    fn from(value: i64) -> Self {
        Dependency::Id(Number::from(value))
    }
}

impl From<&str> for Dependency {
    fn from(value: &str) -> Self {
        Dependency::Name(value.to_string())
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dependency::Id(n) => write!(f, "{n}"),
            Dependency::Name(s) => f.write_str(s),
            Dependency::Other(v) => write!(f, "{v}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn serializes_integral_fields_as_integers() {
        let record = TaskRecord {
            title: "Write report".into(),
            due_date: "2025-11-30".into(),
            estimated_hours: 3.0,
            importance: 8.0,
            dependencies: vec![Dependency::from(1), Dependency::from("Draft")],
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "title": "Write report",
                "due_date": "2025-11-30",
                "estimated_hours": 3,
                "importance": 8,
                "dependencies": [1, "Draft"]
            })
        );
        assert!(serde_json::to_string(&record)
            .unwrap()
            .contains(r#""estimated_hours":3,"#));
    }

    #[test]
    fn fractional_hours_stay_fractional() {
        let record = TaskRecord {
            estimated_hours: 1.5,
            ..TaskRecord::default()
        };
        let text = serde_json::to_string(&record).unwrap();
        assert!(text.contains(r#""estimated_hours":1.5"#));
    }

    #[test]
    fn deserialize_fills_defaults() {
        let record: TaskRecord = serde_json::from_str(r#"{"title":"x"}"#).unwrap();
        assert_eq!(record, TaskRecord::titled("x"));
    }

    #[test]
    fn verbatim_dependency_values_are_kept() {
        let deps: Vec<Dependency> = vec![json!(2).into(), json!("a").into(), json!({"id": 3}).into()];
        assert_eq!(
            serde_json::to_value(&deps).unwrap(),
            json!([2, "a", {"id": 3}])
        );
    }

    #[test]
    fn display_title_placeholder() {
        assert_eq!(TaskRecord::default().display_title(), "(no title)");
        assert_eq!(TaskRecord::titled("a").display_title(), "a");
    }
}
