use serde::Serialize;
use serde_json::{Map, Value};

use super::record::TaskRecord;

/// One element of the outbound `tasks` array.
///
/// Records built from the form or the task list are normalized; pasted
/// objects go out exactly as the user wrote them, unknown keys and invalid
/// values included, so the service gets to validate them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OutboundTask {
    Record(TaskRecord),
    Pasted(Map<String, Value>),
}

impl From<TaskRecord> for OutboundTask {
    fn from(record: TaskRecord) -> Self {
        OutboundTask::Record(record)
    }
}

impl From<Map<String, Value>> for OutboundTask {
    fn from(obj: Map<String, Value>) -> Self {
        OutboundTask::Pasted(obj)
    }
}
