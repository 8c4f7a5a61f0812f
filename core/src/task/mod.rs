//! Canonical task records and everything that produces them.

mod deps;
mod normalize;
mod outbound;
mod record;
mod store;

pub use deps::{parse_dependencies, parse_number};
pub use normalize::{parse_task_input, FormField, TaskForm};
pub use outbound::OutboundTask;
pub use record::{Dependency, TaskRecord, DEFAULT_ESTIMATED_HOURS, DEFAULT_IMPORTANCE};
pub use store::TaskListStore;
