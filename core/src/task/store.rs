use super::record::TaskRecord;

/// Session-lifetime task list. Mutated only through `add`, `remove` and
/// `clear`; indices always refer to the current order.
#[derive(Debug, Clone, Default)]
pub struct TaskListStore {
    tasks: Vec<TaskRecord>,
}

impl TaskListStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, record: TaskRecord) {
        tracing::debug!(
            target: "taskrank.store",
            stage = "store.add",
            title = %record.title,
            len = self.tasks.len() + 1
        );
        self.tasks.push(record);
    }

    /// Removes the task at `index`. Out-of-range indices remove nothing.
    pub fn remove(&mut self, index: usize) -> Option<TaskRecord> {
        if index >= self.tasks.len() {
            tracing::debug!(
                target: "taskrank.store",
                stage = "store.remove.out_of_range",
                index = index,
                len = self.tasks.len()
            );
            return None;
        }
        let removed = self.tasks.remove(index);
        tracing::debug!(
            target: "taskrank.store",
            stage = "store.remove",
            index = index,
            len = self.tasks.len()
        );
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    pub fn snapshot(&self) -> &[TaskRecord] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Pretty-printed JSON of the current list, two-space indented.
    pub fn mirror_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn store_with(titles: &[&str]) -> TaskListStore {
        let mut store = TaskListStore::new();
        for t in titles {
            store.add(TaskRecord::titled(*t));
        }
        store
    }

    fn titles(store: &TaskListStore) -> Vec<&str> {
        store.snapshot().iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn add_appends_in_order() {
        let store = store_with(&["a", "b", "c"]);
        assert_eq!(titles(&store), vec!["a", "b", "c"]);
    }

    #[test]
    fn remove_uses_current_order() {
        let mut store = store_with(&["a", "b", "c"]);
        assert_eq!(store.remove(0).map(|t| t.title), Some("a".to_string()));
        assert_eq!(store.remove(0).map(|t| t.title), Some("b".to_string()));
        assert_eq!(titles(&store), vec!["c"]);
    }

    #[test]
    fn remove_out_of_range_is_noop() {
        let mut store = store_with(&["a", "b"]);
        assert!(store.remove(2).is_none());
        assert!(store.remove(usize::MAX).is_none());
        assert_eq!(titles(&store), vec!["a", "b"]);
    }

    #[test]
    fn length_tracks_adds_minus_successful_removes() {
        let mut store = TaskListStore::new();
        let mut expected = 0usize;
        for step in 0..40usize {
            if step % 3 == 2 {
                if store.remove(step % 5).is_some() {
                    expected -= 1;
                }
            } else {
                store.add(TaskRecord::titled(format!("t{step}")));
                expected += 1;
            }
            assert_eq!(store.len(), expected);
        }
    }

    #[test]
    fn clear_empties() {
        let mut store = store_with(&["a"]);
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.mirror_json().unwrap(), "[]");
    }

    #[test]
    fn mirror_is_pretty_json() {
        let store = store_with(&["a"]);
        let text = store.mirror_json().unwrap();
        assert!(text.starts_with("[\n  {\n    \"title\": \"a\""));
        assert!(text.contains("\"estimated_hours\": 0,"));
    }
}
