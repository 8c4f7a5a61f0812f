//! Interactive session: the task list, the form and the JSON input buffer,
//! driven by one command per line.

mod command;
mod loop_run;

pub use command::{SessionCommand, HELP};
pub use loop_run::run_session;

use taskrank_core::api as core_api;
use taskrank_core::render;

/// What the loop should do after a command was handled.
#[derive(Debug)]
pub enum Reply {
    Status(String),
    Error(String),
    Text(String),
    Analyze(core_api::AnalyzeRequest),
    Suggest(core_api::AnalyzeRequest),
    BeginPaste,
    Quit,
    Nothing,
}

pub struct Session {
    store: core_api::TaskListStore,
    form: core_api::TaskForm,
    input: String,
    strategy: core_api::Strategy,
    weights_mode: core_api::WeightsMode,
}

impl Session {
    pub fn new(cfg: &core_api::SessionConfig) -> Self {
        Self {
            store: core_api::TaskListStore::new(),
            form: core_api::TaskForm::default(),
            input: String::new(),
            strategy: core_api::Strategy::resolve(&cfg.default_strategy),
            weights_mode: cfg.weights_mode(),
        }
    }

    pub fn store(&self) -> &core_api::TaskListStore {
        &self.store
    }

    pub fn form(&self) -> &core_api::TaskForm {
        &self.form
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Replaces the JSON input buffer, as a paste does.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn handle(&mut self, cmd: SessionCommand) -> Reply {
        match cmd {
            SessionCommand::Empty => Reply::Nothing,
            SessionCommand::Help => Reply::Text(HELP.to_string()),
            SessionCommand::Quit => Reply::Quit,
            SessionCommand::Paste => Reply::BeginPaste,
            SessionCommand::Set { field, value } => {
                self.form.set(field, value);
                Reply::Nothing
            }
            SessionCommand::Form => Reply::Text(self.render_form()),
            SessionCommand::List => Reply::Text(render::render_task_list(self.store.snapshot())),
            SessionCommand::Input => Reply::Text(if self.input.is_empty() {
                "(input is empty)".to_string()
            } else {
                self.input.clone()
            }),
            SessionCommand::Add => match self.form.build_for_add() {
                Ok(record) => {
                    let status = render::added_status(&record);
                    self.store.add(record);
                    self.form.reset();
                    self.sync_input();
                    Reply::Status(status)
                }
                Err(e) => Reply::Error(e.to_string()),
            },
            SessionCommand::Remove(position) => match position
                .checked_sub(1)
                .and_then(|index| self.store.remove(index))
            {
                Some(record) => {
                    self.sync_input();
                    Reply::Status(render::removed_status(&record))
                }
                None => Reply::Error(format!("No task at position {position}.")),
            },
            SessionCommand::Clear => {
                self.store.clear();
                self.sync_input();
                Reply::Status("Cleared task list.".to_string())
            }
            SessionCommand::Strategy(None) => Reply::Text(format!(
                "Strategy: {} (choices: {})",
                self.strategy,
                core_api::Strategy::ALL
                    .iter()
                    .map(|s| s.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
            SessionCommand::Strategy(Some(name)) => {
                self.strategy = core_api::Strategy::resolve(&name);
                Reply::Status(format!("Strategy: {}", self.strategy))
            }
            SessionCommand::ServiceDefaults(on) => {
                self.weights_mode = if on {
                    core_api::WeightsMode::Service
                } else {
                    core_api::WeightsMode::Preset
                };
                Reply::Status(if on {
                    "Weights: service defaults".to_string()
                } else {
                    format!("Weights: {} preset", self.strategy)
                })
            }
            SessionCommand::Analyze => match self.build_request() {
                Ok(request) => Reply::Analyze(request),
                Err(e) => Reply::Error(e.to_string()),
            },
            SessionCommand::Suggest => match self.build_request() {
                Ok(request) => Reply::Suggest(request),
                Err(e) => Reply::Error(e.to_string()),
            },
        }
    }

    /// Snapshot of everything the request needs, taken at trigger time.
    fn build_request(&self) -> Result<core_api::AnalyzeRequest, core_api::IntakeError> {
        let input = core_api::AnalyzeInput {
            freeform: self.input.clone(),
            form: self.form.clone(),
            strategy: self.strategy.as_str().to_string(),
            weights_mode: self.weights_mode,
        };
        core_api::Orchestrator::build_request(&input, &self.store)
    }

    fn sync_input(&mut self) {
        match self.store.mirror_json() {
            Ok(text) => self.input = text,
            Err(e) => tracing::warn!(
                target: "taskrank.session",
                error = %e,
                "task list mirror failed; input left unchanged"
            ),
        }
    }

    fn render_form(&self) -> String {
        core_api::FormField::ALL
            .iter()
            .map(|field| format!("{:<10} {}", field.as_str(), self.form.get(*field)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn session() -> Session {
        Session::new(&core_api::SessionConfig::default())
    }

    fn run(s: &mut Session, line: &str) -> Reply {
        s.handle(SessionCommand::parse(line).unwrap())
    }

    fn request_json(reply: Reply) -> serde_json::Value {
        match reply {
            Reply::Analyze(req) | Reply::Suggest(req) => serde_json::to_value(req).unwrap(),
            other => panic!("expected a request, got {other:?}"),
        }
    }

    #[test]
    fn add_resets_form_and_mirrors_list() {
        let mut s = session();
        run(&mut s, "set title Write report");
        run(&mut s, "set due 2025-11-30");
        run(&mut s, "set hours 3");
        run(&mut s, "set importance 8");
        run(&mut s, "set deps 1, 2");

        let Reply::Status(msg) = run(&mut s, "add") else {
            panic!("expected status");
        };
        assert_eq!(msg, "Added: Write report");
        assert_eq!(s.store().len(), 1);
        assert_eq!(s.form(), &core_api::TaskForm::after_add());

        let mirrored: serde_json::Value = serde_json::from_str(s.input()).unwrap();
        assert_eq!(
            mirrored,
            json!([{
                "title": "Write report",
                "due_date": "2025-11-30",
                "estimated_hours": 3,
                "importance": 8,
                "dependencies": [1, 2]
            }])
        );
    }

    #[test]
    fn add_without_title_or_due_is_rejected() {
        let mut s = session();
        let Reply::Error(msg) = run(&mut s, "add") else {
            panic!("expected error");
        };
        assert_eq!(
            msg,
            "Please provide at least a title or a due date before adding."
        );
        assert!(s.store().is_empty());
        assert_eq!(s.input(), "");
    }

    #[test]
    fn remove_uses_list_numbering() {
        let mut s = session();
        for title in ["A", "B", "C"] {
            run(&mut s, &format!("set title {title}"));
            run(&mut s, "add");
        }
        let Reply::Status(msg) = run(&mut s, "remove 2") else {
            panic!("expected status");
        };
        assert_eq!(msg, "Removed: B");
        let titles: Vec<_> = s.store().snapshot().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "C"]);
        assert!(matches!(run(&mut s, "remove 9"), Reply::Error(_)));
        assert_eq!(s.store().len(), 2);
    }

    #[test]
    fn remove_zero_reports_missing_task() {
        let mut s = session();
        run(&mut s, "set title A");
        run(&mut s, "add");
        let Reply::Error(msg) = s.handle(SessionCommand::Remove(0)) else {
            panic!("expected error");
        };
        assert_eq!(msg, "No task at position 0.");
        assert_eq!(s.store().len(), 1);
    }

    #[test]
    fn clear_mirrors_empty_array() {
        let mut s = session();
        run(&mut s, "set title A");
        run(&mut s, "add");
        run(&mut s, "clear");
        assert!(s.store().is_empty());
        assert_eq!(s.input(), "[]");
    }

    #[test]
    fn pasted_input_wins_over_list() {
        let mut s = session();
        run(&mut s, "set title Listed");
        run(&mut s, "add");
        s.set_input(r#"{"tasks": [{"title": "Pasted", "estimated_hours": 2}]}"#);

        let body = request_json(run(&mut s, "analyze"));
        assert_eq!(body["tasks"][0]["title"], json!("Pasted"));
        assert_eq!(body["tasks"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn analyze_from_form_when_nothing_else() {
        let mut s = session();
        run(&mut s, "set title Solo");
        run(&mut s, "strategy fastest");
        let body = request_json(run(&mut s, "analyze"));
        assert_eq!(body["tasks"][0]["title"], json!("Solo"));
        assert_eq!(body["options"]["weights"]["quickwin_bonus"], json!(25));
    }

    #[test]
    fn analyze_in_fresh_session_is_usage_error() {
        let mut s = session();
        let Reply::Error(msg) = run(&mut s, "analyze") else {
            panic!("expected error");
        };
        assert_eq!(
            msg,
            "Please paste a JSON array of tasks in the input or add tasks to the list."
        );
    }

    #[test]
    fn invalid_pasted_json_is_usage_error() {
        let mut s = session();
        s.set_input("{not json");
        let Reply::Error(msg) = run(&mut s, "analyze") else {
            panic!("expected error");
        };
        assert!(msg.starts_with("Invalid JSON"));
    }

    #[test]
    fn service_defaults_omit_weights() {
        let mut s = session();
        run(&mut s, "set title A");
        run(&mut s, "defaults on");
        let body = request_json(run(&mut s, "suggest"));
        assert_eq!(body["options"], json!({}));
    }

    #[test]
    fn unknown_strategy_falls_back_to_smart() {
        let mut s = session();
        let Reply::Status(msg) = run(&mut s, "strategy turbo") else {
            panic!("expected status");
        };
        assert_eq!(msg, "Strategy: smart");
    }
}
