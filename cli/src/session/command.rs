use taskrank_core::api as core_api;

/// One line typed at the session prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Set {
        field: core_api::FormField,
        value: String,
    },
    Form,
    Add,
    /// 1-based position as shown by `list`.
    Remove(usize),
    List,
    Clear,
    Strategy(Option<String>),
    ServiceDefaults(bool),
    Paste,
    Input,
    Analyze,
    Suggest,
    Help,
    Quit,
    Empty,
}

pub const HELP: &str = "\
Commands:
  set <field> <value>   fill a form field (title, due, hours, importance, deps)
  form                  show the form
  add                   add the form as a task to the list
  remove <n>            remove task n from the list
  list                  show the task list
  clear                 empty the task list
  strategy [name]       show or pick smart, fastest, high-impact, deadline
  defaults on|off       let the service pick weights instead of the strategy
  paste                 replace the JSON input (end with a line holding only .)
  input                 show the JSON input
  analyze               score the tasks
  suggest               ask for the top three picks
  help                  this text
  quit                  leave";

impl SessionCommand {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((h, r)) => (h, r.trim()),
            None => (line, ""),
        };

        let cmd = match head.to_ascii_lowercase().as_str() {
            "" => SessionCommand::Empty,
            "set" => {
                let (name, value) = match rest.split_once(char::is_whitespace) {
                    Some((n, v)) => (n, v.trim()),
                    None => (rest, ""),
                };
                if name.is_empty() {
                    return Err("usage: set <field> <value>".to_string());
                }
                SessionCommand::Set {
                    field: name.parse()?,
                    value: value.to_string(),
                }
            }
            "form" => SessionCommand::Form,
            "add" => SessionCommand::Add,
            "remove" | "rm" => {
                let n = rest
                    .parse::<usize>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| "usage: remove <n> (as numbered by list)".to_string())?;
                SessionCommand::Remove(n)
            }
            "list" | "ls" => SessionCommand::List,
            "clear" => SessionCommand::Clear,
            "strategy" => {
                SessionCommand::Strategy((!rest.is_empty()).then(|| rest.to_string()))
            }
            "defaults" => match rest.to_ascii_lowercase().as_str() {
                "on" => SessionCommand::ServiceDefaults(true),
                "off" => SessionCommand::ServiceDefaults(false),
                _ => return Err("usage: defaults on|off".to_string()),
            },
            "paste" => SessionCommand::Paste,
            "input" => SessionCommand::Input,
            "analyze" => SessionCommand::Analyze,
            "suggest" => SessionCommand::Suggest,
            "help" | "?" => SessionCommand::Help,
            "quit" | "exit" => SessionCommand::Quit,
            other => return Err(format!("unknown command '{other}' (try help)")),
        };
        Ok(cmd)
    }
}
