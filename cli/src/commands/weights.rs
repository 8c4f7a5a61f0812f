use std::io::Write as _;

use serde_json::{Map, Value};
use taskrank_core::api as core_api;

use crate::commands::cli::{OutputFormat, WeightsArgs};
use crate::output;

fn selected(args: &WeightsArgs) -> Vec<core_api::Strategy> {
    match &args.name {
        Some(name) => vec![core_api::Strategy::resolve(name)],
        None => core_api::Strategy::ALL.to_vec(),
    }
}

pub fn render_text(strategies: &[core_api::Strategy]) -> String {
    let mut lines = Vec::new();
    for strategy in strategies {
        lines.push(format!("{strategy}:"));
        for (key, value) in strategy.weights().entries() {
            lines.push(format!("  {key} = {value}"));
        }
    }
    lines.join("\n")
}

pub fn handle_weights(args: WeightsArgs) -> Result<i32, core_api::CliError> {
    let strategies = selected(&args);
    let mut out = std::io::stdout().lock();
    match args.format {
        OutputFormat::Text => writeln!(out, "{}", render_text(&strategies))?,
        OutputFormat::Json => {
            let mut map = Map::new();
            for strategy in &strategies {
                let weights =
                    serde_json::to_value(strategy.weights()).map_err(anyhow::Error::from)?;
                map.insert(strategy.as_str().to_string(), weights);
            }
            output::write_json(&mut out, &Value::Object(map))?;
        }
    }
    Ok(0)
}
