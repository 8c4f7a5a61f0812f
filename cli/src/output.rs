//! Terminal output: colours, spinner, and JSON/text switching.
//!
//! Every renderer writes to a caller-supplied writer; `styled` turns colour
//! on and is only set when that writer is a terminal.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::style::{Color, Stylize};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;
use taskrank_core::api as core_api;
use taskrank_core::render;

use crate::commands::cli::OutputFormat;

pub fn stdout_styled() -> bool {
    atty::is(atty::Stream::Stdout)
}

pub fn stderr_styled() -> bool {
    atty::is(atty::Stream::Stderr)
}

pub fn label_color(label: core_api::ScoreLabel) -> Color {
    match label {
        core_api::ScoreLabel::High => Color::Red,
        core_api::ScoreLabel::Medium => Color::DarkYellow,
        core_api::ScoreLabel::Low => Color::Green,
    }
}

pub fn write_error(out: &mut impl Write, msg: &str, styled: bool) -> io::Result<()> {
    if styled {
        writeln!(out, "{}", msg.with(Color::Red))
    } else {
        writeln!(out, "{msg}")
    }
}

pub fn write_prompt(out: &mut impl Write) -> io::Result<()> {
    write!(out, "> ")?;
    out.flush()
}

/// Spinner on stderr while a request is in flight; hidden when stderr is not
/// a terminal.
pub fn spinner(msg: &str) -> ProgressBar {
    if !stderr_styled() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn write_card(out: &mut impl Write, card: &render::ResultCard, styled: bool) -> io::Result<()> {
    if !styled {
        return writeln!(out, "{card}");
    }
    let color = label_color(card.label);
    writeln!(
        out,
        "{}  {}",
        card.title.as_str().bold(),
        format!("[{} {}]", card.score, card.label).with(color).bold()
    )?;
    writeln!(out, "  {}", card.details.as_str().dark_grey())?;
    let mut why = card.why.iter();
    if let Some(first) = why.next() {
        writeln!(out, "  {} {}", "Why:".bold(), first)?;
    }
    for line in why {
        writeln!(out, "       {line}")?;
    }
    Ok(())
}

pub fn write_results(
    out: &mut impl Write,
    results: &[core_api::AnalyzeResult],
    format: OutputFormat,
    styled: bool,
) -> Result<(), core_api::CliError> {
    match format {
        OutputFormat::Json => {
            let mut labelled = Vec::with_capacity(results.len());
            for r in results {
                let mut v = serde_json::to_value(r).map_err(anyhow::Error::from)?;
                v["label"] = json!(r.label());
                labelled.push(v);
            }
            write_json(out, &labelled)
        }
        OutputFormat::Text => {
            if results.is_empty() {
                writeln!(out, "{}", render::render_results(results))?;
                return Ok(());
            }
            for (i, card) in render::result_cards(results).iter().enumerate() {
                if i > 0 {
                    writeln!(out)?;
                }
                write_card(out, card, styled)?;
            }
            Ok(())
        }
    }
}

pub fn write_suggestions(
    out: &mut impl Write,
    items: &[core_api::Suggestion],
    format: OutputFormat,
) -> Result<(), core_api::CliError> {
    match format {
        OutputFormat::Json => write_json(out, &json!({ "suggestions": items })),
        OutputFormat::Text => {
            writeln!(out, "{}", render::render_suggestions(items))?;
            Ok(())
        }
    }
}

pub fn write_failure(
    out: &mut impl Write,
    failure: &core_api::ServiceFailure,
    format: OutputFormat,
    styled: bool,
) -> Result<(), core_api::CliError> {
    match format {
        OutputFormat::Json => write_json(out, failure),
        OutputFormat::Text => Ok(write_error(out, &render::render_failure(failure), styled)?),
    }
}

pub fn write_json<T: serde::Serialize + ?Sized>(
    out: &mut impl Write,
    value: &T,
) -> Result<(), core_api::CliError> {
    let text = serde_json::to_string_pretty(value).map_err(anyhow::Error::from)?;
    writeln!(out, "{text}")?;
    Ok(())
}

/// Failures go to stderr as text and to stdout as JSON, so `--format json`
/// output stays parseable.
pub fn print_failure(
    failure: &core_api::ServiceFailure,
    format: OutputFormat,
) -> Result<(), core_api::CliError> {
    match format {
        OutputFormat::Json => write_json(&mut io::stdout().lock(), failure),
        OutputFormat::Text => {
            write_failure(&mut io::stderr().lock(), failure, format, stderr_styled())
        }
    }
}
