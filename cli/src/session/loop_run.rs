use std::io::Write;

use chrono::{DateTime, Local};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use taskrank_core::api as core_api;

use super::{Reply, Session, SessionCommand};
use crate::commands::cli::OutputFormat;
use crate::output;

enum Finished {
    Analyzed(Result<core_api::ServiceOutcome<Vec<core_api::AnalyzeResult>>, core_api::AnalyzeError>),
    Suggested(Result<core_api::ServiceOutcome<Vec<core_api::Suggestion>>, core_api::AnalyzeError>),
}

struct Completion {
    run: u64,
    finished_at: DateTime<Local>,
    finished: Finished,
}

#[derive(Clone, Copy)]
enum RunKind {
    Analyze,
    Suggest,
}

fn spawn_run(
    orchestrator: core_api::Orchestrator,
    kind: RunKind,
    request: core_api::AnalyzeRequest,
    run: u64,
    done_tx: mpsc::UnboundedSender<Completion>,
) {
    tokio::spawn(async move {
        let finished = match kind {
            RunKind::Analyze => Finished::Analyzed(orchestrator.submit(&request).await),
            RunKind::Suggest => Finished::Suggested(orchestrator.suggest(&request).await),
        };
        let completion = Completion {
            run,
            finished_at: Local::now(),
            finished,
        };
        if done_tx.send(completion).is_err() {
            tracing::debug!(target: "taskrank.session", run = run, "session closed before run finished");
        }
    });
}

fn report(out: &mut impl Write, done: Completion, styled: bool) -> Result<(), core_api::CliError> {
    writeln!(out)?;
    writeln!(
        out,
        "[#{} finished {}]",
        done.run,
        done.finished_at.format("%H:%M:%S")
    )?;
    match done.finished {
        Finished::Analyzed(Ok(core_api::ServiceOutcome::Success(results))) => {
            output::write_results(out, &results, OutputFormat::Text, styled)
        }
        Finished::Suggested(Ok(core_api::ServiceOutcome::Success(items))) => {
            output::write_suggestions(out, &items, OutputFormat::Text)
        }
        Finished::Analyzed(Ok(core_api::ServiceOutcome::Failed(failure)))
        | Finished::Suggested(Ok(core_api::ServiceOutcome::Failed(failure))) => {
            output::write_failure(out, &failure, OutputFormat::Text, styled)
        }
        Finished::Analyzed(Err(e)) | Finished::Suggested(Err(e)) => {
            Ok(output::write_error(out, &e.to_string(), styled)?)
        }
    }
}

/// Interactive session on the process terminal.
pub async fn run_session(ctx: &core_api::AppContext) -> Result<i32, core_api::CliError> {
    let services = ctx.build_services().await?;
    drive_session(
        services.orchestrator(),
        &ctx.cfg().session,
        BufReader::new(tokio::io::stdin()),
        &mut std::io::stdout(),
        output::stdout_styled(),
    )
    .await
}

/// Reads commands from `input` until `quit` or end of input. Analyze and
/// suggest run as spawned tasks; their output is written as each completes,
/// in completion order.
pub async fn drive_session<R, W>(
    orchestrator: core_api::Orchestrator,
    cfg: &core_api::SessionConfig,
    input: R,
    out: &mut W,
    styled: bool,
) -> Result<i32, core_api::CliError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut session = Session::new(cfg);

    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<Completion>();
    let mut lines = input.lines();
    let mut paste: Option<Vec<String>> = None;
    let mut in_flight = 0usize;
    let mut next_run = 1u64;

    tracing::debug!(target: "taskrank.session", stage = "session.start");
    writeln!(out, "taskrank session. Type help for commands.")?;
    output::write_prompt(out)?;

    loop {
        tokio::select! {
            Some(done) = done_rx.recv() => {
                in_flight = in_flight.saturating_sub(1);
                report(out, done, styled)?;
                output::write_prompt(out)?;
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };

                if let Some(buf) = paste.as_mut() {
                    if line.trim() == "." {
                        let text = buf.join("\n");
                        session.set_input(text);
                        paste = None;
                        writeln!(out, "Input replaced.")?;
                        output::write_prompt(out)?;
                    } else {
                        buf.push(line);
                    }
                    continue;
                }

                let cmd = match SessionCommand::parse(&line) {
                    Ok(cmd) => cmd,
                    Err(e) => {
                        output::write_error(out, &e, styled)?;
                        output::write_prompt(out)?;
                        continue;
                    }
                };

                let (kind, request) = match session.handle(cmd) {
                    Reply::Status(msg) | Reply::Text(msg) => {
                        writeln!(out, "{msg}")?;
                        output::write_prompt(out)?;
                        continue;
                    }
                    Reply::Error(msg) => {
                        output::write_error(out, &msg, styled)?;
                        output::write_prompt(out)?;
                        continue;
                    }
                    Reply::Nothing => {
                        output::write_prompt(out)?;
                        continue;
                    }
                    Reply::BeginPaste => {
                        writeln!(out, "Paste JSON tasks; end with a line containing only '.'")?;
                        paste = Some(Vec::new());
                        continue;
                    }
                    Reply::Quit => {
                        if in_flight > 0 {
                            tracing::debug!(target: "taskrank.session", in_flight = in_flight, "quit with runs in flight");
                        }
                        return Ok(0);
                    }
                    Reply::Analyze(request) => (RunKind::Analyze, request),
                    Reply::Suggest(request) => (RunKind::Suggest, request),
                };

                writeln!(out, "Processing... (#{next_run})")?;
                spawn_run(orchestrator.clone(), kind, request, next_run, done_tx.clone());
                next_run += 1;
                in_flight += 1;
                output::write_prompt(out)?;
            }
        }
    }

    // End of input: let runs started from a piped script finish.
    while in_flight > 0 {
        let Some(done) = done_rx.recv().await else {
            break;
        };
        in_flight -= 1;
        report(out, done, styled)?;
    }
    tracing::debug!(target: "taskrank.session", stage = "session.end");
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// Echoes each request's first title back with score 50. The first call
    /// is held back so later runs overtake it.
    #[derive(Default)]
    struct SlowFirst {
        calls: AtomicUsize,
        sent: Mutex<Vec<serde_json::Value>>,
    }

    #[async_trait]
    impl core_api::AnalyzeTransport for SlowFirst {
        fn name(&self) -> &str {
            "slow-first"
        }

        async fn post(
            &self,
            _endpoint: core_api::Endpoint,
            request: &core_api::AnalyzeRequest,
        ) -> Result<core_api::RawResponse, core_api::TransportError> {
            let tasks = serde_json::to_value(&request.tasks).unwrap();
            self.sent.lock().unwrap().push(tasks.clone());
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                tokio::time::sleep(Duration::from_millis(150)).await;
            }
            let body = json!([{"title": tasks[0]["title"], "score": 50}]);
            Ok(core_api::RawResponse::new(200, body.to_string()))
        }
    }

    async fn drive(script: &str) -> (String, Arc<SlowFirst>) {
        let transport = Arc::new(SlowFirst::default());
        let orchestrator = core_api::Orchestrator::new(transport.clone());
        let mut out = Vec::new();
        let code = drive_session(
            orchestrator,
            &core_api::SessionConfig::default(),
            script.as_bytes(),
            &mut out,
            false,
        )
        .await
        .unwrap();
        assert_eq!(code, 0);
        (String::from_utf8(out).unwrap(), transport)
    }

    fn position(haystack: &str, needle: &str) -> usize {
        haystack
            .find(needle)
            .unwrap_or_else(|| panic!("{needle:?} missing from:\n{haystack}"))
    }

    #[tokio::test]
    async fn runs_print_in_completion_order_and_drain_at_end_of_input() {
        let (out, transport) =
            drive("set title Slow\nanalyze\nset title Fast\nanalyze\n").await;

        assert!(out.contains("Processing... (#1)"));
        assert!(out.contains("Processing... (#2)"));
        assert!(position(&out, "[#2 finished") < position(&out, "[#1 finished"));
        assert!(position(&out, "Fast  [50 Low]") < position(&out, "Slow  [50 Low]"));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn paste_ends_on_dot_and_replaces_input() {
        let (out, transport) =
            drive("paste\n{\"tasks\": [\n  {\"id\": 3, \"title\": \"Pasted\"}\n]}\n.\nanalyze\n").await;

        assert!(out.contains("Input replaced."));
        assert!(out.contains("Pasted  [50 Low]"));
        assert_eq!(
            transport.sent.lock().unwrap()[0],
            json!([{"id": 3, "title": "Pasted"}])
        );
    }

    #[tokio::test]
    async fn quit_does_not_wait_for_runs_in_flight() {
        let (out, transport) = drive("set title A\nanalyze\nquit\nanalyze\n").await;

        assert!(out.contains("Processing... (#1)"));
        assert!(!out.contains("[#1 finished"));
        assert!(!out.contains("Processing... (#2)"));
        assert!(transport.calls.load(Ordering::SeqCst) <= 1);
    }

    #[tokio::test]
    async fn usage_errors_are_reported_without_a_request() {
        let (out, transport) = drive("analyze\nfrobnicate\n").await;

        assert!(out.contains(
            "Please paste a JSON array of tasks in the input or add tasks to the list."
        ));
        assert!(out.contains("unknown command 'frobnicate'"));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }
}
