use tokio::io::AsyncReadExt;

use taskrank_core::api as core_api;

use crate::commands::cli::{AnalyzeArgs, InputArgs};
use crate::output;

/// Builds the invocation input from flags. JSON sources fill the freeform
/// slot; the form flags are only consulted when it stays empty.
pub async fn input_from_args(
    args: &InputArgs,
    cfg: &core_api::AppConfig,
) -> Result<core_api::AnalyzeInput, core_api::CliError> {
    let freeform = if let Some(raw) = &args.input {
        raw.clone()
    } else if let Some(path) = &args.input_file {
        tokio::fs::read_to_string(path).await?
    } else if args.stdin {
        let mut buf = String::new();
        tokio::io::stdin().read_to_string(&mut buf).await?;
        buf
    } else {
        String::new()
    };

    let mut form = core_api::TaskForm::default();
    let fields = [
        (core_api::FormField::Title, &args.title),
        (core_api::FormField::DueDate, &args.due_date),
        (core_api::FormField::EstimatedHours, &args.hours),
        (core_api::FormField::Importance, &args.importance),
        (core_api::FormField::Dependencies, &args.deps),
    ];
    for (field, value) in fields {
        if let Some(v) = value {
            form.set(field, v.as_str());
        }
    }

    Ok(core_api::AnalyzeInput {
        freeform,
        form,
        strategy: cfg.session.default_strategy.clone(),
        weights_mode: cfg.session.weights_mode(),
    })
}

async fn prepare(
    args: &AnalyzeArgs,
    ctx: &core_api::AppContext,
) -> Result<(core_api::AnalyzeRequest, core_api::Orchestrator), core_api::CliError> {
    let input = input_from_args(&args.input, ctx.cfg()).await?;
    let request = core_api::Orchestrator::build_request(&input, &core_api::TaskListStore::new())
        .map_err(core_api::AnalyzeError::from)?;
    let services = ctx.build_services().await?;
    Ok((request, services.orchestrator()))
}

pub async fn handle_analyze(
    args: AnalyzeArgs,
    ctx: &core_api::AppContext,
) -> Result<i32, core_api::CliError> {
    let (request, orchestrator) = prepare(&args, ctx).await?;

    let spinner = output::spinner("Processing...");
    let outcome = orchestrator.submit(&request).await;
    spinner.finish_and_clear();

    match outcome? {
        core_api::ServiceOutcome::Success(results) => {
            output::write_results(
                &mut std::io::stdout().lock(),
                &results,
                args.format,
                output::stdout_styled(),
            )?;
            Ok(0)
        }
        core_api::ServiceOutcome::Failed(failure) => {
            output::print_failure(&failure, args.format)?;
            Ok(30)
        }
    }
}

pub async fn handle_suggest(
    args: AnalyzeArgs,
    ctx: &core_api::AppContext,
) -> Result<i32, core_api::CliError> {
    let (request, orchestrator) = prepare(&args, ctx).await?;

    let spinner = output::spinner("Processing...");
    let outcome = orchestrator.suggest(&request).await;
    spinner.finish_and_clear();

    match outcome? {
        core_api::ServiceOutcome::Success(items) => {
            output::write_suggestions(&mut std::io::stdout().lock(), &items, args.format)?;
            Ok(0)
        }
        core_api::ServiceOutcome::Failed(failure) => {
            output::print_failure(&failure, args.format)?;
            Ok(30)
        }
    }
}
