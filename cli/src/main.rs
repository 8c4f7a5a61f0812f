use std::sync::Arc;

use clap::Parser;
use taskrank_cli::commands::{analyze, cli, weights};
use taskrank_cli::{app, session};
use taskrank_core::api as core_api;
use taskrank_core::error;
use taskrank_plugins::services::PluginServicesFactory;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static LOG_GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
    std::sync::OnceLock::new();

#[tokio::main]
async fn main() {
    let exit = match real_main().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            exit_code_for_error(&e)
        }
    };

    std::process::exit(exit);
}

async fn real_main() -> Result<i32, error::CliError> {
    let mut args = cli::Args::parse();
    let cfg = app::resolve_config(&args).map_err(|e| error::CliError::Config(e.to_string()))?;
    init_tracing(&cfg.logging).map_err(error::CliError::Config)?;

    tracing::debug!(
        target: "taskrank.cli",
        service = %cfg.service.base_url,
        strategy = %cfg.session.default_strategy,
        "config resolved"
    );

    let ctx = core_api::AppContext::new(cfg, Some(Arc::new(PluginServicesFactory)));

    match args.command.take() {
        Some(cmd) => dispatch(cmd, ctx).await,
        None => session::run_session(&ctx).await,
    }
}

fn exit_code_for_error(e: &error::CliError) -> i32 {
    // 0: success
    // 11: config error
    // 12: usage error (nothing sent)
    // 20: transport / IO error
    // 30: service rejected the request (returned as a normal exit code, not as an error)
    // 50: internal/uncategorized
    match e {
        error::CliError::Config(_) => 11,
        error::CliError::Analyze(ae) => match ae {
            error::AnalyzeError::Usage(_) => 12,
            error::AnalyzeError::Transport(_) => 20,
        },
        error::CliError::Io(_) => 20,
        error::CliError::Command(_) => 20,
        error::CliError::Anyhow(_) => 50,
    }
}

async fn dispatch(cmd: cli::Commands, ctx: core_api::AppContext) -> Result<i32, error::CliError> {
    match cmd {
        cli::Commands::Analyze(a) => analyze::handle_analyze(a, &ctx).await,
        cli::Commands::Suggest(a) => analyze::handle_suggest(a, &ctx).await,
        cli::Commands::Weights(w) => weights::handle_weights(w),
        cli::Commands::Session => session::run_session(&ctx).await,
    }
}

fn init_tracing(logging: &core_api::LoggingConfig) -> Result<(), String> {
    if !logging.enabled {
        return Ok(());
    }

    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ => EnvFilter::try_new(&logging.level)
            .map_err(|e| format!("invalid [logging] level {:?}: {e}", logging.level))?,
    };

    let mut maybe_writer = None;

    if logging.file {
        let dir = logging.log_dir();
        std::fs::create_dir_all(&dir)
            .map_err(|e| format!("cannot create log directory {}: {e}", dir.display()))?;
        let file_name = format!("taskrank.{}.log", std::process::id());
        let appender = tracing_appender::rolling::never(dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        let _ = LOG_GUARD.set(guard);
        maybe_writer = Some(non_blocking);
    }

    if !logging.console && maybe_writer.is_none() {
        return Err(
            "[logging] is enabled but both console and file are off; set enabled = false instead"
                .to_string(),
        );
    }

    let console_layer = logging.console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(atty::is(atty::Stream::Stderr))
    });

    let file_layer = maybe_writer.map(|w| {
        tracing_subscriber::fmt::layer()
            .with_writer(w)
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(())
}
