//! Config assembly: file, then environment, then command-line flags.
use taskrank_core::api as core_api;
use taskrank_core::config::apply_env_overrides;

use crate::commands::cli::Args;

pub fn resolve_config(args: &Args) -> anyhow::Result<core_api::AppConfig> {
    let cfg = match &args.config {
        Some(path) => {
            let mut cfg = core_api::load_from_path(path)?;
            apply_env_overrides(&mut cfg, |key| std::env::var(key).ok());
            cfg
        }
        None => core_api::load_default()?,
    };
    Ok(apply_flag_overrides(cfg, args))
}

pub fn apply_flag_overrides(mut cfg: core_api::AppConfig, args: &Args) -> core_api::AppConfig {
    if let Some(url) = args.service_url.as_ref().filter(|s| !s.trim().is_empty()) {
        cfg.service.base_url = url.clone();
    }
    if let Some(strategy) = &args.strategy {
        cfg.session.default_strategy = strategy.clone();
    }
    if args.use_service_weights {
        cfg.session.use_service_weights = true;
    }
    if let Some(ms) = args.timeout_ms {
        cfg.service.timeout_ms = ms;
    }
    cfg
}
