use std::path::{Path, PathBuf};

use super::types::AppConfig;

/// Get the default taskrank data directory: ~/.taskrank
pub fn get_taskrank_data_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(PathBuf::from(home).join(".taskrank"))
}

pub fn load_from_path(path: &Path) -> anyhow::Result<AppConfig> {
    let s = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    let cfg = toml::from_str::<AppConfig>(&s)
        .map_err(|e| anyhow::anyhow!("failed to parse {}: {e}", path.display()))?;
    Ok(cfg)
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    // Priority 1: ~/.taskrank/config.toml
    let data_dir = get_taskrank_data_dir()?;
    let home_config = data_dir.join("config.toml");

    // Priority 2: ./config.toml (current directory)
    let local_config = Path::new("config.toml");

    let mut cfg = if home_config.exists() {
        load_from_path(&home_config)?
    } else if local_config.exists() {
        load_from_path(local_config)?
    } else {
        AppConfig::default()
    };

    // Environment variable overrides (Priority 0: highest)
    apply_env_overrides(&mut cfg, |key| std::env::var(key).ok());

    Ok(cfg)
}

/// Applies `TASKRANK_*` overrides; `lookup` is the environment.
pub fn apply_env_overrides(cfg: &mut AppConfig, lookup: impl Fn(&str) -> Option<String>) {
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = get("TASKRANK_SERVICE_URL") {
        cfg.service.base_url = v;
    }
    if let Some(v) = get("TASKRANK_STRATEGY") {
        cfg.session.default_strategy = v;
    }
    if let Some(v) = get("TASKRANK_TIMEOUT_MS") {
        match v.trim().parse::<u64>() {
            Ok(ms) => cfg.service.timeout_ms = ms,
            Err(e) => tracing::warn!(
                target: "taskrank.config",
                value = %v,
                error = %e,
                "ignoring TASKRANK_TIMEOUT_MS"
            ),
        }
    }
}
