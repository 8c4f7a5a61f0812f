use std::sync::Arc;

use anyhow::Result;

use taskrank_core::api::{AnalyzeTransport, AppConfig};

use crate::transport::HttpTransport;

pub fn build_transport(cfg: &AppConfig) -> Result<Arc<dyn AnalyzeTransport>> {
    let transport = HttpTransport::from_config(&cfg.service)?;
    tracing::debug!(
        target: "taskrank.plugins",
        base_url = %cfg.service.base_url,
        timeout_ms = cfg.service.timeout_ms,
        "http transport ready"
    );
    Ok(Arc::new(transport))
}
