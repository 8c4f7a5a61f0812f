//! ServicesFactory implementation: builds the transport from config for the CLI.
use async_trait::async_trait;
use taskrank_core::api::{AppConfig, CliError, Services, ServicesFactory};

use crate::factory;

#[derive(Default)]
pub struct PluginServicesFactory;

#[async_trait]
impl ServicesFactory for PluginServicesFactory {
    async fn build_services(&self, cfg: &AppConfig) -> Result<Services, CliError> {
        let transport = factory::build_transport(cfg)
            .map_err(|e| CliError::Config(format!("build transport: {e}")))?;
        Ok(Services { transport })
    }
}
