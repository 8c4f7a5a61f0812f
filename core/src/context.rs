use crate::analyze::Orchestrator;
use crate::config::AppConfig;
use crate::error::CliError;
use crate::transport::AnalyzeTransport;
use std::sync::Arc;

#[derive(Clone)]
pub struct Services {
    pub transport: Arc<dyn AnalyzeTransport>,
}

impl Services {
    pub fn orchestrator(&self) -> Orchestrator {
        Orchestrator::new(self.transport.clone())
    }
}

#[async_trait::async_trait]
pub trait ServicesFactory: Send + Sync {
    async fn build_services(&self, cfg: &AppConfig) -> Result<Services, CliError>;
}

#[derive(Clone)]
pub struct AppContext {
    cfg: AppConfig,
    services_factory: Option<Arc<dyn ServicesFactory>>,
}

impl AppContext {
    pub fn new(cfg: AppConfig, services_factory: Option<Arc<dyn ServicesFactory>>) -> Self {
        Self {
            cfg,
            services_factory,
        }
    }

    pub fn cfg(&self) -> &AppConfig {
        &self.cfg
    }

    pub async fn build_services(&self) -> Result<Services, CliError> {
        let Some(factory) = self.services_factory.as_ref() else {
            return Err(CliError::Config(
                "services_factory missing (cannot build transport)".into(),
            ));
        };
        factory.build_services(&self.cfg).await
    }
}
