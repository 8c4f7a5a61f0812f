//! Port for the remote prioritization service.

use std::fmt;

use async_trait::async_trait;

use crate::analyze::AnalyzeRequest;
use crate::error::TransportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Analyze,
    Suggest,
}

impl Endpoint {
    pub fn as_str(self) -> &'static str {
        match self {
            Endpoint::Analyze => "analyze",
            Endpoint::Suggest => "suggest",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status and body of a completed HTTP exchange, success or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request and returns whatever came back. Error statuses are
/// returned as `Ok`; only failures to complete the exchange are `Err`.
#[async_trait]
pub trait AnalyzeTransport: Send + Sync {
    fn name(&self) -> &str;
    async fn post(
        &self,
        endpoint: Endpoint,
        request: &AnalyzeRequest,
    ) -> Result<RawResponse, TransportError>;
}
