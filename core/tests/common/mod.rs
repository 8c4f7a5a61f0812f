use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use taskrank_core::api::{
    AnalyzeRequest, AnalyzeTransport, Endpoint, RawResponse, TransportError, TransportErrorKind,
};

enum Reply {
    Response(RawResponse),
    Fail(TransportErrorKind),
}

/// Transport that answers every request the same way and keeps what was
/// sent.
pub struct CannedTransport {
    reply: Reply,
    calls: AtomicUsize,
    sent: Mutex<Vec<(Endpoint, serde_json::Value)>>,
}

impl CannedTransport {
    pub fn replying(status: u16, body: &str) -> Self {
        Self::with(Reply::Response(RawResponse::new(status, body)))
    }

    pub fn failing(kind: TransportErrorKind) -> Self {
        Self::with(Reply::Fail(kind))
    }

    fn with(reply: Reply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_sent(&self) -> Option<(Endpoint, serde_json::Value)> {
        self.sent.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl AnalyzeTransport for CannedTransport {
    fn name(&self) -> &str {
        "canned"
    }

    async fn post(
        &self,
        endpoint: Endpoint,
        request: &AnalyzeRequest,
    ) -> Result<RawResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.sent
            .lock()
            .unwrap()
            .push((endpoint, serde_json::to_value(request).unwrap()));
        match &self.reply {
            Reply::Response(r) => Ok(r.clone()),
            Reply::Fail(kind) => Err(TransportError::new(*kind, "canned failure")
                .with_url("http://canned.invalid/api/tasks/analyze/")),
        }
    }
}
