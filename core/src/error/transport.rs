use std::{error::Error as StdError, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    Timeout,
    Connect,
    Request,
    Body,
    Decode,
    Unknown,
}

impl TransportErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Connect => "connect",
            Self::Request => "request",
            Self::Body => "body",
            Self::Decode => "decode",
            Self::Unknown => "unknown",
        }
    }
}

impl TransportErrorKind {
    /// What went wrong, phrased for someone at the prompt.
    pub fn summary(self) -> &'static str {
        match self {
            Self::Timeout => "the prioritization service did not answer in time",
            Self::Connect => "cannot reach the prioritization service",
            Self::Request => "the analyze request could not be sent",
            Self::Body => "the service reply was cut off",
            Self::Decode => "the service reply is not a task list",
            Self::Unknown => "the call to the prioritization service failed",
        }
    }
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The request could not be completed or its answer could not be read.
///
/// HTTP error statuses are *not* transport errors: those bodies are handed
/// back to the caller for classification.
#[derive(Debug)]
pub struct TransportError {
    kind: TransportErrorKind,
    status: Option<u16>,
    url: Option<String>,
    message: String,
    source: Option<anyhow::Error>,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: None,
            url: None,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// A success response whose body is not the JSON we expected.
    pub fn decode(status: u16, err: serde_json::Error, preview: &str) -> Self {
        Self::new(
            TransportErrorKind::Decode,
            format!("{err}; reply began with {preview:?}"),
        )
        .with_status(status)
        .with_source(err)
    }

    pub fn kind(&self) -> TransportErrorKind {
        self.kind
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind.summary())?;
        if let Some(url) = &self.url {
            write!(f, " at {url}")?;
        }
        if let Some(status) = self.status {
            write!(f, " (HTTP {status})")?;
        }
        write!(f, ": {}", self.message)
    }
}

impl StdError for TransportError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|err| &**err as &(dyn StdError + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_reads_as_one_sentence() {
        let err = TransportError::new(TransportErrorKind::Connect, "connection refused")
            .with_url("http://127.0.0.1:8000/api/tasks/analyze/");
        assert_eq!(
            err.to_string(),
            "cannot reach the prioritization service at \
             http://127.0.0.1:8000/api/tasks/analyze/: connection refused"
        );
    }

    #[test]
    fn display_adds_status_when_known() {
        let err = TransportError::new(TransportErrorKind::Body, "unexpected EOF").with_status(200);
        assert_eq!(
            err.to_string(),
            "the service reply was cut off (HTTP 200): unexpected EOF"
        );
    }

    #[test]
    fn decode_error_keeps_source() {
        let parse_err = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err = TransportError::decode(200, parse_err, "<html>");
        assert_eq!(err.kind(), TransportErrorKind::Decode);
        assert_eq!(err.status(), Some(200));
        assert!(err.message().ends_with(r#"reply began with "<html>""#));
        assert!(StdError::source(&err).is_some());
    }
}
