use async_trait::async_trait;
use taskrank_core::api as core_api;
use taskrank_core::util::preview_body;

fn transport_error(err: reqwest::Error, url: &str) -> core_api::TransportError {
    let kind = if err.is_timeout() {
        core_api::TransportErrorKind::Timeout
    } else if err.is_connect() {
        core_api::TransportErrorKind::Connect
    } else if err.is_request() {
        core_api::TransportErrorKind::Request
    } else if err.is_body() {
        core_api::TransportErrorKind::Body
    } else if err.is_decode() {
        core_api::TransportErrorKind::Decode
    } else {
        core_api::TransportErrorKind::Unknown
    };
    let mut out = core_api::TransportError::new(kind, err.to_string()).with_url(url);
    if let Some(status) = err.status() {
        out = out.with_status(status.as_u16());
    }
    out.with_source(err)
}

#[derive(Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    // Pre-built URL endpoints (avoid repeated format! and trim)
    url_analyze: String,
    url_suggest: String,
}

impl HttpTransport {
    pub fn new(
        base_url: &str,
        analyze_path: &str,
        suggest_path: &str,
        timeout_ms: u64,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(timeout_ms))
            .build()?;
        let normalized = base_url.trim_end_matches('/');
        Ok(Self {
            http,
            url_analyze: join_url(normalized, analyze_path),
            url_suggest: join_url(normalized, suggest_path),
        })
    }

    pub fn from_config(cfg: &core_api::ServiceConfig) -> anyhow::Result<Self> {
        Self::new(
            &cfg.base_url,
            &cfg.analyze_path,
            &cfg.suggest_path,
            cfg.timeout_ms,
        )
    }

    pub fn url_for(&self, endpoint: core_api::Endpoint) -> &str {
        match endpoint {
            core_api::Endpoint::Analyze => &self.url_analyze,
            core_api::Endpoint::Suggest => &self.url_suggest,
        }
    }
}

fn join_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    format!("{}/{}", base, path.trim_start_matches('/'))
}

#[async_trait]
impl core_api::AnalyzeTransport for HttpTransport {
    fn name(&self) -> &str {
        "http"
    }

    async fn post(
        &self,
        endpoint: core_api::Endpoint,
        request: &core_api::AnalyzeRequest,
    ) -> Result<core_api::RawResponse, core_api::TransportError> {
        let url = self.url_for(endpoint);
        tracing::debug!(
            target: "taskrank.http",
            stage = "http.post.in",
            endpoint = %endpoint,
            url = %url,
            tasks = request.tasks.len()
        );
        let resp = self
            .http
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|err| transport_error(err, url))?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|err| transport_error(err, url))?;
        tracing::debug!(
            target: "taskrank.http",
            stage = "http.post.out",
            endpoint = %endpoint,
            status = %status,
            body = %preview_body(&body)
        );
        Ok(core_api::RawResponse::new(status.as_u16(), body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_api::AnalyzeTransport;
    use mockito::{Matcher, Server};
    use pretty_assertions::assert_eq;

    fn request(strategy: core_api::Strategy) -> core_api::AnalyzeRequest {
        core_api::AnalyzeRequest::new(
            vec![core_api::TaskRecord::titled("Write report").into()],
            strategy,
            core_api::WeightsMode::Preset,
        )
    }

    #[test]
    fn urls_are_joined_once() {
        let t = HttpTransport::new(
            "http://127.0.0.1:8000/",
            "/api/tasks/analyze/",
            "api/tasks/suggest/",
            1_000,
        )
        .unwrap();
        assert_eq!(
            t.url_for(core_api::Endpoint::Analyze),
            "http://127.0.0.1:8000/api/tasks/analyze/"
        );
        assert_eq!(
            t.url_for(core_api::Endpoint::Suggest),
            "http://127.0.0.1:8000/api/tasks/suggest/"
        );
    }

    #[test]
    fn absolute_path_overrides_base() {
        let t = HttpTransport::new(
            "http://127.0.0.1:8000",
            "https://scores.example.com/analyze",
            "/s/",
            1_000,
        )
        .unwrap();
        assert_eq!(
            t.url_for(core_api::Endpoint::Analyze),
            "https://scores.example.com/analyze"
        );
    }

    #[tokio::test]
    async fn posts_payload_and_returns_body() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/api/tasks/analyze/")
            .match_header("content-type", "application/json")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "tasks": [{"title": "Write report", "importance": 1}],
                "options": {"weights": {"importance_mul": 4, "urgency_due_7": 40}}
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"title":"Write report","score":72,"explanation":"due soon"}]"#)
            .create_async()
            .await;

        let t = HttpTransport::new(&server.url(), "/api/tasks/analyze/", "/api/tasks/suggest/", 1_000)
            .unwrap();
        let resp = t
            .post(core_api::Endpoint::Analyze, &request(core_api::Strategy::Deadline))
            .await
            .unwrap();
        m.assert_async().await;
        assert!(resp.is_success());
        assert!(resp.body.contains("\"score\":72"));
    }

    #[tokio::test]
    async fn error_status_is_returned_not_raised() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/api/tasks/analyze/")
            .with_status(400)
            .with_body(r#"{"errors":[{"index":0,"field":"due_date","problem":"invalid format"}]}"#)
            .create_async()
            .await;

        let t = HttpTransport::new(&server.url(), "/api/tasks/analyze/", "/api/tasks/suggest/", 1_000)
            .unwrap();
        let resp = t
            .post(core_api::Endpoint::Analyze, &request(core_api::Strategy::Smart))
            .await
            .unwrap();
        assert_eq!(resp.status, 400);
        assert!(!resp.is_success());
        assert!(resp.body.contains("due_date"));
    }

    #[tokio::test]
    async fn suggest_hits_suggest_path() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/api/tasks/suggest/")
            .with_status(200)
            .with_body(r#"{"suggestions":[]}"#)
            .create_async()
            .await;

        let t = HttpTransport::new(&server.url(), "/api/tasks/analyze/", "/api/tasks/suggest/", 1_000)
            .unwrap();
        let resp = t
            .post(core_api::Endpoint::Suggest, &request(core_api::Strategy::Smart))
            .await
            .unwrap();
        m.assert_async().await;
        assert_eq!(resp.body, r#"{"suggestions":[]}"#);
    }

    #[tokio::test]
    async fn unreachable_host_is_transport_error() {
        // Port 9 (discard) on localhost is closed on test machines.
        let t = HttpTransport::new("http://127.0.0.1:9", "/a/", "/s/", 1_000).unwrap();
        let err = t
            .post(core_api::Endpoint::Analyze, &request(core_api::Strategy::Smart))
            .await
            .unwrap_err();
        assert!(matches!(
            err.kind(),
            core_api::TransportErrorKind::Connect | core_api::TransportErrorKind::Timeout
        ));
        assert_eq!(err.url(), Some("http://127.0.0.1:9/a/"));
    }
}
