//! HTTP client for the supervisor's REST API.
//!
//! The wire surface is small:
//!
//! - `GET  {base}/components` -- JSON array of `{name, status}`
//! - `POST {base}/components/{name}/start` -- empty body on success
//! - `POST {base}/components/{name}/stop`  -- empty body on success
//! - `GET  {base}/components/{name}/log?level={level}` -- JSON array of strings
//! - `GET  {base}/log?level={level}` -- same, for the global log
//!
//! URL construction and response parsing are factored into pure helpers so
//! they can be unit-tested without a server.

use reqwest::Response;
use tracing::debug;
use url::Url;

use launchmon_core::prelude::*;
use launchmon_core::{Component, LogFilter, LogSnapshot};

/// Typed client for the supervisor's REST endpoints.
///
/// Cheap to clone; the inner `reqwest::Client` shares its connection pool
/// across clones.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client for the supervisor at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `base_url` cannot serve as a base for
    /// endpoint paths (e.g. a `mailto:` URL).
    pub fn new(base_url: Url) -> Result<Self> {
        if base_url.cannot_be_a_base() {
            return Err(Error::config(format!(
                "base URL cannot carry endpoint paths: {base_url}"
            )));
        }
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
        })
    }

    /// List the components managed by the supervisor.
    ///
    /// # Errors
    ///
    /// [`Error::Network`] on transport failure, [`Error::HttpStatus`] on a
    /// non-2xx response, [`Error::Decode`] if the body is not a JSON array
    /// of components.
    pub async fn list_components(&self) -> Result<Vec<Component>> {
        let url = endpoint(&self.base_url, &["components"])?;
        let resp = check_status(self.http.get(url).send().await)?;
        resp.json::<Vec<Component>>()
            .await
            .map_err(|e| Error::decode(e.to_string()))
    }

    /// Ask the supervisor to start a component.
    ///
    /// Idempotent from the caller's perspective: starting an
    /// already-running component is the server's call, not an error at this
    /// layer.
    pub async fn start(&self, name: &str) -> Result<()> {
        self.control(name, "start").await
    }

    /// Ask the supervisor to stop a component.
    pub async fn stop(&self, name: &str) -> Result<()> {
        self.control(name, "stop").await
    }

    async fn control(&self, name: &str, action: &str) -> Result<()> {
        let url = endpoint(&self.base_url, &["components", name, action])?;
        debug!("POST {url}");
        check_status(self.http.post(url).send().await)?;
        Ok(())
    }

    /// Fetch one page of log lines for `filter`.
    ///
    /// The `level` query parameter is always present (`Any` when the filter
    /// is unset); the per-component endpoint is used only when the filter
    /// names a component. A response body that is not a well-formed JSON
    /// array of strings normalizes to an empty snapshot -- transient
    /// malformed responses are not fatal.
    ///
    /// Lines are returned raw; sanitizing is the polling engine's job.
    ///
    /// # Errors
    ///
    /// [`Error::Network`] on transport failure, [`Error::HttpStatus`] on a
    /// non-2xx response, [`Error::Decode`] if the 2xx body cannot be read.
    pub async fn fetch_log(&self, filter: &LogFilter) -> Result<LogSnapshot> {
        let url = log_url(&self.base_url, filter)?;
        debug!("GET {url}");
        let resp = check_status(self.http.get(url).send().await)?;
        let body = resp
            .text()
            .await
            .map_err(|e| Error::decode(e.to_string()))?;
        Ok(parse_log_body(&body))
    }
}

/// Map a transport result into our error taxonomy and reject non-2xx
/// statuses.
fn check_status(result: reqwest::Result<Response>) -> Result<Response> {
    let resp = result.map_err(|e| Error::network(e.to_string()))?;
    let status = resp.status();
    if !status.is_success() {
        return Err(Error::http_status(status.as_u16()));
    }
    Ok(resp)
}

/// Build an endpoint URL from `base` plus path segments.
fn endpoint(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| Error::config(format!("base URL cannot carry endpoint paths: {base}")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Build the log endpoint URL for a filter.
///
/// `GET {base}/components/{name}/log?level={level}` when the filter names a
/// component, `GET {base}/log?level={level}` otherwise.
fn log_url(base: &Url, filter: &LogFilter) -> Result<Url> {
    let mut url = match &filter.component {
        Some(name) => endpoint(base, &["components", name, "log"])?,
        None => endpoint(base, &["log"])?,
    };
    url.query_pairs_mut()
        .append_pair("level", filter.level.as_str());
    Ok(url)
}

/// Parse a log response body into a snapshot.
///
/// Anything that is not a JSON array is treated as an empty snapshot;
/// non-string entries within an array are skipped. The supervisor sometimes
/// answers with an empty body while a component is restarting, and that
/// must not kill the polling loop.
fn parse_log_body(body: &str) -> LogSnapshot {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Array(items)) => items
            .into_iter()
            .filter_map(|v| match v {
                serde_json::Value::String(line) => Some(line),
                _ => None,
            })
            .collect(),
        Ok(other) => {
            debug!("log body was not an array (got {other}), normalizing to empty");
            Vec::new()
        }
        Err(_) => {
            debug!("log body was not well-formed JSON, normalizing to empty");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use launchmon_core::LogLevel;

    fn base() -> Url {
        Url::parse("http://localhost:8080/api").unwrap()
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let url = endpoint(&base(), &["components", "web", "start"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/components/web/start"
        );
    }

    #[test]
    fn test_endpoint_with_trailing_slash_base() {
        let base = Url::parse("http://localhost:8080/api/").unwrap();
        let url = endpoint(&base, &["components"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/components");
    }

    #[test]
    fn test_log_url_global_defaults_to_any() {
        let url = log_url(&base(), &LogFilter::default()).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/log?level=Any");
    }

    #[test]
    fn test_log_url_per_component_with_level() {
        let filter = LogFilter::component("web", LogLevel::Error);
        let url = log_url(&base(), &filter).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/components/web/log?level=Error"
        );
    }

    #[test]
    fn test_new_rejects_cannot_be_a_base_url() {
        let err = ApiClient::new(Url::parse("mailto:ops@example.com").unwrap()).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_parse_log_body_array_of_strings() {
        let lines = parse_log_body(r#"["one", "two"]"#);
        assert_eq!(lines, vec!["one".to_string(), "two".to_string()]);
    }

    #[test]
    fn test_parse_log_body_empty_body_normalizes() {
        assert!(parse_log_body("").is_empty());
    }

    #[test]
    fn test_parse_log_body_non_array_normalizes() {
        assert!(parse_log_body(r#"{"error": "not ready"}"#).is_empty());
        assert!(parse_log_body("null").is_empty());
    }

    #[test]
    fn test_parse_log_body_skips_non_string_entries() {
        let lines = parse_log_body(r#"["ok", 42, null, "also ok"]"#);
        assert_eq!(lines, vec!["ok".to_string(), "also ok".to_string()]);
    }
}
