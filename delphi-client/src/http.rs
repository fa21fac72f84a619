//! Reqwest-backed transport.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::errors::Error;
use crate::transport::{HttpTransport, Method, TransportResponse};

/// `HttpTransport` implementation backed by a shared `reqwest` client.
///
/// One instance holds one connection pool; clone the client that owns it
/// rather than building a second transport for the same host.
pub struct ReqwestTransport {
    base_url: String,
    api_key: Option<String>,
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport for the service at `host`.
    ///
    /// # Arguments
    ///
    /// * `host` - Base url of the service, e.g. `http://localhost:7700`.
    /// * `api_key` - Key sent as a bearer credential on every request.
    pub fn new(host: &str, api_key: Option<&str>) -> Result<Self, Error> {
        let mut config = ClientConfig::new(host);
        if let Some(api_key) = api_key {
            config = config.with_api_key(api_key);
        }
        Self::from_config(&config)
    }

    /// Create a transport with explicit configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self, Error> {
        let url = Url::parse(&config.host)
            .map_err(|e| Error::transport(format!("Invalid host url {}: {}", config.host, e)))?;
        if !url.has_host() {
            return Err(Error::transport(format!(
                "Invalid host url {}: no host",
                config.host
            )));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self {
            base_url: config.host.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            http,
        })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn request(
        &self,
        method: Method,
        route: &str,
        query: &[(String, String)],
        body: Option<Value>,
    ) -> Result<TransportResponse, Error> {
        let url = format!("{}/{}", self.base_url, route);
        let mut request = match method {
            Method::Get => self.http.get(&url),
            Method::Post => self.http.post(&url),
            Method::Put => self.http.put(&url),
            Method::Patch => self.http.patch(&url),
            Method::Delete => self.http.delete(&url),
        };
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        debug!(method = %method, url = %url, "Sending request to the service");
        let response = request.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        let body = if text.is_empty() {
            Value::Null
        } else {
            match serde_json::from_str(&text) {
                Ok(value) => value,
                // Keep non JSON error bodies (e.g. proxy pages) for diagnostics.
                Err(_) if !(200..300).contains(&status) => Value::String(text),
                Err(e) => {
                    return Err(Error::decode(format!("Invalid JSON from {url}: {e}")));
                }
            }
        };

        Ok(TransportResponse { status, body })
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        match err.url() {
            Some(url) => Error::transport(format!("Request to {url} has failed: {err}")),
            None => Error::transport(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    #[tokio::test]
    async fn sends_bearer_credentials() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/health")
            .match_header("authorization", "Bearer masterKey")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status":"available"}"#)
            .create();

        let transport = ReqwestTransport::new(&server.url(), Some("masterKey")).unwrap();
        let response = transport
            .request(Method::Get, "health", &[], None)
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body["status"], "available");
        mock.assert();
    }

    #[tokio::test]
    async fn omits_credentials_when_anonymous() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/health")
            .match_header("authorization", Matcher::Missing)
            .with_status(200)
            .with_body(r#"{"status":"available"}"#)
            .create();

        let transport = ReqwestTransport::new(&server.url(), None).unwrap();
        transport
            .request(Method::Get, "health", &[], None)
            .await
            .unwrap();

        mock.assert();
    }

    #[tokio::test]
    async fn renders_query_parameters_and_json_bodies() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/indexes/movies/documents")
            .match_query(Matcher::UrlEncoded("primaryKey".into(), "id".into()))
            .match_body(Matcher::Json(json!([{ "id": 1 }])))
            .with_status(202)
            .with_body(
                r#"{
                    "taskUid": 0,
                    "indexUid": "movies",
                    "status": "enqueued",
                    "type": "documentAdditionOrUpdate",
                    "enqueuedAt": "2026-08-20T09:29:45.175Z"
                }"#,
            )
            .create();

        let transport = ReqwestTransport::new(&server.url(), Some("masterKey")).unwrap();
        let response = transport
            .request(
                Method::Post,
                "indexes/movies/documents",
                &[("primaryKey".to_string(), "id".to_string())],
                Some(json!([{ "id": 1 }])),
            )
            .await
            .unwrap();

        assert_eq!(response.status, 202);
        assert_eq!(response.body["taskUid"], 0);
        mock.assert();
    }

    #[tokio::test]
    async fn passes_error_statuses_through() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/indexes/none")
            .with_status(404)
            .with_body(
                r#"{
                    "message": "Index `none` not found.",
                    "code": "index_not_found",
                    "type": "invalid_request",
                    "link": "https://docs.delphi.dev/errors#index_not_found"
                }"#,
            )
            .create();

        let transport = ReqwestTransport::new(&server.url(), Some("masterKey")).unwrap();
        let response = transport
            .request(Method::Get, "indexes/none", &[], None)
            .await
            .unwrap();

        assert_eq!(response.status, 404);
        assert_eq!(response.body["code"], "index_not_found");
    }

    #[tokio::test]
    async fn empty_bodies_decode_to_null() {
        let mut server = mockito::Server::new_async().await;
        server.mock("DELETE", "/keys/abc").with_status(204).create();

        let transport = ReqwestTransport::new(&server.url(), Some("masterKey")).unwrap();
        let response = transport
            .request(Method::Delete, "keys/abc", &[], None)
            .await
            .unwrap();

        assert_eq!(response.status, 204);
        assert_eq!(response.body, Value::Null);
    }

    #[tokio::test]
    async fn non_json_error_bodies_are_preserved() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/health")
            .with_status(502)
            .with_body("<html>Bad Gateway</html>")
            .create();

        let transport = ReqwestTransport::new(&server.url(), None).unwrap();
        let response = transport
            .request(Method::Get, "health", &[], None)
            .await
            .unwrap();

        assert_eq!(response.status, 502);
        assert_eq!(response.body, json!("<html>Bad Gateway</html>"));
    }

    #[tokio::test]
    async fn trailing_slashes_do_not_double_up() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/health")
            .with_status(200)
            .with_body(r#"{"status":"available"}"#)
            .create();

        let host = format!("{}/", server.url());
        let transport = ReqwestTransport::new(&host, None).unwrap();
        transport
            .request(Method::Get, "health", &[], None)
            .await
            .unwrap();

        mock.assert();
    }

    #[test]
    fn rejects_unparseable_hosts() {
        let result = ReqwestTransport::new("not a url", None);
        assert!(matches!(result, Err(Error::TransportError(_))));
    }
}
