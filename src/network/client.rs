//! HTTP client shared by network-backed providers

use super::user_agent::{accept_json, generate_user_agent, ACCEPT_LANGUAGE};
use crate::config::OutgoingSettings;
use crate::error::ProviderError;
use anyhow::Result;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;

/// HTTP client wrapper configured from [`OutgoingSettings`]
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    user_agent: String,
    extra_headers: HashMap<String, String>,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self> {
        Self::with_settings(&OutgoingSettings::default())
    }

    /// Create a new HTTP client with custom settings
    pub fn with_settings(settings: &OutgoingSettings) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(Duration::from_secs_f64(settings.request_timeout))
            .pool_max_idle_per_host(settings.pool_maxsize)
            .gzip(true)
            .brotli(true);

        if !settings.verify_ssl {
            builder = builder.danger_accept_invalid_certs(true);
        }

        if let Some(ref proxy_url) = settings.proxies.all {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        } else {
            if let Some(ref http) = settings.proxies.http {
                builder = builder.proxy(reqwest::Proxy::http(http)?);
            }
            if let Some(ref https) = settings.proxies.https {
                builder = builder.proxy(reqwest::Proxy::https(https)?);
            }
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            user_agent: settings
                .useragent
                .clone()
                .unwrap_or_else(generate_user_agent),
            extra_headers: settings.extra_headers.clone(),
        })
    }

    /// GET `url` with query parameters and decode the body as JSON
    pub async fn get_json(
        &self,
        url: &str,
        params: &[(String, String)],
    ) -> std::result::Result<serde_json::Value, ProviderError> {
        let mut req_builder = self
            .client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .header("Accept", accept_json())
            .header("Accept-Language", ACCEPT_LANGUAGE);

        for (key, value) in &self.extra_headers {
            req_builder = req_builder.header(key, value);
        }

        if !params.is_empty() {
            req_builder = req_builder.query(params);
        }

        let response = req_builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Get current user agent
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_client_creation() {
        let client = HttpClient::new();
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_configured_user_agent() {
        let settings = OutgoingSettings {
            useragent: Some("torrent-search-test/1.0".to_string()),
            ..Default::default()
        };
        let client = HttpClient::with_settings(&settings).unwrap();
        assert_eq!(client.user_agent(), "torrent-search-test/1.0");
    }

    #[tokio::test]
    async fn test_get_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api"))
            .and(query_param("q", "ubuntu"))
            .and(header("x-api-key", "secret"))
            .and(header_exists("accept-language"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
            .mount(&server)
            .await;

        let mut settings = OutgoingSettings::default();
        settings
            .extra_headers
            .insert("x-api-key".to_string(), "secret".to_string());
        let client = HttpClient::with_settings(&settings).unwrap();

        let body = client
            .get_json(
                &format!("{}/api", server.uri()),
                &[("q".to_string(), "ubuntu".to_string())],
            )
            .await
            .unwrap();
        assert_eq!(body, json!({ "ok": true }));
    }

    #[tokio::test]
    async fn test_get_json_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let err = client.get_json(&server.uri(), &[]).await.unwrap_err();
        assert_eq!(err, ProviderError::Status(503));
    }

    #[tokio::test]
    async fn test_get_json_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let err = client.get_json(&server.uri(), &[]).await.unwrap_err();
        assert!(matches!(err, ProviderError::Parse(_)));
    }
}
