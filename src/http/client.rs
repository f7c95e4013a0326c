// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Upstream fetcher for requests the rules let through

use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::redirect::Policy;
use reqwest::Client;

use super::request::Request;
use super::response::Response;
use super::DEFAULT_USER_AGENT;
use crate::error::{Error, Result};

/// Connection settings for [`HttpClient`]
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub user_agent: String,
    /// Whole-exchange timeout
    pub timeout: Duration,
    pub max_redirects: usize,
    /// Upstream proxy, e.g. `http://127.0.0.1:8888`
    pub proxy: Option<String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
            max_redirects: 10,
            proxy: None,
        }
    }
}

/// reqwest-backed client that hands back [`Response`] values ready for sanitizing
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct HttpClient {
    inner: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        // The apps talk JSON first, HTML for their web views.
        let mut accept = HeaderMap::new();
        accept.insert(
            ACCEPT,
            HeaderValue::from_static("application/json,text/html;q=0.9,*/*;q=0.8"),
        );

        let mut builder = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .redirect(Policy::limited(config.max_redirects))
            .default_headers(accept);

        if let Some(proxy) = &config.proxy {
            let proxy = reqwest::Proxy::all(proxy.as_str())
                .map_err(|e| Error::config(format!("Invalid proxy '{}': {}", proxy, e)))?;
            builder = builder.proxy(proxy);
        }

        Ok(Self {
            inner: builder.build()?,
            config,
        })
    }

    pub async fn get(&self, url: impl AsRef<str>) -> Result<Response> {
        self.execute(Request::get(url)?).await
    }

    /// Send a request upstream and buffer the whole body
    pub async fn execute(&self, request: Request) -> Result<Response> {
        let started = Instant::now();

        let mut builder = self
            .inner
            .request(request.method, request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let upstream = builder.send().await?;
        let status = upstream.status();
        let url = upstream.url().clone();
        let headers = upstream.headers().clone();
        let body = upstream.bytes().await?;
        let elapsed = started.elapsed().as_millis() as u64;

        tracing::debug!(%url, status = status.as_u16(), bytes = body.len(), elapsed_ms = elapsed, "Fetched");

        Ok(Response::new(status, headers, body, url).with_response_time(elapsed))
    }

    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_defaults() {
        let client = HttpClient::new().unwrap();
        assert_eq!(client.config().user_agent, DEFAULT_USER_AGENT);
        assert_eq!(client.config().timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_bad_proxy_is_config_error() {
        let config = HttpClientConfig {
            proxy: Some("not a proxy url".to_string()),
            ..Default::default()
        };
        let err = HttpClient::with_config(config).err().unwrap();
        assert!(matches!(err, Error::Config(_)));
    }
}
