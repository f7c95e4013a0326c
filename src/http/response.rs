// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Captured or synthesized response

use bytes::Bytes;
use reqwest::header::{
    HeaderMap, HeaderValue, ACCESS_CONTROL_ALLOW_ORIGIN, CACHE_CONTROL, CONTENT_TYPE,
};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{Error, Result};

/// A response body plus the metadata the sanitizers need
///
/// Sanitizing never mutates a response in place; [`Response::with_body`]
/// produces the rewritten copy.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
    /// URL the body came from, after redirects
    pub url: Url,
    /// Round trip in milliseconds; 0 when the response never left the process
    pub response_time_ms: u64,
}

impl Response {
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes, url: Url) -> Self {
        Self {
            status,
            headers,
            body,
            url,
            response_time_ms: 0,
        }
    }

    /// `200 OK` JSON answer served in place of a blocked request
    ///
    /// Carries `Access-Control-Allow-Origin: *` so web views accept it and
    /// `Cache-Control: no-cache` so the empty envelope never gets cached.
    pub fn synthetic_json(url: Url, body: impl Into<Bytes>) -> Self {
        let mut headers = HeaderMap::with_capacity(3);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));

        Self::new(StatusCode::OK, headers, body.into(), url)
    }

    pub fn with_response_time(mut self, ms: u64) -> Self {
        self.response_time_ms = ms;
        self
    }

    /// Copy with the body replaced; status and headers are kept as they were
    pub fn with_body(&self, body: impl Into<Bytes>) -> Self {
        Self {
            status: self.status,
            headers: self.headers.clone(),
            body: body.into(),
            url: self.url.clone(),
            response_time_ms: self.response_time_ms,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Body as UTF-8, failing on invalid bytes
    pub fn text(&self) -> Result<String> {
        std::str::from_utf8(&self.body)
            .map(str::to_owned)
            .map_err(|e| Error::other(format!("response body is not UTF-8: {}", e)))
    }

    /// Body as text with invalid sequences replaced
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Header value, if present and visible ASCII
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE)?.to_str().ok()
    }

    /// Whether the declared content type is `application/json`, any parameters allowed
    pub fn is_json(&self) -> bool {
        self.content_type()
            .map_or(false, |ct| ct.contains("application/json"))
    }

    pub fn body_len(&self) -> usize {
        self.body.len()
    }

    pub fn url_str(&self) -> &str {
        self.url.as_str()
    }
}
