// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Intercepted request

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use url::Url;

use crate::error::Result;

/// An outgoing request as the rules see it
///
/// Rules only read requests. One that is not short-circuited is handed
/// back untouched, so equality is structural.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
}

impl Request {
    /// Request for an already parsed URL
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Parse `url` into a GET request
    pub fn get(url: impl AsRef<str>) -> Result<Self> {
        let url = Url::parse(url.as_ref())?;
        Ok(Self::new(Method::GET, url))
    }

    /// Add a header, silently skipping names or values that are not valid HTTP
    pub fn header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (name.parse::<HeaderName>(), HeaderValue::from_str(value)) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Full URL text, what classifiers match against
    pub fn url_str(&self) -> &str {
        self.url.as_str()
    }

    pub fn host(&self) -> Option<&str> {
        self.url.host_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_parses_url() {
        let req = Request::get("https://api.hongguo.com/api/feed?page=2").unwrap();
        assert_eq!(req.method, Method::GET);
        assert_eq!(req.host(), Some("api.hongguo.com"));
        assert_eq!(req.url_str(), "https://api.hongguo.com/api/feed?page=2");
        assert!(req.body.is_none());
    }

    #[test]
    fn test_invalid_header_is_skipped() {
        let req = Request::get("https://api.hemadrama.com/")
            .unwrap()
            .header("x-device", "ios")
            .header("bad header", "v");
        assert_eq!(req.headers.len(), 1);
        assert_eq!(req.headers["x-device"], "ios");
    }

    #[test]
    fn test_relative_url_is_rejected() {
        assert!(Request::get("/api/ad").is_err());
    }
}
