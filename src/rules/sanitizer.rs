// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Response body sanitizers
//!
//! JSON bodies lose ad keys and ad array items; anything else (including
//! JSON that fails to parse) goes through the HTML regex list.

use std::collections::HashSet;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::http::Response;

/// Which sanitizer handled a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SanitizeMode {
    /// Body parsed as JSON and was walked
    Json,
    /// Body went through the HTML regex list
    Html,
    /// Empty body, nothing to do
    Skipped,
}

/// What a sanitize pass removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanitizeReport {
    pub mode: SanitizeMode,
    pub removed_keys: usize,
    pub removed_items: usize,
    pub html_removals: usize,
}

impl SanitizeReport {
    fn new(mode: SanitizeMode) -> Self {
        Self {
            mode,
            removed_keys: 0,
            removed_items: 0,
            html_removals: 0,
        }
    }

    /// Report for an untouched body
    pub fn skipped() -> Self {
        Self::new(SanitizeMode::Skipped)
    }

    /// Whether anything was removed
    pub fn changed(&self) -> bool {
        self.removed_keys + self.removed_items + self.html_removals > 0
    }
}

/// Recursive JSON ad stripper
#[derive(Debug, Clone, Default)]
pub struct JsonSanitizer {
    /// Lowercased object keys to drop
    field_keys: HashSet<String>,
    /// Lowercased substrings that flag an array element
    item_keywords: Vec<String>,
}

impl JsonSanitizer {
    /// Create a new JSON sanitizer
    pub fn new(field_keys: &[String], item_keywords: &[String]) -> Self {
        Self {
            field_keys: field_keys.iter().map(|k| k.to_lowercase()).collect(),
            item_keywords: item_keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    /// Strip ad content from a parsed value, recording removals in `report`
    pub fn strip(&self, value: Value, report: &mut SanitizeReport) -> Value {
        match value {
            Value::Object(map) => {
                let mut cleaned = Map::with_capacity(map.len());
                for (key, child) in map {
                    if self.field_keys.contains(&key.to_lowercase()) {
                        report.removed_keys += 1;
                        continue;
                    }
                    cleaned.insert(key, self.strip(child, report));
                }
                Value::Object(cleaned)
            }
            Value::Array(items) => {
                let before = items.len();
                let kept: Vec<Value> = items
                    .into_iter()
                    .map(|item| self.strip(item, report))
                    .filter(|item| !self.is_ad_item(item))
                    .collect();
                report.removed_items += before - kept.len();
                Value::Array(kept)
            }
            scalar => scalar,
        }
    }

    /// Objects and arrays whose serialized form mentions an item keyword
    fn is_ad_item(&self, item: &Value) -> bool {
        if !(item.is_object() || item.is_array()) {
            return false;
        }
        let serialized = item.to_string().to_lowercase();
        self.item_keywords
            .iter()
            .any(|keyword| serialized.contains(keyword.as_str()))
    }

    /// Parse, strip and re-serialize a JSON body
    ///
    /// Returns `None` when the body is not valid JSON.
    pub fn sanitize(&self, body: &[u8]) -> Option<(String, SanitizeReport)> {
        let value: Value = serde_json::from_slice(body).ok()?;
        let mut report = SanitizeReport::new(SanitizeMode::Json);
        let cleaned = self.strip(value, &mut report);
        Some((cleaned.to_string(), report))
    }
}

/// Ordered regex removals for HTML bodies
#[derive(Debug, Clone, Default)]
pub struct HtmlSanitizer {
    patterns: Vec<Regex>,
}

impl HtmlSanitizer {
    /// Create from compiled patterns
    pub fn new(patterns: Vec<Regex>) -> Self {
        Self { patterns }
    }

    /// Remove every match of every pattern, in order
    pub fn sanitize(&self, body: &str) -> (String, SanitizeReport) {
        let mut report = SanitizeReport::new(SanitizeMode::Html);
        let mut current = body.to_string();

        for pattern in &self.patterns {
            let hits = pattern.find_iter(&current).count();
            if hits == 0 {
                continue;
            }
            tracing::trace!(pattern = %pattern.as_str(), hits, "HTML removal");
            report.html_removals += hits;
            current = pattern.replace_all(&current, "").into_owned();
        }

        (current, report)
    }

    /// Number of patterns
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether no patterns are configured
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Content-type aware response sanitizer
#[derive(Debug, Clone, Default)]
pub struct ResponseSanitizer {
    json: JsonSanitizer,
    html: HtmlSanitizer,
}

impl ResponseSanitizer {
    /// Combine a JSON and an HTML sanitizer
    pub fn new(json: JsonSanitizer, html: HtmlSanitizer) -> Self {
        Self { json, html }
    }

    /// Sanitize a response, returning a copy with the cleaned body
    ///
    /// Headers are carried over unchanged. Bodies with a JSON content type
    /// that fail to parse are treated as HTML.
    pub fn sanitize(&self, response: &Response) -> (Response, SanitizeReport) {
        if response.body.is_empty() {
            return (response.clone(), SanitizeReport::skipped());
        }

        if response.is_json() {
            if let Some((body, report)) = self.json.sanitize(&response.body) {
                return (response.with_body(body), report);
            }
        }

        let text = response.text_lossy();
        let (body, report) = self.html.sanitize(&text);
        (response.with_body(body), report)
    }

    /// The JSON half
    pub fn json(&self) -> &JsonSanitizer {
        &self.json
    }

    /// The HTML half
    pub fn html(&self) -> &HtmlSanitizer {
        &self.html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use reqwest::header::{HeaderMap, HeaderValue};
    use reqwest::StatusCode;
    use serde_json::json;
    use url::Url;

    fn json_sanitizer() -> JsonSanitizer {
        JsonSanitizer::new(
            &["ads".to_string(), "Banner".to_string()],
            &["sponsor".to_string()],
        )
    }

    fn response(content_type: &str, body: &str) -> Response {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_str(content_type).unwrap());
        Response::new(
            StatusCode::OK,
            headers,
            Bytes::from(body.to_string()),
            Url::parse("https://app.test/feed").unwrap(),
        )
    }

    #[test]
    fn test_strip_keys_case_insensitive() {
        let mut report = SanitizeReport::skipped();
        let out = json_sanitizer().strip(
            json!({"ADS": [1], "banner": {}, "title": "ok", "nested": {"Ads": 1, "x": 2}}),
            &mut report,
        );
        assert_eq!(out, json!({"title": "ok", "nested": {"x": 2}}));
        assert_eq!(report.removed_keys, 3);
    }

    #[test]
    fn test_array_items_filtered_after_cleaning() {
        let mut report = SanitizeReport::skipped();
        // The first item only mentions the keyword inside a key that is
        // itself stripped, so it survives.
        let out = json_sanitizer().strip(
            json!([
                {"banner": "sponsor", "id": 1},
                {"id": 2, "label": "Sponsored"},
                "sponsor",
                [ {"kind": "SPONSOR"} ]
            ]),
            &mut report,
        );
        assert_eq!(out, json!([{"id": 1}, "sponsor", []]));
        assert_eq!(report.removed_items, 2);
        assert_eq!(report.removed_keys, 1);
    }

    #[test]
    fn test_key_order_preserved() {
        let (body, _) = json_sanitizer()
            .sanitize(br#"{"z":1,"ads":[],"a":2,"m":3}"#)
            .unwrap();
        assert_eq!(body, r#"{"z":1,"a":2,"m":3}"#);
    }

    #[test]
    fn test_invalid_json_returns_none() {
        assert!(json_sanitizer().sanitize(b"<html></html>").is_none());
    }

    #[test]
    fn test_html_sanitizer_counts() {
        let html = HtmlSanitizer::new(vec![
            Regex::new(r#"(?i)<div[^>]*class="[^"]*banner[^"]*"[^>]*>.*?</div>"#).unwrap(),
        ]);
        let (out, report) =
            html.sanitize(r#"<div class="top-BANNER">a</div><p>x</p><div class="banner">b</div>"#);
        assert_eq!(out, "<p>x</p>");
        assert_eq!(report.html_removals, 2);
        assert_eq!(report.mode, SanitizeMode::Html);
    }

    #[test]
    fn test_html_match_does_not_cross_lines() {
        let html = HtmlSanitizer::new(vec![
            Regex::new(r#"(?i)<div[^>]*class="[^"]*banner[^"]*"[^>]*>.*?</div>"#).unwrap(),
        ]);
        let body = "<div class=\"banner\">\nmultiline\n</div>";
        let (out, report) = html.sanitize(body);
        assert_eq!(out, body);
        assert!(!report.changed());
    }

    #[test]
    fn test_response_sanitizer_falls_back_to_html() {
        let sanitizer = ResponseSanitizer::new(
            json_sanitizer(),
            HtmlSanitizer::new(vec![Regex::new(r"(?i)<b>.*?</b>").unwrap()]),
        );
        let (out, report) = sanitizer.sanitize(&response("application/json", "{broken <b>x</b>"));
        assert_eq!(out.text().unwrap(), "{broken ");
        assert_eq!(report.mode, SanitizeMode::Html);
        assert_eq!(out.content_type(), Some("application/json"));
    }

    #[test]
    fn test_non_utf8_json_falls_back_to_lossy_html() {
        let sanitizer = ResponseSanitizer::new(
            json_sanitizer(),
            HtmlSanitizer::new(vec![Regex::new(
                r#"(?i)<div[^>]*class="[^"]*banner[^"]*"[^>]*>.*?</div>"#,
            )
            .unwrap()]),
        );
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));
        let original = Response::new(
            StatusCode::OK,
            headers,
            Bytes::from_static(b"<div class=\"banner\">x</div>\xff"),
            Url::parse("https://app.test/feed").unwrap(),
        );

        let (out, report) = sanitizer.sanitize(&original);
        assert_eq!(report.mode, SanitizeMode::Html);
        assert_eq!(report.html_removals, 1);
        let text = out.text().unwrap();
        assert!(!text.contains("banner"));
        assert_eq!(text, "\u{fffd}");
    }

    #[test]
    fn test_response_sanitizer_ignores_json_without_content_type() {
        let sanitizer = ResponseSanitizer::new(json_sanitizer(), HtmlSanitizer::default());
        let (out, report) = sanitizer.sanitize(&response("text/plain", r#"{"ads":[]}"#));
        assert_eq!(out.text().unwrap(), r#"{"ads":[]}"#);
        assert_eq!(report.mode, SanitizeMode::Html);
    }

    #[test]
    fn test_empty_body_skipped() {
        let sanitizer = ResponseSanitizer::default();
        let original = response("application/json", "");
        let (out, report) = sanitizer.sanitize(&original);
        assert_eq!(out, original);
        assert_eq!(report.mode, SanitizeMode::Skipped);
    }
}
