// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! App profiles - the raw rule tables
//!
//! A profile is plain data: ordered string lists describing one app's ad
//! traffic. It is compiled into an [`AppRule`](super::AppRule) before use.

use serde::{Deserialize, Serialize};

/// Rule table for one target application
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppProfile {
    /// Unique profile name (e.g. `hongguo`)
    pub name: String,
    /// Human readable tag used in log lines
    pub tag: String,
    /// URL regexes that route traffic to this profile
    pub activation: Vec<String>,
    /// Domain substrings that scope the classifier
    pub domains: Vec<String>,
    /// Ad API path fragments
    pub endpoints: Vec<String>,
    /// Substrings looked for in the lowercased URL
    pub url_keywords: Vec<String>,
    /// JSON object keys dropped from responses (compared lowercased)
    pub field_keys: Vec<String>,
    /// Substrings that mark a serialized array element as an ad
    pub item_keywords: Vec<String>,
    /// Empty arrays added to the synthetic envelope after `data`
    pub envelope_arrays: Vec<String>,
    /// HTML removals applied to non-JSON bodies, in order
    pub html_patterns: Vec<HtmlPattern>,
}

impl AppProfile {
    /// Create an empty profile
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            tag: name.clone(),
            name,
            ..Default::default()
        }
    }

    /// Set the log tag
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Add activation URL regexes
    pub fn activation<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.activation.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Add domains
    pub fn domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.domains.extend(domains.into_iter().map(Into::into));
        self
    }

    /// Add ad endpoints
    pub fn endpoints<I, S>(mut self, endpoints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.endpoints.extend(endpoints.into_iter().map(Into::into));
        self
    }

    /// Add URL keywords
    pub fn url_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.url_keywords.extend(keywords.into_iter().map(Into::into));
        self
    }

    /// Add JSON field keys to strip
    pub fn field_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.field_keys.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Add array item keywords
    pub fn item_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.item_keywords.extend(keywords.into_iter().map(Into::into));
        self
    }

    /// Add envelope arrays
    pub fn envelope_arrays<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.envelope_arrays.extend(names.into_iter().map(Into::into));
        self
    }

    /// Add an HTML removal pattern
    pub fn html(mut self, pattern: HtmlPattern) -> Self {
        self.html_patterns.push(pattern);
        self
    }
}

/// One HTML removal rule
///
/// All structured variants expand to a case-insensitive, non-greedy regex
/// that does not cross newlines, mirroring what rewrite hosts apply to
/// captured pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum HtmlPattern {
    /// `<div class="...needle...">...</div>`
    DivClass(String),
    /// `<div id="...needle...">...</div>`
    DivId(String),
    /// `<script src="...needle..."></script>`
    ScriptSrc(String),
    /// `<script>...needle...</script>`
    ScriptBody(String),
    /// Arbitrary regex, used verbatim
    Raw(String),
}

impl HtmlPattern {
    /// Regex source for this pattern
    pub fn to_regex(&self) -> String {
        match self {
            HtmlPattern::DivClass(needle) => format!(
                r#"(?i)<div[^>]*class="[^"]*{}[^"]*"[^>]*>.*?</div>"#,
                regex::escape(needle)
            ),
            HtmlPattern::DivId(needle) => format!(
                r#"(?i)<div[^>]*id="[^"]*{}[^"]*"[^>]*>.*?</div>"#,
                regex::escape(needle)
            ),
            HtmlPattern::ScriptSrc(needle) => format!(
                r#"(?i)<script[^>]*src="[^"]*{}[^"]*"[^>]*>.*?</script>"#,
                regex::escape(needle)
            ),
            HtmlPattern::ScriptBody(needle) => format!(
                r#"(?i)<script[^>]*>.*?{}.*?</script>"#,
                regex::escape(needle)
            ),
            HtmlPattern::Raw(source) => source.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let profile = AppProfile::new("demo")
            .tag("Demo")
            .domains(["demo.com"])
            .endpoints(["/api/ad"])
            .html(HtmlPattern::DivClass("banner".into()));

        assert_eq!(profile.name, "demo");
        assert_eq!(profile.tag, "Demo");
        assert_eq!(profile.domains, vec!["demo.com"]);
        assert_eq!(profile.html_patterns.len(), 1);
    }

    #[test]
    fn test_html_pattern_escapes_needle() {
        let source = HtmlPattern::DivClass("video.ad".into()).to_regex();
        assert!(source.contains(r"video\.ad"));
    }

    #[test]
    fn test_profile_from_json_uses_defaults() {
        let profile: AppProfile = serde_json::from_str(
            r#"{
                "name": "custom",
                "domains": ["custom.app"],
                "html_patterns": [{"kind": "div_id", "value": "popup"}]
            }"#,
        )
        .unwrap();

        assert_eq!(profile.name, "custom");
        assert!(profile.endpoints.is_empty());
        assert_eq!(profile.html_patterns, vec![HtmlPattern::DivId("popup".into())]);
    }
}
