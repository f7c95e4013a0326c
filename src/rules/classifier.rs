// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! URL classifier for ad requests
//!
//! A URL is an ad request when it contains one of the app's domains AND
//! either one of its ad endpoints or one of its URL keywords. Domains and
//! endpoints are matched case-sensitively against the raw URL, keywords
//! against the lowercased URL.

use serde::{Deserialize, Serialize};

/// Why a URL was classified as an ad request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdMatch {
    /// First configured domain found in the URL
    pub domain: String,
    /// What satisfied the second half of the test
    pub trigger: MatchTrigger,
}

/// The endpoint or keyword that completed a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchTrigger {
    /// An ad API path fragment
    Endpoint(String),
    /// A keyword in the lowercased URL
    Keyword(String),
}

impl std::fmt::Display for AdMatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.trigger {
            MatchTrigger::Endpoint(e) => write!(f, "domain {} + endpoint {}", self.domain, e),
            MatchTrigger::Keyword(k) => write!(f, "domain {} + keyword {}", self.domain, k),
        }
    }
}

/// Domain/endpoint/keyword classifier
#[derive(Debug, Clone, Default)]
pub struct AdClassifier {
    domains: Vec<String>,
    endpoints: Vec<String>,
    keywords: Vec<String>,
}

impl AdClassifier {
    /// Create a classifier from the three pattern lists
    pub fn new(domains: Vec<String>, endpoints: Vec<String>, keywords: Vec<String>) -> Self {
        Self {
            domains,
            endpoints,
            keywords: keywords.into_iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    /// Check whether a URL is an ad request
    pub fn is_ad_url(&self, url: &str) -> bool {
        self.classify(url).is_some()
    }

    /// Classify a URL, returning the match details
    pub fn classify(&self, url: &str) -> Option<AdMatch> {
        let domain = self.matching_domain(url)?;

        if let Some(endpoint) = self.endpoints.iter().find(|e| url.contains(e.as_str())) {
            return Some(AdMatch {
                domain: domain.to_string(),
                trigger: MatchTrigger::Endpoint(endpoint.clone()),
            });
        }

        let lower = url.to_lowercase();
        self.keywords
            .iter()
            .find(|k| lower.contains(k.as_str()))
            .map(|keyword| AdMatch {
                domain: domain.to_string(),
                trigger: MatchTrigger::Keyword(keyword.clone()),
            })
    }

    /// First configured domain contained in the URL
    pub fn matching_domain(&self, url: &str) -> Option<&str> {
        self.domains
            .iter()
            .find(|d| url.contains(d.as_str()))
            .map(String::as_str)
    }

    /// Configured domains
    pub fn domains(&self) -> &[String] {
        &self.domains
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> AdClassifier {
        AdClassifier::new(
            vec!["example-video.com".into(), "cdn.example-video.com".into()],
            vec!["/api/promo".into(), "/v2/splash".into()],
            vec!["Sponsor".into(), "popup".into()],
        )
    }

    #[test]
    fn test_requires_domain() {
        let c = classifier();
        assert!(!c.is_ad_url("https://other.com/api/promo"));
        assert!(!c.is_ad_url("https://other.com/sponsor/popup"));
    }

    #[test]
    fn test_domain_alone_is_not_enough() {
        let c = classifier();
        assert!(!c.is_ad_url("https://example-video.com/api/feed"));
    }

    #[test]
    fn test_endpoint_match() {
        let c = classifier();
        let m = c.classify("https://example-video.com/api/promo?id=1").unwrap();
        assert_eq!(m.domain, "example-video.com");
        assert_eq!(m.trigger, MatchTrigger::Endpoint("/api/promo".into()));
    }

    #[test]
    fn test_endpoint_is_case_sensitive() {
        let c = classifier();
        assert!(!c.is_ad_url("https://example-video.com/API/PROMO"));
    }

    #[test]
    fn test_keyword_is_case_insensitive() {
        let c = classifier();
        let m = c.classify("https://example-video.com/feed/SPONSORED").unwrap();
        assert_eq!(m.trigger, MatchTrigger::Keyword("sponsor".into()));
        assert_eq!(m.to_string(), "domain example-video.com + keyword sponsor");
    }

    #[test]
    fn test_domain_is_case_sensitive() {
        let c = classifier();
        assert!(!c.is_ad_url("https://EXAMPLE-VIDEO.COM/popup"));
    }
}
