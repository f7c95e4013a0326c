// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Compiled per-app rewrite rule

use regex::Regex;
use serde_json::{Map, Value};

use super::classifier::{AdClassifier, AdMatch};
use super::profile::AppProfile;
use super::sanitizer::{HtmlSanitizer, JsonSanitizer, ResponseSanitizer, SanitizeReport};
use crate::error::{Error, ErrorContext, Result};
use crate::http::{Request, Response};

/// Result of running a request through a rule
#[derive(Debug, Clone, PartialEq)]
pub enum RequestOutcome {
    /// Not an ad request, the original request is returned untouched
    Forward(Request),
    /// Ad request, answer with this synthetic response instead
    Respond(Response),
}

impl RequestOutcome {
    /// Whether the request was short-circuited
    pub fn is_blocked(&self) -> bool {
        matches!(self, RequestOutcome::Respond(_))
    }
}

/// An [`AppProfile`] compiled for matching
#[derive(Debug, Clone)]
pub struct AppRule {
    name: String,
    tag: String,
    activation: Vec<Regex>,
    classifier: AdClassifier,
    sanitizer: ResponseSanitizer,
    envelope: String,
}

impl AppRule {
    /// Compile a profile, validating its tables and regexes
    pub fn compile(profile: &AppProfile) -> Result<Self> {
        if profile.name.trim().is_empty() {
            return Err(Error::invalid_profile("<unnamed>", "profile name is empty"));
        }
        if profile.domains.is_empty() {
            return Err(Error::invalid_profile(&profile.name, "no domains configured"));
        }

        let activation = profile
            .activation
            .iter()
            .map(|p| Regex::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()
            .with_profile(&profile.name)?;

        let html_patterns = profile
            .html_patterns
            .iter()
            .map(|p| Regex::new(&p.to_regex()))
            .collect::<std::result::Result<Vec<_>, _>>()
            .with_profile(&profile.name)?;

        let tag = if profile.tag.is_empty() {
            profile.name.clone()
        } else {
            profile.tag.clone()
        };

        Ok(Self {
            name: profile.name.clone(),
            tag,
            activation,
            classifier: AdClassifier::new(
                profile.domains.clone(),
                profile.endpoints.clone(),
                profile.url_keywords.clone(),
            ),
            sanitizer: ResponseSanitizer::new(
                JsonSanitizer::new(&profile.field_keys, &profile.item_keywords),
                HtmlSanitizer::new(html_patterns),
            ),
            envelope: empty_envelope(&profile.envelope_arrays),
        })
    }

    /// Profile name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Log tag
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The URL classifier
    pub fn classifier(&self) -> &AdClassifier {
        &self.classifier
    }

    /// The response sanitizer
    pub fn sanitizer(&self) -> &ResponseSanitizer {
        &self.sanitizer
    }

    /// Whether one of the activation regexes matches this URL
    pub fn is_activated_by(&self, url: &str) -> bool {
        self.activation.iter().any(|re| re.is_match(url))
    }

    /// Whether the profile declares activation regexes
    pub fn has_activation(&self) -> bool {
        !self.activation.is_empty()
    }

    /// Whether this rule handles traffic for the URL
    ///
    /// Rules with activation regexes handle exactly the URLs those match.
    /// Rules without any fall back to their domain list.
    pub fn covers(&self, url: &str) -> bool {
        if self.has_activation() {
            self.is_activated_by(url)
        } else {
            self.classifier.matching_domain(url).is_some()
        }
    }

    /// Check whether a URL is an ad request
    pub fn is_ad_request(&self, url: &str) -> bool {
        self.classifier.is_ad_url(url)
    }

    /// Short-circuit ad requests with an empty success envelope
    pub fn handle_request(&self, request: Request) -> RequestOutcome {
        match self.classifier.classify(request.url_str()) {
            Some(ad) => {
                self.log_blocked(&request, &ad);
                RequestOutcome::Respond(self.blocked_response(&request))
            }
            None => RequestOutcome::Forward(request),
        }
    }

    /// The synthetic response served in place of an ad request
    pub fn blocked_response(&self, request: &Request) -> Response {
        Response::synthetic_json(request.url.clone(), self.envelope.clone())
    }

    /// Strip ad content from a captured response
    pub fn handle_response(&self, response: &Response) -> (Response, SanitizeReport) {
        let (cleaned, report) = self.sanitizer.sanitize(response);
        tracing::debug!(
            profile = %self.name,
            url = %response.url,
            mode = ?report.mode,
            removed_keys = report.removed_keys,
            removed_items = report.removed_items,
            html_removals = report.html_removals,
            "Sanitized response"
        );
        (cleaned, report)
    }

    fn log_blocked(&self, request: &Request, ad: &AdMatch) {
        tracing::info!(
            profile = %self.name,
            url = %request.url,
            reason = %ad,
            "[{}] Blocked ad request",
            self.tag
        );
    }
}

/// `{"code":0,"message":"success","data":[], <arrays>...}`
fn empty_envelope(arrays: &[String]) -> String {
    let mut body = Map::new();
    body.insert("code".into(), Value::from(0));
    body.insert("message".into(), Value::from("success"));
    body.insert("data".into(), Value::Array(vec![]));
    for name in arrays {
        body.insert(name.clone(), Value::Array(vec![]));
    }
    Value::Object(body).to_string()
}
