// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Rewrite engine - routes traffic to per-app rules
//!
//! Routing: the first rule whose activation regex matches the URL wins;
//! failing that, the first rule without activation regexes whose domain
//! list covers it. URLs no rule covers pass through untouched.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::http::{Request, Response};
use crate::rules::{builtin_profiles, AppProfile, AppRule, RequestOutcome, SanitizeReport};

/// Running counters
#[derive(Debug, Default)]
struct EngineCounters {
    requests_seen: AtomicU64,
    requests_blocked: AtomicU64,
    responses_seen: AtomicU64,
    responses_changed: AtomicU64,
    removed_keys: AtomicU64,
    removed_items: AtomicU64,
    html_removals: AtomicU64,
}

/// Snapshot of engine counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineStats {
    pub requests_seen: u64,
    pub requests_blocked: u64,
    pub responses_seen: u64,
    pub responses_changed: u64,
    pub removed_keys: u64,
    pub removed_items: u64,
    pub html_removals: u64,
}

impl EngineStats {
    /// Share of requests that were blocked
    pub fn block_rate(&self) -> f64 {
        if self.requests_seen == 0 {
            0.0
        } else {
            self.requests_blocked as f64 / self.requests_seen as f64
        }
    }
}

/// Per-app rule router
#[derive(Debug, Default)]
pub struct RewriteEngine {
    rules: RwLock<Vec<Arc<AppRule>>>,
    counters: EngineCounters,
}

impl RewriteEngine {
    /// Create an engine with no rules
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with the built-in profiles
    pub fn with_builtin() -> Result<Self> {
        Self::from_config(&EngineConfig::default())
    }

    /// Build an engine from config
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        let engine = Self::new();

        if config.include_builtin {
            for profile in builtin_profiles() {
                engine.register(&profile)?;
            }
        }
        for profile in &config.profiles {
            engine.register(profile)?;
        }

        tracing::debug!(rules = engine.rules.read().len(), "Rewrite engine ready");
        Ok(engine)
    }

    /// Compile and add a profile, replacing any rule with the same name
    pub fn register(&self, profile: &AppProfile) -> Result<Arc<AppRule>> {
        let rule = Arc::new(AppRule::compile(profile)?);
        let mut rules = self.rules.write();

        match rules.iter().position(|r| r.name() == rule.name()) {
            Some(idx) => {
                tracing::debug!(profile = %rule.name(), "Replacing rule");
                rules[idx] = rule.clone();
            }
            None => rules.push(rule.clone()),
        }
        Ok(rule)
    }

    /// Remove a rule by name
    pub fn unregister(&self, name: &str) -> Result<()> {
        let mut rules = self.rules.write();
        let before = rules.len();
        rules.retain(|r| r.name() != name);
        if rules.len() == before {
            return Err(Error::UnknownProfile(name.to_string()));
        }
        Ok(())
    }

    /// Rule by name
    pub fn rule(&self, name: &str) -> Option<Arc<AppRule>> {
        self.rules.read().iter().find(|r| r.name() == name).cloned()
    }

    /// All rules in routing order
    pub fn rules(&self) -> Vec<Arc<AppRule>> {
        self.rules.read().clone()
    }

    /// Rule responsible for a URL
    pub fn rule_for(&self, url: &str) -> Option<Arc<AppRule>> {
        let rules = self.rules.read();
        rules
            .iter()
            .find(|r| r.is_activated_by(url))
            .or_else(|| rules.iter().find(|r| !r.has_activation() && r.covers(url)))
            .cloned()
    }

    /// Run a request through the matching rule
    pub fn handle_request(&self, request: Request) -> RequestOutcome {
        self.counters.requests_seen.fetch_add(1, Ordering::Relaxed);

        let Some(rule) = self.rule_for(request.url_str()) else {
            tracing::trace!(url = %request.url, "No rule for request");
            return RequestOutcome::Forward(request);
        };

        let outcome = rule.handle_request(request);
        if outcome.is_blocked() {
            self.counters.requests_blocked.fetch_add(1, Ordering::Relaxed);
        }
        outcome
    }

    /// Sanitize a response to a request for `url`
    pub fn handle_response(&self, url: &Url, response: Response) -> (Response, SanitizeReport) {
        self.counters.responses_seen.fetch_add(1, Ordering::Relaxed);

        let Some(rule) = self.rule_for(url.as_str()) else {
            return (response, SanitizeReport::skipped());
        };

        let (cleaned, report) = rule.handle_response(&response);
        if report.changed() {
            let c = &self.counters;
            c.responses_changed.fetch_add(1, Ordering::Relaxed);
            c.removed_keys.fetch_add(report.removed_keys as u64, Ordering::Relaxed);
            c.removed_items.fetch_add(report.removed_items as u64, Ordering::Relaxed);
            c.html_removals.fetch_add(report.html_removals as u64, Ordering::Relaxed);
        }
        (cleaned, report)
    }

    /// Snapshot counters
    pub fn stats(&self) -> EngineStats {
        let c = &self.counters;
        EngineStats {
            requests_seen: c.requests_seen.load(Ordering::Relaxed),
            requests_blocked: c.requests_blocked.load(Ordering::Relaxed),
            responses_seen: c.responses_seen.load(Ordering::Relaxed),
            responses_changed: c.responses_changed.load(Ordering::Relaxed),
            removed_keys: c.removed_keys.load(Ordering::Relaxed),
            removed_items: c.removed_items.load(Ordering::Relaxed),
            html_removals: c.html_removals.load(Ordering::Relaxed),
        }
    }
}
