// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Engine configuration
//!
//! Loaded from a JSON file (see `ADREWRITE_CONFIG`) or built in code:
//!
//! ```json
//! {
//!   "include_builtin": true,
//!   "profiles": [
//!     { "name": "myapp", "domains": ["myapp.com"], "endpoints": ["/v1/ads"] }
//!   ],
//!   "http": { "timeout_secs": 10 }
//! }
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, DEFAULT_USER_AGENT};
use crate::rules::AppProfile;

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "ADREWRITE_CONFIG";

/// Rewrite engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Load the shipped app profiles before the configured ones
    pub include_builtin: bool,
    /// Extra profiles; a profile named like a built-in replaces it
    pub profiles: Vec<AppProfile>,
    /// Outbound HTTP settings for `fetch`
    pub http: HttpSettings,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            include_builtin: true,
            profiles: vec![],
            http: HttpSettings::default(),
        }
    }
}

impl EngineConfig {
    /// Create a new engine config
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
            .map_err(|e| Error::config(format!("{}: {}", path.display(), e)))
    }

    /// Load from `ADREWRITE_CONFIG` if set, defaults otherwise
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Include or skip the built-in profiles
    pub fn include_builtin(mut self, include: bool) -> Self {
        self.include_builtin = include;
        self
    }

    /// Add a profile
    pub fn profile(mut self, profile: AppProfile) -> Self {
        self.profiles.push(profile);
        self
    }

    /// Set HTTP settings
    pub fn http(mut self, http: HttpSettings) -> Self {
        self.http = http;
        self
    }

    /// Reject duplicate profile names
    pub fn validate(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for profile in &self.profiles {
            if !seen.insert(profile.name.as_str()) {
                return Err(Error::config(format!(
                    "duplicate profile '{}'",
                    profile.name
                )));
            }
        }
        Ok(())
    }
}

/// Outbound HTTP settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    /// User agent string
    pub user_agent: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Upstream proxy URL
    pub proxy: Option<String>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
            proxy: None,
        }
    }
}

impl HttpSettings {
    /// Convert to an HTTP client config
    pub fn client_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            user_agent: self.user_agent.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            proxy: self.proxy.clone(),
            ..Default::default()
        }
    }
}
