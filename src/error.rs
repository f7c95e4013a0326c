// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for adrewrite
//!
//! Rule evaluation itself never fails: a response body that cannot be parsed
//! as JSON falls back to HTML sanitization. Errors surface only from the
//! layers around the rules (profile compilation, config loading, HTTP).

use thiserror::Error;

/// Crate-wide result
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong outside rule evaluation
#[derive(Error, Debug)]
pub enum Error {
    /// Upstream fetch failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A request or config URL did not parse
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Reading a config or capture file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON config or body
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An activation or HTML pattern did not compile
    #[error("Invalid pattern: {0}")]
    Regex(#[from] regex::Error),

    /// Config rejected after parsing
    #[error("Configuration error: {0}")]
    Config(String),

    /// A profile could not be compiled into a rule
    #[error("Invalid profile '{profile}': {reason}")]
    InvalidProfile { profile: String, reason: String },

    /// No profile registered under this name
    #[error("Unknown profile: {0}")]
    UnknownProfile(String),

    /// Interceptor chain aborted or failed an exchange
    #[error("Network error: {0}")]
    Network(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    pub fn invalid_profile(profile: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidProfile {
            profile: profile.into(),
            reason: reason.into(),
        }
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    pub fn network<S: Into<String>>(msg: S) -> Self {
        Error::Network(msg.into())
    }

    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Failure while talking to the upstream
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Network(_) | Error::Http(_))
    }

    /// Check if this came from a bad rule table
    pub fn is_profile_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidProfile { .. } | Error::UnknownProfile(_) | Error::Regex(_)
        )
    }

    /// Name of the offending profile, if known
    pub fn profile(&self) -> Option<&str> {
        match self {
            Error::InvalidProfile { profile, .. } => Some(profile),
            Error::UnknownProfile(name) => Some(name),
            _ => None,
        }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

/// Attach a profile name or an operation to an error
pub trait ErrorContext<T> {
    /// Attribute the error to a profile
    fn with_profile(self, profile: &str) -> Result<T>;

    /// Prefix the error with what was being done
    fn context(self, msg: &str) -> Result<T>;
}

impl<T, E: Into<Error>> ErrorContext<T> for std::result::Result<T, E> {
    fn with_profile(self, profile: &str) -> Result<T> {
        self.map_err(|e| match e.into() {
            err @ Error::InvalidProfile { .. } => err,
            other => Error::invalid_profile(profile, other.to_string()),
        })
    }

    fn context(self, msg: &str) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            Error::Other(format!("{}: {}", msg, err))
        })
    }
}
