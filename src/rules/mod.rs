// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Per-app ad rules
//!
//! Each app gets a profile (plain string tables) that compiles into an
//! [`AppRule`] with three operations:
//!
//! - classify a URL as an ad request or not
//! - short-circuit ad requests with an empty JSON success envelope
//! - strip ad keys/items from JSON bodies, or ad markup from HTML bodies

mod builtin;
mod classifier;
mod profile;
mod rule;
mod sanitizer;

pub use builtin::{builtin_profile, builtin_profiles, HEMADRAMA, HEMADRAMA_PROFILE, HONGGUO, HONGGUO_PROFILE};
pub use classifier::{AdClassifier, AdMatch, MatchTrigger};
pub use profile::{AppProfile, HtmlPattern};
pub use rule::{AppRule, RequestOutcome};
pub use sanitizer::{HtmlSanitizer, JsonSanitizer, ResponseSanitizer, SanitizeMode, SanitizeReport};
