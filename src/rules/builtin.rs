// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Built-in profiles for the short-drama apps we ship rules for
//!
//! These tables track each app's current ad API and page markup and will
//! drift as the apps change.

use lazy_static::lazy_static;

use super::profile::{AppProfile, HtmlPattern};

/// Name of the Hema Drama (河马短剧) profile
pub const HEMADRAMA: &str = "hemadrama";
/// Name of the Hongguo (红果短剧) profile
pub const HONGGUO: &str = "hongguo";

const SHARED_ENDPOINTS: &[&str] = &[
    "/api/advertisement",
    "/api/ad",
    "/api/banner",
    "/api/promotion",
    "/api/sponsor",
    "/api/popup",
    "/api/splash",
    "/api/startup",
    "/api/feed/ad",
    "/api/video/ad",
    "/api/player/ad",
];

const URL_KEYWORDS: &[&str] = &[
    "advertisement",
    "ad",
    "banner",
    "promotion",
    "sponsor",
    "popup",
    "splash",
];

const FIELD_KEYS: &[&str] = &[
    "advertisement",
    "ads",
    "ad",
    "banner",
    "promotion",
    "sponsor",
    "popup",
    "splash",
];

lazy_static! {
    /// 河马短剧
    pub static ref HEMADRAMA_PROFILE: AppProfile = AppProfile::new(HEMADRAMA)
        .tag("河马短剧去广告")
        .activation([
            r"^https?://.*\.hemadrama\.com/.*ad.*$",
            r"^https?://api\.hemadrama\.com/.*advertisement.*$",
        ])
        .domains([
            "hemadrama.com",
            "api.hemadrama.com",
            "ad.hemadrama.com",
            "ads.hemadrama.com",
        ])
        .endpoints(SHARED_ENDPOINTS.iter().copied())
        .url_keywords(URL_KEYWORDS.iter().copied())
        .field_keys(FIELD_KEYS.iter().copied())
        // hemadrama keeps array items that only mention "splash"
        .item_keywords(["advertisement", "ad", "banner", "promotion", "sponsor", "popup"])
        .envelope_arrays(["ads", "advertisements"])
        .html(HtmlPattern::DivClass("splash".into()))
        .html(HtmlPattern::DivId("splash".into()))
        .html(HtmlPattern::DivClass("banner".into()))
        .html(HtmlPattern::DivId("banner".into()))
        .html(HtmlPattern::DivClass("popup".into()))
        .html(HtmlPattern::DivId("popup".into()))
        .html(HtmlPattern::DivClass("video-ad".into()))
        .html(HtmlPattern::DivId("video-ad".into()))
        .html(HtmlPattern::DivClass("advertisement".into()))
        .html(HtmlPattern::DivClass("promotion".into()))
        .html(HtmlPattern::DivClass("sponsor".into()))
        .html(HtmlPattern::ScriptSrc("ad".into()))
        .html(HtmlPattern::ScriptBody("advertisement".into()))
        .html(HtmlPattern::ScriptBody("banner".into()));

    /// 红果短剧, also served from the redfruit.com mirror
    pub static ref HONGGUO_PROFILE: AppProfile = AppProfile::new(HONGGUO)
        .tag("红果短剧去广告")
        .activation([
            r"^https?://.*\.hongguo\.com/.*ad.*$",
            r"^https?://api\.hongguo\.com/.*advertisement.*$",
        ])
        .domains([
            "hongguo.com",
            "api.hongguo.com",
            "ad.hongguo.com",
            "ads.hongguo.com",
            "redfruit.com",
            "api.redfruit.com",
        ])
        .endpoints(SHARED_ENDPOINTS.iter().copied())
        .endpoints(["/api/recommend/ad", "/api/home/ad"])
        .url_keywords(URL_KEYWORDS.iter().copied())
        .field_keys(FIELD_KEYS.iter().copied())
        .field_keys(["recommend_ad"])
        .item_keywords(URL_KEYWORDS.iter().copied())
        .envelope_arrays(["ads", "advertisements", "banners", "promotions"])
        .html(HtmlPattern::DivClass("splash".into()))
        .html(HtmlPattern::DivId("splash".into()))
        .html(HtmlPattern::DivClass("startup".into()))
        .html(HtmlPattern::DivClass("banner".into()))
        .html(HtmlPattern::DivId("banner".into()))
        .html(HtmlPattern::DivClass("popup".into()))
        .html(HtmlPattern::DivId("popup".into()))
        .html(HtmlPattern::DivClass("modal".into()))
        .html(HtmlPattern::DivClass("video-ad".into()))
        .html(HtmlPattern::DivId("video-ad".into()))
        .html(HtmlPattern::DivClass("player-ad".into()))
        .html(HtmlPattern::DivClass("recommend-ad".into()))
        .html(HtmlPattern::DivId("recommend-ad".into()))
        .html(HtmlPattern::DivClass("advertisement".into()))
        .html(HtmlPattern::DivClass("promotion".into()))
        .html(HtmlPattern::DivClass("sponsor".into()))
        .html(HtmlPattern::ScriptSrc("ad".into()))
        .html(HtmlPattern::ScriptBody("advertisement".into()))
        .html(HtmlPattern::ScriptBody("banner".into()))
        .html(HtmlPattern::ScriptBody("popup".into()));
}

/// All built-in profiles, in routing order
pub fn builtin_profiles() -> Vec<AppProfile> {
    vec![HEMADRAMA_PROFILE.clone(), HONGGUO_PROFILE.clone()]
}

/// Look up a built-in profile by name
pub fn builtin_profile(name: &str) -> Option<&'static AppProfile> {
    match name {
        HEMADRAMA => Some(&*HEMADRAMA_PROFILE),
        HONGGUO => Some(&*HONGGUO_PROFILE),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        assert_eq!(builtin_profile("hongguo").unwrap().name, HONGGUO);
        assert!(builtin_profile("unknown").is_none());
        assert_eq!(builtin_profiles().len(), 2);
    }

    #[test]
    fn test_hongguo_extends_shared_tables() {
        let hongguo = &*HONGGUO_PROFILE;
        assert_eq!(hongguo.endpoints.len(), SHARED_ENDPOINTS.len() + 2);
        assert!(hongguo.domains.iter().any(|d| d == "redfruit.com"));
        assert_eq!(hongguo.envelope_arrays.len(), 4);
    }

    #[test]
    fn test_hemadrama_items_skip_splash() {
        assert!(!HEMADRAMA_PROFILE.item_keywords.iter().any(|k| k == "splash"));
        assert!(HONGGUO_PROFILE.item_keywords.iter().any(|k| k == "splash"));
    }
}
