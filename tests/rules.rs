// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use adrewrite::rules::{HEMADRAMA_PROFILE, HONGGUO_PROFILE};
use adrewrite::{AppRule, Request, RequestOutcome, Response, SanitizeMode};
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::StatusCode;
use serde_json::{json, Value};
use url::Url;

fn hema() -> AppRule {
    AppRule::compile(&HEMADRAMA_PROFILE).unwrap()
}

fn hongguo() -> AppRule {
    AppRule::compile(&HONGGUO_PROFILE).unwrap()
}

fn response(url: &str, content_type: &str, body: &str) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert("content-type", HeaderValue::from_str(content_type).unwrap());
    headers.insert("x-request-id", HeaderValue::from_static("42"));
    Response::new(
        StatusCode::OK,
        headers,
        Bytes::from(body.to_string()),
        Url::parse(url).unwrap(),
    )
}

#[test]
fn urls_without_a_configured_domain_are_never_ads() {
    let rules = [hema(), hongguo()];
    let urls = [
        "https://example.com/api/advertisement",
        "https://cdn.video.net/ad/banner/popup.js",
        "https://api.other.com/api/splash?sponsor=1",
        "http://localhost/api/ad",
    ];

    for rule in &rules {
        for url in urls {
            assert!(!rule.is_ad_request(url), "{} flagged {}", rule.name(), url);
        }
    }
}

#[test]
fn domain_plus_keyword_is_always_an_ad() {
    let rule = hongguo();
    for domain in &HONGGUO_PROFILE.domains {
        for keyword in &HONGGUO_PROFILE.url_keywords {
            let url = format!("https://{}/v3/{}/list", domain, keyword);
            assert!(rule.is_ad_request(&url), "missed {}", url);
        }
    }
}

#[test]
fn top_level_ads_key_removed_other_keys_kept() {
    let rule = hema();
    let original = response(
        "https://api.hemadrama.com/api/feed",
        "application/json; charset=utf-8",
        r#"{"code":0,"ads":[{"id":1}],"data":{"title":"Episode 1","episodes":[1,2,3]}}"#,
    );

    let (cleaned, report) = rule.handle_response(&original);
    let body: Value = cleaned.json().unwrap();

    assert_eq!(
        body,
        json!({"code": 0, "data": {"title": "Episode 1", "episodes": [1, 2, 3]}})
    );
    assert_eq!(report.mode, SanitizeMode::Json);
    assert_eq!(report.removed_keys, 1);
    assert_eq!(cleaned.header("x-request-id"), Some("42"));
    assert_eq!(cleaned.status, StatusCode::OK);
}

#[test]
fn banner_div_removed_from_html() {
    let rule = hema();
    let original = response(
        "https://m.hemadrama.com/watch/1",
        "text/html",
        r#"<body><div class="banner">X</div><p>story</p></body>"#,
    );

    let (cleaned, report) = rule.handle_response(&original);
    let text = cleaned.text().unwrap();

    assert!(!text.contains(r#"<div class="banner">X</div>"#));
    assert_eq!(text, "<body><p>story</p></body>");
    assert_eq!(report.mode, SanitizeMode::Html);
}

#[test]
fn clean_json_is_unchanged() {
    let rule = hongguo();
    let input = r#"{"code":0,"message":"ok","data":{"list":[{"id":1,"title":"Rain"},{"id":2,"title":"Sun"}],"page":1}}"#;
    let original = response("https://api.hongguo.com/api/list", "application/json", input);

    let (cleaned, report) = rule.handle_response(&original);

    assert_eq!(cleaned.text().unwrap(), input);
    assert!(!report.changed());

    let (again, _) = rule.handle_response(&cleaned);
    assert_eq!(again, cleaned);
}

#[test]
fn non_ad_request_is_returned_unchanged() {
    let rule = hongguo();
    let request = Request::get("https://cdn.videos.example/stream/42.m3u8")
        .unwrap()
        .header("range", "bytes=0-");

    match rule.handle_request(request.clone()) {
        RequestOutcome::Forward(forwarded) => assert_eq!(forwarded, request),
        other => panic!("Expected Forward, got {:?}", other),
    }
}

#[test]
fn hongguo_envelope_has_all_arrays() {
    let request = Request::get("https://api.hongguo.com/api/recommend/ad").unwrap();
    let RequestOutcome::Respond(resp) = hongguo().handle_request(request) else {
        panic!("expected the request to be blocked");
    };

    assert_eq!(
        resp.text().unwrap(),
        r#"{"code":0,"message":"success","data":[],"ads":[],"advertisements":[],"banners":[],"promotions":[]}"#
    );
}

#[test]
fn ad_scripts_and_popups_removed() {
    let page = concat!(
        r#"<script src="https://cdn.x.com/AdLoader.js"></script>"#,
        r#"<script>window.showPopup()</script>"#,
        r#"<div id="recommend-ad-3">promo</div>"#,
        r#"<div class="modal">signup</div>"#,
        r#"<script>play()</script>"#
    );
    let original = response("https://m.hongguo.com/", "text/html; charset=utf-8", page);

    let (cleaned, report) = hongguo().handle_response(&original);

    assert_eq!(cleaned.text().unwrap(), "<script>play()</script>");
    assert_eq!(report.html_removals, 4);
}

#[test]
fn splash_items_differ_between_apps() {
    let body = r#"{"list":[{"type":"splash","id":1},{"type":"drama","id":2}]}"#;

    let (hema_out, _) = hema().handle_response(&response(
        "https://api.hemadrama.com/api/home",
        "application/json",
        body,
    ));
    let (hongguo_out, _) = hongguo().handle_response(&response(
        "https://api.hongguo.com/api/home",
        "application/json",
        body,
    ));

    assert_eq!(hema_out.json::<Value>().unwrap()["list"].as_array().unwrap().len(), 2);
    assert_eq!(
        hongguo_out.json::<Value>().unwrap(),
        json!({"list": [{"type": "drama", "id": 2}]})
    );
}
