// Copyright (c) 2026 Bountyy Oy. All rights reserved.

use bytes::Bytes;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::StatusCode;
use url::Url;

use adrewrite::rules::HONGGUO_PROFILE;
use adrewrite::{AppRule, Response};

fn response(url: &str, content_type: &'static str, body: String) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert("content-type", HeaderValue::from_static(content_type));
    Response::new(
        StatusCode::OK,
        headers,
        Bytes::from(body),
        Url::parse(url).unwrap(),
    )
}

fn classify_benchmark(c: &mut Criterion) {
    let rule = AppRule::compile(&HONGGUO_PROFILE).unwrap();
    let urls = [
        "https://api.hongguo.com/api/feed?page=2",
        "https://api.hongguo.com/api/recommend/ad",
        "https://cdn.example.com/video/42.m3u8",
        "https://api.redfruit.com/static/banner.png",
    ];

    c.bench_function("classify_urls", |b| {
        b.iter(|| {
            for url in &urls {
                black_box(rule.is_ad_request(url));
            }
        })
    });
}

fn json_sanitize_benchmark(c: &mut Criterion) {
    let rule = AppRule::compile(&HONGGUO_PROFILE).unwrap();
    let items: Vec<String> = (0..200)
        .map(|i| {
            if i % 10 == 0 {
                format!(r#"{{"id":{},"type":"banner","img":"x.png"}}"#, i)
            } else {
                format!(r#"{{"id":{},"title":"Episode {}","duration":90}}"#, i, i)
            }
        })
        .collect();
    let body = format!(r#"{{"code":0,"ads":[1,2],"data":{{"list":[{}]}}}}"#, items.join(","));
    let original = response("https://api.hongguo.com/api/list", "application/json", body);

    c.bench_function("sanitize_json_feed", |b| {
        b.iter(|| black_box(rule.handle_response(&original)))
    });
}

fn html_sanitize_benchmark(c: &mut Criterion) {
    let rule = AppRule::compile(&HONGGUO_PROFILE).unwrap();
    let mut body = String::from("<html><body>");
    for i in 0..50 {
        body.push_str(&format!(r#"<div class="episode">Episode {}</div>"#, i));
        if i % 5 == 0 {
            body.push_str(r#"<div class="banner-slot">promo</div>"#);
            body.push_str(r#"<script>showPopup()</script>"#);
        }
    }
    body.push_str("</body></html>");
    let original = response("https://m.hongguo.com/", "text/html", body);

    c.bench_function("sanitize_html_page", |b| {
        b.iter(|| black_box(rule.handle_response(&original)))
    });
}

criterion_group!(
    benches,
    classify_benchmark,
    json_sanitize_benchmark,
    html_sanitize_benchmark
);
criterion_main!(benches);
