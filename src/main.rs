// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! adrewrite CLI - try the ad rules against live or captured traffic

use std::env;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::StatusCode;
use url::Url;

use adrewrite::{
    EngineConfig, ExchangeOutcome, HttpClient, Request, RequestOutcome, Response, RewriteEngine,
    RewritingClient,
};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("adrewrite=info".parse().expect("static directive")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    match args[1].as_str() {
        "check" => {
            if args.len() < 3 {
                eprintln!("Usage: adrewrite check <url>");
                return ExitCode::from(1);
            }
            with_config(|config| check_url(config, &args[2]))
        }
        "sanitize" => {
            if args.len() < 4 {
                eprintln!("Usage: adrewrite sanitize <url> <file> [content-type]");
                return ExitCode::from(1);
            }
            let content_type = args.get(4).map(String::as_str).unwrap_or("application/json");
            with_config(|config| sanitize_file(config, &args[2], &args[3], content_type))
        }
        "fetch" => {
            if args.len() < 3 {
                eprintln!("Usage: adrewrite fetch <url>...");
                return ExitCode::from(1);
            }
            match EngineConfig::from_env() {
                Ok(config) => fetch_urls(config, &args[2..]).await,
                Err(e) => {
                    eprintln!("Failed to load config: {}", e);
                    ExitCode::from(1)
                }
            }
        }
        "profiles" => with_config(list_profiles),
        "--help" | "-h" | "help" => {
            print_usage();
            ExitCode::SUCCESS
        }
        "--version" | "-v" | "version" => {
            println!("adrewrite {}", adrewrite::VERSION);
            ExitCode::SUCCESS
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"adrewrite - Per-app ad-blocking rewrite rules

USAGE:
    adrewrite <COMMAND> [OPTIONS]

COMMANDS:
    check <url>                          Show which profile handles a URL and whether it is an ad request
    sanitize <url> <file> [content-type] Run the URL's response sanitizer over a captured body
    fetch <url>...                       Fetch URLs with the rules applied
    profiles                             List loaded profiles
    help                                 Show this help message
    version                              Show version information

ENVIRONMENT:
    ADREWRITE_CONFIG    Path to a JSON config file with extra profiles
    RUST_LOG            Log filter (default: adrewrite=info)

EXAMPLES:
    adrewrite check https://api.hongguo.com/api/ad/banner
    adrewrite sanitize https://api.hemadrama.com/api/advertisement/feed feed.json
    adrewrite sanitize https://m.hemadrama.com/ad/landing page.html text/html
    adrewrite fetch https://api.hemadrama.com/api/ad/splash
"#
    );
}

/// Run a synchronous command with the config-built engine
fn with_config<F>(run: F) -> ExitCode
where
    F: FnOnce(&EngineConfig) -> anyhow::Result<ExitCode>,
{
    let result = EngineConfig::from_env()
        .context("Failed to load config")
        .and_then(|config| run(&config));

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::from(1)
        }
    }
}

fn build_engine(config: &EngineConfig) -> anyhow::Result<RewriteEngine> {
    RewriteEngine::from_config(config).context("Failed to compile profiles")
}

fn check_url(config: &EngineConfig, url: &str) -> anyhow::Result<ExitCode> {
    let engine = build_engine(config)?;

    let Some(rule) = engine.rule_for(url) else {
        println!("No profile handles {}", url);
        return Ok(ExitCode::SUCCESS);
    };

    println!("Profile: {} ({})", rule.name(), rule.tag());
    println!("Activation match: {}", rule.is_activated_by(url));

    match rule.classifier().classify(url) {
        Some(ad) => {
            println!("[BLOCK] {}", ad);
            let request = Request::get(url).context("Invalid URL")?;
            if let RequestOutcome::Respond(resp) = rule.handle_request(request) {
                println!("Synthetic response: {} {}", resp.status, resp.text_lossy());
            }
            Ok(ExitCode::from(2))
        }
        None => {
            println!("[PASS] not an ad request");
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn sanitize_file(
    config: &EngineConfig,
    url: &str,
    path: &str,
    content_type: &str,
) -> anyhow::Result<ExitCode> {
    let engine = build_engine(config)?;
    let url = Url::parse(url).context("Invalid URL")?;
    let body = std::fs::read(path).with_context(|| format!("Failed to read {}", path))?;

    let mut headers = HeaderMap::new();
    headers.insert(
        "content-type",
        HeaderValue::from_str(content_type).context("Invalid content type")?,
    );
    let response = Response::new(StatusCode::OK, headers, Bytes::from(body), url.clone());

    let (cleaned, report) = engine.handle_response(&url, response);
    eprintln!(
        "mode={:?} removed_keys={} removed_items={} html_removals={}",
        report.mode, report.removed_keys, report.removed_items, report.html_removals
    );
    println!("{}", cleaned.text_lossy());

    Ok(ExitCode::SUCCESS)
}

fn list_profiles(config: &EngineConfig) -> anyhow::Result<ExitCode> {
    let engine = build_engine(config)?;

    println!("=== Profiles ({}) ===", engine.rules().len());
    for rule in engine.rules() {
        println!(
            "  - {} [{}] domains: {}",
            rule.name(),
            rule.tag(),
            rule.classifier().domains().join(", ")
        );
    }

    Ok(ExitCode::SUCCESS)
}

async fn fetch_urls(config: EngineConfig, urls: &[String]) -> ExitCode {
    let engine = match RewriteEngine::from_config(&config) {
        Ok(e) => Arc::new(e),
        Err(e) => {
            eprintln!("Failed to compile profiles: {}", e);
            return ExitCode::from(1);
        }
    };

    let http = match HttpClient::with_config(config.http.client_config()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create HTTP client: {}", e);
            return ExitCode::from(1);
        }
    };

    let mut requests = Vec::with_capacity(urls.len());
    for url in urls {
        match Request::get(url) {
            Ok(r) => requests.push(r),
            Err(e) => {
                eprintln!("Invalid URL {}: {}", url, e);
                return ExitCode::from(1);
            }
        }
    }

    let client = RewritingClient::with_engine(http, engine.clone());
    let results = client.execute_all(requests).await;

    println!("\n=== Exchanges ({}) ===", results.len());
    for exchange in client.exchanges() {
        let label = match &exchange.outcome {
            ExchangeOutcome::Mocked => "BLOCKED".to_string(),
            ExchangeOutcome::Forwarded(status) => status.to_string(),
            ExchangeOutcome::Aborted(reason) => format!("ABORTED ({})", reason),
            ExchangeOutcome::Failed(err) => format!("FAILED ({})", err),
        };
        println!(
            "  [{}] {} {} ({} bytes, {}ms)",
            label, exchange.method, exchange.url, exchange.body_len, exchange.duration_ms
        );
        if let Some(report) = &exchange.report {
            println!(
                "      sanitized: mode={:?} keys={} items={} html={}",
                report.mode, report.removed_keys, report.removed_items, report.html_removals
            );
        }
    }

    let stats = engine.stats();
    println!(
        "\nSummary: {} requests, {} blocked, {} responses cleaned ({} keys, {} items, {} HTML blocks)",
        stats.requests_seen,
        stats.requests_blocked,
        stats.responses_changed,
        stats.removed_keys,
        stats.removed_items,
        stats.html_removals
    );

    if results.iter().any(|r| r.is_err()) {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}
