// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP client that sends every request through an interceptor chain

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use super::interceptor_trait::{AdRewriteInterceptor, InterceptAction, InterceptorChain};
use crate::engine::RewriteEngine;
use crate::error::{Error, Result};
use crate::http::{HttpClient, Request, Response};
use crate::rules::SanitizeReport;

/// How an exchange ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExchangeOutcome {
    /// Answered locally by an interceptor, never sent
    Mocked,
    /// Sent upstream and answered with this status
    Forwarded(u16),
    /// Aborted by an interceptor
    Aborted(String),
    /// Upstream request failed
    Failed(String),
}

/// One request/response pair seen by the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exchange {
    pub id: u64,
    pub method: String,
    pub url: String,
    pub outcome: ExchangeOutcome,
    /// Body size handed back to the caller
    pub body_len: usize,
    pub duration_ms: u64,
    /// What the chain stripped from the upstream response; `None` when the
    /// request never reached upstream or no stage rewrote the response
    pub report: Option<SanitizeReport>,
}

impl Exchange {
    /// Whether the request was answered without reaching upstream
    pub fn is_blocked(&self) -> bool {
        matches!(self.outcome, ExchangeOutcome::Mocked | ExchangeOutcome::Aborted(_))
    }
}

/// HTTP client with ad rewriting applied on both sides of the exchange
pub struct RewritingClient {
    client: HttpClient,
    chain: InterceptorChain,
    /// Most recent exchanges, oldest first
    exchanges: RwLock<VecDeque<Exchange>>,
    next_id: AtomicU64,
    max_exchanges: usize,
}

impl RewritingClient {
    /// Create a client with an explicit chain
    pub fn new(client: HttpClient, chain: InterceptorChain) -> Self {
        Self {
            client,
            chain,
            exchanges: RwLock::new(VecDeque::new()),
            next_id: AtomicU64::new(1),
            max_exchanges: 1000,
        }
    }

    /// Create a client whose chain holds just the ad rewriter
    pub fn with_engine(client: HttpClient, engine: Arc<RewriteEngine>) -> Self {
        let mut chain = InterceptorChain::new();
        chain.add(AdRewriteInterceptor::new(engine));
        Self::new(client, chain)
    }

    /// Cap the exchange log; older entries are dropped first
    pub fn max_exchanges(mut self, max: usize) -> Self {
        self.max_exchanges = max;
        self
    }

    /// Send a request through the chain
    ///
    /// Ad requests are answered by the chain with a synthetic response and
    /// never leave the process; everything else is fetched and then passed
    /// back through the chain for sanitizing.
    pub async fn execute(&self, mut request: Request) -> Result<Response> {
        let start = Instant::now();
        let id = self.next_id();
        let method = request.method.to_string();

        let action = self.chain.process_request(&mut request).await;
        let url = request.url.to_string();

        let result = match action {
            InterceptAction::MockResponse(response) => {
                Ok((response, ExchangeOutcome::Mocked, None))
            }
            InterceptAction::Abort(reason) => Err((
                Error::network(format!("Request aborted: {}", reason)),
                ExchangeOutcome::Aborted(reason),
            )),
            InterceptAction::Continue => match self.client.execute(request.clone()).await {
                Ok(mut response) => match self.chain.process_response(&request, &mut response).await {
                    Ok(report) => {
                        let status = response.status_code();
                        Ok((response, ExchangeOutcome::Forwarded(status), report))
                    }
                    Err(e) => {
                        let msg = e.to_string();
                        Err((e, ExchangeOutcome::Failed(msg)))
                    }
                },
                Err(e) => {
                    let msg = e.to_string();
                    Err((e, ExchangeOutcome::Failed(msg)))
                }
            },
        };

        let duration_ms = start.elapsed().as_millis() as u64;
        match result {
            Ok((response, outcome, report)) => {
                self.store(Exchange {
                    id,
                    method,
                    url,
                    outcome,
                    body_len: response.body_len(),
                    duration_ms,
                    report,
                });
                Ok(response)
            }
            Err((err, outcome)) => {
                tracing::warn!(url = %url, error = %err, "Exchange failed");
                self.store(Exchange {
                    id,
                    method,
                    url,
                    outcome,
                    body_len: 0,
                    duration_ms,
                    report: None,
                });
                Err(err)
            }
        }
    }

    /// Execute a GET request
    pub async fn get(&self, url: &str) -> Result<Response> {
        self.execute(Request::get(url)?).await
    }

    /// Execute several requests concurrently
    pub async fn execute_all(&self, requests: Vec<Request>) -> Vec<Result<Response>> {
        let futures: Vec<_> = requests.into_iter().map(|r| self.execute(r)).collect();
        futures::future::join_all(futures).await
    }

    /// Recorded exchanges, oldest first
    pub fn exchanges(&self) -> Vec<Exchange> {
        self.exchanges.read().iter().cloned().collect()
    }

    /// Exchanges answered without going upstream
    pub fn blocked(&self) -> Vec<Exchange> {
        self.exchanges
            .read()
            .iter()
            .filter(|e| e.is_blocked())
            .cloned()
            .collect()
    }

    /// Exchange log as a JSON array
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&*self.exchanges.read())
    }

    /// The upstream client
    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    fn store(&self, exchange: Exchange) {
        let mut exchanges = self.exchanges.write();
        while exchanges.len() >= self.max_exchanges.max(1) {
            exchanges.pop_front();
        }
        exchanges.push_back(exchange);
    }
}
