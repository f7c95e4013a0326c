// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Interceptor middleware
//!
//! Every exchange runs through an ordered list of interceptors, modeled on
//! the CDP Fetch domain: each may answer a request itself, abort it, or
//! rewrite the response on the way back. The ad rules are one interceptor.

use std::cmp::Reverse;
use std::sync::Arc;

use async_trait::async_trait;

use crate::engine::RewriteEngine;
use crate::error::Result;
use crate::http::{Request, Response};
use crate::rules::{RequestOutcome, SanitizeReport};

/// One stage of an [`InterceptorChain`]
///
/// All hooks default to pass-through.
///
/// # Example
///
/// ```rust,no_run
/// use adrewrite::network::{RequestInterceptor, InterceptAction};
/// use adrewrite::http::Request;
/// use async_trait::async_trait;
///
/// struct DenyTracking;
///
/// #[async_trait]
/// impl RequestInterceptor for DenyTracking {
///     async fn before_request(&self, req: &mut Request) -> InterceptAction {
///         if req.url_str().contains("/track") {
///             return InterceptAction::Abort("tracking".into());
///         }
///         InterceptAction::Continue
///     }
/// }
/// ```
#[async_trait]
pub trait RequestInterceptor: Send + Sync {
    /// Inspect or rewrite an outgoing request, or settle it here
    async fn before_request(&self, _request: &mut Request) -> InterceptAction {
        InterceptAction::Continue
    }

    /// Inspect or rewrite the upstream response
    ///
    /// Stages that strip content return what they removed. Not called for
    /// requests settled in [`before_request`](Self::before_request).
    async fn after_response(
        &self,
        _request: &Request,
        _response: &mut Response,
    ) -> Result<Option<SanitizeReport>> {
        Ok(None)
    }

    /// Skip this stage entirely for requests it has no business with
    fn should_intercept(&self, _request: &Request) -> bool {
        true
    }

    /// Stages run highest priority first
    fn priority(&self) -> i32 {
        0
    }
}

/// What a stage decided about an outgoing request
#[derive(Debug, Clone)]
pub enum InterceptAction {
    /// Hand the request to the next stage, then upstream
    Continue,
    /// Fail the exchange with this reason
    Abort(String),
    /// Answer locally; nothing is sent upstream
    MockResponse(Response),
}

/// Plugs a [`RewriteEngine`] into an interceptor chain
pub struct AdRewriteInterceptor {
    engine: Arc<RewriteEngine>,
}

impl AdRewriteInterceptor {
    /// Wrap a shared engine
    pub fn new(engine: Arc<RewriteEngine>) -> Self {
        Self { engine }
    }

    /// The wrapped engine
    pub fn engine(&self) -> &Arc<RewriteEngine> {
        &self.engine
    }
}

#[async_trait]
impl RequestInterceptor for AdRewriteInterceptor {
    fn should_intercept(&self, request: &Request) -> bool {
        self.engine.rule_for(request.url_str()).is_some()
    }

    async fn before_request(&self, request: &mut Request) -> InterceptAction {
        match self.engine.handle_request(request.clone()) {
            RequestOutcome::Respond(response) => InterceptAction::MockResponse(response),
            RequestOutcome::Forward(_) => InterceptAction::Continue,
        }
    }

    async fn after_response(
        &self,
        request: &Request,
        response: &mut Response,
    ) -> Result<Option<SanitizeReport>> {
        let (cleaned, report) = self.engine.handle_response(&request.url, response.clone());
        *response = cleaned;
        Ok(Some(report))
    }

    fn priority(&self) -> i32 {
        50
    }
}

/// Logs forwarded exchanges through `tracing`
///
/// Requests settled by an earlier stage never get here; blocked ad
/// requests are logged by the rule that blocked them.
#[derive(Debug, Default)]
pub struct TrafficLogger {
    /// Also log bodies at debug level
    pub log_bodies: bool,
    /// Only log URLs containing this
    pub url_filter: Option<String>,
}

#[async_trait]
impl RequestInterceptor for TrafficLogger {
    fn should_intercept(&self, request: &Request) -> bool {
        self.url_filter
            .as_deref()
            .map_or(true, |needle| request.url_str().contains(needle))
    }

    async fn before_request(&self, request: &mut Request) -> InterceptAction {
        tracing::info!(method = %request.method, url = %request.url, "-> request");
        InterceptAction::Continue
    }

    async fn after_response(
        &self,
        request: &Request,
        response: &mut Response,
    ) -> Result<Option<SanitizeReport>> {
        tracing::info!(
            url = %request.url,
            status = response.status_code(),
            bytes = response.body_len(),
            elapsed_ms = response.response_time_ms,
            "<- response"
        );
        if self.log_bodies {
            tracing::debug!(url = %request.url, body = %response.text_lossy(), "response body");
        }
        Ok(None)
    }

    fn priority(&self) -> i32 {
        // Last, so logged responses are already sanitized.
        i32::MIN
    }
}

/// Ordered interceptor stages
#[derive(Default)]
pub struct InterceptorChain {
    stages: Vec<Arc<dyn RequestInterceptor>>,
}

impl InterceptorChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<I: RequestInterceptor + 'static>(&mut self, interceptor: I) {
        self.add_shared(Arc::new(interceptor));
    }

    /// Add a stage the caller keeps a handle to
    pub fn add_shared(&mut self, interceptor: Arc<dyn RequestInterceptor>) {
        self.stages.push(interceptor);
        // Stable, so equal priorities keep insertion order.
        self.stages.sort_by_key(|stage| Reverse(stage.priority()));
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run the request hooks until one settles the request
    pub async fn process_request(&self, request: &mut Request) -> InterceptAction {
        for stage in &self.stages {
            if !stage.should_intercept(request) {
                continue;
            }
            let action = stage.before_request(request).await;
            if !matches!(action, InterceptAction::Continue) {
                return action;
            }
        }
        InterceptAction::Continue
    }

    /// Run every applicable response hook, stopping at the first error
    ///
    /// Returns the last sanitize report any stage produced.
    pub async fn process_response(
        &self,
        request: &Request,
        response: &mut Response,
    ) -> Result<Option<SanitizeReport>> {
        let mut report = None;
        for stage in self.stages.iter().filter(|s| s.should_intercept(request)) {
            if let Some(stage_report) = stage.after_response(request, response).await? {
                report = Some(stage_report);
            }
        }
        Ok(report)
    }
}
