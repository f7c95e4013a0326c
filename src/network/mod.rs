// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request/response interception
//!
//! Runs the ad rules as middleware around outgoing HTTP requests.

mod interceptor;
mod interceptor_trait;

pub use interceptor::{Exchange, ExchangeOutcome, RewritingClient};
pub use interceptor_trait::{
    AdRewriteInterceptor, InterceptAction, InterceptorChain, RequestInterceptor, TrafficLogger,
};
