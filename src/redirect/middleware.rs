//! Handler-chain integration.
//!
//! Any [`ChainHandler`] either answers a request itself or lets it continue
//! to the next handler. [`chain_middleware`] adapts one into an axum layer:
//!
//! ```ignore
//! let rule = Arc::new(GeoRedirect::new(config, resolver)?);
//! router.layer(middleware::from_fn_with_state(rule, chain_middleware::<GeoRedirect>));
//! ```

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::observability::metrics;
use crate::redirect::decision::{Decision, RequestContext};
use crate::redirect::response::redirect_response;
use crate::redirect::rule::GeoRedirect;

/// Result of offering a request to a [`ChainHandler`].
#[derive(Debug)]
pub enum Outcome {
    /// The chain ends with this response.
    Respond(Response<Body>),
    /// Hand the request, untouched, to the next handler.
    Forward,
}

/// A link in the request handler chain.
pub trait ChainHandler: Send + Sync + 'static {
    fn handle(&self, req: &Request<Body>) -> Outcome;
}

impl ChainHandler for GeoRedirect {
    fn handle(&self, req: &Request<Body>) -> Outcome {
        let _span = tracing::debug_span!("geo_redirect", rule = %self.name()).entered();
        let start = Instant::now();
        let ctx = RequestContext::from_request(req);
        let decision = self.evaluate(&ctx);

        if decision != Decision::PassThrough {
            tracing::debug!(
                method = %ctx.method,
                path = %ctx.path,
                decision = decision.as_str(),
                "Evaluated redirect rule"
            );
            metrics::record_decision(self.name(), decision.as_str(), start);
        }

        match decision {
            Decision::Redirect => {
                let response = redirect_response(self.destination(), &ctx.method, self.mode());
                Outcome::Respond(response)
            }
            Decision::PassThrough | Decision::Forward => Outcome::Forward,
        }
    }
}

/// Axum middleware running `H` in front of the rest of the chain.
pub async fn chain_middleware<H: ChainHandler>(
    State(handler): State<Arc<H>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    match handler.handle(&req) {
        Outcome::Respond(response) => response,
        Outcome::Forward => next.run(req).await,
    }
}
