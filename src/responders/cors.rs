use crate::services::cors_service::{CorsDecision, ALLOWED_METHODS};
use rocket::{
    response::{self, Responder},
    Request,
};

/// Wraps a responder and attaches the CORS headers granted by a [`CorsDecision`].
pub struct Cors<R> {
    decision: CorsDecision,
    preflight: bool,
    inner: R,
}

impl<R> Cors<R> {
    pub fn new(decision: CorsDecision, inner: R) -> Self {
        Self {
            decision,
            preflight: false,
            inner,
        }
    }

    /// Same as [`Cors::new`], plus `Access-Control-Allow-Methods` when the origin is allowed.
    pub fn preflight(decision: CorsDecision, inner: R) -> Self {
        Self {
            decision,
            preflight: true,
            inner,
        }
    }
}

impl<'r, 'o: 'r, R: Responder<'r, 'o>> Responder<'r, 'o> for Cors<R> {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'o> {
        let mut response = self.inner.respond_to(req)?;

        if let Some(origin) = self.decision.allow_origin() {
            response.set_raw_header("Access-Control-Allow-Origin", origin.to_owned());
        }

        if self.preflight && self.decision.is_allowed() {
            response.set_raw_header("Access-Control-Allow-Methods", ALLOWED_METHODS);
        }

        Ok(response)
    }
}
