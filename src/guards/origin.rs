use crate::services::cors_service::{CorsDecision, CorsService};
use rocket::{
    async_trait,
    http::Status,
    request::{FromRequest, Outcome, Request},
};

/// Resolves the request's `Origin` header against the managed [`CorsService`].
/// Never rejects a request; a refused origin only loses its CORS headers.
#[async_trait]
impl<'r> FromRequest<'r> for CorsDecision {
    type Error = ();

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let cors_service = match req.rocket().state::<CorsService>() {
            Some(cors_service) => cors_service,
            None => {
                log::error!("cors service is not managed");
                return Outcome::Error((Status::InternalServerError, ()));
            }
        };

        Outcome::Success(cors_service.decide(req.headers().get_one("Origin")))
    }
}
