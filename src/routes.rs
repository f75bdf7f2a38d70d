mod movies;

use crate::{
    interfaces::SimpleMessage,
    validators::{FieldViolation, ValidationError},
};
use rocket::{
    catch, catchers, get,
    http::Status,
    response::{self, Responder},
    routes,
    serde::json::Json,
    Build, Request, Rocket,
};
use serde::Serialize;
use thiserror::Error;

pub fn register_root(rocket: Rocket<Build>) -> Rocket<Build> {
    rocket
        .register("/", catchers![default])
        .mount("/", routes![index])
        .mount("/movies", movies::routes())
}

#[get("/")]
fn index() -> Json<SimpleMessage> {
    Json(SimpleMessage::new("hola mundo"))
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("movie not found")]
    MovieNotFound,
    #[error("invalid movie: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Serialize)]
struct ValidationErrorBody {
    pub error: Vec<FieldViolation>,
}

impl<'r, 'o: 'r> Responder<'r, 'o> for ApiError {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'o> {
        match self {
            ApiError::MovieNotFound => (
                Status::NotFound,
                Json(SimpleMessage::new("Movie not found")),
            )
                .respond_to(req),
            ApiError::Validation(err) => (
                Status::BadRequest,
                Json(ValidationErrorBody {
                    error: err.violations,
                }),
            )
                .respond_to(req),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    pub status: u16,
    pub message: Option<&'a str>,
}

#[catch(default)]
fn default(status: Status, _req: &Request) -> Json<ErrorBody<'static>> {
    Json(ErrorBody {
        status: status.code,
        message: status.reason(),
    })
}
