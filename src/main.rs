#![forbid(unsafe_code)]

mod config;
mod db;
mod fairings;
mod guards;
mod interfaces;
mod responders;
mod routes;
mod services;
mod validators;

use config::AppConfig;
use db::{dataset::Dataset, repositories::movie::MovieRepository};
use fairings::launch_summary::LaunchSummary;
use rocket::{Build, Rocket};
use services::{cors_service::CorsService, movie_service::MovieService};

#[rocket::launch]
fn rocket() -> _ {
    let config = AppConfig::from_env().expect("failed to read configuration");
    let dataset =
        Dataset::load(config.dataset_path.as_deref()).expect("failed to load movie dataset");

    build(&config, dataset)
}

pub fn build(config: &AppConfig, dataset: Dataset) -> Rocket<Build> {
    let movie_service = MovieService::new(MovieRepository::new(dataset.into_movies()));
    let cors_service = CorsService::default();

    let rocket = rocket::custom(config.rocket_config())
        .attach(LaunchSummary::new(movie_service.clone()))
        .manage(movie_service)
        .manage(cors_service);
    let rocket = routes::register_root(rocket);

    #[allow(clippy::let_and_return)]
    rocket
}
