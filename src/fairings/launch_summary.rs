use crate::services::movie_service::MovieService;
use rocket::{
    async_trait,
    fairing::{Fairing, Info, Kind},
    Orbit, Rocket,
};

/// Logs the size of the loaded collection once the server is listening.
pub struct LaunchSummary {
    movie_service: MovieService,
}

impl LaunchSummary {
    pub fn new(movie_service: MovieService) -> Self {
        Self { movie_service }
    }
}

#[async_trait]
impl Fairing for LaunchSummary {
    fn info(&self) -> Info {
        Info {
            name: "launch-summary",
            kind: Kind::Liftoff,
        }
    }

    async fn on_liftoff(&self, rocket: &Rocket<Orbit>) {
        let movies = self.movie_service.count_movies().await;

        log::info!(
            "serving {movies} movies on http://localhost:{}",
            rocket.config().port
        );
    }
}
