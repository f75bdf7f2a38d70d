use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory movie collection. Insertion order is the listing order.
#[derive(Clone)]
pub struct MovieRepository {
    movies: Arc<RwLock<Vec<entities::MovieEntity>>>,
}

impl MovieRepository {
    pub fn new(movies: Vec<entities::MovieEntity>) -> Self {
        Self {
            movies: Arc::new(RwLock::new(movies)),
        }
    }

    pub async fn count(&self) -> usize {
        self.movies.read().await.len()
    }

    pub async fn list(&self) -> Vec<entities::MovieEntity> {
        self.movies.read().await.clone()
    }

    pub async fn list_by_genre(&self, genre: &str) -> Vec<entities::MovieEntity> {
        self.movies
            .read()
            .await
            .iter()
            .filter(|movie| movie.genre.iter().any(|g| g.matches_ignore_case(genre)))
            .cloned()
            .collect()
    }

    pub async fn find_one_by_id(&self, movie_id: Uuid) -> Option<entities::MovieEntity> {
        self.movies
            .read()
            .await
            .iter()
            .find(|movie| movie.id == movie_id)
            .cloned()
    }

    /// Appends a new movie under a freshly generated v4 id. Ids are not checked for collisions.
    pub async fn create_one(
        &self,
        movie: entities::MovieEntityForCreation,
    ) -> entities::MovieEntity {
        let movie = entities::MovieEntity::from((Uuid::new_v4(), movie));
        self.movies.write().await.push(movie.clone());

        movie
    }

    pub async fn update_one(
        &self,
        movie: entities::MovieEntityForUpdate,
    ) -> Option<entities::MovieEntity> {
        let mut movies = self.movies.write().await;
        let existing = movies.iter_mut().find(|existing| existing.id == movie.id)?;

        existing.merge(movie);

        Some(existing.clone())
    }

    /// Removes the first movie with the given id. Returns `false` when there was none.
    pub async fn delete_one(&self, movie_id: Uuid) -> bool {
        let mut movies = self.movies.write().await;

        match movies.iter().position(|movie| movie.id == movie_id) {
            Some(index) => {
                movies.remove(index);
                true
            }
            None => false,
        }
    }
}

pub mod entities {
    use crate::interfaces::movies::Genre;
    use serde::{Deserialize, Serialize};
    use uuid::Uuid;

    #[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
    pub struct MovieEntity {
        pub id: Uuid,
        pub title: String,
        pub genre: Vec<Genre>,
        pub year: u16,
        pub director: String,
        pub duration: u32,
        pub rate: f64,
        pub poster: String,
    }

    impl MovieEntity {
        /// Shallow overwrite: every field present in the update replaces the stored one.
        pub fn merge(&mut self, update: MovieEntityForUpdate) {
            if let Some(title) = update.title {
                self.title = title;
            }
            if let Some(genre) = update.genre {
                self.genre = genre;
            }
            if let Some(year) = update.year {
                self.year = year;
            }
            if let Some(director) = update.director {
                self.director = director;
            }
            if let Some(duration) = update.duration {
                self.duration = duration;
            }
            if let Some(rate) = update.rate {
                self.rate = rate;
            }
            if let Some(poster) = update.poster {
                self.poster = poster;
            }
        }
    }

    impl From<(Uuid, MovieEntityForCreation)> for MovieEntity {
        fn from((id, movie): (Uuid, MovieEntityForCreation)) -> Self {
            Self {
                id,
                title: movie.title,
                genre: movie.genre,
                year: movie.year,
                director: movie.director,
                duration: movie.duration,
                rate: movie.rate,
                poster: movie.poster,
            }
        }
    }

    #[derive(Serialize, Deserialize, Debug, Clone)]
    pub struct MovieEntityForCreation {
        pub title: String,
        pub genre: Vec<Genre>,
        pub year: u16,
        pub director: String,
        pub duration: u32,
        pub rate: f64,
        pub poster: String,
    }

    #[derive(Serialize, Deserialize, Debug, Clone)]
    pub struct MovieEntityForUpdate {
        pub id: Uuid,
        pub title: Option<String>,
        pub genre: Option<Vec<Genre>>,
        pub year: Option<u16>,
        pub director: Option<String>,
        pub duration: Option<u32>,
        pub rate: Option<f64>,
        pub poster: Option<String>,
    }
}
