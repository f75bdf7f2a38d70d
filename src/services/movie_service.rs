use crate::{
    db::repositories::movie::{entities, MovieRepository},
    interfaces::movies,
};
use uuid::Uuid;

#[derive(Clone)]
pub struct MovieService {
    movie_repository: MovieRepository,
}

impl MovieService {
    pub fn new(movie_repository: MovieRepository) -> Self {
        Self { movie_repository }
    }

    pub async fn count_movies(&self) -> usize {
        self.movie_repository.count().await
    }

    /// Lists every movie, or only those tagged with `genre` (case-insensitive) when given.
    pub async fn list_movies(&self, genre: Option<&str>) -> Vec<movies::Movie> {
        let found = match genre {
            Some(genre) => self.movie_repository.list_by_genre(genre).await,
            None => self.movie_repository.list().await,
        };

        found.into_iter().map(movies::Movie::from).collect()
    }

    pub async fn get_movie(&self, movie_id: &str) -> Option<movies::Movie> {
        let movie_id = parse_movie_id(movie_id)?;
        let movie = self.movie_repository.find_one_by_id(movie_id).await?;

        Some(movie.into())
    }

    pub async fn create_movie(&self, movie: movies::CreatingMovie) -> movies::Movie {
        let movie = self
            .movie_repository
            .create_one(entities::MovieEntityForCreation {
                title: movie.title,
                genre: movie.genre,
                year: movie.year,
                director: movie.director,
                duration: movie.duration,
                rate: movie.rate,
                poster: movie.poster,
            })
            .await;

        movie.into()
    }

    pub async fn update_movie(
        &self,
        movie_id: &str,
        movie: movies::UpdatingMovie,
    ) -> Option<movies::Movie> {
        let movie_id = parse_movie_id(movie_id)?;
        let movie = self
            .movie_repository
            .update_one(entities::MovieEntityForUpdate {
                id: movie_id,
                title: movie.title,
                genre: movie.genre,
                year: movie.year,
                director: movie.director,
                duration: movie.duration,
                rate: movie.rate,
                poster: movie.poster,
            })
            .await?;

        Some(movie.into())
    }

    /// Returns `false` when no movie had the given id.
    pub async fn delete_movie(&self, movie_id: &str) -> bool {
        match parse_movie_id(movie_id) {
            Some(movie_id) => self.movie_repository.delete_one(movie_id).await,
            None => false,
        }
    }
}

/// Ids that are not uuids can never match a stored movie.
fn parse_movie_id(movie_id: &str) -> Option<Uuid> {
    Uuid::parse_str(movie_id).ok()
}

impl From<entities::MovieEntity> for movies::Movie {
    fn from(movie: entities::MovieEntity) -> Self {
        Self {
            id: movie.id,
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
