use super::repositories::movie::entities::{MovieEntity, MovieEntityForCreation};
use crate::validators::{movie::validate_movie, ValidationError};
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

/// Seed data compiled into the binary, used when no dataset path is configured.
pub const BUNDLED_DATASET: &str = include_str!("../../data/movies.json");

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("failed to read dataset `{}`: {source:#?}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("dataset is not a json array of movies: {0:#?}")]
    Parse(#[from] serde_json::Error),

    #[error("movie #{index} has no valid `id`")]
    InvalidId { index: usize },

    #[error("movie #{index} is invalid: {source:#?}")]
    InvalidMovie {
        index: usize,
        source: ValidationError,
    },
}

pub struct Dataset {
    movies: Vec<MovieEntity>,
}

impl Dataset {
    pub fn load(path: Option<&Path>) -> Result<Self, DatasetError> {
        match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|source| DatasetError::Read {
                    path: path.to_owned(),
                    source,
                })?;
                Self::parse(&raw)
            }
            None => Self::parse(BUNDLED_DATASET),
        }
    }

    /// Every record must carry a uuid `id` and pass the same checks as a created movie.
    pub fn parse(raw: &str) -> Result<Self, DatasetError> {
        let records: Vec<Value> = serde_json::from_str(raw)?;
        let mut movies = Vec::with_capacity(records.len());

        for (index, record) in records.into_iter().enumerate() {
            let id = record
                .get("id")
                .and_then(Value::as_str)
                .and_then(|id| Uuid::parse_str(id).ok())
                .ok_or(DatasetError::InvalidId { index })?;
            let movie = validate_movie(&record)
                .map_err(|source| DatasetError::InvalidMovie { index, source })?;

            movies.push(MovieEntity::from((
                id,
                MovieEntityForCreation {
                    title: movie.title,
                    genre: movie.genre,
                    year: movie.year,
                    director: movie.director,
                    duration: movie.duration,
                    rate: movie.rate,
                    poster: movie.poster,
                },
            )));
        }

        Ok(Self { movies })
    }

    pub fn into_movies(self) -> Vec<MovieEntity> {
        self.movies
    }
}
