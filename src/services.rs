pub mod cors_service;
pub mod movie_service;
