pub mod dataset;
pub mod repositories;
