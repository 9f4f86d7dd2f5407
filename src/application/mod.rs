pub mod coverage_service;

pub use coverage_service::*;
