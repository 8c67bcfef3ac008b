//! Videos service library.
//!
//! Exposes the building blocks (config, error handling, models, routes, the
//! video service and its stores) so integration tests and the binary
//! entrypoint can both access them.

pub mod config;
pub mod error;
pub mod mapper;
pub mod models;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;
