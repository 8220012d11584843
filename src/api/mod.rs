//! HTTP surface of the planner.

pub mod routes;

pub use routes::{router, serve, AppState};
