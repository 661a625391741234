//! HTTP API exposing the dashboard panels as JSON

pub mod handlers;
pub mod routes;
pub mod server;
pub mod types;
pub mod view;

pub use server::build_app;
pub use server::serve_api;
