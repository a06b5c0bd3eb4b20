//! HTTP pieces shared by both services

pub mod health;

pub use health::health_routes;
