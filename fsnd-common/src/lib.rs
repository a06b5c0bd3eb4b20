//! # fsnd common library
//!
//! Shared code for the Fyyur and Trivia services:
//! - Error and result types
//! - Configuration resolution (CLI, environment, TOML, compiled defaults)
//! - SQLite pool initialisation and schema-version bookkeeping
//! - Logging bootstrap and the health route
//! - Unicode case-insensitive search matching

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod search;

pub use error::{Error, Result};
