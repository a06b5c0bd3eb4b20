//! Database pool setup and schema-version bookkeeping

pub mod init;
pub mod migrations;

pub use init::*;
pub use migrations::*;
