//! Database bootstrap
//!
//! Opens the SQLite pool and creates the songbook schema.

pub mod init;

pub use init::*;
