//! Database module for SQLite operations.
//!
//! This module provides:
//! - Database initialization and migrations
//! - SQLite pragma configuration
//! - A registry of named databases selectable per request
//! - Repository layer for reading prices and reward cycles

pub mod migrations;
pub mod registry;
pub mod repo;

pub use migrations::{init_db, open_existing};
pub use registry::{DatabaseError, Databases};
pub use repo::Repository;
