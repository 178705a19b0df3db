//! # Catalog Shared Library
//!
//! This crate contains the data layer used by the catalog API server.
//!
//! ## Module Organization
//!
//! - `db`: Connection pool, connect-and-retry loop and migrations
//! - `models`: Database models and their queries
//! - `report`: Monthly revenue aggregation
//! - `generator`: Synthetic product records
//! - `store`: The `ProductStore` abstraction used by the HTTP handlers

pub mod db;
pub mod generator;
pub mod models;
pub mod report;
pub mod store;

/// Current version of the catalog shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
