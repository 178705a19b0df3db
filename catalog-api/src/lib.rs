//! # Catalog API Server Library
//!
//! This library provides the HTTP layer of the product catalog service.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and the failure envelope
//! - `extract`: Request body extractor accepting JSON or form data
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
