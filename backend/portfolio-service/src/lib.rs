//! Portfolio Service
//!
//! Backend for a portfolio site: admin-gated accounts with bearer-token
//! sessions, content sections (about, hero, service, blog) and video uploads
//! stored in S3-compatible object storage.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod security;
pub mod services;

// Public re-exports
pub use config::Config;
pub use error::{AppError, Result};
