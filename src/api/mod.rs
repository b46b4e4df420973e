//! REST API layer for HTTP request/response handling.
//!
//! # Modules
//!
//! - [`dto`] - Query and response types
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - CORS, rate limiting and tracing
//! - [`routes`] - Route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
