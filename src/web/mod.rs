//! Server-rendered HTML pages.
//!
//! Uses Askama templates from `templates/`.
//!
//! # Modules
//!
//! - [`handlers`] - Template rendering handlers
//! - [`routes`] - Embed route configuration

pub mod handlers;
pub mod routes;
