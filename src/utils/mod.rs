//! Helper functions shared across layers.
//!
//! - [`short_link_url`] - Lookup key extraction from a requested URL
//! - [`token`] - Embed token generation and hashing
//! - [`db_error`] - Database error classification

pub mod db_error;
pub mod short_link_url;
pub mod token;
