//! Repository trait for partner embed widget data.

use crate::domain::entities::{EmbedToken, PartnerLink, Program};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for embed tokens, partner links, programs and earnings.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgEmbedRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmbedRepository: Send + Sync {
    /// Finds an embed token by its hash. Expired tokens are returned as well.
    async fn find_token(&self, token_hash: &str) -> Result<Option<EmbedToken>, AppError>;

    /// Stores a new token hash for a link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link does not exist.
    async fn create_token(
        &self,
        token_hash: &str,
        link_id: i64,
        expires_at: DateTime<Utc>,
    ) -> Result<EmbedToken, AppError>;

    /// Finds a partner link with its counters.
    async fn find_link(&self, link_id: i64) -> Result<Option<PartnerLink>, AppError>;

    /// Finds a program by ID.
    async fn find_program(&self, program_id: i64) -> Result<Option<Program>, AppError>;

    /// Sums commission earnings for a link, in minor units.
    async fn total_earnings(&self, link_id: i64) -> Result<i64, AppError>;
}
