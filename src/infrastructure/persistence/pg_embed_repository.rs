//! PostgreSQL implementation of embed repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{EmbedToken, PartnerLink, Program};
use crate::domain::repositories::EmbedRepository;
use crate::error::AppError;
use crate::utils::db_error::is_foreign_key_violation;

#[derive(sqlx::FromRow)]
struct EmbedTokenRow {
    token_hash: String,
    link_id: i64,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl From<EmbedTokenRow> for EmbedToken {
    fn from(r: EmbedTokenRow) -> Self {
        EmbedToken {
            token_hash: r.token_hash,
            link_id: r.link_id,
            expires_at: r.expires_at,
            created_at: r.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PartnerLinkRow {
    id: i64,
    domain: String,
    key: String,
    url: String,
    program_id: Option<i64>,
    clicks: i64,
    leads: i64,
    sales: i64,
}

impl From<PartnerLinkRow> for PartnerLink {
    fn from(r: PartnerLinkRow) -> Self {
        PartnerLink {
            id: r.id,
            domain: r.domain,
            key: r.key,
            url: r.url,
            program_id: r.program_id,
            clicks: r.clicks,
            leads: r.leads,
            sales: r.sales,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ProgramRow {
    id: i64,
    name: String,
    logo: Option<String>,
    reward_description: Option<String>,
    currency: String,
}

impl From<ProgramRow> for Program {
    fn from(r: ProgramRow) -> Self {
        Program {
            id: r.id,
            name: r.name,
            logo: r.logo,
            reward_description: r.reward_description,
            currency: r.currency,
        }
    }
}

/// PostgreSQL repository for embed widget data.
pub struct PgEmbedRepository {
    pool: Arc<PgPool>,
}

impl PgEmbedRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmbedRepository for PgEmbedRepository {
    async fn find_token(&self, token_hash: &str) -> Result<Option<EmbedToken>, AppError> {
        let row = sqlx::query_as::<_, EmbedTokenRow>(
            r#"
            SELECT token_hash, link_id, expires_at, created_at
            FROM embed_tokens
            WHERE token_hash = $1
            "#,
        )
        .bind(token_hash)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(EmbedToken::from))
    }

    async fn create_token(
        &self,
        token_hash: &str,
        link_id: i64,
        expires_at: DateTime<Utc>,
    ) -> Result<EmbedToken, AppError> {
        let result = sqlx::query_as::<_, EmbedTokenRow>(
            r#"
            INSERT INTO embed_tokens (token_hash, link_id, expires_at)
            VALUES ($1, $2, $3)
            RETURNING token_hash, link_id, expires_at, created_at
            "#,
        )
        .bind(token_hash)
        .bind(link_id)
        .bind(expires_at)
        .fetch_one(self.pool.as_ref())
        .await;

        match result {
            Ok(row) => Ok(row.into()),
            Err(e) if is_foreign_key_violation(&e) => Err(AppError::not_found(
                "Link not found",
                json!({ "link_id": link_id }),
            )),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_link(&self, link_id: i64) -> Result<Option<PartnerLink>, AppError> {
        let row = sqlx::query_as::<_, PartnerLinkRow>(
            r#"
            SELECT id, domain, "key", url, program_id, clicks, leads, sales
            FROM links
            WHERE id = $1
            "#,
        )
        .bind(link_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(PartnerLink::from))
    }

    async fn find_program(&self, program_id: i64) -> Result<Option<Program>, AppError> {
        let row = sqlx::query_as::<_, ProgramRow>(
            r#"
            SELECT id, name, logo, reward_description, currency
            FROM programs
            WHERE id = $1
            "#,
        )
        .bind(program_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Program::from))
    }

    async fn total_earnings(&self, link_id: i64) -> Result<i64, AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(earnings), 0)::BIGINT FROM commissions WHERE link_id = $1",
        )
        .bind(link_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(total)
    }
}
