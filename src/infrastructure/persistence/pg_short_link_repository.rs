//! PostgreSQL implementation of short link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::ShortLinkRepository;
use crate::error::AppError;
use crate::utils::db_error::is_unique_violation;

#[derive(sqlx::FromRow)]
struct ShortLinkRow {
    id: i64,
    domain: String,
    key: String,
    url: String,
    workspace_id: Option<i64>,
    created_at: DateTime<Utc>,
}

impl From<ShortLinkRow> for ShortLink {
    fn from(r: ShortLinkRow) -> Self {
        ShortLink::new(r.id, r.domain, r.key, r.url, r.workspace_id, r.created_at)
    }
}

/// PostgreSQL repository for short link lookups.
pub struct PgShortLinkRepository {
    pool: Arc<PgPool>,
}

impl PgShortLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShortLinkRepository for PgShortLinkRepository {
    async fn find_by_domain_key(
        &self,
        domain: &str,
        key: &str,
    ) -> Result<Option<ShortLink>, AppError> {
        let row = sqlx::query_as::<_, ShortLinkRow>(
            r#"
            SELECT id, domain, "key", url, workspace_id, created_at
            FROM links
            WHERE domain = $1 AND "key" = $2
            "#,
        )
        .bind(domain)
        .bind(key)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(ShortLink::from))
    }

    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        let result = sqlx::query_as::<_, ShortLinkRow>(
            r#"
            INSERT INTO links (domain, "key", url, workspace_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, domain, "key", url, workspace_id, created_at
            "#,
        )
        .bind(&new_link.domain)
        .bind(&new_link.key)
        .bind(&new_link.url)
        .bind(new_link.workspace_id)
        .fetch_one(self.pool.as_ref())
        .await;

        match result {
            Ok(row) => Ok(row.into()),
            Err(e) if is_unique_violation(&e, "links_domain_key_unique") => {
                Err(AppError::bad_request(
                    "Short link already exists",
                    json!({ "domain": new_link.domain, "key": new_link.key }),
                ))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
