//! PostgreSQL implementation of workspace repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewWorkspace, Plan, UpdateWorkspace, Workspace};
use crate::domain::repositories::WorkspaceRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct WorkspaceRow {
    id: i64,
    name: String,
    plan: String,
    logo: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<WorkspaceRow> for Workspace {
    fn from(r: WorkspaceRow) -> Self {
        Workspace::new(
            r.id,
            r.name,
            Plan::from(r.plan),
            r.logo,
            r.created_at,
            r.updated_at,
        )
    }
}

/// PostgreSQL repository for workspaces.
pub struct PgWorkspaceRepository {
    pool: Arc<PgPool>,
}

impl PgWorkspaceRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkspaceRepository for PgWorkspaceRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Workspace>, AppError> {
        let row = sqlx::query_as::<_, WorkspaceRow>(
            r#"
            SELECT id, name, plan, logo, created_at, updated_at
            FROM workspaces
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Workspace::from))
    }

    async fn list(&self) -> Result<Vec<Workspace>, AppError> {
        let rows = sqlx::query_as::<_, WorkspaceRow>(
            r#"
            SELECT id, name, plan, logo, created_at, updated_at
            FROM workspaces
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Workspace::from).collect())
    }

    async fn create(&self, new_workspace: NewWorkspace) -> Result<Workspace, AppError> {
        let row = sqlx::query_as::<_, WorkspaceRow>(
            r#"
            INSERT INTO workspaces (name, plan, logo)
            VALUES ($1, $2, $3)
            RETURNING id, name, plan, logo, created_at, updated_at
            "#,
        )
        .bind(&new_workspace.name)
        .bind(new_workspace.plan.as_str())
        .bind(&new_workspace.logo)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn update(&self, id: i64, update: UpdateWorkspace) -> Result<Workspace, AppError> {
        let set_logo = update.logo.is_some();
        let logo = update.logo.flatten();
        let plan = update.plan.map(String::from);

        let row = sqlx::query_as::<_, WorkspaceRow>(
            r#"
            UPDATE workspaces
            SET plan = COALESCE($2, plan),
                logo = CASE WHEN $3 THEN $4 ELSE logo END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, plan, logo, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(plan)
        .bind(set_logo)
        .bind(logo)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Workspace::from)
            .ok_or_else(|| AppError::not_found("Workspace not found", json!({ "id": id })))
    }
}
