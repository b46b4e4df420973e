//! Repository trait for workspace data access.

use crate::domain::entities::{NewWorkspace, UpdateWorkspace, Workspace};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for workspaces.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgWorkspaceRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkspaceRepository: Send + Sync {
    /// Finds a workspace by its database ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Workspace>, AppError>;

    /// Lists all workspaces ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self) -> Result<Vec<Workspace>, AppError>;

    /// Creates a new workspace.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_workspace: NewWorkspace) -> Result<Workspace, AppError>;

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the workspace does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn update(&self, id: i64, update: UpdateWorkspace) -> Result<Workspace, AppError>;
}
