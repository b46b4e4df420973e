//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx with bound
//! parameters.
//!
//! # Repositories
//!
//! - [`PgShortLinkRepository`] - Short link lookups
//! - [`PgWorkspaceRepository`] - Workspace plans and branding
//! - [`PgEmbedRepository`] - Embed tokens, partner links, programs and earnings

pub mod pg_embed_repository;
pub mod pg_short_link_repository;
pub mod pg_workspace_repository;

pub use pg_embed_repository::PgEmbedRepository;
pub use pg_short_link_repository::PgShortLinkRepository;
pub use pg_workspace_repository::PgWorkspaceRepository;
