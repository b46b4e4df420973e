//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data access; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated via
//! `mockall` for unit tests, and `tests/common` carries in-memory versions for
//! the HTTP-level tests.
//!
//! # Available Repositories
//!
//! - [`ShortLinkRepository`] - Short link lookups
//! - [`WorkspaceRepository`] - Workspace plans and branding
//! - [`EmbedRepository`] - Embed tokens, partner links, programs, earnings

pub mod embed_repository;
pub mod short_link_repository;
pub mod workspace_repository;

pub use embed_repository::EmbedRepository;
pub use short_link_repository::ShortLinkRepository;
pub use workspace_repository::WorkspaceRepository;

#[cfg(test)]
pub use embed_repository::MockEmbedRepository;
#[cfg(test)]
pub use short_link_repository::MockShortLinkRepository;
#[cfg(test)]
pub use workspace_repository::MockWorkspaceRepository;
