//! Core domain entities.
//!
//! Entities are plain data structures; branding decisions live in
//! [`crate::domain::branding`].
//!
//! # Entity Types
//!
//! - [`ShortLink`] - A platform-managed short link
//! - [`Workspace`] - The tenant owning links, with its [`Plan`] and logo
//! - [`RenderRequest`] - Resolved input for the QR renderer
//! - [`EmbedToken`], [`PartnerLink`], [`Program`] - Partner embed widget data
//!
//! Creation inputs use separate `New*` structs, partial updates `Update*`.

pub mod embed;
pub mod render_request;
pub mod short_link;
pub mod workspace;

pub use embed::{EmbedToken, EmbedWidget, PartnerLink, Program};
pub use render_request::{ErrorCorrection, ImageSettings, QrParams, RenderRequest};
pub use short_link::{NewShortLink, ShortLink};
pub use workspace::{NewWorkspace, Plan, UpdateWorkspace, Workspace};
