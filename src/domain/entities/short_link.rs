//! Short link entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A platform-managed short link.
///
/// `workspace_id` is `None` for links that are not owned by any workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortLink {
    pub id: i64,
    pub domain: String,
    pub key: String,
    pub url: String,
    pub workspace_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl ShortLink {
    /// Creates a new ShortLink instance.
    pub fn new(
        id: i64,
        domain: String,
        key: String,
        url: String,
        workspace_id: Option<i64>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            domain,
            key,
            url,
            workspace_id,
            created_at,
        }
    }

    /// Full short URL, e.g. `https://s.example.com/promo`.
    pub fn short_url(&self) -> String {
        format!("https://{}/{}", self.domain, self.key)
    }
}

/// Input data for creating a short link.
#[derive(Debug, Clone)]
pub struct NewShortLink {
    pub domain: String,
    pub key: String,
    pub url: String,
    pub workspace_id: Option<i64>,
}
