//! Workspace entity and subscription plans.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Subscription tier of a workspace.
///
/// Only [`Plan::Free`] changes QR branding; every other tier is treated as paid.
/// Stored values are matched exactly: anything other than the lower-case tier
/// names, including `"Free"`, is preserved in [`Plan::Other`] and counts as paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Plan {
    Free,
    Pro,
    Business,
    Advanced,
    Enterprise,
    Other(String),
}

impl Plan {
    pub fn is_free(&self) -> bool {
        matches!(self, Plan::Free)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Plan::Free => "free",
            Plan::Pro => "pro",
            Plan::Business => "business",
            Plan::Advanced => "advanced",
            Plan::Enterprise => "enterprise",
            Plan::Other(name) => name,
        }
    }
}

impl From<String> for Plan {
    fn from(value: String) -> Self {
        match value.as_str() {
            "free" => Plan::Free,
            "pro" => Plan::Pro,
            "business" => Plan::Business,
            "advanced" => Plan::Advanced,
            "enterprise" => Plan::Enterprise,
            _ => Plan::Other(value),
        }
    }
}

impl From<Plan> for String {
    fn from(plan: Plan) -> Self {
        plan.as_str().to_string()
    }
}

impl FromStr for Plan {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Plan::from(s.to_string()))
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tenant owning short links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    pub id: i64,
    pub name: String,
    pub plan: Plan,
    /// Custom branding logo URL embedded in QR codes for paid plans.
    pub logo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Workspace {
    /// Creates a new Workspace instance.
    pub fn new(
        id: i64,
        name: String,
        plan: Plan,
        logo: Option<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            plan,
            logo,
            created_at,
            updated_at,
        }
    }
}

/// Input data for creating a workspace.
#[derive(Debug, Clone)]
pub struct NewWorkspace {
    pub name: String,
    pub plan: Plan,
    pub logo: Option<String>,
}

/// Partial update for a workspace.
///
/// `logo: Some(None)` clears the logo; `Some(Some(url))` sets it.
#[derive(Debug, Clone, Default)]
pub struct UpdateWorkspace {
    pub plan: Option<Plan>,
    pub logo: Option<Option<String>>,
}
