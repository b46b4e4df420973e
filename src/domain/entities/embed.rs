//! Entities behind the partner embed widget.

use chrono::{DateTime, Utc};

/// A short-lived token granting read access to one partner link.
///
/// Only the SHA-256 hash of the token is stored.
#[derive(Debug, Clone)]
pub struct EmbedToken {
    pub token_hash: String,
    pub link_id: i64,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl EmbedToken {
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// Short link enrolled in a partner program, with its conversion counters.
#[derive(Debug, Clone)]
pub struct PartnerLink {
    pub id: i64,
    pub domain: String,
    pub key: String,
    pub url: String,
    pub program_id: Option<i64>,
    pub clicks: i64,
    pub leads: i64,
    pub sales: i64,
}

impl PartnerLink {
    pub fn short_url(&self) -> String {
        format!("https://{}/{}", self.domain, self.key)
    }
}

/// A partner program.
#[derive(Debug, Clone)]
pub struct Program {
    pub id: i64,
    pub name: String,
    pub logo: Option<String>,
    pub reward_description: Option<String>,
    /// ISO 4217 code, upper-case.
    pub currency: String,
}

/// Everything the widget page displays.
#[derive(Debug, Clone)]
pub struct EmbedWidget {
    pub link: PartnerLink,
    pub program: Program,
    /// Total earnings in minor units (cents).
    pub earnings: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_token_expiry() {
        let now = Utc::now();
        let expired = EmbedToken {
            token_hash: "h".to_string(),
            link_id: 1,
            expires_at: now - Duration::seconds(1),
            created_at: now - Duration::hours(1),
        };
        let valid = EmbedToken {
            expires_at: now + Duration::hours(1),
            ..expired.clone()
        };

        assert!(expired.is_expired());
        assert!(!valid.is_expired());
    }

    #[test]
    fn test_partner_short_url() {
        let link = PartnerLink {
            id: 3,
            domain: "ref.example.com".to_string(),
            key: "alice".to_string(),
            url: "https://example.com".to_string(),
            program_id: Some(1),
            clicks: 0,
            leads: 0,
            sales: 0,
        };

        assert_eq!(link.short_url(), "https://ref.example.com/alice");
    }
}
