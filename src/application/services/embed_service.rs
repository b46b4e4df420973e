//! Partner embed widget service.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde_json::json;
use tracing::debug;

use crate::domain::entities::{EmbedToken, EmbedWidget};
use crate::domain::repositories::EmbedRepository;
use crate::error::AppError;
use crate::utils::token::{generate_token, hash_token};

/// Resolves embed tokens into widget data and issues new tokens.
pub struct EmbedService {
    repository: Arc<dyn EmbedRepository>,
}

impl EmbedService {
    pub fn new(repository: Arc<dyn EmbedRepository>) -> Self {
        Self { repository }
    }

    /// Loads the partner link, program and earnings behind a raw token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the token is unknown or expired, or if
    /// the link or its program no longer exists.
    pub async fn get_widget(&self, token: &str) -> Result<EmbedWidget, AppError> {
        let token_hash = hash_token(token);

        let embed_token = self
            .repository
            .find_token(&token_hash)
            .await?
            .filter(|t| !t.is_expired())
            .ok_or_else(|| AppError::not_found("Embed token not found or expired", json!({})))?;

        let link = self
            .repository
            .find_link(embed_token.link_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Link not found", json!({ "link_id": embed_token.link_id }))
            })?;

        let program_id = link.program_id.ok_or_else(|| {
            AppError::not_found("Link is not part of a program", json!({ "link_id": link.id }))
        })?;

        let program = self
            .repository
            .find_program(program_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Program not found", json!({ "program_id": program_id }))
            })?;

        let earnings = self.repository.total_earnings(link.id).await?;

        debug!(link_id = link.id, program_id, "Embed widget resolved");
        metrics::counter!("embed_widget_views_total").increment(1);

        Ok(EmbedWidget {
            link,
            program,
            earnings,
        })
    }

    /// Issues a new token for a link.
    ///
    /// Returns the raw token, which is not stored and cannot be recovered.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `ttl` is not positive.
    /// Returns [`AppError::NotFound`] if the link does not exist.
    pub async fn issue_token(
        &self,
        link_id: i64,
        ttl: Duration,
    ) -> Result<(String, EmbedToken), AppError> {
        if ttl <= Duration::zero() {
            return Err(AppError::bad_request(
                "Token lifetime must be positive",
                json!({ "ttl_seconds": ttl.num_seconds() }),
            ));
        }

        let token = generate_token();
        let stored = self
            .repository
            .create_token(&hash_token(&token), link_id, Utc::now() + ttl)
            .await?;

        Ok((token, stored))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{PartnerLink, Program};
    use crate::domain::repositories::MockEmbedRepository;
    use mockall::predicate::eq;

    fn token(expires_in: Duration) -> EmbedToken {
        EmbedToken {
            token_hash: hash_token("raw"),
            link_id: 7,
            expires_at: Utc::now() + expires_in,
            created_at: Utc::now(),
        }
    }

    fn partner_link(program_id: Option<i64>) -> PartnerLink {
        PartnerLink {
            id: 7,
            domain: "ref.example.com".to_string(),
            key: "alice".to_string(),
            url: "https://example.com".to_string(),
            program_id,
            clicks: 120,
            leads: 8,
            sales: 3,
        }
    }

    fn program() -> Program {
        Program {
            id: 2,
            name: "Acme Partners".to_string(),
            logo: None,
            reward_description: Some("30% recurring".to_string()),
            currency: "USD".to_string(),
        }
    }

    #[tokio::test]
    async fn test_get_widget_success() {
        let mut repo = MockEmbedRepository::new();
        repo.expect_find_token()
            .with(eq(hash_token("raw")))
            .times(1)
            .returning(|_| Ok(Some(token(Duration::hours(1)))));
        repo.expect_find_link()
            .with(eq(7))
            .returning(|_| Ok(Some(partner_link(Some(2)))));
        repo.expect_find_program()
            .with(eq(2))
            .returning(|_| Ok(Some(program())));
        repo.expect_total_earnings()
            .with(eq(7))
            .returning(|_| Ok(12_345));

        let service = EmbedService::new(Arc::new(repo));
        let widget = service.get_widget("raw").await.unwrap();

        assert_eq!(widget.link.key, "alice");
        assert_eq!(widget.program.name, "Acme Partners");
        assert_eq!(widget.earnings, 12_345);
    }

    #[tokio::test]
    async fn test_unknown_token() {
        let mut repo = MockEmbedRepository::new();
        repo.expect_find_token().returning(|_| Ok(None));

        let service = EmbedService::new(Arc::new(repo));
        let result = service.get_widget("nope").await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_expired_token() {
        let mut repo = MockEmbedRepository::new();
        repo.expect_find_token()
            .returning(|_| Ok(Some(token(-Duration::minutes(1)))));
        repo.expect_find_link().never();

        let service = EmbedService::new(Arc::new(repo));
        let result = service.get_widget("raw").await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_link_without_program() {
        let mut repo = MockEmbedRepository::new();
        repo.expect_find_token()
            .returning(|_| Ok(Some(token(Duration::hours(1)))));
        repo.expect_find_link()
            .returning(|_| Ok(Some(partner_link(None))));
        repo.expect_find_program().never();

        let service = EmbedService::new(Arc::new(repo));
        let result = service.get_widget("raw").await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_missing_program() {
        let mut repo = MockEmbedRepository::new();
        repo.expect_find_token()
            .returning(|_| Ok(Some(token(Duration::hours(1)))));
        repo.expect_find_link()
            .returning(|_| Ok(Some(partner_link(Some(2)))));
        repo.expect_find_program().returning(|_| Ok(None));

        let service = EmbedService::new(Arc::new(repo));
        let result = service.get_widget("raw").await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_issue_token_stores_hash() {
        let mut repo = MockEmbedRepository::new();
        repo.expect_create_token()
            .withf(|hash, link_id, expires_at| {
                hash.len() == 64 && *link_id == 7 && *expires_at > Utc::now()
            })
            .times(1)
            .returning(|hash, link_id, expires_at| {
                Ok(EmbedToken {
                    token_hash: hash.to_string(),
                    link_id,
                    expires_at,
                    created_at: Utc::now(),
                })
            });

        let service = EmbedService::new(Arc::new(repo));
        let (raw, stored) = service.issue_token(7, Duration::days(30)).await.unwrap();

        assert_eq!(stored.token_hash, hash_token(&raw));
        assert_ne!(stored.token_hash, raw);
    }

    #[tokio::test]
    async fn test_issue_token_rejects_non_positive_ttl() {
        let mut repo = MockEmbedRepository::new();
        repo.expect_create_token().never();

        let service = EmbedService::new(Arc::new(repo));
        let result = service.issue_token(7, Duration::zero()).await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }
}
