#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum_test::TestServer;
use chrono::{Duration, Utc};
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use link_qr::AppError;
use link_qr::api::middleware::rate_limit::RateLimitConfig;
use link_qr::application::services::{EmbedService, QrService};
use link_qr::domain::entities::{
    EmbedToken, NewShortLink, NewWorkspace, PartnerLink, Plan, Program, ShortLink,
    UpdateWorkspace, Workspace,
};
use link_qr::domain::repositories::{EmbedRepository, ShortLinkRepository, WorkspaceRepository};
use link_qr::infrastructure::cache::{CacheService, NullCache};
use link_qr::infrastructure::render::SvgQrRenderer;
use link_qr::state::AppState;

pub const PLATFORM_LOGO: &str = "https://assets.example.com/qr-logo.png";
pub const FREE_LOGO: &str = "https://cdn.example.com/free.png";
pub const PRO_LOGO: &str = "https://cdn.example.com/pro.png";
pub const CALLER_LOGO: &str = "https://cdn.example.com/caller.png";

pub const VALID_TOKEN: &str = "valid-token";
pub const EXPIRED_TOKEN: &str = "expired-token";
pub const NO_PROGRAM_TOKEN: &str = "no-program-token";
pub const DANGLING_TOKEN: &str = "dangling-token";

/// Short links in memory, keyed by `(domain, key)`.
pub struct InMemoryShortLinks {
    links: Mutex<Vec<ShortLink>>,
    pub healthy: bool,
}

impl InMemoryShortLinks {
    pub fn with(links: Vec<ShortLink>) -> Self {
        Self {
            links: Mutex::new(links),
            healthy: true,
        }
    }
}

#[async_trait]
impl ShortLinkRepository for InMemoryShortLinks {
    async fn find_by_domain_key(
        &self,
        domain: &str,
        key: &str,
    ) -> Result<Option<ShortLink>, AppError> {
        Ok(self
            .links
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.domain == domain && l.key == key)
            .cloned())
    }

    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        let mut links = self.links.lock().unwrap();
        let link = ShortLink::new(
            links.len() as i64 + 1,
            new_link.domain,
            new_link.key,
            new_link.url,
            new_link.workspace_id,
            Utc::now(),
        );
        links.push(link.clone());
        Ok(link)
    }

    async fn ping(&self) -> Result<(), AppError> {
        if self.healthy {
            Ok(())
        } else {
            Err(AppError::internal("Database error", json!({})))
        }
    }
}

/// Workspaces in memory.
#[derive(Default)]
pub struct InMemoryWorkspaces {
    workspaces: Mutex<HashMap<i64, Workspace>>,
}

impl InMemoryWorkspaces {
    pub fn with(workspaces: Vec<Workspace>) -> Self {
        Self {
            workspaces: Mutex::new(workspaces.into_iter().map(|w| (w.id, w)).collect()),
        }
    }
}

#[async_trait]
impl WorkspaceRepository for InMemoryWorkspaces {
    async fn find_by_id(&self, id: i64) -> Result<Option<Workspace>, AppError> {
        Ok(self.workspaces.lock().unwrap().get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Workspace>, AppError> {
        let mut all: Vec<_> = self.workspaces.lock().unwrap().values().cloned().collect();
        all.sort_by_key(|w| w.id);
        Ok(all)
    }

    async fn create(&self, new_workspace: NewWorkspace) -> Result<Workspace, AppError> {
        let mut workspaces = self.workspaces.lock().unwrap();
        let id = workspaces.keys().max().copied().unwrap_or(0) + 1;
        let workspace = Workspace::new(
            id,
            new_workspace.name,
            new_workspace.plan,
            new_workspace.logo,
            Utc::now(),
            Utc::now(),
        );
        workspaces.insert(id, workspace.clone());
        Ok(workspace)
    }

    async fn update(&self, id: i64, update: UpdateWorkspace) -> Result<Workspace, AppError> {
        let mut workspaces = self.workspaces.lock().unwrap();
        let workspace = workspaces
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("Workspace not found", json!({ "id": id })))?;
        if let Some(plan) = update.plan {
            workspace.plan = plan;
        }
        if let Some(logo) = update.logo {
            workspace.logo = logo;
        }
        Ok(workspace.clone())
    }
}

/// Embed data in memory. Tokens are stored by hash, like the real table.
#[derive(Default)]
pub struct InMemoryEmbeds {
    tokens: Mutex<HashMap<String, EmbedToken>>,
    links: HashMap<i64, PartnerLink>,
    programs: HashMap<i64, Program>,
    earnings: HashMap<i64, Vec<i64>>,
}

#[async_trait]
impl EmbedRepository for InMemoryEmbeds {
    async fn find_token(&self, token_hash: &str) -> Result<Option<EmbedToken>, AppError> {
        Ok(self.tokens.lock().unwrap().get(token_hash).cloned())
    }

    async fn create_token(
        &self,
        token_hash: &str,
        link_id: i64,
        expires_at: chrono::DateTime<Utc>,
    ) -> Result<EmbedToken, AppError> {
        if !self.links.contains_key(&link_id) {
            return Err(AppError::not_found("Link not found", json!({ "link_id": link_id })));
        }
        let token = EmbedToken {
            token_hash: token_hash.to_string(),
            link_id,
            expires_at,
            created_at: Utc::now(),
        };
        self.tokens
            .lock()
            .unwrap()
            .insert(token_hash.to_string(), token.clone());
        Ok(token)
    }

    async fn find_link(&self, link_id: i64) -> Result<Option<PartnerLink>, AppError> {
        Ok(self.links.get(&link_id).cloned())
    }

    async fn find_program(&self, program_id: i64) -> Result<Option<Program>, AppError> {
        Ok(self.programs.get(&program_id).cloned())
    }

    async fn total_earnings(&self, link_id: i64) -> Result<i64, AppError> {
        Ok(self
            .earnings
            .get(&link_id)
            .map(|e| e.iter().sum())
            .unwrap_or(0))
    }
}

fn workspace(id: i64, plan: Plan, logo: Option<&str>) -> Workspace {
    Workspace::new(
        id,
        format!("Workspace {id}"),
        plan,
        logo.map(str::to_string),
        Utc::now(),
        Utc::now(),
    )
}

fn link(id: i64, key: &str, workspace_id: Option<i64>) -> ShortLink {
    ShortLink::new(
        id,
        "s.example.com".to_string(),
        key.to_string(),
        format!("https://example.com/{key}"),
        workspace_id,
        Utc::now(),
    )
}

/// Links on `s.example.com`:
///
/// - `/free` - free workspace with a logo
/// - `/pro` - pro workspace with a logo
/// - `/pro-plain` - pro workspace without a logo
/// - `/orphan` - no workspace
/// - `/ghost` - workspace that no longer exists
pub fn seeded_links() -> InMemoryShortLinks {
    InMemoryShortLinks::with(vec![
        link(1, "free", Some(1)),
        link(2, "pro", Some(2)),
        link(3, "pro-plain", Some(3)),
        link(4, "orphan", None),
        link(5, "ghost", Some(99)),
    ])
}

pub fn seeded_workspaces() -> InMemoryWorkspaces {
    InMemoryWorkspaces::with(vec![
        workspace(1, Plan::Free, Some(FREE_LOGO)),
        workspace(2, Plan::Pro, Some(PRO_LOGO)),
        workspace(3, Plan::Business, None),
    ])
}

/// Partner link 10 (program 5, earnings 12345 + 655 cents), link 11 without
/// a program, and tokens for the usual cases.
pub fn seeded_embeds() -> InMemoryEmbeds {
    use link_qr::utils::token::hash_token;

    let partner = |id: i64, program_id: Option<i64>| PartnerLink {
        id,
        domain: "ref.example.com".to_string(),
        key: format!("partner-{id}"),
        url: "https://example.com".to_string(),
        program_id,
        clicks: 120,
        leads: 8,
        sales: 3,
    };
    let token = |raw: &str, link_id: i64, expires_in: Duration| {
        (
            hash_token(raw),
            EmbedToken {
                token_hash: hash_token(raw),
                link_id,
                expires_at: Utc::now() + expires_in,
                created_at: Utc::now(),
            },
        )
    };

    InMemoryEmbeds {
        tokens: Mutex::new(HashMap::from([
            token(VALID_TOKEN, 10, Duration::hours(1)),
            token(EXPIRED_TOKEN, 10, -Duration::hours(1)),
            token(NO_PROGRAM_TOKEN, 11, Duration::hours(1)),
            token(DANGLING_TOKEN, 404, Duration::hours(1)),
        ])),
        links: HashMap::from([(10, partner(10, Some(5))), (11, partner(11, None))]),
        programs: HashMap::from([(
            5,
            Program {
                id: 5,
                name: "Acme Partners".to_string(),
                logo: Some("https://cdn.example.com/acme.png".to_string()),
                reward_description: Some("30% recurring commission".to_string()),
                currency: "USD".to_string(),
            },
        )]),
        earnings: HashMap::from([(10, vec![12_345, 655])]),
    }
}

pub fn create_test_state_with(
    links: InMemoryShortLinks,
    workspaces: InMemoryWorkspaces,
    embeds: InMemoryEmbeds,
    cache: Arc<dyn CacheService>,
) -> AppState {
    let qr_service = QrService::new(
        Arc::new(links),
        Arc::new(workspaces),
        cache.clone(),
        Arc::new(SvgQrRenderer::new()),
        PLATFORM_LOGO.to_string(),
    );
    let embed_service = EmbedService::new(Arc::new(embeds));

    AppState::new(Arc::new(qr_service), Arc::new(embed_service), cache)
}

pub fn create_test_state() -> AppState {
    create_test_state_with(
        seeded_links(),
        seeded_workspaces(),
        seeded_embeds(),
        Arc::new(NullCache::new()),
    )
}

/// Rate limit keyed on `X-Forwarded-For`, so tests need no socket address.
pub fn test_limits(burst: u32) -> RateLimitConfig {
    RateLimitConfig {
        per_second: 1,
        burst,
        behind_proxy: true,
    }
}

pub fn qr_server(state: AppState, limits: &RateLimitConfig) -> TestServer {
    let app = Router::new()
        .nest("/api", link_qr::api::routes::qr_routes(limits))
        .with_state(state);

    TestServer::new(app).unwrap()
}
