//! QR generation service.

use std::future::Future;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, error, warn};

use crate::domain::branding::{LinkOwnership, resolve_logo};
use crate::domain::entities::{QrParams, RenderRequest, ShortLink, Workspace};
use crate::domain::repositories::{ShortLinkRepository, WorkspaceRepository};
use crate::domain::{QrRenderer, RenderError, RenderedImage};
use crate::error::AppError;
use crate::infrastructure::cache::{CacheService, link_key, workspace_key};
use crate::utils::short_link_url::parse_short_link_key;

/// Service turning validated QR parameters into a branded image.
///
/// Looks up the short link and its workspace (cache-aside), resolves the
/// effective logo and hands the render request to the renderer.
pub struct QrService {
    links: Arc<dyn ShortLinkRepository>,
    workspaces: Arc<dyn WorkspaceRepository>,
    cache: Arc<dyn CacheService>,
    renderer: Arc<dyn QrRenderer>,
    platform_logo: String,
}

impl QrService {
    /// Creates a new QR service.
    ///
    /// # Arguments
    ///
    /// - `platform_logo` - logo enforced for unknown links and free workspaces
    pub fn new(
        links: Arc<dyn ShortLinkRepository>,
        workspaces: Arc<dyn WorkspaceRepository>,
        cache: Arc<dyn CacheService>,
        renderer: Arc<dyn QrRenderer>,
        platform_logo: String,
    ) -> Self {
        Self {
            links,
            workspaces,
            cache,
            renderer,
            platform_logo,
        }
    }

    /// Logo enforced when platform branding applies.
    pub fn platform_logo(&self) -> &str {
        &self.platform_logo
    }

    /// Generates a QR image for `params`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL does not fit in a QR code.
    /// Returns [`AppError::Internal`] on lookup or rendering failures.
    pub async fn generate(&self, params: QrParams) -> Result<RenderedImage, AppError> {
        let short_link = self.find_short_link(&params.url).await?;

        let workspace = match short_link.as_ref().and_then(|link| link.workspace_id) {
            Some(workspace_id) => self.find_workspace(workspace_id).await?,
            None => None,
        };

        let ownership = LinkOwnership::from_lookup(short_link.as_ref(), workspace.as_ref());
        let effective = resolve_logo(ownership, params.logo.as_deref(), params.hide_logo);
        let source = effective.source();
        let logo = effective.src(&self.platform_logo).map(str::to_string);

        debug!(url = %params.url, logo_source = source, "Resolved QR branding");
        metrics::counter!("qr_codes_generated_total", "logo" => source).increment(1);

        let value_len = params.url.len();
        let request = RenderRequest::new(params, logo.as_deref());

        self.renderer.render(&request).map_err(|e| match e {
            RenderError::DataTooLong => AppError::bad_request(
                "Data too long for a QR code",
                json!({ "length": value_len }),
            ),
            RenderError::Encoding(reason) => {
                error!("QR rendering failed: {}", reason);
                AppError::internal("Failed to render QR code", json!({}))
            }
        })
    }

    /// Resolves the short link behind `url`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn find_short_link(&self, url: &str) -> Result<Option<ShortLink>, AppError> {
        let Some(lookup) = parse_short_link_key(url) else {
            return Ok(None);
        };

        let links = self.links.clone();
        self.cached(link_key(&lookup.domain, &lookup.key), || async move {
            links.find_by_domain_key(&lookup.domain, &lookup.key).await
        })
        .await
    }

    /// Resolves a workspace by ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn find_workspace(&self, id: i64) -> Result<Option<Workspace>, AppError> {
        let workspaces = self.workspaces.clone();
        self.cached(workspace_key(id), || async move { workspaces.find_by_id(id).await })
            .await
    }

    /// Checks database connectivity.
    pub async fn check_database(&self) -> Result<(), AppError> {
        self.links.ping().await
    }

    /// Cache-aside lookup. Absent records are cached too.
    ///
    /// Cache errors and unreadable entries fall back to `load`; the cache write
    /// happens in the background.
    async fn cached<T, F, Fut>(&self, key: String, load: F) -> Result<Option<T>, AppError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Option<T>, AppError>>,
    {
        match self.cache.get(&key).await {
            Ok(Some(cached)) => match serde_json::from_str::<Option<T>>(&cached) {
                Ok(value) => {
                    debug!("Cache HIT for {}", key);
                    return Ok(value);
                }
                Err(e) => warn!("Discarding unreadable cache entry {}: {}", key, e),
            },
            Ok(None) => debug!("Cache MISS for {}", key),
            Err(e) => error!("Cache error: {}", e),
        }

        let value = load().await?;

        match serde_json::to_string(&value) {
            Ok(serialized) => {
                let cache = self.cache.clone();
                tokio::spawn(async move {
                    if let Err(e) = cache.set(&key, &serialized, None).await {
                        error!("Failed to cache {}: {}", key, e);
                    }
                });
            }
            Err(e) => warn!("Failed to serialize {} for cache: {}", key, e),
        }

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{ErrorCorrection, Plan};
    use crate::domain::repositories::{MockShortLinkRepository, MockWorkspaceRepository};
    use crate::domain::qr_renderer::MockQrRenderer;
    use crate::infrastructure::cache::{CacheResult, NullCache};
    use crate::infrastructure::render::SvgQrRenderer;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::Mutex;

    const PLATFORM_LOGO: &str = "https://assets.example.com/qr-logo.png";

    /// Cache pre-seeded with entries; writes are recorded.
    #[derive(Default)]
    struct MapCache {
        entries: Mutex<HashMap<String, String>>,
    }

    #[async_trait]
    impl CacheService for MapCache {
        async fn get(&self, key: &str) -> CacheResult<Option<String>> {
            Ok(self.entries.lock().unwrap().get(key).cloned())
        }

        async fn set(&self, key: &str, value: &str, _ttl: Option<u64>) -> CacheResult<()> {
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        async fn invalidate(&self, key: &str) -> CacheResult<()> {
            self.entries.lock().unwrap().remove(key);
            Ok(())
        }

        async fn health_check(&self) -> bool {
            true
        }
    }

    fn params(url: &str, logo: Option<&str>, hide_logo: bool) -> QrParams {
        QrParams {
            url: url.to_string(),
            logo: logo.map(str::to_string),
            size: 600,
            level: ErrorCorrection::L,
            fg_color: "#000000".to_string(),
            bg_color: "#FFFFFF".to_string(),
            margin: 2,
            hide_logo,
        }
    }

    fn link(workspace_id: Option<i64>) -> ShortLink {
        ShortLink::new(
            1,
            "s.example.com".to_string(),
            "abc".to_string(),
            "https://example.com".to_string(),
            workspace_id,
            Utc::now(),
        )
    }

    fn workspace(plan: Plan, logo: Option<&str>) -> Workspace {
        Workspace::new(
            10,
            "Acme".to_string(),
            plan,
            logo.map(str::to_string),
            Utc::now(),
            Utc::now(),
        )
    }

    fn service(
        links: MockShortLinkRepository,
        workspaces: MockWorkspaceRepository,
        cache: Arc<dyn CacheService>,
    ) -> QrService {
        QrService::new(
            Arc::new(links),
            Arc::new(workspaces),
            cache,
            Arc::new(SvgQrRenderer::new()),
            PLATFORM_LOGO.to_string(),
        )
    }

    fn body(image: RenderedImage) -> String {
        String::from_utf8(image.body).unwrap()
    }

    #[tokio::test]
    async fn test_unknown_link_uses_platform_logo() {
        let mut links = MockShortLinkRepository::new();
        links
            .expect_find_by_domain_key()
            .withf(|domain, key| domain == "s.example.com" && key == "nope")
            .times(1)
            .returning(|_, _| Ok(None));
        let workspaces = MockWorkspaceRepository::new();

        let svc = service(links, workspaces, Arc::new(NullCache::new()));
        let image = svc
            .generate(params("https://s.example.com/nope", Some("https://c.example.com/c.png"), false))
            .await
            .unwrap();

        let svg = body(image);
        assert!(svg.contains(PLATFORM_LOGO));
        assert!(!svg.contains("c.example.com"));
    }

    #[tokio::test]
    async fn test_non_link_url_skips_lookup() {
        let links = MockShortLinkRepository::new();
        let workspaces = MockWorkspaceRepository::new();

        let svc = service(links, workspaces, Arc::new(NullCache::new()));
        let image = svc
            .generate(params("https://example.com", None, true))
            .await
            .unwrap();

        assert!(body(image).contains(PLATFORM_LOGO));
    }

    #[tokio::test]
    async fn test_unowned_link_uses_platform_logo() {
        let mut links = MockShortLinkRepository::new();
        links
            .expect_find_by_domain_key()
            .times(1)
            .returning(|_, _| Ok(Some(link(None))));
        let workspaces = MockWorkspaceRepository::new();

        let svc = service(links, workspaces, Arc::new(NullCache::new()));
        let image = svc
            .generate(params("https://s.example.com/abc", None, false))
            .await
            .unwrap();

        assert!(body(image).contains(PLATFORM_LOGO));
    }

    #[tokio::test]
    async fn test_missing_workspace_uses_platform_logo() {
        let mut links = MockShortLinkRepository::new();
        links
            .expect_find_by_domain_key()
            .returning(|_, _| Ok(Some(link(Some(10)))));
        let mut workspaces = MockWorkspaceRepository::new();
        workspaces
            .expect_find_by_id()
            .withf(|id| *id == 10)
            .times(1)
            .returning(|_| Ok(None));

        let svc = service(links, workspaces, Arc::new(NullCache::new()));
        let image = svc
            .generate(params("https://s.example.com/abc", Some("https://c.example.com/c.png"), false))
            .await
            .unwrap();

        assert!(body(image).contains(PLATFORM_LOGO));
    }

    #[tokio::test]
    async fn test_free_workspace_uses_platform_logo() {
        let mut links = MockShortLinkRepository::new();
        links
            .expect_find_by_domain_key()
            .returning(|_, _| Ok(Some(link(Some(10)))));
        let mut workspaces = MockWorkspaceRepository::new();
        workspaces
            .expect_find_by_id()
            .returning(|_| Ok(Some(workspace(Plan::Free, Some("https://w.example.com/w.png")))));

        let svc = service(links, workspaces, Arc::new(NullCache::new()));
        let svg = body(
            svc.generate(params("https://s.example.com/abc", None, false))
                .await
                .unwrap(),
        );

        assert!(svg.contains(PLATFORM_LOGO));
        assert!(!svg.contains("w.example.com"));
    }

    #[tokio::test]
    async fn test_pro_workspace_logo() {
        let mut links = MockShortLinkRepository::new();
        links
            .expect_find_by_domain_key()
            .returning(|_, _| Ok(Some(link(Some(10)))));
        let mut workspaces = MockWorkspaceRepository::new();
        workspaces
            .expect_find_by_id()
            .returning(|_| Ok(Some(workspace(Plan::Pro, Some("https://w.example.com/w.png")))));

        let svc = service(links, workspaces, Arc::new(NullCache::new()));
        let svg = body(
            svc.generate(params("https://s.example.com/abc", None, false))
                .await
                .unwrap(),
        );

        assert!(svg.contains("https://w.example.com/w.png"));
    }

    #[tokio::test]
    async fn test_pro_workspace_hide_logo_renders_plain_code() {
        let mut links = MockShortLinkRepository::new();
        links
            .expect_find_by_domain_key()
            .returning(|_, _| Ok(Some(link(Some(10)))));
        let mut workspaces = MockWorkspaceRepository::new();
        workspaces
            .expect_find_by_id()
            .returning(|_| Ok(Some(workspace(Plan::Pro, Some("https://w.example.com/w.png")))));

        let svc = service(links, workspaces, Arc::new(NullCache::new()));
        let svg = body(
            svc.generate(params("https://s.example.com/abc", None, true))
                .await
                .unwrap(),
        );

        assert!(!svg.contains("<image"));
    }

    #[tokio::test]
    async fn test_cache_hit_skips_repositories() {
        let cache = Arc::new(MapCache::default());
        cache
            .set(
                &link_key("s.example.com", "abc"),
                &serde_json::to_string(&Some(link(Some(10)))).unwrap(),
                None,
            )
            .await
            .unwrap();
        cache
            .set(
                &workspace_key(10),
                &serde_json::to_string(&Some(workspace(Plan::Pro, Some("https://w.example.com/w.png"))))
                    .unwrap(),
                None,
            )
            .await
            .unwrap();

        // No expectations: any repository call would panic.
        let svc = service(
            MockShortLinkRepository::new(),
            MockWorkspaceRepository::new(),
            cache,
        );

        let svg = body(
            svc.generate(params("https://s.example.com/abc", None, false))
                .await
                .unwrap(),
        );

        assert!(svg.contains("https://w.example.com/w.png"));
    }

    #[tokio::test]
    async fn test_cached_negative_lookup() {
        let cache = Arc::new(MapCache::default());
        cache
            .set(&link_key("s.example.com", "gone"), "null", None)
            .await
            .unwrap();

        let svc = service(
            MockShortLinkRepository::new(),
            MockWorkspaceRepository::new(),
            cache,
        );

        let found = svc
            .find_short_link("https://s.example.com/gone")
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_cache_entry_falls_back_to_repository() {
        let cache = Arc::new(MapCache::default());
        cache.set(&workspace_key(10), "{not json", None).await.unwrap();

        let mut workspaces = MockWorkspaceRepository::new();
        workspaces
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(workspace(Plan::Pro, None))));

        let svc = service(MockShortLinkRepository::new(), workspaces, cache);

        let found = svc.find_workspace(10).await.unwrap();
        assert_eq!(found.unwrap().plan, Plan::Pro);
    }

    #[tokio::test]
    async fn test_lookup_error_propagates() {
        let mut links = MockShortLinkRepository::new();
        links
            .expect_find_by_domain_key()
            .returning(|_, _| Err(AppError::internal("Database error", json!({}))));

        let svc = service(links, MockWorkspaceRepository::new(), Arc::new(NullCache::new()));

        let result = svc
            .generate(params("https://s.example.com/abc", None, false))
            .await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_renderer_receives_quarter_size_logo() {
        let mut renderer = MockQrRenderer::new();
        renderer
            .expect_render()
            .withf(|request| {
                request
                    .image
                    .as_ref()
                    .is_some_and(|image| image.src == PLATFORM_LOGO && image.width == 150.0)
            })
            .times(1)
            .returning(|_| {
                Ok(RenderedImage {
                    content_type: "image/svg+xml",
                    body: b"<svg/>".to_vec(),
                })
            });

        let svc = QrService::new(
            Arc::new(MockShortLinkRepository::new()),
            Arc::new(MockWorkspaceRepository::new()),
            Arc::new(NullCache::new()),
            Arc::new(renderer),
            PLATFORM_LOGO.to_string(),
        );

        let image = svc
            .generate(params("https://example.com", None, false))
            .await
            .unwrap();
        assert_eq!(image.body, b"<svg/>");
    }

    #[tokio::test]
    async fn test_data_too_long_is_validation_error() {
        let svc = service(
            MockShortLinkRepository::new(),
            MockWorkspaceRepository::new(),
            Arc::new(NullCache::new()),
        );

        let result = svc.generate(params(&"a".repeat(4000), None, false)).await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }
}
