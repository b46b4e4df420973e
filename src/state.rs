//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{EmbedService, QrService};
use crate::infrastructure::cache::CacheService;

#[derive(Clone)]
pub struct AppState {
    pub qr_service: Arc<QrService>,
    pub embed_service: Arc<EmbedService>,
    pub cache: Arc<dyn CacheService>,
}

impl AppState {
    pub fn new(
        qr_service: Arc<QrService>,
        embed_service: Arc<EmbedService>,
        cache: Arc<dyn CacheService>,
    ) -> Self {
        Self {
            qr_service,
            embed_service,
            cache,
        }
    }
}
