//! Wiring of storage, session, client and services.

use std::sync::Arc;

use jobboard_client::{
    AdminService, ApiClient, ApplicationService, AuthApi, ClientConfig, ClientResult, JobService,
    PageRequest, ProfileService,
};
use jobboard_session::{AuthManager, FileStorage, RouteGuard, SessionStorage, SessionStore};

use crate::config::AppConfig;

/// Everything a screen needs, built once at startup.
pub struct App {
    pub store: Arc<SessionStore>,
    pub auth: AuthManager,
    pub guard: RouteGuard,
    pub jobs: JobService,
    pub applications: ApplicationService,
    pub profile: ProfileService,
    pub admin: AdminService,
    page_size: u32,
}

impl App {
    /// Build the app on file storage and restore the persisted session.
    pub fn new(config: AppConfig) -> ClientResult<Self> {
        let storage = Arc::new(FileStorage::new(config.session_file));
        Self::with_storage(config.client, storage)
    }

    pub fn with_storage(
        config: ClientConfig,
        storage: Arc<dyn SessionStorage>,
    ) -> ClientResult<Self> {
        let page_size = config.page_size;
        let store = Arc::new(SessionStore::new(storage));
        let client = ApiClient::new(config, store.clone())?;

        let app = Self {
            auth: AuthManager::new(AuthApi::new(client.clone()), store.clone()),
            guard: RouteGuard::new(store.clone()),
            jobs: JobService::new(client.clone()),
            applications: ApplicationService::new(client.clone()),
            profile: ProfileService::new(client.clone()),
            admin: AdminService::new(client),
            store,
            page_size,
        };
        app.auth.restore_session();
        Ok(app)
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn page(&self, page: u32) -> PageRequest {
        PageRequest::new(page, self.page_size)
    }
}
