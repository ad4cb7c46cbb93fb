//! Router state: the service wiring plus the configuration it was built from

use std::{fmt, sync::Arc};

use sanskaar_common::{AppConfig, JwtService};
use sanskaar_service::ServiceContext;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

struct Inner {
    services: ServiceContext,
    config: AppConfig,
}

impl AppState {
    pub fn new(services: ServiceContext, config: AppConfig) -> Self {
        Self {
            inner: Arc::new(Inner { services, config }),
        }
    }

    pub fn service_context(&self) -> &ServiceContext {
        &self.inner.services
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Verifier used by the `AuthUser` extractor
    pub fn jwt_service(&self) -> &JwtService {
        self.inner.services.jwt_service()
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("services", &self.inner.services)
            .field("env", &self.inner.config.app.env)
            .finish_non_exhaustive()
    }
}
