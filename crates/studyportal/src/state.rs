//! Shared application state.

use crate::api::ApiClient;
use crate::config::PortalConfig;
use crate::error::PortalError;
use crate::storage::TokenStore;
use crate::store::{ResourceStore, SessionState};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Central application state, injected into every action and screen.
///
/// Constructed once and shared as `Arc<PortalState>`. The stores are single
/// writer by convention: only the declared actions and the guard mutate them.
pub struct PortalState {
    pub config: PortalConfig,
    pub api: ApiClient,
    pub storage: Arc<dyn TokenStore>,
    session: RwLock<SessionState>,
    resources: RwLock<ResourceStore>,
}

impl PortalState {
    /// Wires up the state from configuration and a credential store.
    pub fn new(config: PortalConfig, storage: Arc<dyn TokenStore>) -> Result<Arc<Self>, PortalError> {
        config.validate()?;
        let api = ApiClient::new(&config, storage.clone())?;
        let resources = ResourceStore::new(config.drop_stale_responses);
        Ok(Arc::new(Self {
            config,
            api,
            storage,
            session: RwLock::new(SessionState::new()),
            resources: RwLock::new(resources),
        }))
    }

    pub fn session(&self) -> RwLockReadGuard<'_, SessionState> {
        self.session.read().expect("session store lock poisoned")
    }

    pub fn session_mut(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.session.write().expect("session store lock poisoned")
    }

    pub fn resources(&self) -> RwLockReadGuard<'_, ResourceStore> {
        self.resources.read().expect("resource store lock poisoned")
    }

    pub fn resources_mut(&self) -> RwLockWriteGuard<'_, ResourceStore> {
        self.resources.write().expect("resource store lock poisoned")
    }
}
