//! Navigation guard: token-gated entry and global 401 teardown.
//!
//! State machine over {Checking, Unauthenticated, Authenticated}. At launch
//! it reads the persisted credential and decides the initial route; at any
//! later point an unauthorized signal from the transport layer tears the
//! session down and redirects to login, regardless of which screen caused it.

use crate::api::SessionEvent;
use crate::nav::{Navigator, Route};
use crate::state::PortalState;
use crate::storage::{TokenStore, ACCESS_TOKEN_KEY};
use crate::store::NoticeKind;
use std::sync::Arc;
use tracing::{info, warn};

/// Guard state. `Checking` exists only between launch and the credential
/// read; the machine re-enters it on process relaunch, never at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Checking,
    Unauthenticated,
    Authenticated,
}

impl GuardState {
    /// The initial view for this state.
    pub fn initial_route(self) -> Route {
        match self {
            GuardState::Authenticated => Route::Dashboard,
            _ => Route::Login,
        }
    }
}

/// Reads the persisted credential and decides the launch state.
///
/// A present, non-empty token proactively marks the session as logged in. A
/// storage failure surfaces a toast and fails closed to `Unauthenticated`.
pub fn decide_initial_state(state: &Arc<PortalState>) -> GuardState {
    match state.storage.get(ACCESS_TOKEN_KEY) {
        Ok(Some(token)) if !token.is_empty() => {
            state.session_mut().is_authenticated = true;
            info!("Persisted credential found, starting authenticated");
            GuardState::Authenticated
        }
        Ok(_) => {
            info!("No persisted credential, starting at login");
            GuardState::Unauthenticated
        }
        Err(err) => {
            warn!(error = %err, "Credential read failed, failing closed");
            state
                .session_mut()
                .show_toast(NoticeKind::Error, err.user_message());
            GuardState::Unauthenticated
        }
    }
}

/// Tears the session down after an unauthorized response: deletes the
/// persisted credential, clears the session flag, and replaces the current
/// view with the login view.
pub fn handle_unauthorized(state: &Arc<PortalState>, navigator: &dyn Navigator) {
    warn!("Unauthorized response, tearing session down");
    if let Err(err) = state.storage.remove(ACCESS_TOKEN_KEY) {
        // The redirect still happens; a stale credential only means the next
        // launch bounces through this path again.
        warn!(error = %err, "Failed to remove persisted credential");
    }
    state.session_mut().is_authenticated = false;
    navigator.replace(Route::Login);
}

/// Subscribes to transport session events and runs the teardown for every
/// unauthorized signal. Returns the spawned task's handle.
pub fn spawn_listener(
    state: Arc<PortalState>,
    navigator: Arc<dyn Navigator>,
) -> tokio::task::JoinHandle<()> {
    let mut events = state.api.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                SessionEvent::Unauthorized => handle_unauthorized(&state, navigator.as_ref()),
            }
        }
    })
}

/// Runs the login transition's navigation side: only a successful login
/// moves the machine to `Authenticated`.
pub fn after_login(navigator: &dyn Navigator) {
    navigator.replace(Route::Dashboard);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PortalConfig;
    use crate::nav::{NavCall, RecordingNavigator};
    use crate::storage::{MemoryTokenStore, TokenStore};

    fn state_with_store(store: MemoryTokenStore) -> Arc<PortalState> {
        PortalState::new(PortalConfig::default(), Arc::new(store)).unwrap()
    }

    #[test]
    fn no_credential_starts_unauthenticated() {
        let state = state_with_store(MemoryTokenStore::new());
        assert_eq!(decide_initial_state(&state), GuardState::Unauthenticated);
        assert!(!state.session().is_authenticated);
        assert_eq!(GuardState::Unauthenticated.initial_route(), Route::Login);
    }

    #[test]
    fn persisted_credential_starts_authenticated() {
        let store = MemoryTokenStore::new();
        store.set(ACCESS_TOKEN_KEY, "tok123").unwrap();
        let state = state_with_store(store);

        assert_eq!(decide_initial_state(&state), GuardState::Authenticated);
        assert!(state.session().is_authenticated);
        assert_eq!(GuardState::Authenticated.initial_route(), Route::Dashboard);
    }

    #[test]
    fn empty_credential_counts_as_absent() {
        let store = MemoryTokenStore::new();
        store.set(ACCESS_TOKEN_KEY, "").unwrap();
        let state = state_with_store(store);
        assert_eq!(decide_initial_state(&state), GuardState::Unauthenticated);
    }

    #[test]
    fn storage_failure_fails_closed_with_toast() {
        let state = state_with_store(MemoryTokenStore::failing());
        assert_eq!(decide_initial_state(&state), GuardState::Unauthenticated);
        assert!(state.session().notice.is_some());
    }

    #[test]
    fn successful_login_navigates_to_dashboard() {
        let navigator = RecordingNavigator::new();
        after_login(&navigator);
        assert_eq!(navigator.last(), Some(NavCall::Replace(Route::Dashboard)));
    }

    #[test]
    fn unauthorized_teardown_removes_credential_and_redirects() {
        let store = MemoryTokenStore::new();
        store.set(ACCESS_TOKEN_KEY, "tok123").unwrap();
        let state = state_with_store(store);
        state.session_mut().is_authenticated = true;
        let navigator = RecordingNavigator::new();

        handle_unauthorized(&state, &navigator);

        assert_eq!(state.storage.get(ACCESS_TOKEN_KEY).unwrap(), None);
        assert!(!state.session().is_authenticated);
        assert_eq!(navigator.last(), Some(NavCall::Replace(Route::Login)));
    }
}
