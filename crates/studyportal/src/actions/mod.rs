//! Fetch actions: the load -> mutate -> clear unit of work.
//!
//! Every action sets the global loading flag, performs exactly one network
//! call, writes exactly one resource slice (or surfaces exactly one toast on
//! failure), and clears the loading flag last - unconditionally, via
//! [`LoadingGuard`]'s `Drop` impl, so the flag is false after the action
//! settles no matter how it exited.

pub mod assignments;
pub mod auth;
pub mod dashboard;
pub mod discussions;
pub mod grades;

use crate::error::PortalError;
use crate::state::PortalState;
use crate::store::NoticeKind;
use std::sync::Arc;
use tracing::error;

/// RAII guard for the session store's loading flag.
///
/// Construction sets `is_loading = true`; dropping clears it. Because the
/// clear lives in `Drop`, it runs on success, failure, and every `?` early
/// return in between.
pub(crate) struct LoadingGuard {
    state: Arc<PortalState>,
}

impl LoadingGuard {
    pub(crate) fn begin(state: &Arc<PortalState>) -> Self {
        state.session_mut().is_loading = true;
        Self {
            state: state.clone(),
        }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.state.session_mut().is_loading = false;
    }
}

/// Shared failure path: log, surface one toast, pass the error through.
///
/// Unauthorized errors skip the toast - the navigation guard owns that
/// teardown globally, not the screen that happened to trigger it.
pub(crate) fn fail(state: &Arc<PortalState>, action: &str, err: PortalError) -> PortalError {
    error!(action = action, error = %err, "Fetch action failed");
    if !err.needs_reauth() {
        state
            .session_mut()
            .show_toast(NoticeKind::Error, err.user_message());
    }
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PortalConfig;
    use crate::storage::MemoryTokenStore;

    fn test_state() -> Arc<PortalState> {
        PortalState::new(PortalConfig::default(), Arc::new(MemoryTokenStore::new())).unwrap()
    }

    #[test]
    fn loading_guard_clears_on_drop() {
        let state = test_state();
        {
            let _guard = LoadingGuard::begin(&state);
            assert!(state.session().is_loading);
        }
        assert!(!state.session().is_loading);
    }

    #[test]
    fn fail_writes_one_toast() {
        let state = test_state();
        let err = PortalError::Server {
            status: 500,
            message: "boom".into(),
        };
        fail(&state, "test", err);
        let session = state.session();
        assert_eq!(session.notice.as_ref().unwrap().message, "boom");
    }

    #[test]
    fn fail_skips_toast_for_unauthorized() {
        let state = test_state();
        fail(&state, "test", PortalError::Unauthorized);
        assert!(state.session().notice.is_none());
    }
}
