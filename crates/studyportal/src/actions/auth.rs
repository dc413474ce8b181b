//! Login and logout.

use super::{fail, LoadingGuard};
use crate::api::LOGIN_PATH;
use crate::error::PortalError;
use crate::models::{LoginRequest, LoginResponse};
use crate::state::PortalState;
use crate::storage::{TokenStore, ACCESS_TOKEN_KEY};
use reqwest::StatusCode;
use std::sync::Arc;
use tracing::info;

/// Logs the student in.
///
/// Empty fields are rejected locally before any network call. On success the
/// returned access token is persisted (overwriting any previous credential)
/// and the session flag is set; the status code goes back to the caller so
/// the view can navigate. On failure nothing is persisted and the session
/// stays unauthenticated.
pub async fn login(
    state: &Arc<PortalState>,
    email: &str,
    password: &str,
) -> Result<StatusCode, PortalError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(PortalError::Validation {
            message: "Please fill in all fields".to_string(),
        });
    }

    let _loading = LoadingGuard::begin(state);
    let body = LoginRequest {
        email: email.trim().to_string(),
        password: password.to_string(),
    };

    match state
        .api
        .post_json_unauthenticated::<LoginResponse, _>(LOGIN_PATH, &body)
        .await
    {
        Ok((status, payload)) => {
            state.storage.set(ACCESS_TOKEN_KEY, &payload.access)?;
            state.session_mut().is_authenticated = true;
            info!(status = status.as_u16(), "Login succeeded");
            Ok(status)
        }
        Err(err) => Err(fail(state, "login", err)),
    }
}

/// Logs the student out: removes the persisted credential and clears the
/// session flag. Purely local; the backend holds no session state.
pub fn logout(state: &Arc<PortalState>) -> Result<(), PortalError> {
    state.storage.remove(ACCESS_TOKEN_KEY)?;
    state.session_mut().is_authenticated = false;
    info!("Logged out");
    Ok(())
}
