//! Grades fetch.

use super::{fail, LoadingGuard};
use crate::api;
use crate::error::PortalError;
use crate::models::Grade;
use crate::state::PortalState;
use reqwest::StatusCode;
use std::sync::Arc;

/// Fetches a subject's grades into the `grades` slice.
pub async fn fetch_grades(
    state: &Arc<PortalState>,
    subject_id: i64,
) -> Result<StatusCode, PortalError> {
    let _loading = LoadingGuard::begin(state);
    let ticket = state.resources_mut().grades.begin();
    match state
        .api
        .get_json::<Vec<Grade>>(&api::grades_path(subject_id))
        .await
    {
        Ok((status, grades)) => {
            state.resources_mut().grades.complete(ticket, grades);
            Ok(status)
        }
        Err(err) => Err(fail(state, "fetch_grades", err)),
    }
}
