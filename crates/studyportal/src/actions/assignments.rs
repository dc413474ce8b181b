//! Assignment list, detail (question batch) and submission.

use super::{fail, LoadingGuard};
use crate::api;
use crate::error::PortalError;
use crate::models::{AnswerEntry, Assignment, AssignmentDetail};
use crate::state::PortalState;
use reqwest::StatusCode;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// Fetches a subject's assignments into the `assignments` slice.
pub async fn fetch_assignments(
    state: &Arc<PortalState>,
    subject_id: i64,
) -> Result<StatusCode, PortalError> {
    let _loading = LoadingGuard::begin(state);
    let ticket = state.resources_mut().assignments.begin();
    match state
        .api
        .get_json::<Vec<Assignment>>(&api::assignments_path(subject_id))
        .await
    {
        Ok((status, assignments)) => {
            state
                .resources_mut()
                .assignments
                .complete(ticket, assignments);
            Ok(status)
        }
        Err(err) => Err(fail(state, "fetch_assignments", err)),
    }
}

/// Fetches one assignment with its question batch into the
/// `assignment_detail` slice.
pub async fn fetch_assignment(
    state: &Arc<PortalState>,
    assignment_id: i64,
) -> Result<StatusCode, PortalError> {
    let _loading = LoadingGuard::begin(state);
    let ticket = state.resources_mut().assignment_detail.begin();
    match state
        .api
        .get_json::<AssignmentDetail>(&api::assignment_path(assignment_id))
        .await
    {
        Ok((status, detail)) => {
            state
                .resources_mut()
                .assignment_detail
                .complete(ticket, detail);
            Ok(status)
        }
        Err(err) => Err(fail(state, "fetch_assignment", err)),
    }
}

/// Acknowledgement body of a submission; the portal only cares that it
/// parses.
#[derive(Debug, Deserialize)]
struct SubmitAck {
    #[serde(default)]
    #[allow(dead_code)]
    detail: Option<String>,
}

/// Submits the answered subset of an assignment's questions.
///
/// The payload carries only questions with a recorded answer; never retried
/// automatically - a failed submission is reported and left to the student.
pub async fn submit_answers(
    state: &Arc<PortalState>,
    assignment_id: i64,
    entries: &[AnswerEntry],
) -> Result<StatusCode, PortalError> {
    let _loading = LoadingGuard::begin(state);
    match state
        .api
        .post_json::<SubmitAck, _>(&api::submit_mixed_path(assignment_id), &entries)
        .await
    {
        Ok((status, _)) => {
            info!(
                assignment_id = assignment_id,
                answered = entries.len(),
                "Assignment submitted"
            );
            Ok(status)
        }
        Err(err) => Err(fail(state, "submit_answers", err)),
    }
}
