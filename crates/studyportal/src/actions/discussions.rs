//! Discussion threads and replies.

use super::{fail, LoadingGuard};
use crate::api;
use crate::error::PortalError;
use crate::models::Discussion;
use crate::state::PortalState;
use reqwest::StatusCode;
use serde::Serialize;
use std::sync::Arc;

/// Fetches a subject's discussion threads into the `discussions` slice.
pub async fn fetch_discussions(
    state: &Arc<PortalState>,
    subject_id: i64,
) -> Result<StatusCode, PortalError> {
    let _loading = LoadingGuard::begin(state);
    let ticket = state.resources_mut().discussions.begin();
    match state
        .api
        .get_json::<Vec<Discussion>>(&api::discussions_path(subject_id))
        .await
    {
        Ok((status, discussions)) => {
            state
                .resources_mut()
                .discussions
                .complete(ticket, discussions);
            Ok(status)
        }
        Err(err) => Err(fail(state, "fetch_discussions", err)),
    }
}

/// Fetches one discussion with its replies into the `discussion_detail`
/// slice.
pub async fn fetch_discussion(
    state: &Arc<PortalState>,
    discussion_id: i64,
) -> Result<StatusCode, PortalError> {
    let _loading = LoadingGuard::begin(state);
    let ticket = state.resources_mut().discussion_detail.begin();
    match state
        .api
        .get_json::<Discussion>(&api::discussion_path(discussion_id))
        .await
    {
        Ok((status, discussion)) => {
            state
                .resources_mut()
                .discussion_detail
                .complete(ticket, discussion);
            Ok(status)
        }
        Err(err) => Err(fail(state, "fetch_discussion", err)),
    }
}

#[derive(Debug, Serialize)]
struct ReplyBody<'a> {
    message: &'a str,
}

/// Posts a reply, then refetches the thread so the store reflects the
/// appended reply. Replies are append-only; the client never edits or
/// reorders them.
pub async fn post_reply(
    state: &Arc<PortalState>,
    discussion_id: i64,
    message: &str,
) -> Result<StatusCode, PortalError> {
    if message.trim().is_empty() {
        return Err(PortalError::Validation {
            message: "Reply cannot be empty".to_string(),
        });
    }

    {
        let _loading = LoadingGuard::begin(state);
        let body = ReplyBody {
            message: message.trim(),
        };
        if let Err(err) = state
            .api
            .post_json::<serde_json::Value, _>(&api::discussion_reply_path(discussion_id), &body)
            .await
        {
            return Err(fail(state, "post_reply", err));
        }
    }

    fetch_discussion(state, discussion_id).await
}
