//! Dashboard, announcements, modules, chapters and syllabus fetches.

use super::{fail, LoadingGuard};
use crate::api;
use crate::error::PortalError;
use crate::models::{Announcement, ChapterDetail, Module, Subject, Syllabus};
use crate::state::PortalState;
use reqwest::StatusCode;
use std::sync::Arc;

/// Fetches the enrolled subjects into the `subjects` slice.
pub async fn fetch_subjects(state: &Arc<PortalState>) -> Result<StatusCode, PortalError> {
    let _loading = LoadingGuard::begin(state);
    let ticket = state.resources_mut().subjects.begin();
    match state.api.get_json::<Vec<Subject>>(api::DASHBOARD_PATH).await {
        Ok((status, subjects)) => {
            state.resources_mut().subjects.complete(ticket, subjects);
            Ok(status)
        }
        Err(err) => Err(fail(state, "fetch_subjects", err)),
    }
}

/// Fetches a subject's announcements into the `announcements` slice.
pub async fn fetch_announcements(
    state: &Arc<PortalState>,
    subject_id: i64,
) -> Result<StatusCode, PortalError> {
    let _loading = LoadingGuard::begin(state);
    let ticket = state.resources_mut().announcements.begin();
    match state
        .api
        .get_json::<Vec<Announcement>>(&api::announcements_path(subject_id))
        .await
    {
        Ok((status, announcements)) => {
            state
                .resources_mut()
                .announcements
                .complete(ticket, announcements);
            Ok(status)
        }
        Err(err) => Err(fail(state, "fetch_announcements", err)),
    }
}

/// Fetches one announcement into the `announcement_detail` slice.
pub async fn fetch_announcement(
    state: &Arc<PortalState>,
    announcement_id: i64,
) -> Result<StatusCode, PortalError> {
    let _loading = LoadingGuard::begin(state);
    let ticket = state.resources_mut().announcement_detail.begin();
    match state
        .api
        .get_json::<Announcement>(&api::announcement_path(announcement_id))
        .await
    {
        Ok((status, announcement)) => {
            state
                .resources_mut()
                .announcement_detail
                .complete(ticket, announcement);
            Ok(status)
        }
        Err(err) => Err(fail(state, "fetch_announcement", err)),
    }
}

/// Fetches a subject's modules (with chapters and materials) into the
/// `modules` slice.
pub async fn fetch_modules(
    state: &Arc<PortalState>,
    subject_id: i64,
) -> Result<StatusCode, PortalError> {
    let _loading = LoadingGuard::begin(state);
    let ticket = state.resources_mut().modules.begin();
    match state
        .api
        .get_json::<Vec<Module>>(&api::modules_path(subject_id))
        .await
    {
        Ok((status, modules)) => {
            state.resources_mut().modules.complete(ticket, modules);
            Ok(status)
        }
        Err(err) => Err(fail(state, "fetch_modules", err)),
    }
}

/// Fetches one chapter's content into the `chapter_detail` slice.
pub async fn fetch_chapter(
    state: &Arc<PortalState>,
    chapter_id: i64,
) -> Result<StatusCode, PortalError> {
    let _loading = LoadingGuard::begin(state);
    let ticket = state.resources_mut().chapter_detail.begin();
    match state
        .api
        .get_json::<ChapterDetail>(&api::chapter_path(chapter_id))
        .await
    {
        Ok((status, chapter)) => {
            state
                .resources_mut()
                .chapter_detail
                .complete(ticket, chapter);
            Ok(status)
        }
        Err(err) => Err(fail(state, "fetch_chapter", err)),
    }
}

/// Fetches a subject's syllabus into the `syllabus` slice.
pub async fn fetch_syllabus(
    state: &Arc<PortalState>,
    subject_id: i64,
) -> Result<StatusCode, PortalError> {
    let _loading = LoadingGuard::begin(state);
    let ticket = state.resources_mut().syllabus.begin();
    match state
        .api
        .get_json::<Syllabus>(&api::syllabus_path(subject_id))
        .await
    {
        Ok((status, syllabus)) => {
            state.resources_mut().syllabus.complete(ticket, syllabus);
            Ok(status)
        }
        Err(err) => Err(fail(state, "fetch_syllabus", err)),
    }
}
