//! Endpoint templates for the portal backend (base path `/api`).

/// POST: exchange `{email, password}` for `{access}`.
pub const LOGIN_PATH: &str = "/users/login/";

/// GET: enrolled subjects for the dashboard.
pub const DASHBOARD_PATH: &str = "/users/student/dashboard/";

pub fn announcements_path(subject_id: i64) -> String {
    format!("/users/subjects/{}/announcements/", subject_id)
}

pub fn announcement_path(announcement_id: i64) -> String {
    format!("/users/announcements/{}/", announcement_id)
}

pub fn modules_path(subject_id: i64) -> String {
    format!("/users/subjects/{}/modules/", subject_id)
}

pub fn chapter_path(chapter_id: i64) -> String {
    format!("/users/chapter/{}/", chapter_id)
}

pub fn syllabus_path(subject_id: i64) -> String {
    format!("/users/subjects/{}/syllabus/", subject_id)
}

pub fn assignments_path(subject_id: i64) -> String {
    format!("/users/assignments/subject/{}/", subject_id)
}

pub fn assignment_path(assignment_id: i64) -> String {
    format!("/users/assignments/{}/", assignment_id)
}

pub fn submit_mixed_path(assignment_id: i64) -> String {
    format!("/users/assignments/{}/submit/mixed/", assignment_id)
}

pub fn discussions_path(subject_id: i64) -> String {
    format!("/users/discussions/subject/{}/", subject_id)
}

pub fn discussion_path(discussion_id: i64) -> String {
    format!("/users/discussions/{}/", discussion_id)
}

pub fn discussion_reply_path(discussion_id: i64) -> String {
    format!("/users/discussions/{}/reply/", discussion_id)
}

pub fn grades_path(subject_id: i64) -> String {
    format!("/users/grades/subject/{}/", subject_id)
}
