//! Session store: authentication flag, loading flag, transient notices.

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

/// How a notice is presented by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeStyle {
    /// Transient auto-dismissing banner.
    Toast,
    /// Blocking modal, reserved for warnings that must be acknowledged.
    Modal,
}

/// A transient user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub style: NoticeStyle,
    pub message: String,
}

/// Session-scoped application state.
///
/// Written by the login/logout actions, fetch-action failure paths, and the
/// navigation guard; read by every screen needing the loading spinner or
/// error feedback.
#[derive(Debug, Default)]
pub struct SessionState {
    pub is_authenticated: bool,
    pub is_loading: bool,
    /// At most one notice is visible at a time; toast and modal are mutually
    /// exclusive by construction.
    pub notice: Option<Notice>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows a toast, replacing any visible notice (including a modal).
    pub fn show_toast(&mut self, kind: NoticeKind, message: impl Into<String>) {
        self.notice = Some(Notice {
            kind,
            style: NoticeStyle::Toast,
            message: message.into(),
        });
    }

    /// Shows a blocking modal, replacing any visible notice.
    pub fn show_modal(&mut self, kind: NoticeKind, message: impl Into<String>) {
        self.notice = Some(Notice {
            kind,
            style: NoticeStyle::Modal,
            message: message.into(),
        });
    }

    /// Dismisses the visible notice, if any.
    pub fn clear_notice(&mut self) {
        self.notice = None;
    }
}
