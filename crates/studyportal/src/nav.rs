//! Navigation capability.
//!
//! The rendering host is opaque: it accepts push/replace/pop of named
//! destinations with typed parameters. Screens and the guard talk to it
//! through the [`Navigator`] trait; tests use [`RecordingNavigator`].

use crate::models::{Chapter, Subject};

/// Typed navigation destinations and their parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Login,
    Dashboard,
    CourseDetail {
        subject: Subject,
        color: String,
    },
    AnnouncementDetail {
        announcement_id: i64,
        course_color: String,
        course_title: String,
    },
    /// One chapter of a module, carrying the full ordered sibling list so
    /// the pager can cross module boundaries.
    ModuleDetail {
        chapter_id: i64,
        chapter_index: usize,
        chapters: Vec<Chapter>,
        course_color: String,
        course_title: String,
    },
    AssignmentDetail {
        assignment_id: i64,
        course_color: String,
    },
    AssignmentQuestions {
        assignment_id: i64,
        course_color: String,
    },
    AssignmentSubmitted {
        assignment_id: i64,
        course_color: String,
    },
    DiscussionDetail {
        discussion_id: i64,
        course_color: String,
    },
    GradeDetail {
        grade_id: i64,
        course_color: String,
    },
    // Placeholder surfaces: routes exist, no fetch logic behind them.
    Calendar,
    Todo,
    Inbox,
    Notifications,
}

/// Opaque navigation host.
pub trait Navigator: Send + Sync {
    /// Pushes a new view onto the stack.
    fn push(&self, route: Route);
    /// Replaces the current view; used by the chapter pager so paging does
    /// not grow the stack.
    fn replace(&self, route: Route);
    /// Pops the current view.
    fn pop(&self);
}

/// Navigator that records every call, for tests.
#[derive(Default)]
pub struct RecordingNavigator {
    calls: std::sync::Mutex<Vec<NavCall>>,
}

/// One recorded navigation call.
#[derive(Debug, Clone, PartialEq)]
pub enum NavCall {
    Push(Route),
    Replace(Route),
    Pop,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<NavCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<NavCall> {
        self.calls.lock().unwrap().last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn push(&self, route: Route) {
        self.calls.lock().unwrap().push(NavCall::Push(route));
    }

    fn replace(&self, route: Route) {
        self.calls.lock().unwrap().push(NavCall::Replace(route));
    }

    fn pop(&self) {
        self.calls.lock().unwrap().push(NavCall::Pop);
    }
}
