//! Sequential chapter pagination for the module-detail view.
//!
//! The pager is handed the full ordered sibling list of chapters plus the
//! current index as navigation parameters; it never re-derives the list from
//! a module id. Steps replace the current view instead of pushing, so paging
//! through many chapters does not grow the navigation stack. Because the
//! sibling list can span module boundaries, the last chapter of one module
//! pages straight into the first chapter of the next.

use crate::models::Chapter;
use crate::nav::{Navigator, Route};

/// Pager over an ordered sibling chapter list.
#[derive(Debug, Clone)]
pub struct ChapterPager {
    chapters: Vec<Chapter>,
    index: usize,
    course_color: String,
    course_title: String,
}

impl ChapterPager {
    /// Builds a pager. `index` is clamped into the list's bounds.
    pub fn new(
        chapters: Vec<Chapter>,
        index: usize,
        course_color: impl Into<String>,
        course_title: impl Into<String>,
    ) -> Self {
        let index = index.min(chapters.len().saturating_sub(1));
        Self {
            chapters,
            index,
            course_color: course_color.into(),
            course_title: course_title.into(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&Chapter> {
        self.chapters.get(self.index)
    }

    pub fn can_go_previous(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_next(&self) -> bool {
        self.index + 1 < self.chapters.len()
    }

    /// Steps back one chapter, replacing the current view. Returns the new
    /// chapter id so the caller can issue the fresh content fetch; `None`
    /// when already at the first chapter (the step is a no-op).
    pub fn previous(&mut self, navigator: &dyn Navigator) -> Option<i64> {
        if !self.can_go_previous() {
            return None;
        }
        self.index -= 1;
        self.replace_current(navigator)
    }

    /// Steps forward one chapter; `None` at the end of the sibling list.
    pub fn next(&mut self, navigator: &dyn Navigator) -> Option<i64> {
        if !self.can_go_next() {
            return None;
        }
        self.index += 1;
        self.replace_current(navigator)
    }

    fn replace_current(&self, navigator: &dyn Navigator) -> Option<i64> {
        let chapter = self.chapters.get(self.index)?;
        navigator.replace(Route::ModuleDetail {
            chapter_id: chapter.id,
            chapter_index: self.index,
            chapters: self.chapters.clone(),
            course_color: self.course_color.clone(),
            course_title: self.course_title.clone(),
        });
        Some(chapter.id)
    }
}
