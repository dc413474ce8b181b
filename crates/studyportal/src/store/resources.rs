//! Resource store: per-feature slices holding the most recent fetch result.

use crate::models::{
    Announcement, AssignmentDetail, Assignment, ChapterDetail, Discussion, Grade, Module, Subject,
    Syllabus,
};

/// Ticket identifying one in-flight request against a slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// One feature's slot in the resource store.
///
/// Holds at most the most recently fetched payload: no per-id cache, and
/// navigating to the same feature for a different id overwrites the previous
/// value. With stale-dropping enabled, a response belonging to a superseded
/// request is discarded instead of overwriting a newer one.
#[derive(Debug)]
pub struct Slice<T> {
    value: Option<T>,
    generation: u64,
    drop_stale: bool,
}

impl<T> Slice<T> {
    fn new(drop_stale: bool) -> Self {
        Self {
            value: None,
            generation: 0,
            drop_stale,
        }
    }

    /// Marks the start of a request and returns its ticket. Any ticket issued
    /// earlier is superseded from this point on.
    pub fn begin(&mut self) -> Ticket {
        self.generation += 1;
        Ticket(self.generation)
    }

    /// Writes a response into the slice. Returns false when the write was
    /// dropped because a newer request superseded the ticket.
    pub fn complete(&mut self, ticket: Ticket, value: T) -> bool {
        if self.drop_stale && ticket.0 != self.generation {
            return false;
        }
        self.value = Some(value);
        true
    }

    /// Replaces the value directly, outside the request protocol.
    pub fn set(&mut self, value: T) {
        self.value = Some(value);
    }

    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Discards the held payload (e.g. on quiz completion).
    pub fn clear(&mut self) {
        self.value = None;
    }
}

/// The global resource store: one slice per feature.
#[derive(Debug)]
pub struct ResourceStore {
    pub subjects: Slice<Vec<Subject>>,
    pub announcements: Slice<Vec<Announcement>>,
    pub announcement_detail: Slice<Announcement>,
    pub modules: Slice<Vec<Module>>,
    pub chapter_detail: Slice<ChapterDetail>,
    pub assignments: Slice<Vec<Assignment>>,
    pub assignment_detail: Slice<AssignmentDetail>,
    pub discussions: Slice<Vec<Discussion>>,
    pub discussion_detail: Slice<Discussion>,
    pub grades: Slice<Vec<Grade>>,
    pub syllabus: Slice<Syllabus>,
}

impl ResourceStore {
    /// Creates an empty store. `drop_stale` enables request-generation
    /// stamping on every slice.
    pub fn new(drop_stale: bool) -> Self {
        Self {
            subjects: Slice::new(drop_stale),
            announcements: Slice::new(drop_stale),
            announcement_detail: Slice::new(drop_stale),
            modules: Slice::new(drop_stale),
            chapter_detail: Slice::new(drop_stale),
            assignments: Slice::new(drop_stale),
            assignment_detail: Slice::new(drop_stale),
            discussions: Slice::new(drop_stale),
            discussion_detail: Slice::new(drop_stale),
            grades: Slice::new(drop_stale),
            syllabus: Slice::new(drop_stale),
        }
    }
}
