//! Typed data model for the portal backend.
//!
//! Every payload crossing the wire is parsed into one of these types at the
//! transport boundary; nothing downstream operates on untyped JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A subject (course) the student is enrolled in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Subject {
    pub id: i64,
    pub name: String,
    /// HTML body; rendered by the host, stripped for previews.
    #[serde(default)]
    pub description: String,
}

/// An announcement posted under a subject.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Announcement {
    pub id: i64,
    pub title: String,
    /// HTML body.
    pub message: String,
    pub author_name: String,
    #[serde(default)]
    pub author_role: String,
    pub created_at: DateTime<Utc>,
}

/// A course module, containing ordered chapters and attached materials.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Module {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub chapters: Vec<Chapter>,
    #[serde(default)]
    pub materials: Vec<Material>,
}

/// A chapter within a module. Chapters page sequentially and the sibling
/// list handed to the pager may cross module boundaries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chapter {
    pub id: i64,
    pub name: String,
}

/// Full chapter content as returned by the chapter-detail endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChapterDetail {
    pub id: i64,
    pub name: String,
    /// HTML body.
    #[serde(default)]
    pub description: String,
}

/// A downloadable material attached to a module.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Material {
    pub id: i64,
    pub title: String,
    pub file_url: String,
}

/// How an assignment is answered.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentType {
    /// Question-based (MCQ and/or free text), answered in-app.
    Mixed,
    /// File upload.
    File,
}

/// An assignment listed under a subject.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Assignment {
    pub id: i64,
    pub title: String,
    /// HTML body.
    #[serde(default)]
    pub description: String,
    pub due_date: DateTime<Utc>,
    pub total_marks: f64,
    #[serde(default)]
    pub submitted: bool,
    pub assignment_type: AssignmentType,
}

/// Display status of an assignment. Derived, never stored: the same record
/// can render as `Pending` now and `NotSubmitted` after the due date passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentStatus {
    Submitted,
    NotSubmitted,
    Pending,
}

impl AssignmentStatus {
    /// Label shown next to the assignment row.
    pub fn label(self) -> &'static str {
        match self {
            AssignmentStatus::Submitted => "Submitted",
            AssignmentStatus::NotSubmitted => "Not Submitted",
            AssignmentStatus::Pending => "Pending",
        }
    }
}

impl Assignment {
    /// Derives the display status from the record and the caller's clock.
    ///
    /// Pure in `now`; callers recompute this at render time.
    pub fn status(&self, now: DateTime<Utc>) -> AssignmentStatus {
        if self.submitted {
            AssignmentStatus::Submitted
        } else if self.due_date < now {
            AssignmentStatus::NotSubmitted
        } else {
            AssignmentStatus::Pending
        }
    }
}

/// Kind of question inside an assignment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Mcq,
    Text,
}

/// One selectable option of an MCQ question.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuestionOption {
    pub id: i64,
    pub text: String,
}

/// A question belonging to one assignment, fetched as a batch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Question {
    pub id: i64,
    /// HTML body.
    pub question_text: String,
    pub question_type: QuestionType,
    #[serde(default)]
    pub options: Vec<QuestionOption>,
}

/// Assignment detail payload: the assignment plus its question batch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssignmentDetail {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub due_date: DateTime<Utc>,
    pub total_marks: f64,
    #[serde(default)]
    pub submitted: bool,
    pub assignment_type: AssignmentType,
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// One answered question in the submission payload. Unanswered questions are
/// simply not present in the submitted list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnswerEntry {
    pub question_id: i64,
    /// Option id rendered as a string for MCQ, free text otherwise.
    pub answer: String,
}

/// A discussion thread under a subject.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Discussion {
    pub id: i64,
    pub title: String,
    /// HTML body.
    #[serde(default)]
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// Present on the detail payload; ordered, append-only.
    #[serde(default)]
    pub replies: Vec<Reply>,
}

/// A reply inside a discussion thread.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reply {
    pub id: i64,
    pub student_name: String,
    /// HTML body.
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// A graded (or not-yet-graded) assignment row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Grade {
    pub id: i64,
    pub assignment_title: String,
    /// `None` means "not yet graded" and renders as a placeholder, never 0.
    pub marks_obtained: Option<f64>,
    pub total_marks: f64,
}

impl Grade {
    /// Score as shown in the grades list, e.g. `"14/20"` or `"-- / 20"`.
    pub fn display_score(&self) -> String {
        match self.marks_obtained {
            Some(marks) => format!("{}/{}", trim_float(marks), trim_float(self.total_marks)),
            None => format!("-- / {}", trim_float(self.total_marks)),
        }
    }
}

/// Drops a trailing `.0` so whole marks print like the backend sends them.
fn trim_float(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Role of a person on a course roster.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PersonRole {
    Teacher,
    Student,
    Assistant,
}

/// A member of a course roster.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Person {
    pub id: i64,
    pub name: String,
    pub role: PersonRole,
}

/// Filters a roster by an optional role and a case-insensitive name query.
pub fn filter_people<'a>(
    people: &'a [Person],
    role: Option<PersonRole>,
    query: &str,
) -> Vec<&'a Person> {
    let needle = query.trim().to_lowercase();
    people
        .iter()
        .filter(|p| role.map_or(true, |r| p.role == r))
        .filter(|p| needle.is_empty() || p.name.to_lowercase().contains(&needle))
        .collect()
}

/// Subject syllabus payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Syllabus {
    pub id: i64,
    /// HTML body.
    #[serde(default)]
    pub content: String,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Credentials posted to the login endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login payload.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// The bearer token persisted under the well-known storage key.
    pub access: String,
}
