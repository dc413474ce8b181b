//! Quiz session controller for the in-app assignment question flow.
//!
//! Owns the mutable answer map and the current-question cursor for one
//! attempt. Answers are ephemeral: discarded on successful submission,
//! preserved across a failed one so the student loses nothing.

use crate::actions::assignments;
use crate::error::PortalError;
use crate::models::{AnswerEntry, Question, QuestionType};
use crate::state::PortalState;
use reqwest::StatusCode;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// Phase of one quiz attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    /// Viewing the question at this index.
    Viewing(usize),
    /// Submission in flight.
    Submitting,
    /// Terminal: the attempt was accepted and the answers discarded.
    Submitted,
}

/// Ephemeral state for one attempt at an assignment's questions.
pub struct QuizSession {
    assignment_id: i64,
    questions: Vec<Question>,
    answers: HashMap<i64, String>,
    phase: QuizPhase,
}

impl QuizSession {
    /// Starts a session at the first question of the loaded batch.
    pub fn new(assignment_id: i64, questions: Vec<Question>) -> Self {
        Self {
            assignment_id,
            questions,
            answers: HashMap::new(),
            phase: QuizPhase::Viewing(0),
        }
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// The question under the cursor, if the session is in a viewing phase.
    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            QuizPhase::Viewing(index) => self.questions.get(index),
            _ => None,
        }
    }

    /// Recorded answer for a question, if any.
    pub fn answer(&self, question_id: i64) -> Option<&str> {
        self.answers.get(&question_id).map(String::as_str)
    }

    pub fn can_go_next(&self) -> bool {
        matches!(self.phase, QuizPhase::Viewing(i) if i + 1 < self.questions.len())
    }

    pub fn can_go_previous(&self) -> bool {
        matches!(self.phase, QuizPhase::Viewing(i) if i > 0)
    }

    /// Submit is only offered on the final question.
    pub fn can_submit(&self) -> bool {
        matches!(self.phase, QuizPhase::Viewing(i) if i + 1 == self.questions.len())
            && !self.questions.is_empty()
    }

    /// Advances the cursor. Skipping an unanswered question is allowed; no
    /// completeness is enforced before moving on.
    pub fn next(&mut self) -> bool {
        if let QuizPhase::Viewing(index) = self.phase {
            if index + 1 < self.questions.len() {
                self.phase = QuizPhase::Viewing(index + 1);
                return true;
            }
        }
        false
    }

    /// Moves the cursor back.
    pub fn previous(&mut self) -> bool {
        if let QuizPhase::Viewing(index) = self.phase {
            if index > 0 {
                self.phase = QuizPhase::Viewing(index - 1);
                return true;
            }
        }
        false
    }

    /// Records an MCQ selection. Single-select: the option id (as a string)
    /// overwrites any prior answer for the question. Rejected for unknown
    /// questions, non-MCQ questions, and unknown option ids.
    pub fn record_choice(&mut self, question_id: i64, option_id: i64) -> Result<(), PortalError> {
        let question = self.writable_question(question_id)?;
        if question.question_type != QuestionType::Mcq {
            return Err(PortalError::Validation {
                message: format!("Question {} does not take an option choice", question_id),
            });
        }
        if !question.options.iter().any(|o| o.id == option_id) {
            return Err(PortalError::Validation {
                message: format!("Option {} does not belong to question {}", option_id, question_id),
            });
        }
        self.answers.insert(question_id, option_id.to_string());
        Ok(())
    }

    /// Records free text. The full current text replaces the stored value on
    /// every keystroke; an emptied field removes the answer entirely so it
    /// is omitted from the payload.
    pub fn record_text(&mut self, question_id: i64, text: &str) -> Result<(), PortalError> {
        let question = self.writable_question(question_id)?;
        if question.question_type != QuestionType::Text {
            return Err(PortalError::Validation {
                message: format!("Question {} does not take free text", question_id),
            });
        }
        if text.is_empty() {
            self.answers.remove(&question_id);
        } else {
            self.answers.insert(question_id, text.to_string());
        }
        Ok(())
    }

    fn writable_question(&self, question_id: i64) -> Result<&Question, PortalError> {
        if self.phase == QuizPhase::Submitted || self.phase == QuizPhase::Submitting {
            return Err(PortalError::Validation {
                message: "Attempt already submitted".to_string(),
            });
        }
        self.questions
            .iter()
            .find(|q| q.id == question_id)
            .ok_or_else(|| PortalError::Validation {
                message: format!("Unknown question {}", question_id),
            })
    }

    /// Flattens the answer map into the submission payload: answered
    /// questions only, in question order.
    pub fn build_payload(&self) -> Vec<AnswerEntry> {
        self.questions
            .iter()
            .filter_map(|q| {
                self.answers.get(&q.id).map(|answer| AnswerEntry {
                    question_id: q.id,
                    answer: answer.clone(),
                })
            })
            .collect()
    }

    /// Submits the attempt. Only available on the final question; a session
    /// can be submitted at most once.
    ///
    /// On 200 the session becomes terminal and the answer map is discarded.
    /// On failure the session reverts to viewing the last question with the
    /// answer map intact, and the action has already surfaced the error.
    pub async fn submit(&mut self, state: &Arc<PortalState>) -> Result<StatusCode, PortalError> {
        if self.phase == QuizPhase::Submitted {
            return Err(PortalError::Validation {
                message: "Attempt already submitted".to_string(),
            });
        }
        if !self.can_submit() {
            return Err(PortalError::Validation {
                message: "Submit is only available on the final question".to_string(),
            });
        }

        let last_index = self.questions.len() - 1;
        let payload = self.build_payload();
        self.phase = QuizPhase::Submitting;
        info!(
            assignment_id = self.assignment_id,
            answered = payload.len(),
            total = self.questions.len(),
            "Submitting quiz attempt"
        );

        match assignments::submit_answers(state, self.assignment_id, &payload).await {
            Ok(status) if status == StatusCode::OK => {
                self.phase = QuizPhase::Submitted;
                self.answers.clear();
                Ok(status)
            }
            Ok(status) => {
                // Accepted-but-not-200 is treated like a failure: keep the
                // student's input and let them retry explicitly.
                self.phase = QuizPhase::Viewing(last_index);
                Ok(status)
            }
            Err(err) => {
                self.phase = QuizPhase::Viewing(last_index);
                Err(err)
            }
        }
    }
}
