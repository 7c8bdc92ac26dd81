//! Quiz request dispatcher.
//!
//! The adapter between a presentation layer and the engine: it receives a
//! closed set of quiz requests, calls the pure engine, and owns every store
//! access. Store failures are logged and swallowed so grading keeps working
//! when progress cannot be saved.

use std::collections::BTreeMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::engine::GradingEngine;
use crate::model::GradeResult;
use crate::progress::{ProgressRecord, ProgressTracker};
use crate::traits::KeyValueStore;

/// What the learner asked to do with a section's quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum QuizAction {
    /// Reveal the model answers.
    ShowModel,
    /// Grade the given answers, in question order.
    Submit { answers: Vec<String> },
}

/// A request for one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizRequest {
    pub section: String,
    #[serde(flatten)]
    pub action: QuizAction,
}

impl QuizRequest {
    pub fn show_model(section: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            action: QuizAction::ShowModel,
        }
    }

    pub fn submit<I, S>(section: impl Into<String>, answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            section: section.into(),
            action: QuizAction::Submit {
                answers: answers.into_iter().map(Into::into).collect(),
            },
        }
    }
}

/// The dispatcher's answer to a [`QuizRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuizResponse {
    ModelAnswers {
        section: String,
        answers: Vec<String>,
    },
    Graded {
        result: GradeResult,
        /// Whether the score reached the store.
        saved: bool,
    },
}

/// Routes quiz requests to the engine and records progress.
pub struct QuizDispatcher<S> {
    engine: GradingEngine,
    progress: ProgressTracker<S>,
}

impl<S: KeyValueStore> QuizDispatcher<S> {
    pub fn new(engine: GradingEngine, progress: ProgressTracker<S>) -> Self {
        Self { engine, progress }
    }

    pub fn engine(&self) -> &GradingEngine {
        &self.engine
    }

    pub fn progress(&self) -> &ProgressTracker<S> {
        &self.progress
    }

    pub fn dispatch(&self, request: &QuizRequest) -> QuizResponse {
        match &request.action {
            QuizAction::ShowModel => QuizResponse::ModelAnswers {
                section: request.section.clone(),
                answers: self.engine.model_answers(&request.section).to_vec(),
            },
            QuizAction::Submit { answers } => {
                let result = self.engine.grade_section(&request.section, answers);
                let saved = self.record(&result);
                QuizResponse::Graded { result, saved }
            }
        }
    }

    fn record(&self, result: &GradeResult) -> bool {
        let record = ProgressRecord::from_result(result, Utc::now());
        match self.progress.save(&result.section, &record) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    "could not save progress for '{}' to {} store: {e}",
                    result.section,
                    self.progress.store().name()
                );
                false
            }
        }
    }

    /// Saved progress for every section; empty if the store cannot be read.
    pub fn saved_progress(&self) -> BTreeMap<String, ProgressRecord> {
        self.progress.load_all().unwrap_or_else(|e| {
            tracing::warn!("could not load saved progress: {e}");
            BTreeMap::new()
        })
    }

    /// Forget all saved progress, returning how many sections were cleared.
    pub fn clear_progress(&self) -> usize {
        self.progress.clear_all().unwrap_or_else(|e| {
            tracing::warn!("could not clear saved progress: {e}");
            0
        })
    }
}
