//! quizmark-core: Answer-grading engine, model-answer tables, and progress.
//!
//! This crate defines the data model, the matching heuristics, and the
//! dispatcher that the rest of quizmark builds on.

pub mod dispatch;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod model;
pub mod parser;
pub mod progress;
pub mod report;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;
