//! Subcommand implementations.

use std::path::Path;

use anyhow::Result;

use quizmark_core::dispatch::QuizDispatcher;
use quizmark_core::engine::GradingEngine;
use quizmark_core::parser;
use quizmark_core::progress::ProgressTracker;
use quizmark_core::traits::KeyValueStore;
use quizmark_store::config::load_config_from;
use quizmark_store::create_store;

pub mod clear;
pub mod grade;
pub mod init;
pub mod progress;
pub mod show;
pub mod submit;
pub mod validate;

pub type Dispatcher = QuizDispatcher<Box<dyn KeyValueStore>>;

/// Build a dispatcher from config, with an optional answer table override.
pub fn open_dispatcher(
    config_path: Option<&Path>,
    answer_table: Option<&Path>,
) -> Result<Dispatcher> {
    let config = load_config_from(config_path)?;

    let table = match answer_table {
        Some(path) => parser::load_answers(path)?,
        None => config.answer_table()?,
    };
    let store = create_store(&config.store)?;
    tracing::debug!(
        "using {} sections with the {} store",
        table.len(),
        store.name()
    );

    Ok(QuizDispatcher::new(
        GradingEngine::new(table),
        ProgressTracker::with_prefix(store, config.key_prefix),
    ))
}
