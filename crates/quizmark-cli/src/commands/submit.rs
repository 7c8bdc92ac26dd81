//! The `quizmark submit` command.

use std::path::PathBuf;

use anyhow::Result;

use quizmark_core::dispatch::{QuizRequest, QuizResponse};
use quizmark_core::report::feedback_text;
use quizmark_report::render_grade;

pub fn execute(
    section: String,
    answers: Vec<String>,
    html: bool,
    answer_table: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    anyhow::ensure!(!answers.is_empty(), "provide at least one --answer");

    let dispatcher = super::open_dispatcher(config_path.as_deref(), answer_table.as_deref())?;
    if !dispatcher.engine().table().contains(&section) {
        eprintln!("Warning: unknown section '{section}', every answer will be marked incorrect.");
    }

    let QuizResponse::Graded { result, saved } =
        dispatcher.dispatch(&QuizRequest::submit(section, answers))
    else {
        anyhow::bail!("unexpected response to a submit request");
    };

    if html {
        println!("{}", render_grade(&result));
    } else {
        print!("{}", feedback_text(&result));
    }

    if saved {
        eprintln!("Progress saved.");
    } else {
        eprintln!("Progress could not be saved.");
    }

    Ok(())
}
