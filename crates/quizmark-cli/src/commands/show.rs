//! The `quizmark show` command.

use std::path::PathBuf;

use anyhow::Result;

use quizmark_core::dispatch::{QuizRequest, QuizResponse};
use quizmark_report::render_model_answers;

pub fn execute(
    section: String,
    html: bool,
    answer_table: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let dispatcher = super::open_dispatcher(config_path.as_deref(), answer_table.as_deref())?;

    let QuizResponse::ModelAnswers { section, answers } =
        dispatcher.dispatch(&QuizRequest::show_model(section))
    else {
        anyhow::bail!("unexpected response to a show request");
    };

    if answers.is_empty() {
        let known: Vec<_> = dispatcher.engine().table().section_ids().collect();
        println!("No model answers for section '{section}'.");
        println!("Known sections: {}", known.join(", "));
        return Ok(());
    }

    if html {
        println!("{}", render_model_answers(&answers));
    } else {
        println!("Model answers for {section}:");
        for (i, answer) in answers.iter().enumerate() {
            println!("  {}. {}", i + 1, answer.trim());
        }
    }

    Ok(())
}
