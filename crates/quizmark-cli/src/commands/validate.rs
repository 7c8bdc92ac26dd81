//! The `quizmark validate` command.

use std::path::PathBuf;

use anyhow::Result;

use quizmark_core::model::ModelAnswerTable;
use quizmark_core::parser::{self, ParsedTable};

pub fn execute(answer_table: Option<PathBuf>) -> Result<()> {
    let (source, parsed) = match &answer_table {
        Some(path) => (
            path.display().to_string(),
            parser::load_parsed_answers(path)?,
        ),
        None => (
            "built-in".to_string(),
            ParsedTable {
                table: ModelAnswerTable::builtin(),
                duplicates: vec![],
            },
        ),
    };

    let question_count: usize = parsed.table.sections().map(|s| s.answers.len()).sum();
    println!(
        "Answer table: {source} ({} sections, {question_count} questions)",
        parsed.table.len()
    );

    let warnings = parser::validate_parsed_table(&parsed);
    for w in &warnings {
        let location = match (&w.section_id, w.question) {
            (Some(id), Some(q)) => format!("  [{id} Q{q}]"),
            (Some(id), None) => format!("  [{id}]"),
            _ => "  ".to_string(),
        };
        println!("{location} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("All answer tables valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
