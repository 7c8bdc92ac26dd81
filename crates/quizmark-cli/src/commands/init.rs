//! The `quizmark init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create quizmark.toml
    if std::path::Path::new("quizmark.toml").exists() {
        println!("quizmark.toml already exists, skipping.");
    } else {
        std::fs::write("quizmark.toml", SAMPLE_CONFIG)?;
        println!("Created quizmark.toml");
    }

    // Create example answer table
    std::fs::create_dir_all("answers")?;
    let example_path = std::path::Path::new("answers/example.toml");
    if example_path.exists() {
        println!("answers/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_ANSWERS)?;
        println!("Created answers/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit answers/example.toml with your sections and model answers");
    println!("  2. Run: quizmark validate --answer-table answers/example.toml");
    println!("  3. Run: quizmark submit --section units --answer metre --answer kilogram");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizmark configuration

# Answer table file or directory. Remove to use the built-in sections.
answers = "answers"

# Namespace for saved progress keys.
key_prefix = "mm_progress_"

[store]
type = "file"
path = "quizmark-progress.json"
"#;

const EXAMPLE_ANSWERS: &str = r#"# Model answers, one [[sections]] entry per quiz.
# Numeric answers (digits, ".", "-", "/", or containing π or √) match on
# substring or within 1e-6; prose answers match when at least half of the
# words longer than two characters appear in the learner's answer.

[[sections]]
id = "units"
title = "SI Units"
answers = ["metre", "kilogram", "second", "9.81", "ampere"]

[[sections]]
id = "circles"
title = "Circles"
answers = ["2πr", "πr²", "3.14159", "the diameter is twice the radius"]
"#;
