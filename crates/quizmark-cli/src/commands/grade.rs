//! The `quizmark grade` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use quizmark_core::dispatch::{QuizRequest, QuizResponse};
use quizmark_core::model::GradeResult;
use quizmark_core::report::QuizReport;
use quizmark_report::write_html_report;

#[derive(Debug, Deserialize)]
struct SubmissionsFile {
    #[serde(default)]
    submissions: Vec<Submission>,
}

#[derive(Debug, Deserialize)]
struct Submission {
    section: String,
    #[serde(default)]
    answers: Vec<String>,
}

fn load_submissions(path: &Path) -> Result<Vec<Submission>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read submissions: {}", path.display()))?;
    let parsed: SubmissionsFile = toml::from_str(&content)
        .with_context(|| format!("failed to parse TOML: {}", path.display()))?;
    Ok(parsed.submissions)
}

pub fn execute(
    submissions_path: PathBuf,
    output: PathBuf,
    format: String,
    save: bool,
    answer_table: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let submissions = load_submissions(&submissions_path)?;
    anyhow::ensure!(
        !submissions.is_empty(),
        "no [[submissions]] found in {}",
        submissions_path.display()
    );

    let dispatcher = super::open_dispatcher(config_path.as_deref(), answer_table.as_deref())?;

    let mut results = Vec::with_capacity(submissions.len());
    for s in submissions {
        let result = if save {
            match dispatcher.dispatch(&QuizRequest::submit(s.section, s.answers)) {
                QuizResponse::Graded { result, saved } => {
                    if !saved {
                        eprintln!("Warning: could not save progress for '{}'", result.section);
                    }
                    result
                }
                QuizResponse::ModelAnswers { .. } => {
                    anyhow::bail!("unexpected response to a submit request")
                }
            }
        } else {
            dispatcher.engine().grade_section(&s.section, &s.answers)
        };
        results.push(result);
    }

    let report = QuizReport::new(results);
    print_summary(&report.results);

    std::fs::create_dir_all(&output)
        .with_context(|| format!("failed to create {}", output.display()))?;
    let timestamp = report.created_at.format("%Y-%m-%dT%H%M%S");

    let formats: Vec<&str> = if format == "all" {
        vec!["json", "html", "markdown"]
    } else {
        format.split(',').map(str::trim).collect()
    };

    for fmt in &formats {
        match *fmt {
            "json" => {
                let path = output.join(format!("report-{timestamp}.json"));
                report.save_json(&path)?;
                eprintln!("Results saved to: {}", path.display());
            }
            "html" => {
                let path = output.join(format!("report-{timestamp}.html"));
                write_html_report(&report, &path)?;
                eprintln!("HTML report: {}", path.display());
            }
            "markdown" | "md" => {
                let path = output.join(format!("report-{timestamp}.md"));
                std::fs::write(&path, report.to_markdown())
                    .with_context(|| format!("failed to write {}", path.display()))?;
                eprintln!("Markdown report: {}", path.display());
            }
            _ => {
                eprintln!("Unknown format: {fmt}");
            }
        }
    }

    Ok(())
}

fn print_summary(results: &[GradeResult]) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Section", "Score", "Incorrect"]);

    for r in results {
        let wrong: Vec<String> = r.incorrect().map(|d| format!("Q{}", d.index)).collect();
        table.add_row(vec![
            Cell::new(&r.section),
            Cell::new(r.summary()),
            Cell::new(if wrong.is_empty() {
                "-".to_string()
            } else {
                wrong.join(", ")
            }),
        ]);
    }

    println!("{table}");
}
