//! HTML rendering.
//!
//! Produces the quiz feedback fragments that a page drops into each
//! section's result box, and a self-contained HTML page for a batch
//! [`QuizReport`].

use anyhow::Result;
use std::path::Path;

use quizmark_core::model::GradeResult;
use quizmark_core::progress::ProgressRecord;
use quizmark_core::report::{saved_line, QuizReport, ALL_CORRECT_MESSAGE};

/// Escape a string for safe HTML insertion.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Ordered list of a section's model answers.
pub fn render_model_answers(answers: &[String]) -> String {
    let items: String = answers
        .iter()
        .map(|a| format!("<li>{}</li>", html_escape(a)))
        .collect();
    format!("<strong>Model answers:</strong><ol>{items}</ol>")
}

/// Score line followed by either a review of wrong answers or a well-done note.
pub fn render_grade(result: &GradeResult) -> String {
    let mut html = format!("Score: <strong>{}</strong>", html_escape(&result.summary()));

    if result.is_perfect() {
        html.push_str(&format!(
            "<div class=\"quiz-good\">{}</div>",
            html_escape(ALL_CORRECT_MESSAGE)
        ));
        return html;
    }

    html.push_str("<div class=\"quiz-review\"><details><summary>Review incorrect answers</summary><ul>");
    for d in result.incorrect() {
        html.push_str(&format!(
            "<li>Q{}: Your: <em>{}</em> | Model: <em>{}</em></li>",
            d.index,
            html_escape(d.user.as_deref().unwrap_or("")),
            html_escape(d.model.as_deref().unwrap_or(""))
        ));
    }
    html.push_str("</ul></details></div>");
    html
}

/// The "Saved: x / y (on …)" line shown for previously graded sections.
pub fn render_saved(record: &ProgressRecord) -> String {
    html_escape(&saved_line(record))
}

/// Generate an HTML page from a batch report.
///
/// One card per graded section: a score meter, the question checklist, and
/// the same feedback fragment the quiz page shows.
pub fn generate_html(report: &QuizReport) -> String {
    let mut html = String::from("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n<title>quizmark report</title>\n");
    html.push_str(&format!("<style>{STYLE}</style>\n</head>\n<body>\n"));

    html.push_str(&format!(
        "<header class=\"overall\"><h1>Quiz results</h1>\
         <p class=\"meta\">{} sections | {} / {} correct | {}</p>{}</header>\n",
        report.results.len(),
        report.score(),
        report.total(),
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
        meter(report.score(), report.total())
    ));

    html.push_str("<main>\n");
    for r in &report.results {
        html.push_str(&section_card(r));
    }
    html.push_str("</main>\n");

    html.push_str(&format!(
        "<footer class=\"meta\">report {}</footer>\n</body>\n</html>",
        report.id
    ));
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &QuizReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

fn section_card(result: &GradeResult) -> String {
    let state = if result.is_perfect() { "done" } else { "review" };
    let checklist: String = result
        .details
        .iter()
        .map(|d| {
            let (class, mark) = if d.correct { ("ok", "✓") } else { ("miss", "✗") };
            format!("<li class=\"{class}\" title=\"Q{}\">{mark}</li>", d.index)
        })
        .collect();

    format!(
        "<section class=\"quiz-card {state}\" id=\"{id}\">\
         <h2>{id}</h2>{meter}<ol class=\"checklist\">{checklist}</ol>\
         <div class=\"quiz-result\">{feedback}</div></section>\n",
        id = html_escape(&result.section),
        meter = meter(result.score, result.total),
        feedback = render_grade(result),
    )
}

/// Score bar for one section or the whole report.
fn meter(score: usize, total: usize) -> String {
    format!(
        "<meter min=\"0\" max=\"{}\" low=\"{}\" high=\"{}\" optimum=\"{}\" value=\"{score}\">{score} / {total}</meter>",
        total.max(1),
        total as f64 * 0.5,
        total as f64 * 0.8,
        total.max(1),
    )
}

const STYLE: &str = r#"
body { font-family: Georgia, serif; max-width: 46rem; margin: 2rem auto; padding: 0 1rem; line-height: 1.5; }
.meta { color: #666; font-size: 0.9rem; }
meter { width: 100%; height: 1rem; }
.quiz-card { border-left: 4px solid #c0392b; padding: 0.5rem 1rem; margin: 1.5rem 0; }
.quiz-card.done { border-color: #27ae60; }
.quiz-card h2 { margin: 0; text-transform: capitalize; }
.checklist { display: flex; gap: 0.5rem; list-style: none; padding: 0; }
.checklist .ok { color: #27ae60; }
.checklist .miss { color: #c0392b; }
.quiz-good { margin-top: 0.5rem; font-weight: bold; }
.quiz-review em { font-style: normal; font-family: monospace; }
"#;
