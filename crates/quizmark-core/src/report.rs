//! Feedback text and batch grading reports with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{GradeDetail, GradeResult};
use crate::progress::ProgressRecord;

/// Shown instead of a review list when every answer is correct.
pub const ALL_CORRECT_MESSAGE: &str = "Great! All answers look good.";

impl GradeResult {
    /// `"{score} / {total}"`.
    pub fn summary(&self) -> String {
        format!("{} / {}", self.score, self.total)
    }

    /// One line per incorrect item.
    pub fn review_lines(&self) -> Vec<String> {
        self.incorrect().map(review_line).collect()
    }
}

/// `Q{index}: Your: {user} | Model: {model}`.
pub fn review_line(detail: &GradeDetail) -> String {
    format!(
        "Q{}: Your: {} | Model: {}",
        detail.index,
        detail.user.as_deref().unwrap_or(""),
        detail.model.as_deref().unwrap_or("")
    )
}

/// Plain-text feedback for a graded submission.
pub fn feedback_text(result: &GradeResult) -> String {
    let mut out = format!("Score: {}\n", result.summary());
    if result.is_perfect() {
        out.push_str(ALL_CORRECT_MESSAGE);
        out.push('\n');
    } else {
        out.push_str("Review incorrect answers:\n");
        for line in result.review_lines() {
            out.push_str("  ");
            out.push_str(&line);
            out.push('\n');
        }
    }
    out
}

/// `Saved: {score} / {total} (on {local time})`.
pub fn saved_line(record: &ProgressRecord) -> String {
    let local: DateTime<Local> = record.ts.with_timezone(&Local);
    format!(
        "Saved: {} / {} (on {})",
        record.score,
        record.total,
        local.format("%Y-%m-%d %H:%M:%S")
    )
}

/// Results of grading several sections in one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// One result per graded submission, in input order.
    pub results: Vec<GradeResult>,
}

impl QuizReport {
    pub fn new(results: Vec<GradeResult>) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            results,
        }
    }

    /// Total correct items across all sections.
    pub fn score(&self) -> usize {
        self.results.iter().map(|r| r.score).sum()
    }

    /// Total submitted items across all sections.
    pub fn total(&self) -> usize {
        self.results.iter().map(|r| r.total).sum()
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: QuizReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Format the report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Summary:** {} / {} correct across {} section(s)\n\n",
            self.score(),
            self.total(),
            self.results.len()
        ));

        md.push_str("| Section | Score |\n");
        md.push_str("|---------|-------|\n");
        for r in &self.results {
            md.push_str(&format!("| {} | {} |\n", r.section, r.summary()));
        }

        let wrong: Vec<_> = self
            .results
            .iter()
            .flat_map(|r| r.incorrect().map(move |d| (r.section.as_str(), d)))
            .collect();

        if !wrong.is_empty() {
            md.push_str("\n### Incorrect answers\n\n");
            md.push_str("| Section | Question | Your answer | Model answer |\n");
            md.push_str("|---------|----------|-------------|--------------|\n");
            for (section, d) in wrong {
                md.push_str(&format!(
                    "| {} | Q{} | {} | {} |\n",
                    section,
                    d.index,
                    escape_cell(d.user.as_deref().unwrap_or("")),
                    escape_cell(d.model.as_deref().unwrap_or(""))
                ));
            }
        }

        md
    }
}

fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|")
}
