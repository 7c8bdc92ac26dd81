//! The grading engine.
//!
//! Grades a learner's submission for one section against the injected
//! model-answer table. Grading is pure and never fails: blank answers,
//! unknown sections and missing model answers all count as incorrect.

use crate::matcher::match_item;
use crate::model::{GradeDetail, GradeResult, ModelAnswerTable};

/// Stateless grader over an immutable model-answer table.
#[derive(Debug, Clone)]
pub struct GradingEngine {
    table: ModelAnswerTable,
}

impl GradingEngine {
    pub fn new(table: ModelAnswerTable) -> Self {
        Self { table }
    }

    /// Engine over the built-in model answers.
    pub fn builtin() -> Self {
        Self::new(ModelAnswerTable::builtin())
    }

    pub fn table(&self) -> &ModelAnswerTable {
        &self.table
    }

    /// Model answers for a section (empty for unknown sections).
    pub fn model_answers(&self, section: &str) -> &[String] {
        self.table.answers(section)
    }

    /// Grade every submitted answer against the model answer at the same index.
    ///
    /// Only submitted items are compared: trailing model answers are not
    /// reported, and items past the end of the model set always fail.
    pub fn grade_section<S: AsRef<str>>(&self, section: &str, submission: &[S]) -> GradeResult {
        let model = self.table.answers(section);
        if !self.table.contains(section) {
            tracing::debug!("section '{section}' has no model answers, every item will fail");
        }

        let mut score = 0;
        let mut details = Vec::with_capacity(submission.len());

        for (i, user) in submission.iter().enumerate() {
            let user = user.as_ref();
            let expected = model.get(i).map(String::as_str).unwrap_or("");

            if match_item(user, expected) {
                score += 1;
                details.push(GradeDetail::correct(i + 1));
            } else {
                details.push(GradeDetail::incorrect(i + 1, user, expected));
            }
        }

        tracing::debug!(
            "graded section '{section}': {score}/{}",
            submission.len()
        );

        GradeResult {
            section: section.to_string(),
            score,
            total: submission.len(),
            details,
        }
    }
}

impl Default for GradingEngine {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Section;

    const PROBABILITY: [&str; 5] = ["1/2", "1/6", "sample space", "subset", "practice"];

    #[test]
    fn probability_all_correct() {
        let engine = GradingEngine::builtin();
        let result = engine.grade_section("probability", &PROBABILITY);

        assert_eq!(result.score, 5);
        assert_eq!(result.total, 5);
        assert!(result.is_perfect());
        assert!(result.details.iter().all(|d| d.correct && d.user.is_none()));
        let indices: Vec<_> = result.details.iter().map(|d| d.index).collect();
        assert_eq!(indices, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn probability_one_wrong() {
        let engine = GradingEngine::builtin();
        let mut answers = PROBABILITY.to_vec();
        answers[4] = "wrong";

        let result = engine.grade_section("probability", &answers);
        assert_eq!(result.score, 4);
        assert_eq!(result.total, 5);

        let wrong: Vec<_> = result.incorrect().collect();
        assert_eq!(wrong.len(), 1);
        assert_eq!(wrong[0].index, 5);
        assert_eq!(wrong[0].user.as_deref(), Some("wrong"));
        assert_eq!(wrong[0].model.as_deref(), Some("practice"));
    }

    #[test]
    fn review_keeps_raw_strings() {
        let engine = GradingEngine::builtin();
        let result = engine.grade_section("sets", &["  An Unrelated ANSWER "]);
        let detail = &result.details[0];
        assert_eq!(detail.user.as_deref(), Some("  An Unrelated ANSWER "));
        assert_eq!(
            detail.model.as_deref(),
            Some("a set is a well-defined collection of distinct objects")
        );
    }

    #[test]
    fn unknown_section_fails_every_item() {
        let engine = GradingEngine::builtin();
        let result = engine.grade_section("Probability", &PROBABILITY);

        assert_eq!(result.score, 0);
        assert_eq!(result.total, 5);
        assert!(result
            .details
            .iter()
            .all(|d| !d.correct && d.model.as_deref() == Some("")));
    }

    #[test]
    fn short_submission_ignores_trailing_model_answers() {
        let engine = GradingEngine::builtin();
        let result = engine.grade_section("probability", &["1/2", "1/6"]);
        assert_eq!(result.score, 2);
        assert_eq!(result.total, 2);
        assert_eq!(result.details.len(), 2);
    }

    #[test]
    fn extra_submitted_items_fail() {
        let engine = GradingEngine::builtin();
        let mut answers = PROBABILITY.to_vec();
        answers.push("bonus");

        let result = engine.grade_section("probability", &answers);
        assert_eq!(result.score, 5);
        assert_eq!(result.total, 6);
        assert_eq!(result.details[5], GradeDetail::incorrect(6, "bonus", ""));
    }

    #[test]
    fn blank_answers_are_incorrect() {
        let engine = GradingEngine::builtin();
        let result = engine.grade_section("statistics", &["", "average", "  "]);
        assert_eq!(result.score, 1);
        assert!(!result.details[0].correct);
        assert!(result.details[1].correct);
        assert!(!result.details[2].correct);
    }

    #[test]
    fn empty_submission() {
        let engine = GradingEngine::builtin();
        let result = engine.grade_section::<&str>("probability", &[]);
        assert_eq!(result.score, 0);
        assert_eq!(result.total, 0);
        assert!(result.details.is_empty());
    }

    #[test]
    fn injected_table_replaces_builtin() {
        let table: ModelAnswerTable = [Section::new("custom", vec!["42".into()])]
            .into_iter()
            .collect();
        let engine = GradingEngine::new(table);

        assert_eq!(engine.grade_section("custom", &["answer is 42"]).score, 1);
        assert_eq!(engine.grade_section("probability", &["1/2"]).score, 0);
    }

    #[test]
    fn grading_is_repeatable() {
        let engine = GradingEngine::builtin();
        let first = engine.grade_section("geometry", &["a² + b² = c²", "110"]);
        let second = engine.grade_section("geometry", &["a² + b² = c²", "110"]);
        assert_eq!(first, second);
        assert_eq!(first.score, 2);
    }
}
