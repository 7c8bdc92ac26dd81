//! Core data model types for quizmark.
//!
//! These are the types the whole system shares: model-answer tables that the
//! engine grades against, and the results it produces.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// How a model answer is compared against learner input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerKind {
    /// Numbers, fractions, equations with π or √: substring or tolerance match.
    Numeric,
    /// Definitions and short phrases: keyword overlap match.
    Prose,
}

impl fmt::Display for AnswerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerKind::Numeric => write!(f, "numeric"),
            AnswerKind::Prose => write!(f, "prose"),
        }
    }
}

/// One document section and its ordered model answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Section identifier, matched case-sensitively.
    pub id: String,
    /// Human-readable title.
    #[serde(default)]
    pub title: String,
    /// Model answers; index `i` grades the `i`-th submitted answer.
    #[serde(default)]
    pub answers: Vec<String>,
}

impl Section {
    pub fn new(id: impl Into<String>, answers: Vec<String>) -> Self {
        let id = id.into();
        Self {
            title: id.clone(),
            id,
            answers,
        }
    }
}

/// Immutable mapping from section id to its model answers.
///
/// Built once (from the built-in set or a TOML file) and injected into the
/// [`GradingEngine`](crate::engine::GradingEngine).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelAnswerTable {
    sections: BTreeMap<String, Section>,
}

impl ModelAnswerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The model answers shipped with the document.
    pub fn builtin() -> Self {
        let mut table = Self::new();
        for (id, title, answers) in BUILTIN_SECTIONS {
            table.insert(Section {
                id: (*id).to_string(),
                title: (*title).to_string(),
                answers: answers.iter().map(|a| (*a).to_string()).collect(),
            });
        }
        table
    }

    /// Add or replace a section, returning the one it replaced.
    pub fn insert(&mut self, section: Section) -> Option<Section> {
        self.sections.insert(section.id.clone(), section)
    }

    pub fn get(&self, id: &str) -> Option<&Section> {
        self.sections.get(id)
    }

    /// Model answers for a section; unknown sections have none.
    pub fn answers(&self, id: &str) -> &[String] {
        self.sections
            .get(id)
            .map(|s| s.answers.as_slice())
            .unwrap_or(&[])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sections.contains_key(id)
    }

    pub fn section_ids(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.values()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Merge another table into this one; sections in `other` win.
    pub fn extend(&mut self, other: ModelAnswerTable) {
        self.sections.extend(other.sections);
    }
}

impl FromIterator<Section> for ModelAnswerTable {
    fn from_iter<I: IntoIterator<Item = Section>>(iter: I) -> Self {
        let mut table = Self::new();
        for section in iter {
            table.insert(section);
        }
        table
    }
}

/// Correctness of a single compared item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeDetail {
    /// 1-based question number.
    pub index: usize,
    /// Whether the submitted answer matched.
    pub correct: bool,
    /// Raw learner input, kept only for incorrect items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Raw model answer, kept only for incorrect items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl GradeDetail {
    pub fn correct(index: usize) -> Self {
        Self {
            index,
            correct: true,
            user: None,
            model: None,
        }
    }

    pub fn incorrect(index: usize, user: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            index,
            correct: false,
            user: Some(user.into()),
            model: Some(model.into()),
        }
    }
}

/// Outcome of grading one submission for one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeResult {
    /// Section the submission was graded against.
    pub section: String,
    /// Number of correct items.
    pub score: usize,
    /// Number of submitted items.
    pub total: usize,
    /// One entry per submitted item, in order.
    pub details: Vec<GradeDetail>,
}

impl GradeResult {
    /// True when every submitted item is correct.
    pub fn is_perfect(&self) -> bool {
        self.score == self.total
    }

    /// Incorrect items, in question order.
    pub fn incorrect(&self) -> impl Iterator<Item = &GradeDetail> {
        self.details.iter().filter(|d| !d.correct)
    }

    /// Fraction of correct items (0.0 for an empty submission).
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.score as f64 / self.total as f64
        }
    }
}

type BuiltinSection = (&'static str, &'static str, &'static [&'static str]);

const BUILTIN_SECTIONS: &[BuiltinSection] = &[
    (
        "sets",
        "Sets",
        &[
            "a set is a well-defined collection of distinct objects",
            "3",
            " (a ∪ b)' = a' ∩ b' ",
            "5",
            "{a}",
        ],
    ),
    (
        "taxation",
        "Taxation",
        &[
            "taxation is the system by which government collects money",
            "gst",
            "equity",
            "direct tax",
            "tax payable = taxable income × tax rate",
        ],
    ),
    (
        "geometry",
        "Geometry",
        &[
            "a² + b² = c²",
            "110",
            "equilateral isosceles scalene",
            "πr²",
            "5",
        ],
    ),
    (
        "realnumbers",
        "Real Numbers",
        &["irrational", "1/3", "surd", "0.125", "rational"],
    ),
    (
        "algebra",
        "Algebra",
        &[
            "x² + 6x + 9",
            "(x-3)(x+3)",
            "coefficient",
            "3x² + 2x + 1",
            "(x-y)(x² + xy + y²)",
        ],
    ),
    (
        "mensuration",
        "Mensuration",
        &["πr²h", "d1 × d2 / 2", "6a²", "0.02", "πrl"],
    ),
    (
        "trigonometry",
        "Trigonometry",
        &["opp/hyp", "1", "sec", "5", "surveying"],
    ),
    (
        "statistics",
        "Statistics",
        &["mean", "average", "bimodal", "survey", "6"],
    ),
    (
        "probability",
        "Probability",
        &["1/2", "1/6", "sample space", "subset", "practice"],
    ),
    (
        "lineareq",
        "Linear Equations",
        &["4", "ax + by = c", "substitution", "slope", "substitute"],
    ),
];
