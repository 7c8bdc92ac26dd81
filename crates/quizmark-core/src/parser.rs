//! TOML model-answer table parser.
//!
//! Loads model-answer tables from TOML files and directories, and validates
//! them for answers that can never (or only exactly) be matched.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::matcher::{classify, keywords, normalize};
use crate::model::{AnswerKind, ModelAnswerTable, Section};

/// Intermediate TOML structure for answer table files.
#[derive(Debug, Deserialize)]
struct TomlAnswerFile {
    #[serde(default)]
    sections: Vec<TomlSection>,
}

#[derive(Debug, Deserialize)]
struct TomlSection {
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    answers: Vec<String>,
}

/// A parsed table together with the section ids that appeared more than once.
#[derive(Debug, Clone)]
pub struct ParsedTable {
    pub table: ModelAnswerTable,
    pub duplicates: Vec<String>,
}

/// Parse a single TOML file into a `ModelAnswerTable`.
pub fn parse_answer_table(path: &Path) -> Result<ModelAnswerTable> {
    Ok(parse_answer_file(path)?.table)
}

fn parse_answer_file(path: &Path) -> Result<ParsedTable> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answer table: {}", path.display()))?;

    parse_answer_table_str(&content, path)
}

/// Parse a TOML string (useful for testing).
///
/// When a section id repeats, the later definition wins and the id is
/// reported in [`ParsedTable::duplicates`].
pub fn parse_answer_table_str(content: &str, source_path: &Path) -> Result<ParsedTable> {
    let parsed: TomlAnswerFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let mut table = ModelAnswerTable::new();
    let mut duplicates = Vec::new();

    for s in parsed.sections {
        anyhow::ensure!(
            !s.id.trim().is_empty(),
            "section with empty id in {}",
            source_path.display()
        );

        let section = Section {
            title: s.title.unwrap_or_else(|| s.id.clone()),
            id: s.id,
            answers: s.answers,
        };
        if let Some(previous) = table.insert(section) {
            duplicates.push(previous.id);
        }
    }

    Ok(ParsedTable { table, duplicates })
}

/// Load an answer table from a file, or merge every `.toml` under a directory.
pub fn load_answers(path: &Path) -> Result<ModelAnswerTable> {
    Ok(load_parsed_answers(path)?.table)
}

/// Like [`load_answers`], keeping the ids that were defined more than once,
/// either within one file or across files of a directory.
pub fn load_parsed_answers(path: &Path) -> Result<ParsedTable> {
    if path.is_dir() {
        load_parsed_directory(path)
    } else {
        parse_answer_file(path)
    }
}

/// Recursively load and merge all `.toml` answer tables in a directory.
///
/// Files are read in path order, so a later file overrides a section
/// defined by an earlier one.
pub fn load_answer_directory(dir: &Path) -> Result<ModelAnswerTable> {
    Ok(load_parsed_directory(dir)?.table)
}

fn load_parsed_directory(dir: &Path) -> Result<ParsedTable> {
    let mut merged = ParsedTable {
        table: ModelAnswerTable::new(),
        duplicates: Vec::new(),
    };

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            merged.merge(load_parsed_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_answer_file(&path) {
                Ok(parsed) => merged.merge(parsed),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(merged)
}

impl ParsedTable {
    fn merge(&mut self, other: ParsedTable) {
        let overridden: Vec<String> = other
            .table
            .section_ids()
            .filter(|id| self.table.contains(id))
            .map(str::to_string)
            .collect();
        self.duplicates.extend(other.duplicates);
        self.duplicates.extend(overridden);
        self.table.extend(other.table);
    }
}

/// A warning from answer table validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The section id (if applicable).
    pub section_id: Option<String>,
    /// 1-based question number (if applicable).
    pub question: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Validate a parsed table, including ids that were defined twice.
pub fn validate_parsed_table(parsed: &ParsedTable) -> Vec<ValidationWarning> {
    let mut warnings: Vec<_> = parsed
        .duplicates
        .iter()
        .collect::<HashSet<_>>()
        .into_iter()
        .map(|id| ValidationWarning {
            section_id: Some(id.clone()),
            question: None,
            message: format!("duplicate section ID: {id}"),
        })
        .collect();
    warnings.sort_by(|a, b| a.section_id.cmp(&b.section_id));
    warnings.extend(validate_answer_table(&parsed.table));
    warnings
}

/// Validate a table for answers learners cannot reasonably match.
pub fn validate_answer_table(table: &ModelAnswerTable) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for section in table.sections() {
        if section.answers.is_empty() {
            warnings.push(ValidationWarning {
                section_id: Some(section.id.clone()),
                question: None,
                message: "section has no model answers".into(),
            });
        }

        for (i, answer) in section.answers.iter().enumerate() {
            let normalized = normalize(answer);
            let message = if normalized.is_empty() {
                "model answer is blank and can never be matched"
            } else if classify(&normalized) == AnswerKind::Prose
                && keywords(&normalized).is_empty()
            {
                "model answer has no keyword longer than two characters; only exact answers match"
            } else {
                continue;
            };
            warnings.push(ValidationWarning {
                section_id: Some(section.id.clone()),
                question: Some(i + 1),
                message: message.into(),
            });
        }
    }

    warnings
}
