//! Configuration and store factory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quizmark_core::model::ModelAnswerTable;
use quizmark_core::parser;
use quizmark_core::progress::DEFAULT_KEY_PREFIX;
use quizmark_core::traits::KeyValueStore;

use crate::file::FileStore;
use crate::memory::MemoryStore;

/// Which key-value backend holds saved progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StoreConfig {
    File {
        #[serde(default = "default_store_path")]
        path: PathBuf,
    },
    Memory {
        #[serde(default)]
        quota_bytes: Option<usize>,
    },
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::File {
            path: default_store_path(),
        }
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from("quizmark-progress.json")
}

/// Top-level quizmark configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizmarkConfig {
    /// Where saved progress lives.
    #[serde(default)]
    pub store: StoreConfig,
    /// Namespace prepended to section ids in the store.
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
    /// Answer table file or directory; the built-in table when unset.
    #[serde(default)]
    pub answers: Option<PathBuf>,
}

fn default_key_prefix() -> String {
    DEFAULT_KEY_PREFIX.to_string()
}

impl Default for QuizmarkConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            key_prefix: default_key_prefix(),
            answers: None,
        }
    }
}

impl QuizmarkConfig {
    /// The configured answer table, or the built-in one.
    pub fn answer_table(&self) -> Result<ModelAnswerTable> {
        match &self.answers {
            Some(path) => parser::load_answers(path),
            None => Ok(ModelAnswerTable::builtin()),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not expanded again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizmark.toml` in the current directory
/// 2. `~/.config/quizmark/config.toml`
///
/// Environment variable override: `QUIZMARK_STORE_PATH` (forces a file store).
pub fn load_config() -> Result<QuizmarkConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizmarkConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizmark.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match &config_path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<QuizmarkConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizmarkConfig::default(),
    };

    if let Ok(store_path) = std::env::var("QUIZMARK_STORE_PATH") {
        config.store = StoreConfig::File {
            path: PathBuf::from(store_path),
        };
    }

    // Resolve env vars in paths
    if let StoreConfig::File { path } = &mut config.store {
        *path = resolve_path(path);
    }
    config.answers = config.answers.as_deref().map(resolve_path);

    tracing::debug!(
        "loaded config from {}",
        config_path
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "defaults".into())
    );

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizmark"))
}

/// Create a store instance from its configuration.
pub fn create_store(config: &StoreConfig) -> Result<Box<dyn KeyValueStore>> {
    match config {
        StoreConfig::File { path } => Ok(Box::new(FileStore::new(path.clone()))),
        StoreConfig::Memory { quota_bytes } => Ok(Box::new(match quota_bytes {
            Some(bytes) => MemoryStore::with_quota(*bytes),
            None => MemoryStore::new(),
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_QUIZMARK_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_QUIZMARK_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_QUIZMARK_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("no vars ${unclosed"), "no vars ${unclosed");
        std::env::remove_var("_QUIZMARK_TEST_VAR");
    }

    #[test]
    fn resolve_env_vars_does_not_expand_substituted_values() {
        std::env::set_var("_QUIZMARK_TEST_NESTED", "${_QUIZMARK_TEST_NESTED}/x");
        assert_eq!(
            resolve_env_vars("${_QUIZMARK_TEST_NESTED}/progress.json"),
            "${_QUIZMARK_TEST_NESTED}/x/progress.json"
        );
        assert_eq!(resolve_env_vars("${_QUIZMARK_UNSET_VAR}a"), "a");
        std::env::remove_var("_QUIZMARK_TEST_NESTED");
    }

    #[test]
    fn default_config() {
        let config = QuizmarkConfig::default();
        assert_eq!(config.key_prefix, "mm_progress_");
        assert!(config.answers.is_none());
        assert_eq!(
            config.store,
            StoreConfig::File {
                path: PathBuf::from("quizmark-progress.json")
            }
        );
        assert_eq!(config.answer_table().unwrap().len(), 10);
    }

    #[test]
    fn parse_store_config() {
        let toml_str = r#"
key_prefix = "course2_"
answers = "answers/"

[store]
type = "memory"
quota_bytes = 512
"#;
        let config: QuizmarkConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.key_prefix, "course2_");
        assert_eq!(config.answers, Some(PathBuf::from("answers/")));
        assert_eq!(
            config.store,
            StoreConfig::Memory {
                quota_bytes: Some(512)
            }
        );
    }

    #[test]
    fn load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let store_path = dir.path().join("p.json");
        let config_path = dir.path().join("quizmark.toml");
        std::fs::write(
            &config_path,
            format!(
                "[store]\ntype = \"file\"\npath = \"{}\"\n",
                store_path.display()
            ),
        )
        .unwrap();

        let config = load_config_from(Some(&config_path)).unwrap();
        if std::env::var("QUIZMARK_STORE_PATH").is_err() {
            assert_eq!(config.store, StoreConfig::File { path: store_path });
        }
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let err = load_config_from(Some(Path::new("definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn factory_builds_named_stores() {
        let memory = create_store(&StoreConfig::Memory { quota_bytes: None }).unwrap();
        assert_eq!(memory.name(), "memory");

        let dir = tempfile::tempdir().unwrap();
        let file = create_store(&StoreConfig::File {
            path: dir.path().join("s.json"),
        })
        .unwrap();
        assert_eq!(file.name(), "file");
        file.set("k", "v").unwrap();
        assert_eq!(file.get("k").unwrap().as_deref(), Some("v"));
    }
}
