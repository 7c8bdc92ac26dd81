//! quizmark-store: Key-value store backends.
//!
//! Implements the `KeyValueStore` trait with an in-memory store and a JSON
//! file store, and loads the quizmark configuration that selects between them.

pub mod config;
pub mod file;
pub mod memory;

pub use config::{create_store, load_config, QuizmarkConfig, StoreConfig};
pub use file::FileStore;
pub use memory::MemoryStore;
