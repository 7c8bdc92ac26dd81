//! The `quizmark clear` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let dispatcher = super::open_dispatcher(config_path.as_deref(), None)?;
    let removed = dispatcher.clear_progress();
    println!("Cleared saved progress for {removed} section(s).");
    Ok(())
}
