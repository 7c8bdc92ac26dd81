//! The `quizmark progress` command.

use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use comfy_table::{Cell, Table};

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let dispatcher = super::open_dispatcher(config_path.as_deref(), None)?;
    let saved = dispatcher.saved_progress();

    if saved.is_empty() {
        println!("No saved progress.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Section", "Score", "Saved at"]);

    for (section, record) in &saved {
        table.add_row(vec![
            Cell::new(section),
            Cell::new(format!("{} / {}", record.score, record.total)),
            Cell::new(
                record
                    .ts
                    .with_timezone(&Local)
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string(),
            ),
        ]);
    }

    println!("{table}");

    let score: usize = saved.values().map(|r| r.score).sum();
    let total: usize = saved.values().map(|r| r.total).sum();
    println!("Overall: {score} / {total} across {} section(s)", saved.len());

    Ok(())
}
