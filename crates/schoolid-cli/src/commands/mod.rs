use anyhow::Result;
use serde::Serialize;
use std::io::{self, Write};

pub mod completions;
pub mod lookup;
pub mod tui;

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
