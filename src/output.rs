//! Shared terminal output helpers for the CRUD commands.

use anyhow::{bail, Result};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::io::{BufRead, Write};

use home_inventory_core::search::PATH_SEPARATOR;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}

pub fn or_dash(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => "-",
    }
}

/// A location path, or `-` when every segment of it is empty.
pub fn path_or_dash(path: &str) -> &str {
    if path.split(PATH_SEPARATOR).all(|segment| segment.trim().is_empty()) {
        "-"
    } else {
        path
    }
}

pub fn format_ts(ts: Option<NaiveDateTime>) -> String {
    ts.map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Ask before a destructive action.
///
/// `--yes` skips the question. Without it, stdin must be a terminal.
pub fn confirm(prompt: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    if !atty::is(atty::Stream::Stdin) {
        bail!("refusing to delete without --yes when stdin is not a terminal");
    }
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    ask(prompt, &mut stdin.lock(), &mut stdout)
}

fn ask<R: BufRead, W: Write>(prompt: &str, input: &mut R, out: &mut W) -> Result<bool> {
    write!(out, "{} [y/N] ", prompt)?;
    out.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
