//! Shared CLI helpers: path expansion, content input, JSON output.

use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Serialize;

/// Expand `~` at the start of a path to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_next::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs_next::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

/// Resolve the page content to summarize: `--content`, then `--file`, then stdin.
pub fn read_content(content: Option<String>, file: Option<&str>) -> Result<String> {
    if let Some(text) = content {
        return Ok(text);
    }
    if let Some(path) = file {
        return read_file(&expand_tilde(path));
    }

    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        bail!("no content given: pass --content, --file, or pipe text on stdin");
    }
    let mut buf = String::new();
    stdin
        .read_to_string(&mut buf)
        .context("failed to read content from stdin")?;
    Ok(buf)
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read content file: {}", path.display()))
}

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize response")?;
    println!("{json}");
    Ok(())
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
