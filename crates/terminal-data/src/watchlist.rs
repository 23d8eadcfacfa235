//! Watchlist file persistence.
//!
//! The watchlist is a plain text file the user may edit by hand, one
//! instrument per line: a 6-digit code optionally followed by a display
//! name, separated by comma, pipe, tab or spaces. `#` starts a comment.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use terminal_core::error::DataError;
use terminal_core::types::Symbol;
use tracing::warn;

/// One watchlist row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchEntry {
    pub code: String,
    pub name: String,
}

/// In-memory watchlist bound to its backing file.
pub struct Watchlist {
    path: PathBuf,
    entries: Vec<WatchEntry>,
}

impl Watchlist {
    /// Load from `path`. A missing file is an empty watchlist, not an
    /// error; unparseable lines are skipped with a warning.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, DataError> {
        let path = path.into();
        let mut entries = Vec::new();

        if path.exists() {
            let contents = fs::read_to_string(&path)?;
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                match parse_line(line) {
                    Some(entry) => entries.push(entry),
                    None => warn!(line, "skipping unparseable watchlist line"),
                }
            }
        }

        Ok(Self { path, entries })
    }

    /// Write the current entries back, with a header for hand-editors.
    pub fn save(&self) -> Result<(), DataError> {
        let mut out = String::from("# Watchlist: one instrument per line, \"code,name\".\n");
        for entry in &self.entries {
            if entry.name.is_empty() {
                out.push_str(&entry.code);
            } else {
                out.push_str(&format!("{},{}", entry.code, entry.name));
            }
            out.push('\n');
        }
        fs::write(&self.path, out)?;
        Ok(())
    }

    /// Add a code, validating it and ignoring duplicates. Returns whether
    /// the list changed.
    pub fn add(&mut self, code: &str, name: &str) -> Result<bool, DataError> {
        let symbol = Symbol::parse(code)?;
        if self.contains(symbol.code()) {
            return Ok(false);
        }
        self.entries.push(WatchEntry {
            code: symbol.code().to_string(),
            name: name.to_string(),
        });
        Ok(true)
    }

    /// Remove a code. Returns whether it was present.
    pub fn remove(&mut self, code: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.code != code);
        self.entries.len() != before
    }

    pub fn contains(&self, code: &str) -> bool {
        self.entries.iter().any(|e| e.code == code)
    }

    pub fn entries(&self) -> &[WatchEntry] {
        &self.entries
    }

    /// Parsed symbols, in file order.
    pub fn symbols(&self) -> Vec<Symbol> {
        self.entries
            .iter()
            .filter_map(|e| Symbol::parse(&e.code).ok())
            .collect()
    }

    /// Entries reordered for display: codes in `held` first, each group
    /// keeping file order.
    pub fn sorted(&self, held: &HashSet<String>) -> Vec<&WatchEntry> {
        let mut ordered: Vec<&WatchEntry> =
            self.entries.iter().filter(|e| held.contains(&e.code)).collect();
        ordered.extend(self.entries.iter().filter(|e| !held.contains(&e.code)));
        ordered
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Split one line into code and optional name.
fn parse_line(line: &str) -> Option<WatchEntry> {
    let (code, name) = match line.find([',', '|', '\t', ' ']) {
        Some(pos) => (&line[..pos], line[pos + 1..].trim()),
        None => (line, ""),
    };

    let symbol = Symbol::parse(code.trim()).ok()?;
    Some(WatchEntry {
        code: symbol.code().to_string(),
        name: name.to_string(),
    })
}
