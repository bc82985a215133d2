// src/profile.rs
//! Parser for the line-oriented Go cover profile.
//!
//! ```text
//! mode: set
//! example.com/m/pkg/a.go:3.24,5.2 1 1
//! ```
//!
//! Each block line is `file:startLine.startCol,endLine.endCol numStmt count`.

use crate::error::{CoverageError, Result};
use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

const MODE_PREFIX: &str = "mode: ";

static BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+):([0-9]+)\.([0-9]+),([0-9]+)\.([0-9]+) ([0-9]+) ([0-9]+)$")
        .unwrap_or_else(|_| panic!("Invalid Regex"))
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Set,
    Count,
    Atomic,
}

impl Mode {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "set" => Some(Self::Set),
            "count" => Some(Self::Count),
            "atomic" => Some(Self::Atomic),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileBlock {
    pub start_line: u32,
    pub start_col: u32,
    pub end_line: u32,
    pub end_col: u32,
    pub num_stmt: u64,
    pub count: u64,
}

impl ProfileBlock {
    fn same_extent(&self, other: &Self) -> bool {
        self.start_line == other.start_line
            && self.start_col == other.start_col
            && self.end_line == other.end_line
            && self.end_col == other.end_col
    }
}

/// All blocks recorded for one file, sorted by start position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// File name exactly as the coverage tool wrote it (module-prefixed).
    pub file_name: String,
    pub mode: Mode,
    pub blocks: Vec<ProfileBlock>,
}

/// Reads and parses a profile file.
///
/// # Errors
/// Returns `ProfileIo` if the file cannot be read, or `Profile` if any line
/// is malformed.
pub fn read_profiles(path: &Path) -> Result<Vec<Profile>> {
    let content = fs::read_to_string(path).map_err(|source| CoverageError::ProfileIo {
        path: path.to_path_buf(),
        source,
    })?;
    parse_profiles(&content)
}

/// Parses profile text into per-file profiles sorted by file name.
///
/// # Errors
/// Returns `Profile` with the 1-based line number on a bad mode line or a
/// malformed block line, and `InconsistentBlock` when duplicate blocks
/// disagree on their statement count.
pub fn parse_profiles(content: &str) -> Result<Vec<Profile>> {
    let mut mode: Option<(Mode, &str)> = None;
    let mut files: BTreeMap<&str, Vec<ProfileBlock>> = BTreeMap::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        match mode {
            None => mode = Some((parse_mode(line, line_no)?, line)),
            Some((_, header)) if line == header => {}
            Some(_) => {
                let (name, block) = parse_block(line, line_no)?;
                files.entry(name).or_default().push(block);
            }
        }
    }

    let Some((mode, _)) = mode else {
        return Err(bad_line(1, "missing mode line"));
    };

    files
        .into_iter()
        .map(|(name, blocks)| {
            Ok(Profile {
                file_name: name.to_string(),
                mode,
                blocks: merge_blocks(name, blocks, mode)?,
            })
        })
        .collect()
}

fn parse_mode(line: &str, line_no: usize) -> Result<Mode> {
    line.strip_prefix(MODE_PREFIX)
        .and_then(Mode::parse)
        .ok_or_else(|| bad_line(line_no, &format!("bad mode line: {line}")))
}

fn parse_block(line: &str, line_no: usize) -> Result<(&str, ProfileBlock)> {
    let caps = BLOCK_RE
        .captures(line)
        .ok_or_else(|| bad_line(line_no, &format!("line {line:?} doesn't match expected format")))?;

    let num = |i: usize| -> Result<u64> {
        caps[i]
            .parse::<u64>()
            .map_err(|e| bad_line(line_no, &format!("{e}: {}", &caps[i])))
    };
    let pos = |i: usize| -> Result<u32> {
        u32::try_from(num(i)?).map_err(|e| bad_line(line_no, &e.to_string()))
    };

    let name = caps.get(1).map_or("", |m| m.as_str());
    let block = ProfileBlock {
        start_line: pos(2)?,
        start_col: pos(3)?,
        end_line: pos(4)?,
        end_col: pos(5)?,
        num_stmt: num(6)?,
        count: num(7)?,
    };
    Ok((name, block))
}

/// Sorts by start position and folds duplicate extents together, the way
/// the go tool does when several test binaries cover the same file.
fn merge_blocks(
    file_name: &str,
    mut blocks: Vec<ProfileBlock>,
    mode: Mode,
) -> Result<Vec<ProfileBlock>> {
    blocks.sort_by_key(|b| (b.start_line, b.start_col));

    let mut merged: Vec<ProfileBlock> = Vec::with_capacity(blocks.len());
    for block in blocks {
        match merged.last_mut() {
            Some(last) if last.same_extent(&block) => {
                if last.num_stmt != block.num_stmt {
                    return Err(CoverageError::InconsistentBlock {
                        file_name: file_name.to_string(),
                        from: last.num_stmt,
                        to: block.num_stmt,
                    });
                }
                if mode == Mode::Set {
                    last.count |= block.count;
                } else {
                    last.count = last.count.saturating_add(block.count);
                }
            }
            _ => merged.push(block),
        }
    }
    Ok(merged)
}

fn bad_line(line: usize, message: &str) -> CoverageError {
    CoverageError::Profile {
        line,
        message: message.to_string(),
    }
}
