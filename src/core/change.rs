//! Type-safe porcelain change codes.
//!
//! Porcelain v2 describes each tracked entry with a two character `XY` code: `X` is the
//! staged (index) state, `Y` the unstaged (work tree) state. [`ChangeKind`] covers the
//! five codes the status line counts; everything else (`.`, `T`, `U`, ...) is ignored.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeKind {
    /// Modified file (M)
    Modified,
    /// Added file (A)
    Added,
    /// Deleted file (D)
    Deleted,
    /// Renamed file (R)
    Renamed,
    /// Copied file (C)
    Copied,
}

impl ChangeKind {
    /// Map one side of an `XY` code; unknown codes yield `None`
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'M' => Some(ChangeKind::Modified),
            'A' => Some(ChangeKind::Added),
            'D' => Some(ChangeKind::Deleted),
            'R' => Some(ChangeKind::Renamed),
            'C' => Some(ChangeKind::Copied),
            _ => None,
        }
    }

    /// Split an `XY` code into its staged and unstaged kinds
    pub fn from_xy(xy: &str) -> (Option<Self>, Option<Self>) {
        let mut chars = xy.chars();
        let staged = chars.next().and_then(Self::from_code);
        let unstaged = chars.next().and_then(Self::from_code);
        (staged, unstaged)
    }

    pub fn as_char(&self) -> char {
        match self {
            ChangeKind::Modified => 'M',
            ChangeKind::Added => 'A',
            ChangeKind::Deleted => 'D',
            ChangeKind::Renamed => 'R',
            ChangeKind::Copied => 'C',
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
