//! Best-effort results with non-fatal notes.
//!
//! Several queries are allowed to fail without spoiling the status line: a malformed
//! ahead/behind token, a failed remote branch lookup, an unreadable stash log. Those
//! paths keep a zero/default value and record a [`Diagnostic`] next to it, so callers
//! and tests can inspect what was degraded without scraping the log.

use std::fmt;

/// Which query produced a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// `# branch.ab` header could not be parsed
    AheadBehind,
    /// Known remote branches could not be listed
    RemoteBranches,
    /// Stash log could not be read
    Stash,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiagnosticKind::AheadBehind => "ahead/behind",
            DiagnosticKind::RemoteBranches => "remote branches",
            DiagnosticKind::Stash => "stash",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// A value that may have been produced with some parts left at their defaults
#[derive(Debug, Clone, PartialEq)]
pub struct Degraded<T> {
    pub value: T,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Degraded<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            diagnostics: Vec::new(),
        }
    }

    /// Record a non-fatal note; it is also written to the log at warn level
    pub fn warn(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        let diagnostic = Diagnostic {
            kind,
            message: message.into(),
        };
        log::warn!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }

    /// Append notes collected elsewhere (already logged)
    pub fn absorb(&mut self, diagnostics: Vec<Diagnostic>) {
        self.diagnostics.extend(diagnostics);
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn has(&self, kind: DiagnosticKind) -> bool {
        self.diagnostics.iter().any(|d| d.kind == kind)
    }

    pub fn into_parts(self) -> (T, Vec<Diagnostic>) {
        (self.value, self.diagnostics)
    }
}
