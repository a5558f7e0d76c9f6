//! Parser for `git status --porcelain=v2 --branch` output.
//!
//! Every line starts with a type tag:
//!
//! ```text
//! # branch.oid <commit> | (initial)
//! # branch.head <branch> | (detached)
//! # branch.upstream <upstream>
//! # branch.ab +<ahead> -<behind>
//! 1 <XY> <sub> <mH> <mI> <mW> <hH> <hI> <path>
//! 2 <XY> <sub> <mH> <mI> <mW> <hH> <hI> <X><score> <path>\t<origPath>
//! u <XY> <sub> <m1> <m2> <m3> <mW> <h1> <h2> <h3> <path>
//! ? <path>
//! ```
//!
//! A detached HEAD leaves the branch empty. Blank lines and unknown tags are skipped. A malformed `branch.ab` header is not
//! fatal: the counts parsed so far are kept and a diagnostic is recorded.

use crate::core::{
    change::ChangeKind,
    diagnostics::{Degraded, DiagnosticKind},
    snapshot::RepositorySnapshot,
};

const DETACHED_HEAD: &str = "(detached)";

/// Parse the whole status output into the status fields of a snapshot
pub fn parse_porcelain_v2(output: &str) -> Degraded<RepositorySnapshot> {
    let mut parsed = Degraded::new(RepositorySnapshot::default());
    for line in output.lines().filter(|line| !line.trim().is_empty()) {
        parse_line(line, &mut parsed);
    }
    parsed
}

fn parse_line(line: &str, parsed: &mut Degraded<RepositorySnapshot>) {
    let mut words = line.split_whitespace();
    match words.next() {
        Some("#") => parse_header(words, parsed),
        Some("1") | Some("2") => parse_tracked(words, &mut parsed.value),
        Some("u") => parsed.value.unmerged = parsed.value.unmerged.saturating_add(1),
        Some("?") => parsed.value.untracked = parsed.value.untracked.saturating_add(1),
        _ => {}
    }
}

fn parse_header<'a>(
    mut words: impl Iterator<Item = &'a str>,
    parsed: &mut Degraded<RepositorySnapshot>,
) {
    let Some(key) = words.next() else {
        return;
    };
    match key {
        "branch.oid" => parsed.value.commit = words.next().unwrap_or_default().to_string(),
        "branch.head" => {
            parsed.value.branch = match words.next() {
                Some(DETACHED_HEAD) | None => String::new(),
                Some(branch) => branch.to_string(),
            }
        }
        "branch.upstream" => {
            parsed.value.upstream = words.next().unwrap_or_default().to_string()
        }
        "branch.ab" => parse_ahead_behind(words, parsed),
        _ => {}
    }
}

fn parse_ahead_behind<'a>(
    words: impl Iterator<Item = &'a str>,
    parsed: &mut Degraded<RepositorySnapshot>,
) {
    for token in words {
        let (sign, digits) = token.split_at(token.chars().next().map_or(0, char::len_utf8));
        let count = match digits.parse::<u32>() {
            Ok(count) => count,
            Err(e) => {
                parsed.warn(
                    DiagnosticKind::AheadBehind,
                    format!("could not parse '{token}': {e}"),
                );
                return;
            }
        };
        match sign {
            "+" => parsed.value.ahead = count,
            "-" => parsed.value.behind = count,
            _ => {
                parsed.warn(
                    DiagnosticKind::AheadBehind,
                    format!("unexpected sign in '{token}'"),
                );
                return;
            }
        }
    }
}

fn parse_tracked<'a>(mut words: impl Iterator<Item = &'a str>, snapshot: &mut RepositorySnapshot) {
    let Some(xy) = words.next() else {
        return;
    };
    let (staged, unstaged) = ChangeKind::from_xy(xy);
    if let Some(kind) = staged {
        snapshot.staged.record(kind);
    }
    if let Some(kind) = unstaged {
        snapshot.unstaged.record(kind);
    }
}
