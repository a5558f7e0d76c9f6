//! Powerline-style status line rendering.
//!
//! A snapshot is first composed into an ordered list of [`Segment`]s, then written out
//! by one of two backends selected with [`RenderMode`]:
//!
//! - [`RenderMode::Tmux`]: tmux format markup (`#[fg=colourN,bg=colourM]`)
//! - [`RenderMode::Ansi`]: raw 256-colour escape sequences for a bare terminal
//!
//! Both backends consume the same segments, so the two outputs differ only in how
//! colours and transitions are spelled.
//!
//! # Line layout
//! ```text
//! [leading] <git> <branch> <state> [<separator> ahead behind unmerged|added deleted renamed copied modified|staged|stashed] [trailing]
//! ```
//!
//! The leading part is a plain arrow into the branch colour, a loading indicator while
//! a remote sync is in flight, or a failure marker when the last sync failed.

use crate::core::{icons, snapshot::RepositorySnapshot};
use std::borrow::Cow;

/// xterm-256 colour indices
pub mod colour {
    pub const PREVIOUS: u8 = 33;
    pub const TERMINAL: u8 = 235;
    pub const LOADING_BG: u8 = 56;
    pub const ERROR_BG: u8 = 160;
    pub const ERROR_FG: u8 = 254;

    pub const CLEAN_BG: u8 = 120;
    pub const NEW_BG: u8 = 251;
    pub const GONE_BG: u8 = 88;
    pub const DEFAULT_BG: u8 = 209;

    pub const CLEAN_FG: u8 = 0;
    pub const GONE_FG: u8 = 255;
    pub const DEFAULT_FG: u8 = 235;
}

/// Branch names longer than this many characters are truncated
pub const BRANCH_MAX_LEN: usize = 40;
const BRANCH_HEAD_LEN: usize = 24;
const BRANCH_TAIL_LEN: usize = 12;

/// Conventional branch prefixes, checked in order; the first match wins
const BRANCH_CATEGORIES: &[(&[&str], &str)] = &[
    (&["feat/", "feature/", "features/"], icons::FEATURE),
    (&["hotfix/", "hotfixes/"], icons::HOTFIX),
    (&["release/", "releases/"], icons::RELEASE),
    (&["chore/", "chores/"], icons::CHORE),
    (
        &["bug/", "bugfix/", "bugfixes/", "fix/", "fixes/"],
        icons::BUGFIX,
    ),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Tmux,
    Ansi,
}

impl RenderMode {
    pub fn from_no_tmux(no_tmux: bool) -> Self {
        if no_tmux {
            Self::Ansi
        } else {
            Self::Tmux
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Arrow out of whatever precedes the status line
    Leading { to: u8 },
    /// Arrow from one background into the next
    Transition { from: u8, to: u8 },
    Text { fg: u8, bg: u8, text: Cow<'a, str> },
    /// Arrow back into the terminal background
    Trailing { from: u8 },
}

/// Render a snapshot into one status line
pub fn render(snapshot: &RepositorySnapshot, mode: RenderMode) -> String {
    write_segments(&compose(snapshot), mode)
}

/// Standalone line shown while the status is being computed
pub fn render_loading(mode: RenderMode) -> String {
    let segments = [
        Segment::Leading {
            to: colour::LOADING_BG,
        },
        loading_text(),
        Segment::Trailing {
            from: colour::LOADING_BG,
        },
    ];
    write_segments(&segments, mode)
}

pub fn compose(snapshot: &RepositorySnapshot) -> Vec<Segment<'static>> {
    let bg = background(snapshot);
    let fg = foreground(snapshot);
    let mut segments = Vec::with_capacity(6);

    if snapshot.loading {
        segments.push(Segment::Leading {
            to: colour::LOADING_BG,
        });
        segments.push(loading_text());
        segments.push(Segment::Transition {
            from: colour::LOADING_BG,
            to: bg,
        });
    } else if !snapshot.remote_success {
        segments.push(Segment::Leading {
            to: colour::ERROR_BG,
        });
        segments.push(Segment::Text {
            fg: colour::ERROR_FG,
            bg: colour::ERROR_BG,
            text: Cow::Owned(format!(" {} ", icons::FAILED)),
        });
        segments.push(Segment::Transition {
            from: colour::ERROR_BG,
            to: bg,
        });
    } else {
        segments.push(Segment::Leading { to: bg });
    }

    segments.push(Segment::Text {
        fg,
        bg,
        text: Cow::Owned(branch_text(snapshot)),
    });
    segments.push(Segment::Trailing { from: bg });
    segments
}

fn loading_text() -> Segment<'static> {
    Segment::Text {
        fg: colour::ERROR_FG,
        bg: colour::LOADING_BG,
        text: Cow::Owned(format!(" {} ", icons::SYNC)),
    }
}

fn branch_text(snapshot: &RepositorySnapshot) -> String {
    let mut text = String::with_capacity(64);
    text.push(' ');
    text.push_str(icons::GIT);
    text.push_str(&shorten_branch(&snapshot.branch));

    if let Some(icon) = state_icon(snapshot) {
        push_gap(&mut text);
        text.push_str(icon);
    }

    let counters = counters(snapshot);
    if !counters.is_empty() {
        push_gap(&mut text);
        text.push_str(icons::SEPARATOR);
        text.push(' ');
        text.push_str(&counters);
    }

    push_gap(&mut text);
    text
}

// Icons may already end in a space
fn push_gap(text: &mut String) {
    if !text.ends_with(' ') {
        text.push(' ');
    }
}

/// Exactly one state icon for a named branch: new, then gone, then clean, then dirty
pub fn state_icon(snapshot: &RepositorySnapshot) -> Option<&'static str> {
    if !snapshot.has_branch() {
        return None;
    }
    if snapshot.is_new {
        Some(icons::NEW)
    } else if snapshot.is_gone {
        Some(icons::GONE)
    } else if snapshot.is_clean() {
        Some(icons::CLEAN)
    } else {
        Some(icons::DIRTY)
    }
}

/// Non-empty counter groups joined by the divider; empty when every counter is zero
pub fn counters(snapshot: &RepositorySnapshot) -> String {
    let unstaged = &snapshot.unstaged;
    let groups: [&[(u32, &str)]; 4] = [
        &[
            (snapshot.ahead, icons::AHEAD),
            (snapshot.behind, icons::BEHIND),
            (snapshot.unmerged, icons::UNMERGED),
        ],
        &[
            (
                snapshot.untracked.saturating_add(unstaged.added),
                icons::ADDED,
            ),
            (unstaged.deleted, icons::DELETED),
            (unstaged.renamed, icons::RENAMED),
            (unstaged.copied, icons::COPIED),
            (unstaged.modified, icons::MODIFIED),
        ],
        &[(snapshot.staged.count(), icons::STAGED)],
        &[(snapshot.stashed, icons::STASHED)],
    ];

    let mut buffer = itoa::Buffer::new();
    groups
        .iter()
        .map(|group| {
            let mut rendered = String::new();
            for &(count, icon) in group.iter().filter(|(count, _)| *count > 0) {
                rendered.push_str(buffer.format(count));
                rendered.push_str(icon);
            }
            rendered.trim_end().to_string()
        })
        .filter(|group| !group.is_empty())
        .collect::<Vec<_>>()
        .join(icons::DIVIDER)
}

/// Replace a conventional prefix with its category icon and truncate long names
pub fn shorten_branch(branch: &str) -> String {
    let (icon, name) = BRANCH_CATEGORIES
        .iter()
        .find_map(|(prefixes, icon)| {
            prefixes
                .iter()
                .find_map(|prefix| branch.strip_prefix(prefix))
                .map(|rest| (*icon, rest))
        })
        .unwrap_or(("", branch));

    let length = name.chars().count();
    if length <= BRANCH_MAX_LEN {
        return format!("{icon}{name}");
    }

    let head: String = name.chars().take(BRANCH_HEAD_LEN).collect();
    let tail: String = name.chars().skip(length - BRANCH_TAIL_LEN).collect();
    format!("{icon}{head}{}{tail}", icons::ELLIPSIS)
}

pub fn background(snapshot: &RepositorySnapshot) -> u8 {
    if snapshot.is_clean() {
        colour::CLEAN_BG
    } else if snapshot.is_new {
        colour::NEW_BG
    } else if snapshot.is_gone {
        colour::GONE_BG
    } else {
        colour::DEFAULT_BG
    }
}

pub fn foreground(snapshot: &RepositorySnapshot) -> u8 {
    if snapshot.is_clean() {
        colour::CLEAN_FG
    } else if snapshot.is_gone {
        colour::GONE_FG
    } else {
        colour::DEFAULT_FG
    }
}

fn write_segments(segments: &[Segment<'_>], mode: RenderMode) -> String {
    let mut line = String::with_capacity(256);
    for segment in segments {
        match mode {
            RenderMode::Tmux => write_tmux(segment, &mut line),
            RenderMode::Ansi => write_ansi(segment, &mut line),
        }
    }
    line
}

fn write_tmux(segment: &Segment<'_>, line: &mut String) {
    match segment {
        Segment::Leading { to } => {
            line.push_str(&tmux_colours(colour::PREVIOUS, *to));
            line.push_str(icons::ARROW_RIGHT);
        }
        Segment::Transition { from, to } => {
            line.push_str(&tmux_colours(*from, *to));
            line.push_str(icons::ARROW_RIGHT);
        }
        Segment::Text { fg, bg, text } => {
            line.push_str(&tmux_colours(*fg, *bg));
            // A lone '#' would start a tmux format sequence
            line.push_str(&text.replace('#', "##"));
        }
        Segment::Trailing { from } => {
            line.push_str(&tmux_colours(*from, colour::TERMINAL));
            line.push_str(icons::ARROW_RIGHT);
        }
    }
}

fn write_ansi(segment: &Segment<'_>, line: &mut String) {
    match segment {
        // Nothing precedes the line on a bare terminal
        Segment::Leading { to } => line.push_str(&ansi_colours(colour::PREVIOUS, *to)),
        Segment::Transition { from, to } => {
            line.push_str(&ansi_colours(*from, *to));
            line.push_str(icons::ARROW_RIGHT);
        }
        Segment::Text { fg, bg, text } => {
            line.push_str(&ansi_colours(*fg, *bg));
            line.push_str(text);
        }
        Segment::Trailing { from } => {
            line.push_str(&format!("\x1b[0m\x1b[38;5;{from}m"));
            line.push_str(icons::ARROW_RIGHT);
            line.push_str("\x1b[0m");
        }
    }
}

fn tmux_colours(fg: u8, bg: u8) -> String {
    format!("#[fg=colour{fg},bg=colour{bg}]")
}

fn ansi_colours(fg: u8, bg: u8) -> String {
    format!("\x1b[38;5;{fg}m\x1b[48;5;{bg}m")
}
