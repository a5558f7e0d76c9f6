//! Nerd Font glyphs used on the status line.
//!
//! Icons that sit in front of text carry their own trailing space so callers can
//! concatenate them directly.

// Counters
pub const AHEAD: &str = "\u{F40A} ";
pub const BEHIND: &str = "\u{F409} ";
pub const UNMERGED: &str = "\u{F1A98} ";
pub const ADDED: &str = "\u{F034C} ";
pub const DELETED: &str = "\u{F0AD3} ";
pub const RENAMED: &str = "\u{EBCB} ";
pub const COPIED: &str = "\u{F0191} ";
pub const MODIFIED: &str = "\u{F1787} ";
pub const STAGED: &str = "\u{F01C} ";
pub const STASHED: &str = "\u{E257} ";

// Branch state
pub const NEW: &str = "\u{F403} ";
pub const GONE: &str = "\u{F48E} ";
pub const CLEAN: &str = "\u{EBB1}";
pub const DIRTY: &str = "\u{F256} ";

// Branch categories
pub const FEATURE: &str = "\u{F0EB} ";
pub const HOTFIX: &str = "\u{F490} ";
pub const RELEASE: &str = "\u{F45D} ";
pub const CHORE: &str = "\u{F00E2} ";
pub const BUGFIX: &str = "\u{F188} ";

// Decorations
pub const GIT: &str = "\u{F418} ";
pub const ARROW_RIGHT: &str = "\u{E0B0}";
pub const SEPARATOR: &str = "\u{E621}";
pub const DIVIDER: &str = "|";
pub const FAILED: &str = "\u{F04E7}";
pub const SYNC: &str = "\u{F1378}";
pub const ELLIPSIS: &str = "…";
