//! Common assertion helpers for status line validation
//!
//! Provides predicates for the icons and colour markup the binary prints.

#![allow(dead_code)]

use git_status_bar::core::icons;
use predicates::prelude::*;

/// Output contains the given icon, ignoring its trailing space
pub fn has_icon(icon: &'static str) -> impl Predicate<str> {
    predicates::str::contains(icon.trim_end())
}

pub fn lacks_icon(icon: &'static str) -> impl Predicate<str> {
    has_icon(icon).not()
}

/// Exactly one non-empty line
pub fn single_line() -> impl Predicate<str> {
    predicates::function::function(|out: &str| out.lines().count() == 1 && !out.trim().is_empty())
}

/// A counter such as `2` followed by the icon for added files
pub fn has_counter(count: u32, icon: &'static str) -> impl Predicate<str> {
    predicates::str::contains(format!("{count}{}", icon.trim_end()))
}

pub fn is_tmux_markup() -> impl Predicate<str> {
    predicates::str::starts_with("#[fg=colour33,")
}

pub fn is_ansi() -> impl Predicate<str> {
    predicates::str::starts_with("\x1b[38;5;33m").and(predicates::str::ends_with("\x1b[0m\n"))
}

pub fn has_git_icon() -> impl Predicate<str> {
    has_icon(icons::GIT)
}
