//! Navigation records: the `actions.txt` index and the `path.txt` breadcrumb.
//!
//! Both are derived from stored states, never authoritative. The action
//! index lists `<id>: <description>` per line; the breadcrumb repeats the
//! parent's breadcrumb and appends the parent's index line for the action
//! that produced the state.

use crate::core::action::ActionEntry;
use crate::core::graph::GameGraph;
use crate::error::Result;

use super::key::StateKey;

/// Index entries of a graph's action edges, in id order.
#[must_use]
pub fn action_entries(graph: &GameGraph) -> Vec<ActionEntry> {
    graph.actions().iter().map(|a| a.entry()).collect()
}

/// Render entries one per line, each newline-terminated.
#[must_use]
pub fn render_lines<T: std::fmt::Display>(lines: &[T]) -> String {
    lines.iter().map(|l| format!("{l}\n")).collect()
}

pub fn parse_actions(text: &str) -> Result<Vec<ActionEntry>> {
    text.lines()
        .filter(|l| !l.trim().is_empty())
        .map(str::parse)
        .collect()
}

#[must_use]
pub fn parse_path(text: &str) -> Vec<String> {
    text.lines()
        .filter(|l| !l.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Breadcrumb for the state at `key`.
///
/// Roots have an empty breadcrumb. A child gets its parent's lines plus the
/// parent's index line whose id is the child's last segment; when the parent
/// has no such line (e.g. the segment is a seed) only the parent's lines are
/// kept.
#[must_use]
pub fn breadcrumb(
    key: &StateKey,
    parent_path: &[String],
    parent_actions: &[ActionEntry],
) -> Vec<String> {
    if key.parent().is_none() {
        return Vec::new();
    }
    let mut lines = parent_path.to_vec();
    if let Some(entry) = parent_actions.iter().find(|e| e.id.as_str() == key.last()) {
        lines.push(entry.to_string());
    }
    lines
}
