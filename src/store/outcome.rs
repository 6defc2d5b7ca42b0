//! Game outcomes and their backpropagation up the tree.
//!
//! A finished game stores its payload (`outcome.txt`, `key=value` lines) at
//! the terminal state. Every ancestor up to a stop point gets a reference
//! named by the `.`-joined action suffix leading from it down to the terminal
//! state, so a node can list which finished games run through it.

use std::collections::BTreeMap;

use crate::core::state::GameState;
use crate::deck::Seed;
use crate::error::{EngineError, Result};

use super::key::StateKey;
use super::StateStore;

/// Terminal payload: ordered `key=value` pairs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    fields: BTreeMap<String, String>,
}

impl Outcome {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Headline result of a state: winner (empty for none), turn, and lore.
    #[must_use]
    pub fn for_state(state: &GameState) -> Self {
        let mut outcome = Self::new()
            .with("winner", state.winner().map(|w| w.to_string()).unwrap_or_default())
            .with("turn", state.graph.game.turn.to_string());
        for (player, node) in state.graph.players.iter() {
            outcome.insert(format!("lore_{player}"), node.lore.to_string());
        }
        outcome
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn render(&self) -> String {
        self.fields
            .iter()
            .map(|(k, v)| format!("{k}={v}\n"))
            .collect()
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut outcome = Self::new();
        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            let (k, v) = line
                .split_once('=')
                .ok_or_else(|| EngineError::parse(format!("malformed outcome line '{line}'")))?;
            outcome.insert(k, v);
        }
        Ok(outcome)
    }
}

/// Record `payload` at `terminal` and a reference at each ancestor above it.
///
/// The walk climbs one level at a time and stops before `stop_at` (which gets
/// nothing) or after the top-level segment. Returns the number of references
/// written.
pub fn backpropagate<S: StateStore + ?Sized>(
    store: &mut S,
    terminal: &StateKey,
    stop_at: Option<&StateKey>,
    payload: &Outcome,
) -> Result<usize> {
    store.save_outcome(terminal, None, payload)?;

    let mut written = 0;
    for ancestor in terminal.ancestors() {
        if stop_at == Some(&ancestor) {
            break;
        }
        let suffix = terminal
            .suffix_from(&ancestor)
            .map(|parts| parts.join("."))
            .unwrap_or_default();
        store.save_outcome(&ancestor, Some(&suffix), payload)?;
        written += 1;
    }

    tracing::debug!(terminal = %terminal, refs = written, "outcome recorded");
    Ok(written)
}

/// Prefix of `key` ending at its first seed segment, if any.
#[must_use]
pub fn find_seed_key(key: &StateKey) -> Option<StateKey> {
    let mut prefix: Option<StateKey> = None;
    for segment in key.segments() {
        let next = match &prefix {
            Some(p) => p.join(segment).ok()?,
            None => StateKey::root(segment).ok()?,
        };
        if Seed::is_seed(segment) {
            return Some(next);
        }
        prefix = Some(next);
    }
    None
}
