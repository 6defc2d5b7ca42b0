//! In-process store for sessions and tests.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;

use crate::core::action::{ActionEntry, ActionId};
use crate::core::state::GameState;
use crate::error::{EngineError, Result};

use super::key::StateKey;
use super::navigation::{action_entries, breadcrumb};
use super::outcome::Outcome;
use super::{sort_ids, StateStore};

#[derive(Clone, Debug)]
struct Entry {
    state: GameState,
    actions: Vec<ActionEntry>,
    path: Vec<String>,
}

/// Volatile store backed by hash maps.
///
/// States are cloned on the way in and on the way out; with the graph built on
/// `im` collections both copies share structure with the stored one.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    states: FxHashMap<StateKey, Entry>,
    outcomes: FxHashMap<StateKey, Outcome>,
    outcome_refs: FxHashMap<StateKey, BTreeSet<String>>,
    decklists: FxHashMap<StateKey, (String, String)>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored states.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.states.clear();
        self.outcomes.clear();
        self.outcome_refs.clear();
        self.decklists.clear();
    }

    fn entry(&self, key: &StateKey) -> Result<&Entry> {
        self.states.get(key).ok_or_else(|| EngineError::not_found(key))
    }
}

impl StateStore for MemoryStore {
    fn load(&self, key: &StateKey) -> Result<GameState> {
        Ok(self.entry(key)?.state.clone())
    }

    fn save(&mut self, state: &GameState, key: &StateKey) -> Result<()> {
        let path = match key.parent().and_then(|p| self.states.get(&p)) {
            Some(parent) => breadcrumb(key, &parent.path, &parent.actions),
            None => Vec::new(),
        };
        let entry = Entry {
            state: state.clone(),
            actions: action_entries(&state.graph),
            path,
        };
        self.states.insert(key.clone(), entry);
        Ok(())
    }

    fn exists(&self, key: &StateKey) -> bool {
        self.states.contains_key(key)
    }

    fn get_actions(&self, key: &StateKey) -> Result<Vec<ActionEntry>> {
        Ok(self.entry(key)?.actions.clone())
    }

    fn get_path(&self, key: &StateKey) -> Result<Vec<String>> {
        Ok(self.entry(key)?.path.clone())
    }

    fn save_outcome(
        &mut self,
        key: &StateKey,
        suffix: Option<&str>,
        outcome: &Outcome,
    ) -> Result<()> {
        match suffix {
            None => {
                self.outcomes.insert(key.clone(), outcome.clone());
            }
            Some(suffix) => {
                self.outcome_refs
                    .entry(key.clone())
                    .or_default()
                    .insert(suffix.to_string());
            }
        }
        Ok(())
    }

    fn get_outcomes(&self, key: &StateKey) -> Result<Vec<String>> {
        Ok(self
            .outcome_refs
            .get(key)
            .map(|refs| refs.iter().cloned().collect())
            .unwrap_or_default())
    }

    fn get_outcome(&self, key: &StateKey) -> Result<Option<Outcome>> {
        Ok(self.outcomes.get(key).cloned())
    }

    fn save_decklists(&mut self, key: &StateKey, deck1: &str, deck2: &str) -> Result<()> {
        self.decklists
            .insert(key.clone(), (deck1.to_string(), deck2.to_string()));
        Ok(())
    }

    fn load_decklists(&self, key: &StateKey) -> Result<(String, String)> {
        self.decklists
            .get(key)
            .cloned()
            .ok_or_else(|| EngineError::not_found(key))
    }

    fn list_children(&self, key: &StateKey) -> Result<Vec<ActionId>> {
        let mut ids: Vec<ActionId> = self
            .states
            .keys()
            .filter(|k| k.parent().as_ref() == Some(key))
            .filter(|k| crate::rules::decode_index(k.last()).is_some())
            .map(|k| ActionId::new(k.last()))
            .collect();
        sort_ids(&mut ids);
        Ok(ids)
    }
}
