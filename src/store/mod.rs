//! Persistent game-tree store.
//!
//! Every settled state is saved under a [`StateKey`] derived from the path of
//! action ids that produced it, so the store *is* the explored game tree.
//!
//! ## Key Types
//!
//! - `StateStore`: the backend contract
//! - `FileStore`: one directory per key (`game.dot`, decks, navigation files)
//! - `MemoryStore`: the same contract over in-process maps
//! - `Outcome`: terminal payload, propagated to ancestors by [`backpropagate`]
//!
//! Loads always hand out an isolated copy; mutating it never changes what is
//! stored.

pub mod dot;
pub mod file;
pub mod key;
pub mod memory;
pub mod navigation;
pub mod outcome;

pub use file::FileStore;
pub use key::StateKey;
pub use memory::MemoryStore;
pub use outcome::{backpropagate, find_seed_key, Outcome};

use crate::core::action::{ActionEntry, ActionId};
use crate::core::state::GameState;
use crate::error::Result;

/// Storage backend for game states.
pub trait StateStore {
    /// Load an isolated copy of the state at `key`.
    ///
    /// Fails with `NotFound` if nothing is stored there.
    fn load(&self, key: &StateKey) -> Result<GameState>;

    /// Store `state` at `key`, together with its action index and breadcrumb.
    fn save(&mut self, state: &GameState, key: &StateKey) -> Result<()>;

    fn exists(&self, key: &StateKey) -> bool;

    /// Action index of the state at `key`, in id order.
    fn get_actions(&self, key: &StateKey) -> Result<Vec<ActionEntry>>;

    /// Breadcrumb of the state at `key`: one `<id>: <description>` line per
    /// action from the deal down to it.
    fn get_path(&self, key: &StateKey) -> Result<Vec<String>>;

    /// Record an outcome at `key`.
    ///
    /// `suffix: None` stores the payload itself (terminal state); `Some` adds
    /// a reference named by the action suffix leading to the terminal state.
    fn save_outcome(&mut self, key: &StateKey, suffix: Option<&str>, outcome: &Outcome)
        -> Result<()>;

    /// Outcome references at `key`, sorted. Empty when there are none.
    fn get_outcomes(&self, key: &StateKey) -> Result<Vec<String>>;

    /// Terminal payload stored at `key`, if any.
    fn get_outcome(&self, key: &StateKey) -> Result<Option<Outcome>>;

    /// Keep the source decklists of a matchup next to its root.
    fn save_decklists(&mut self, key: &StateKey, deck1: &str, deck2: &str) -> Result<()>;

    fn load_decklists(&self, key: &StateKey) -> Result<(String, String)>;

    /// Ids of the explored children of `key`, in id order.
    fn list_children(&self, key: &StateKey) -> Result<Vec<ActionId>>;
}

/// Sort action ids by their numeric value.
pub(crate) fn sort_ids(ids: &mut [ActionId]) {
    ids.sort_by_key(|id| (crate::rules::decode_index(id.as_str()), id.as_str().to_string()));
}
