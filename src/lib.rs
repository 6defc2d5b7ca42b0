//! # inkgraph
//!
//! A Lorcana rules engine over an explicit, persistent game tree.
//!
//! ## Design Principles
//!
//! 1. **State is a graph**: game, player, zone and card nodes; containment,
//!    turn and legal-action edges. Serializing a state means writing its
//!    graph.
//!
//! 2. **Every transition is stored**: applying action `id` at key `k` always
//!    produces the state stored at `k/id`. Action ids are derived from the
//!    state alone, so replaying a path reproduces the same tree byte for byte.
//!
//! 3. **Catalog passed explicitly**: card statistics live in a read-only
//!    `CardCatalog` shared by `Arc`; nothing is global.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) cloning via `im-rs`, so every store
//!   load can hand out an isolated copy.
//!
//! - **Deterministic Deal**: seeds name each starting hand and key a ChaCha8
//!   shuffle of the rest of each deck.
//!
//! ## Modules
//!
//! - `core`: node ids, players, the state graph, actions, RNG, configuration
//! - `zones`: per-player zones and card containment
//! - `cards`: catalog entries, card instances, the catalog
//! - `rules`: legal actions, execution, state-based effects, action ids
//! - `deck`: decklists, seeds, the shuffle
//! - `store`: the game-tree store (`FileStore`, `MemoryStore`), outcomes
//! - `setup`: matchup creation and the deal
//! - `session`: tree walking, random playouts, transition profiling

pub mod error;
pub mod core;
pub mod zones;
pub mod cards;
pub mod rules;
pub mod deck;
pub mod store;
pub mod setup;
pub mod session;

// Re-export commonly used types
pub use crate::error::{EngineError, Result};

pub use crate::core::{
    CardKey, NodeRef, PlayerId, PlayerMap,
    GameRng, EngineConfig,
    ActionEntry, ActionId, ActionKind, LegalAction,
    GameGraph, GameState, StateSummary,
};

pub use crate::zones::{ZoneKind, ZoneManager, ZoneRef};

pub use crate::cards::{CardCatalog, CardDefinition, CardInstance, CardType};

pub use crate::rules::{GameResult, LorcanaRules, RulesEngine, StateBasedEffect};

pub use crate::deck::{build_shuffled_deck, Decklist, Seed};

pub use crate::store::{
    backpropagate, find_seed_key,
    FileStore, MemoryStore, Outcome, StateKey, StateStore,
};

pub use crate::setup::{init_matchup, matchup_key, shuffle_and_deal};

pub use crate::session::{apply_action_at_key, profile_transition, GameSession, Playout, TransitionProfile};
