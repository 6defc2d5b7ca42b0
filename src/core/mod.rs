//! Core engine types: node identifiers, players, the state graph, actions,
//! RNG, configuration.
//!
//! This module knows nothing about individual mechanics. Rules read and
//! mutate `GameState` through the typed accessors defined here.

pub mod entity;
pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod graph;
pub mod state;

pub use entity::{CardKey, NodeRef, GAME_NODE};
pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
pub use config::EngineConfig;
pub use action::{ActionEntry, ActionId, ActionKind, Candidate, LegalAction};
pub use graph::{GameGraph, GameNode, PlayerNode};
pub use state::{base_name, GameState, StateSummary};
