//! Node identification for the state graph.
//!
//! Every node in a game state has a stable, human-readable name that is also
//! its identifier in the persisted graph:
//!
//! | node   | name                          |
//! |--------|-------------------------------|
//! | game   | `game`                        |
//! | player | `p1`, `p2`                    |
//! | zone   | `z.p1.hand`, `z.p2.ink`, ...  |
//! | card   | `p1.tipo_growing_son.a`       |
//!
//! Inside the engine nodes are addressed through the typed [`NodeRef`];
//! names only appear at the serialization boundary.
//!
//! ```
//! use inkgraph::core::{CardKey, NodeRef, PlayerId};
//!
//! let card = CardKey::new(PlayerId::P1, "tipo_growing_son.a");
//! assert_eq!(card.as_str(), "p1.tipo_growing_son.a");
//!
//! let node: NodeRef = "p1.tipo_growing_son.a".parse().unwrap();
//! assert_eq!(node, NodeRef::Card(card));
//! ```

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::player::PlayerId;
use crate::error::EngineError;
use crate::zones::ZoneRef;

/// Name of the singleton game node.
pub const GAME_NODE: &str = "game";

/// Identifier of a materialized card instance.
///
/// Formed from the owner and the per-copy deck id, e.g.
/// `p2.mickey_mouse_true_friend.c`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardKey(String);

impl CardKey {
    /// Build the key for a card drawn from `owner`'s deck.
    #[must_use]
    pub fn new(owner: PlayerId, deck_card_id: &str) -> Self {
        Self(format!("{owner}.{deck_card_id}"))
    }

    /// Wrap an already-formed node name.
    #[must_use]
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CardKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Typed reference to any node in the state graph.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NodeRef {
    Game,
    Player(PlayerId),
    Zone(ZoneRef),
    Card(CardKey),
}

impl NodeRef {
    /// The card this reference points at, if any.
    #[must_use]
    pub fn as_card(&self) -> Option<&CardKey> {
        match self {
            NodeRef::Card(key) => Some(key),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_player(&self) -> Option<PlayerId> {
        match self {
            NodeRef::Player(p) => Some(*p),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_zone(&self) -> Option<ZoneRef> {
        match self {
            NodeRef::Zone(z) => Some(*z),
            _ => None,
        }
    }
}

impl std::fmt::Display for NodeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeRef::Game => f.write_str(GAME_NODE),
            NodeRef::Player(p) => write!(f, "{p}"),
            NodeRef::Zone(z) => write!(f, "{z}"),
            NodeRef::Card(c) => write!(f, "{c}"),
        }
    }
}

impl FromStr for NodeRef {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == GAME_NODE {
            return Ok(NodeRef::Game);
        }
        if let Ok(player) = s.parse::<PlayerId>() {
            return Ok(NodeRef::Player(player));
        }
        if s.starts_with("z.") {
            return s.parse::<ZoneRef>().map(NodeRef::Zone);
        }
        if s.starts_with("p1.") || s.starts_with("p2.") {
            return Ok(NodeRef::Card(CardKey::from_raw(s)));
        }
        Err(EngineError::parse(format!("unrecognised node '{s}'")))
    }
}

impl From<PlayerId> for NodeRef {
    fn from(p: PlayerId) -> Self {
        NodeRef::Player(p)
    }
}

impl From<ZoneRef> for NodeRef {
    fn from(z: ZoneRef) -> Self {
        NodeRef::Zone(z)
    }
}

impl From<CardKey> for NodeRef {
    fn from(c: CardKey) -> Self {
        NodeRef::Card(c)
    }
}
