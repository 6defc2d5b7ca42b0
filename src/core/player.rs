//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! Lorcana is strictly two-player: `p1` moves first, `p2` second. The id
//! renders as `p1`/`p2`, which is also its node name in the state graph.
//!
//! ## PlayerMap
//!
//! Fixed two-slot storage indexed by `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use crate::error::EngineError;

/// Player identifier (0-based index, rendered 1-based).
///
/// Only `P1` and `P2` exist; serde goes through the `p1`/`p2` names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct PlayerId(u8);

impl PlayerId {
    /// The player who takes the first turn.
    pub const P1: PlayerId = PlayerId(0);
    /// The player who takes the second turn.
    pub const P2: PlayerId = PlayerId(1);

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// 1-based player number, as used in deck file names.
    #[must_use]
    pub const fn number(self) -> u8 {
        self.0 + 1
    }

    /// The other player.
    #[must_use]
    pub const fn opponent(self) -> PlayerId {
        PlayerId(1 - self.0)
    }

    /// Iterate over both players in turn order.
    pub fn all() -> impl Iterator<Item = PlayerId> {
        [PlayerId::P1, PlayerId::P2].into_iter()
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "p{}", self.number())
    }
}

impl From<PlayerId> for String {
    fn from(player: PlayerId) -> Self {
        player.to_string()
    }
}

impl TryFrom<String> for PlayerId {
    type Error = EngineError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl FromStr for PlayerId {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "p1" => Ok(PlayerId::P1),
            "p2" => Ok(PlayerId::P2),
            _ => Err(EngineError::parse(format!("unknown player '{s}'"))),
        }
    }
}

/// Per-player data storage with O(1) access.
///
/// ```
/// use inkgraph::core::{PlayerId, PlayerMap};
///
/// let mut lore: PlayerMap<u32> = PlayerMap::with_value(0);
/// lore[PlayerId::P2] += 2;
/// assert_eq!(lore[PlayerId::P1], 0);
/// assert_eq!(lore[PlayerId::P2], 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; 2],
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: [factory(PlayerId::P1), factory(PlayerId::P2)],
        }
    }

    /// Create from explicit values in turn order.
    pub fn from_pair(p1: T, p2: T) -> Self {
        Self { data: [p1, p2] }
    }

    /// Create a new PlayerMap with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::all().zip(self.data.iter())
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        PlayerId::all().zip(self.data.iter_mut())
    }

    /// Transform every entry, keeping the player association.
    pub fn map<U>(&self, f: impl Fn(PlayerId, &T) -> U) -> PlayerMap<U> {
        PlayerMap::new(|p| f(p, self.get(p)))
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}
