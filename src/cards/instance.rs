//! Card instances - runtime card state.
//!
//! `CardInstance` is a card node in the state graph. It exists from the
//! moment the card is drawn; cards still in a deck remainder are only ids in
//! the state's deck list.

use serde::{Deserialize, Serialize};

use crate::core::entity::CardKey;
use crate::core::player::PlayerId;

/// A materialized card.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardInstance {
    /// Node identifier, e.g. `p1.tipo_growing_son.a`.
    pub key: CardKey,

    /// Player whose deck the card came from.
    pub owner: PlayerId,

    /// Numeric catalog id.
    pub card_id: u32,

    /// Normalized catalog name; the catalog reference key.
    pub label: String,

    /// Exerted this cycle.
    pub tapped: bool,

    /// Accumulated damage.
    pub damage: u32,

    /// Turn at which the card entered its current play zone.
    pub entered_play: Option<u32>,
}

impl CardInstance {
    /// Create a fresh, ready, undamaged card.
    #[must_use]
    pub fn new(key: CardKey, owner: PlayerId, card_id: u32, label: impl Into<String>) -> Self {
        Self {
            key,
            owner,
            card_id,
            label: label.into(),
            tapped: false,
            damage: 0,
            entered_play: None,
        }
    }

    pub fn exert(&mut self) {
        self.tapped = true;
    }

    pub fn ready(&mut self) {
        self.tapped = false;
    }

    pub fn add_damage(&mut self, amount: u32) {
        self.damage += amount;
    }

    /// Entered play before `turn` (no summoning sickness).
    #[must_use]
    pub fn is_dry(&self, turn: u32) -> bool {
        self.entered_play != Some(turn)
    }
}
