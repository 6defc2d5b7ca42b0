//! Game state: graph plus the two deck remainders.
//!
//! `GameState` has exactly one constructor contract: an owned graph and two
//! owned deck-remainder sequences. Loading and saving belong to the store.
//!
//! Deck remainders are `im::Vector<String>` of per-copy deck ids
//! (`tipo_growing_son.b`); the front of the vector is the top of the deck.
//! Cards only become graph nodes when drawn.

use im::Vector;

use super::entity::CardKey;
use super::graph::GameGraph;
use super::player::{PlayerId, PlayerMap};
use crate::cards::{CardCatalog, CardInstance};
use crate::error::Result;
use crate::zones::{ZoneKind, ZoneRef};

/// Strip the copy suffix from a deck id: `tipo_growing_son.b` -> `tipo_growing_son`.
#[must_use]
pub fn base_name(deck_card_id: &str) -> &str {
    deck_card_id
        .rsplit_once('.')
        .map_or(deck_card_id, |(base, _)| base)
}

/// Complete game state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub graph: GameGraph,
    decks: PlayerMap<Vector<String>>,
}

impl GameState {
    #[must_use]
    pub fn new(
        graph: GameGraph,
        deck1: impl IntoIterator<Item = String>,
        deck2: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            graph,
            decks: PlayerMap::from_pair(deck1.into_iter().collect(), deck2.into_iter().collect()),
        }
    }

    /// Template root with empty decks.
    #[must_use]
    pub fn template() -> Self {
        Self::new(GameGraph::template(), Vec::new(), Vec::new())
    }

    /// Remaining deck of `player`, top first.
    #[must_use]
    pub fn deck(&self, player: PlayerId) -> &Vector<String> {
        &self.decks[player]
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.graph.current_turn()
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.graph.game.game_over
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.graph.game.winner
    }

    /// Draw up to `count` cards from the top of `player`'s deck into hand.
    ///
    /// Every drawn card is resolved against the catalog before anything is
    /// mutated. Returns the number of cards drawn (fewer than `count` when
    /// the deck runs out).
    pub fn draw(&mut self, catalog: &CardCatalog, player: PlayerId, count: usize) -> Result<usize> {
        let n = count.min(self.decks[player].len());
        let hand = ZoneRef::new(player, ZoneKind::Hand);

        let drawn = self.decks[player]
            .iter()
            .take(n)
            .map(|deck_id| {
                let label = base_name(deck_id);
                let def = catalog.get(label)?;
                Ok(CardInstance::new(
                    CardKey::new(player, deck_id),
                    player,
                    def.id,
                    label,
                ))
            })
            .collect::<Result<Vec<_>>>()?;

        for card in drawn {
            self.graph.add_card(card, hand)?;
        }
        self.decks[player] = self.decks[player].skip(n);

        Ok(n)
    }

    /// Replace a card's containment edge. Returns the zone it left.
    pub fn move_card(&mut self, key: &CardKey, zone: ZoneRef) -> Result<ZoneRef> {
        self.graph.move_card(key, zone)
    }

    /// Compact description for front ends.
    #[must_use]
    pub fn summary(&self) -> StateSummary {
        StateSummary {
            turn: self.graph.game.turn,
            current_player: self.current_player(),
            game_over: self.is_game_over(),
            winner: self.winner(),
            lore: self.graph.players.map(|_, p| p.lore),
            ink_available: self.graph.players.map(|_, p| p.ink_available),
            ink_total: self.graph.players.map(|_, p| p.ink_total),
            hand_sizes: PlayerMap::new(|p| {
                self.graph.zones().zone_size(ZoneRef::new(p, ZoneKind::Hand))
            }),
            deck_sizes: self.decks.map(|_, d| d.len()),
        }
    }
}

/// Snapshot of the headline numbers of a state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateSummary {
    pub turn: u32,
    pub current_player: PlayerId,
    pub game_over: bool,
    pub winner: Option<PlayerId>,
    pub lore: PlayerMap<u32>,
    pub ink_available: PlayerMap<u32>,
    pub ink_total: PlayerMap<u32>,
    pub hand_sizes: PlayerMap<usize>,
    pub deck_sizes: PlayerMap<usize>,
}

impl std::fmt::Display for StateSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "turn {} ({} to act)", self.turn, self.current_player)?;
        for p in PlayerId::all() {
            write!(
                f,
                " | {p}: lore {} ink {}/{} hand {} deck {}",
                self.lore[p],
                self.ink_available[p],
                self.ink_total[p],
                self.hand_sizes[p],
                self.deck_sizes[p]
            )?;
        }
        if let Some(w) = self.winner {
            write!(f, " | winner {w}")?;
        } else if self.game_over {
            write!(f, " | game over")?;
        }
        Ok(())
    }
}
