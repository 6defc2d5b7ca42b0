//! The typed state graph.
//!
//! A `GameGraph` owns every node and edge of one game position:
//! - the `game` singleton and its `CURRENT_TURN` pointer
//! - both player nodes
//! - the materialized card nodes and their `IN` containment edges
//! - the legal-action edges of the settled state
//!
//! Strings only appear at the serialization boundary (see `store::dot`).
//! Card and containment maps are `im::OrdMap`s, so cloning a graph for a
//! child state is cheap and iteration is always sorted.

use im::OrdMap;
use serde::{Deserialize, Serialize};

use super::action::{ActionId, LegalAction};
use super::entity::CardKey;
use super::player::{PlayerId, PlayerMap};
use crate::cards::CardInstance;
use crate::error::{EngineError, Result};
use crate::zones::{ZoneKind, ZoneManager, ZoneRef};

/// Attributes of the `game` node.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameNode {
    pub turn: u32,
    pub game_over: bool,
    pub winner: Option<PlayerId>,
}

/// Attributes of a player node.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerNode {
    /// Victory points.
    pub lore: u32,
    /// Cards that may still be inked this turn.
    pub ink_drops: u32,
    /// Ink committed to the inkwell over the game.
    pub ink_total: u32,
    /// Ink left to spend this turn.
    pub ink_available: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameGraph {
    pub game: GameNode,
    pub players: PlayerMap<PlayerNode>,
    current_turn: PlayerId,
    cards: OrdMap<CardKey, CardInstance>,
    zones: ZoneManager,
    actions: Vec<LegalAction>,
}

impl GameGraph {
    /// The matchup template: turn 0, `p1` to act with one ink drop, no cards.
    #[must_use]
    pub fn template() -> Self {
        let mut players = PlayerMap::<PlayerNode>::default();
        players[PlayerId::P1].ink_drops = 1;

        Self {
            game: GameNode::default(),
            players,
            current_turn: PlayerId::P1,
            cards: OrdMap::new(),
            zones: ZoneManager::new(),
            actions: Vec::new(),
        }
    }

    /// Rebuild a graph from decoded parts.
    ///
    /// Every card must have exactly one containment edge and vice versa.
    pub fn from_parts(
        game: GameNode,
        players: PlayerMap<PlayerNode>,
        current_turn: PlayerId,
        cards: impl IntoIterator<Item = (CardInstance, ZoneRef)>,
        actions: Vec<LegalAction>,
    ) -> Result<Self> {
        let mut graph = Self {
            game,
            players,
            current_turn,
            cards: OrdMap::new(),
            zones: ZoneManager::new(),
            actions,
        };
        for (card, zone) in cards {
            graph.add_card(card, zone)?;
        }
        Ok(graph)
    }

    /// The player the `CURRENT_TURN` edge points at.
    #[must_use]
    pub fn current_turn(&self) -> PlayerId {
        self.current_turn
    }

    /// Point the `CURRENT_TURN` edge at the other player.
    ///
    /// Returns the new current player.
    pub fn flip_turn(&mut self) -> PlayerId {
        self.current_turn = self.current_turn.opponent();
        self.current_turn
    }

    #[must_use]
    pub fn player(&self, player: PlayerId) -> &PlayerNode {
        &self.players[player]
    }

    pub fn player_mut(&mut self, player: PlayerId) -> &mut PlayerNode {
        &mut self.players[player]
    }

    /// Materialize a card node inside `zone`.
    pub fn add_card(&mut self, card: CardInstance, zone: ZoneRef) -> Result<()> {
        self.zones.add_to_zone(card.key.clone(), zone)?;
        self.cards.insert(card.key.clone(), card);
        Ok(())
    }

    pub fn card(&self, key: &CardKey) -> Result<&CardInstance> {
        self.cards.get(key).ok_or_else(|| EngineError::MissingCard {
            key: key.to_string(),
        })
    }

    pub fn card_mut(&mut self, key: &CardKey) -> Result<&mut CardInstance> {
        self.cards.get_mut(key).ok_or_else(|| EngineError::MissingCard {
            key: key.to_string(),
        })
    }

    /// Replace a card's containment edge. Returns the zone it left.
    pub fn move_card(&mut self, key: &CardKey, zone: ZoneRef) -> Result<ZoneRef> {
        self.zones
            .move_to_zone(key, zone)
            .ok_or_else(|| EngineError::MissingCard {
                key: key.to_string(),
            })
    }

    #[must_use]
    pub fn zone_of(&self, key: &CardKey) -> Option<ZoneRef> {
        self.zones.get_zone(key)
    }

    /// Cards in `zone`, sorted by key.
    pub fn cards_in(&self, zone: ZoneRef) -> impl Iterator<Item = &CardInstance> + '_ {
        self.zones
            .cards_in_zone(zone)
            .filter_map(move |key| self.cards.get(key))
    }

    /// Shorthand for `cards_in(ZoneRef::new(player, kind))`.
    pub fn player_cards(
        &self,
        player: PlayerId,
        kind: ZoneKind,
    ) -> impl Iterator<Item = &CardInstance> + '_ {
        self.cards_in(ZoneRef::new(player, kind))
    }

    /// All cards with their zones, sorted by key.
    pub fn cards(&self) -> impl Iterator<Item = (&CardInstance, ZoneRef)> + '_ {
        self.zones
            .iter()
            .filter_map(move |(key, zone)| self.cards.get(key).map(|c| (c, zone)))
    }

    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn zones(&self) -> &ZoneManager {
        &self.zones
    }

    /// Legal-action edges of the settled state.
    #[must_use]
    pub fn actions(&self) -> &[LegalAction] {
        &self.actions
    }

    /// Replace the legal-action edges wholesale.
    pub fn set_actions(&mut self, actions: Vec<LegalAction>) {
        self.actions = actions;
    }

    #[must_use]
    pub fn find_action(&self, id: &ActionId) -> Option<&LegalAction> {
        self.actions.iter().find(|a| &a.id == id)
    }

    /// Containment holds for every card and no zone edge is dangling.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.cards.len() == self.zones.total_cards()
            && self.cards.keys().all(|k| self.zones.contains(k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(name: &str) -> CardInstance {
        let key = CardKey::new(PlayerId::P1, name);
        CardInstance::new(key, PlayerId::P1, 1, "x")
    }

    #[test]
    fn test_template() {
        let graph = GameGraph::template();

        assert_eq!(graph.current_turn(), PlayerId::P1);
        assert_eq!(graph.game.turn, 0);
        assert!(!graph.game.game_over);
        assert_eq!(graph.player(PlayerId::P1).ink_drops, 1);
        assert_eq!(graph.player(PlayerId::P2).ink_drops, 0);
        assert_eq!(graph.card_count(), 0);
    }

    #[test]
    fn test_flip_turn() {
        let mut graph = GameGraph::template();

        assert_eq!(graph.flip_turn(), PlayerId::P2);
        assert_eq!(graph.flip_turn(), PlayerId::P1);
    }

    #[test]
    fn test_add_and_move_card() {
        let mut graph = GameGraph::template();
        let hand = ZoneRef::new(PlayerId::P1, ZoneKind::Hand);
        let play = ZoneRef::new(PlayerId::P1, ZoneKind::Play);

        graph.add_card(card("x.a"), hand).unwrap();
        let key = CardKey::new(PlayerId::P1, "x.a");

        assert_eq!(graph.move_card(&key, play).unwrap(), hand);
        assert_eq!(graph.zone_of(&key), Some(play));
        assert_eq!(graph.player_cards(PlayerId::P1, ZoneKind::Play).count(), 1);
        assert!(graph.is_consistent());
    }

    #[test]
    fn test_missing_card_errors() {
        let mut graph = GameGraph::template();
        let key = CardKey::new(PlayerId::P2, "ghost.a");
        let play = ZoneRef::new(PlayerId::P2, ZoneKind::Play);

        assert!(matches!(graph.card(&key), Err(EngineError::MissingCard { .. })));
        assert!(matches!(
            graph.move_card(&key, play),
            Err(EngineError::MissingCard { .. })
        ));
    }

    #[test]
    fn test_clone_is_isolated() {
        let mut graph = GameGraph::template();
        graph
            .add_card(card("x.a"), ZoneRef::new(PlayerId::P1, ZoneKind::Hand))
            .unwrap();

        let snapshot = graph.clone();
        let key = CardKey::new(PlayerId::P1, "x.a");
        graph.card_mut(&key).unwrap().exert();

        assert!(!snapshot.card(&key).unwrap().tapped);
        assert!(graph.card(&key).unwrap().tapped);
    }
}
