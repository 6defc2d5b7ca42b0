//! Zone manager for card locations and movement.
//!
//! The `ZoneManager` is the set of containment edges of a state graph. It
//! maps every materialized card to exactly one zone, so the "one outgoing
//! `IN` edge per card" invariant holds by construction: moving a card
//! replaces its entry in a single step.
//!
//! Backed by `im::OrdMap` so clones are O(1) and iteration order is
//! deterministic (sorted by card key), which keeps serialized states
//! byte-stable.

use im::OrdMap;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::entity::CardKey;
use crate::core::player::PlayerId;
use crate::error::{EngineError, Result};

/// Kind of zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ZoneKind {
    Hand,
    Play,
    Discard,
    Inkwell,
    /// Marker for the deck remainder; the cards themselves live in the
    /// state's deck lists, not in the graph.
    Deck,
}

impl ZoneKind {
    pub const ALL: [ZoneKind; 5] = [
        ZoneKind::Hand,
        ZoneKind::Play,
        ZoneKind::Discard,
        ZoneKind::Inkwell,
        ZoneKind::Deck,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ZoneKind::Hand => "hand",
            ZoneKind::Play => "play",
            ZoneKind::Discard => "discard",
            ZoneKind::Inkwell => "ink",
            ZoneKind::Deck => "deck",
        }
    }
}

impl std::fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ZoneKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        ZoneKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| EngineError::parse(format!("unknown zone kind '{s}'")))
    }
}

/// A player's zone of a given kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ZoneRef {
    pub owner: PlayerId,
    pub kind: ZoneKind,
}

impl ZoneRef {
    #[must_use]
    pub const fn new(owner: PlayerId, kind: ZoneKind) -> Self {
        Self { owner, kind }
    }

    /// Every zone of both players, in a fixed order.
    pub fn all() -> impl Iterator<Item = ZoneRef> {
        PlayerId::all().flat_map(|p| ZoneKind::ALL.into_iter().map(move |k| ZoneRef::new(p, k)))
    }
}

impl std::fmt::Display for ZoneRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "z.{}.{}", self.owner, self.kind)
    }
}

impl FromStr for ZoneRef {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split('.');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some("z"), Some(owner), Some(kind), None) => {
                Ok(ZoneRef::new(owner.parse()?, kind.parse()?))
            }
            _ => Err(EngineError::parse(format!("malformed zone '{s}'"))),
        }
    }
}

/// Manages card locations across zones.
///
/// ```
/// use inkgraph::core::{CardKey, PlayerId};
/// use inkgraph::zones::{ZoneKind, ZoneManager, ZoneRef};
///
/// let mut zones = ZoneManager::new();
/// let card = CardKey::new(PlayerId::P1, "tipo_growing_son.a");
/// let hand = ZoneRef::new(PlayerId::P1, ZoneKind::Hand);
/// let play = ZoneRef::new(PlayerId::P1, ZoneKind::Play);
///
/// zones.add_to_zone(card.clone(), hand).unwrap();
/// assert_eq!(zones.move_to_zone(&card, play), Some(hand));
/// assert!(zones.is_in_zone(&card, play));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ZoneManager {
    /// Containment edges: card -> zone.
    locations: OrdMap<CardKey, ZoneRef>,
}

impl ZoneManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a newly materialized card.
    ///
    /// Fails if the card already has a containment edge.
    pub fn add_to_zone(&mut self, card: CardKey, zone: ZoneRef) -> Result<()> {
        if self.locations.contains_key(&card) {
            return Err(EngineError::DuplicateCard {
                key: card.to_string(),
            });
        }
        self.locations.insert(card, zone);
        Ok(())
    }

    /// Replace a card's containment edge.
    ///
    /// Returns the old zone, or `None` if the card isn't tracked.
    pub fn move_to_zone(&mut self, card: &CardKey, zone: ZoneRef) -> Option<ZoneRef> {
        let slot = self.locations.get_mut(card)?;
        Some(std::mem::replace(slot, zone))
    }

    /// Get the zone a card is in.
    #[must_use]
    pub fn get_zone(&self, card: &CardKey) -> Option<ZoneRef> {
        self.locations.get(card).copied()
    }

    /// Check if a card is in a specific zone.
    #[must_use]
    pub fn is_in_zone(&self, card: &CardKey, zone: ZoneRef) -> bool {
        self.locations.get(card) == Some(&zone)
    }

    /// Cards in a zone, sorted by key.
    pub fn cards_in_zone(&self, zone: ZoneRef) -> impl Iterator<Item = &CardKey> + '_ {
        self.locations
            .iter()
            .filter(move |(_, z)| **z == zone)
            .map(|(c, _)| c)
    }

    /// Cards in every zone of a kind (both players), sorted by key.
    pub fn cards_in_kind(&self, kind: ZoneKind) -> impl Iterator<Item = (&CardKey, ZoneRef)> + '_ {
        self.locations
            .iter()
            .filter(move |(_, z)| z.kind == kind)
            .map(|(c, z)| (c, *z))
    }

    #[must_use]
    pub fn zone_size(&self, zone: ZoneRef) -> usize {
        self.cards_in_zone(zone).count()
    }

    /// All containment edges, sorted by card key.
    pub fn iter(&self) -> impl Iterator<Item = (&CardKey, ZoneRef)> + '_ {
        self.locations.iter().map(|(c, z)| (c, *z))
    }

    /// Get total number of cards tracked.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.locations.len()
    }

    #[must_use]
    pub fn contains(&self, card: &CardKey) -> bool {
        self.locations.contains_key(card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(name: &str) -> CardKey {
        CardKey::new(PlayerId::P1, name)
    }

    fn zone(kind: ZoneKind) -> ZoneRef {
        ZoneRef::new(PlayerId::P1, kind)
    }

    #[test]
    fn test_add_and_get() {
        let mut manager = ZoneManager::new();
        let hand = zone(ZoneKind::Hand);

        manager.add_to_zone(card("a.a"), hand).unwrap();
        manager.add_to_zone(card("b.a"), hand).unwrap();

        assert_eq!(manager.get_zone(&card("a.a")), Some(hand));
        assert_eq!(manager.get_zone(&card("zz.a")), None);
        assert_eq!(manager.zone_size(hand), 2);
    }

    #[test]
    fn test_duplicate_card_rejected() {
        let mut manager = ZoneManager::new();
        manager.add_to_zone(card("a.a"), zone(ZoneKind::Hand)).unwrap();

        let err = manager.add_to_zone(card("a.a"), zone(ZoneKind::Play));
        assert!(matches!(err, Err(EngineError::DuplicateCard { .. })));
        assert_eq!(manager.get_zone(&card("a.a")), Some(zone(ZoneKind::Hand)));
    }

    #[test]
    fn test_move_between_zones() {
        let mut manager = ZoneManager::new();
        let hand = zone(ZoneKind::Hand);
        let ink = zone(ZoneKind::Inkwell);

        manager.add_to_zone(card("a.a"), hand).unwrap();

        assert_eq!(manager.move_to_zone(&card("a.a"), ink), Some(hand));
        assert_eq!(manager.zone_size(hand), 0);
        assert_eq!(manager.zone_size(ink), 1);
        assert_eq!(manager.total_cards(), 1);

        assert_eq!(manager.move_to_zone(&card("missing.a"), ink), None);
    }

    #[test]
    fn test_cards_in_zone_sorted() {
        let mut manager = ZoneManager::new();
        let play = zone(ZoneKind::Play);

        manager.add_to_zone(card("c.a"), play).unwrap();
        manager.add_to_zone(card("a.a"), play).unwrap();
        manager.add_to_zone(card("b.a"), zone(ZoneKind::Hand)).unwrap();

        let in_play: Vec<_> = manager.cards_in_zone(play).map(|c| c.as_str()).collect();
        assert_eq!(in_play, vec!["p1.a.a", "p1.c.a"]);
    }

    #[test]
    fn test_zone_ref_names() {
        let z = ZoneRef::new(PlayerId::P2, ZoneKind::Inkwell);
        assert_eq!(z.to_string(), "z.p2.ink");
        assert_eq!("z.p2.ink".parse::<ZoneRef>().unwrap(), z);
        assert_eq!(ZoneRef::all().count(), 10);
    }
}
