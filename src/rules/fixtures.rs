//! Shared unit-test fixtures for the rules.

use crate::cards::{CardCatalog, CardDefinition, CardInstance, CardType};
use crate::core::{CardKey, GameState, PlayerId};
use crate::zones::{ZoneKind, ZoneRef};

pub fn catalog() -> CardCatalog {
    let mut catalog = CardCatalog::new();
    for card in [
        CardDefinition::new(1, "Tipo - Growing Son", CardType::Character)
            .with_cost(2)
            .with_stats(2, 3)
            .with_lore(1)
            .with_inkable(true),
        CardDefinition::new(2, "Mickey Mouse - True Friend", CardType::Character)
            .with_cost(3)
            .with_stats(3, 3)
            .with_lore(2)
            .with_inkable(true),
        CardDefinition::new(3, "Be Prepared", CardType::Action).with_cost(7),
        CardDefinition::new(4, "Dinglehopper", CardType::Item)
            .with_cost(1)
            .with_inkable(true),
        CardDefinition::new(5, "Stitch - Rock Star", CardType::Character)
            .with_cost(6)
            .with_stats(3, 5)
            .with_lore(2),
        CardDefinition::new(6, "Flounder - Voice of Reason", CardType::Character)
            .with_cost(2)
            .with_stats(0, 3)
            .with_lore(2),
        CardDefinition::new(7, "Goofy - Musketeer", CardType::Character)
            .with_cost(5)
            .with_stats(3, 8)
            .with_inkable(true),
    ] {
        catalog.register(card);
    }
    catalog
}

/// Materialize `deck_id` for `player` directly inside a zone.
pub fn put(state: &mut GameState, player: PlayerId, deck_id: &str, kind: ZoneKind) -> CardKey {
    let label = crate::core::base_name(deck_id);
    let def = catalog().get(label).cloned().unwrap();
    let key = CardKey::new(player, deck_id);
    state
        .graph
        .add_card(
            CardInstance::new(key.clone(), player, def.id, label),
            ZoneRef::new(player, kind),
        )
        .unwrap();
    key
}

/// Put a character into play as if it entered on an earlier turn.
pub fn put_dry(state: &mut GameState, player: PlayerId, deck_id: &str) -> CardKey {
    let key = put(state, player, deck_id, ZoneKind::Play);
    state.graph.card_mut(&key).unwrap().entered_play = Some(0);
    state.graph.game.turn = state.graph.game.turn.max(1);
    key
}
