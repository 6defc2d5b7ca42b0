//! Matchup creation and the deal.
//!
//! A matchup is the template root for one pair of decklists, keyed by a short
//! digest of both lists. Dealing a seed under it produces the first playable
//! state: both decks built from the seed, seven cards drawn each, action
//! edges computed, saved at `<matchup>/<seed>`.

use crate::core::player::PlayerId;
use crate::core::state::GameState;
use crate::deck::{build_shuffled_deck, Decklist, Seed};
use crate::error::Result;
use crate::rules::{LorcanaRules, RulesEngine};
use crate::store::{StateKey, StateStore};

/// Hex characters kept from the decklist digest.
const MATCHUP_KEY_LEN: usize = 4;

/// Key of the matchup between two decklist texts.
#[must_use]
pub fn matchup_key(deck1: &str, deck2: &str) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(deck1.as_bytes());
    hasher.update(deck2.as_bytes());
    let hex = hasher.finalize().to_hex();
    hex.as_str()[..MATCHUP_KEY_LEN].to_string()
}

/// Create (or overwrite) the matchup root for two decklists.
///
/// Both lists are parsed first; nothing is written if either is malformed.
pub fn init_matchup<S: StateStore + ?Sized>(
    store: &mut S,
    rules: &LorcanaRules,
    deck1: &str,
    deck2: &str,
) -> Result<StateKey> {
    let lists = [Decklist::parse(deck1)?, Decklist::parse(deck2)?];
    let key = StateKey::root(&matchup_key(deck1, deck2))?;

    let mut root = GameState::template();
    rules.refresh_actions(&mut root)?;
    store.save(&root, &key)?;
    store.save_decklists(&key, deck1, deck2)?;

    tracing::info!(
        matchup = %key,
        deck1_cards = lists[0].total_cards(),
        deck2_cards = lists[1].total_cards(),
        "matchup initialized"
    );
    Ok(key)
}

/// Deal `seed` under `matchup` and save the resulting state.
///
/// The seed, both decklists, and every hand index are validated before any
/// state is built. Returns the key of the dealt state.
pub fn shuffle_and_deal<S: StateStore + ?Sized>(
    store: &mut S,
    rules: &LorcanaRules,
    matchup: &StateKey,
    seed: &str,
) -> Result<StateKey> {
    let seed: Seed = seed.parse()?;
    let (text1, text2) = store.load_decklists(matchup)?;
    let deck1 = build_shuffled_deck(&Decklist::parse(&text1)?, &seed, PlayerId::P1)?;
    let deck2 = build_shuffled_deck(&Decklist::parse(&text2)?, &seed, PlayerId::P2)?;

    let root = store.load(matchup)?;
    let mut state = GameState::new(root.graph, deck1, deck2);

    let hand_size = rules.config().starting_hand_size;
    for player in PlayerId::all() {
        state.draw(rules.catalog(), player, hand_size)?;
    }
    rules.refresh_actions(&mut state)?;

    let key = matchup.join(seed.as_str())?;
    store.save(&state, &key)?;

    tracing::info!(
        key = %key,
        actions = state.graph.actions().len(),
        "dealt starting hands"
    );
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::EngineConfig;
    use crate::error::EngineError;
    use crate::rules::fixtures;
    use crate::store::MemoryStore;
    use crate::zones::{ZoneKind, ZoneRef};
    use std::sync::Arc;

    const DECK1: &str = "4 Tipo - Growing Son\n4 Mickey Mouse - True Friend\n2 Be Prepared\n\
                         4 Dinglehopper\n4 Stitch - Rock Star\n4 Flounder - Voice of Reason\n4 Goofy - Musketeer\n";
    const DECK2: &str = "4 Goofy - Musketeer\n4 Flounder - Voice of Reason\n4 Stitch - Rock Star\n\
                         4 Dinglehopper\n2 Be Prepared\n4 Mickey Mouse - True Friend\n4 Tipo - Growing Son\n";

    fn rules() -> LorcanaRules {
        LorcanaRules::new(Arc::new(fixtures::catalog()), EngineConfig::default())
    }

    #[test]
    fn test_matchup_key() {
        let key = matchup_key(DECK1, DECK2);
        assert_eq!(key.len(), 4);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(key, matchup_key(DECK1, DECK2));
        assert_ne!(key, matchup_key(DECK2, DECK1));
    }

    #[test]
    fn test_init_and_deal() {
        let rules = rules();
        let mut store = MemoryStore::new();

        let matchup = init_matchup(&mut store, &rules, DECK1, DECK2).unwrap();
        let root = store.load(&matchup).unwrap();
        assert_eq!(root.graph.card_count(), 0);
        assert_eq!(store.get_actions(&matchup).unwrap().len(), 1);

        let key = shuffle_and_deal(&mut store, &rules, &matchup, "0123456.6543210.aa").unwrap();
        assert_eq!(key.as_str(), format!("{matchup}/0123456.6543210.aa"));

        let state = store.load(&key).unwrap();
        for player in PlayerId::all() {
            let hand = ZoneRef::new(player, ZoneKind::Hand);
            assert_eq!(state.graph.zones().zone_size(hand), 7);
            assert_eq!(state.deck(player).len(), 26 - 7);
        }
        assert!(state.graph.is_consistent());
        assert!(store.get_path(&key).unwrap().is_empty());
    }

    #[test]
    fn test_deal_validates_before_saving() {
        let rules = rules();
        let mut store = MemoryStore::new();
        let matchup = init_matchup(&mut store, &rules, DECK1, DECK2).unwrap();

        let err = shuffle_and_deal(&mut store, &rules, &matchup, "0000000.0000000.aa");
        assert!(matches!(err, Err(EngineError::NotEnoughCopies { .. })));

        let err = shuffle_and_deal(&mut store, &rules, &matchup, "7000000.0000000.aa");
        assert!(matches!(err, Err(EngineError::HandIndexOutOfRange { .. })));

        let err = shuffle_and_deal(&mut store, &rules, &matchup, "bogus");
        assert!(matches!(err, Err(EngineError::InvalidSeed { .. })));

        assert!(store.list_children(&matchup).unwrap().is_empty());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_init_rejects_bad_decklist() {
        let rules = rules();
        let mut store = MemoryStore::new();
        let err = init_matchup(&mut store, &rules, "four Tipo", DECK2);
        assert!(matches!(err, Err(EngineError::InvalidDecklist { line: 1, .. })));
        assert!(store.is_empty());
    }
}
