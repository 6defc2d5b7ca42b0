//! Deterministic deal tests: seeds, the shuffle, starting hands.

mod common;

use common::{rules, DECK1, DECK2, SEED};
use inkgraph::deck::{MAX_HAND_INDEX, HAND_SPEC_LEN};
use inkgraph::{
    build_shuffled_deck, init_matchup, shuffle_and_deal, Decklist, EngineError, GameRng,
    MemoryStore, PlayerId, Seed, StateStore, ZoneKind, ZoneRef,
};
use proptest::prelude::*;

fn decklist(text: &str) -> Decklist {
    Decklist::parse(text).expect("decklist")
}

// =============================================================================
// Seed Stability
// =============================================================================

#[test]
fn test_fixed_seed_hand() {
    let seed: Seed = SEED.parse().expect("seed");
    let deck = build_shuffled_deck(&decklist(DECK1), &seed, PlayerId::P1).expect("deck");

    assert_eq!(
        &deck[..HAND_SPEC_LEN],
        &[
            "tipo_growing_son.a",
            "mickey_mouse_true_friend.a",
            "be_prepared.a",
            "dinglehopper.a",
            "stitch_rock_star.a",
            "flounder_voice_of_reason.a",
            "goofy_musketeer.a",
        ]
    );
}

#[test]
fn test_same_seed_same_deck() {
    let seed: Seed = SEED.parse().expect("seed");
    let list = decklist(DECK2);

    let first = build_shuffled_deck(&list, &seed, PlayerId::P2).expect("deck");
    for _ in 0..5 {
        assert_eq!(build_shuffled_deck(&list, &seed, PlayerId::P2).expect("deck"), first);
    }

    let other: Seed = "0123456.0123456.ab".parse().expect("seed");
    let reshuffled = build_shuffled_deck(&list, &other, PlayerId::P2).expect("deck");
    assert_eq!(reshuffled[..HAND_SPEC_LEN], first[..HAND_SPEC_LEN]);
    assert_ne!(reshuffled, first);
}

#[test]
fn test_deals_agree_across_stores() {
    let rules = rules();
    let mut a = MemoryStore::new();
    let mut b = MemoryStore::new();

    let ma = init_matchup(&mut a, &rules, DECK1, DECK2).expect("matchup");
    let mb = init_matchup(&mut b, &rules, DECK1, DECK2).expect("matchup");
    assert_eq!(ma, mb);

    let ka = shuffle_and_deal(&mut a, &rules, &ma, SEED).expect("deal");
    let kb = shuffle_and_deal(&mut b, &rules, &mb, SEED).expect("deal");
    assert_eq!(a.load(&ka).expect("state"), b.load(&kb).expect("state"));
    assert_eq!(a.get_actions(&ka).expect("actions"), b.get_actions(&kb).expect("actions"));
}

#[test]
fn test_dealt_state_shape() {
    let rules = rules();
    let mut store = MemoryStore::new();
    let matchup = init_matchup(&mut store, &rules, DECK1, DECK2).expect("matchup");
    let key = shuffle_and_deal(&mut store, &rules, &matchup, SEED).expect("deal");
    let state = store.load(&key).expect("state");

    assert_eq!(state.current_player(), PlayerId::P1);
    assert_eq!(state.graph.game.turn, 0);
    assert_eq!(state.graph.player(PlayerId::P1).ink_drops, 1);
    assert_eq!(state.deck(PlayerId::P1).len(), 30 - 7);
    assert_eq!(state.deck(PlayerId::P2).len(), 28 - 7);

    let hand = ZoneRef::new(PlayerId::P2, ZoneKind::Hand);
    let mut labels: Vec<&str> = state.graph.cards_in(hand).map(|c| c.label.as_str()).collect();
    labels.sort_unstable();
    assert_eq!(
        labels,
        vec![
            "be_prepared",
            "dinglehopper",
            "flounder_voice_of_reason",
            "goofy_musketeer",
            "hei_hei_boat_snack",
            "mickey_mouse_true_friend",
            "stitch_rock_star",
        ]
    );
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn test_deal_rejects_before_mutation() {
    let rules = rules();
    let mut store = MemoryStore::new();
    let matchup = init_matchup(&mut store, &rules, DECK1, DECK2).expect("matchup");

    // deck 2 lists Stitch twice only: index 3 three times is one too many
    let err = shuffle_and_deal(&mut store, &rules, &matchup, "0123456.3330000.aa");
    assert!(matches!(err, Err(EngineError::NotEnoughCopies { ref name }) if name == "Stitch - Rock Star"));

    let err = shuffle_and_deal(&mut store, &rules, &matchup, "0123458.0123456.aa");
    assert!(matches!(
        err,
        Err(EngineError::HandIndexOutOfRange { index: 8, unique: 8 })
    ));

    assert_eq!(store.len(), 1);
}

// =============================================================================
// Permutation Law
// =============================================================================

fn sorted(mut ids: Vec<String>) -> Vec<String> {
    ids.sort();
    ids
}

proptest! {
    /// Every valid deal is a permutation of the expanded list, hand first.
    #[test]
    fn prop_deal_is_permutation(rng_seed in any::<u64>()) {
        let list = decklist(DECK1);
        let mut rng = GameRng::new(rng_seed);
        let seed = Seed::random(&mut rng, list.unique_count() - 1);

        for player in PlayerId::all() {
            match build_shuffled_deck(&list, &seed, player) {
                Ok(deck) => {
                    prop_assert_eq!(sorted(deck.clone()), sorted(list.expand()));
                    for (slot, &index) in seed.hand(player).iter().enumerate() {
                        let base = list.entries()[index].base_name();
                        prop_assert_eq!(inkgraph::core::base_name(&deck[slot]), base.as_str());
                    }
                }
                Err(EngineError::NotEnoughCopies { .. }) => {}
                Err(other) => prop_assert!(false, "unexpected error: {other}"),
            }
        }
    }

    /// Every seed string made of valid characters parses back to itself.
    #[test]
    fn prop_seed_format(p1 in "[0-9a-z]{7}", p2 in "[0-9a-z]{7}", suffix in "[0-9a-z]{2}") {
        let raw = format!("{p1}.{p2}.{suffix}");
        let seed: Seed = raw.parse().expect("valid seed");
        prop_assert_eq!(seed.to_string(), raw);
        prop_assert!(seed.hand(PlayerId::P1).iter().all(|&i| i <= MAX_HAND_INDEX));
    }
}
