//! GameSession tests: interactive play, random playouts, outcomes.

mod common;

use std::sync::Arc;

use common::{rules, rules_with, turn_start_config, DECK1, DECK2, SEED};
use inkgraph::{
    find_seed_key, profile_transition, EngineConfig, EngineError, FileStore, GameSession,
    StateStore,
};
use tempfile::TempDir;

fn session(seed: u64) -> GameSession {
    GameSession::deal(Arc::new(rules()), DECK1, DECK2, SEED)
        .expect("deal")
        .with_playout_seed(seed)
}

#[test]
fn test_session_starts_at_deal() {
    let session = session(1);
    let root = session.root_key().clone();

    assert_eq!(root.last(), SEED);
    assert_eq!(find_seed_key(&root), Some(root.clone()));
    assert!(!session.is_game_over().expect("state"));
    assert_eq!(session.winner().expect("state"), None);
    assert!(session.path().expect("path").is_empty());
    assert!(session.action_path().is_empty());

    let actions = session.actions().expect("actions");
    assert!(actions.iter().any(|a| a.description == "end"));
}

#[test]
fn test_apply_and_reset() {
    let mut session = session(1);
    let actions = session.actions().expect("actions");
    let pick = actions.last().expect("an action").clone();

    session.apply_action(pick.id.as_str()).expect("apply");
    assert_eq!(session.path().expect("path"), vec![pick.to_string()]);

    let err = session.apply_action("zzzz").unwrap_err();
    assert!(matches!(err, EngineError::ActionNotFound { .. }));
    assert_eq!(session.action_path(), vec![pick.id.as_str()]);

    session.reset();
    assert!(session.action_path().is_empty());
    assert_eq!(session.actions().expect("actions"), actions);
}

#[test]
fn test_playouts_are_reproducible() {
    let mut a = session(42);
    let mut b = session(42);

    let pa = a.play_until_game_over(Some(80)).expect("playout");
    let pb = b.play_until_game_over(Some(80)).expect("playout");
    assert_eq!(pa, pb);
    assert_eq!(a.path().expect("path"), b.path().expect("path"));
}

#[test]
fn test_playout_bound_from_config() {
    let rules = rules_with(EngineConfig::default().with_max_playout_steps(12));
    let mut session = GameSession::deal(Arc::new(rules), DECK1, DECK2, SEED).expect("deal");

    let playout = session.play_until_game_over(None).expect("playout");
    assert_eq!(playout.steps, 12);
    assert_eq!(session.action_path().len(), 12);
}

#[test]
fn test_low_victory_playout_finishes() {
    let rules = rules_with(turn_start_config().with_victory_lore(2));
    let mut session = GameSession::deal(Arc::new(rules), DECK1, DECK2, SEED)
        .expect("deal")
        .with_playout_seed(9);

    let playout = session.play_until_game_over(None).expect("playout");
    assert!(playout.game_over);
    let winner = playout.winner.expect("a winner");
    assert_eq!(session.winner().expect("state"), Some(winner));
    assert!(session.play_random_action(true).expect("step").is_none());

    let refs = session.record_outcome().expect("outcome");
    assert_eq!(refs, playout.steps - 1);

    let store = session.store();
    let outcome = store
        .get_outcome(session.current_key())
        .expect("read")
        .expect("stored");
    assert_eq!(outcome.get("winner"), Some(winner.to_string().as_str()));
    assert!(store.get_outcomes(session.root_key()).expect("refs").is_empty());
}

/// Ids that are not in the current action index must not move the session.
fn assert_rejects_foreign_ids<S: StateStore>(session: &mut GameSession<S>) {
    let before = session.current_key().clone();
    let first = session.actions().expect("actions")[0].id.clone();

    for id in [format!("{first}/{first}"), "..".to_string(), ".".to_string(), String::new()] {
        let err = session.apply_action(&id).unwrap_err();
        assert!(
            matches!(err, EngineError::ActionNotFound { ref action_id, .. } if *action_id == id),
            "'{id}' gave {err}"
        );
        assert_eq!(session.current_key(), &before);
        assert!(session.action_path().is_empty());
    }
    assert!(session.store().list_children(&before).expect("children").is_empty());

    session.apply_action(first.as_str()).expect("a listed id");
    assert_eq!(session.action_path(), vec![first.as_str()]);
}

#[test]
fn test_apply_rejects_ids_outside_the_index() {
    let mut memory = session(1);
    assert_rejects_foreign_ids(&mut memory);

    let dir = TempDir::new().expect("tempdir");
    let rules = Arc::new(rules());
    let mut store = FileStore::open(dir.path(), &EngineConfig::default()).expect("store");
    let matchup = inkgraph::init_matchup(&mut store, &rules, DECK1, DECK2).expect("matchup");
    let dealt = inkgraph::shuffle_and_deal(&mut store, &rules, &matchup, SEED).expect("deal");
    let mut on_disk = GameSession::with_store(store, rules, dealt).expect("session");
    assert_rejects_foreign_ids(&mut on_disk);
}

#[test]
fn test_session_over_file_store() {
    let dir = TempDir::new().expect("tempdir");
    let rules = Arc::new(rules());
    let mut store = FileStore::open(dir.path(), &EngineConfig::default()).expect("store");
    let matchup = inkgraph::init_matchup(&mut store, &rules, DECK1, DECK2).expect("matchup");
    let dealt = inkgraph::shuffle_and_deal(&mut store, &rules, &matchup, SEED).expect("deal");

    let mut session = GameSession::with_store(store, rules.clone(), dealt.clone())
        .expect("session")
        .with_playout_seed(5);
    session.play_until_game_over(Some(10)).expect("playout");
    let end = session.current_key().clone();

    let store = session.into_store();
    assert!(store.exists(&end));
    assert_eq!(store.get_path(&end).expect("path").len(), 10);

    let unseen = matchup.join("0000000.0000000.zz").expect("key");
    let missing = GameSession::with_store(store, rules, unseen);
    assert!(missing.unwrap_err().is_not_found());
}

#[test]
fn test_profile_transition_on_disk() {
    let dir = TempDir::new().expect("tempdir");
    let rules = rules();
    let mut store = FileStore::open(dir.path(), &EngineConfig::default()).expect("store");
    let matchup = inkgraph::init_matchup(&mut store, &rules, DECK1, DECK2).expect("matchup");
    let dealt = inkgraph::shuffle_and_deal(&mut store, &rules, &matchup, SEED).expect("deal");

    let id = store.get_actions(&dealt).expect("actions")[0].id.clone();
    let profile = profile_transition(&mut store, &rules, &dealt, &id).expect("profile");

    assert!(store.exists(&dealt.child(&id).expect("key")));
    assert_eq!(
        profile.total(),
        profile.load + profile.execute + profile.effects + profile.compute + profile.save
    );
}
