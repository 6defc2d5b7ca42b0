//! Fixtures shared by the integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use inkgraph::{CardCatalog, EngineConfig, LorcanaRules};

pub const CATALOG_JSON: &str = r#"{
  "cards": [
    {"fullName": "Tipo - Growing Son", "id": 1, "cost": 2, "strength": 2, "willpower": 3, "lore": 1, "type": "Character", "inkwell": true},
    {"fullName": "Mickey Mouse - True Friend", "id": 2, "cost": 3, "strength": 3, "willpower": 3, "lore": 2, "type": "Character", "inkwell": true},
    {"fullName": "Be Prepared", "id": 3, "cost": 7, "type": "Action", "inkwell": false},
    {"fullName": "Dinglehopper", "id": 4, "cost": 1, "type": "Item", "inkwell": true},
    {"fullName": "Stitch - Rock Star", "id": 5, "cost": 6, "strength": 3, "willpower": 5, "lore": 2, "type": "Character", "inkwell": false},
    {"fullName": "Flounder - Voice of Reason", "id": 6, "cost": 2, "strength": 0, "willpower": 3, "lore": 2, "type": "Character", "inkwell": false},
    {"fullName": "Goofy - Musketeer", "id": 7, "cost": 5, "strength": 3, "willpower": 8, "lore": 0, "type": "Character", "inkwell": true},
    {"fullName": "Hei Hei - Boat Snack", "id": 8, "cost": 1, "strength": 1, "willpower": 2, "lore": 1, "type": "Character", "inkwell": true}
  ]
}"#;

/// 8 unique cards, 30 total.
pub const DECK1: &str = "\
4 Tipo - Growing Son
4 Mickey Mouse - True Friend
2 Be Prepared
4 Dinglehopper
4 Stitch - Rock Star
4 Flounder - Voice of Reason
4 Goofy - Musketeer
4 Hei Hei - Boat Snack
";

/// Same cards in a different order, 28 total.
pub const DECK2: &str = "\
4 Hei Hei - Boat Snack
4 Goofy - Musketeer
4 Flounder - Voice of Reason
2 Stitch - Rock Star
4 Dinglehopper
2 Be Prepared
4 Mickey Mouse - True Friend
4 Tipo - Growing Son
";

pub const SEED: &str = "0123456.0123456.aa";

pub fn catalog() -> Arc<CardCatalog> {
    Arc::new(CardCatalog::from_json(CATALOG_JSON).expect("fixture catalog parses"))
}

pub fn rules() -> LorcanaRules {
    rules_with(EngineConfig::default())
}

pub fn rules_with(config: EngineConfig) -> LorcanaRules {
    LorcanaRules::new(catalog(), config)
}

/// Config with the turn-start ready and draw steps switched on.
pub fn turn_start_config() -> EngineConfig {
    EngineConfig::default()
        .with_ready_on_turn_start(true)
        .with_draw_on_turn_start(true)
}

/// Opt-in log output: `RUST_LOG=inkgraph=debug cargo test`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Materialize `deck_id` for `player` directly in a zone.
pub fn put(
    state: &mut inkgraph::GameState,
    player: inkgraph::PlayerId,
    deck_id: &str,
    kind: inkgraph::ZoneKind,
) -> inkgraph::CardKey {
    let label = inkgraph::core::base_name(deck_id);
    let def = catalog().get(label).expect("card in fixture catalog").clone();
    let key = inkgraph::CardKey::new(player, deck_id);
    state
        .graph
        .add_card(
            inkgraph::CardInstance::new(key.clone(), player, def.id, label),
            inkgraph::ZoneRef::new(player, kind),
        )
        .expect("card placed");
    key
}
