//! Questing for lore.

use super::{dest_player, source_card, RuleContext};
use crate::core::action::{ActionKind, Candidate, LegalAction};
use crate::core::state::GameState;
use crate::error::Result;
use crate::zones::ZoneKind;

/// Every ready, dry character of the current player that carries lore.
pub fn compute(ctx: &RuleContext<'_>, state: &GameState) -> Result<Vec<Candidate>> {
    let player = state.current_player();
    let turn = state.graph.game.turn;

    let mut out = Vec::new();
    for card in state.graph.player_cards(player, ZoneKind::Play) {
        let def = ctx.definition(card)?;
        if !def.is_character() || def.lore == 0 || card.tapped || !card.is_dry(turn) {
            continue;
        }
        out.push(Candidate::new(
            ActionKind::Quest,
            card.key.clone(),
            card.owner,
            format!("quest:{}", card.key),
        ));
    }
    Ok(out)
}

/// Exert the character and add its lore to its owner. Reaching the victory
/// threshold ends the game.
pub fn execute(ctx: &RuleContext<'_>, state: &mut GameState, action: &LegalAction) -> Result<()> {
    let key = source_card(action)?;
    let owner = dest_player(action)?;
    let lore = ctx.definition_of(state, key)?.lore;

    state.graph.card_mut(key)?.exert();

    let player = state.graph.player_mut(owner);
    player.lore += lore;
    let total = player.lore;

    if total >= ctx.config.victory_lore && !state.graph.game.game_over {
        state.graph.game.game_over = true;
        state.graph.game.winner = Some(owner);
        tracing::info!(winner = %owner, lore = total, "victory threshold reached");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::EngineConfig;
    use crate::core::PlayerId;
    use crate::rules::fixtures::{catalog, put, put_dry};
    use crate::rules::identity::assign_ids;

    #[test]
    fn test_quest_requirements() {
        let catalog = catalog();
        let config = EngineConfig::default();
        let ctx = RuleContext { catalog: &catalog, config: &config };
        let mut state = GameState::template();

        let ready = put_dry(&mut state, PlayerId::P1, "tipo_growing_son.a");
        let tapped = put_dry(&mut state, PlayerId::P1, "mickey_mouse_true_friend.a");
        state.graph.card_mut(&tapped).unwrap().exert();
        put_dry(&mut state, PlayerId::P1, "goofy_musketeer.a");
        put_dry(&mut state, PlayerId::P2, "stitch_rock_star.a");
        let wet = put(&mut state, PlayerId::P1, "tipo_growing_son.b", ZoneKind::Play);
        let turn = state.graph.game.turn;
        state.graph.card_mut(&wet).unwrap().entered_play = Some(turn);

        let candidates = compute(&ctx, &state).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].source.as_card(), Some(&ready));
        assert_eq!(candidates[0].dest.as_player(), Some(PlayerId::P1));
    }

    #[test]
    fn test_execute_adds_lore() {
        let catalog = catalog();
        let config = EngineConfig::default();
        let ctx = RuleContext { catalog: &catalog, config: &config };
        let mut state = GameState::template();
        let mickey = put_dry(&mut state, PlayerId::P1, "mickey_mouse_true_friend.a");

        let action = assign_ids(compute(&ctx, &state).unwrap()).remove(0);
        execute(&ctx, &mut state, &action).unwrap();

        assert!(state.graph.card(&mickey).unwrap().tapped);
        assert_eq!(state.graph.player(PlayerId::P1).lore, 2);
        assert!(!state.is_game_over());
    }

    #[test]
    fn test_victory() {
        let catalog = catalog();
        let config = EngineConfig::default().with_victory_lore(5);
        let ctx = RuleContext { catalog: &catalog, config: &config };
        let mut state = GameState::template();
        put_dry(&mut state, PlayerId::P1, "mickey_mouse_true_friend.a");
        state.graph.player_mut(PlayerId::P1).lore = 3;

        let action = assign_ids(compute(&ctx, &state).unwrap()).remove(0);
        execute(&ctx, &mut state, &action).unwrap();

        assert!(state.is_game_over());
        assert_eq!(state.winner(), Some(PlayerId::P1));
    }
}
