//! Challenging an exerted opposing character.

use super::{dest_card, source_card, RuleContext};
use crate::core::action::{ActionKind, Candidate, LegalAction};
use crate::core::state::GameState;
use crate::error::Result;
use crate::zones::ZoneKind;

/// Every (attacker, defender) pair where the attacker is a ready, dry
/// character with strength and the defender is an exerted opposing character.
pub fn compute(ctx: &RuleContext<'_>, state: &GameState) -> Result<Vec<Candidate>> {
    let player = state.current_player();
    let turn = state.graph.game.turn;

    let mut defenders = Vec::new();
    for card in state.graph.player_cards(player.opponent(), ZoneKind::Play) {
        if card.tapped && ctx.definition(card)?.is_character() {
            defenders.push(card);
        }
    }

    let mut out = Vec::new();
    for attacker in state.graph.player_cards(player, ZoneKind::Play) {
        let def = ctx.definition(attacker)?;
        if !def.is_character() || def.strength == 0 || attacker.tapped || !attacker.is_dry(turn) {
            continue;
        }
        for defender in &defenders {
            out.push(Candidate::new(
                ActionKind::Challenge,
                attacker.key.clone(),
                defender.key.clone(),
                format!("challenge:{}->{}", attacker.key, defender.key),
            ));
        }
    }
    Ok(out)
}

/// Exert the attacker, then each combatant deals its strength to the other.
/// Both strengths are read before any damage lands.
pub fn execute(ctx: &RuleContext<'_>, state: &mut GameState, action: &LegalAction) -> Result<()> {
    let attacker = source_card(action)?;
    let defender = dest_card(action)?;

    let attack = ctx.definition_of(state, attacker)?.strength;
    let counter = ctx.definition_of(state, defender)?.strength;

    state.graph.card_mut(attacker)?.exert();
    state.graph.card_mut(defender)?.add_damage(attack);
    state.graph.card_mut(attacker)?.add_damage(counter);
    Ok(())
}
