//! Playing a card from hand.

use super::{dest_zone, source_card, RuleContext};
use crate::core::action::{ActionKind, Candidate, LegalAction};
use crate::core::state::GameState;
use crate::error::Result;
use crate::zones::{ZoneKind, ZoneRef};

/// Every hand card the current player can pay for. Actions resolve straight
/// to the discard; everything else lands in play.
pub fn compute(ctx: &RuleContext<'_>, state: &GameState) -> Result<Vec<Candidate>> {
    let player = state.current_player();
    let available = state.graph.player(player).ink_available;

    let mut out = Vec::new();
    for card in state.graph.player_cards(player, ZoneKind::Hand) {
        let def = ctx.definition(card)?;
        if def.cost > available {
            continue;
        }
        let dest = if def.is_action() {
            ZoneKind::Discard
        } else {
            ZoneKind::Play
        };
        out.push(Candidate::new(
            ActionKind::Play,
            card.key.clone(),
            ZoneRef::new(player, dest),
            format!("play:{}", card.key),
        ));
    }
    Ok(out)
}

pub fn execute(ctx: &RuleContext<'_>, state: &mut GameState, action: &LegalAction) -> Result<()> {
    let key = source_card(action)?;
    let zone = dest_zone(action)?;
    let cost = ctx.definition_of(state, key)?.cost;

    state.move_card(key, zone)?;

    let current = state.current_player();
    let player = state.graph.player_mut(current);
    player.ink_available = player.ink_available.saturating_sub(cost);

    if zone.kind == ZoneKind::Play {
        let turn = state.graph.game.turn;
        let card = state.graph.card_mut(key)?;
        card.entered_play = Some(turn);
        card.ready();
    }
    Ok(())
}
