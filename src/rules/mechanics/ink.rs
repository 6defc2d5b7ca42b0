//! Putting a card into the inkwell.

use super::{dest_zone, source_card, RuleContext};
use crate::core::action::{ActionKind, Candidate, LegalAction};
use crate::core::state::GameState;
use crate::error::Result;
use crate::zones::{ZoneKind, ZoneRef};

/// Every inkable hand card while the current player has an ink drop left.
pub fn compute(ctx: &RuleContext<'_>, state: &GameState) -> Result<Vec<Candidate>> {
    let player = state.current_player();
    if state.graph.player(player).ink_drops == 0 {
        return Ok(Vec::new());
    }

    let inkwell = ZoneRef::new(player, ZoneKind::Inkwell);
    let mut out = Vec::new();
    for card in state.graph.player_cards(player, ZoneKind::Hand) {
        if ctx.definition(card)?.inkable {
            out.push(Candidate::new(
                ActionKind::Ink,
                card.key.clone(),
                inkwell,
                format!("ink:{}", card.key),
            ));
        }
    }
    Ok(out)
}

pub fn execute(_ctx: &RuleContext<'_>, state: &mut GameState, action: &LegalAction) -> Result<()> {
    let card = source_card(action)?;
    state.move_card(card, dest_zone(action)?)?;

    let current = state.current_player();
    let player = state.graph.player_mut(current);
    player.ink_drops = player.ink_drops.saturating_sub(1);
    player.ink_total += 1;
    player.ink_available += 1;
    Ok(())
}
