//! End of turn.
//!
//! Always available to the current player, including after the game has
//! ended; playout loops check the game-over flag themselves.

use smallvec::SmallVec;

use super::RuleContext;
use crate::core::action::{ActionKind, Candidate};
use crate::core::entity::{CardKey, NodeRef};
use crate::core::state::GameState;
use crate::error::Result;
use crate::zones::ZoneKind;

pub fn compute(_ctx: &RuleContext<'_>, state: &GameState) -> Result<Vec<Candidate>> {
    Ok(vec![Candidate::new(
        ActionKind::Pass,
        state.current_player(),
        NodeRef::Game,
        "end",
    )])
}

/// Hand the turn to the other player.
///
/// The incoming player gets one ink drop and a full ink pool. The opt-in
/// config switches also ready their characters and draw them a card.
pub fn execute(ctx: &RuleContext<'_>, state: &mut GameState) -> Result<()> {
    let next = state.graph.flip_turn();
    state.graph.game.turn += 1;

    let player = state.graph.player_mut(next);
    player.ink_drops = 1;
    player.ink_available = player.ink_total;

    if ctx.config.ready_on_turn_start {
        let exerted: SmallVec<[CardKey; 8]> = state
            .graph
            .player_cards(next, ZoneKind::Play)
            .filter(|c| c.tapped)
            .map(|c| c.key.clone())
            .collect();
        for key in &exerted {
            state.graph.card_mut(key)?.ready();
        }
    }

    if ctx.config.draw_on_turn_start {
        state.draw(ctx.catalog, next, 1)?;
    }

    Ok(())
}
