//! Activated abilities.
//!
//! Cards with activated abilities are not modeled yet, so nothing is ever
//! advertised. An activate action arriving from outside is rejected rather
//! than ignored.

use super::RuleContext;
use crate::core::action::{Candidate, LegalAction};
use crate::core::state::GameState;
use crate::error::{EngineError, Result};

pub fn compute(_ctx: &RuleContext<'_>, _state: &GameState) -> Result<Vec<Candidate>> {
    Ok(Vec::new())
}

pub fn execute(_ctx: &RuleContext<'_>, _state: &mut GameState, action: &LegalAction) -> Result<()> {
    Err(EngineError::UnimplementedAction(action.kind))
}
