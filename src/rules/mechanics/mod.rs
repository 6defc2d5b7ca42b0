//! One module per mechanic.
//!
//! Each mechanic exposes:
//! - `compute(ctx, state)`: the candidates it contributes, read-only
//! - `execute(ctx, state, action)`: the mutation for one of its actions
//!
//! The engine concatenates every mechanic's candidates and routes execution
//! by `ActionKind`.

pub mod activate;
pub mod challenge;
pub mod ink;
pub mod pass;
pub mod play;
pub mod quest;

use crate::cards::{CardCatalog, CardDefinition, CardInstance};
use crate::core::action::LegalAction;
use crate::core::config::EngineConfig;
use crate::core::entity::CardKey;
use crate::core::player::PlayerId;
use crate::core::state::GameState;
use crate::error::{EngineError, Result};
use crate::zones::ZoneRef;

/// Read-only inputs every mechanic may consult.
#[derive(Clone, Copy, Debug)]
pub struct RuleContext<'a> {
    pub catalog: &'a CardCatalog,
    pub config: &'a EngineConfig,
}

impl<'a> RuleContext<'a> {
    /// Catalog entry behind a card node.
    pub fn definition(&self, card: &CardInstance) -> Result<&'a CardDefinition> {
        self.catalog.get(&card.label)
    }

    /// Catalog entry behind a card key in `state`.
    pub fn definition_of(&self, state: &GameState, key: &CardKey) -> Result<&'a CardDefinition> {
        self.definition(state.graph.card(key)?)
    }
}

fn malformed(action: &LegalAction, detail: &str) -> EngineError {
    EngineError::MalformedAction {
        kind: action.kind,
        detail: format!("{detail} ({} -> {})", action.source, action.dest),
    }
}

/// The card an action starts from.
pub(crate) fn source_card(action: &LegalAction) -> Result<&CardKey> {
    action
        .source
        .as_card()
        .ok_or_else(|| malformed(action, "source is not a card"))
}

/// The card an action targets.
pub(crate) fn dest_card(action: &LegalAction) -> Result<&CardKey> {
    action
        .dest
        .as_card()
        .ok_or_else(|| malformed(action, "destination is not a card"))
}

pub(crate) fn dest_zone(action: &LegalAction) -> Result<ZoneRef> {
    action
        .dest
        .as_zone()
        .ok_or_else(|| malformed(action, "destination is not a zone"))
}

pub(crate) fn dest_player(action: &LegalAction) -> Result<PlayerId> {
    action
        .dest
        .as_player()
        .ok_or_else(|| malformed(action, "destination is not a player"))
}
