//! Rules engine trait and the Lorcana implementation.
//!
//! A transition is always the same four steps:
//! 1. `apply_action` performs the mutation of one legal action
//! 2. `state_based_effects` settles mandatory cleanup
//! 3. `legal_actions` recomputes the action edges
//! 4. the caller persists the settled state
//!
//! Steps 1-3 are bundled in [`RulesEngine::advance`]; nothing else in the
//! crate calls `apply_action` directly.

use std::sync::Arc;

use super::effects::{default_effects, run_until_stable, StateBasedEffect};
use super::identity::assign_ids;
use super::mechanics::{activate, challenge, ink, pass, play, quest, RuleContext};
use crate::cards::CardCatalog;
use crate::core::action::{ActionKind, LegalAction};
use crate::core::config::EngineConfig;
use crate::core::player::PlayerId;
use crate::core::state::GameState;
use crate::error::Result;

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Game over without a winner.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Draw => false,
        }
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_actions`: pure and idempotent; returns the identified, sorted list
/// - `apply_action`: deterministic; unknown kinds are an error
/// - `is_terminal`: `None` while the game continues
pub trait RulesEngine {
    /// Get the engine configuration.
    fn config(&self) -> &EngineConfig;

    /// Compute every legal action of `state`, sorted and identified.
    fn legal_actions(&self, state: &GameState) -> Result<Vec<LegalAction>>;

    /// Perform the mutation implied by `action`.
    fn apply_action(&self, state: &mut GameState, action: &LegalAction) -> Result<()>;

    /// Run mandatory cleanup until nothing changes.
    fn state_based_effects(&self, state: &mut GameState) -> Result<()>;

    /// Check if the game is over.
    fn is_terminal(&self, state: &GameState) -> Option<GameResult>;

    // === Convenience Methods ===

    /// Recompute and store the action edges of `state`.
    fn refresh_actions(&self, state: &mut GameState) -> Result<()> {
        let actions = self.legal_actions(state)?;
        state.graph.set_actions(actions);
        Ok(())
    }

    /// Apply `action` and settle the state: effects, then fresh action edges.
    fn advance(&self, state: &mut GameState, action: &LegalAction) -> Result<()> {
        tracing::debug!(
            id = %action.id,
            kind = %action.kind,
            action = %action.description,
            turn = state.graph.game.turn,
            "applying action"
        );
        self.apply_action(state, action)?;
        self.state_based_effects(state)?;
        self.refresh_actions(state)
    }
}

/// The Lorcana rules.
///
/// Holds the catalog by `Arc` so any number of sessions and stores can share
/// one loaded catalog.
pub struct LorcanaRules {
    catalog: Arc<CardCatalog>,
    config: EngineConfig,
    effects: Vec<Box<dyn StateBasedEffect>>,
}

impl LorcanaRules {
    #[must_use]
    pub fn new(catalog: Arc<CardCatalog>, config: EngineConfig) -> Self {
        Self {
            catalog,
            config,
            effects: default_effects(),
        }
    }

    /// Register an extra state-based effect, run after the built-in ones.
    #[must_use]
    pub fn with_effect(mut self, effect: impl StateBasedEffect + 'static) -> Self {
        self.effects.push(Box::new(effect));
        self
    }

    #[must_use]
    pub fn catalog(&self) -> &Arc<CardCatalog> {
        &self.catalog
    }

    fn context(&self) -> RuleContext<'_> {
        RuleContext {
            catalog: &self.catalog,
            config: &self.config,
        }
    }
}

impl std::fmt::Debug for LorcanaRules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LorcanaRules")
            .field("cards", &self.catalog.len())
            .field("config", &self.config)
            .field("effects", &self.effects.iter().map(|e| e.name()).collect::<Vec<_>>())
            .finish()
    }
}

impl RulesEngine for LorcanaRules {
    fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn legal_actions(&self, state: &GameState) -> Result<Vec<LegalAction>> {
        let ctx = self.context();
        let mut candidates = pass::compute(&ctx, state)?;
        candidates.extend(ink::compute(&ctx, state)?);
        candidates.extend(play::compute(&ctx, state)?);
        candidates.extend(quest::compute(&ctx, state)?);
        candidates.extend(challenge::compute(&ctx, state)?);
        candidates.extend(activate::compute(&ctx, state)?);
        Ok(assign_ids(candidates))
    }

    fn apply_action(&self, state: &mut GameState, action: &LegalAction) -> Result<()> {
        let ctx = self.context();
        match action.kind {
            ActionKind::Pass => pass::execute(&ctx, state),
            ActionKind::Ink => ink::execute(&ctx, state, action),
            ActionKind::Play => play::execute(&ctx, state, action),
            ActionKind::Quest => quest::execute(&ctx, state, action),
            ActionKind::Challenge => challenge::execute(&ctx, state, action),
            ActionKind::Activate => activate::execute(&ctx, state, action),
        }
    }

    fn state_based_effects(&self, state: &mut GameState) -> Result<()> {
        run_until_stable(&self.effects, state, &self.catalog)?;
        Ok(())
    }

    fn is_terminal(&self, state: &GameState) -> Option<GameResult> {
        if !state.is_game_over() {
            return None;
        }
        Some(state.winner().map_or(GameResult::Draw, GameResult::Winner))
    }
}
