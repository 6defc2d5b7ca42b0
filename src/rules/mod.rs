//! Rules: legal-action computation, execution, and state-based effects.
//!
//! `RulesEngine` defines:
//! - Legal actions for each game state
//! - How actions modify state
//! - Win/loss conditions
//!
//! `LorcanaRules` implements it with one module per mechanic
//! (`mechanics::{pass, ink, play, quest, challenge, activate}`), the
//! state-based effect loop in `effects`, and deterministic action ids in
//! `identity`.

pub mod effects;
pub mod engine;
pub mod identity;
pub mod mechanics;

#[cfg(test)]
pub(crate) mod fixtures;

pub use crate::core::action::ActionKind;
pub use effects::{default_effects, run_until_stable, BanishDamaged, StateBasedEffect};
pub use engine::{GameResult, LorcanaRules, RulesEngine};
pub use identity::{assign_ids, decode_index, encode_index};
pub use mechanics::RuleContext;
