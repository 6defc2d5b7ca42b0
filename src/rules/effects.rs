//! State-based effects.
//!
//! After every execution the engine runs each registered effect in order and
//! repeats the whole pass until one full pass changes nothing. New rules
//! (triggered abilities, lore-based checks, ...) plug in by implementing
//! [`StateBasedEffect`].

use smallvec::SmallVec;

use crate::cards::CardCatalog;
use crate::core::entity::CardKey;
use crate::core::state::GameState;
use crate::error::Result;
use crate::zones::{ZoneKind, ZoneRef};

/// A mandatory cleanup rule.
pub trait StateBasedEffect: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Apply the rule once. Returns true if the state changed.
    fn apply(&self, state: &mut GameState, catalog: &CardCatalog) -> Result<bool>;
}

/// Characters whose damage reaches their willpower go to their owner's discard.
#[derive(Clone, Copy, Debug, Default)]
pub struct BanishDamaged;

impl StateBasedEffect for BanishDamaged {
    fn name(&self) -> &'static str {
        "banish_damaged"
    }

    fn apply(&self, state: &mut GameState, catalog: &CardCatalog) -> Result<bool> {
        let mut doomed: SmallVec<[(CardKey, ZoneRef); 4]> = SmallVec::new();

        for (key, _) in state.graph.zones().cards_in_kind(ZoneKind::Play) {
            let card = state.graph.card(key)?;
            if card.damage == 0 {
                continue;
            }
            let def = catalog.get(&card.label)?;
            if def.is_character() && card.damage >= def.willpower {
                doomed.push((key.clone(), ZoneRef::new(card.owner, ZoneKind::Discard)));
            }
        }

        for (key, discard) in &doomed {
            state.move_card(key, *discard)?;
            tracing::debug!(card = %key, "banished");
        }
        Ok(!doomed.is_empty())
    }
}

/// The effects every game runs.
#[must_use]
pub fn default_effects() -> Vec<Box<dyn StateBasedEffect>> {
    vec![Box::new(BanishDamaged)]
}

/// Run `effects` until a full pass applies none of them.
///
/// Returns the number of passes that changed something.
pub fn run_until_stable(
    effects: &[Box<dyn StateBasedEffect>],
    state: &mut GameState,
    catalog: &CardCatalog,
) -> Result<usize> {
    let mut passes = 0;
    loop {
        let mut changed = false;
        for effect in effects {
            if effect.apply(state, catalog)? {
                tracing::trace!(effect = effect.name(), "state-based effect applied");
                changed = true;
            }
        }
        if !changed {
            return Ok(passes);
        }
        passes += 1;
    }
}
