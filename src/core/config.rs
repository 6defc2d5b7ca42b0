//! Engine configuration.
//!
//! The rules engine, the deal, and the exploration tools read their tunables
//! from one `EngineConfig`. Defaults give the base rules, with the turn-start
//! ready and draw steps switched off; tests and experiments override fields
//! through the `with_*` builders or by loading a JSON document.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Engine configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Lore total that ends the game (default: 20).
    pub victory_lore: u32,

    /// Cards dealt to each player by the shuffle (default: 7).
    /// Must equal the number of hand characters in a seed.
    pub starting_hand_size: usize,

    /// Upper bound on actions taken by a random playout.
    /// Guarantees termination even if some rule keeps an action always available.
    pub max_playout_steps: usize,

    /// Number of loaded states kept by the durable store's cache.
    pub state_cache_capacity: u64,

    /// Ready the incoming player's characters when the turn passes (default: off).
    pub ready_on_turn_start: bool,

    /// Draw one card for the incoming player when the turn passes (default: off).
    pub draw_on_turn_start: bool,

    /// Random playouts only pick "end" when nothing else is available.
    pub prefer_non_end: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            victory_lore: 20,
            starting_hand_size: crate::deck::HAND_SPEC_LEN,
            max_playout_steps: 1000,
            state_cache_capacity: 256,
            ready_on_turn_start: false,
            draw_on_turn_start: false,
            prefer_non_end: true,
        }
    }
}

impl EngineConfig {
    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants that the engine relies on.
    pub fn validate(&self) -> Result<()> {
        if self.victory_lore == 0 {
            return Err(EngineError::InvalidConfig {
                detail: "victory_lore must be positive".into(),
            });
        }
        if self.starting_hand_size != crate::deck::HAND_SPEC_LEN {
            return Err(EngineError::InvalidConfig {
                detail: format!(
                    "starting_hand_size must be {} to match the seed format",
                    crate::deck::HAND_SPEC_LEN
                ),
            });
        }
        if self.max_playout_steps == 0 {
            return Err(EngineError::InvalidConfig {
                detail: "max_playout_steps must be positive".into(),
            });
        }
        Ok(())
    }

    pub fn with_victory_lore(mut self, lore: u32) -> Self {
        self.victory_lore = lore;
        self
    }

    pub fn with_max_playout_steps(mut self, steps: usize) -> Self {
        self.max_playout_steps = steps;
        self
    }

    pub fn with_state_cache_capacity(mut self, capacity: u64) -> Self {
        self.state_cache_capacity = capacity;
        self
    }

    pub fn with_ready_on_turn_start(mut self, ready: bool) -> Self {
        self.ready_on_turn_start = ready;
        self
    }

    pub fn with_draw_on_turn_start(mut self, draw: bool) -> Self {
        self.draw_on_turn_start = draw;
        self
    }

    pub fn with_prefer_non_end(mut self, prefer: bool) -> Self {
        self.prefer_non_end = prefer;
        self
    }
}
