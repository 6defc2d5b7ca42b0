//! Decklists, deal seeds, and the deterministic shuffle.
//!
//! Replaying the same seed against the same decklists always reproduces the
//! same starting hands and the same deck order.

pub mod decklist;
pub mod seed;
pub mod shuffle;

pub use decklist::{DeckEntry, Decklist, MAX_COPIES};
pub use seed::{Seed, HAND_SPEC_LEN, MAX_HAND_INDEX, SUFFIX_LEN};
pub use shuffle::build_shuffled_deck;
