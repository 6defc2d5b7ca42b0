//! Deterministic deal: starting hand on top, shuffled remainder below.

use crate::core::player::PlayerId;
use crate::core::rng::GameRng;
use crate::error::{EngineError, Result};

use super::decklist::Decklist;
use super::seed::Seed;

/// Build `player`'s ordered deck for `seed`.
///
/// The seed's hand indices pick entries of `decklist` by position; each pick
/// takes that card's next untaken copy (`.a`, then `.b`, ...). The copies
/// left over are shuffled with a ChaCha8 stream keyed by the seed string and
/// the player, and placed after the hand.
///
/// Every index and copy count is checked before anything is built.
pub fn build_shuffled_deck(decklist: &Decklist, seed: &Seed, player: PlayerId) -> Result<Vec<String>> {
    let entries = decklist.entries();
    let mut taken = vec![0u32; entries.len()];

    for &index in seed.hand(player) {
        let entry = entries.get(index).ok_or(EngineError::HandIndexOutOfRange {
            index,
            unique: entries.len(),
        })?;
        if taken[index] >= entry.count {
            return Err(EngineError::NotEnoughCopies {
                name: entry.name.clone(),
            });
        }
        taken[index] += 1;
    }

    let mut copies: Vec<Vec<String>> = entries.iter().map(|e| e.copy_ids()).collect();
    let mut next = vec![0usize; entries.len()];
    let mut deck = Vec::with_capacity(decklist.total_cards());

    for &index in seed.hand(player) {
        deck.push(std::mem::take(&mut copies[index][next[index]]));
        next[index] += 1;
    }

    let mut remainder: Vec<String> = copies
        .into_iter()
        .zip(next)
        .flat_map(|(ids, used)| ids.into_iter().skip(used))
        .collect();

    let mut rng = GameRng::from_seed_str(seed.as_str()).for_context(&player.to_string());
    rng.shuffle(&mut remainder);

    deck.extend(remainder);
    Ok(deck)
}
