//! Deal seeds.
//!
//! Format: `xxxxxxx.xxxxxxx.xx`, lowercase base 36.
//! - first 7 characters: `p1`'s starting hand, as indices into the unique
//!   cards of deck 1 (`0`-`9` = 0-9, `a`-`z` = 10-35)
//! - next 7: `p2`'s starting hand against deck 2
//! - last 2: extra entropy for the shuffle
//!
//! The whole string seeds the shuffle RNG.

use std::str::FromStr;

use crate::core::player::{PlayerId, PlayerMap};
use crate::core::rng::GameRng;
use crate::error::{EngineError, Result};

/// Cards dealt into each starting hand.
pub const HAND_SPEC_LEN: usize = 7;

/// Length of the trailing shuffle suffix.
pub const SUFFIX_LEN: usize = 2;

/// Highest index a single base-36 character can express.
pub const MAX_HAND_INDEX: usize = 35;

fn char_to_index(c: char) -> Option<usize> {
    match c {
        '0'..='9' | 'a'..='z' => c.to_digit(36).map(|d| d as usize),
        _ => None,
    }
}

fn index_to_char(i: usize) -> char {
    char::from_digit(i.min(MAX_HAND_INDEX) as u32, 36).unwrap_or('0')
}

/// A parsed deal seed.
///
/// ```
/// use inkgraph::core::PlayerId;
/// use inkgraph::deck::Seed;
///
/// let seed: Seed = "0123456.0123456.aa".parse().unwrap();
/// assert_eq!(seed.hand(PlayerId::P2), &[0, 1, 2, 3, 4, 5, 6]);
/// assert_eq!(seed.to_string(), "0123456.0123456.aa");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Seed {
    raw: String,
    hands: PlayerMap<[usize; HAND_SPEC_LEN]>,
}

impl Seed {
    /// Hand indices for `player`.
    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &[usize; HAND_SPEC_LEN] {
        &self.hands[player]
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// True if `segment` is shaped like a seed.
    #[must_use]
    pub fn is_seed(segment: &str) -> bool {
        segment.parse::<Seed>().is_ok()
    }

    /// Generate a seed whose hand indices are all `<= max_index`.
    ///
    /// Most decks have around 17 distinct cards, so `16` is a sensible bound.
    #[must_use]
    pub fn random(rng: &mut GameRng, max_index: usize) -> Self {
        let bound = max_index.min(MAX_HAND_INDEX) + 1;
        let mut chars = |n: usize, bound: usize| -> String {
            (0..n).map(|_| index_to_char(rng.gen_range_usize(0..bound))).collect()
        };
        let p1 = chars(HAND_SPEC_LEN, bound);
        let p2 = chars(HAND_SPEC_LEN, bound);
        let suffix = chars(SUFFIX_LEN, MAX_HAND_INDEX + 1);

        let raw = format!("{p1}.{p2}.{suffix}");
        let hands = PlayerMap::from_pair(parse_hand(&p1), parse_hand(&p2));
        Self { raw, hands }
    }
}

fn parse_hand(spec: &str) -> [usize; HAND_SPEC_LEN] {
    let mut hand = [0; HAND_SPEC_LEN];
    for (slot, c) in hand.iter_mut().zip(spec.chars()) {
        *slot = char_to_index(c).unwrap_or(0);
    }
    hand
}

impl FromStr for Seed {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || EngineError::InvalidSeed { seed: s.to_string() };

        let mut parts = s.split('.');
        let (p1, p2, suffix) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(p1), Some(p2), Some(suffix), None) => (p1, p2, suffix),
            _ => return Err(invalid()),
        };

        let well_formed = |part: &str, len: usize| {
            part.chars().count() == len && part.chars().all(|c| char_to_index(c).is_some())
        };
        if !well_formed(p1, HAND_SPEC_LEN)
            || !well_formed(p2, HAND_SPEC_LEN)
            || !well_formed(suffix, SUFFIX_LEN)
        {
            return Err(invalid());
        }

        Ok(Self {
            raw: s.to_string(),
            hands: PlayerMap::from_pair(parse_hand(p1), parse_hand(p2)),
        })
    }
}

impl std::fmt::Display for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}
