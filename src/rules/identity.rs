//! Deterministic action identifiers.
//!
//! Candidates are sorted by `(kind, source, destination)` in their serialized
//! form and numbered from zero; the number is written in lowercase base 36
//! (`0`..`9`, `a`..`z`, `10`, `11`, ...). The same state therefore always
//! yields the same ids, whatever order the mechanics produced them in.

use crate::core::action::{ActionId, Candidate, LegalAction};

const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Render `n` in lowercase base 36.
#[must_use]
pub fn encode_index(mut n: usize) -> String {
    let mut buf = Vec::new();
    loop {
        buf.push(DIGITS[n % 36]);
        n /= 36;
        if n == 0 {
            break;
        }
    }
    buf.reverse();
    buf.into_iter().map(char::from).collect()
}

/// Inverse of [`encode_index`]. Rejects leading zeros and non-canonical input.
#[must_use]
pub fn decode_index(s: &str) -> Option<usize> {
    if s.is_empty() || (s.len() > 1 && s.starts_with('0')) {
        return None;
    }
    s.chars().try_fold(0usize, |acc, c| {
        let digit = c.to_digit(36)?;
        if c.is_ascii_uppercase() {
            return None;
        }
        acc.checked_mul(36)?.checked_add(digit as usize)
    })
}

/// Sort candidates canonically and give each its id.
#[must_use]
pub fn assign_ids(mut candidates: Vec<Candidate>) -> Vec<LegalAction> {
    candidates.sort_by_cached_key(Candidate::sort_key);
    candidates
        .into_iter()
        .enumerate()
        .map(|(i, c)| LegalAction::from_candidate(ActionId::new(encode_index(i)), c))
        .collect()
}
