//! State keys.
//!
//! A key addresses one node of the game tree: the matchup, then the seed,
//! then one action id per applied action, joined with `/`:
//!
//! ```text
//! 3f9a/0123456.0123456.aa/0/2/1b
//! ```

use std::str::FromStr;

use crate::core::action::ActionId;
use crate::error::{EngineError, Result};

/// Key of a stored state.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateKey(String);

fn valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

impl StateKey {
    /// Single-segment key (a matchup, or a session root).
    pub fn root(segment: &str) -> Result<Self> {
        if !valid_segment(segment) {
            return Err(EngineError::parse(format!("invalid key segment '{segment}'")));
        }
        Ok(Self(segment.to_string()))
    }

    /// Key of the state reached by applying `id` here.
    pub fn child(&self, id: &ActionId) -> Result<Self> {
        self.join(id.as_str())
    }

    /// Append one raw segment (e.g. a seed). Empty, `.`, `..` and anything
    /// holding a `/` are rejected.
    pub fn join(&self, segment: &str) -> Result<Self> {
        if !valid_segment(segment) {
            return Err(EngineError::parse(format!("invalid key segment '{segment}'")));
        }
        Ok(Self(format!("{}/{segment}", self.0)))
    }

    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.0
            .rsplit_once('/')
            .map(|(parent, _)| Self(parent.to_string()))
    }

    /// Last segment: the action id that produced this state, or the root name.
    #[must_use]
    pub fn last(&self) -> &str {
        self.0.rsplit_once('/').map_or(self.0.as_str(), |(_, last)| last)
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.split('/')
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    /// Every proper ancestor, nearest first.
    pub fn ancestors(&self) -> impl Iterator<Item = StateKey> + '_ {
        std::iter::successors(self.parent(), StateKey::parent)
    }

    /// Segments below `ancestor`, or `None` if it isn't one.
    #[must_use]
    pub fn suffix_from(&self, ancestor: &StateKey) -> Option<Vec<&str>> {
        let rest = self.0.strip_prefix(ancestor.as_str())?.strip_prefix('/')?;
        Some(rest.split('/').collect())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for StateKey {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim_matches('/');
        if trimmed.is_empty() || !trimmed.split('/').all(valid_segment) {
            return Err(EngineError::parse(format!("invalid state key '{s}'")));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl std::fmt::Display for StateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation() {
        let key: StateKey = "3f9a/0123456.0123456.aa/0/2".parse().unwrap();

        assert_eq!(key.last(), "2");
        assert_eq!(key.depth(), 4);
        assert_eq!(key.parent().unwrap().as_str(), "3f9a/0123456.0123456.aa/0");
        assert_eq!(key.child(&ActionId::new("1b")).unwrap().last(), "1b");

        let ancestors: Vec<_> = key.ancestors().map(|k| k.to_string()).collect();
        assert_eq!(
            ancestors,
            vec!["3f9a/0123456.0123456.aa/0", "3f9a/0123456.0123456.aa", "3f9a"]
        );
    }

    #[test]
    fn test_suffix_from() {
        let key: StateKey = "m/s/0/2/1".parse().unwrap();
        let seed: StateKey = "m/s".parse().unwrap();

        assert_eq!(key.suffix_from(&seed), Some(vec!["0", "2", "1"]));
        assert_eq!(key.suffix_from(&key), None);
        assert_eq!(seed.suffix_from(&key), None);

        let lookalike: StateKey = "m/s0".parse().unwrap();
        assert_eq!(lookalike.suffix_from(&seed), None);
    }

    #[test]
    fn test_parse_rejects() {
        assert!("".parse::<StateKey>().is_err());
        assert!("a//b".parse::<StateKey>().is_err());
        assert!("a/../b".parse::<StateKey>().is_err());
        assert!("a/b c".parse::<StateKey>().is_err());
        assert!(StateKey::root("x/y").is_err());

        let key: StateKey = "m/s".parse().unwrap();
        for bad in ["", ".", "..", "0/0", "a b"] {
            assert!(key.join(bad).is_err(), "accepted '{bad}'");
            assert!(key.child(&ActionId::new(bad)).is_err(), "accepted '{bad}'");
        }
        assert_eq!(key.join("0123456.0123456.aa").unwrap().depth(), 3);
        assert_eq!("/a/b/".parse::<StateKey>().unwrap().as_str(), "a/b");
    }
}
