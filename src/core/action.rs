//! Action representation: kind + source node + destination node.
//!
//! A legal move is an edge in the state graph. Its kind is the "verb", its
//! source and destination are the "nouns":
//! - "end" = current player -> game
//! - "ink:p1.x.a" = card -> own inkwell zone
//! - "challenge:p1.x.a->p2.y.a" = attacker -> defender
//!
//! Mechanics produce unordered [`Candidate`]s; identity assignment turns the
//! sorted candidate list into [`LegalAction`]s carrying an [`ActionId`].

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::entity::NodeRef;
use crate::error::{EngineError, Result};

/// Kind of legal action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Pass,
    Ink,
    Play,
    Quest,
    Challenge,
    /// Activated abilities. Never produced yet; executing one is an error.
    Activate,
}

impl ActionKind {
    pub const ALL: [ActionKind; 6] = [
        ActionKind::Pass,
        ActionKind::Ink,
        ActionKind::Play,
        ActionKind::Quest,
        ActionKind::Challenge,
        ActionKind::Activate,
    ];

    /// Edge tag used in serialized graphs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ActionKind::Pass => "CAN_PASS",
            ActionKind::Ink => "CAN_INK",
            ActionKind::Play => "CAN_PLAY",
            ActionKind::Quest => "CAN_QUEST",
            ActionKind::Challenge => "CAN_CHALLENGE",
            ActionKind::Activate => "CAN_ACTIVATE",
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        ActionKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| EngineError::parse(format!("unknown action kind '{s}'")))
    }
}

/// Short identifier of a legal action within one state.
///
/// Also the last segment of the child state's key.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActionId(String);

impl ActionId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ActionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ActionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// An unidentified move produced by one mechanic.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Candidate {
    pub kind: ActionKind,
    pub source: NodeRef,
    pub dest: NodeRef,
    /// Human-readable label, e.g. `quest:p1.tipo_growing_son.a`.
    pub description: String,
}

impl Candidate {
    #[must_use]
    pub fn new(
        kind: ActionKind,
        source: impl Into<NodeRef>,
        dest: impl Into<NodeRef>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            source: source.into(),
            dest: dest.into(),
            description: description.into(),
        }
    }

    /// Canonical ordering key: `(kind, source, destination)` as serialized.
    #[must_use]
    pub fn sort_key(&self) -> (&'static str, String, String) {
        (self.kind.as_str(), self.source.to_string(), self.dest.to_string())
    }
}

/// An identified legal action: an action edge of a settled state.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LegalAction {
    pub id: ActionId,
    pub kind: ActionKind,
    pub source: NodeRef,
    pub dest: NodeRef,
    pub description: String,
}

impl LegalAction {
    #[must_use]
    pub fn from_candidate(id: ActionId, candidate: Candidate) -> Self {
        Self {
            id,
            kind: candidate.kind,
            source: candidate.source,
            dest: candidate.dest,
            description: candidate.description,
        }
    }

    /// The `{id, description}` record listed in a state's action index.
    #[must_use]
    pub fn entry(&self) -> ActionEntry {
        ActionEntry {
            id: self.id.clone(),
            description: self.description.clone(),
        }
    }

    #[must_use]
    pub fn is_pass(&self) -> bool {
        self.kind == ActionKind::Pass
    }
}

/// One line of the action index: `<id>: <description>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionEntry {
    pub id: ActionId,
    pub description: String,
}

impl std::fmt::Display for ActionEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.id, self.description)
    }
}

impl FromStr for ActionEntry {
    type Err = EngineError;

    fn from_str(line: &str) -> Result<Self> {
        let (id, description) = line
            .split_once(": ")
            .ok_or_else(|| EngineError::parse(format!("malformed action line '{line}'")))?;
        Ok(Self {
            id: ActionId::new(id),
            description: description.to_string(),
        })
    }
}
