//! Zone system for card locations.
//!
//! Each player owns one zone of every [`ZoneKind`]. Zones are pure
//! containers; a card's location is its single containment (`IN`) edge,
//! tracked by the [`ZoneManager`].
//!
//! ## Key Types
//!
//! - `ZoneKind`: hand, play, discard, inkwell, deck-remainder marker
//! - `ZoneRef`: a specific player's zone of some kind (`z.p1.hand`)
//! - `ZoneManager`: card → zone map and movement

pub mod manager;

pub use manager::{ZoneKind, ZoneManager, ZoneRef};
