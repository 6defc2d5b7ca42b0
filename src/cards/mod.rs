//! Card system: catalog entries, instances, and the catalog.
//!
//! ## Key Types
//!
//! - `CardDefinition`: static per-card statistics from the catalog
//! - `CardType`: catalog type tag (Character, Action, ...)
//! - `CardInstance`: a materialized card node (tapped, damage, entered play)
//! - `CardCatalog`: read-only lookup by normalized name
//!
//! The catalog is built once and shared by reference; nothing in the crate
//! holds it in a global.

pub mod definition;
pub mod instance;
pub mod registry;

pub use definition::{CardDefinition, CardType};
pub use instance::CardInstance;
pub use registry::{normalize_card_name, CardCatalog};
