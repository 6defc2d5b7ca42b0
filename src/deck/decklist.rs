//! Decklist parsing.
//!
//! A decklist is plain text, one `<count> <printed name>` pair per line:
//!
//! ```text
//! 4 Tinker Bell - Giant Fairy
//! 2 Be Prepared
//! ```
//!
//! Blank lines are ignored. Order matters: seed hand indices select entries
//! by their position in this list.

use std::path::Path;

use crate::cards::normalize_card_name;
use crate::error::{EngineError, Result};

/// Copy suffixes run `a`..`z`.
pub const MAX_COPIES: u32 = 26;

/// One line of a decklist.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeckEntry {
    pub count: u32,
    /// Printed name as written in the list.
    pub name: String,
}

impl DeckEntry {
    /// Normalized catalog name.
    #[must_use]
    pub fn base_name(&self) -> String {
        normalize_card_name(&self.name)
    }

    /// Per-copy deck ids: `base.a`, `base.b`, ...
    #[must_use]
    pub fn copy_ids(&self) -> Vec<String> {
        let base = self.base_name();
        (0..self.count)
            .map(|i| format!("{base}.{}", copy_suffix(i)))
            .collect()
    }
}

fn copy_suffix(copy: u32) -> char {
    char::from(b'a' + copy as u8)
}

/// Parsed decklist.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Decklist {
    entries: Vec<DeckEntry>,
}

impl Decklist {
    /// Parse decklist text.
    ///
    /// Rejects lines that aren't `<count> <name>`, more than
    /// [`MAX_COPIES`] copies of a card, and names listed twice.
    pub fn parse(text: &str) -> Result<Self> {
        let mut entries: Vec<DeckEntry> = Vec::new();

        for (i, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let invalid = |detail: String| EngineError::InvalidDecklist { line: i + 1, detail };

            let (count, name) = line
                .split_once(char::is_whitespace)
                .ok_or_else(|| invalid(format!("expected '<count> <name>', got '{line}'")))?;
            let count: u32 = count
                .parse()
                .map_err(|_| invalid(format!("bad card count '{count}'")))?;
            let name = name.trim();
            if name.is_empty() {
                return Err(invalid("missing card name".into()));
            }
            if count > MAX_COPIES {
                return Err(invalid(format!("{count} copies of '{name}' (max {MAX_COPIES})")));
            }
            let base = normalize_card_name(name);
            if entries.iter().any(|e| e.base_name() == base) {
                return Err(invalid(format!("'{name}' listed twice")));
            }

            entries.push(DeckEntry {
                count,
                name: name.to_string(),
            });
        }

        Ok(Self { entries })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::parse(&std::fs::read_to_string(path)?)
    }

    #[must_use]
    pub fn entries(&self) -> &[DeckEntry] {
        &self.entries
    }

    /// Number of distinct cards (the range of valid hand indices).
    #[must_use]
    pub fn unique_count(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.entries.iter().map(|e| e.count as usize).sum()
    }

    /// Every copy id in list order.
    #[must_use]
    pub fn expand(&self) -> Vec<String> {
        self.entries.iter().flat_map(DeckEntry::copy_ids).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let list = Decklist::parse("4 Tinker Bell - Giant Fairy\n\n  2 Be Prepared  \n").unwrap();

        assert_eq!(list.unique_count(), 2);
        assert_eq!(list.total_cards(), 6);
        assert_eq!(list.entries()[1].name, "Be Prepared");
        assert_eq!(list.entries()[0].base_name(), "tinker_bell_giant_fairy");
    }

    #[test]
    fn test_expand() {
        let list = Decklist::parse("2 Hei Hei - Boat Snack\n1 Dinglehopper").unwrap();

        assert_eq!(
            list.expand(),
            vec!["hei_hei_boat_snack.a", "hei_hei_boat_snack.b", "dinglehopper.a"]
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            Decklist::parse("1 Fine\nfour Bad"),
            Err(EngineError::InvalidDecklist { line: 2, .. })
        ));
        assert!(Decklist::parse("3").is_err());
        assert!(Decklist::parse("27 Too Many").is_err());
        assert!(Decklist::parse("1 Dup\n2 dup").is_err());
    }
}
