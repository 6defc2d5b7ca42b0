//! Durable store: one directory per state key.
//!
//! ```text
//! <root>/3f9a/                       matchup root (template state)
//!   deck1.txt  deck2.txt             source decklists
//!   0123456.0123456.aa/              dealt state
//!     game.dot  deck1.dek  deck2.dek  actions.txt  path.txt
//!     0/                             child reached by action 0
//!       game.dot  deck1.ref  deck2.dek  ...
//! ```
//!
//! A deck remainder that is byte-identical to the parent's is written as
//! `deckN.ref`, holding the key of the state that owns the `.dek` bytes. The
//! owner is resolved at save time, so a reference never points at another
//! reference.
//!
//! Loaded states are kept in a bounded `moka` cache; every load still returns
//! its own copy.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use moka::sync::Cache;

use crate::core::action::{ActionEntry, ActionId};
use crate::core::config::EngineConfig;
use crate::core::player::PlayerId;
use crate::core::state::GameState;
use crate::error::{EngineError, Result};

use super::dot;
use super::key::StateKey;
use super::navigation::{action_entries, breadcrumb, parse_actions, parse_path, render_lines};
use super::outcome::Outcome;
use super::{sort_ids, StateStore};

const GAME_FILE: &str = "game.dot";
const ACTIONS_FILE: &str = "actions.txt";
const PATH_FILE: &str = "path.txt";
const OUTCOME_FILE: &str = "outcome.txt";
const OUTCOMES_DIR: &str = "outcomes";

fn deck_file(player: PlayerId) -> String {
    format!("deck{}.dek", player.number())
}

fn deck_ref(player: PlayerId) -> String {
    format!("deck{}.ref", player.number())
}

fn decklist_file(player: PlayerId) -> String {
    format!("deck{}.txt", player.number())
}

/// Read a file, mapping "does not exist" to `None`.
fn read_opt(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn remove_opt(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
        _ => Ok(()),
    }
}

fn render_deck(deck: &im::Vector<String>) -> String {
    render_lines(&deck.iter().collect::<Vec<_>>())
}

/// Filesystem-backed [`StateStore`].
pub struct FileStore {
    root: PathBuf,
    cache: Cache<StateKey, Arc<GameState>>,
}

impl FileStore {
    /// Open (or create) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>, config: &EngineConfig) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        tracing::debug!(root = %root.display(), "file store opened");
        Ok(Self {
            root,
            cache: Cache::builder()
                .max_capacity(config.state_cache_capacity)
                .build(),
        })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory of `key`.
    #[must_use]
    pub fn dir(&self, key: &StateKey) -> PathBuf {
        key.segments().fold(self.root.clone(), |dir, s| dir.join(s))
    }

    /// Key owning the bytes of `player`'s deck at `key`: `key` itself for a
    /// `.dek`, or the target of its `.ref`.
    fn deck_owner(&self, key: &StateKey, player: PlayerId) -> Result<StateKey> {
        match read_opt(&self.dir(key).join(deck_ref(player)))? {
            Some(target) => target.trim().parse(),
            None => Ok(key.clone()),
        }
    }

    /// Raw deck bytes for `player` at `key`, following a reference.
    ///
    /// A state with no deck file has an empty deck.
    fn read_deck(&self, key: &StateKey, player: PlayerId) -> Result<String> {
        let owner = self.deck_owner(key, player)?;
        let text = read_opt(&self.dir(&owner).join(deck_file(player)))?;
        if text.is_none() && owner != *key {
            return Err(EngineError::parse(format!(
                "{key}: deck{} reference to {owner} has no data",
                player.number()
            )));
        }
        Ok(text.unwrap_or_default())
    }

    fn write_deck(&self, key: &StateKey, player: PlayerId, bytes: &str) -> Result<()> {
        let dir = self.dir(key);
        let dek = dir.join(deck_file(player));
        let reference = dir.join(deck_ref(player));

        let mut shared_with = None;
        if let Some(parent) = key.parent().filter(|p| self.exists(p)) {
            if self.read_deck(&parent, player)? == bytes {
                shared_with = Some(self.deck_owner(&parent, player)?);
            }
        }

        match shared_with {
            Some(owner) => {
                fs::write(&reference, format!("{owner}\n"))?;
                remove_opt(&dek)?;
                tracing::trace!(key = %key, player = %player, owner = %owner, "deck deduplicated");
            }
            None => {
                fs::write(&dek, bytes)?;
                remove_opt(&reference)?;
            }
        }
        Ok(())
    }

    fn load_uncached(&self, key: &StateKey) -> Result<GameState> {
        let dir = self.dir(key);
        let text = read_opt(&dir.join(GAME_FILE))?.ok_or_else(|| EngineError::not_found(key))?;
        let graph = dot::decode(&text)?;

        let [deck1, deck2] = [PlayerId::P1, PlayerId::P2].map(|p| self.read_deck(key, p));
        let lines = |text: String| -> Vec<String> { text.lines().map(str::to_string).collect() };

        tracing::trace!(key = %key, "state read");
        Ok(GameState::new(graph, lines(deck1?), lines(deck2?)))
    }
}

impl std::fmt::Debug for FileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileStore")
            .field("root", &self.root)
            .field("cached", &self.cache.entry_count())
            .finish()
    }
}

impl StateStore for FileStore {
    fn load(&self, key: &StateKey) -> Result<GameState> {
        if let Some(state) = self.cache.get(key) {
            return Ok(GameState::clone(&state));
        }
        let state = self.load_uncached(key)?;
        self.cache.insert(key.clone(), Arc::new(state.clone()));
        Ok(state)
    }

    fn save(&mut self, state: &GameState, key: &StateKey) -> Result<()> {
        let dir = self.dir(key);
        fs::create_dir_all(&dir)?;

        fs::write(dir.join(GAME_FILE), dot::encode(&state.graph))?;
        for player in PlayerId::all() {
            self.write_deck(key, player, &render_deck(state.deck(player)))?;
        }

        fs::write(dir.join(ACTIONS_FILE), render_lines(&action_entries(&state.graph)))?;

        let path = match key.parent() {
            Some(parent) if self.exists(&parent) => {
                breadcrumb(key, &self.get_path(&parent)?, &self.get_actions(&parent)?)
            }
            _ => Vec::new(),
        };
        fs::write(dir.join(PATH_FILE), render_lines(&path))?;

        self.cache.insert(key.clone(), Arc::new(state.clone()));
        tracing::trace!(key = %key, "state written");
        Ok(())
    }

    fn exists(&self, key: &StateKey) -> bool {
        self.dir(key).join(GAME_FILE).is_file()
    }

    fn get_actions(&self, key: &StateKey) -> Result<Vec<ActionEntry>> {
        let text = read_opt(&self.dir(key).join(ACTIONS_FILE))?
            .ok_or_else(|| EngineError::not_found(key))?;
        parse_actions(&text)
    }

    fn get_path(&self, key: &StateKey) -> Result<Vec<String>> {
        let text =
            read_opt(&self.dir(key).join(PATH_FILE))?.ok_or_else(|| EngineError::not_found(key))?;
        Ok(parse_path(&text))
    }

    fn save_outcome(
        &mut self,
        key: &StateKey,
        suffix: Option<&str>,
        outcome: &Outcome,
    ) -> Result<()> {
        let dir = self.dir(key);
        match suffix {
            None => {
                fs::create_dir_all(&dir)?;
                fs::write(dir.join(OUTCOME_FILE), outcome.render())?;
            }
            Some(suffix) => {
                let terminal = suffix
                    .split('.')
                    .try_fold(key.clone(), |k, s| k.join(s))
                    .map_err(|_| EngineError::parse(format!("bad outcome suffix '{suffix}'")))?;
                let refs = dir.join(OUTCOMES_DIR);
                fs::create_dir_all(&refs)?;
                fs::write(refs.join(suffix), format!("{terminal}\n"))?;
            }
        }
        tracing::trace!(key = %key, suffix = ?suffix, "outcome written");
        Ok(())
    }

    fn get_outcomes(&self, key: &StateKey) -> Result<Vec<String>> {
        let entries = match fs::read_dir(self.dir(key).join(OUTCOMES_DIR)) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut suffixes = Vec::new();
        for entry in entries {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                suffixes.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        suffixes.sort();
        Ok(suffixes)
    }

    fn get_outcome(&self, key: &StateKey) -> Result<Option<Outcome>> {
        read_opt(&self.dir(key).join(OUTCOME_FILE))?
            .map(|text| Outcome::parse(&text))
            .transpose()
    }

    fn save_decklists(&mut self, key: &StateKey, deck1: &str, deck2: &str) -> Result<()> {
        let dir = self.dir(key);
        fs::create_dir_all(&dir)?;
        fs::write(dir.join(decklist_file(PlayerId::P1)), deck1)?;
        fs::write(dir.join(decklist_file(PlayerId::P2)), deck2)?;
        Ok(())
    }

    fn load_decklists(&self, key: &StateKey) -> Result<(String, String)> {
        let dir = self.dir(key);
        let read = |p: PlayerId| -> Result<String> {
            read_opt(&dir.join(decklist_file(p)))?.ok_or_else(|| EngineError::not_found(key))
        };
        Ok((read(PlayerId::P1)?, read(PlayerId::P2)?))
    }

    fn list_children(&self, key: &StateKey) -> Result<Vec<ActionId>> {
        let dir = self.dir(key);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(EngineError::not_found(key)),
            Err(e) => return Err(e.into()),
        };

        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if crate::rules::decode_index(&name).is_some() && entry.path().join(GAME_FILE).is_file()
            {
                ids.push(ActionId::new(name));
            }
        }
        sort_ids(&mut ids);
        Ok(ids)
    }
}
