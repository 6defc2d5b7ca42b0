//! Walking the game tree.
//!
//! [`apply_action_at_key`] is the one entry point that grows the tree: given
//! any key below a stored state, it replays the missing steps and stores each
//! intermediate state. [`GameSession`] wraps it for interactive play and
//! random playouts, and [`profile_transition`] times one step phase by phase.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::core::action::{ActionEntry, ActionId, LegalAction};
use crate::core::player::PlayerId;
use crate::core::rng::GameRng;
use crate::core::state::GameState;
use crate::error::{EngineError, Result};
use crate::rules::{LorcanaRules, RulesEngine};
use crate::setup::{init_matchup, shuffle_and_deal};
use crate::store::{backpropagate, find_seed_key, MemoryStore, Outcome, StateKey, StateStore};

/// Description of the turn-passing action.
const END_TURN: &str = "end";

fn find_action(state: &GameState, at: &StateKey, id: &ActionId) -> Result<LegalAction> {
    state
        .graph
        .find_action(id)
        .cloned()
        .ok_or_else(|| EngineError::ActionNotFound {
            key: at.to_string(),
            action_id: id.to_string(),
        })
}

/// Load the state at `key`, creating it and any missing ancestors first.
///
/// Starting from the deepest stored ancestor, each missing segment is looked
/// up among the current state's action edges, applied, and saved. A segment
/// that is not an action id there fails with `ActionNotFound`; a key with no
/// stored ancestor fails with `NotFound`.
pub fn apply_action_at_key<S, R>(store: &mut S, rules: &R, key: &StateKey) -> Result<GameState>
where
    S: StateStore + ?Sized,
    R: RulesEngine + ?Sized,
{
    if store.exists(key) {
        return store.load(key);
    }

    let mut missing = vec![key.clone()];
    let mut base = None;
    for ancestor in key.ancestors() {
        if store.exists(&ancestor) {
            base = Some(ancestor);
            break;
        }
        missing.push(ancestor);
    }
    let mut at = base.ok_or_else(|| EngineError::not_found(key))?;
    let mut state = store.load(&at)?;

    for next in missing.into_iter().rev() {
        let action = find_action(&state, &at, &ActionId::new(next.last()))?;
        rules.advance(&mut state, &action)?;
        store.save(&state, &next)?;
        at = next;
    }
    Ok(state)
}

/// Summary of a random playout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Playout {
    pub key: StateKey,
    pub steps: usize,
    pub game_over: bool,
    pub winner: Option<PlayerId>,
}

/// A game being played through a store.
///
/// The session remembers a root (the dealt state) and the current position;
/// every applied action moves the position one level down the tree.
pub struct GameSession<S: StateStore = MemoryStore> {
    store: S,
    rules: Arc<LorcanaRules>,
    root: StateKey,
    current: StateKey,
    rng: GameRng,
}

impl GameSession<MemoryStore> {
    /// In-memory session starting from `initial`, stored at key `root`.
    pub fn new(rules: Arc<LorcanaRules>, initial: &GameState) -> Result<Self> {
        let mut store = MemoryStore::new();
        let root = StateKey::root("root")?;
        let mut state = initial.clone();
        rules.refresh_actions(&mut state)?;
        store.save(&state, &root)?;
        Self::with_store(store, rules, root)
    }

    /// In-memory session for a fresh deal of two decklists.
    pub fn deal(rules: Arc<LorcanaRules>, deck1: &str, deck2: &str, seed: &str) -> Result<Self> {
        let mut store = MemoryStore::new();
        let matchup = init_matchup(&mut store, &rules, deck1, deck2)?;
        let root = shuffle_and_deal(&mut store, &rules, &matchup, seed)?;
        let mut session = Self::with_store(store, rules, root)?;
        session.rng = GameRng::from_seed_str(seed).for_context("playout");
        Ok(session)
    }
}

impl<S: StateStore> GameSession<S> {
    /// Session over an existing store, rooted at a stored state.
    pub fn with_store(store: S, rules: Arc<LorcanaRules>, root: StateKey) -> Result<Self> {
        if !store.exists(&root) {
            return Err(EngineError::not_found(&root));
        }
        let rng = GameRng::from_seed_str(root.as_str()).for_context("playout");
        Ok(Self {
            store,
            rules,
            current: root.clone(),
            root,
            rng,
        })
    }

    /// Reseed the generator used by random playouts.
    #[must_use]
    pub fn with_playout_seed(mut self, seed: u64) -> Self {
        self.rng = GameRng::new(seed);
        self
    }

    pub fn state(&self) -> Result<GameState> {
        self.store.load(&self.current)
    }

    pub fn actions(&self) -> Result<Vec<ActionEntry>> {
        self.store.get_actions(&self.current)
    }

    /// Apply the action with id `id` and move to the resulting state.
    ///
    /// `id` must be one of the current state's action ids; anything else
    /// fails with `ActionNotFound` and leaves the position unchanged.
    pub fn apply_action(&mut self, id: &str) -> Result<GameState> {
        let action = find_action(&self.state()?, &self.current, &ActionId::new(id))?;
        let next = self.current.child(&action.id)?;
        let state = apply_action_at_key(&mut self.store, self.rules.as_ref(), &next)?;
        self.current = next;
        Ok(state)
    }

    pub fn is_game_over(&self) -> Result<bool> {
        Ok(self.state()?.is_game_over())
    }

    pub fn winner(&self) -> Result<Option<PlayerId>> {
        Ok(self.state()?.winner())
    }

    /// Breadcrumb of the current state.
    pub fn path(&self) -> Result<Vec<String>> {
        self.store.get_path(&self.current)
    }

    /// Action ids taken since the root.
    #[must_use]
    pub fn action_path(&self) -> Vec<&str> {
        self.current.suffix_from(&self.root).unwrap_or_default()
    }

    #[must_use]
    pub fn current_key(&self) -> &StateKey {
        &self.current
    }

    #[must_use]
    pub fn root_key(&self) -> &StateKey {
        &self.root
    }

    /// Go back to the root. Explored states stay in the store.
    pub fn reset(&mut self) {
        self.current = self.root.clone();
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Play one uniformly random legal action.
    ///
    /// With `prefer_non_end`, "end" is only picked when it is the only
    /// action. Returns the action played, or `None` when the game is over or
    /// nothing is legal.
    pub fn play_random_action(&mut self, prefer_non_end: bool) -> Result<Option<ActionEntry>> {
        if self.is_game_over()? {
            return Ok(None);
        }
        let actions = self.actions()?;
        let mut pool: Vec<&ActionEntry> = actions.iter().collect();
        if prefer_non_end && pool.iter().any(|a| a.description != END_TURN) {
            pool.retain(|a| a.description != END_TURN);
        }

        let Some(choice) = self.rng.choose(&pool).map(|a| (*a).clone()) else {
            return Ok(None);
        };
        match self.apply_action(choice.id.as_str()) {
            Ok(_) => Ok(Some(choice)),
            Err(err @ EngineError::UnimplementedAction(_)) => {
                tracing::warn!(key = %self.current, action = %choice, "playout hit an unimplemented action");
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// Play random actions until the game ends or `max_steps` actions
    /// (default: the configured playout bound) have been taken.
    pub fn play_until_game_over(&mut self, max_steps: Option<usize>) -> Result<Playout> {
        let limit = max_steps.unwrap_or(self.rules.config().max_playout_steps);
        let prefer_non_end = self.rules.config().prefer_non_end;

        let mut steps = 0;
        while steps < limit {
            if self.play_random_action(prefer_non_end)?.is_none() {
                break;
            }
            steps += 1;
        }

        let state = self.state()?;
        let playout = Playout {
            key: self.current.clone(),
            steps,
            game_over: state.is_game_over(),
            winner: state.winner(),
        };
        tracing::info!(
            key = %playout.key,
            steps,
            game_over = playout.game_over,
            winner = ?playout.winner,
            "playout finished"
        );
        Ok(playout)
    }

    /// Store the current state's outcome and reference it from every
    /// ancestor below the deal (or below the session root when the key has
    /// no seed segment).
    pub fn record_outcome(&mut self) -> Result<usize> {
        let state = self.state()?;
        let stop_at = find_seed_key(&self.current).unwrap_or_else(|| self.root.clone());
        if stop_at == self.current {
            self.store
                .save_outcome(&self.current, None, &Outcome::for_state(&state))?;
            return Ok(0);
        }
        backpropagate(
            &mut self.store,
            &self.current,
            Some(&stop_at),
            &Outcome::for_state(&state),
        )
    }
}

impl<S: StateStore> std::fmt::Debug for GameSession<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("root", &self.root)
            .field("current", &self.current)
            .finish()
    }
}

/// Time spent in each phase of one transition.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransitionProfile {
    pub load: Duration,
    pub execute: Duration,
    pub effects: Duration,
    pub compute: Duration,
    pub save: Duration,
}

impl TransitionProfile {
    #[must_use]
    pub fn total(&self) -> Duration {
        self.load + self.execute + self.effects + self.compute + self.save
    }
}

impl std::fmt::Display for TransitionProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ms = |d: Duration| d.as_secs_f64() * 1000.0;
        writeln!(f, "load state:    {:.1}ms", ms(self.load))?;
        writeln!(f, "execute:       {:.1}ms", ms(self.execute))?;
        writeln!(f, "effects:       {:.1}ms", ms(self.effects))?;
        writeln!(f, "compute:       {:.1}ms", ms(self.compute))?;
        writeln!(f, "save state:    {:.1}ms", ms(self.save))?;
        write!(f, "total:         {:.1}ms", ms(self.total()))
    }
}

/// Apply action `id` at `parent`, timing each phase, and save the child.
pub fn profile_transition<S, R>(
    store: &mut S,
    rules: &R,
    parent: &StateKey,
    id: &ActionId,
) -> Result<TransitionProfile>
where
    S: StateStore + ?Sized,
    R: RulesEngine + ?Sized,
{
    let mut profile = TransitionProfile::default();

    let t = Instant::now();
    let mut state = store.load(parent)?;
    profile.load = t.elapsed();

    let action = find_action(&state, parent, id)?;

    let t = Instant::now();
    rules.apply_action(&mut state, &action)?;
    profile.execute = t.elapsed();

    let t = Instant::now();
    rules.state_based_effects(&mut state)?;
    profile.effects = t.elapsed();

    let t = Instant::now();
    rules.refresh_actions(&mut state)?;
    profile.compute = t.elapsed();

    let child = parent.child(id)?;
    let t = Instant::now();
    store.save(&state, &child)?;
    profile.save = t.elapsed();

    tracing::debug!(key = %child, total_ms = profile.total().as_millis() as u64, "transition profiled");
    Ok(profile)
}
