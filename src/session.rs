//! Stateful game wrapper around the pure [`engine`](crate::engine) functions.
//!
//! A [`GameSession`] owns the board, the running score, the best score seen,
//! a single undo snapshot and its own RNG. Every mutating call takes
//! `&mut self`, so callers are serialized by construction.

use log::{debug, info, trace};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::config::{SessionConfig, SpawnPolicy};
use crate::engine::{self, Board, Move, ParseMoveError, Score};

/// Observable state handed back to the UI after every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub board: Board,
    pub score: Score,
    pub high_score: Score,
    pub game_over: bool,
    pub undo_available: bool,
}

/// Invalid operations the session refuses. The session is left untouched.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("invalid operation: no undo snapshot available")]
    NoSnapshot,
    #[error("invalid operation: undo is not allowed once the game is over")]
    GameOver,
    #[error("invalid operation: {0}")]
    UnknownDirection(#[from] ParseMoveError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Snapshot {
    board: Board,
    score: Score,
}

pub struct GameSession<R: Rng = StdRng> {
    cfg: SessionConfig,
    rng: R,
    board: Board,
    score: Score,
    high_score: Score,
    game_over: bool,
    snapshot: Option<Snapshot>,
}

impl GameSession<StdRng> {
    /// New session with default config, seeded from OS entropy. The first game is already started.
    pub fn new() -> Self { Self::with_config(SessionConfig::default()) }

    /// New session seeded from `cfg.seed` when present.
    ///
    /// ```
    /// use tile_merge::config::SessionConfig;
    /// use tile_merge::session::GameSession;
    /// let session = GameSession::with_config(SessionConfig::default().with_seed(7));
    /// assert_eq!(session.board().count_empty(), 14);
    /// assert_eq!(session.score(), 0);
    /// ```
    pub fn with_config(cfg: SessionConfig) -> Self {
        let rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(cfg, rng)
    }
}

impl Default for GameSession<StdRng> {
    fn default() -> Self { Self::new() }
}

impl<R: Rng> GameSession<R> {
    /// New session driven by a caller-supplied RNG. `cfg.seed` is ignored.
    pub fn with_rng(cfg: SessionConfig, rng: R) -> Self {
        let mut session = Self {
            cfg,
            rng,
            board: Board::EMPTY,
            score: 0,
            high_score: 0,
            game_over: false,
            snapshot: None,
        };
        session.start();
        session
    }

    /// Begin a new game: empty board plus two random tiles. Keeps the high score.
    pub fn start(&mut self) -> SessionState {
        self.board = Board::EMPTY.with_random_tile(&mut self.rng).with_random_tile(&mut self.rng);
        self.score = 0;
        self.game_over = false;
        self.snapshot = None;
        info!("new game (high score {})", self.high_score);
        self.state()
    }

    /// Slide the board in `direction`, spawn a tile, and check for game over.
    ///
    /// Once the game is over this is a no-op returning the current state.
    pub fn apply_move(&mut self, direction: Move) -> SessionState {
        if self.game_over {
            debug!("ignoring {direction}: game is over");
            return self.state();
        }

        let outcome = engine::apply_direction(self.board, direction);
        if !outcome.changed && self.cfg.spawn_policy == SpawnPolicy::OnChange {
            debug!("ignoring {direction}: board unchanged");
            return self.state();
        }

        self.snapshot = Some(Snapshot { board: self.board, score: self.score });
        self.score += outcome.score;
        self.board = engine::spawn_random_tile(outcome.board, &mut self.rng);
        trace!("{direction}: merges={} spawned={}", outcome.merges, self.board != outcome.board);
        debug!("{direction}: +{} -> score {}", outcome.score, self.score);

        if engine::is_terminal(self.board) {
            self.game_over = true;
            info!("game over: score {}, highest tile {}", self.score, self.board.highest_tile());
        }
        self.high_score = self.high_score.max(self.score);
        self.state()
    }

    /// Input-event entry point for UI collaborators; same as [`Self::apply_move`].
    #[inline]
    pub fn on_direction(&mut self, direction: Move) -> SessionState { self.apply_move(direction) }

    /// Parse a direction name (see [`Move`]'s `FromStr`) and apply it.
    pub fn apply_named_move(&mut self, name: &str) -> Result<SessionState, SessionError> {
        let direction: Move = name.parse()?;
        Ok(self.apply_move(direction))
    }

    /// Restore the board and score from before the last move, minus the undo penalty.
    ///
    /// Only one level of undo is kept; a second call without an intervening
    /// move fails with [`SessionError::NoSnapshot`].
    pub fn undo(&mut self) -> Result<SessionState, SessionError> {
        if self.game_over {
            return Err(SessionError::GameOver);
        }
        let snapshot = self.snapshot.take().ok_or(SessionError::NoSnapshot)?;
        self.board = snapshot.board;
        self.score = snapshot.score.saturating_sub(self.cfg.undo_penalty);
        debug!("undo -> score {}", self.score);
        Ok(self.state())
    }

    pub fn state(&self) -> SessionState {
        SessionState {
            board: self.board,
            score: self.score,
            high_score: self.high_score,
            game_over: self.game_over,
            undo_available: self.can_undo(),
        }
    }

    pub fn board(&self) -> Board { self.board }
    pub fn score(&self) -> Score { self.score }
    pub fn high_score(&self) -> Score { self.high_score }
    pub fn is_game_over(&self) -> bool { self.game_over }
    pub fn config(&self) -> &SessionConfig { &self.cfg }

    pub fn can_undo(&self) -> bool { self.snapshot.is_some() && !self.game_over }

    #[cfg(test)]
    fn set_position(&mut self, board: Board, score: Score) {
        self.board = board;
        self.score = score;
        self.high_score = self.high_score.max(score);
    }
}
