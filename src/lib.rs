//! tile-merge: a 2048-style sliding tile engine + game session
//!
//! This crate provides:
//! - A small `Copy` `Board` type with pure transitions (`engine` module):
//!   sliding/merging lines and boards, random tile spawns, terminal detection
//! - A stateful `GameSession` (`session` module) with score, high score and a one-level undo
//! - Session tuning loaded from TOML (`config` module)
//! - The tile colour table renderers use (`palette` module)
//!
//! Quick start:
//! ```
//! use tile_merge::engine::{Board, Move};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! // Deterministic board initialization with a seeded RNG
//! let mut rng = StdRng::seed_from_u64(42);
//! let b0 = Board::EMPTY.with_random_tile(&mut rng).with_random_tile(&mut rng);
//! let out = b0.apply(Move::Left);
//! assert_eq!(out.board.tile_sum(), b0.tile_sum());
//! ```
//!
//! Full loop (simplest possible)
//! ```
//! use tile_merge::config::SessionConfig;
//! use tile_merge::engine::Move;
//! use tile_merge::session::GameSession;
//!
//! let mut session = GameSession::with_config(SessionConfig::default().with_seed(123));
//! let mut moves = 0u32;
//! while !session.is_game_over() && moves < 8 {
//!     let state = session.apply_move(Move::ALL[moves as usize % 4]);
//!     assert!(state.high_score >= state.score);
//!     moves += 1;
//! }
//! if session.can_undo() {
//!     session.undo().unwrap();
//! }
//! ```
//!
pub mod config;
pub mod engine;
pub mod palette;
pub mod session;
