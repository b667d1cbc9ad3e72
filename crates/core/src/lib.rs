//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains all the game rules and state management. It has
//! **zero dependencies** on UI or I/O, so the same engine runs under the
//! terminal frontend, in benchmarks, and headless in tests.
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 game board with collision detection and line clearing
//! - [`game_state`]: Complete game state including active piece, scoring, timing
//! - [`piece`]: The active tetromino and its spawn placement
//! - [`shape`]: Tetromino bitmaps and clockwise rotation
//! - [`rng`]: Uniform random piece selection behind a swappable trait
//! - [`scoring`]: Points, level progression, and gravity speed-up
//!
//! # Game Rules
//!
//! - **Uniform randomizer**: Every spawn is an independent uniform draw
//!   over the seven kinds; runs and droughts are possible
//! - **Simple rotation**: Clockwise bitmap rotation with a horizontal
//!   wall-kick search, no rotation-system tables
//! - **Instant lock**: A piece locks the moment gravity finds it resting;
//!   there is no lock delay
//! - **Scoring**: 100/300/500/800 per 1-4 lines times the current level,
//!   plus 1 point per soft-dropped row and 2 per hard-dropped row
//! - **Levels**: One level per ten lines; each level-up shaves 50ms off
//!   the drop interval down to a 100ms floor
//!
//! # Example
//!
//! ```
//! use block_drop_core::GameState;
//! use block_drop_core::types::GameAction;
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert!(game.score() > 0); // Hard drop awards points
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`] every frame with the elapsed milliseconds.
//! Gravity fires when the accumulated time exceeds the drop interval
//! (1000ms on easy at level 1, faster per level and difficulty).

pub mod board;
pub mod game_state;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod shape;
pub mod snapshot;

pub use block_drop_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game_state::GameState;
pub use piece::Piece;
pub use rng::{PieceSource, ScriptedPieces, SimpleRng, UniformPieces};
pub use shape::Shape;
pub use snapshot::{ActiveSnapshot, GameSnapshot};
