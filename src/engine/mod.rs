//! Puzzle verification and progression engine
//!
//! All puzzle logic lives here. This module must be pure and deterministic:
//! - Synchronous, total operations (a result or a typed failure, never a panic)
//! - No I/O, rendering, or platform dependencies
//! - State changes only through the operations on [`Game`]

pub mod catalog;
pub mod compare;
pub mod game;
pub mod session;

pub use catalog::{Catalog, CatalogError, Challenge, LevelDefinition, PuzzleMatrix};
pub use compare::{is_zero_vector, scalar_close, scalar_sets_match, vectors_parallel};
pub use game::{Game, GameEvent, MissionStatus, SubmitError, VectorOp};
pub use session::{PuzzleSession, Stage};
