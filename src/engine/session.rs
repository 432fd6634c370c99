//! Per-run session state
//!
//! Everything the presentation side reads between user actions lives here.
//! Mutated only by the operations on [`crate::engine::Game`].

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::catalog::{Challenge, LevelDefinition};
use crate::consts::MAX_HINTS;

/// Progress stage within the current level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    /// Initial: the puzzle is not yet solved
    Locked,
    /// Eigen rooms only: door unlocked, awaiting an eigenvector proof
    EigenvalueSolved,
    /// Terminal for the level, awaiting advance
    LevelSolved,
    /// Terminal for the run, after the last level
    GameComplete,
}

/// Live state for one play-through
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuzzleSession {
    /// Current level, 1-indexed into the catalog
    pub level_id: u32,
    pub stage: Stage,
    /// Hints revealed for the current level, saturating at [`MAX_HINTS`]
    pub hints_revealed: u8,
    /// Cumulative run score
    pub score: u32,
    /// Wall-clock seconds accumulated by the external tick source
    pub elapsed_secs: f32,
    /// Canonical eigenvalue the next eigenvector submission is checked
    /// against; `Some` iff the eigenvalue stage has succeeded this level
    pub selected_eigenvalue: Option<f32>,
    /// Ship position (mission levels)
    pub ship_position: Vec3,
    /// Vector being edited before it is applied (mission levels)
    pub staged_vector: Vec3,
    /// Vectors applied this level
    pub moves_taken: u32,
}

impl PuzzleSession {
    pub fn new(first: &LevelDefinition) -> Self {
        let mut session = Self {
            level_id: first.id,
            stage: Stage::Locked,
            hints_revealed: 0,
            score: 0,
            elapsed_secs: 0.0,
            selected_eigenvalue: None,
            ship_position: Vec3::ZERO,
            staged_vector: Vec3::ZERO,
            moves_taken: 0,
        };
        session.load_level(first);
        session
    }

    /// Reset per-level state for a newly loaded level. Score and the run
    /// clock carry over.
    pub fn load_level(&mut self, level: &LevelDefinition) {
        self.level_id = level.id;
        self.stage = Stage::Locked;
        self.hints_revealed = 0;
        self.selected_eigenvalue = None;
        self.staged_vector = Vec3::ZERO;
        self.moves_taken = 0;
        self.ship_position = match level.challenge {
            Challenge::Mission { start, .. } => start,
            Challenge::EigenRoom { .. } => Vec3::ZERO,
        };
    }

    /// Full reset back to the given first level: score and clock to zero
    pub fn restart(&mut self, first: &LevelDefinition) {
        self.score = 0;
        self.elapsed_secs = 0.0;
        self.load_level(first);
    }

    pub fn hints_exhausted(&self) -> bool {
        self.hints_revealed >= MAX_HINTS
    }
}
