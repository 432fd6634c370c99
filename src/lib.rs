//! Eigen Voyage - linear-algebra puzzle games
//!
//! Core modules:
//! - `engine`: Pure puzzle verification and progression engine
//! - `present`: Text presentation adapter (reads engine state, never mutates)
//! - `settings`: Display preferences
//! - `highscores`: Completed-run leaderboard

pub mod engine;
pub mod highscores;
pub mod present;
pub mod settings;

pub use engine::{Catalog, Game, GameEvent, PuzzleSession, Stage, SubmitError};
pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Absolute tolerance for eigenvalue submissions
    pub const EIGENVALUE_TOLERANCE: f32 = 0.1;
    /// Components below this magnitude make a submission the zero vector
    pub const ZERO_VECTOR_EPSILON: f32 = 1e-4;
    /// Parallelism slack: accept when | |v̂·ĉ| - 1 | is below this
    pub const PARALLEL_TOLERANCE: f32 = 0.2;
    /// Arrival radius around a mission target
    pub const TARGET_RADIUS: f32 = 0.5;

    /// Hints available per level
    pub const MAX_HINTS: u8 = 3;

    /// Mission scoring: base minus per-move penalty, floored
    pub const MISSION_SCORE_BASE: u32 = 100;
    pub const MISSION_MOVE_PENALTY: u32 = 10;
    pub const MISSION_SCORE_MIN: u32 = 10;

    /// Escape-room scoring: base minus per-hint penalty, floored
    pub const ROOM_SCORE_BASE: u32 = 100;
    pub const ROOM_HINT_PENALTY: u32 = 25;
    pub const ROOM_SCORE_MIN: u32 = 25;
}

/// Format elapsed seconds as MM:SS for HUD display
#[inline]
pub fn format_elapsed(elapsed_secs: f32) -> String {
    let total = elapsed_secs.max(0.0) as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0.0), "00:00");
        assert_eq!(format_elapsed(59.9), "00:59");
        assert_eq!(format_elapsed(61.0), "01:01");
        assert_eq!(format_elapsed(3600.0), "60:00");
    }
}
