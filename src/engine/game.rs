//! Progression controller
//!
//! Owns the catalog, the session, and the outward event queue. Every
//! operation is synchronous and total: it returns a result or a typed
//! failure and never panics past the submission boundary. The presentation
//! side drains [`GameEvent`]s and reads session state; it never mutates.

use std::collections::VecDeque;

use glam::Vec3;

use super::catalog::{Catalog, CatalogError, Challenge, LevelDefinition};
use super::compare;
use super::session::{PuzzleSession, Stage};
use crate::consts::*;

/// Why a submission or operation was rejected
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmitError {
    #[error("submission must be {expected} finite number(s)")]
    InvalidInput { expected: usize },
    #[error("those are not the correct eigenvalues")]
    IncorrectEigenvalues,
    #[error("that is not an eigenvector for the selected eigenvalue")]
    IncorrectEigenvector,
    #[error("the ship has not reached the target")]
    IncorrectMission,
    #[error("the zero vector is never a valid eigenvector")]
    ZeroVector,
    #[error("that action is not available yet")]
    DoorLocked,
    #[error(transparent)]
    NotFound(#[from] CatalogError),
}

/// State-change notification pushed to the presentation adapter.
///
/// Fire-and-forget: the engine never waits on, or reads back from, whatever
/// renders these.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    LevelLoaded { id: u32 },
    EigenvalueAccepted { value: f32 },
    EigenvectorAccepted { vector: Vec3, eigenvalue: f32 },
    ShipMoved { from: Vec3, to: Vec3 },
    Incorrect { kind: SubmitError },
    HintRevealed { text: &'static str },
    LevelComplete { score_delta: u32 },
    GameComplete { score: u32 },
}

/// Edit applied to the staged mission vector
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VectorOp {
    Set(Vec3),
    Add(Vec3),
    Sub(Vec3),
    Scale(f32),
    Cross(Vec3),
}

/// Outcome of a mission move or arrival check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MissionStatus {
    pub position: Vec3,
    pub distance_to_target: f32,
    pub reached: bool,
}

/// The puzzle engine: catalog + session + event queue
#[derive(Debug)]
pub struct Game {
    catalog: Catalog,
    /// Definition of the level the session is on
    current: LevelDefinition,
    session: PuzzleSession,
    events: VecDeque<GameEvent>,
}

impl Game {
    pub fn new(catalog: Catalog) -> Result<Self, CatalogError> {
        let first = catalog.get(1)?.clone();
        let session = PuzzleSession::new(&first);
        let mut game = Self {
            catalog,
            current: first,
            session,
            events: VecDeque::new(),
        };
        game.events.push_back(GameEvent::LevelLoaded { id: 1 });
        Ok(game)
    }

    pub fn session(&self) -> &PuzzleSession {
        &self.session
    }

    pub fn level(&self) -> &LevelDefinition {
        &self.current
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Drain pending notifications, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }

    /// Accumulate wall-clock time from the external tick source. The engine
    /// itself has no notion of frames.
    pub fn tick(&mut self, dt: f32) {
        if self.session.stage != Stage::GameComplete {
            self.session.elapsed_secs += dt.max(0.0);
        }
    }

    /// Submit the full eigenvalue set for the current room.
    ///
    /// Accepted in any order; multiplicity must match. On success the door
    /// unlocks and the canonical eigenvalue matched by the first submitted
    /// component becomes the selected one for the vector stage. Re-submission
    /// while the door is already open re-selects.
    pub fn submit_eigenvalues(&mut self, values: &[f32]) -> Result<f32, SubmitError> {
        let Challenge::EigenRoom { eigenvalues, .. } = &self.current.challenge else {
            return Err(SubmitError::DoorLocked);
        };
        let eigenvalues = eigenvalues.clone();
        if !matches!(self.session.stage, Stage::Locked | Stage::EigenvalueSolved) {
            return Err(SubmitError::DoorLocked);
        }
        let expected = eigenvalues.len();
        if values.len() != expected || values.iter().any(|v| !v.is_finite()) {
            return Err(SubmitError::InvalidInput { expected });
        }
        if !compare::scalar_sets_match(values, &eigenvalues) {
            return Err(self.reject(SubmitError::IncorrectEigenvalues));
        }
        let selected = eigenvalues
            .iter()
            .copied()
            .find(|c| compare::scalar_close(values[0], *c))
            .unwrap_or(eigenvalues[0]);
        self.session.stage = Stage::EigenvalueSolved;
        self.session.selected_eigenvalue = Some(selected);
        self.events
            .push_back(GameEvent::EigenvalueAccepted { value: selected });
        log::info!("level {}: eigenvalues accepted, selected {selected}", self.current.id);
        Ok(selected)
    }

    /// Re-target which proven eigenvalue the next eigenvector submission is
    /// checked against.
    pub fn select_eigenvalue(&mut self, value: f32) -> Result<f32, SubmitError> {
        let Challenge::EigenRoom { eigenvalues, .. } = &self.current.challenge else {
            return Err(SubmitError::DoorLocked);
        };
        let eigenvalues = eigenvalues.clone();
        if self.session.stage != Stage::EigenvalueSolved {
            return Err(SubmitError::DoorLocked);
        }
        if !value.is_finite() {
            return Err(SubmitError::InvalidInput { expected: 1 });
        }
        let Some(selected) = eigenvalues
            .iter()
            .copied()
            .find(|c| compare::scalar_close(value, *c))
        else {
            return Err(self.reject(SubmitError::IncorrectEigenvalues));
        };
        self.session.selected_eigenvalue = Some(selected);
        self.events
            .push_back(GameEvent::EigenvalueAccepted { value: selected });
        Ok(selected)
    }

    /// Submit an eigenvector for the selected eigenvalue.
    ///
    /// Scale and sign do not matter. For a repeated eigenvalue the submission
    /// is accepted if it is parallel to any listed basis vector sharing that
    /// eigenvalue.
    pub fn submit_eigenvector(&mut self, components: &[f32]) -> Result<Vec3, SubmitError> {
        let Challenge::EigenRoom {
            matrix,
            eigenvalues,
            eigenvectors,
        } = &self.current.challenge
        else {
            return Err(SubmitError::DoorLocked);
        };
        let expected = matrix.dim();
        let eigenvalues = eigenvalues.clone();
        let eigenvectors = eigenvectors.clone();
        if self.session.stage != Stage::EigenvalueSolved {
            return Err(SubmitError::DoorLocked);
        }
        if components.len() != expected || components.iter().any(|v| !v.is_finite()) {
            return Err(SubmitError::InvalidInput { expected });
        }
        let v = Vec3::new(
            components[0],
            components[1],
            components.get(2).copied().unwrap_or(0.0),
        );
        if compare::is_zero_vector(v) {
            return Err(self.reject(SubmitError::ZeroVector));
        }
        let Some(selected) = self.session.selected_eigenvalue else {
            return Err(SubmitError::DoorLocked);
        };

        let mut candidates = eigenvalues
            .iter()
            .zip(&eigenvectors)
            .filter(|(lam, _)| compare::scalar_close(**lam, selected))
            .peekable();
        debug_assert!(
            candidates.peek().is_some(),
            "selected eigenvalue always comes from the canonical list"
        );
        if !candidates.any(|(_, canonical)| compare::vectors_parallel(v, *canonical)) {
            return Err(self.reject(SubmitError::IncorrectEigenvector));
        }

        let delta = ROOM_SCORE_BASE
            .saturating_sub(u32::from(self.session.hints_revealed) * ROOM_HINT_PENALTY)
            .max(ROOM_SCORE_MIN);
        self.session.stage = Stage::LevelSolved;
        self.session.score += delta;
        self.events.push_back(GameEvent::EigenvectorAccepted {
            vector: v,
            eigenvalue: selected,
        });
        self.events
            .push_back(GameEvent::LevelComplete { score_delta: delta });
        log::info!(
            "level {} solved (+{delta}, score {})",
            self.current.id,
            self.session.score
        );
        Ok(v)
    }

    /// Edit the staged mission vector without moving the ship
    pub fn edit_vector(&mut self, op: VectorOp) -> Result<Vec3, SubmitError> {
        if !matches!(self.current.challenge, Challenge::Mission { .. }) {
            return Err(SubmitError::DoorLocked);
        }
        if self.session.stage != Stage::Locked {
            return Err(SubmitError::DoorLocked);
        }
        let staged = self.session.staged_vector;
        let next = match op {
            VectorOp::Set(v) => v,
            VectorOp::Add(v) => staged + v,
            VectorOp::Sub(v) => staged - v,
            VectorOp::Scale(s) => staged * s,
            VectorOp::Cross(v) => staged.cross(v),
        };
        if !next.is_finite() {
            return Err(SubmitError::InvalidInput { expected: 3 });
        }
        self.session.staged_vector = next;
        Ok(next)
    }

    /// Stage the given vector and apply it in one step
    pub fn apply_vector(&mut self, components: &[f32]) -> Result<MissionStatus, SubmitError> {
        if components.len() != 3 || components.iter().any(|v| !v.is_finite()) {
            return Err(SubmitError::InvalidInput { expected: 3 });
        }
        self.edit_vector(VectorOp::Set(Vec3::from_slice(components)))?;
        self.apply_staged()
    }

    /// Translate the ship by the staged vector and count a move. Arrival
    /// within [`TARGET_RADIUS`] of the target completes the level.
    pub fn apply_staged(&mut self) -> Result<MissionStatus, SubmitError> {
        let Challenge::Mission { target, .. } = self.current.challenge else {
            return Err(SubmitError::DoorLocked);
        };
        if self.session.stage != Stage::Locked {
            return Err(SubmitError::DoorLocked);
        }
        let from = self.session.ship_position;
        let to = from + self.session.staged_vector;
        self.session.ship_position = to;
        self.session.moves_taken += 1;
        self.events.push_back(GameEvent::ShipMoved { from, to });

        let distance = to.distance(target);
        let reached = distance < TARGET_RADIUS;
        if reached {
            self.complete_mission();
        }
        Ok(MissionStatus {
            position: to,
            distance_to_target: distance,
            reached,
        })
    }

    /// Explicit arrival check. Errs with `IncorrectMission` when the ship is
    /// still outside the arrival radius; completes the level if it is inside
    /// and the level was not already solved.
    pub fn check_target_reached(&mut self) -> Result<MissionStatus, SubmitError> {
        let Challenge::Mission { target, .. } = self.current.challenge else {
            return Err(SubmitError::DoorLocked);
        };
        let position = self.session.ship_position;
        let distance = position.distance(target);
        let reached = distance < TARGET_RADIUS;
        if !reached {
            return Err(self.reject(SubmitError::IncorrectMission));
        }
        if self.session.stage == Stage::Locked {
            self.complete_mission();
        }
        Ok(MissionStatus {
            position,
            distance_to_target: distance,
            reached,
        })
    }

    fn complete_mission(&mut self) {
        // The arrival move is not an intermediate move
        let intermediate = self.session.moves_taken.saturating_sub(1);
        let delta = MISSION_SCORE_BASE
            .saturating_sub(intermediate * MISSION_MOVE_PENALTY)
            .max(MISSION_SCORE_MIN);
        self.session.stage = Stage::LevelSolved;
        self.session.score += delta;
        self.events
            .push_back(GameEvent::LevelComplete { score_delta: delta });
        log::info!(
            "mission {} complete (+{delta}, score {})",
            self.current.id,
            self.session.score
        );
    }

    /// Reveal the next hint. Saturates on the last hint; never errors.
    pub fn get_hint(&mut self) -> &'static str {
        let idx = self.session.hints_revealed.min(MAX_HINTS - 1) as usize;
        let text = self.current.hints[idx];
        self.session.hints_revealed = (self.session.hints_revealed + 1).min(MAX_HINTS);
        self.events.push_back(GameEvent::HintRevealed { text });
        text
    }

    /// Leave a solved level: load the next one, or finish the run after the
    /// last. `GameComplete` is emitted exactly once.
    pub fn advance_level(&mut self) -> Result<Stage, SubmitError> {
        if self.session.stage != Stage::LevelSolved {
            return Err(SubmitError::DoorLocked);
        }
        if self.catalog.is_last(self.session.level_id) {
            self.session.stage = Stage::GameComplete;
            self.events.push_back(GameEvent::GameComplete {
                score: self.session.score,
            });
            log::info!("run complete, final score {}", self.session.score);
            return Ok(Stage::GameComplete);
        }
        let next = self.catalog.get(self.session.level_id + 1)?.clone();
        self.session.load_level(&next);
        self.current = next;
        self.events.push_back(GameEvent::LevelLoaded {
            id: self.session.level_id,
        });
        Ok(Stage::Locked)
    }

    /// Back to level 1 with score and clock zeroed. Allowed from any stage.
    pub fn restart(&mut self) -> Result<(), SubmitError> {
        let first = self.catalog.get(1)?.clone();
        self.session.restart(&first);
        self.current = first;
        self.events.push_back(GameEvent::LevelLoaded { id: 1 });
        log::info!("run restarted");
        Ok(())
    }

    /// Record the failure event and hand the error back
    fn reject(&mut self, kind: SubmitError) -> SubmitError {
        self.events
            .push_back(GameEvent::Incorrect { kind: kind.clone() });
        kind
    }
}
