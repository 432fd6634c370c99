//! Text presentation adapter
//!
//! The sole external reader of engine state: formats session snapshots for a
//! terminal and renders drained [`GameEvent`]s. Never mutates the engine.

use glam::Vec3;

use crate::engine::{Challenge, Game, GameEvent, PuzzleMatrix, Stage, SubmitError};
use crate::format_elapsed;
use crate::settings::Settings;

/// Render a vector at the challenge's arity: `(5, 3)` or `(5, 3, 0)`
pub fn format_vector(v: Vec3, dim: usize) -> String {
    if dim == 2 {
        format!("({}, {})", v.x, v.y)
    } else {
        format!("({}, {}, {})", v.x, v.y, v.z)
    }
}

/// Render a matrix row-by-row, the way the room displays it
pub fn format_matrix(matrix: &PuzzleMatrix) -> String {
    let dim = matrix.dim();
    let mut out = String::new();
    for i in 0..dim {
        let row = matrix.row(i);
        out.push_str(if i == 0 { "[" } else { " " });
        out.push_str(&format_vector(row, dim).replace('(', "[").replace(')', "]"));
        out.push_str(if i + 1 == dim { "]" } else { ",\n" });
    }
    out
}

pub fn stage_label(stage: Stage) -> &'static str {
    match stage {
        Stage::Locked => "locked",
        Stage::EigenvalueSolved => "door unlocked",
        Stage::LevelSolved => "solved",
        Stage::GameComplete => "complete",
    }
}

/// Terminal renderer for engine notifications and status
pub struct ConsoleAdapter {
    pub settings: Settings,
    /// Recent applied moves, oldest first, capped by the settings
    trails: Vec<(Vec3, Vec3)>,
}

impl ConsoleAdapter {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            trails: Vec::new(),
        }
    }

    /// React to one drained engine event
    pub fn handle_event(&mut self, event: &GameEvent, game: &Game) {
        match event {
            GameEvent::LevelLoaded { id } => {
                self.trails.clear();
                println!("\n=== Level {id} ===");
                println!("{}", game.level().description);
                println!("{}", self.scene(game));
            }
            GameEvent::EigenvalueAccepted { value } => {
                println!("Eigenvalues accepted. The door is unlocked.");
                println!("Now prove an eigenvector for λ = {value}.");
            }
            GameEvent::EigenvectorAccepted { vector, eigenvalue } => {
                let dim = game.level().challenge.dim();
                println!(
                    "{} is an eigenvector for λ = {eigenvalue}. The door opens!",
                    format_vector(*vector, dim)
                );
            }
            GameEvent::ShipMoved { from, to } => {
                if self.settings.effective_max_trails() > 0 {
                    self.trails.push((*from, *to));
                    let cap = self.settings.effective_max_trails();
                    if self.trails.len() > cap {
                        let excess = self.trails.len() - cap;
                        self.trails.drain(..excess);
                    }
                }
                if self.settings.show_coordinates {
                    println!("Ship moved to {}.", format_vector(*to, 3));
                }
            }
            GameEvent::Incorrect { kind } => match kind {
                SubmitError::IncorrectMission => {
                    println!("Not there yet: {kind}.");
                }
                _ => println!("Incorrect: {kind}."),
            },
            GameEvent::HintRevealed { text } => {
                println!("Hint: {text}");
            }
            GameEvent::LevelComplete { score_delta } => {
                println!(
                    "Level complete! +{score_delta} points (score {}). Type `advance` to continue.",
                    game.session().score
                );
            }
            GameEvent::GameComplete { score } => {
                println!("\nCongratulations! Run complete with {score} points in {}.",
                    format_elapsed(game.session().elapsed_secs));
                println!("Type `restart` to play again.");
            }
        }
    }

    /// One-line HUD: level, stage, score, clock
    pub fn hud(&self, game: &Game) -> String {
        let s = game.session();
        format!(
            "level {}/{} | {} | score {} | {} | hints {}/3",
            s.level_id,
            game.catalog().count(),
            stage_label(s.stage),
            s.score,
            format_elapsed(s.elapsed_secs),
            s.hints_revealed
        )
    }

    /// Multi-line scene description for the current level
    pub fn scene(&self, game: &Game) -> String {
        let s = game.session();
        let mut out = String::new();
        match &game.level().challenge {
            Challenge::EigenRoom { matrix, .. } => {
                if self.settings.show_grid {
                    out.push_str("A = \n");
                    out.push_str(&format_matrix(matrix));
                }
                if let Some(selected) = s.selected_eigenvalue {
                    out.push_str(&format!("\nSelected eigenvalue: {selected}"));
                }
            }
            Challenge::Mission { target, .. } => {
                if self.settings.show_coordinates {
                    out.push_str(&format!(
                        "Ship at {}, target {}",
                        format_vector(s.ship_position, 3),
                        format_vector(*target, 3)
                    ));
                    out.push_str(&format!(
                        "\nStaged vector: {} | distance to target: {:.2}",
                        format_vector(s.staged_vector, 3),
                        s.ship_position.distance(*target)
                    ));
                }
                if !self.trails.is_empty() {
                    out.push_str("\nRecent moves:");
                    for (from, to) in &self.trails {
                        out.push_str(&format!(
                            "\n  {} -> {}",
                            format_vector(*from, 3),
                            format_vector(*to, 3)
                        ));
                    }
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Catalog;

    #[test]
    fn test_format_vector_dims() {
        assert_eq!(format_vector(Vec3::new(5.0, 3.0, 0.0), 3), "(5, 3, 0)");
        assert_eq!(format_vector(Vec3::new(-0.5, 1.0, 0.0), 2), "(-0.5, 1)");
    }

    #[test]
    fn test_format_matrix_rows() {
        let m = PuzzleMatrix::from_rows_2([[3.0, 1.0], [1.0, 3.0]]);
        assert_eq!(format_matrix(&m), "[[3, 1],\n [1, 3]]");
    }

    #[test]
    fn test_trails_capped_by_settings() {
        let settings = Settings {
            max_trails: 2,
            ..Settings::default()
        };
        let mut adapter = ConsoleAdapter::new(settings);
        let mut game = Game::new(Catalog::voyage_missions()).unwrap();
        game.drain_events();
        for _ in 0..4 {
            game.apply_vector(&[0.1, 0.0, 0.0]).unwrap();
        }
        for event in game.drain_events() {
            adapter.handle_event(&event, &game);
        }
        assert_eq!(adapter.trails.len(), 2);
    }

    #[test]
    fn test_trails_disabled() {
        let settings = Settings {
            show_vector_trails: false,
            ..Settings::default()
        };
        let mut adapter = ConsoleAdapter::new(settings);
        let mut game = Game::new(Catalog::voyage_missions()).unwrap();
        game.drain_events();
        game.apply_vector(&[0.1, 0.0, 0.0]).unwrap();
        for event in game.drain_events() {
            adapter.handle_event(&event, &game);
        }
        assert!(adapter.trails.is_empty());
    }

    #[test]
    fn test_hud_mentions_level_and_score() {
        let game = Game::new(Catalog::escape_rooms()).unwrap();
        let adapter = ConsoleAdapter::new(Settings::default());
        let hud = adapter.hud(&game);
        assert!(hud.contains("level 1/5"));
        assert!(hud.contains("score 0"));
        assert!(hud.contains("locked"));
    }
}
