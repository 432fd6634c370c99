//! Eigen Voyage entry point
//!
//! Owns the engine and the terminal front end: parses commands, ticks the
//! run clock between them, and drains engine events into the console adapter.

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use glam::Vec3;

use eigen_voyage::engine::{Catalog, Game, GameEvent, SubmitError, VectorOp};
use eigen_voyage::present::ConsoleAdapter;
use eigen_voyage::{HighScores, Settings, format_elapsed};

const SETTINGS_PATH: &str = "settings.json";
const HIGHSCORES_PATH: &str = "highscores.json";

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("fatal: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let missions = std::env::args().any(|a| a == "--missions");
    let catalog = if missions {
        Catalog::voyage_missions()
    } else {
        Catalog::escape_rooms()
    };
    let mut game = Game::new(catalog)?;

    let settings_path = Path::new(SETTINGS_PATH);
    let settings = Settings::load(settings_path);
    if !settings_path.exists() {
        settings.save(settings_path);
    }
    let mut highscores = HighScores::load(Path::new(HIGHSCORES_PATH));
    let mut adapter = ConsoleAdapter::new(settings);

    println!(
        "Eigen Voyage — {}",
        if missions {
            "vector navigation missions"
        } else {
            "eigenvalue escape rooms"
        }
    );
    println!("Type `help` for commands.");
    drain(&mut game, &mut adapter, &mut highscores);
    prompt(&adapter, &game);

    let stdin = io::stdin();
    let mut last = Instant::now();
    for line in stdin.lock().lines() {
        let line = line?;
        let now = Instant::now();
        game.tick(now.duration_since(last).as_secs_f32());
        last = now;

        if !handle_command(line.trim(), &mut game, &mut adapter, &highscores) {
            break;
        }
        drain(&mut game, &mut adapter, &mut highscores);
        prompt(&adapter, &game);
    }
    Ok(())
}

/// Drain engine notifications into the adapter; a completed run is recorded
/// on the leaderboard.
fn drain(game: &mut Game, adapter: &mut ConsoleAdapter, highscores: &mut HighScores) {
    for event in game.drain_events() {
        if let GameEvent::GameComplete { score } = event {
            let timestamp = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0);
            let levels = game.catalog().count() as u32;
            if let Some(rank) =
                highscores.add_score(score, levels, game.session().elapsed_secs, timestamp)
            {
                println!("New high score! Rank {rank}.");
            }
            highscores.save(Path::new(HIGHSCORES_PATH));
        }
        adapter.handle_event(&event, game);
    }
}

fn prompt(adapter: &ConsoleAdapter, game: &Game) {
    print!("[{}]\n> ", adapter.hud(game));
    let _ = io::stdout().flush();
}

/// Execute one command line. Returns false to quit.
fn handle_command(
    line: &str,
    game: &mut Game,
    adapter: &mut ConsoleAdapter,
    highscores: &HighScores,
) -> bool {
    let mut parts = line.split_whitespace();
    let Some(cmd) = parts.next() else {
        return true;
    };
    let args: Vec<&str> = parts.collect();

    match cmd {
        "help" => print_help(),
        "status" => println!("{}\n{}", adapter.hud(game), adapter.scene(game)),
        "hint" => {
            game.get_hint();
        }
        "values" => submit(game, &args, |game, v| game.submit_eigenvalues(&v).map(|_| ())),
        "vector" => submit(game, &args, |game, v| game.submit_eigenvector(&v).map(|_| ())),
        "select" => submit(game, &args, |game, v| {
            if v.len() == 1 {
                game.select_eigenvalue(v[0]).map(|_| ())
            } else {
                Err(SubmitError::InvalidInput { expected: 1 })
            }
        }),
        "set" | "add" | "sub" | "cross" => {
            let op = cmd.to_owned();
            submit(game, &args, move |game, v| {
                if v.len() != 3 {
                    return Err(SubmitError::InvalidInput { expected: 3 });
                }
                let v = Vec3::from_slice(&v);
                let op = match op.as_str() {
                    "set" => VectorOp::Set(v),
                    "add" => VectorOp::Add(v),
                    "sub" => VectorOp::Sub(v),
                    _ => VectorOp::Cross(v),
                };
                let staged = game.edit_vector(op)?;
                println!("Staged vector: ({}, {}, {})", staged.x, staged.y, staged.z);
                Ok(())
            });
        }
        "scale" => submit(game, &args, |game, v| {
            if v.len() != 1 {
                return Err(SubmitError::InvalidInput { expected: 1 });
            }
            let staged = game.edit_vector(VectorOp::Scale(v[0]))?;
            println!("Staged vector: ({}, {}, {})", staged.x, staged.y, staged.z);
            Ok(())
        }),
        "apply" => {
            if args.is_empty() {
                report(game.apply_staged().map(|_| ()));
            } else {
                submit(game, &args, |game, v| game.apply_vector(&v).map(|_| ()));
            }
        }
        "check" => report(game.check_target_reached().map(|_| ())),
        "advance" => report(game.advance_level().map(|_| ())),
        "restart" => report(game.restart()),
        "grid" => {
            adapter.settings.show_grid = !adapter.settings.show_grid;
            adapter.settings.save(Path::new(SETTINGS_PATH));
            println!("Grid display: {}", adapter.settings.show_grid);
        }
        "trails" => {
            adapter.settings.show_vector_trails = !adapter.settings.show_vector_trails;
            adapter.settings.save(Path::new(SETTINGS_PATH));
            println!("Vector trails: {}", adapter.settings.show_vector_trails);
        }
        "coords" => {
            adapter.settings.show_coordinates = !adapter.settings.show_coordinates;
            adapter.settings.save(Path::new(SETTINGS_PATH));
            println!("Coordinates: {}", adapter.settings.show_coordinates);
        }
        "scores" => {
            if highscores.is_empty() {
                println!("No completed runs yet.");
            } else {
                for (i, e) in highscores.entries.iter().enumerate() {
                    println!(
                        "{:2}. {:4} points, {} levels, {}",
                        i + 1,
                        e.score,
                        e.levels_cleared,
                        format_elapsed(e.elapsed_secs)
                    );
                }
            }
        }
        "quit" | "exit" => return false,
        other => println!("Unknown command `{other}`. Type `help` for commands."),
    }
    true
}

/// Parse numeric arguments and run the operation, reporting failures.
/// Unparseable text is refused here: it is never coerced into a number.
fn submit<F>(game: &mut Game, args: &[&str], op: F)
where
    F: FnOnce(&mut Game, Vec<f32>) -> Result<(), SubmitError>,
{
    let mut values = Vec::with_capacity(args.len());
    for tok in args {
        match tok.parse::<f32>() {
            Ok(v) => values.push(v),
            Err(_) => {
                println!("`{tok}` is not a number; nothing submitted.");
                return;
            }
        }
    }
    report(op(game, values));
}

/// Print engine rejections that carry no Incorrect event of their own
fn report(result: Result<(), SubmitError>) {
    match result {
        Ok(()) => {}
        Err(
            SubmitError::IncorrectEigenvalues
            | SubmitError::IncorrectEigenvector
            | SubmitError::IncorrectMission
            | SubmitError::ZeroVector,
        ) => {
            // Reported through the Incorrect event
        }
        Err(e) => println!("{e}"),
    }
}

fn print_help() {
    println!("Commands:");
    println!("  status              show the current level and HUD");
    println!("  hint                reveal the next hint (3 per level)");
    println!("  values <n> <n> [n]  submit the eigenvalue set");
    println!("  select <n>          choose which proven eigenvalue to work on");
    println!("  vector <x> <y> [z]  submit an eigenvector for the selected eigenvalue");
    println!("  set|add|sub <x y z> edit the staged mission vector");
    println!("  scale <s>           multiply the staged vector by a scalar");
    println!("  cross <x y z>       cross the staged vector with another");
    println!("  apply [x y z]       move the ship by the staged (or given) vector");
    println!("  check               verify the ship has reached the target");
    println!("  advance             continue to the next level once solved");
    println!("  restart             start the run over");
    println!("  grid|trails|coords  toggle display settings");
    println!("  scores              show the leaderboard");
    println!("  quit                leave the game");
}
