//! Snake Arcade entry point
//!
//! Native headless runner: loads settings, plays one demo round on the
//! autopilot in virtual time, records the score and prints the scoreboard.
//!
//! Usage: `snake-arcade [settings.json [difficulty color name]]`
//!
//! Selections given on the command line override the settings file; unknown
//! or blank ones fall back to the defaults.

use std::path::PathBuf;

use snake_arcade::persistence::ScoreFile;
use snake_arcade::platform::{self, Driver};
use snake_arcade::sim::{GameSession, SessionPhase, choose_direction};
use snake_arcade::{GameConfig, Settings};

fn main() {
    env_logger::init();
    log::info!("Snake Arcade (native) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let settings_path = args
        .first()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("settings.json"));
    let mut settings = Settings::load_from(&settings_path);
    if args.len() > 1 {
        settings.apply_selections(
            args.get(1).map(String::as_str),
            args.get(2).map(String::as_str),
            args.get(3).map(String::as_str),
        );
    }

    let config = GameConfig::for_difficulty(settings.difficulty);
    let seed = settings.seed.unwrap_or_else(platform::now_ms);
    log::info!(
        "Difficulty {}, color {}, tick {} ms",
        settings.difficulty.as_str(),
        settings.snake_color.as_str(),
        config.tick_delay_ms
    );

    let session = GameSession::new(config, seed, 0);
    let sink = ScoreFile::new(&settings.scores_path);
    let mut driver = Driver::new(session, sink, Some(&settings.player_name), 0);

    while driver.snapshot().phase != SessionPhase::GameOver {
        let Some(due) = driver.next_due() else {
            break;
        };
        if let Some(dir) = choose_direction(driver.session(), driver.now_ms()) {
            driver.turn(dir);
        }
        let _ = driver.advance_to(due);
    }

    let snapshot = driver.snapshot();
    println!(
        "Final score: {}  ({} moves, {} pickups, {:.2}% accuracy)",
        snapshot.score,
        snapshot.stats.moves,
        snapshot.stats.pickups,
        snapshot.stats.accuracy()
    );

    let scoreboard = driver.scoreboard();
    if scoreboard.is_empty() {
        println!("Scoreboard is empty");
    } else {
        println!("Rank Name                  Score");
        for line in scoreboard.to_lines() {
            println!("{}", line);
        }
    }
}
