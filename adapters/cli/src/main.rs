#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Frostbite levels headlessly.

mod config;
mod render;
mod saves;
mod script;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use frostbite_core::WELCOME_BANNER;
use frostbite_system_catalog::standard_levels;
use frostbite_system_persistence::SaveRepository;
use frostbite_system_progression::Game;
use frostbite_world::{LevelBlueprint, LevelStatus};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::{
    config::CliConfig,
    render::render_level,
    saves::DirectorySaveRepository,
    script::{parse_script, Action},
};

#[derive(Debug, Parser)]
#[command(name = "frostbite", version, about = "Headless runner for Frostbite levels")]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log gameplay events at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plays the built-in levels from an input script.
    Play(PlayArgs),
    /// Lists the built-in levels.
    Levels,
    /// Lists saved games.
    Saves,
    /// Draws the starting layout of a built-in level.
    Show {
        /// One-based level number.
        #[arg(default_value_t = 1)]
        level: u32,
    },
}

#[derive(Debug, Args)]
struct PlayArgs {
    /// One-based level to start on.
    #[arg(long, default_value_t = 1)]
    level: u32,
    /// Number of players taking part.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=2))]
    players: u8,
    /// Moves `UDLR`, ice `I`, break `K`, tick `.`, pause `p`; lower case drives player two.
    #[arg(long, default_value = "")]
    script: String,
    /// Saved game to continue from.
    #[arg(long)]
    resume: Option<String>,
    /// Name to save the final state under.
    #[arg(long)]
    save: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = CliConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Play(args) => play(&config, &args),
        Command::Levels => list_levels(),
        Command::Saves => list_saves(&config),
        Command::Show { level } => show(&config, level),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn solo_or_coop(blueprint: LevelBlueprint, players: u8) -> LevelBlueprint {
    if players < 2 {
        blueprint.without_player_two()
    } else {
        blueprint
    }
}

fn build_game(config: &CliConfig, players: u8) -> Result<Game<DirectorySaveRepository>> {
    let mut game = Game::with_repository(DirectorySaveRepository::new(config.save_dir.clone()));
    for blueprint in standard_levels().context("built-in levels are malformed")? {
        let number = blueprint.number;
        let level = solo_or_coop(blueprint, players)
            .build_with(config.level.clone())
            .with_context(|| format!("built-in level {number} is invalid"))?;
        game.add_level(level)?;
    }
    game.start_game()?;
    Ok(game)
}

fn play(config: &CliConfig, args: &PlayArgs) -> Result<()> {
    let actions = parse_script(&args.script)?;
    let mut game = build_game(config, args.players)?;
    game.reset_to_level(args.level)?;

    if let Some(name) = &args.resume {
        let state = game
            .load_game(name)
            .with_context(|| format!("no saved game named '{name}'"))?;
        game.resume_game(&state)
            .with_context(|| format!("save '{name}' does not fit a {}-player game", args.players))?;
    }

    println!("{WELCOME_BANNER}");
    info!(actions = actions.len(), "running script");
    let mut won = false;
    for action in actions {
        apply(&mut game, action)?;
        match game.status()? {
            LevelStatus::Completed => {
                if let Some(level) = game.current_level() {
                    print!("{}", render_level(level));
                }
                if game.next_level() {
                    println!("Level complete.");
                } else {
                    won = true;
                    break;
                }
            }
            LevelStatus::GameOver => break,
            LevelStatus::Playing | LevelStatus::Paused => {}
        }
    }

    if won {
        println!("All levels cleared!");
    } else if let Some(level) = game.current_level() {
        print!("{}", render_level(level));
    }
    println!("Combined score: {}", game.combined_score());

    if let Some(name) = &args.save {
        game.save_game(name)
            .with_context(|| format!("failed to save game as '{name}'"))?;
        println!("Saved as '{name}'.");
    }
    Ok(())
}

fn apply<R: SaveRepository>(game: &mut Game<R>, action: Action) -> Result<()> {
    debug!(?action, "applying scripted action");
    match action {
        Action::Move(slot, direction) => {
            let (dx, dy) = direction.delta();
            let _ = game.move_player(slot, dx, dy)?;
        }
        Action::Ice(slot) => {
            let _ = game.create_ice_line(slot, 0, 0)?;
        }
        Action::Break(slot) => {
            let _ = game.break_ice_line(slot, 0, 0)?;
        }
        Action::Tick => game.update(),
        Action::TogglePause => game.toggle_pause()?,
    }
    Ok(())
}

fn list_levels() -> Result<()> {
    for blueprint in standard_levels().context("built-in levels are malformed")? {
        println!(
            "{:>2}  {:>2}x{:<2}  fruit {:>2}  enemies {:>2}  {:>3}s",
            blueprint.number,
            blueprint.width,
            blueprint.height,
            blueprint.fruits.len(),
            blueprint.enemies.len(),
            blueprint.time_limit_seconds,
        );
    }
    Ok(())
}

fn list_saves(config: &CliConfig) -> Result<()> {
    let repository = DirectorySaveRepository::new(config.save_dir.clone());
    let names = repository.list();
    if names.is_empty() {
        println!("No saved games in {}.", config.save_dir.display());
        return Ok(());
    }
    for name in names {
        match repository.load(&name) {
            Some(state) => println!(
                "{name}  level {}  score {}  {}s left",
                state.level_number,
                state.total_score,
                state.remaining_seconds()
            ),
            None => println!("{name}  (unreadable)"),
        }
    }
    Ok(())
}

fn show(config: &CliConfig, number: u32) -> Result<()> {
    let blueprints = standard_levels().context("built-in levels are malformed")?;
    let Some(blueprint) = blueprints.iter().find(|blueprint| blueprint.number == number) else {
        bail!("unknown level {number}; choose 1-{}", blueprints.len());
    };
    let level = blueprint
        .build_with(config.level.clone())
        .with_context(|| format!("built-in level {number} is invalid"))?;
    print!("{}", render_level(&level));
    Ok(())
}
