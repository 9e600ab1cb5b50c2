mod control;
mod game_field_panel;

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use control::{parse_command, Command, HELP};
use env_logger::Env;
use game_field_panel::{render, status_message};
use log::{debug, info};
use model::{Game, Settings, SpawnPolicy};
use rand::{rngs::StdRng, SeedableRng};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Spawn {
    /// 2 or 4 with equal probability
    Uniform,
    /// 2 in 90% of spawns, 4 otherwise
    Classic,
}

impl From<Spawn> for SpawnPolicy {
    fn from(spawn: Spawn) -> Self {
        match spawn {
            Spawn::Uniform => SpawnPolicy::Uniform,
            Spawn::Classic => SpawnPolicy::Classic,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about = "Play 2048 in the terminal")]
struct Cli {
    /// Board side length
    #[arg(long, value_name = "N", default_value_t = model::settings::DEFAULT_SIZE)]
    size: usize,

    /// Tile value that wins the game
    #[arg(long, value_name = "VALUE", default_value_t = model::settings::DEFAULT_TARGET)]
    target: u32,

    /// Seed for a reproducible game
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Value distribution of spawned tiles
    #[arg(long, value_enum, default_value = "uniform")]
    spawn: Spawn,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let settings = Settings::new(cli.size, cli.target, cli.spawn.into())
        .context("invalid game settings")?;
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    info!("starting game with {:?}, seed {:?}", settings, cli.seed);

    let mut game = Game::new(settings, &mut rng);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    writeln!(stdout, "{}", HELP)?;
    write!(stdout, "{}", render(&game))?;
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line.context("failed to read input")?;
        match parse_command(&line) {
            Some(Command::Swipe(side)) => {
                let outcome = game.swipe(side, &mut rng);
                write!(stdout, "{}", render(&game))?;
                if let Some(message) = status_message(&game, &outcome) {
                    writeln!(stdout, "{}", message)?;
                }
            }
            Some(Command::Restart) => {
                game.reset(&mut rng);
                write!(stdout, "{}", render(&game))?;
            }
            Some(Command::Quit) => break,
            None => {
                debug!("ignoring input {:?}", line);
                writeln!(stdout, "{}", HELP)?;
            }
        }
        stdout.flush()?;
    }
    info!("final score {}", game.score());
    Ok(())
}
