use std::path::PathBuf;

use clap::Parser;
use torus_snake::config::GameConfig;
use torus_snake::game::SnakeGame;
use torus_snake::{log, logger};

#[derive(Parser)]
#[command(name = "torus-snake", about = "Snake on a wrap-around grid")]
struct Args {
    /// YAML file with game settings
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    columns: Option<u16>,
    #[arg(long)]
    rows: Option<u16>,
    /// Ticks per second
    #[arg(long)]
    frame_rate: Option<u32>,
    /// Ticks an item stays before it is replaced
    #[arg(long)]
    max_item_age: Option<u32>,
    #[arg(long)]
    seed: Option<u64>,
    /// Append log lines to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn game_config(&self) -> Result<GameConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(columns) = self.columns {
            config.columns = columns;
        }
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(frame_rate) = self.frame_rate {
            config.frame_rate = frame_rate;
        }
        if let Some(max_item_age) = self.max_item_age {
            config.max_item_age = max_item_age;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    logger::init_logger(None, args.log_file.as_deref())?;

    let config = args.game_config()?;
    log!("Starting with {:?}", config);

    let mut game = SnakeGame::new(&config)?;
    game.run()?;

    log!("Bye");
    Ok(())
}
