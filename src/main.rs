use anyhow::{Context, Result};
use clap::Parser;
use grid_snake::game::{Difficulty, GameConfig};
use grid_snake::modes::HumanMode;
use grid_snake::prompt;
use std::fs::File;
use std::io::{stdin, stdout};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Terminal Snake with a progressive levels mode")]
struct Cli {
    /// Starting difficulty: easy, medium or hard (asked for when omitted)
    #[arg(long)]
    difficulty: Option<Difficulty>,

    /// Play with levels; always starts on easy
    #[arg(long)]
    levels: bool,

    /// JSON file overriding game settings and timings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let default_filter = if log_file.is_some() { "info" } else { "warn" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));

    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;

    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    // Flags win over the file; ask for whatever is still unknown
    if cli.levels {
        config.levels = true;
    }
    if let Some(difficulty) = cli.difficulty {
        config.difficulty = difficulty;
    } else if !config.levels && cli.config.is_none() {
        let mut input = stdin().lock();
        let mut output = stdout();
        config.levels = prompt::ask_levels(&mut input, &mut output)?;
        if !config.levels {
            config.difficulty = prompt::ask_difficulty(&mut input, &mut output)?;
        }
    }

    config.validate().context("Invalid game settings")?;

    let mut human_mode = HumanMode::new(config);
    let metrics = human_mode.run().await?;
    println!("{}", metrics.summary());

    Ok(())
}
