use anyhow::Result;
use clap::Parser;
use drive::{run, viewer::DisplayKind, DriveConfig};
use std::path::PathBuf;

/// Drive a simulated robot with random actions and watch it
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// YAML file with the run configuration; other options override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Environment id given to gym.make()
    #[arg(long)]
    env: Option<String>,

    /// Python modules imported before the environment is created
    #[arg(long = "import")]
    imports: Vec<String>,

    /// Random seed
    #[arg(short, long)]
    seed: Option<i64>,

    /// Number of episodes
    #[arg(short, long)]
    episodes: Option<usize>,

    /// No episode limit; runs until --max-steps or until interrupted
    #[arg(long, default_value_t = false, conflicts_with = "episodes")]
    endless: bool,

    /// Maximum number of steps over all episodes
    #[arg(long)]
    max_steps: Option<usize>,

    /// Where frames are shown
    #[arg(short, long, value_enum)]
    display: Option<DisplayKind>,

    /// Output file when frames are written to files
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Keep every frame in a numbered file
    #[arg(long, default_value_t = false)]
    keep_frames: bool,

    /// Width of the displayed frame
    #[arg(long)]
    width: Option<u32>,

    /// Height of the displayed frame
    #[arg(long)]
    height: Option<u32>,

    /// Pause after each step, in milliseconds
    #[arg(long)]
    wait: Option<u64>,

    /// Write the resulting configuration to this file and exit
    #[arg(long)]
    save_config: Option<PathBuf>,
}

fn config(args: &Args) -> Result<DriveConfig> {
    let mut config = match args.config.as_ref() {
        Some(path) => DriveConfig::load(path)?,
        None => DriveConfig::default(),
    };

    if let Some(env) = args.env.as_ref() {
        config.env_name = env.clone();
    }
    if !args.imports.is_empty() {
        config.module_imports = args.imports.clone();
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(episodes) = args.episodes {
        config.driver.max_episodes = Some(episodes);
    }
    if args.endless {
        config.driver.max_episodes = None;
    }
    if let Some(max_steps) = args.max_steps {
        config.driver.max_steps = Some(max_steps);
    }
    if let Some(wait) = args.wait {
        config.driver.wait_in_millis = wait;
    }
    if let Some(kind) = args.display {
        config.display.kind = kind;
    }
    if let Some(out) = args.out.as_ref() {
        config.display.path = out.clone();
    }
    if args.keep_frames {
        config.display.keep_frames = true;
    }
    if let Some(width) = args.width {
        config.display.width = width;
    }
    if let Some(height) = args.height {
        config.display.height = height;
    }

    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let config = config(&args)?;

    if let Some(path) = args.save_config.as_ref() {
        config.save(path)?;
        return Ok(());
    }

    run(&config)?;
    Ok(())
}
