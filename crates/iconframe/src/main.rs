//! Headless icon framing: loads a JSON scene, frames its camera and prints a
//! JSON report.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use iconframe::{frame_icon, FitStrategy, IconConfig, MemoryScene};

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StrategyArg {
    ClosedForm,
    Delegated,
}

impl From<StrategyArg> for FitStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::ClosedForm => Self::ClosedForm,
            StrategyArg::Delegated => Self::Delegated,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Frame a scene camera for an icon render")]
struct Args {
    /// Scene JSON to frame
    #[arg(long)]
    scene: PathBuf,
    /// Config JSON; command-line flags override its values
    #[arg(long)]
    config: Option<PathBuf>,
    /// Collection to frame (default: best LOD collection, then the root)
    #[arg(long)]
    collection: Option<String>,
    /// Camera to move (default: the active camera)
    #[arg(long)]
    camera: Option<String>,
    /// Margin multiplier (1.0 = tight)
    #[arg(long)]
    scale: Option<f32>,
    /// Keep the camera's lateral position
    #[arg(long)]
    no_center: bool,
    /// Square output resolution in pixels
    #[arg(long)]
    resolution: Option<u32>,
    /// Fitting strategy
    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,
    /// Pretend the scene has an interactive viewport
    #[arg(long)]
    viewport: bool,
    /// Write the framed scene here
    #[arg(long)]
    save_scene: Option<PathBuf>,
    /// Write the report here instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,
    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn config(&self) -> Result<IconConfig> {
        let mut config = match &self.config {
            Some(path) => IconConfig::load(path)
                .with_context(|| format!("load config {}", path.display()))?,
            None => IconConfig::default(),
        };
        if let Some(collection) = &self.collection {
            config.collection = Some(collection.clone());
        }
        if let Some(camera) = &self.camera {
            config.camera = Some(camera.clone());
        }
        if let Some(scale) = self.scale {
            config.framing_scale = scale;
        }
        if self.no_center {
            config.allow_center = false;
        }
        if let Some(resolution) = self.resolution {
            config.resolution = resolution;
        }
        if let Some(strategy) = self.strategy {
            config.strategy = strategy.into();
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = args.config()?;
    let mut scene = MemoryScene::load(&args.scene)
        .with_context(|| format!("load scene {}", args.scene.display()))?;
    if args.viewport {
        scene.viewport = true;
    }

    let report = frame_icon(&mut scene, &config).context("frame icon")?;
    let json = serde_json::to_string_pretty(&report)?;
    match &args.output {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("write report {}", path.display()))?,
        None => println!("{json}"),
    }

    if let Some(path) = &args.save_scene {
        std::fs::write(path, scene.to_json()?)
            .with_context(|| format!("write scene {}", path.display()))?;
    }
    Ok(())
}
