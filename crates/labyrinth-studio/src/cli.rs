use clap::{Parser, ValueEnum};

use labyrinth_engine::logging::LoggingConfig;
use labyrinth_engine::paint::Color;
use labyrinth_maze::error::Result;
use labyrinth_maze::request::DEFAULT_THICKNESS;
use labyrinth_maze::{GridSize, MazeRequest, Seed};

use crate::viewer::ViewerStyle;

/// Where headless generation runs.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, ValueEnum)]
pub enum BackendChoice {
    /// rayon on the host
    Cpu,
    /// wgpu compute shader
    #[default]
    Gpu,
}

/// Binary-tree maze generator with a GPU viewer.
#[derive(Parser, Debug)]
#[command(name = "labyrinth", author, version, about, long_about = None)]
pub struct Args {
    /// Cells per row
    #[arg(short = 'W', long, default_value = "32", value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Cells per column
    #[arg(short = 'H', long, default_value = "32", value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    /// Wall thickness in cell units, in (0, 1]
    #[arg(short, long, default_value_t = DEFAULT_THICKNESS)]
    pub thickness: f32,

    /// Maze seed, below 2^24 (random when omitted)
    #[arg(short, long)]
    pub seed: Option<u32>,

    /// Generate once, log a summary and exit without opening a window
    #[arg(long)]
    pub headless: bool,

    /// Compute backend for headless runs
    #[arg(long, value_enum)]
    pub backend: Option<BackendChoice>,

    /// Log filter in env_logger syntax (overrides RUST_LOG)
    #[arg(long)]
    pub log: Option<String>,

    /// Wall colour as `#rrggbb` or `#rrggbbaa`
    #[arg(long, value_parser = parse_color)]
    pub wall_color: Option<Color>,

    /// Background colour as `#rrggbb` or `#rrggbbaa`
    #[arg(long, value_parser = parse_color)]
    pub background: Option<Color>,
}

fn parse_color(s: &str) -> std::result::Result<Color, String> {
    Color::from_hex(s).ok_or_else(|| format!("`{s}` is not a #rrggbb or #rrggbbaa colour"))
}

impl Args {
    pub fn request(&self) -> Result<MazeRequest> {
        let seed = match self.seed {
            Some(s) => Seed::new(s)?,
            None => Seed::random(),
        };
        MazeRequest::new(GridSize::new(self.width, self.height), self.thickness, seed)
    }

    /// Viewer colours, with unset ones left at their defaults.
    pub fn style(&self) -> ViewerStyle {
        let defaults = ViewerStyle::default();
        ViewerStyle {
            clear: self.background.unwrap_or(defaults.clear),
            walls: self.wall_color.unwrap_or(defaults.walls),
        }
    }

    pub fn logging(&self) -> LoggingConfig {
        LoggingConfig {
            env_filter: self.log.clone(),
            ..Default::default()
        }
    }
}
