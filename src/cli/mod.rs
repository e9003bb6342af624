//! CLI argument definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::compose::InsetConfig;
use crate::frames::Orientation;

/// Device mockup generator - place screenshots inside iPhone frames.
///
/// Robot Mode: Use --robot or --format=json for machine-parseable output.
#[derive(Parser, Debug)]
#[command(name = "mockup", version, about, long_about = None)]
#[command(propagate_version = true)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Output format (text for humans, json for agents/scripts)
    #[arg(
        long,
        short = 'f',
        default_value = "text",
        global = true,
        env = "MOCKUP_FORMAT"
    )]
    pub format: OutputFormat,

    /// Robot mode: equivalent to --format=json
    #[arg(long, global = true)]
    pub robot: bool,

    /// Verbose logging (-v debug, -vv trace)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Configuration file (TOML or YAML)
    #[arg(long, short = 'c', global = true, env = "MOCKUP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Frame asset directory; repeat to search several, in order.
    /// Replaces the configured directories.
    #[arg(
        long = "frames-dir",
        global = true,
        env = "MOCKUP_FRAMES_DIR",
        value_delimiter = ','
    )]
    pub frames_dirs: Vec<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format selection.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text with optional color
    #[default]
    Text,
    /// JSON output for scripts and agents
    Json,
    /// Compact JSON (single line)
    JsonCompact,
}

impl Cli {
    /// Returns true if output should be JSON (robot mode or explicit --format=json).
    pub const fn use_json(&self) -> bool {
        self.robot || matches!(self.format, OutputFormat::Json | OutputFormat::JsonCompact)
    }

    /// Returns true if output should be compact JSON.
    pub const fn use_compact_json(&self) -> bool {
        matches!(self.format, OutputFormat::JsonCompact)
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List supported device models
    #[command(visible_alias = "list")]
    Models(ModelsArgs),

    /// Detect the device model of a screenshot
    Detect(DetectArgs),

    /// Place a screenshot inside a device frame
    Generate(GenerateArgs),

    /// Start the HTTP API
    Serve(ServeArgs),

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct ModelsArgs {
    /// Show resolution, series and colors
    #[arg(long, short = 'l')]
    pub long: bool,
}

#[derive(Args, Debug)]
pub struct DetectArgs {
    /// Screenshot to inspect
    pub image: PathBuf,

    /// Series preferred when several models match equally well
    #[arg(long)]
    pub prefer_series: Option<String>,
}

/// Arguments for `generate`.
///
/// # Examples
///
/// ```bash
/// # Detect the model and use the default portrait frame
/// mockup generate shot.png --color Sage
///
/// # Explicit model, landscape frame, custom output path
/// mockup generate shot.png --model "iPhone 16 Pro" --color "Desert Titanium" \
///     --orientation landscape -o out.png
///
/// # Tighter screen cutout
/// mockup generate shot.png --color Black --left 0.06 --right 0.06 --radius 0.12
/// ```
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Screenshot to place inside the frame
    pub screenshot: PathBuf,

    /// Frame color, e.g. "Sage" or "Black Titanium"
    #[arg(long)]
    pub color: String,

    /// Device model; detected from the screenshot when omitted
    #[arg(long, short = 'm')]
    pub model: Option<String>,

    /// Frame orientation
    #[arg(long, value_enum, default_value_t = Orientation::Portrait)]
    pub orientation: Orientation,

    /// Output file, or `-` for stdout (default: mockup-<model>-<color>.png)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Series preferred when several models match equally well
    #[arg(long)]
    pub prefer_series: Option<String>,

    #[command(flatten)]
    pub insets: InsetArgs,
}

/// Per-run overrides of the configured viewport insets.
#[derive(Args, Debug, Default, Clone, Copy)]
pub struct InsetArgs {
    /// Left inset as a fraction of frame width
    #[arg(long)]
    pub left: Option<f64>,

    /// Right inset as a fraction of frame width
    #[arg(long)]
    pub right: Option<f64>,

    /// Top inset as a fraction of frame height
    #[arg(long)]
    pub top: Option<f64>,

    /// Bottom inset as a fraction of frame height
    #[arg(long)]
    pub bottom: Option<f64>,

    /// Corner radius as a fraction of the viewport's shorter side
    #[arg(long)]
    pub radius: Option<f64>,
}

impl InsetArgs {
    /// Overlay the given flags on `base`.
    pub fn apply(self, base: InsetConfig) -> InsetConfig {
        InsetConfig {
            left: self.left.unwrap_or(base.left),
            right: self.right.unwrap_or(base.right),
            top: self.top.unwrap_or(base.top),
            bottom: self.bottom.unwrap_or(base.bottom),
            radius: self.radius.unwrap_or(base.radius),
        }
    }
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Port to listen on (default from config: 8000)
    #[arg(long, short = 'p')]
    pub port: Option<u16>,

    /// Bind address (default from config: 127.0.0.1)
    #[arg(long)]
    pub host: Option<String>,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
