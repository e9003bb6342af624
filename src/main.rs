//! mockup - place screenshots inside iPhone device frames.
//!
//! Provides both human-friendly and agent-friendly (robot mode) interfaces.
#![forbid(unsafe_code)]

use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use console::style;
use serde::Serialize;
use tracing::{debug, info};

use mockup::cli::{self, Cli, Commands};
use mockup::config::AppConfig;
use mockup::error::{MockupError, Result, ResultExt};
use mockup::image_ops;
use mockup::logging::init_logging;
use mockup::output::{GenerateSummary, Output, OutputMode};
use mockup::server::{self, HttpState};
use mockup::service::{MockupRequest, MockupService};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() {
    let cli = Cli::parse();

    if cli.no_color || !io::stdout().is_terminal() {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    init_logging(cli.use_json(), cli.verbose, cli.quiet);

    let output = OutputMode::from_cli(&cli).into_output();

    if let Err(e) = run(&cli, output.as_ref()) {
        output.error(&e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli, output: &dyn Output) -> Result<()> {
    match &cli.command {
        None => print_quick_start(cli),
        Some(Commands::Models(args)) => cmd_models(cli, args, output),
        Some(Commands::Detect(args)) => cmd_detect(cli, args, output),
        Some(Commands::Generate(args)) => cmd_generate(cli, args, output),
        Some(Commands::Serve(args)) => cmd_serve(cli, args, output),
        Some(Commands::Version) => {
            output.version_info(VERSION);
            Ok(())
        }
        Some(Commands::Completions(args)) => cmd_completions(args),
    }
}

/// Config file plus global CLI overrides.
fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if !cli.frames_dirs.is_empty() {
        config.frames_dirs.clone_from(&cli.frames_dirs);
    }
    debug!(frames_dirs = ?config.frames_dirs, "Effective configuration");
    Ok(config)
}

// === Quick Start ===

#[allow(clippy::unnecessary_wraps)]
fn print_quick_start(cli: &Cli) -> Result<()> {
    if cli.use_json() {
        let help = RobotQuickStart {
            tool: "mockup",
            version: VERSION,
            description: "Detects the iPhone model of a screenshot and places it inside a device frame",
            commands: RobotCommands {
                list_models: "mockup models --robot",
                detect: "mockup detect <IMAGE> --robot",
                generate: "mockup generate <SCREENSHOT> --color <COLOR> [--model <MODEL>] [--orientation landscape] [-o OUT.png]",
                serve: "mockup serve --port 8000",
            },
            output_modes: OutputModes {
                human: "--format=text (default)",
                robot: "--robot or --format=json",
                compact: "--format=json-compact",
            },
            frames: "Frames live at <frames-dir>/<MODEL>/<MODEL> - <COLOR> - <Portrait|Landscape>.png",
        };
        match serde_json::to_string_pretty(&help) {
            Ok(json) => println!("{json}"),
            Err(e) => return Err(MockupError::Other(e.to_string())),
        }
    } else {
        print_human_quick_start();
    }
    Ok(())
}

fn print_human_quick_start() {
    println!("{} {} - device mockup generator\n", style("mockup").bold().cyan(), VERSION);

    println!("{}", style("QUICK START").bold().underlined());
    println!();
    println!("  {}  List supported models", style("mockup models -l").green());
    println!("  {}  Detect a screenshot's model", style("mockup detect shot.png").green());
    println!(
        "  {}  Make a mockup",
        style("mockup generate shot.png --color Sage").green()
    );
    println!("  {}  Start the HTTP API", style("mockup serve").green());
    println!();

    println!("{}", style("ROBOT MODE").bold().underlined());
    println!();
    println!("  {}  JSON output", style("mockup --robot <command>").cyan());
    println!("  {}  Quick-start JSON", style("mockup --robot").cyan());
    println!();

    println!("Run {} for full help", style("mockup --help").yellow());
}

#[derive(Serialize)]
struct RobotQuickStart {
    tool: &'static str,
    version: &'static str,
    description: &'static str,
    commands: RobotCommands,
    output_modes: OutputModes,
    frames: &'static str,
}

#[derive(Serialize)]
struct RobotCommands {
    list_models: &'static str,
    detect: &'static str,
    generate: &'static str,
    serve: &'static str,
}

#[derive(Serialize)]
struct OutputModes {
    human: &'static str,
    robot: &'static str,
    compact: &'static str,
}

// === Command Implementations ===

fn cmd_models(cli: &Cli, args: &cli::ModelsArgs, output: &dyn Output) -> Result<()> {
    let config = load_config(cli)?;
    let service = MockupService::from_config(&config);
    output.models(service.catalog(), service.frames(), args.long);
    Ok(())
}

fn cmd_detect(cli: &Cli, args: &cli::DetectArgs, output: &dyn Output) -> Result<()> {
    let mut config = load_config(cli)?;
    if let Some(series) = &args.prefer_series {
        config.prefer_series.clone_from(series);
    }

    let service = MockupService::from_config(&config);
    let image = image_ops::load_image(&args.image)?;
    let detection = service.detect(&image)?;
    output.detection(&detection);
    Ok(())
}

fn cmd_generate(cli: &Cli, args: &cli::GenerateArgs, output: &dyn Output) -> Result<()> {
    let mut config = load_config(cli)?;
    if let Some(series) = &args.prefer_series {
        config.prefer_series.clone_from(series);
    }
    config.insets = args.insets.apply(config.insets);
    config.insets.validate()?;

    let service = MockupService::from_config(&config);
    let screenshot = image_ops::load_image(&args.screenshot)?;
    let request = MockupRequest {
        model: args.model.clone(),
        color: args.color.clone(),
        orientation: args.orientation,
    };
    let mockup = service.generate(&screenshot, &request)?;

    if args.output.as_deref() == Some(Path::new("-")) {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(&mockup.png)
            .and_then(|()| stdout.flush())
            .with_context(|| "writing PNG to stdout")?;
        info!(
            model = %mockup.model,
            color = %mockup.color,
            bytes = mockup.png.len(),
            "Wrote mockup to stdout"
        );
        return Ok(());
    }

    let path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(mockup.file_name()));
    std::fs::write(&path, &mockup.png).with_context(|| format!("writing {}", path.display()))?;

    output.generated(&GenerateSummary::new(&mockup, &path));
    Ok(())
}

fn cmd_serve(cli: &Cli, args: &cli::ServeArgs, output: &dyn Output) -> Result<()> {
    let mut config = load_config(cli)?;
    if let Some(host) = &args.host {
        config.server.host.clone_from(host);
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config.server.validate()?;

    let state = HttpState::new(MockupService::from_config(&config));
    let app = server::router(state, &config.server)?;

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let listener = server::bind(&config.server).await?;
        let addr = listener
            .local_addr()
            .map_or_else(|_| config.server.bind_address(), |a| a.to_string());
        output.serving(&addr);
        server::run(listener, app).await
    })
}

#[allow(clippy::unnecessary_wraps)]
fn cmd_completions(args: &cli::CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    clap_complete::generate(args.shell, &mut Cli::command(), "mockup", &mut io::stdout());
    Ok(())
}
