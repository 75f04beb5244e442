//! Pulse demo CLI
//!
//! Run the example screen headlessly or replay scenarios against it.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pulse_app::{
    run_loaded_scenario, DemoConfig, ExampleScreen, HeadlessRunConfig, HeadlessRuntime,
    HeadlessScenario,
};
use pulse_core::DrawList;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Time the run keeps going after the scheduled stop, so the crossfade settles
const SETTLE_MS: f32 = 500.0;

#[derive(Parser)]
#[command(name = "pulse-demo")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Loading button demo host", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tap the button, let the host stop it, and log what happens
    Run {
        /// Demo configuration file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Logical milliseconds per frame
        #[arg(long, default_value = "16")]
        tick_ms: u64,
    },

    /// Replay a JSON scenario against the example screen
    Scenario {
        /// Scenario file (JSON)
        file: PathBuf,

        /// Demo configuration file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write the JSON report to this relative path
        #[arg(short, long)]
        report: Option<PathBuf>,

        /// Logical milliseconds per frame
        #[arg(long, default_value = "16")]
        tick_ms: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Run { config, tick_ms } => cmd_run(config.as_deref(), tick_ms),
        Commands::Scenario {
            file,
            config,
            report,
            tick_ms,
        } => {
            let passed = cmd_scenario(&file, config.as_deref(), report.as_deref(), tick_ms)?;
            if !passed {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

fn cmd_run(config_path: Option<&Path>, tick_ms: u64) -> Result<()> {
    let config = DemoConfig::load_or_default(config_path)?;
    let mut screen = ExampleScreen::new(&config)?;
    info!(
        title = %config.window.title,
        width = config.window.width,
        height = config.window.height,
        "screen ready"
    );

    screen.tap_button();

    let total_ms = config.delay_ms() + SETTLE_MS;
    let cfg = HeadlessRunConfig {
        max_frames: (total_ms / tick_ms.max(1) as f32).ceil().max(1.0) as u32,
        tick_ms,
    };

    let mut last_state = screen.button().state();
    info!(state = ?last_state, "button tapped");
    HeadlessRuntime::run(cfg, |ctx| {
        screen.tick(cfg.tick_ms as f32);
        let state = screen.button().state();
        if state != last_state {
            info!(frame = ctx.frame_index, elapsed_ms = ctx.elapsed_ms, from = ?last_state, to = ?state, "state changed");
            last_state = state;
        }
    })?;

    let mut list = DrawList::new();
    screen.paint(&mut list);
    info!(
        frames = screen.frames(),
        elapsed_ms = screen.elapsed_ms(),
        state = ?screen.button().state(),
        taps = screen.button().tap_count(),
        draw_commands = list.len(),
        "run finished"
    );
    Ok(())
}

fn cmd_scenario(
    file: &Path,
    config_path: Option<&Path>,
    report_path: Option<&Path>,
    tick_ms: u64,
) -> Result<bool> {
    let config = DemoConfig::load_or_default(config_path)?;
    let scenario = HeadlessScenario::from_path(file)?;
    let mut screen = ExampleScreen::new(&config)?;

    let outcome = run_loaded_scenario(&scenario, &mut screen, HeadlessRunConfig::with_tick_ms(tick_ms))?;
    let report = outcome.report();

    report.write_to_writer(&mut std::io::stdout().lock())?;
    if let Some(path) = report_path {
        report
            .write_to_path(path)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
    }

    info!("{}", report.summary());
    Ok(!outcome.is_failed())
}
