//! Confetti CLI - Headless rendering and tuning of confetti effects

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{init, render, simulate, EffectArgs};
use confetti_core::Color;

#[derive(Parser)]
#[command(name = "confetti")]
#[command(about = "Render 2D confetti particle effects to images", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default effect config
    Init {
        /// Config file to create
        #[arg(default_value = "confetti.toml")]
        path: String,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Render an effect to PNG frames or an animated GIF (headless)
    Render {
        #[command(flatten)]
        effect: EffectArgs,

        /// Output directory for PNG frames, or a .gif file
        #[arg(short, long, default_value = "confetti.gif")]
        output: String,

        /// Stop after this many frames even if particles remain
        #[arg(long, default_value = "600")]
        max_frames: u32,

        /// Background color (CSS name or hex)
        #[arg(long, default_value = "white")]
        background: Color,
    },

    /// Run an effect without drawing and print particle counts over time
    Simulate {
        #[command(flatten)]
        effect: EffectArgs,

        /// Simulated seconds
        #[arg(long, default_value = "10")]
        seconds: f32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG still wins over the flags
    let default_filter = match (cli.verbose, cli.quiet) {
        (0, true) => "error",
        (0, false) => "warn",
        (1, _) => "info",
        (2, _) => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match cli.command {
        Commands::Init { path, force } => init::run(&path, force),
        Commands::Render {
            effect,
            output,
            max_frames,
            background,
        } => render::run(render::RenderArgs {
            effect,
            output,
            max_frames,
            background,
        }),
        Commands::Simulate { effect, seconds } => simulate::run(effect, seconds),
    }
}
