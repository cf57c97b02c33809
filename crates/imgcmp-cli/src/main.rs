//! imgcmp - side-by-side A/B image comparison
//!
//! Renders a comparison figure (the two sources plus a blend, difference or
//! shade of them) to PNG, or opens an interactive viewer with live controls.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "imgcmp")]
#[command(author, version, about = "Side-by-side A/B image comparison")]
#[command(long_about = "
Compares two images of identical shape by drawing them next to a third
image derived from both: a blend, a signed difference, or a horizontal /
vertical shade that splices A and B. All three panels share one intensity
scale taken from the two sources.

Examples:
  imgcmp render a.png b.png -o cmp.png                 # 50/50 blend
  imgcmp render a.png b.png -o cmp.png -m diff --swap  # b - a
  imgcmp render a.png b.png -o cmp.png -m vertical_shade -a 0.3 -l wide
  imgcmp render a.png b.png -o frame.png --sweep 20    # alpha 0..1 in 20 steps
  imgcmp view a.png b.png                              # interactive viewer
  imgcmp methods                                       # list methods
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one comparison figure to PNG
    #[command(visible_alias = "r")]
    Render(RenderArgs),

    /// Open the interactive viewer
    #[cfg(feature = "viewer")]
    #[command(visible_alias = "v")]
    View(ViewArgs),

    /// List comparison methods
    #[command(visible_alias = "m")]
    Methods,
}

/// Comparison settings shared by `render` and `view`.
#[derive(Args, Debug, Clone)]
struct CompareArgs {
    /// First image (A)
    a: PathBuf,

    /// Second image (B)
    b: PathBuf,

    /// Comparison method: blend, diff, horizontal_shade, vertical_shade
    #[arg(short, long, default_value = "blend")]
    method: String,

    /// Mixing parameter in [0, 1]
    #[arg(short, long, default_value = "0.5", allow_negative_numbers = true)]
    alpha: f64,

    /// Layout: auto, square, tall, wide
    #[arg(short, long, default_value = "auto")]
    layout: String,

    /// Exchange A and B
    #[arg(short, long)]
    swap: bool,

    /// Figure width of the square layout, in inches
    #[arg(short = 'w', long, default_value = "10.0")]
    width: f32,
}

/// Arguments for the `render` command.
#[derive(Args)]
struct RenderArgs {
    #[command(flatten)]
    compare: CompareArgs,

    /// Output PNG
    #[arg(short, long)]
    output: PathBuf,

    /// Pixels per inch
    #[arg(long, default_value = "100")]
    dpi: f32,

    /// Render N+1 frames sweeping alpha from 0 to 1 (numbered outputs).
    /// N must divide 20, the number of 0.05 alpha steps.
    #[arg(long, value_name = "N")]
    sweep: Option<u32>,
}

/// Arguments for the `view` command.
#[cfg(feature = "viewer")]
#[derive(Args)]
struct ViewArgs {
    #[command(flatten)]
    compare: CompareArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("imgcmp={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    if let Err(err) = run(cli) {
        tracing::error!("{err:#}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Render(args) => commands::render::run(args, cli.verbose),
        #[cfg(feature = "viewer")]
        Commands::View(args) => commands::view::run(args, cli.verbose),
        Commands::Methods => commands::methods::run(cli.verbose),
    }
}
