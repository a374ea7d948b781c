use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use scrollwork::{Evaluator, Journey, JourneyRuntime, ScrollPosition, blend_strip, gradient_band_blend};

#[derive(Parser, Debug)]
#[command(name = "scrollwork", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Blend two zone backgrounds with a vertical gradient band.
    Blend(BlendArgs),
    /// Tabulate a journey's outputs across simulated scroll positions.
    Trace(TraceArgs),
}

#[derive(Parser, Debug)]
struct BlendArgs {
    /// Upper zone background (its bottom rows feed the band).
    #[arg(long)]
    from: PathBuf,

    /// Lower zone background (its top rows feed the band).
    #[arg(long)]
    to: PathBuf,

    /// Transition band height in pixels.
    #[arg(long, default_value_t = 400)]
    band: u32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Write the full stitched strip instead of just the band.
    #[arg(long)]
    strip: bool,
}

#[derive(Parser, Debug)]
struct TraceArgs {
    /// Journey configuration JSON.
    #[arg(long)]
    journey: PathBuf,

    /// Simulated viewport height in pixels.
    #[arg(long, default_value_t = 900.0)]
    viewport: f64,

    /// Simulated document height in pixels.
    #[arg(long, default_value_t = 5000.0)]
    document: f64,

    /// Number of scroll positions to sample.
    #[arg(long, default_value_t = 12)]
    steps: u32,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Blend(args) => run_blend(args),
        Command::Trace(args) => run_trace(args),
    }
}

fn run_blend(args: BlendArgs) -> anyhow::Result<()> {
    let from = image::open(&args.from)
        .with_context(|| format!("failed to open {}", args.from.display()))?
        .to_rgba8();
    let to = image::open(&args.to)
        .with_context(|| format!("failed to open {}", args.to.display()))?
        .to_rgba8();

    let out = if args.strip {
        blend_strip(&from, &to, args.band)?
    } else {
        gradient_band_blend(&from, &to, args.band)?
    };
    out.save(&args.out)
        .with_context(|| format!("failed to write {}", args.out.display()))?;

    println!(
        "wrote {} ({}x{})",
        args.out.display(),
        out.width(),
        out.height()
    );
    Ok(())
}

fn run_trace(args: TraceArgs) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(&args.journey)
        .with_context(|| format!("failed to read {}", args.journey.display()))?;
    let journey = Journey::from_json(&raw)
        .with_context(|| format!("failed to load {}", args.journey.display()))?;
    let mut runtime = JourneyRuntime::new(&journey)?;

    let max_scroll = (args.document - args.viewport).max(0.0);
    println!("{:>8}  {:>8}  {:<10}  {:>5}  layers", "offset", "altitude", "zone", "fade");

    for step in 0..=args.steps {
        let offset = max_scroll * f64::from(step) / f64::from(args.steps.max(1));
        let pos = ScrollPosition::new(offset, args.viewport, args.document);
        // 16ms ticks: enough for the crossfade tracker to register targets.
        let frame = Evaluator::eval_tick(&journey, &mut runtime, pos, u64::from(step) * 16);

        let layers = frame
            .layer_offsets
            .iter()
            .map(|(name, off)| format!("{name}:{off:+.1}%"))
            .collect::<Vec<_>>()
            .join(" ");
        println!(
            "{:>8.0}  {:>8}  {:<10}  {:>5}  {}",
            offset, frame.altitude_label, frame.zone, frame.crossfade_index, layers
        );
    }
    Ok(())
}
