//! Roto Square entry point
//!
//! Builds a simulation from a preset or config file and runs it in a fixed-rate
//! frame loop with a headless or terminal renderer.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use roto_square::consts::TICK_RATE;
use roto_square::renderer::{AsciiRenderer, LogRenderer, TraceRenderer};
use roto_square::{FrameLoop, Pacing, SimConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Preset {
    /// One ball
    Single,
    /// Eight balls in colored pairs
    Eight,
    /// Seeded random balls (see --seed, --count)
    Scattered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum RendererKind {
    /// Periodic summaries through the logger
    Log,
    /// Character-grid drawing on stdout
    Ascii,
    /// One JSON line per frame (stdout or --output)
    Trace,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Bouncing balls inside a rotating square")]
struct Args {
    /// JSON config file (overrides --preset)
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Preset::Single)]
    preset: Preset,

    /// Seed for the scattered preset
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Ball count for the scattered preset
    #[arg(long, default_value_t = 8)]
    count: usize,

    /// Stop after this many ticks (runs until interrupted otherwise)
    #[arg(long)]
    ticks: Option<u64>,

    #[arg(long, value_enum, default_value_t = RendererKind::Log)]
    renderer: RendererKind,

    /// Draw or log every N ticks
    #[arg(long, default_value_t = TICK_RATE as u64)]
    every: u64,

    /// Trace output file (trace renderer only)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Terminal grid size for the ASCII renderer
    #[arg(long, default_value_t = 80)]
    cols: usize,
    #[arg(long, default_value_t = 30)]
    rows: usize,

    /// Run ticks back to back instead of at the fixed tick rate
    #[arg(long)]
    unpaced: bool,

    /// Print the resolved config as JSON and exit
    #[arg(long)]
    dump_config: bool,
}

fn resolve_config(args: &Args) -> Result<SimConfig> {
    if let Some(path) = &args.config {
        return SimConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()));
    }
    Ok(match args.preset {
        Preset::Single => SimConfig::single_ball(),
        Preset::Eight => SimConfig::eight_balls(),
        Preset::Scattered => SimConfig::scattered(args.seed, args.count),
    })
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = resolve_config(&args)?;
    if args.dump_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    let state = config.build().context("invalid simulation config")?;
    log::info!("Roto Square starting with {} bodies", state.bodies.len());

    let pacing = if args.unpaced {
        Pacing::Unpaced
    } else {
        Pacing::Fixed(TICK_RATE)
    };
    let mut frame_loop = FrameLoop::new(state).with_pacing(pacing);

    // Ctrl-C lands between ticks so renderers still get flushed below
    let stop = frame_loop.stop_handle();
    ctrlc::set_handler(move || {
        log::info!("Interrupt received, stopping after the current tick");
        stop.stop();
    })
    .context("failed to install Ctrl-C handler")?;

    let summary = match args.renderer {
        RendererKind::Log => frame_loop.run(&mut LogRenderer::new(args.every), args.ticks),
        RendererKind::Ascii => {
            let mut renderer = AsciiRenderer::new(io::stdout().lock(), args.cols, args.rows)
                .with_interval(args.every);
            frame_loop.run(&mut renderer, args.ticks)
        }
        RendererKind::Trace => {
            let out: Box<dyn io::Write> = match &args.output {
                Some(path) => Box::new(BufWriter::new(
                    File::create(path)
                        .with_context(|| format!("failed to create {}", path.display()))?,
                )),
                None => Box::new(BufWriter::new(io::stdout().lock())),
            };
            let mut renderer = TraceRenderer::new(out);
            let summary = frame_loop.run(&mut renderer, args.ticks);
            renderer.finish().context("trace output failed")?;
            summary
        }
    };

    log::info!(
        "Done: {} ticks, {} contacts in {:.2?}",
        summary.ticks,
        summary.contacts,
        summary.elapsed
    );
    Ok(())
}
