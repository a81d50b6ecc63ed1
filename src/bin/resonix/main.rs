//! resonix - render and inspect synthesized signals
//!
//! Run with: cargo run -- view sawtooth --frequency 110 --lowpass 800

mod app;
mod cli;
mod ui;

use clap::Parser;
use color_eyre::eyre::{Result as EyreResult, WrapErr};
use resonix::analysis::{AudioStats, Spectrum};

use cli::{Cli, Commands, SignalArgs};

fn main() -> EyreResult<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    match cli.command {
        Commands::Render(args) => {
            // the viewer owns the terminal, so only `render` logs
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
                )
                .with_writer(std::io::stderr)
                .init();
            render(&args)
        }
        Commands::View(args) => {
            let rendered = args.render().wrap_err("failed to render signal")?;
            ui::run(rendered)
        }
    }
}

fn render(args: &SignalArgs) -> EyreResult<()> {
    let rendered = args.render().wrap_err("failed to render signal")?;
    let signal = &rendered.signal;
    let stats = AudioStats::from_buffer(signal);
    let dominant = Spectrum::analyze(signal).dominant_frequency();

    println!("{}", rendered.title());
    println!("  samples:    {}", signal.len());
    println!("  duration:   {:.3} s", signal.duration_secs());
    println!("  peak:       {:.4}", stats.peak);
    println!("  rms:        {:.4}", stats.rms);
    match dominant {
        Some(hz) => println!("  dominant:   {hz:.1} Hz"),
        None => println!("  dominant:   -"),
    }
    println!("  recovered:  {}", rendered.substitutions);

    Ok(())
}
