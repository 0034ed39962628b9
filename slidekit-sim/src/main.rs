//! `slidekit`: drive a headless slider from a script or in real time.

mod script;
mod sim;

use std::cell::RefCell;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use slidekit_config::{ConfigSource, SliderConfig};
use slidekit_core::{EventKind, SliderInfo};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::sim::{Report, Simulator};

#[derive(Parser)]
#[command(name = "slidekit", about = "Headless slider simulator")]
struct Cli {
    /// TOML or JSON slider config. Without it the SLIDEKIT_CONFIG_* variables
    /// and the default file names are tried.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Override the number of slides.
    #[arg(long, global = true)]
    slides: Option<usize>,
    /// Override the viewport width in px.
    #[arg(long, global = true)]
    width: Option<f64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a step script and print the slider state after every step
    Script {
        /// Script file, `-` for stdin
        path: PathBuf,
    },
    /// Autoplay in real time and print every index change
    Play {
        #[arg(long, default_value_t = 3000)]
        duration_ms: u64,
        #[arg(long, default_value_t = 16)]
        tick_ms: u64,
        /// Override autoplayTimeout
        #[arg(long)]
        timeout_ms: Option<u64>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_deref())?;
    if let Some(slides) = cli.slides {
        config.stage.slides = slides;
    }
    if let Some(width) = cli.width {
        config.stage.width = width;
    }

    match cli.command {
        Command::Script { path } => run_script(config, &path),
        Command::Play {
            duration_ms,
            tick_ms,
            timeout_ms,
        } => {
            config.slider.autoplay = true;
            if let Some(timeout) = timeout_ms {
                config.slider.autoplay_timeout = timeout;
            }
            play(
                config,
                Duration::from_millis(duration_ms),
                Duration::from_millis(tick_ms.max(1)),
            )
            .await
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<SliderConfig> {
    let (config, source) = match path {
        Some(path) => (
            SliderConfig::load_from_file(path)?,
            ConfigSource::File(path.to_path_buf()),
        ),
        None => SliderConfig::load_from_env()?,
    };
    info!(?source, "slider config loaded");
    Ok(config)
}

fn mount(config: &SliderConfig) -> Result<Simulator> {
    config.check().context("invalid slider config")?;
    Simulator::mount(config, Instant::now())
}

fn run_script(config: SliderConfig, path: &Path) -> Result<()> {
    let source = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read script from stdin")?;
        buf
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?
    };
    let steps = script::parse(&source)?;
    let mut sim = mount(&config)?;
    info!(steps = steps.len(), "running script");

    let mut out = io::stdout().lock();
    for step in &steps {
        let moved = sim.run(step);
        let info = sim.info();
        let report = Report {
            step: step.to_string(),
            moved,
            info: &info,
        };
        serde_json::to_writer(&mut out, &report)?;
        writeln!(out)?;
    }
    Ok(())
}

async fn play(config: SliderConfig, duration: Duration, tick: Duration) -> Result<()> {
    let mut sim = mount(&config)?;
    let changes: Rc<RefCell<Vec<SliderInfo>>> = Rc::default();
    let sink = Rc::clone(&changes);
    sim.carousel_mut()
        .subscribe(EventKind::IndexChanged, move |event| {
            sink.borrow_mut().push(event.info.clone());
        });
    sim.run(&script::Step::Play);

    let deadline = sim.now() + duration;
    let mut interval = tokio::time::interval(tick);
    let mut out = io::stdout().lock();
    info!(?duration, ?tick, "autoplay running");
    loop {
        let now = interval.tick().await.into_std().max(sim.now());
        sim.tick_to(now.min(deadline));
        for change in changes.borrow_mut().drain(..) {
            serde_json::to_writer(&mut out, &change)?;
            writeln!(out)?;
        }
        if now >= deadline {
            break;
        }
    }

    serde_json::to_writer(&mut out, &sim.info())?;
    writeln!(out)?;
    Ok(())
}
