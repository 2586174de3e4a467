use std::io::BufRead as _;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use figman::app::{FigureManager, Placement};
use figman::config::{self, Settings};
use figman::domain::core::Rect;
use figman::domain::presets::Preset;

#[derive(Parser, Debug)]
#[command(name = "figman", version, about = "Place windows on a screen grid")]
struct Cli {
    /// Screen area to use instead of measuring, e.g. 1920x1080+0+0 or 0,0,1920,1080.
    #[arg(long, global = true)]
    screen: Option<Rect>,

    /// Config file (defaults to <config dir>/figman/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Pause before each geometry read/write, in milliseconds.
    #[arg(long, global = true)]
    delay_ms: Option<u64>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Measure the usable screen area and print it.
    Measure {
        /// Open a probe window to drag into place, then press Enter.
        #[arg(long)]
        manual: bool,
    },
    /// Move the active window to a named position (see `list`).
    Place { preset: Preset },
    /// Move the active window into one cell of a ROWS x COLS grid.
    Cell {
        rows: u32,
        cols: u32,
        row: u32,
        col: u32,
    },
    /// List the named positions.
    List,
    /// Open a labelled window at every named position.
    Demo {
        /// How long to keep the windows open, in milliseconds.
        #[arg(long, default_value_t = 5000)]
        hold_ms: u64,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut settings = config::load_settings(cli.config.as_deref()).context("loading config")?;
    if let Some(rect) = cli.screen {
        settings.screen = Some(rect.to_array());
    }
    if let Some(delay_ms) = cli.delay_ms {
        settings.settle_delay_ms = delay_ms;
    }
    settings.validate()?;

    match cli.cmd {
        Command::List => {
            for name in Preset::names() {
                println!("{name}");
            }
        }
        Command::Measure { manual } => measure(settings, manual)?,
        Command::Place { preset } => {
            let manager = FigureManager::from_settings(&settings)?;
            report(manager.place(preset, None)?);
        }
        Command::Cell {
            rows,
            cols,
            row,
            col,
        } => {
            let manager = FigureManager::from_settings(&settings)?;
            report(manager.position(rows, cols, row, col, None)?);
        }
        Command::Demo { hold_ms } => {
            let manager = FigureManager::from_settings(&settings)?;
            let placed = manager.test_all_positions(Duration::from_millis(hold_ms))?;
            println!("placed {placed} of {} windows", Preset::ALL.len());
        }
    }

    Ok(())
}

fn measure(settings: Settings, manual: bool) -> anyhow::Result<()> {
    let settings = Settings {
        screen: None,
        auto_measure: false,
        ..settings
    };
    let mut manager = FigureManager::from_settings(&settings)?;
    let measurer = manager.measurer_mut();

    let rect = if manual {
        measurer.open_probe()?;
        println!("Move and resize the probe window over the target area, then press Enter.");
        let mut line = String::new();
        std::io::stdin().lock().read_line(&mut line)?;
        Some(measurer.measure_from_open_probe()?)
    } else {
        measurer.auto_measure()?
    };

    match rect {
        Some(rect) => println!("{rect}"),
        None => anyhow::bail!("no interactive display; screen not measured"),
    }
    Ok(())
}

fn report(placement: Placement) {
    match placement {
        Placement::Placed { window, rect } => println!("placed {window} at {rect}"),
        Placement::Skipped { rect, reason } => println!("skipped {rect}: {reason}"),
    }
}
