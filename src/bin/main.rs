//! CLI tool for coretemp-graph

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand, ValueEnum};
#[cfg(feature = "cli")]
use std::{
    ops::ControlFlow,
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "coretemp-graph")]
#[command(
    about = "Live per-core CPU temperature charts with high/critical thresholds",
    long_about = None
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Update interval in seconds (overrides the config file)
    #[arg(short, long, global = true)]
    interval: Option<f64>,

    /// Samples kept per core (overrides the config file)
    #[arg(short, long, global = true)]
    window: Option<usize>,

    /// Configuration file (default: ~/.config/coretemp-graph/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Live per-core charts in the terminal (default)
    Tui,
    /// Print one line of readings per tick
    Watch,
    /// List the core sensors once and exit
    Sensors {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

#[cfg(feature = "cli")]
#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[cfg(feature = "cli")]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use coretemp_graph::{Config, HwmonReader, Monitor, SensorReader};

    let cli = Cli::parse();

    let tui_mode = matches!(cli.command, None | Some(Commands::Tui));
    init_logging(cli.verbose, tui_mode);

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(seconds) = cli.interval {
        if !seconds.is_finite() || seconds <= 0.0 {
            return Err(format!("invalid interval: {}", seconds).into());
        }
        config.sampling.refresh_interval_ms = ((seconds * 1000.0).round() as u64).max(1);
    }
    if let Some(window) = cli.window {
        config.sampling.window_size = window;
    }
    config.validate()?;

    let mut reader = HwmonReader::from_config(&config.sensor);

    match cli.command {
        None | Some(Commands::Tui) => {
            let monitor = Monitor::new(Box::new(reader), &config.sampling)?;
            let mut app = coretemp_graph::tui::App::new(
                monitor,
                coretemp_graph::processor_name(),
                config.display.show_legend,
            );
            coretemp_graph::tui::run(&mut app)?;
        }
        Some(Commands::Watch) => {
            let name = coretemp_graph::processor_name();
            if !name.is_empty() {
                println!("{}", name);
            }
            let mut monitor = Monitor::new(Box::new(reader), &config.sampling)?;

            // Ctrl-C ends the loop after the current tick instead of killing the process
            let running = Arc::new(AtomicBool::new(true));
            {
                let running = running.clone();
                ctrlc::set_handler(move || {
                    log::info!("Received Ctrl+C, stopping...");
                    running.store(false, Ordering::Relaxed);
                })?;
            }

            monitor.run(|m| {
                print_tick(m);
                Ok(if running.load(Ordering::Relaxed) {
                    ControlFlow::Continue(())
                } else {
                    ControlFlow::Break(())
                })
            })?;
        }
        Some(Commands::Sensors { format }) => {
            let snapshot = reader.sample()?;
            if format == Format::Json {
                println!("{}", serde_json::to_string_pretty(snapshot.samples())?);
            } else {
                print_sensors(&snapshot);
            }
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn init_logging(verbose: bool, tui_mode: bool) {
    // Anything written to stderr would tear the alternate screen, so the TUI
    // stays quiet unless asked
    let default_filter = match (verbose, tui_mode) {
        (true, _) => "debug",
        (false, true) => "off",
        (false, false) => "warn",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

#[cfg(feature = "cli")]
fn print_tick(monitor: &coretemp_graph::Monitor) {
    let mut line = chrono::Local::now().format("%H:%M:%S%.3f").to_string();
    for core in monitor.cores().iter() {
        match core.latest() {
            Some(latest) if !core.is_vanished() => {
                line.push_str(&format!("  {}: {:5.1}°C", core.label(), latest.current))
            }
            _ => line.push_str(&format!("  {}:    --  ", core.label())),
        }
    }
    println!("{}", line);
}

#[cfg(feature = "cli")]
fn print_sensors(snapshot: &coretemp_graph::SensorSnapshot) {
    println!("=== Core Temperatures ===");
    if snapshot.is_empty() {
        println!("No core sensors reported");
        return;
    }
    for sample in snapshot.samples() {
        println!(
            "  {:<10} {:5.1}°C  (high: {:.1}°C, critical: {:.1}°C)",
            sample.label, sample.current, sample.high, sample.critical
        );
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI features not enabled. Please compile with --features cli");
    std::process::exit(1);
}
