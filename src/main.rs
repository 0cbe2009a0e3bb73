//! Replays a window chrome scenario against the headless platform and prints
//! the window geometry and state after every step.

use std::path::PathBuf;
use std::process;

use borderless_snap::app::StateChange;
use borderless_snap::config::{Scenario, StepReport};
use clap::Parser;
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(name = "borderless-snap", about = "Replay a window chrome scenario", version)]
struct Cli {
    /// Scenario file (RON)
    #[arg(value_name = "PATH")]
    scenario: PathBuf,

    /// Log level for this crate (error|warn|info|debug|trace)
    #[arg(long, conflicts_with = "log_filter")]
    log_level: Option<String>,

    /// Explicit tracing filter directive, e.g. "borderless_snap::app=debug"
    #[arg(long)]
    log_filter: Option<String>,

    /// Only print the final step
    #[arg(long)]
    last: bool,
}

/// Filter precedence: `--log-filter`, then `--log-level`, then `RUST_LOG`,
/// then warnings only
fn filter_spec(cli: &Cli) -> String {
    if let Some(spec) = &cli.log_filter {
        return spec.clone();
    }
    if let Some(level) = &cli.log_level {
        return format!("borderless_snap={}", level.to_ascii_lowercase());
    }
    std::env::var("RUST_LOG").unwrap_or_else(|_| "borderless_snap=warn".to_string())
}

fn describe(change: &StateChange) -> String {
    match change {
        StateChange::Maximized(v) => format!("maximized={v}"),
        StateChange::Minimized(v) => format!("minimized={v}"),
        StateChange::Snapped(v) => format!("snapped={v}"),
        StateChange::Resizable(v) => format!("resizable={v}"),
        StateChange::Size { width, height } => format!("size={width}x{height}"),
    }
}

fn print_report(report: &StepReport) {
    let b = report.bounds;
    println!(
        "#{:<3} {:?}\n     bounds=({}, {}, {}, {}) state={:?} on_top={}",
        report.index,
        report.step,
        b.x,
        b.y,
        b.w,
        b.h,
        report.state.chrome(),
        report.always_on_top,
    );
    if report.state.minimized {
        println!("     minimized");
    }
    if let Some(o) = report.overlay {
        println!("     preview=({}, {}, {}, {})", o.x, o.y, o.w, o.h);
    }
    if !report.changes.is_empty() {
        let changes: Vec<String> = report.changes.iter().map(describe).collect();
        println!("     changes: {}", changes.join(", "));
    }
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::new(filter_spec(&cli)))
        .with(fmt::layer().without_time())
        .try_init()
        .ok();

    let reports = match Scenario::load(&cli.scenario).and_then(|scenario| scenario.replay()) {
        Ok(reports) => reports,
        Err(err) => {
            error!(%err, "replay failed");
            eprintln!("{err}");
            process::exit(1);
        }
    };

    if cli.last {
        if let Some(report) = reports.last() {
            print_report(report);
        }
    } else {
        for report in &reports {
            print_report(report);
        }
    }
}
