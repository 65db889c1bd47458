//! agentdash - terminal dashboard for remote agents and their tasks.
//!
//! Loads the agent and task datasets from JSON files (or built-in demo data)
//! and shows them as searchable, sortable, paginated tables.

use std::fs::File;
use std::path::PathBuf;
use std::process;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use clap::builder::TypedValueParser;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use agentdash_core::provider::{JsonFileSource, RowSource, StaticSource, demo};
use agentdash_core::table::DEFAULT_PAGE_SIZE;
use agentdash_core::tui::App;

/// Terminal dashboard for agents and tasks.
#[derive(Parser, Debug)]
#[command(name = "agentdash", about = "Terminal dashboard for agents and tasks", version)]
struct Args {
    /// JSON file holding an array of agent objects.
    #[arg(long, value_name = "PATH", env = "AGENTDASH_AGENTS")]
    agents: Option<PathBuf>,

    /// JSON file holding an array of task objects.
    #[arg(long, value_name = "PATH", env = "AGENTDASH_TASKS")]
    tasks: Option<PathBuf>,

    /// Use built-in sample data for datasets without a file.
    #[arg(long)]
    demo: bool,

    /// Rows per page.
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE, env = "AGENTDASH_PAGE_SIZE",
          value_parser = clap::value_parser!(u64).range(1..).map(|n| n as usize))]
    page_size: usize,

    /// UI tick interval in milliseconds.
    #[arg(long, default_value = "250", value_parser = clap::value_parser!(u64).range(10..))]
    tick_ms: u64,

    /// Write logs to this file (the terminal belongs to the UI).
    #[arg(long, value_name = "PATH", env = "AGENTDASH_LOG_FILE")]
    log_file: Option<PathBuf>,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace). Default is warn.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initializes file logging. Without a log file, events are discarded.
fn init_logging(verbose: u8, log_file: Option<&PathBuf>) -> std::io::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path)?;

    let level = LevelFilter::from_level(log_level(verbose));
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

/// Picks a source for one dataset: file, demo data, or nothing.
fn source(
    name: &str,
    path: Option<PathBuf>,
    demo_source: Option<StaticSource>,
) -> Arc<dyn RowSource> {
    match (path, demo_source) {
        (Some(path), _) => Arc::new(JsonFileSource::new(name, path)),
        (None, Some(sample)) => Arc::new(sample),
        (None, None) => Arc::new(StaticSource::empty(name)),
    }
}

fn main() {
    let args = Args::parse();

    if let Err(e) = init_logging(args.verbose, args.log_file.as_ref()) {
        eprintln!("Error: cannot open log file: {}", e);
        process::exit(1);
    }

    let agents = source(
        "agents",
        args.agents,
        args.demo.then(demo::agents_source),
    );
    let tasks = source("tasks", args.tasks, args.demo.then(demo::tasks_source));

    info!(
        "agentdash {} starting: agents={}, tasks={}, page_size={}",
        env!("CARGO_PKG_VERSION"),
        agents.name(),
        tasks.name(),
        args.page_size
    );

    let app = App::new(agents, tasks, args.page_size);
    if let Err(e) = app.run(Duration::from_millis(args.tick_ms)) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(log_level(0), Level::WARN);
        assert_eq!(log_level(1), Level::INFO);
        assert_eq!(log_level(2), Level::DEBUG);
        assert_eq!(log_level(7), Level::TRACE);
    }

    #[test]
    fn parses_flags() {
        let args = Args::try_parse_from([
            "agentdash",
            "--agents",
            "a.json",
            "--page-size",
            "10",
            "-vv",
        ])
        .unwrap();
        assert_eq!(args.agents, Some(PathBuf::from("a.json")));
        assert_eq!(args.page_size, 10);
        assert_eq!(args.verbose, 2);
        assert!(!args.demo);
    }

    #[test]
    fn rejects_zero_page_size() {
        assert!(Args::try_parse_from(["agentdash", "--page-size", "0"]).is_err());
    }

    #[test]
    fn file_wins_over_demo() {
        let src = source("agents", Some(PathBuf::from("x.json")), Some(demo::agents_source()));
        assert_eq!(src.name(), "agents");
        let src = source("agents", None, Some(demo::agents_source()));
        assert_eq!(src.name(), "demo agents");
        let src = source("tasks", None, None);
        assert_eq!(src.load().unwrap().len(), 0);
    }
}
