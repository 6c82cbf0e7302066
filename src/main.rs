use std::fs::File;
use std::io::stdout;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::EnableMouseCapture,
    execute,
    terminal::{EnterAlternateScreen, enable_raw_mode},
};
use log::{error, info};
use ratatui::{Terminal, backend::CrosstermBackend};
use simplelog::{Config, LevelFilter, WriteLogger};

use pagerect::event_source::TerminalEventSource;
use pagerect::panic_handler::{initialize_panic_handler, restore_terminal};
use pagerect::pdf::MupdfLoader;
use pagerect::settings::Settings;
use pagerect::{App, run_app_with_event_source};

/// Terminal PDF viewer with a single editable rectangle overlay
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// PDF file to open at start-up
    path: Option<PathBuf>,

    /// YAML settings file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Where log output is written
    #[arg(long, value_name = "FILE", default_value = "pagerect.log")]
    log_file: PathBuf,

    /// One of off, error, warn, info, debug, trace
    #[arg(long, value_name = "LEVEL", default_value = "info", value_parser = parse_level)]
    log_level: LevelFilter,
}

fn parse_level(value: &str) -> Result<LevelFilter, String> {
    value
        .parse()
        .map_err(|_| format!("unknown log level {value:?}"))
}

fn main() -> Result<()> {
    let args = Args::parse();

    WriteLogger::init(
        args.log_level,
        Config::default(),
        File::create(&args.log_file)
            .with_context(|| format!("cannot create log file {}", args.log_file.display()))?,
    )?;

    info!("Starting pagerect");

    let settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    initialize_panic_handler();

    let mut app = App::new(settings, Box::new(MupdfLoader));
    if let Some(path) = &args.path {
        app.load_document(path);
    }

    // Terminal initialization
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut event_source = TerminalEventSource;
    let res = run_app_with_event_source(&mut terminal, &mut app, &mut event_source);

    restore_terminal();

    if let Err(err) = &res {
        error!("Application error: {err:?}");
    }
    info!("Shutting down pagerect");
    res
}
