//! dextable - interactive terminal viewer for a record collection.
//!
//! Usage:
//!   dextable                          # in-memory sample collection
//!   dextable --data ./dex.json        # collection persisted in a JSON file
//!   dextable --data ./dex.json --seed # create the file with samples if missing
//!   dextable --log-file ./dextable.log --log-level debug

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dextable::gateway::{JsonFileGateway, MemoryGateway, RecordGateway, sample_records};
use dextable::tui::App;

/// Redraw and status-expiry interval.
const TICK_RATE: Duration = Duration::from_millis(250);

/// Interactive viewer for a record collection.
#[derive(Parser)]
#[command(name = "dextable", about = "Interactive record table")]
struct Args {
    /// JSON file holding the collection. Without it an in-memory sample
    /// collection is used and changes are lost on exit.
    #[arg(long, value_name = "PATH", env = "DEXTABLE_DATA")]
    data: Option<PathBuf>,

    /// Write the sample collection to --data if the file does not exist.
    #[arg(long, requires = "data")]
    seed: bool,

    /// Append logs to this file. The terminal is owned by the UI, so no
    /// logs are written without it.
    #[arg(long, value_name = "PATH", env = "DEXTABLE_LOG_FILE")]
    log_file: Option<PathBuf>,

    /// Log level for dextable (error, warn, info, debug, trace).
    #[arg(long, value_name = "LEVEL", env = "DEXTABLE_LOG", default_value = "info")]
    log_level: String,
}

fn main() {
    let args = Args::parse();

    if let Some(ref path) = args.log_file
        && let Err(e) = init_logging(path, &args.log_level)
    {
        eprintln!("Error: cannot set up logging to '{}': {}", path.display(), e);
        std::process::exit(1);
    }

    let gateway: Box<dyn RecordGateway> = match args.data {
        Some(ref path) => {
            let gateway = JsonFileGateway::new(path);
            if args.seed {
                match gateway.seed_if_missing(sample_records()) {
                    Ok(true) => info!(path = %path.display(), "seeded sample collection"),
                    Ok(false) => {}
                    Err(e) => {
                        eprintln!("Error seeding '{}': {}", path.display(), e);
                        std::process::exit(1);
                    }
                }
            }
            info!(path = %path.display(), "using JSON file backend");
            Box::new(gateway)
        }
        None => {
            info!("using in-memory sample backend");
            Box::new(MemoryGateway::with_samples())
        }
    };

    let app = App::new(gateway);
    if let Err(e) = app.run(TICK_RATE) {
        eprintln!("Error running TUI: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(path: &Path, level: &str) -> Result<(), Box<dyn std::error::Error>> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter =
        EnvFilter::from_default_env().add_directive(format!("dextable={}", level).parse()?);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
}
