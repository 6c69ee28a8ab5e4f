mod calc;
mod config;
mod filter;
mod ipc;
mod model;
mod seed;
mod store;

use clap::Parser;
use std::io::{self, BufRead, Write};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(default_filter: &str) {
    // stdout carries the protocol; logs go to stderr.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn load_store(settings: &config::Settings) -> anyhow::Result<store::Store> {
    let (dataset, source) = match &settings.seed_path {
        Some(p) => (
            seed::load_dataset_file(p)?,
            seed::SeedSource::File(p.to_string_lossy().to_string()),
        ),
        None => (seed::builtin_dataset()?, seed::SeedSource::Builtin),
    };
    Ok(store::Store::new(dataset, source))
}

fn main() -> anyhow::Result<()> {
    let args = config::Args::parse();
    let settings = config::resolve(&args)?;
    init_tracing(&settings.log_filter);

    let store = load_store(&settings)?;
    info!(
        source = %store.source().describe(),
        students = store.total_students(),
        courses = store.total_courses(),
        attendance_records = store.attendance_records().len(),
        "store loaded"
    );
    let mut state = ipc::AppState { store };

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "stdin read failed");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: ipc::Request = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "unparseable request");
                let _ = writeln!(stdout, "{}", ipc::bad_json(e.to_string()));
                let _ = stdout.flush();
                continue;
            }
        };

        let resp = ipc::handle_request(&mut state, req);
        let _ = writeln!(
            stdout,
            "{}",
            serde_json::to_string(&resp).unwrap_or_else(|_| "{\"ok\":false}".to_string())
        );
        let _ = stdout.flush();
    }
    info!("stdin closed, exiting");
    Ok(())
}
