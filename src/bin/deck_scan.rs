//! deck-scan: inventory check over the configured stores.
//!
//! Loads whichever stores are configured, classifies everything once, and
//! prints per-view counts plus any records the loaders skipped. Useful after
//! pointing the settings at a new library to confirm the catalog sees what
//! the source tools see. Exits non-zero when a store fails to load or the
//! record set cannot be classified.

use anyhow::{Context, Result, bail};
use assetdeck::catalog::{View, classify};
use assetdeck::config::Settings;
use assetdeck::store::{StoreReport, load_curated_store, load_explorer_store};
use assetdeck::{CatalogSession, logging};
use std::env;
use std::path::PathBuf;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

struct Cli {
    explorer: Option<PathBuf>,
    curated: Option<PathBuf>,
    settings: Option<PathBuf>,
}

fn usage(code: i32) -> ! {
    eprintln!(
        "Usage: deck-scan [--explorer FILE] [--curated DIR] [--settings FILE]\n\n\
Options:\n  --explorer FILE  Explorer store (JSON array of items).\n  --curated DIR    Curated store directory.\n  --settings FILE  Settings file to read store locations from.\n  --help           Show this message.\n\n\
Store locations resolve in order: flags, DECK_EXPLORER_STORE /\nDECK_CURATED_STORE, then the settings file."
    );
    std::process::exit(code);
}

fn parse_args() -> Cli {
    let mut cli = Cli {
        explorer: None,
        curated: None,
        settings: None,
    };
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => usage(0),
            "--explorer" => cli.explorer = args.next().map(PathBuf::from),
            "--curated" => cli.curated = args.next().map(PathBuf::from),
            "--settings" => cli.settings = args.next().map(PathBuf::from),
            other => {
                eprintln!("deck-scan: unrecognized argument {other}\n");
                usage(1);
            }
        }
    }
    cli
}

fn run() -> Result<()> {
    logging::init();
    let cli = parse_args();

    let mut settings = match &cli.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    }
    .with_env_overrides();
    if cli.explorer.is_some() {
        settings.explorer_store = cli.explorer.clone();
    }
    if cli.curated.is_some() {
        settings.curated_store = cli.curated.clone();
    }

    if settings.explorer_store.is_none() && settings.curated_store.is_none() {
        bail!(
            "no store configured; pass --explorer/--curated or set \
             DECK_EXPLORER_STORE / DECK_CURATED_STORE"
        );
    }

    let mut session = CatalogSession::new();
    let mut reports: Vec<(&str, StoreReport)> = Vec::new();

    if let Some(path) = &settings.explorer_store {
        let (items, report) = load_explorer_store(path)
            .with_context(|| format!("loading explorer store {}", path.display()))?;
        session
            .load_explorer(items)
            .context("classifying explorer records")?;
        reports.push(("explorer", report));
    }
    if let Some(dir) = &settings.curated_store {
        let (set, report) = load_curated_store(dir)
            .with_context(|| format!("loading curated store {}", dir.display()))?;
        session
            .load_curated(set)
            .context("classifying curated records")?;
        reports.push(("curated", report));
    }

    for (label, report) in &reports {
        println!(
            "{label} store: {} records loaded, {} skipped",
            report.loaded,
            report.skipped.len()
        );
    }

    let snapshot = session.snapshot();
    let partition = classify(snapshot.records())?;
    for view in View::ALL {
        println!("{}: {}", view.as_str(), partition.bucket(view).len());
    }
    println!("avatar paths indexed: {}", snapshot.names().len());

    let skipped: Vec<_> = reports
        .iter()
        .flat_map(|(_, report)| &report.skipped)
        .collect();
    if !skipped.is_empty() {
        println!("skipped:");
        for record in skipped {
            println!("  {}: {}", record.entry, record.reason);
        }
    }

    Ok(())
}
