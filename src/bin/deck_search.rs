//! deck-search: query one catalog view from the command line.
//!
//! Drives the same pipeline the display layer uses: load, classify, filter
//! with basic and advanced criteria, sort, and print one page. Text output
//! goes to stdout one record per line; `--json` emits the full page object
//! for scripting.

use anyhow::{Context, Result, bail};
use assetdeck::catalog::{Criteria, SortMethod, View, keywords};
use assetdeck::config::Settings;
use assetdeck::store::{load_curated_store, load_explorer_store};
use assetdeck::{CatalogSession, Record, ViewPage, logging};
use chrono::DateTime;
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
    view: View,
    criteria: Criteria,
    sort: Option<SortMethod>,
    page: usize,
    page_size: Option<usize>,
    json: bool,
}

fn usage(code: i32) -> ! {
    eprintln!(
        "Usage: deck-search [options] [--query TEXT]\n\n\
Options:\n  --view VIEW      avatars | items | worlds (default avatars).\n  --query TEXT     Basic query; whitespace-separated keywords.\n  --title KW       Advanced title keyword(s); repeatable.\n  --author KW      Advanced author keyword(s); repeatable.\n  --category KW    Advanced category keyword(s); repeatable.\n  --avatar KW      Advanced supported-avatar keyword(s); repeatable.\n  --tag KW         Advanced tag keyword(s); repeatable.\n  --memo KW        Advanced memo keyword(s); repeatable.\n  --sort METHOD    created-asc | created-desc | title-asc | title-desc |\n                   author-asc | author-desc (default created-desc).\n  --page N         Zero-based page index (default 0).\n  --page-size N    Records per page (default from settings).\n  --json           Emit the page as JSON instead of text.\n  --explorer FILE  Explorer store (JSON array of items).\n  --curated DIR    Curated store directory.\n  --settings FILE  Settings file to read defaults from.\n  --help           Show this message.\n\n\
Examples:\n  deck-search --view items --query \"red hat\"\n  deck-search --view items --avatar Fox --sort title-asc --page 1"
    );
    std::process::exit(code);
}

fn flag_value(args: &mut impl Iterator<Item = String>, flag: &str) -> String {
    match args.next() {
        Some(value) => value,
        None => {
            eprintln!("deck-search: {flag} requires a value\n");
            usage(1);
        }
    }
}

fn parse_index(raw: &str, flag: &str) -> usize {
    match raw.parse::<usize>() {
        Ok(value) => value,
        Err(_) => {
            eprintln!("deck-search: {flag} expects a non-negative integer, got '{raw}'\n");
            usage(1);
        }
    }
}

fn parse_args() -> Cli {
    let mut cli = Cli {
        explorer: None,
        curated: None,
        settings: None,
        view: View::Avatars,
        criteria: Criteria::default(),
        sort: None,
        page: 0,
        page_size: None,
        json: false,
    };

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => usage(0),
            "--view" => {
                let raw = flag_value(&mut args, "--view");
                cli.view = match View::parse(&raw) {
                    Some(view) => view,
                    None => {
                        eprintln!("deck-search: unknown view '{raw}'\n");
                        usage(1);
                    }
                };
            }
            "--query" => cli.criteria.basic = flag_value(&mut args, "--query"),
            "--title" => push_keywords(
                &mut cli.criteria.advanced.title,
                &flag_value(&mut args, "--title"),
            ),
            "--author" => push_keywords(
                &mut cli.criteria.advanced.author,
                &flag_value(&mut args, "--author"),
            ),
            "--category" => push_keywords(
                &mut cli.criteria.advanced.category,
                &flag_value(&mut args, "--category"),
            ),
            "--avatar" => push_keywords(
                &mut cli.criteria.advanced.supported_avatars,
                &flag_value(&mut args, "--avatar"),
            ),
            "--tag" => push_keywords(
                &mut cli.criteria.advanced.tags,
                &flag_value(&mut args, "--tag"),
            ),
            "--memo" => push_keywords(
                &mut cli.criteria.advanced.memo,
                &flag_value(&mut args, "--memo"),
            ),
            "--sort" => {
                let raw = flag_value(&mut args, "--sort");
                cli.sort = match SortMethod::parse(&raw) {
                    Some(method) => Some(method),
                    None => {
                        eprintln!("deck-search: unknown sort method '{raw}'\n");
                        usage(1);
                    }
                };
            }
            "--page" => cli.page = parse_index(&flag_value(&mut args, "--page"), "--page"),
            "--page-size" => {
                cli.page_size =
                    Some(parse_index(&flag_value(&mut args, "--page-size"), "--page-size"));
            }
            "--json" => cli.json = true,
            "--explorer" => cli.explorer = args.next().map(PathBuf::from),
            "--curated" => cli.curated = args.next().map(PathBuf::from),
            "--settings" => cli.settings = args.next().map(PathBuf::from),
            other => {
                eprintln!("deck-search: unrecognized argument {other}\n");
                usage(1);
            }
        }
    }
    cli
}

fn push_keywords(list: &mut Vec<String>, raw: &str) {
    list.extend(keywords(raw));
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
    if let Some(path) = &settings.explorer_store {
        let (items, _report) = load_explorer_store(path)
            .with_context(|| format!("loading explorer store {}", path.display()))?;
        session
            .load_explorer(items)
            .context("classifying explorer records")?;
    }
    if let Some(dir) = &settings.curated_store {
        let (set, _report) = load_curated_store(dir)
            .with_context(|| format!("loading curated store {}", dir.display()))?;
        session
            .load_curated(set)
            .context("classifying curated records")?;
    }

    let sort = cli.sort.unwrap_or(settings.sort);
    let page_size = cli.page_size.unwrap_or(settings.page_size);
    let page = session
        .view(cli.view, &cli.criteria, sort, cli.page, page_size)
        .context("querying the catalog")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&page)?);
    } else {
        print_page(&session, cli.view, &page);
    }
    Ok(())
}

fn print_page(session: &CatalogSession, view: View, page: &ViewPage) {
    println!(
        "{}: page {}/{} ({} records)",
        view.as_str(),
        page.page_index + 1,
        page.total_pages,
        page.total_count
    );
    let snapshot = session.snapshot();
    for record in &page.records {
        let mut line = format!(
            "  {}  [{}]  {}",
            record.title(),
            created_date(record),
            record.author()
        );
        if !record.category_name().is_empty() {
            line.push_str(&format!("  ({})", record.category_name()));
        }
        if view == View::Items {
            let names: Vec<String> = match record.avatar_refs() {
                assetdeck::catalog::AvatarRefs::Paths(paths) => paths
                    .iter()
                    .map(|path| snapshot.display_avatar_name(path).to_string())
                    .collect(),
                assetdeck::catalog::AvatarRefs::Names(names) => names.to_vec(),
                assetdeck::catalog::AvatarRefs::None => Vec::new(),
            };
            if !names.is_empty() {
                line.push_str(&format!("  for {}", names.join(", ")));
            }
        }
        println!("{line}");
    }
}

fn created_date(record: &Record) -> String {
    match record.created_at_millis() {
        0 => "-".to_string(),
        millis => DateTime::from_timestamp_millis(millis)
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string()),
    }
}
