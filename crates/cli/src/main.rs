use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::{Value, json};
use tiernav_tui::TuiOptions;
use tiernav_types::{MenuDataset, MenuItem};
use tiernav_util::{MenuSource, default_log_path};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Browse a three-tier navigation menu in the terminal.
#[derive(Parser, Debug)]
#[command(name = "tiernav", version, about)]
struct Args {
    /// Menu file (.yaml, .yml or .json). Falls back to TIERNAV_MENU_PATH, then
    /// the built-in sample menu
    #[arg(long)]
    menu: Option<String>,

    /// Theme id or alias (slate, slate_hc, ansi256)
    #[arg(long)]
    theme: Option<String>,

    /// Service title to set at startup; the breadcrumb only shows for the
    /// service named in the menu file
    #[arg(long)]
    service: Option<String>,

    /// Validate the menu, print a JSON summary and exit
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let Args {
        menu,
        theme,
        service,
        check,
    } = Args::parse();

    let source = MenuSource::resolve(menu.as_deref());
    let dataset = source.load().with_context(|| format!("failed to load menu from {source}"))?;

    if check {
        println!("{}", serde_json::to_string_pretty(&summarize(&source, &dataset))?);
        return Ok(());
    }

    init_tracing(&default_log_path())?;
    info!(%source, "starting tiernav");
    tiernav_tui::run(
        dataset,
        TuiOptions {
            theme,
            service_title: service,
        },
    )
    .await
}

/// Sends tracing output to a file so it never lands on the alternate screen.
fn init_tracing(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("failed to create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn summarize(source: &MenuSource, dataset: &MenuDataset) -> Value {
    let (children, leaves) = dataset.data.iter().fold((0usize, 0usize), |(children, leaves), section| {
        (
            children + section.children.len(),
            leaves + section.children.iter().map(|child| child.children.len()).sum::<usize>(),
        )
    });
    json!({
        "source": source.to_string(),
        "title": dataset.title,
        "sections": dataset.data.iter().map(section_summary).collect::<Vec<_>>(),
        "counts": { "sections": dataset.data.len(), "children": children, "leaves": leaves },
        "duplicate_titles": dataset.duplicate_titles(),
        "settings": dataset.settings,
    })
}

fn section_summary(section: &MenuItem) -> Value {
    json!({
        "title": section.title,
        "link": section.link,
        "icon": section.icon().glyph(),
        "children": section.children.len(),
    })
}
