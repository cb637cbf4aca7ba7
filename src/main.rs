use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use backlog::config::Config;
use backlog::library::{
    self, filter_items, load_merged, present_in, status_counts, CategoryGroup, LoadError,
};
use backlog::session::Session;
use backlog::store::ReadStatusStore;
use backlog::util::{strip_control_chars, truncate_to_width};

/// Width budget for one title line in the listing.
const TITLE_WIDTH: usize = 72;

/// Get the config directory path (~/.config/backlog/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("backlog"))
}

#[derive(Parser, Debug)]
#[command(name = "backlog", about = "Reading-list dashboard over a spreadsheet export")]
struct Args {
    /// Path to the library CSV (overrides the config file)
    library: Option<PathBuf>,

    /// Path to the config file (default: ~/.config/backlog/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Reset the read-status store (delete and recreate empty)
    #[arg(long)]
    reset_state: bool,
}

fn main() -> Result<()> {
    // Initialize tracing for debug logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config_path = match args.config {
        Some(path) => path,
        None => get_config_dir()?.join("config.toml"),
    };
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    let library_path = args.library.unwrap_or(config.library);
    let store = ReadStatusStore::new(&config.read_status);

    // Handle --reset-state flag
    if args.reset_state && store.path().exists() {
        std::fs::remove_file(store.path()).context("Failed to delete read-status store")?;
        println!("Read-status store reset.");
    }

    store
        .ensure()
        .context("Failed to create read-status store")?;

    if !library_path.exists() {
        eprintln!("Error: No library file found at {}", library_path.display());
        eprintln!();
        eprintln!("To get started, export your reading list as CSV and either:");
        eprintln!("  backlog /path/to/reading-list.csv");
        eprintln!(
            "or point `library` at it in {}.",
            config_path.display()
        );
        std::process::exit(1);
    }

    // Schema and parse errors fail closed: report, show nothing
    let items = match load_merged(&library_path, &store) {
        Ok(items) => items,
        Err(err @ LoadError::MissingColumns { .. }) => {
            eprintln!("Error: {}", err);
            eprintln!(
                "Required columns: {}",
                library::REQUIRED_COLUMNS.join(", ")
            );
            std::process::exit(1);
        }
        Err(err) => {
            return Err(anyhow::anyhow!(err)
                .context(format!("Failed to load {}", library_path.display())));
        }
    };

    println!(
        "Loaded {} articles from {}",
        items.len(),
        library_path.display()
    );

    let mut session = Session::new(config.page_size);
    render(&items, &mut session);

    Ok(())
}

/// One synchronous pass: filter, count, paginate, print. Stands in for the
/// presentation layer a UI would bolt on top of the same calls.
fn render(items: &[library::Item], session: &mut Session) {
    let counts = status_counts(items, session.filter());
    println!(
        "Status: all {} | unread {} | read {}",
        counts.all, counts.unread, counts.read
    );

    for (group, heading) in [
        (CategoryGroup::Ai, "AI"),
        (CategoryGroup::NonAi, "Non-AI"),
    ] {
        let present = present_in(group, items);
        if present.is_empty() {
            continue;
        }
        println!("{}:", heading);
        for (label, count) in present {
            println!("  [ ] {} ({})", library::display_label(label), count);
        }
    }
    println!();

    let results = filter_items(items, session.filter());
    let total_pages = session.pager().total_pages(results.len());
    let page = session.current_page(&results);

    if page.is_empty() {
        println!("No articles.");
        return;
    }

    for item in page {
        let marker = if item.read { "x" } else { " " };
        let title = strip_control_chars(&item.title);
        println!("[{}] {}", marker, truncate_to_width(&title, TITLE_WIDTH));
        let date = item
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "N/A".to_string());
        let byline = match item.subtitle.as_deref() {
            Some(subtitle) => format!("{} — {}, {}", strip_control_chars(subtitle), item.author, date),
            None => format!("{}, {}", item.author, date),
        };
        println!("    {}", truncate_to_width(&byline, TITLE_WIDTH));
    }
    println!();
    println!("Page {} / {}", session.pager().page() + 1, total_pages);
}
