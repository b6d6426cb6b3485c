// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use numpick::{
    FilterArgs, FilterReport, Labels, Recommender, StorageArgs, DEFAULT_GENERATE_COUNT,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "numpick", version, about = "Recommend 5-digit codes from a candidate pool")]
struct Cli {
    #[command(flatten)]
    storage: StorageArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive terminal UI (default)
    Tui,

    /// Print stage counts and every available code
    Show {
        #[command(flatten)]
        filters: FilterArgs,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Draw codes at random and save them to history
    Generate {
        #[command(flatten)]
        filters: FilterArgs,

        /// How many codes to draw
        #[arg(long, short = 'n', default_value_t = DEFAULT_GENERATE_COUNT)]
        count: usize,

        /// Seed for a reproducible draw
        #[arg(long)]
        seed: Option<u64>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Delete the history file
    Clear,

    /// Print the saved history
    History {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout is reserved for output and the TUI
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let recommender = cli.storage.recommender();
    let labels = cli.storage.lang.labels();

    match cli.command.unwrap_or(Command::Tui) {
        Command::Tui => run_ui_mode(recommender, &cli.storage),
        Command::Show { filters, json } => run_show(&recommender, labels, &filters, json),
        Command::Generate {
            filters,
            count,
            seed,
            json,
        } => run_generate(&recommender, labels, &filters, count, seed, json),
        Command::Clear => {
            recommender
                .clear_history()
                .context("Failed to clear history")?;
            println!("{}", labels.history_cleared);
            Ok(())
        }
        Command::History { json } => run_history(&recommender, json),
    }
}

fn run_show(recommender: &Recommender, labels: &Labels, filters: &FilterArgs, json: bool) -> Result<()> {
    let criteria = filters.to_criteria()?;
    let report = recommender
        .evaluate(&criteria)
        .with_context(|| format!("Failed to load {}", recommender.pool_path().display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if !print_counts(labels, &report) {
        return Ok(());
    }

    println!();
    println!("{}", labels.all_numbers);
    for row in report.candidates.chunks(10) {
        let line: Vec<&str> = row.iter().map(|code| code.as_str()).collect();
        println!("  {}", line.join("  "));
    }

    Ok(())
}

fn run_generate(
    recommender: &Recommender,
    labels: &Labels,
    filters: &FilterArgs,
    count: usize,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    let criteria = filters.to_criteria()?;
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let generation = match recommender.generate(&criteria, count, &mut rng) {
        Ok(generation) => generation,
        Err(err) => {
            // Empty candidate sets halt this attempt only
            if let Some(message) = labels.no_candidates(&err) {
                eprintln!("⚠️  {}", message);
                return Ok(());
            }
            return Err(err).context("Generation failed");
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&generation)?);
        return Ok(());
    }

    print_counts(labels, &generation.report);
    println!();
    println!("{}", labels.selection_title);
    for code in &generation.selection {
        println!("  {}", code);
    }
    println!();
    println!("✓ {}", labels.history_saved);

    Ok(())
}

fn run_history(recommender: &Recommender, json: bool) -> Result<()> {
    let history = recommender.load_history().context("Failed to load history")?;

    if json {
        println!("{}", serde_json::to_string_pretty(history.codes())?);
        return Ok(());
    }

    println!("{} entries in {}", history.len(), recommender.history_store().path().display());
    for code in history.codes() {
        println!("  {}", code);
    }

    Ok(())
}

/// Print stage counts. Returns false when a stage left nothing.
fn print_counts(labels: &Labels, report: &FilterReport) -> bool {
    println!("{}", Labels::count(labels.pool_total, report.pool_total));
    println!("{}", Labels::count(labels.filtered_remaining, report.after_sequential));

    if let Err(err) = report.ensure_candidates() {
        if report.after_sequential > 0 {
            println!("{}", Labels::count(labels.filtered_count, report.after_attributes));
        }
        if let Some(message) = labels.no_candidates(&err) {
            eprintln!("⚠️  {}", message);
        }
        return false;
    }

    println!("{}", Labels::count(labels.filtered_count, report.after_attributes));
    true
}

#[cfg(feature = "tui")]
fn run_ui_mode(recommender: Recommender, storage: &StorageArgs) -> Result<()> {
    // Pool must exist before any controls are drawn
    let mut app = ui::App::new(recommender, storage.lang)
        .with_context(|| format!("Cannot start: {}", storage.pool.display()))?;

    ui::run_ui(&mut app)?;

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_recommender: Recommender, _storage: &StorageArgs) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use: numpick show / numpick generate");
    std::process::exit(1);
}
