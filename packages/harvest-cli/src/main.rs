//! CLI for the harvest pipeline.
//!
//! `harvest run` performs a full directory harvest and writes a
//! date-stamped CSV. `harvest probe` fetches one page and dumps its
//! JSON-LD blocks for debugging selectors and filters.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use harvest::{
    dated_filename, flatten, parse_blocks, write_csv_file, ColumnPolicy, EntityFilter,
    HarvestConfig, Harvester, HttpFetcher, PageFetcher, PlaceIndex,
};

#[derive(Parser)]
#[command(name = "harvest")]
#[command(about = "Harvest structured-data listings from a directory website")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline and write a CSV
    Run {
        /// State directory page listing per-city links
        directory_url: String,

        /// Newline-delimited reference list of valid place names
        #[arg(long)]
        places: PathBuf,

        /// Optional `alias = canonical` lines reconciling misspellings
        #[arg(long)]
        aliases: Option<PathBuf>,

        /// Output CSV path (default: `{stem}_{date}.csv` in the cwd)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Filename stem for the default dated output name
        #[arg(long, default_value = "pantries")]
        stem: String,

        /// CSS selector for city anchors on the directory page
        #[arg(long, default_value = "table a[href]")]
        link_selector: String,

        /// Concurrent city-page fetches
        #[arg(long, default_value_t = 4)]
        concurrency: usize,

        /// Visit at most this many city pages
        #[arg(long)]
        max_cities: Option<usize>,

        /// Optional newline-delimited fixed column list; default is the
        /// dynamic union of observed keys
        #[arg(long)]
        columns: Option<PathBuf>,

        /// Placeholder `name` values to reject as site metadata
        /// (overrides the built-in list when given)
        #[arg(long)]
        placeholder: Vec<String>,
    },

    /// Fetch one page and print its JSON-LD blocks
    Probe {
        /// Page URL
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            directory_url,
            places,
            aliases,
            output,
            stem,
            link_selector,
            concurrency,
            max_cities,
            columns,
            placeholder,
        } => {
            cmd_run(RunArgs {
                directory_url,
                places,
                aliases,
                output,
                stem,
                link_selector,
                concurrency,
                max_cities,
                columns,
                placeholder,
            })
            .await
        }
        Commands::Probe { url } => cmd_probe(&url).await,
    }
}

struct RunArgs {
    directory_url: String,
    places: PathBuf,
    aliases: Option<PathBuf>,
    output: Option<PathBuf>,
    stem: String,
    link_selector: String,
    concurrency: usize,
    max_cities: Option<usize>,
    columns: Option<PathBuf>,
    placeholder: Vec<String>,
}

async fn cmd_run(args: RunArgs) -> Result<()> {
    let mut places = PlaceIndex::from_file(&args.places)
        .with_context(|| format!("failed to load place list {}", args.places.display()))?;
    if let Some(path) = &args.aliases {
        places
            .load_aliases_from_file(path)
            .with_context(|| format!("failed to load aliases {}", path.display()))?;
    }
    anyhow::ensure!(!places.is_empty(), "place list is empty");

    let mut config = HarvestConfig::new(&args.directory_url)
        .with_link_selector(&args.link_selector)
        .with_concurrency(args.concurrency);
    if let Some(max) = args.max_cities {
        config = config.with_max_cities(max);
    }

    let filter = if args.placeholder.is_empty() {
        EntityFilter::default()
    } else {
        EntityFilter::new().with_placeholders(args.placeholder)
    };

    let harvester = Harvester::new(HttpFetcher::new(), config).with_filter(filter);
    let report = harvester.run(&places).await?;

    let policy = match &args.columns {
        Some(path) => ColumnPolicy::Fixed(load_columns(path)?),
        None => ColumnPolicy::Union,
    };

    let output = args.output.unwrap_or_else(|| {
        PathBuf::from(dated_filename(&args.stem, chrono::Local::now().date_naive()))
    });
    let written = write_csv_file(&output, &report.rows, &policy)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!("Wrote {} rows to {}", written, output.display());
    println!(
        "Pages fetched: {}, noise records dropped: {}",
        report.pages_fetched, report.noise_dropped
    );
    if !report.parse_failures.is_empty() {
        println!("Parse failures: {}", report.parse_failures.len());
        for failure in &report.parse_failures {
            println!("  {} - {}", failure.url, failure.error);
        }
    }
    if !report.failed_pages.is_empty() {
        println!("Skipped pages: {}", report.failed_pages.len());
        for page in &report.failed_pages {
            println!("  {} - {}", page.url, page.error);
        }
    }

    Ok(())
}

fn load_columns(path: &PathBuf) -> Result<Vec<String>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read column list {}", path.display()))?;
    let columns: Vec<String> = contents
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(String::from)
        .collect();
    anyhow::ensure!(!columns.is_empty(), "column list is empty");
    Ok(columns)
}

async fn cmd_probe(url: &str) -> Result<()> {
    let fetcher = HttpFetcher::new();
    let page = fetcher.fetch(url).await?;

    let blocks = harvest::extract_blocks(&page.html);
    println!("{} JSON-LD block(s) on {}", blocks.len(), page.url);

    let (records, failures) = parse_blocks(&page.url, &blocks);
    for (i, record) in records.iter().enumerate() {
        println!("--- block {} (parsed) ---", i + 1);
        match flatten(record) {
            Ok(flat) => println!("{}", serde_json::to_string_pretty(&flat)?),
            Err(e) => println!("flatten failed: {e}"),
        }
    }
    for failure in &failures {
        println!("--- parse failure ---");
        println!("{}: {}", failure.error, failure.snippet);
    }

    Ok(())
}
