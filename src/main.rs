use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info, warn};

use cuisine_nutrition::config::Config;
use cuisine_nutrition::constants::CUISINE_COLUMN;
use cuisine_nutrition::pipeline::{aggregate, distinct_cuisines, distribution, filter, import};
use cuisine_nutrition::table::Table;
use cuisine_nutrition::tasks::{self, IngestResult, RecipeDbParams, TastyParams};
use cuisine_nutrition::types::{PlotKind, SourceKind};
use cuisine_nutrition::{logging, metrics};

#[derive(Parser)]
#[command(name = "cuisine_nutrition")]
#[command(about = "Recipe nutrition ingestion and per-cuisine comparison")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to a TOML config file (defaults to ./config.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write a Prometheus text snapshot of ingestion counters here on exit
    #[arg(long, global = true)]
    metrics_out: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch recipes from the Tasty API and export the normalized table
    FetchTasty {
        #[arg(long)]
        max: Option<usize>,
        #[arg(long)]
        page_size: Option<usize>,
    },
    /// Scrape RecipeDB result pages and export the normalized table
    ScrapeRecipedb {
        /// Cuisines to search (comma-separated)
        #[arg(long, value_delimiter = ',')]
        cuisines: Option<Vec<String>>,
        /// Result pages per cuisine
        #[arg(long)]
        pages: Option<usize>,
    },
    /// Run both ingestions sequentially
    Run,
    /// Clean the nutrition reference table and export it
    Reference {
        #[arg(long)]
        path: Option<PathBuf>,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Filter a normalized table by cuisine and print per-cuisine statistics
    Summarize {
        #[arg(long, value_enum)]
        source: SourceKind,
        /// Cuisines to keep (comma-separated); all when omitted
        #[arg(long, value_delimiter = ',')]
        cuisines: Vec<String>,
        /// Nutrient columns (comma-separated); the source's defaults when omitted
        #[arg(long, value_delimiter = ',')]
        columns: Vec<String>,
        #[arg(long, value_enum, value_delimiter = ',', default_value = "bar")]
        plots: Vec<PlotKind>,
    },
    /// List the cuisines present in a normalized table
    Cuisines {
        #[arg(long, value_enum)]
        source: SourceKind,
    },
}

fn print_ingest(result: &IngestResult) {
    println!("\n📊 Ingestion results for {}:", result.source);
    println!("   Recipes: {}", result.recipes);
    println!("   Output file: {}", result.output_file.display());
}

fn print_means(table: &Table, columns: &[&str]) -> anyhow::Result<()> {
    let rows = aggregate(table, columns)?;
    println!("\n{}: mean by cuisine", PlotKind::Bar.label());
    println!("   {:<28} {:>6} {}", "Cuisine", "n", columns.join(" | "));
    for row in rows {
        let means: Vec<String> = row
            .means
            .iter()
            .map(|(_, mean)| mean.map(|m| format!("{:.2}", m)).unwrap_or_else(|| "-".into()))
            .collect();
        println!("   {:<28} {:>6} {}", row.cuisine, row.count, means.join(" | "));
    }
    Ok(())
}

fn print_distributions(table: &Table, columns: &[&str], plot: PlotKind) -> anyhow::Result<()> {
    for column in columns {
        println!("\n{}: {} by cuisine", plot.label(), column);
        for d in distribution(table, column)? {
            println!(
                "   {:<28} n={:<5} min={:.2} q1={:.2} median={:.2} q3={:.2} max={:.2}",
                d.cuisine, d.count, d.min, d.q1, d.median, d.q3, d.max
            );
        }
    }
    Ok(())
}

fn print_pairs(table: &Table, columns: &[&str]) -> anyhow::Result<()> {
    println!("\n{}: {}", PlotKind::Pair.label(), columns.join(" vs "));
    let cuisine_idx = table.column_index(CUISINE_COLUMN)?;
    let indices = columns
        .iter()
        .map(|c| table.column_index(c))
        .collect::<Result<Vec<_>, _>>()?;
    for row in &table.rows {
        let values: Vec<&str> = indices.iter().map(|&i| row[i].as_str()).collect();
        println!("   {:<28} {}", row[cuisine_idx], values.join(" | "));
    }
    Ok(())
}

fn summarize(
    config: &Config,
    source: SourceKind,
    cuisines: &[String],
    columns: &[String],
    plots: &[PlotKind],
) -> anyhow::Result<()> {
    let path = config.output.table_path(source);
    let table = import(&path).with_context(|| format!("reading {}", path.display()))?;
    let filtered = filter(&table, cuisines)?;
    info!(source = %source, rows = filtered.len(), "Filtered table");

    let columns: Vec<&str> = if columns.is_empty() {
        source.nutrient_columns().to_vec()
    } else {
        columns.iter().map(String::as_str).collect()
    };

    println!("Rows: {} of {}", filtered.len(), table.len());
    for plot in plots {
        match plot {
            PlotKind::Bar => print_means(&filtered, &columns)?,
            PlotKind::Box | PlotKind::Violin => print_distributions(&filtered, &columns, *plot)?,
            PlotKind::Pair => print_pairs(&filtered, &columns)?,
        }
    }
    Ok(())
}

async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    match cli.command {
        Commands::FetchTasty { max, page_size } => {
            println!("🔄 Fetching Tasty recipes...");
            let params = TastyParams {
                max_recipes: max,
                page_size,
            };
            print_ingest(&tasks::ingest_tasty(&config, params).await?);
        }
        Commands::ScrapeRecipedb { cuisines, pages } => {
            println!("🔄 Scraping RecipeDB...");
            let params = RecipeDbParams {
                cuisines,
                page_limit: pages,
            };
            print_ingest(&tasks::ingest_recipedb(&config, params).await?);
        }
        Commands::Run => {
            println!("🚀 Running full ingestion...");

            println!("\n📥 Step 1: Tasty API");
            match tasks::ingest_tasty(&config, TastyParams::default()).await {
                Ok(result) => print_ingest(&result),
                Err(e) => error!("Tasty ingestion failed: {}", e),
            }

            println!("\n📥 Step 2: RecipeDB");
            print_ingest(&tasks::ingest_recipedb(&config, RecipeDbParams::default()).await?);
        }
        Commands::Reference { path, out } => {
            let written = tasks::build_reference(&config, path, out)?;
            println!("✅ Cleaned reference written to {}", written.display());
        }
        Commands::Summarize {
            source,
            cuisines,
            columns,
            plots,
        } => summarize(&config, source, &cuisines, &columns, &plots)?,
        Commands::Cuisines { source } => {
            let table = import(&config.output.table_path(source))?;
            for cuisine in distinct_cuisines(&table)? {
                println!("{}", cuisine);
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let _log_guard = logging::init_logging();
    metrics::init_metrics();

    let cli = Cli::parse();
    let config = Config::resolve(cli.config.as_deref())?;
    let metrics_out = cli.metrics_out.clone();

    let outcome = run(cli, config).await;

    if let Some(path) = metrics_out {
        match metrics::render() {
            Some(snapshot) => std::fs::write(&path, snapshot)
                .with_context(|| format!("writing metrics to {}", path.display()))?,
            None => warn!("Metrics recorder not installed, nothing written"),
        }
    }

    outcome
}
