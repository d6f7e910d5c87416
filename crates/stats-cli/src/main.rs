//! Usage Stats CLI
//!
//! Command-line tool for fetching, viewing and exporting competitive usage statistics.

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use stats_client::{ClientConfig, StatsClient, DEFAULT_BASE_URL};
use stats_core::{
    parse_chaos_page, parse_leads_page, parse_metagame_page, parse_usage_page, Chaos,
    EntityStats, Format, Metagame, ParsedTable, Timeframe,
};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Client(#[from] stats_client::Error),

    #[error(transparent)]
    Core(#[from] stats_core::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no timeframes available")]
    NoTimeframe,

    #[error("'{0}' not found in chaos data")]
    EntityNotFound(String),
}

type Result<T> = std::result::Result<T, CliError>;

#[derive(Parser)]
#[command(name = "stats-cli")]
#[command(about = "Competitive usage statistics viewer", long_about = None)]
#[command(version)]
struct Cli {
    /// Root URL of the statistics tree
    #[arg(long, env = "STATS_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    base_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "STATS_TIMEOUT", default_value = "10", global = true)]
    timeout: u64,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available timeframes
    Timeframes {
        /// Only print the most recent timeframe
        #[arg(long)]
        latest: bool,
    },

    /// List formats of a timeframe
    Formats {
        /// Timeframe, e.g. 2019-01 (defaults to the latest)
        #[arg(short, long)]
        timeframe: Option<Timeframe>,

        /// List monotype formats instead
        #[arg(short, long)]
        monotype: bool,
    },

    /// Show the usage ranking of a format
    Usage {
        #[command(flatten)]
        target: Target,

        #[command(flatten)]
        output: TableOutput,
    },

    /// Show the lead ranking of a format
    Leads {
        #[command(flatten)]
        target: Target,

        #[command(flatten)]
        output: TableOutput,
    },

    /// Show metagame styles and stalliness
    Metagame {
        #[command(flatten)]
        target: Target,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show moveset (chaos) data
    Chaos {
        #[command(flatten)]
        target: Target,

        /// Show details for a single Pokemon
        #[arg(short, long)]
        pokemon: Option<String>,

        /// Maximum number of entries to display
        #[arg(short, long, default_value = "20")]
        limit: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fetch usage, leads and metagame together
    Report {
        #[command(flatten)]
        target: Target,

        /// Number of usage rows to display
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Parse a locally saved page
    Parse {
        /// Kind of page
        #[arg(short, long, value_enum)]
        kind: PageKind,

        /// Path to the page file
        #[arg(short, long)]
        file: PathBuf,

        /// Maximum number of rows to display
        #[arg(short, long)]
        limit: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(clap::Args)]
struct Target {
    /// Timeframe, e.g. 2019-01 (defaults to the latest)
    #[arg(short, long)]
    timeframe: Option<Timeframe>,

    /// Format, e.g. gen7ou-1500
    #[arg(short, long)]
    format: Format,
}

#[derive(clap::Args)]
struct TableOutput {
    /// Maximum number of rows to display
    #[arg(short, long)]
    limit: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Also export the table to a CSV file
    #[arg(long)]
    csv: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum PageKind {
    Usage,
    Leads,
    Metagame,
    Chaos,
}

#[derive(Serialize)]
struct Report<'a> {
    timeframe: String,
    format: String,
    usages: &'a stats_core::Usages,
    leads: &'a stats_core::Leads,
    metagame: &'a Metagame,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = ClientConfig {
        base_url: cli.base_url,
        timeout: Duration::from_secs(cli.timeout),
        ..ClientConfig::default()
    };

    let client = StatsClient::new(config)?;

    match cli.command {
        Commands::Parse {
            kind,
            file,
            limit,
            json,
        } => cmd_parse(kind, &file, limit, json),
        Commands::Timeframes { latest } => cmd_timeframes(&client, latest).await,
        Commands::Formats { timeframe, monotype } => {
            let timeframe = resolve_timeframe(&client, timeframe).await?;
            cmd_formats(&client, &timeframe, monotype).await
        }
        Commands::Usage { target, output } => {
            let timeframe = resolve_timeframe(&client, target.timeframe).await?;
            let usages = client.fetch_usages(&timeframe, &target.format).await?;
            println!("Total battles: {}", usages.total);
            println!("Avg. weight/team: {}", usages.weight);
            println!();
            show_table(&usages.data, &usages, &output)
        }
        Commands::Leads { target, output } => {
            let timeframe = resolve_timeframe(&client, target.timeframe).await?;
            let leads = client.fetch_leads(&timeframe, &target.format).await?;
            println!("Total leads: {}", leads.total);
            println!();
            show_table(&leads.data, &leads, &output)
        }
        Commands::Metagame { target, json } => {
            let timeframe = resolve_timeframe(&client, target.timeframe).await?;
            let metagame = client.fetch_metagame(&timeframe, &target.format).await?;
            if json {
                print_json(&metagame)
            } else {
                print_metagame(&metagame);
                Ok(())
            }
        }
        Commands::Chaos {
            target,
            pokemon,
            limit,
            json,
        } => {
            let timeframe = resolve_timeframe(&client, target.timeframe).await?;
            let chaos = client.fetch_movesets(&timeframe, &target.format).await?;
            cmd_chaos(&chaos, pokemon.as_deref(), limit, json)
        }
        Commands::Report {
            target,
            limit,
            json,
        } => {
            let timeframe = resolve_timeframe(&client, target.timeframe).await?;
            cmd_report(&client, &timeframe, &target.format, limit, json).await
        }
    }
}

async fn resolve_timeframe(client: &StatsClient, timeframe: Option<Timeframe>) -> Result<Timeframe> {
    match timeframe {
        Some(timeframe) => Ok(timeframe),
        None => {
            let latest = client
                .fetch_latest_timeframe()
                .await?
                .ok_or(CliError::NoTimeframe)?;
            tracing::info!(%latest, "using latest timeframe");
            Ok(latest)
        }
    }
}

async fn cmd_timeframes(client: &StatsClient, latest: bool) -> Result<()> {
    if latest {
        let timeframe = client
            .fetch_latest_timeframe()
            .await?
            .ok_or(CliError::NoTimeframe)?;
        println!("{}", timeframe);
        return Ok(());
    }

    let timeframes = client.fetch_timeframes().await?;
    println!("Timeframes ({}):", timeframes.len());
    for timeframe in &timeframes {
        println!("  {}", timeframe);
    }

    Ok(())
}

async fn cmd_formats(client: &StatsClient, timeframe: &Timeframe, monotype: bool) -> Result<()> {
    let formats = client.fetch_formats(timeframe, monotype).await?;

    println!("Formats for {} ({}):", timeframe, formats.len());
    for format in &formats {
        println!("  {}", format);
    }

    Ok(())
}

async fn cmd_report(
    client: &StatsClient,
    timeframe: &Timeframe,
    format: &Format,
    limit: usize,
    json: bool,
) -> Result<()> {
    let (usages, leads, metagame) = tokio::try_join!(
        client.fetch_usages(timeframe, format),
        client.fetch_leads(timeframe, format),
        client.fetch_metagame(timeframe, format),
    )?;

    if json {
        return print_json(&Report {
            timeframe: timeframe.to_string(),
            format: format.to_string(),
            usages: &usages,
            leads: &leads,
            metagame: &metagame,
        });
    }

    println!("{} / {}", timeframe, format);
    println!("Total battles: {}", usages.total);
    println!("Total leads: {}", leads.total);
    println!(
        "Stalliness: mean {}, one # = {}%",
        metagame.stalliness.mean, metagame.stalliness.one
    );
    println!();

    println!("Top usage:");
    for usage in usages.entries().iter().take(limit) {
        println!("  {:>4}  {:<24} {:>8.3}%", usage.rank, usage.pokemon, usage.usage_percentage);
    }
    println!();

    println!("Top leads:");
    for lead in leads.entries().iter().take(limit) {
        println!("  {:>4}  {:<24} {:>8.3}%", lead.rank, lead.pokemon, lead.usage_percentage);
    }

    Ok(())
}

fn cmd_parse(kind: PageKind, file: &Path, limit: Option<usize>, json: bool) -> Result<()> {
    let page = fs::read_to_string(file)?;
    tracing::debug!(path = %file.display(), bytes = page.len(), "read page file");

    match kind {
        PageKind::Usage => {
            let usages = parse_usage_page(&page)?;
            if json {
                return print_json(&usages);
            }
            println!("Total battles: {}", usages.total);
            println!("Avg. weight/team: {}", usages.weight);
            println!();
            print_table(&usages.data, limit);
        }
        PageKind::Leads => {
            let leads = parse_leads_page(&page)?;
            if json {
                return print_json(&leads);
            }
            println!("Total leads: {}", leads.total);
            println!();
            print_table(&leads.data, limit);
        }
        PageKind::Metagame => {
            let metagame = parse_metagame_page(&page)?;
            if json {
                return print_json(&metagame);
            }
            print_metagame(&metagame);
        }
        PageKind::Chaos => {
            let chaos = parse_chaos_page(&page)?;
            cmd_chaos(&chaos, None, limit.unwrap_or(20), json)?;
        }
    }

    Ok(())
}

fn cmd_chaos(chaos: &Chaos, pokemon: Option<&str>, limit: usize, json: bool) -> Result<()> {
    if let Some(name) = pokemon {
        let stats = chaos
            .entity(name)
            .ok_or_else(|| CliError::EntityNotFound(name.to_string()))?;
        if json {
            return print_json(stats);
        }
        print_entity(name, stats, limit);
        return Ok(());
    }

    if json {
        return print_json(chaos);
    }

    println!("Metagame: {}", chaos.info.metagame);
    println!("Battles: {}", chaos.info.number_of_battles);
    println!("Cutoff: {}", chaos.info.cutoff);
    println!();

    let mut entities: Vec<(&String, &EntityStats)> = chaos.data.iter().collect();
    entities.sort_by(|a, b| b.1.usage.total_cmp(&a.1.usage));

    for (name, stats) in entities.iter().take(limit) {
        println!("  {:<24} {:>8.5}  ({} raw)", name, stats.usage, stats.raw_count);
    }
    if entities.len() > limit {
        println!("... ({} more)", entities.len() - limit);
    }

    Ok(())
}

fn show_table<T: Serialize>(table: &ParsedTable, page: &T, output: &TableOutput) -> Result<()> {
    if let Some(path) = &output.csv {
        let file = File::create(path)?;
        table.write_csv(BufWriter::new(file))?;
        eprintln!("Exported {} rows to {}", table.row_count(), path.display());
    }

    if output.json {
        return print_json(page);
    }

    print_table(table, output.limit);
    Ok(())
}

fn print_table(table: &ParsedTable, limit: Option<usize>) {
    println!("{}", table.header.join("\t"));
    println!("{}", "-".repeat(table.column_count() * 12));

    let row_limit = limit.unwrap_or(table.row_count());
    for row in table.rows.iter().take(row_limit) {
        let values: Vec<String> = row.iter().map(|v| v.to_string_value()).collect();
        println!("{}", values.join("\t"));
    }

    if table.row_count() > row_limit {
        println!("... ({} more rows)", table.row_count() - row_limit);
    }
}

fn print_metagame(metagame: &Metagame) {
    println!("Styles:");
    for (name, frequency) in &metagame.style {
        println!("  {:<24} {:>9.5}%", name, frequency);
    }
    println!();
    println!("Stalliness (mean): {}", metagame.stalliness.mean);
    println!("One # = {}%", metagame.stalliness.one);
}

fn print_entity(name: &str, stats: &EntityStats, limit: usize) {
    println!("{}", name);
    println!("Usage: {}", stats.usage);
    println!("Raw count: {}", stats.raw_count);
    println!("Viability ceiling: {:?}", stats.viability_ceiling);

    print_weights("Abilities", stats.abilities.iter(), limit);
    print_weights("Items", stats.items.iter(), limit);
    print_weights("Moves", stats.moves.iter(), limit);
    print_weights("Teammates", stats.teammates.iter(), limit);

    let mut spreads: Vec<_> = stats.spreads.iter().collect();
    spreads.sort_by(|a, b| b.1.total_cmp(&a.1));
    println!();
    println!("Spreads:");
    for (spread, weight) in spreads.into_iter().take(limit) {
        println!("  {:<32} {:>10.3}", spread.to_string(), weight);
    }
}

fn print_weights<'a>(title: &str, weights: impl Iterator<Item = (&'a String, &'a f64)>, limit: usize) {
    let mut weights: Vec<_> = weights.collect();
    weights.sort_by(|a, b| b.1.total_cmp(a.1));

    println!();
    println!("{}:", title);
    for (name, weight) in weights.into_iter().take(limit) {
        println!("  {:<24} {:>10.3}", name, weight);
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
