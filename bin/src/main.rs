//! fredtools CLI - Browse FRED economic data from the terminal.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use fredtools_lib::{API_KEY_ENV, BASE_URL_ENV, FredClient, FredConfig};
use std::path::PathBuf;
use std::time::Duration;

mod commands;
mod display;
mod logging;

use display::Format;

#[derive(Parser)]
#[command(name = "fredtools")]
#[command(about = "Browse FRED economic data", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// FRED API key
    #[arg(long, env = API_KEY_ENV, global = true, hide_env_values = true)]
    api_key: Option<String>,

    /// Base URL of the FRED API
    #[arg(long, env = BASE_URL_ENV, global = true)]
    base_url: Option<String>,

    /// Request timeout in seconds (0 waits indefinitely)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show series metadata
    Series {
        /// Series identifier (e.g., GNPCA, UNRATE)
        id: String,

        /// Also list categories, release and tags
        #[arg(long)]
        related: bool,
    },

    /// Export series observations
    Observations {
        /// Series identifier
        id: String,

        /// First observation date (YYYY-MM-DD)
        #[arg(short, long)]
        start: Option<String>,

        /// Last observation date (YYYY-MM-DD)
        #[arg(short, long)]
        end: Option<String>,

        /// Data transformation (e.g., lin, chg, pch)
        #[arg(long)]
        units: Option<String>,

        /// Aggregation frequency (e.g., m, q, a)
        #[arg(long)]
        frequency: Option<String>,

        /// Output file path. Defaults to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: Format,
    },

    /// Search series by text
    Search {
        /// Search text
        text: String,

        /// Maximum number of results
        #[arg(short, long, default_value = "20")]
        limit: u32,
    },

    /// Show a release
    Release {
        /// Release identifier
        id: i64,

        /// List publication dates
        #[arg(long)]
        dates: bool,

        /// List sources
        #[arg(long)]
        sources: bool,

        /// List series
        #[arg(long)]
        series: bool,
    },

    /// Print a release table as a tree
    Table {
        /// Release identifier
        release_id: i64,

        /// Element to start from. Defaults to the whole release
        #[arg(short, long)]
        element: Option<i64>,

        /// Include observation values
        #[arg(long)]
        values: bool,

        /// Observation date for values (YYYY-MM-DD)
        #[arg(long, requires = "values")]
        date: Option<String>,
    },

    /// Browse the category tree
    Category {
        /// Category identifier. Defaults to the root
        #[arg(default_value = "0")]
        id: i64,

        /// List series in the category
        #[arg(long)]
        series: bool,

        /// Maximum number of series
        #[arg(short, long, default_value = "20")]
        limit: u32,
    },

    /// Show a tag and its series
    Tag {
        /// Tag name (e.g., usa, gdp)
        name: String,

        /// List related tags instead of series
        #[arg(long)]
        related: bool,

        /// Maximum number of results
        #[arg(short, long, default_value = "20")]
        limit: u32,
    },
}

impl Cli {
    /// Builds the client from the global flags.
    fn client(&self) -> Result<FredClient> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .with_context(|| format!("No API key. Pass --api-key or set {API_KEY_ENV}"))?;

        let mut config = FredConfig::new(api_key);
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url);
        }
        if let Some(secs) = self.timeout {
            config = config.with_timeout((secs > 0).then(|| Duration::from_secs(secs)));
        }
        Ok(FredClient::new(config)?)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    // Show help if no command provided
    let Some(command) = &cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let client = cli.client()?;
    client.register_default();
    tracing::debug!(base_url = %client.config().base_url, "Client ready");

    let mut out = std::io::stdout().lock();
    match command {
        Commands::Series { id, related } => commands::series::show(&client, id, *related, &mut out),
        Commands::Observations {
            id,
            start,
            end,
            units,
            frequency,
            output,
            format,
        } => commands::observations::export(
            &client,
            id,
            &commands::observations::Filter {
                start: start.as_deref(),
                end: end.as_deref(),
                units: units.as_deref(),
                frequency: frequency.as_deref(),
            },
            output.as_deref(),
            *format,
            cli.quiet,
        ),
        Commands::Search { text, limit } => {
            commands::search::search(&client, text, *limit, &mut out)
        }
        Commands::Release {
            id,
            dates,
            sources,
            series,
        } => commands::release::show(
            &client,
            *id,
            &commands::release::Sections {
                dates: *dates,
                sources: *sources,
                series: *series,
            },
            &mut out,
        ),
        Commands::Table {
            release_id,
            element,
            values,
            date,
        } => commands::table::show(
            &client,
            *release_id,
            *element,
            *values,
            date.as_deref(),
            &mut out,
        ),
        Commands::Category { id, series, limit } => {
            commands::category::show(&client, *id, *series, *limit, &mut out)
        }
        Commands::Tag {
            name,
            related,
            limit,
        } => commands::tag::show(&client, name, *related, *limit, &mut out),
    }
}
