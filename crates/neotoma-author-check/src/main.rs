//! Neotoma Author Check - Entry Point
//!
//! Serves the review workflow over HTTP or prints a single page to the terminal.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use neotoma_author_check::{
    config::{Config, api},
    formatters,
    review::ReviewService,
    server::ReviewServer,
};

#[derive(Parser, Debug)]
#[command(name = "neotoma-author-check")]
#[command(about = "Compare Neotoma and OpenAlex author lists, one publication at a time")]
#[command(version)]
struct Cli {
    /// Directory holding verified.json and problematic.json
    #[arg(long, default_value = ".", env = "NEOTOMA_REVIEW_DATA_DIR", global = true)]
    data_dir: PathBuf,

    /// Neotoma API base URL
    #[arg(long, default_value = api::NEOTOMA_API, env = "NEOTOMA_API_URL", global = true)]
    neotoma_url: String,

    /// OpenAlex API base URL
    #[arg(long, default_value = api::OPENALEX_API, env = "OPENALEX_API_URL", global = true)]
    openalex_url: String,

    /// Contact address for the OpenAlex polite pool
    #[arg(long, env = "OPENALEX_MAILTO", global = true)]
    mailto: Option<String>,

    /// Pages the navigator may skip before giving up
    #[arg(long, default_value_t = api::MAX_SKIP_STEPS, env = "NEOTOMA_MAX_SKIP_STEPS", global = true)]
    max_skip_steps: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG", global = true)]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve page views and accept verdicts over HTTP
    Serve {
        /// HTTP server port
        #[arg(long, default_value = "5000", env = "PORT")]
        port: u16,
    },
    /// Print one comparison as Markdown
    Show {
        /// Page to show (defaults to the first reviewable page)
        #[arg(long)]
        page: Option<u32>,
    },
    /// Print verdict counts
    Stats,
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    // stdout is reserved for `show` and `stats` output.
    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)).init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        data_dir = %cli.data_dir.display(),
        command = ?cli.command,
        "Starting Neotoma author check"
    );

    let mut config = Config::new(cli.mailto, cli.data_dir);
    config.neotoma_api_url = cli.neotoma_url;
    config.openalex_api_url = cli.openalex_url;
    config.max_skip_steps = cli.max_skip_steps;

    if !config.has_mailto() {
        tracing::warn!("No OPENALEX_MAILTO set, OpenAlex requests use the common pool");
    }

    let service = ReviewService::from_config(&config)?;

    match cli.command {
        Command::Serve { port } => {
            ReviewServer::new(service).run_http(port).await?;
        }
        Command::Show { page } => {
            let view = match page {
                Some(page) => service.page_view(page).await,
                None => service.landing_view().await,
            };
            println!("{}", formatters::format_page_markdown(&view));
        }
        Command::Stats => {
            let stats = service.stats().await;
            println!("{}", formatters::format_stats_markdown(&stats));
        }
    }

    Ok(())
}
