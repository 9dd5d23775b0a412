//! Command Line Interface for the vault analytics service.
use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use std::env;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use vault_analytics::prelude::*;
use vault_api::{ApiServer, AppState, ServerConfig};
use vault_data::{Database, HttpTvlSource, PostgresStateStore};
use vault_domain::prelude::*;

#[derive(Parser)]
#[command(name = "vault-cli")]
#[command(about = "Vault analytics: unit conversion and APY estimation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Format raw minor units as a decimal string
    Format {
        /// Raw amount in minor units (e.g. 1234500000000000000)
        raw: String,

        /// Token precision
        #[arg(short, long, default_value_t = DEFAULT_DECIMALS)]
        decimals: u32,
    },
    /// Parse a decimal string into minor units
    Parse {
        /// Decimal amount (e.g. 1.2345)
        value: String,

        /// Token precision
        #[arg(short, long, default_value_t = DEFAULT_DECIMALS)]
        decimals: u32,
    },
    /// Sample the vault APY estimator
    Apy {
        /// TVL endpoint URL (defaults to VAULT_TVL_URL)
        #[arg(long)]
        url: Option<String>,

        /// Fixed TVL reading instead of an endpoint
        #[arg(long)]
        tvl: Option<f64>,

        /// Number of observations to take
        #[arg(short, long, default_value_t = 2)]
        samples: u32,

        /// Seconds to wait between observations
        #[arg(short, long, default_value_t = 5)]
        interval: u64,

        /// Session key to record state under
        #[arg(long, default_value = DEFAULT_SESSION_KEY)]
        session: String,
    },
    /// Run the API server
    Serve {
        /// Interface to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind
        #[arg(short, long, default_value_t = 3000)]
        port: u16,

        /// PostgreSQL connection string (defaults to DATABASE_URL)
        #[arg(long)]
        database_url: Option<String>,

        /// TVL endpoint URL (defaults to VAULT_TVL_URL)
        #[arg(long)]
        url: Option<String>,

        /// Fixed TVL reading instead of an endpoint
        #[arg(long)]
        tvl: Option<f64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Format { raw, decimals } => {
            println!("{}", format_units(raw.as_str(), decimals));
        }
        Commands::Parse { value, decimals } => {
            let amount = parse_units(&value, decimals)?;
            match amount.to_decimal(decimals) {
                Some(decimal) => println!("{amount} ({decimal})"),
                None => println!("{amount}"),
            }
        }
        Commands::Apy {
            url,
            tvl,
            samples,
            interval,
            session,
        } => {
            let source = tvl_source(url, tvl)?;
            let service = ApyService::new(Arc::new(InMemoryStateStore::new()), source);

            for n in 0..samples {
                if n > 0 {
                    tokio::time::sleep(Duration::from_secs(interval)).await;
                }
                let estimate = service.sample(&session).await?;
                println!(
                    "📈 sample {}: {}",
                    n + 1,
                    serde_json::to_string(&estimate)?
                );
            }
        }
        Commands::Serve {
            host,
            port,
            database_url,
            url,
            tvl,
        } => {
            let store = state_store(database_url).await?;
            let source = tvl_source(url, tvl)?;
            let service = ApyService::new(store, source);

            let config = ServerConfig { host, port };
            println!("🚀 Serving vault analytics on {}", config.bind_addr());
            ApiServer::new(config, AppState::new(Arc::new(service)))
                .serve()
                .await?;
        }
    }

    Ok(())
}

/// Picks the TVL source: explicit URL, then VAULT_TVL_URL, then a fixed
/// reading.
fn tvl_source(url: Option<String>, tvl: Option<f64>) -> Result<Arc<dyn TvlSource>> {
    if let Some(url) = url.or_else(|| env::var("VAULT_TVL_URL").ok()) {
        info!(url = %url, "using HTTP TVL source");
        return Ok(Arc::new(HttpTvlSource::new(url)));
    }
    match tvl {
        Some(tvl) => Ok(Arc::new(StaticTvlSource::new(tvl))),
        None => bail!("no TVL source: pass --url/--tvl or set VAULT_TVL_URL"),
    }
}

/// Picks the state store: Postgres when a connection string is available,
/// in-memory otherwise.
async fn state_store(database_url: Option<String>) -> Result<Arc<dyn ApyStateStore>> {
    match database_url.or_else(|| env::var("DATABASE_URL").ok()) {
        Some(database_url) => {
            let database = Database::connect(&database_url).await?;
            database.migrate().await?;
            info!("using PostgreSQL state store");
            Ok(Arc::new(PostgresStateStore::new(database.apy_states())))
        }
        None => {
            info!("no DATABASE_URL set; using in-memory state store");
            Ok(Arc::new(InMemoryStateStore::new()))
        }
    }
}
