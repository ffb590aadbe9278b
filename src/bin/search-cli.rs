use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::Value;

use search_client::config::{load_config, ClientConfig};
use search_client::observability::logging::init_logging;
use search_client::SearchClient;

#[derive(Parser)]
#[command(name = "search-cli")]
#[command(about = "Command-line access to a search cluster", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed server address; repeat for several. Overrides the config file.
    #[arg(short, long = "server")]
    servers: Vec<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the cluster answers
    Status,
    /// List indices and their aliases
    Aliases,
    /// Check whether indices exist
    Exists {
        /// Comma-separated index names
        indices: String,
    },
    /// Search with a JSON request body
    Search {
        index: String,
        types: String,
        body: String,
    },
    /// Count documents matching a query string
    Count {
        index: String,
        types: String,
        q: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ClientConfig::default(),
    };
    if !cli.servers.is_empty() {
        config.servers = cli.servers.clone();
    }
    init_logging(&config.observability);

    let client = SearchClient::new(config);

    let output = match cli.command {
        Commands::Status => {
            let available = client.available().await?;
            println!("available: {}", available);
            client.info().await?
        }
        Commands::Aliases => client.get_aliases().await?,
        Commands::Exists { indices } => {
            let names: Vec<&str> = indices.split(',').collect();
            Value::Bool(client.indices_exists(&names).await?)
        }
        Commands::Search { index, types, body } => {
            let body: Value = serde_json::from_str(&body)?;
            client.search(&index, &types, &body).await?
        }
        Commands::Count { index, types, q } => client.count(&index, &types, &q, None).await?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
