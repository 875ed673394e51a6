//! `route-table` command line.
//!
//! Loads a TOML route file and matches requests against it, renders URLs,
//! or serves matches for `METHOD URI` lines read from stdin while
//! hot-reloading the file.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};

use route_table::config::{build_collection, load_config, ConfigWatcher};
use route_table::observability::init_logging;
use route_table::routing::{RouteError, SharedRouter};

#[derive(Parser)]
#[command(name = "route-table")]
#[command(about = "Match requests and render URLs from a route file", long_about = None)]
struct Cli {
    /// Route file (TOML).
    #[arg(short, long, default_value = "routes.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List routes in match order
    List,
    /// Match a single request
    Match {
        /// HTTP method
        method: String,
        /// Request URI (path or absolute URI)
        uri: String,
    },
    /// Render the URL of a named route
    Render {
        /// Route name
        name: String,
        /// Parameter values as key=value
        #[arg(value_parser = parse_key_value)]
        params: Vec<(String, String)>,
    },
    /// Match `METHOD URI` lines from stdin, reloading the route file on change
    Serve,
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got {:?}", s))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;
    init_logging(&config.logging)?;

    tracing::info!(
        path = ?cli.config,
        routes = config.routes.len(),
        cache_patterns = config.matching.cache_patterns,
        "Route file loaded"
    );

    let collection = build_collection(&config)?;

    match cli.command {
        Commands::List => {
            for entry in &collection {
                println!(
                    "{}\t{}\t{}\t{}",
                    entry.name,
                    entry.route.methods(),
                    entry.route.uri(),
                    entry.target
                );
            }
        }
        Commands::Match { method, uri } => {
            let matched = collection.match_request(&method, &uri)?;
            println!("{}", serde_json::to_string_pretty(&matched)?);
        }
        Commands::Render { name, params } => {
            let values: HashMap<String, String> = params.into_iter().collect();
            println!("{}", collection.url_for(&name, &values)?);
        }
        Commands::Serve => {
            let router = Arc::new(SharedRouter::new(collection));
            let (watcher, updates) = ConfigWatcher::new(&cli.config);
            let _watcher = watcher.run()?;
            let reload = Arc::clone(&router).spawn_reload(updates);

            serve_stdin(&router).await?;

            reload.abort();
            tracing::info!("Shutdown complete");
        }
    }

    Ok(())
}

async fn serve_stdin(router: &SharedRouter<String>) -> Result<(), Box<dyn std::error::Error>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some((method, uri)) = line.split_once(char::is_whitespace) else {
            eprintln!("expected `METHOD URI`, got {:?}", line);
            continue;
        };

        match router.match_request(method, uri.trim()) {
            Ok(matched) => println!("{}", serde_json::to_string(&matched)?),
            Err(e @ RouteError::NotFound { .. }) => {
                println!("{}", serde_json::json!({ "error": e.to_string() }));
            }
            Err(e) => {
                tracing::error!(method, uri, "Match failed: {}", e);
                println!("{}", serde_json::json!({ "error": e.to_string() }));
            }
        }
    }

    Ok(())
}
