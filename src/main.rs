//! HTCPCP/1.0 server binary.
//!
//! Configuration comes from the environment: `PERCOLATE_ADDR` for the
//! listen address (default `127.0.0.1:2324`) and `PERCOLATE_CONFIG` for an
//! optional JSON file overriding the vocabulary and pot seed.

use std::net::SocketAddr;
use std::sync::Arc;

use percolate::config::BrewConfig;
use percolate::engine::BrewEngine;
use percolate::server::Server;
use tracing_subscriber::EnvFilter;

const DEFAULT_ADDR: &str = "127.0.0.1:2324";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::var("PERCOLATE_CONFIG") {
        Ok(path) => BrewConfig::from_path(&path)?,
        Err(_) => BrewConfig::default(),
    };

    let addr: SocketAddr = std::env::var("PERCOLATE_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()?;

    let engine = Arc::new(BrewEngine::new(config));
    let pots: Vec<String> = engine
        .registry()
        .into_iter()
        .map(|pot| pot.pot_id)
        .collect();
    tracing::info!(%addr, ?pots, "starting HTCPCP/1.0");

    println!("percolate: HTCPCP/1.0 listening on {addr}");
    println!(
        "  curl -X BREW http://{addr}/coffee/pot-1 \\\n       \
         -H 'Accept-Additions: milk-type=Whole-milk; alcohol-type=Whisky'"
    );

    Server::new(engine, addr).run().await?;
    Ok(())
}
