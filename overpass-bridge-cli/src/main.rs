//! Overpass Bridge CLI - Command-line interface
//!
//! This binary fronts the `overpass-bridge` library from the command line:
//! `query` runs a query and prints the aggregated response as JSON;
//! `stream` prints one JSON element per line as records arrive from
//! upstream. Ctrl-C during a stream aborts the in-flight upstream call.

use std::process;

use clap::{Parser, Subcommand};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;

use overpass_bridge::client::ReqwestClient;
use overpass_bridge::logging;
use overpass_bridge::query::QueryRequest;
use overpass_bridge::service::{
    forward_elements, OverpassService, ServiceConfig, DEFAULT_BASE_URL,
    DEFAULT_HTTP_TIMEOUT_SECS,
};

#[derive(Parser)]
#[command(name = "overpass-bridge")]
#[command(version = overpass_bridge::VERSION)]
#[command(about = "Typed queries against an Overpass API endpoint", long_about = None)]
struct Args {
    /// Upstream Overpass base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    url: String,

    /// Server-side query timeout in seconds (0 uses the default of 180)
    #[arg(long, default_value_t = 0)]
    timeout: u32,

    /// Outbound HTTP timeout ceiling in seconds
    #[arg(long, default_value_t = DEFAULT_HTTP_TIMEOUT_SECS)]
    http_timeout: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a query and print the aggregated response as JSON
    Query {
        /// Overpass QL fragment, e.g. 'node["amenity"="cafe"](50.6,7.0,50.8,7.3);out;'
        query: String,
    },
    /// Run a query and print one JSON element per line as records arrive
    Stream {
        /// Overpass QL fragment
        query: String,
    },
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let _guard = match logging::init_logging("logs", "overpass-bridge.log") {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: failed to initialize logging: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = run(args).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = ServiceConfig::new()
        .with_base_url(args.url)
        .with_http_timeout_secs(args.http_timeout);
    let client = ReqwestClient::new(config.http_timeout_secs())?;
    let service = OverpassService::new(config, client);

    match args.command {
        Command::Query { query } => {
            let request = QueryRequest::new(query).with_timeout_secs(args.timeout);
            let response = service.query(&request).await?;
            info!(
                elements = response.elements.len(),
                generator = %response.metadata.generator,
                "query complete"
            );
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Command::Stream { query } => {
            let request = QueryRequest::new(query).with_timeout_secs(args.timeout);
            let stream = service.stream_query(&request).await?;

            let cancel = CancellationToken::new();
            let ctrl_c_cancel = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    ctrl_c_cancel.cancel();
                }
            });

            let (tx, mut rx) = mpsc::channel(16);
            let forward = tokio::spawn(forward_elements(stream, tx, cancel));

            while let Some(element) = rx.recv().await {
                println!("{}", serde_json::to_string(&element)?);
            }

            let sent = forward.await??;
            info!(elements = sent, "stream finished");
        }
    }

    Ok(())
}
