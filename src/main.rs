// PhotoDex - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Logging initialisation (debug mode support)
// 3. Index store creation and background worker spawn
// 4. HTTP server launch

use clap::Parser;
use photodex::app::indexer::{self, IndexConfig};
use photodex::core::store::IndexStore;
use photodex::server::{self, AppState};
use photodex::util::{self, constants};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

/// PhotoDex - self-hosted gallery server for date-named image folders.
///
/// Point PhotoDex at a directory of date-named folders (2024-01-15,
/// 2024.01.15, ...) and browse them in a web gallery while the index is
/// still being built.
#[derive(Parser, Debug)]
#[command(name = "PhotoDex", version, about)]
struct Cli {
    /// Root directory containing the date-named image folders.
    root: PathBuf,

    /// TCP port to listen on (localhost only).
    #[arg(short = 'p', long = "port", default_value_t = constants::DEFAULT_PORT)]
    port: u16,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    util::logging::init(cli.debug);

    tracing::info!(
        version = constants::APP_VERSION,
        root = %cli.root.display(),
        port = cli.port,
        "PhotoDex starting"
    );

    // The store is created before either side runs: the worker writes into
    // it, the handlers read from it. The scan starts immediately so the
    // gallery fills in while the server is already answering queries.
    let store = Arc::new(IndexStore::new());
    let _worker = indexer::spawn(cli.root.clone(), Arc::clone(&store), IndexConfig::default());

    let state = AppState {
        store,
        root: cli.root,
    };
    let addr = SocketAddr::from(([127, 0, 0, 1], cli.port));

    if let Err(e) = server::serve(addr, state).await {
        tracing::error!(error = %e, "Failed to run gallery server");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
