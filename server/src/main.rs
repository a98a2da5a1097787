//! apiforge server binary.
//!
//! Usage:
//!   apiforge-server --port 5055 --data-file apiforge-state.json
//!
//! Upload a document and schema to POST /api/validate, then use the
//! generated REST endpoints under /api/{resource} and the GraphQL
//! endpoint at /graphql.

use anyhow::{Context, Result};
use apiforge_server::build_router;
use apiforge_store::StoreService;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "apiforge-server")]
#[command(about = "Schema-driven CRUD API server (REST + GraphQL)")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "5055")]
    port: u16,

    /// Path to the persisted state file
    #[arg(short, long, default_value = "apiforge-state.json")]
    data_file: PathBuf,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .init();

    info!("apiforge server starting...");
    let store = Arc::new(StoreService::open(&args.data_file));
    let app = build_router(store);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", args.port))
        .await
        .with_context(|| format!("failed to bind port {}", args.port))?;
    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
