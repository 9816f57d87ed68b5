//! TODO API server entry point
//!
//! Thin glue: parse flags, configure logging, bind, serve. All
//! decision-making lives in the library.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use todo_server::{router, Result, TodoStorage};

/// TODO API server backed by a single JSON file
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Server host
    #[arg(long, default_value = "localhost")]
    host: String,

    /// Server port
    #[arg(short, long, default_value_t = 8888)]
    port: u16,

    /// Path to the todo JSON file
    #[arg(short, long, default_value = "todoServer.json")]
    file: PathBuf,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if let Err(e) = run(args).await {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let storage = Arc::new(TodoStorage::new(&args.file));
    let app = router(storage);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!(port = args.port, file = %args.file.display(), "local server starting");
    axum::serve(listener, app).await?;

    Ok(())
}
