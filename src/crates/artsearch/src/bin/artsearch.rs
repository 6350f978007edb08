//! artsearch CLI - natural-language artwork search
//!
//! Serves the search API or runs a single search from the command line.

use std::net::SocketAddr;

use anyhow::Context;
use artsearch::api::create_router;
use artsearch::cli;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "artsearch")]
#[command(about = "Search an artwork catalog in plain language", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP search service
    Serve {
        /// Address to bind
        #[arg(long, env = "HOST", default_value = "127.0.0.1")]
        host: String,
        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value_t = 8080)]
        port: u16,
    },

    /// Run one search and print the result as JSON
    Search {
        /// What to look for, e.g. "red paintings by picasso"
        query: String,
        /// Cursor from a previous page's pageInfo.endCursor
        #[arg(short, long)]
        after: Option<String>,
    },

    /// Print the filters and compiled query without calling the catalog
    Compile {
        query: String,
        #[arg(short, long)]
        after: Option<String>,
        /// Skip the model and search the raw query as a keyword
        #[arg(long)]
        offline: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tooling::logging::init_tracing("info")?;

    let args = Cli::parse();

    match args.command {
        Commands::Serve { host, port } => serve(host, port).await,
        Commands::Search { query, after } => {
            println!("{}", cli::handle_search(query, after).await?);
            Ok(())
        }
        Commands::Compile { query, after, offline } => {
            println!("{}", cli::handle_compile(query, after, offline).await?);
            Ok(())
        }
    }
}

async fn serve(host: String, port: u16) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", host, port))?;

    let app = create_router(cli::service_state_from_env());

    tracing::info!("Starting artsearch server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("artsearch server shut down gracefully");
    Ok(())
}

/// Signal for graceful shutdown (Ctrl-C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install CTRL-C signal handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received CTRL-C signal, shutting down");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, shutting down");
        }
    }
}
