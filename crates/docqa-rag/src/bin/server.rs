//! Document Q&A server binary
//!
//! Run with: cargo run -p docqa-rag --bin docqa-rag-server -- --config docqa.toml

use clap::Parser;
use docqa_rag::{config::RagConfig, server::RagServer};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Document question-answering service
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// TOML configuration file (falls back to $DOCQA_CONFIG, then defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listen address
    #[arg(long)]
    host: Option<String>,

    /// Override the listen port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docqa_rag=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = RagConfig::load(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    tracing::info!("Configuration loaded");
    tracing::info!("  - Embedding model: {}", config.embeddings.model);
    tracing::info!("  - Embedding dimensions: {}", config.embeddings.dimensions);
    tracing::info!("  - LLM model: {}", config.llm.generate_model);
    tracing::info!(
        "  - Chunking: {} chars, {} overlap",
        config.chunking.chunk_size,
        config.chunking.chunk_overlap
    );
    tracing::info!("  - Vector backend: {:?}", config.vector_db.backend);

    let server = RagServer::new(config).await?;

    println!("\nServer starting...");
    println!("  Health: http://{}/health", server.address());
    println!("\nEndpoints:");
    println!("  POST /index   - Upload a .pdf or .txt document");
    println!("  POST /chat    - Ask a question");
    println!("  GET  /chunks  - Browse stored chunks");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
