//! CLI interface for the vector database client

use anyhow::{Context, Result};
use clap::Parser;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use vectordb_client::{
    ClientConfig, CommandSource, HttpTransport, LineSource, ScriptedSource, Session,
    DEFAULT_BASE_URL, DEFAULT_CLASS,
};

#[derive(Parser)]
#[command(name = "vectordb-client")]
#[command(
    about = "Console client for a Weaviate-compatible vector database",
    long_about = "Reads single-key commands:\n  \
        0  create the document schema\n  \
        1  insert a sample document\n  \
        2  insert a sample document with a vector\n  \
        3  list documents\n  \
        4  delete every document of the class\n  \
        e  quit"
)]
struct Cli {
    /// Server base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Class the commands operate on
    #[arg(long, default_value = DEFAULT_CLASS)]
    class: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout_secs: u64,

    /// Maximum deletes in flight during bulk delete
    #[arg(long, default_value = "1")]
    delete_concurrency: usize,

    /// Run these keys instead of reading the terminal (e.g. "034e")
    #[arg(long)]
    script: Option<String>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = ClientConfig {
        base_url: cli.base_url,
        class_name: cli.class,
        timeout: Duration::from_secs(cli.timeout_secs),
        delete_concurrency: cli.delete_concurrency,
    };
    let transport = HttpTransport::new(&config).context("invalid client configuration")?;
    info!(base_url = %transport.base_url(), class = %config.class_name, "client ready");

    let mut source: Box<dyn CommandSource> = match cli.script {
        Some(script) => Box::new(ScriptedSource::new(&script)),
        None => Box::new(LineSource::stdin()),
    };

    let session = Session::new(&transport, &config);
    let mut stdout = std::io::stdout();

    tokio::select! {
        stats = session.run(source.as_mut(), &mut stdout) => {
            let stats = stats?;
            info!(
                executed = stats.executed,
                failed = stats.failed,
                unrecognized = stats.unrecognized,
                "session finished"
            );
        }
        _ = tokio::signal::ctrl_c() => {
            warn!("interrupted; abandoning the running command");
        }
    }

    Ok(())
}
