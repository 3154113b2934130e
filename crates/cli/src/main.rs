//! # Tenant DNS
//!
//! Authoritative nameserver for the domains hosted in the tenant directory.

use clap::Parser;
use tenant_dns_domain::CliOverrides;
use tracing::{error, info};

mod bootstrap;
mod server;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "tenant-dns")]
#[command(version)]
#[command(about = "Authoritative DNS for multi-tenant hosted sites")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short = 'c', long)]
    config: Option<String>,

    /// Listen address, host[:port]; repeat for several
    #[arg(short = 'l', long = "listen")]
    listen: Vec<String>,

    /// Comma-separated nameserver host names
    #[arg(long, value_delimiter = ',')]
    nameservers: Option<Vec<String>>,

    /// SQLite database path
    #[arg(short = 'd', long)]
    database: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            listen: self.listen.clone(),
            nameservers: self.nameservers.clone(),
            database_path: self.database.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bootstrap::load_config(cli.config.as_deref(), cli.overrides())?;
    bootstrap::init_logging(&config);
    bootstrap::log_config(cli.config.as_deref(), &config);

    let pool = bootstrap::init_database(&config.database).await?;
    let name_server = server::start_dns_server(&config, pool.clone()).await?;

    info!(addrs = ?name_server.local_addrs(), "Tenant DNS ready");

    shutdown_signal().await;

    if let Err(e) = name_server.stop().await {
        error!(error = %e, "Nameserver did not stop cleanly");
    }
    pool.close().await;
    info!("Tenant DNS stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl-C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
