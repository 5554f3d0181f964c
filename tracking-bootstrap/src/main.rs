use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing::{error, info};

use tracking_bootstrap::{parse_port, PortError};
use tracking_infrastructure::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "tracking-server")]
#[command(about = "Page-view event collector", long_about = None)]
struct Args {
    /// Port to listen on
    port: Option<String>,

    /// Path to an optional server settings file
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let port = match parse_port(args.port.as_deref()) {
        Ok(port) => port,
        Err(PortError::Missing) => {
            println!("{}", Args::command().render_usage());
            std::process::exit(1);
        }
        Err(err) => {
            error!("{}", err);
            std::process::exit(1);
        }
    };
    info!("starting server on port {}", port);

    let config = AppConfig::load(port, args.config.as_deref()).await?;
    tracking_bootstrap::run_standalone(config).await
}
