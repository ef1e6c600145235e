mod runs;
mod watch;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "promocast")]
#[command(about = "Marketing-trigger batch runs over the business directory")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run one weather-trigger pass and exit.
    Weather,
    /// Run one time-trigger pass (weekend/payday) and exit.
    Time,
    /// Stay resident and run both passes on their cron cadence.
    Watch,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = promocast_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let pool_config = promocast_db::PoolConfig::from_app_config(&config);
    let pool = promocast_db::connect_pool(&config.database_url, pool_config).await?;
    promocast_db::run_migrations(&pool).await?;

    match cli.command {
        Commands::Weather => {
            let summary = runs::run_weather(&pool, &config).await?;
            println!("{}", runs::summary_json(&summary));
        }
        Commands::Time => {
            let summary = runs::run_time(&pool, &config).await?;
            println!("{}", runs::summary_json(&summary));
        }
        Commands::Watch => {
            let _scheduler = watch::build_scheduler(pool, std::sync::Arc::new(config)).await?;
            shutdown_signal().await;
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, exiting");
}
