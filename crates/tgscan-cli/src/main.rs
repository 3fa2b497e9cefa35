mod scan;
mod schedule;
mod zones;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::scan::ScanArgs;
use crate::zones::ZoneArgs;

#[derive(Debug, Parser)]
#[command(name = "tgscan")]
#[command(about = "Scan NYC surplus-food listings into a JSON snapshot")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scan every zone once and write the snapshot file
    Scan(ScanArgs),
    /// Print the zones a scan would visit
    Zones(ZoneArgs),
    /// Run the scan repeatedly on a cron schedule until interrupted
    Schedule {
        /// Six-field cron expression (sec min hour day month weekday), UTC
        #[arg(long, default_value = schedule::DEFAULT_CRON)]
        cron: String,

        /// Also run one scan immediately at startup
        #[arg(long)]
        run_now: bool,

        #[command(flatten)]
        scan: ScanArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Zones(args)) => {
            init_tracing("warn")?;
            zones::run_zones(&args)?;
        }
        Some(Commands::Scan(args)) => {
            let config = load_config()?;
            init_tracing(&config.log_level)?;
            scan::run_scan(&config, &args).await?;
        }
        Some(Commands::Schedule {
            cron,
            run_now,
            scan,
        }) => {
            let config = load_config()?;
            init_tracing(&config.log_level)?;
            schedule::run_schedule(config, scan, &cron, run_now).await?;
        }
        None => {
            let config = load_config()?;
            init_tracing(&config.log_level)?;
            scan::run_scan(&config, &ScanArgs::default()).await?;
        }
    }

    Ok(())
}

fn load_config() -> anyhow::Result<tgscan_core::AppConfig> {
    tgscan_core::load_app_config().context(
        "marketplace credentials are required: set TGTG_ACCESS_TOKEN, TGTG_REFRESH_TOKEN and TGTG_USER_ID",
    )
}

/// `RUST_LOG` wins over the configured level when set.
fn init_tracing(default_level: &str) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    Ok(())
}
