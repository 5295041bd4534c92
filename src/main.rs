use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use vendortrack::adapter::sqlite::{create_pool, run_migrations, SqliteStore};
use vendortrack::config::Config;
use vendortrack::seed::load_demo_data;
use vendortrack::service::VendorService;

#[derive(Parser)]
#[command(name = "vendortrack", version, about = "Vendor performance tracking backend")]
struct Cli {
    /// Path to the TOML config file.
    #[arg(long, default_value = "config.toml")]
    config: String,

    /// Database URL override (takes precedence over config and DATABASE_URL).
    #[arg(long)]
    database: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run pending database migrations.
    Migrate,
    /// Wipe the database and load demo vendors and orders.
    Seed,
    /// List vendors with their cached performance metrics.
    Vendors,
    /// Show the four-metric performance snapshot for a vendor.
    Performance { vendor_code: String },
    /// Show performance history for a vendor, newest first.
    History { vendor_code: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = Config::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config))?;
    config.init_logging();

    let database_url = cli.database.unwrap_or_else(|| config.database_url());
    let pool = create_pool(&database_url, config.database.max_connections)
        .context("creating database pool")?;
    run_migrations(&pool).context("running migrations")?;

    let store = SqliteStore::new(pool.clone(), config.recalculation);
    let vendors = VendorService::new(store);

    match cli.command {
        Command::Migrate => {
            // Migrations already ran above; this subcommand just makes the
            // step explicit for deployment scripts.
            info!(database = %database_url, "Migrations up to date");
            println!("migrations up to date");
        }
        Command::Seed => {
            let seed_store = SqliteStore::new(pool, config.recalculation);
            load_demo_data(&seed_store).await?;
            println!("demo data loaded");
        }
        Command::Vendors => {
            for vendor in vendors.list().await? {
                println!(
                    "{}  {}  on_time={:.3} quality={:.3} response_h={:.3} fulfillment={:.3}",
                    vendor.vendor_code,
                    vendor.name,
                    vendor.on_time_delivery_rate,
                    vendor.quality_rating_avg,
                    vendor.average_response_time,
                    vendor.fulfillment_rate,
                );
            }
        }
        Command::Performance { vendor_code } => {
            let vendor = vendors.find_by_code(&vendor_code).await?;
            let metrics = vendors.performance(vendor.id).await?;
            println!("on_time_delivery_rate: {:.6}", metrics.on_time_delivery_rate);
            println!("quality_rating_avg: {:.6}", metrics.quality_rating_avg);
            println!("average_response_time: {:.6}", metrics.average_response_time);
            println!("fulfillment_rate: {:.6}", metrics.fulfillment_rate);
        }
        Command::History { vendor_code } => {
            let vendor = vendors.find_by_code(&vendor_code).await?;
            for snapshot in vendors.history(vendor.id).await? {
                println!(
                    "{}  on_time={:.3} quality={:.3} response_h={:.3} fulfillment={:.3}",
                    snapshot.recorded_at.to_rfc3339(),
                    snapshot.on_time_delivery_rate,
                    snapshot.quality_rating_avg,
                    snapshot.average_response_time,
                    snapshot.fulfillment_rate,
                );
            }
        }
    }

    Ok(())
}
