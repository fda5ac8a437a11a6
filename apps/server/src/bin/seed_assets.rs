//! Seeds the database with a set of well-known assets and starting prices.
//!
//! Usage: `cargo run --bin seed_assets` (honors NW_DB_PATH).

use std::str::FromStr;
use std::sync::Arc;

use rust_decimal::Decimal;

use networth_core::assets::{AssetCategory, AssetRepositoryTrait, NewAsset};
use networth_server::config::Config;
use networth_server::init_tracing;
use networth_storage_sqlite::{assets::AssetRepository, db};

const COMMON_ASSETS: &[(&str, &str, AssetCategory, &str)] = &[
    ("AAPL", "Apple Inc.", AssetCategory::Stocks, "185.00"),
    ("MSFT", "Microsoft Corporation", AssetCategory::Stocks, "420.00"),
    ("GOOGL", "Alphabet Inc.", AssetCategory::Stocks, "175.00"),
    ("AMZN", "Amazon.com Inc.", AssetCategory::Stocks, "180.00"),
    ("TSLA", "Tesla Inc.", AssetCategory::Stocks, "170.00"),
    ("NVDA", "NVIDIA Corporation", AssetCategory::Stocks, "900.00"),
    ("LVMUY", "LVMH Moet Hennessy", AssetCategory::Stocks, "160.00"),
    ("BTC-USD", "Bitcoin", AssetCategory::Crypto, "65000.00"),
    ("ETH-USD", "Ethereum", AssetCategory::Crypto, "3500.00"),
    ("SOL-USD", "Solana", AssetCategory::Crypto, "145.00"),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_tracing();

    let db_path = db::init(&config.db_path)?;
    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::write_actor::spawn_writer((*pool).clone());
    let repository = Arc::new(AssetRepository::new(pool, writer));

    println!("Creating assets with initial prices...");

    for (ticker, name, category, price) in COMMON_ASSETS {
        let existed = repository.get_by_ticker(ticker)?.is_some();
        repository
            .upsert(NewAsset {
                ticker: ticker.to_string(),
                name: name.to_string(),
                category: *category,
                current_price: Decimal::from_str(price)?,
            })
            .await?;
        if existed {
            println!("Updated {}", ticker);
        } else {
            println!("Created {}", ticker);
        }
    }

    println!("Successfully seeded {} assets.", COMMON_ASSETS.len());
    Ok(())
}
