use dotenvy::dotenv;
use refresh_buddy::{
    bot::{self, BotData},
    config::{
        catalog::{Config, load_default_config},
        database,
        store::{StoreBackend, get_store_backend},
    },
    core::catalog,
    errors::Result,
    store::{DatabaseStore, MemoryStore, Store},
};
use std::{env, sync::Arc};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load config.toml (currency and seed catalog)
    let app_config = load_default_config().unwrap_or_else(|e| {
        warn!("{e}; continuing with an empty seed catalog");
        Config::default()
    });

    // 4. Pick and open the store
    let backend = get_store_backend()?;
    info!("Using {backend:?} store backend");
    let store: Arc<dyn Store> = match backend {
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
        StoreBackend::Database => {
            let db = database::create_connection()
                .await
                .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
            database::create_tables(&db)
                .await
                .inspect(|()| info!("Database initialized successfully."))
                .inspect_err(|e| error!("Failed to initialize database: {e}"))?;
            Arc::new(DatabaseStore::new(db))
        }
    };

    // 5. Seed the catalog on first run
    catalog::seed_catalog(store.as_ref(), &app_config.items)
        .await
        .inspect_err(|e| error!("Failed to seed catalog: {e}"))?;

    // 6. Run the bot
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {e}"))?;

    bot::run_bot(token, BotData::new(store, app_config.currency)).await
}
