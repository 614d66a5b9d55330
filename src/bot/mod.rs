//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for `RefreshBuddy`: the purchase, catalog
//! and report commands, autocomplete handlers, and the shared context every command
//! receives.

/// Discord command implementations (purchase, catalog, report, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;

use crate::{
    core::session::SessionRegistry,
    errors::{Error, Result},
    store::Store,
};
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Shared data available to all bot commands.
///
/// The store is the only place catalog and purchase data are changed; sessions hold
/// the per-user view state.
pub struct BotData {
    /// Catalog and purchase persistence
    pub store: Arc<dyn Store>,
    /// Per-user carts and view state
    pub sessions: SessionRegistry,
    /// Symbol shown in front of every amount
    pub currency: String,
}

impl BotData {
    /// Creates a new `BotData` instance around the chosen store.
    #[must_use]
    pub fn new(store: Arc<dyn Store>, currency: String) -> Self {
        Self {
            store,
            sessions: SessionRegistry::new(),
            currency,
        }
    }
}

/// Context type every command receives.
pub type Context<'a> = poise::Context<'a, BotData, Error>;

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {error}");
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {error}", ctx.command().qualified_name);
            if let Err(e) = ctx.say(format!("❌ {error}")).await {
                error!("Failed to send error message: {e}");
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {e}");
            }
        }
    }
}

/// Registers the commands and runs the Discord client until it stops.
#[instrument(skip(token, data))]
pub async fn run_bot(token: String, data: BotData) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::menu(),
                commands::cart(),
                commands::checkout(),
                commands::confirm(),
                commands::cancel(),
                commands::catalog(),
                commands::report(),
                commands::ping(),
                commands::help(),
            ],
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged();

    info!("Starting bot client...");
    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await?;
    client.start().await?;
    Ok(())
}
