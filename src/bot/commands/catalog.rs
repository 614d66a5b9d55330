//! Catalog Discord commands - `catalog list|add|edit|delete`.
//!
//! Each command runs the manage view's form through the caller's session: the form is
//! opened, filled from the command options, and submitted to the store. A rejected form
//! leaves the catalog unchanged.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, handlers::autocomplete},
        core::{catalog, report::format_amount, session::Tab},
        errors::Result,
    };
    use poise::serenity_prelude as serenity;
    use tracing::info;

    const CATALOG_COLOR: u32 = 0x0058_65F2;

    /// Parent command for managing the item catalog.
    #[poise::command(
        slash_command,
        subcommands("catalog_list", "catalog_add", "catalog_edit", "catalog_delete")
    )]
    pub async fn catalog(ctx: Context<'_>) -> Result<()> {
        let help_text = "Catalog management command. Available subcommands:\n\
            `/catalog list` - List all items\n\
            `/catalog add` - Add a new item\n\
            `/catalog edit` - Change an item's name or price\n\
            `/catalog delete` - Delete an item";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Lists all items with their prices.
    #[poise::command(slash_command, rename = "list")]
    pub async fn catalog_list(ctx: Context<'_>) -> Result<()> {
        let data = ctx.data();
        data.sessions
            .session(ctx.author().id.get())
            .await
            .lock()
            .await
            .select_tab(Tab::Manage);

        let items = catalog::list_items(data.store.as_ref()).await?;
        if items.is_empty() {
            ctx.say("No items have been defined yet. Use `/catalog add` to create some!")
                .await?;
            return Ok(());
        }

        let listing = items
            .iter()
            .map(|item| {
                format!(
                    "`#{}` **{}** {}",
                    item.id,
                    item.name,
                    format_amount(&data.currency, item.price)
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        let embed = serenity::CreateEmbed::default()
            .title("**Catalog**")
            .color(CATALOG_COLOR)
            .description(listing);

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Adds a new item to the catalog.
    #[poise::command(slash_command, rename = "add")]
    pub async fn catalog_add(
        ctx: Context<'_>,
        #[description = "Item name (e.g., 'Masala Chai')"] name: String,
        #[description = "Unit price (e.g., 20)"] price: String,
    ) -> Result<()> {
        let data = ctx.data();
        let session = data.sessions.session(ctx.author().id.get()).await;
        let created = {
            let mut session = session.lock().await;
            session.open_add_form();
            if let Some(draft) = session.draft_mut() {
                draft.name = name;
                draft.price = price;
            }
            session.submit_form(data.store.as_ref()).await?
        };

        info!("User {} added item '{}'", ctx.author().id, created.name);
        ctx.say(format!(
            "✅ Item '{}' added at **{}**.",
            created.name,
            format_amount(&data.currency, created.price)
        ))
        .await?;
        Ok(())
    }

    /// Changes an item's name and/or price.
    #[poise::command(slash_command, rename = "edit")]
    pub async fn catalog_edit(
        ctx: Context<'_>,
        #[description = "Item to edit (name or #id)"]
        #[autocomplete = "autocomplete::autocomplete_item_name"]
        item: String,
        #[description = "New name (leave empty to keep)"] name: Option<String>,
        #[description = "New price (leave empty to keep)"] price: Option<String>,
    ) -> Result<()> {
        let data = ctx.data();
        let existing = catalog::find_item_by_name(data.store.as_ref(), &item).await?;

        let session = data.sessions.session(ctx.author().id.get()).await;
        let updated = {
            let mut session = session.lock().await;
            session.start_edit(&existing);
            if let Some(draft) = session.draft_mut() {
                if let Some(name) = name {
                    draft.name = name;
                }
                if let Some(price) = price {
                    draft.price = price;
                }
            }
            session.submit_form(data.store.as_ref()).await?
        };

        ctx.say(format!(
            "✅ '{}' is now '{}' at **{}**.",
            existing.name,
            updated.name,
            format_amount(&data.currency, updated.price)
        ))
        .await?;
        Ok(())
    }

    /// Deletes an item from the catalog. Past purchases are not affected.
    #[poise::command(slash_command, rename = "delete")]
    pub async fn catalog_delete(
        ctx: Context<'_>,
        #[description = "Item to delete (name or #id)"]
        #[autocomplete = "autocomplete::autocomplete_item_name"]
        item: String,
        #[description = "Set to true to confirm the deletion"] confirm: Option<bool>,
    ) -> Result<()> {
        let data = ctx.data();
        let existing = catalog::find_item_by_name(data.store.as_ref(), &item).await?;

        if !confirm.unwrap_or(false) {
            ctx.say(format!(
                "⚠️ Are you sure you want to delete '{}'? Run the command again with `confirm:true`.",
                existing.name
            ))
            .await?;
            return Ok(());
        }

        data.sessions
            .session(ctx.author().id.get())
            .await
            .lock()
            .await
            .select_tab(Tab::Manage);
        catalog::delete_item(data.store.as_ref(), existing.id).await?;

        ctx.say(format!("✅ Item '{}' has been deleted.", existing.name))
            .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
