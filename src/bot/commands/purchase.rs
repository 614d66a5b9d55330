//! Purchase Discord commands - `menu`, `cart`, `checkout`, `confirm` and `cancel`.
//!
//! These commands drive the purchase view of the caller's session: browsing the catalog,
//! building a cart, reviewing it, and recording it as a purchase.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, handlers::autocomplete},
        core::{
            cart::Cart,
            catalog, checkout,
            report::{format_amount, pluralize},
            session::{ManageMode, Tab},
        },
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    const CART_COLOR: u32 = 0x0016_A34A;

    /// Shows the available items with their prices.
    #[poise::command(slash_command, prefix_command)]
    pub async fn menu(ctx: Context<'_>) -> Result<()> {
        let data = ctx.data();
        data.sessions
            .session(ctx.author().id.get())
            .await
            .lock()
            .await
            .select_tab(Tab::Purchase);

        let items = catalog::list_items(data.store.as_ref()).await?;
        if items.is_empty() {
            ctx.say("No items in the catalog yet. Use `/catalog add` to create some!")
                .await?;
            return Ok(());
        }

        let listing = items
            .iter()
            .map(|item| format!("**{}** {}", item.name, format_amount(&data.currency, item.price)))
            .collect::<Vec<_>>()
            .join("\n");

        let mut footer = pluralize(items.len(), "item");
        if let Some((low, high)) = catalog::price_range(&items) {
            footer = format!(
                "{footer} · Price range: {} - {} · Use /cart add to buy",
                format_amount(&data.currency, low),
                format_amount(&data.currency, high)
            );
        }

        let embed = serenity::CreateEmbed::default()
            .title("Available Items")
            .color(CART_COLOR)
            .description(listing)
            .footer(serenity::CreateEmbedFooter::new(footer));

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Parent command for the caller's cart.
    #[poise::command(
        slash_command,
        subcommands("cart_add", "cart_set", "cart_remove", "cart_show", "cart_clear")
    )]
    pub async fn cart(ctx: Context<'_>) -> Result<()> {
        let help_text = "Cart command. Available subcommands:\n\
            `/cart add` - Add an item\n\
            `/cart set` - Change an item's quantity\n\
            `/cart remove` - Remove an item\n\
            `/cart show` - Show your cart\n\
            `/cart clear` - Empty your cart";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Adds an item to your cart.
    #[poise::command(slash_command, rename = "add")]
    pub async fn cart_add(
        ctx: Context<'_>,
        #[description = "Item to add (name or #id)"]
        #[autocomplete = "autocomplete::autocomplete_item_name"]
        item: String,
        #[description = "How many to add (defaults to 1)"] quantity: Option<i64>,
    ) -> Result<()> {
        let quantity = quantity.unwrap_or(1);
        if quantity <= 0 {
            return Err(Error::Validation {
                message: "Quantity must be a positive number".to_string(),
            });
        }

        let data = ctx.data();
        let item = catalog::find_item_by_name(data.store.as_ref(), &item).await?;

        let session = data.sessions.session(ctx.author().id.get()).await;
        let mut session = session.lock().await;
        session.select_tab(Tab::Purchase);
        session.add_to_cart(&item)?;
        if quantity > 1 {
            let current = session.cart().quantity_of(item.id).unwrap_or(1);
            session.set_cart_quantity(item.id, current + quantity - 1)?;
        }

        let reply = format!(
            "🛒 Added {} × {}. Cart total: **{}**",
            quantity,
            item.name,
            format_amount(&data.currency, session.cart().total())
        );
        drop(session);

        ctx.say(reply).await?;
        Ok(())
    }

    /// Changes the quantity of an item in your cart. Zero removes it.
    #[poise::command(slash_command, rename = "set")]
    pub async fn cart_set(
        ctx: Context<'_>,
        #[description = "Item in your cart"]
        #[autocomplete = "autocomplete::autocomplete_cart_item"]
        item: String,
        #[description = "New quantity (0 removes the item)"] quantity: i64,
    ) -> Result<()> {
        let data = ctx.data();
        let session = data.sessions.session(ctx.author().id.get()).await;
        let mut session = session.lock().await;
        session.select_tab(Tab::Purchase);

        let item_id = cart_item_id(session.cart(), &item)?;
        session.set_cart_quantity(item_id, quantity)?;

        let embed = cart_embed(session.cart(), &data.currency, "Your Cart");
        drop(session);

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Removes an item from your cart.
    #[poise::command(slash_command, rename = "remove")]
    pub async fn cart_remove(
        ctx: Context<'_>,
        #[description = "Item in your cart"]
        #[autocomplete = "autocomplete::autocomplete_cart_item"]
        item: String,
    ) -> Result<()> {
        let data = ctx.data();
        let session = data.sessions.session(ctx.author().id.get()).await;
        let mut session = session.lock().await;
        session.select_tab(Tab::Purchase);

        let item_id = cart_item_id(session.cart(), &item)?;
        session.remove_from_cart(item_id)?;

        let embed = cart_embed(session.cart(), &data.currency, "Your Cart");
        drop(session);

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Shows your cart.
    #[poise::command(slash_command, rename = "show")]
    pub async fn cart_show(ctx: Context<'_>) -> Result<()> {
        let data = ctx.data();
        let session = data.sessions.session(ctx.author().id.get()).await;
        let mut session = session.lock().await;
        session.select_tab(Tab::Purchase);

        let embed = cart_embed(session.cart(), &data.currency, "Your Cart");
        drop(session);

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Empties your cart.
    #[poise::command(slash_command, rename = "clear")]
    pub async fn cart_clear(ctx: Context<'_>) -> Result<()> {
        let session = ctx.data().sessions.session(ctx.author().id.get()).await;
        {
            let mut session = session.lock().await;
            session.select_tab(Tab::Purchase);
            session.clear_cart()?;
        }

        ctx.say("🧹 Your cart is now empty.").await?;
        Ok(())
    }

    /// Reviews your cart before completing the purchase.
    #[poise::command(slash_command, prefix_command)]
    pub async fn checkout(ctx: Context<'_>) -> Result<()> {
        let data = ctx.data();
        let session = data.sessions.session(ctx.author().id.get()).await;
        let embed = {
            let mut session = session.lock().await;
            let cart = session.open_checkout()?;
            let count = usize::try_from(cart.item_count()).unwrap_or(usize::MAX);
            cart_embed(cart, &data.currency, "Confirm Your Purchase").footer(
                serenity::CreateEmbedFooter::new(format!(
                    "{} in total · /confirm to buy, /cancel to go back",
                    pluralize(count, "item")
                )),
            )
        };

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Completes the purchase you are reviewing.
    #[poise::command(slash_command, prefix_command)]
    pub async fn confirm(ctx: Context<'_>) -> Result<()> {
        let data = ctx.data();
        let session = data.sessions.session(ctx.author().id.get()).await;

        let purchase = checkout::confirm_checkout(&session, data.store.as_ref()).await?;

        ctx.say(format!(
            "✅ Purchase completed successfully! Total: **{}** (purchase #{})",
            format_amount(&data.currency, purchase.total),
            purchase.id
        ))
        .await?;
        Ok(())
    }

    /// Cancels what you are doing:
    ///
    /// the purchase you are reviewing, or an item form left open on the catalog view.
    #[poise::command(slash_command, prefix_command)]
    pub async fn cancel(ctx: Context<'_>) -> Result<()> {
        let session = ctx.data().sessions.session(ctx.author().id.get()).await;
        let reply = {
            let mut session = session.lock().await;
            let form_open = !matches!(session.manage_mode(), ManageMode::Browsing);
            if session.tab() == Tab::Manage && form_open {
                session.cancel_form();
                "Item form closed. The catalog is unchanged."
            } else {
                session.cancel_checkout()?;
                "Purchase cancelled. Your cart is unchanged."
            }
        };

        ctx.say(reply).await?;
        Ok(())
    }

    /// Finds the id of a cart line by `#<id>` reference or item name.
    fn cart_item_id(cart: &Cart, name: &str) -> Result<i64> {
        if let Some(id) = catalog::parse_item_reference(name) {
            return cart
                .quantity_of(id)
                .map(|_| id)
                .ok_or(Error::ItemNotFound { id });
        }

        let wanted = name.trim().to_lowercase();
        cart.lines()
            .iter()
            .find(|line| line.item.name.to_lowercase() == wanted)
            .map(|line| line.item.id)
            .ok_or_else(|| Error::ItemNameNotFound {
                name: name.trim().to_string(),
            })
    }

    /// Renders the cart lines and total.
    fn cart_embed(cart: &Cart, currency: &str, title: &str) -> serenity::CreateEmbed {
        let embed = serenity::CreateEmbed::default().title(title).color(CART_COLOR);
        if cart.is_empty() {
            return embed.description("Your cart is empty");
        }

        let lines = cart
            .lines()
            .iter()
            .map(|line| {
                format!(
                    "**{}**: {} × {} = {}",
                    line.item.name,
                    format_amount(currency, line.item.price),
                    line.quantity,
                    format_amount(currency, line.subtotal())
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        embed
            .description(lines)
            .field("Total Amount", format_amount(currency, cart.total()), false)
    }
}

// Re-export all commands
pub use inner::*;
