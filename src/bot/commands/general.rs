//! General Discord commands - ping, help, and other utility commands.
//! This module contains simple commands that don't touch the store
//! and provide basic bot functionality and user assistance.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{bot::Context, errors::Result};

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: Context<'_>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: Context<'_>) -> Result<()> {
        let help_text = "**RefreshBuddy Help**\n\
        Manage your workplace refreshments.\n\n\
        **Purchase Items**\n\
        • `/menu` - Shows the available items and their prices.\n\
        • `/cart add <item> [quantity]` - Adds an item to your cart.\n\
        • `/cart set <item> <quantity>` - Changes a quantity (0 removes the item).\n\
        • `/cart remove <item>` - Removes an item from your cart.\n\
        • `/cart show` / `/cart clear` - Shows or empties your cart.\n\
        • `/checkout` - Reviews your cart before buying.\n\
        • `/confirm` / `/cancel` - Completes or cancels the reviewed purchase.\n\n\
        **Manage Catalog**\n\
        • `/catalog list` - Lists every item.\n\
        • `/catalog add <name> <price>` - Adds an item.\n\
        • `/catalog edit <item> [name] [price]` - Changes an item.\n\
        • `/catalog delete <item> confirm:true` - Deletes an item.\n\n\
        **Daily Reports**\n\
        • `/report [date]` - Shows sales for a day (YYYY-MM-DD, defaults to today).\n\n\
        **Utility Commands**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
