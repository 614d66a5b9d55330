//! Report Discord command - `report`.
//!
//! Shows the sales for one day, computed fresh from the purchase history each time.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::Context,
        core::report::{self, format_amount, format_purchase_line, pluralize},
        errors::Result,
        store::PurchaseStore,
    };
    use poise::serenity_prelude as serenity;

    const REPORT_COLOR: u32 = 0x0025_63EB;
    /// Discord embeds hold at most 25 fields; one is kept for the overflow note.
    const MAX_LISTED_PURCHASES: usize = 24;
    /// Discord limit on a single field value.
    const MAX_FIELD_VALUE: usize = 1024;
    /// Discord limit on the text of a whole embed.
    const MAX_EMBED_CHARS: usize = 6000;
    /// Room left for the "and N more" field.
    const OVERFLOW_RESERVE: usize = 32;

    /// Shows total sales for a day.
    #[poise::command(slash_command, prefix_command)]
    pub async fn report(
        ctx: Context<'_>,
        #[description = "Day to report on, YYYY-MM-DD (defaults to the day you last viewed)"]
        date: Option<String>,
    ) -> Result<()> {
        let data = ctx.data();
        let selected = {
            let session = data.sessions.session(ctx.author().id.get()).await;
            let mut session = session.lock().await;
            let selected = match date {
                Some(text) => report::parse_report_date(&text)?,
                None => session.report_date(),
            };
            session.select_report_date(selected);
            selected
        };

        let purchases = data.store.list_purchases().await?;
        let daily = report::daily_report(&purchases, selected);

        let title = format!(
            "Total Sales for {}: {}",
            daily.date,
            format_amount(&data.currency, daily.total)
        );
        let description = if daily.purchases.is_empty() {
            "No purchases found for this date".to_string()
        } else {
            pluralize(daily.count(), "transaction")
        };

        let fields: Vec<(String, String)> = daily
            .purchases
            .iter()
            .map(|purchase| {
                let name = format!(
                    "{} · {} · {}",
                    purchase.purchased_at.format("%H:%M:%S"),
                    format_amount(&data.currency, purchase.total),
                    pluralize(
                        usize::try_from(purchase.item_count()).unwrap_or(usize::MAX),
                        "item"
                    )
                );
                let value = purchase
                    .lines
                    .iter()
                    .map(|line| format_purchase_line(&data.currency, line))
                    .collect::<Vec<_>>()
                    .join("\n");
                (name, value)
            })
            .collect();

        let used = title.chars().count() + description.chars().count();
        let (listed, omitted) = fit_fields(fields, used);

        let mut embed = serenity::CreateEmbed::default()
            .title(title)
            .color(REPORT_COLOR)
            .description(description);
        for (name, value) in listed {
            embed = embed.field(name, value, false);
        }
        if omitted > 0 {
            embed = embed.field("…", format!("and {omitted} more"), false);
        }

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Shortens `text` to at most `max` characters, marking the cut with an ellipsis.
    fn truncate_chars(text: &str, max: usize) -> String {
        if text.chars().count() <= max {
            return text.to_string();
        }
        let mut shortened: String = text.chars().take(max.saturating_sub(1)).collect();
        shortened.push('…');
        shortened
    }

    /// Keeps the leading fields that fit in one embed next to `used` characters of
    /// title and description. Returns the kept fields and how many were left out.
    fn fit_fields(fields: Vec<(String, String)>, used: usize) -> (Vec<(String, String)>, usize) {
        let total = fields.len();
        let mut budget = MAX_EMBED_CHARS.saturating_sub(used + OVERFLOW_RESERVE);
        let mut kept = Vec::new();

        for (name, value) in fields.into_iter().take(MAX_LISTED_PURCHASES) {
            let value = truncate_chars(&value, MAX_FIELD_VALUE);
            let size = name.chars().count() + value.chars().count();
            if size > budget {
                break;
            }
            budget -= size;
            kept.push((name, value));
        }

        let omitted = total - kept.len();
        (kept, omitted)
    }

}

// Re-export all commands
pub use inner::*;
