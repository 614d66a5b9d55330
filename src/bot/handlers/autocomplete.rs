//! Autocomplete handlers for Discord slash command parameters.
//!
//! Suggests catalog item names as the user types, either from the whole catalog or only
//! from the items already in the user's cart. Items whose names collide are suggested
//! as `#<id> <name>` so each one can be picked.

use crate::{bot::Context, core::catalog};

/// Discord accepts at most this many suggestions.
const MAX_SUGGESTIONS: usize = 25;

fn matching_names(names: impl Iterator<Item = String>, partial: &str) -> Vec<String> {
    let partial_lower = partial.trim().to_lowercase();
    let mut matching: Vec<String> = names
        .filter(|name| name.to_lowercase().contains(&partial_lower))
        .collect();
    matching.sort();
    matching.dedup();
    matching.truncate(MAX_SUGGESTIONS);
    matching
}

/// Provides autocomplete suggestions for catalog item names.
///
/// # Arguments
/// * `ctx` - The poise context holding the store
/// * `partial` - The partial string the user has typed so far
pub async fn autocomplete_item_name(ctx: Context<'_>, partial: &str) -> Vec<String> {
    let Ok(items) = catalog::list_items(ctx.data().store.as_ref()).await else {
        return Vec::new();
    };

    matching_names(catalog::item_labels(&items).into_iter(), partial)
}

/// Provides autocomplete suggestions for items in the caller's cart.
pub async fn autocomplete_cart_item(ctx: Context<'_>, partial: &str) -> Vec<String> {
    let session = ctx.data().sessions.session(ctx.author().id.get()).await;
    let items: Vec<_> = session
        .lock()
        .await
        .cart()
        .lines()
        .iter()
        .map(|line| line.item.clone())
        .collect();

    matching_names(catalog::item_labels(&items).into_iter(), partial)
}
