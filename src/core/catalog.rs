//! Catalog business logic - Handles all catalog-item operations.
//!
//! Input arrives as raw text from the user, is validated into a [`NewItem`], and only then
//! reaches the store. A failed create, update or delete leaves the catalog untouched.

use crate::{
    config::catalog::ItemConfig,
    errors::{Error, Result},
    models::{CatalogItem, NewItem},
    store::CatalogStore,
};
use tracing::info;

/// Retrieves all active items, ordered alphabetically by name.
pub async fn list_items<S>(store: &S) -> Result<Vec<CatalogItem>>
where
    S: CatalogStore + ?Sized,
{
    store.list_items().await
}

/// Reads the id out of an item reference written as `#<id>`, optionally followed by
/// the item's name (the form used for items whose names collide).
#[must_use]
pub fn parse_item_reference(reference: &str) -> Option<i64> {
    reference
        .trim()
        .strip_prefix('#')?
        .split_whitespace()
        .next()?
        .parse()
        .ok()
}

/// Finds an active item by `#<id>` reference or by name, ignoring case and surrounding
/// whitespace. When several items share a name the first in catalog order is returned;
/// the others are reached by id.
///
/// # Errors
/// Returns [`Error::ItemNotFound`] for an unknown id, or [`Error::ItemNameNotFound`] if
/// no active item has that name.
pub async fn find_item_by_name<S>(store: &S, name: &str) -> Result<CatalogItem>
where
    S: CatalogStore + ?Sized,
{
    let items = store.list_items().await?;

    if let Some(id) = parse_item_reference(name) {
        return items
            .into_iter()
            .find(|item| item.id == id)
            .ok_or(Error::ItemNotFound { id });
    }

    let wanted = name.trim().to_lowercase();
    items
        .into_iter()
        .find(|item| item.name.to_lowercase() == wanted)
        .ok_or_else(|| Error::ItemNameNotFound {
            name: name.trim().to_string(),
        })
}

/// Labels used to pick items in commands: the plain name, or `#<id> <name>` when
/// another item has the same name ignoring case.
#[must_use]
pub fn item_labels(items: &[CatalogItem]) -> Vec<String> {
    items
        .iter()
        .map(|item| {
            let name = item.name.to_lowercase();
            let shared = items
                .iter()
                .any(|other| other.id != item.id && other.name.to_lowercase() == name);
            if shared {
                format!("#{} {}", item.id, item.name)
            } else {
                item.name.clone()
            }
        })
        .collect()
}

/// Validates the name and price text and adds a new item.
///
/// # Errors
/// Returns an error if:
/// - The name is empty or whitespace-only
/// - The price is not a finite, non-negative number
/// - The store call fails
pub async fn create_item<S>(store: &S, name: &str, price: &str) -> Result<CatalogItem>
where
    S: CatalogStore + ?Sized,
{
    let item = NewItem::parse(name, price)?;
    store.create_item(&item).await
}

/// Validates the name and price text and replaces them on an existing item.
///
/// # Errors
/// Returns an error if:
/// - The name or price fail validation
/// - The item does not exist or was deleted
/// - The store call fails
pub async fn update_item<S>(store: &S, id: i64, name: &str, price: &str) -> Result<CatalogItem>
where
    S: CatalogStore + ?Sized,
{
    let item = NewItem::parse(name, price)?;
    store.update_item(id, &item).await
}

/// Removes an item from the catalog. Recorded purchases keep their own copy of it.
///
/// # Errors
/// Returns [`Error::ItemNotFound`] if the item does not exist, or a store error.
pub async fn delete_item<S>(store: &S, id: i64) -> Result<()>
where
    S: CatalogStore + ?Sized,
{
    store.delete_item(id).await
}

/// Inserts the configured seed items, but only into an empty catalog.
///
/// Returns the number of items inserted.
pub async fn seed_catalog<S>(store: &S, seed: &[ItemConfig]) -> Result<usize>
where
    S: CatalogStore + ?Sized,
{
    if !store.list_items().await?.is_empty() {
        info!("Catalog already populated, skipping seed");
        return Ok(0);
    }

    let mut inserted = 0;
    for entry in seed {
        store
            .create_item(&NewItem::new(&entry.name, entry.price)?)
            .await?;
        inserted += 1;
    }
    info!("Seeded catalog with {inserted} items");
    Ok(inserted)
}

/// Lowest and highest price in the catalog, or `None` when it is empty.
#[must_use]
pub fn price_range(items: &[CatalogItem]) -> Option<(f64, f64)> {
    let mut prices = items.iter().map(|item| item.price);
    let first = prices.next()?;
    Some(prices.fold((first, first), |(low, high), price| {
        (low.min(price), high.max(price))
    }))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::{store::MemoryStore, test_utils::*};

    #[tokio::test]
    async fn test_create_item_validation() -> Result<()> {
        let store = MemoryStore::new();

        for (name, price) in [("", "10"), ("   ", "10"), ("Tea", "abc"), ("Tea", "-1")] {
            let result = create_item(&store, name, price).await;
            assert!(matches!(result, Err(Error::Validation { message: _ })));
        }

        assert!(list_items(&store).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_create_update_delete_integration() -> Result<()> {
        let store = setup_database_store().await?;

        let tea = create_item(&store, "Tea", "20").await?;
        assert_eq!(tea.price, 20.0);

        let updated = update_item(&store, tea.id, "Green Tea", "30").await?;
        assert_eq!(updated.name, "Green Tea");
        assert_eq!(list_items(&store).await?, vec![updated]);

        delete_item(&store, tea.id).await?;
        assert!(list_items(&store).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_update_item_validation_leaves_item_untouched() -> Result<()> {
        let store = MemoryStore::new();
        let tea = create_item(&store, "Tea", "20").await?;

        let result = update_item(&store, tea.id, "", "25").await;
        assert!(matches!(result, Err(Error::Validation { message: _ })));
        assert_eq!(list_items(&store).await?, vec![tea]);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_and_delete_unknown_item() -> Result<()> {
        let store = MemoryStore::new();

        assert!(matches!(
            update_item(&store, 7, "Tea", "20").await,
            Err(Error::ItemNotFound { id: 7 })
        ));
        assert!(matches!(
            delete_item(&store, 7).await,
            Err(Error::ItemNotFound { id: 7 })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_store_call_is_not_reflected() -> Result<()> {
        let store = FailingStore::new();

        assert!(matches!(
            create_item(&store, "Tea", "20").await,
            Err(Error::Persistence { message: _ })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_find_item_by_name_ignores_case() -> Result<()> {
        let store = setup_seeded_memory_store().await?;

        let found = find_item_by_name(&store, " cold drink ").await?;
        assert_eq!(found.name, "Cold Drink");

        assert!(matches!(
            find_item_by_name(&store, "Pizza").await,
            Err(Error::ItemNameNotFound { name: _ })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_items_sharing_a_name_are_reachable_by_id() -> Result<()> {
        let store = MemoryStore::new();
        let upper = create_item(&store, "Tea", "20").await?;
        let lower = create_item(&store, "tea", "30").await?;

        assert_eq!(find_item_by_name(&store, "tea").await?, upper);
        assert_eq!(find_item_by_name(&store, &format!("#{}", lower.id)).await?, lower);
        assert_eq!(
            find_item_by_name(&store, &format!("#{} tea", lower.id)).await?,
            lower
        );

        let labels = item_labels(&list_items(&store).await?);
        assert_eq!(labels, vec![format!("#{} Tea", upper.id), format!("#{} tea", lower.id)]);

        update_item(&store, lower.id, "Lemon Tea", "35").await?;
        assert_eq!(find_item_by_name(&store, "lemon tea").await?.id, lower.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_id_reference() -> Result<()> {
        let store = setup_seeded_memory_store().await?;
        assert!(matches!(
            find_item_by_name(&store, "#999").await,
            Err(Error::ItemNotFound { id: 999 })
        ));
        Ok(())
    }

    #[test]
    fn test_parse_item_reference() {
        assert_eq!(parse_item_reference("#12"), Some(12));
        assert_eq!(parse_item_reference(" #3 Cold Drink "), Some(3));
        assert_eq!(parse_item_reference("Tea"), None);
        assert_eq!(parse_item_reference("#tea"), None);
    }

    #[test]
    fn test_item_labels_keep_unique_names_plain() {
        let items = vec![catalog_item(1, "Coffee", 25.0), catalog_item(2, "Tea", 20.0)];
        assert_eq!(item_labels(&items), vec!["Coffee", "Tea"]);
    }

    #[tokio::test]
    async fn test_negative_zero_price_is_stored_as_zero() -> Result<()> {
        let store = MemoryStore::new();
        let water = create_item(&store, "Water", "-0").await?;
        assert!(water.price.is_sign_positive());
        assert_eq!(crate::core::report::format_amount("₹", water.price), "₹0");
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_catalog_only_fills_empty_catalog() -> Result<()> {
        let store = MemoryStore::new();

        assert_eq!(seed_catalog(&store, &seed_items()).await?, 8);
        assert_eq!(seed_catalog(&store, &seed_items()).await?, 0);
        assert_eq!(list_items(&store).await?.len(), 8);
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_catalog_rejects_invalid_entries() {
        let store = MemoryStore::new();
        let seed = vec![ItemConfig {
            name: String::new(),
            price: 5.0,
        }];

        assert!(matches!(
            seed_catalog(&store, &seed).await,
            Err(Error::Validation { message: _ })
        ));
    }

    #[test]
    fn test_price_range() {
        assert_eq!(price_range(&[]), None);

        let items = vec![
            catalog_item(1, "Coffee", 25.0),
            catalog_item(2, "Biscuits", 10.0),
            catalog_item(3, "Sandwich", 80.0),
        ];
        assert_eq!(price_range(&items), Some((10.0, 80.0)));
    }
}
