//! Per-user view state.
//!
//! A [`Session`] holds everything a user sees that is not stored: the selected tab, the
//! cart, the checkout summary state, the catalog form being filled in, and the date the
//! report is showing. Each piece of state is a tagged enum so that impossible
//! combinations, such as adding an item while editing another, cannot be expressed.

use crate::{
    core::{cart::Cart, checkout},
    errors::{Error, Result},
    models::{CatalogItem, NewItem, NewPurchase},
    store::CatalogStore,
};
use chrono::{DateTime, NaiveDate, Utc};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

/// The three mutually exclusive views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    /// Browse the catalog and build a cart
    #[default]
    Purchase,
    /// Add, edit and delete catalog items
    Manage,
    /// Daily sales
    Reports,
}

/// Visibility of the purchase confirmation summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckoutState {
    /// No confirmation pending
    #[default]
    Hidden,
    /// Summary shown, waiting for confirm or cancel
    Shown,
    /// Confirm pressed, purchase being recorded
    Submitting,
}

/// Name and price as typed into the catalog form, not yet validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemDraft {
    /// Item name text
    pub name: String,
    /// Price text
    pub price: String,
}

impl From<&CatalogItem> for ItemDraft {
    fn from(item: &CatalogItem) -> Self {
        Self {
            name: item.name.clone(),
            price: item.price.to_string(),
        }
    }
}

/// What the catalog view is doing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ManageMode {
    /// Showing the item list
    #[default]
    Browsing,
    /// Filling in a new item
    Adding(ItemDraft),
    /// Changing an existing item
    Editing {
        /// Item being edited
        id: i64,
        /// Edited values
        draft: ItemDraft,
    },
}

/// One user's view state.
#[derive(Debug, Clone)]
pub struct Session {
    tab: Tab,
    cart: Cart,
    checkout: CheckoutState,
    manage: ManageMode,
    report_date: NaiveDate,
}

impl Session {
    /// Creates a session on the purchase tab with the report set to `today`.
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        Self {
            tab: Tab::default(),
            cart: Cart::new(),
            checkout: CheckoutState::default(),
            manage: ManageMode::default(),
            report_date: today,
        }
    }

    /// The selected tab.
    #[must_use]
    pub const fn tab(&self) -> Tab {
        self.tab
    }

    /// Switches tabs. Leaving the purchase tab dismisses a shown summary; a purchase
    /// being recorded keeps going.
    pub fn select_tab(&mut self, tab: Tab) {
        if self.tab == Tab::Purchase && tab != Tab::Purchase && self.checkout == CheckoutState::Shown
        {
            self.checkout = CheckoutState::Hidden;
        }
        self.tab = tab;
    }

    /// The cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The checkout summary state.
    #[must_use]
    pub const fn checkout(&self) -> CheckoutState {
        self.checkout
    }

    /// Cart changes are refused while recording and dismiss a shown summary, so the
    /// user always confirms exactly what they last reviewed.
    fn cart_for_edit(&mut self) -> Result<&mut Cart> {
        match self.checkout {
            CheckoutState::Submitting => Err(Error::CheckoutInProgress),
            CheckoutState::Shown => {
                self.checkout = CheckoutState::Hidden;
                Ok(&mut self.cart)
            }
            CheckoutState::Hidden => Ok(&mut self.cart),
        }
    }

    /// Adds one unit of `item` to the cart.
    pub fn add_to_cart(&mut self, item: &CatalogItem) -> Result<()> {
        self.cart_for_edit()?.add(item);
        Ok(())
    }

    /// Sets the quantity of an item in the cart; zero or less removes it.
    pub fn set_cart_quantity(&mut self, item_id: i64, quantity: i64) -> Result<()> {
        self.cart_for_edit()?.set_quantity(item_id, quantity);
        Ok(())
    }

    /// Removes an item from the cart, returning whether it was there.
    pub fn remove_from_cart(&mut self, item_id: i64) -> Result<bool> {
        Ok(self.cart_for_edit()?.remove(item_id))
    }

    /// Empties the cart.
    pub fn clear_cart(&mut self) -> Result<()> {
        self.cart_for_edit()?.clear();
        Ok(())
    }

    /// Shows the confirmation summary for the current cart.
    ///
    /// # Errors
    /// Returns [`Error::EmptyCart`] if there is nothing to buy, or
    /// [`Error::CheckoutInProgress`] if a purchase is being recorded.
    pub fn open_checkout(&mut self) -> Result<&Cart> {
        if self.checkout == CheckoutState::Submitting {
            return Err(Error::CheckoutInProgress);
        }
        if self.cart.is_empty() {
            return Err(Error::EmptyCart);
        }
        self.tab = Tab::Purchase;
        self.checkout = CheckoutState::Shown;
        Ok(&self.cart)
    }

    /// Hides the confirmation summary without buying anything.
    pub fn cancel_checkout(&mut self) -> Result<()> {
        match self.checkout {
            CheckoutState::Shown => {
                self.checkout = CheckoutState::Hidden;
                Ok(())
            }
            CheckoutState::Submitting => Err(Error::CheckoutInProgress),
            CheckoutState::Hidden => Err(Error::CheckoutNotOpen),
        }
    }

    /// Moves a shown summary into the submitting state and returns the purchase to record.
    ///
    /// # Errors
    /// Returns [`Error::CheckoutNotOpen`] if no summary is shown, or
    /// [`Error::CheckoutInProgress`] if a purchase is already being recorded.
    pub fn begin_confirm(&mut self, now: DateTime<Utc>) -> Result<NewPurchase> {
        match self.checkout {
            CheckoutState::Hidden => Err(Error::CheckoutNotOpen),
            CheckoutState::Submitting => Err(Error::CheckoutInProgress),
            CheckoutState::Shown => {
                let pending = checkout::prepare_purchase(&self.cart, now)?;
                self.checkout = CheckoutState::Submitting;
                Ok(pending)
            }
        }
    }

    /// Ends a confirm started with [`Session::begin_confirm`]. On success the cart is
    /// cleared and the summary hidden; on failure the summary is shown again.
    pub fn finish_confirm(&mut self, recorded: bool) {
        if self.checkout != CheckoutState::Submitting {
            return;
        }
        if recorded {
            self.cart.clear();
            self.checkout = CheckoutState::Hidden;
        } else {
            self.checkout = CheckoutState::Shown;
        }
    }

    /// The catalog view's mode.
    #[must_use]
    pub const fn manage_mode(&self) -> &ManageMode {
        &self.manage
    }

    /// Opens an empty add form, discarding any other form.
    pub fn open_add_form(&mut self) {
        self.select_tab(Tab::Manage);
        self.manage = ManageMode::Adding(ItemDraft::default());
    }

    /// Opens the edit form for `item`, discarding any other form.
    pub fn start_edit(&mut self, item: &CatalogItem) {
        self.select_tab(Tab::Manage);
        self.manage = ManageMode::Editing {
            id: item.id,
            draft: ItemDraft::from(item),
        };
    }

    /// The draft of the open form, if any.
    pub fn draft_mut(&mut self) -> Option<&mut ItemDraft> {
        match &mut self.manage {
            ManageMode::Browsing => None,
            ManageMode::Adding(draft) | ManageMode::Editing { draft, .. } => Some(draft),
        }
    }

    /// Closes the open form without saving.
    pub fn cancel_form(&mut self) {
        self.manage = ManageMode::Browsing;
    }

    /// Saves the open form through `store`.
    ///
    /// On success the form closes. On failure it stays open with the draft intact and
    /// the catalog is unchanged.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] when no form is open or the draft is invalid, or
    /// the store's error.
    pub async fn submit_form<S>(&mut self, store: &S) -> Result<CatalogItem>
    where
        S: CatalogStore + ?Sized,
    {
        let saved = match &self.manage {
            ManageMode::Browsing => {
                return Err(Error::Validation {
                    message: "No item form is open".to_string(),
                });
            }
            ManageMode::Adding(draft) => {
                store
                    .create_item(&NewItem::parse(&draft.name, &draft.price)?)
                    .await?
            }
            ManageMode::Editing { id, draft } => {
                store
                    .update_item(*id, &NewItem::parse(&draft.name, &draft.price)?)
                    .await?
            }
        };
        self.manage = ManageMode::Browsing;
        Ok(saved)
    }

    /// The date the report is showing.
    #[must_use]
    pub const fn report_date(&self) -> NaiveDate {
        self.report_date
    }

    /// Changes the report date.
    pub fn select_report_date(&mut self, date: NaiveDate) {
        self.select_tab(Tab::Reports);
        self.report_date = date;
    }
}

/// Sessions keyed by user id, created on first use.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<u64, Arc<Mutex<Session>>>>,
}

impl SessionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the session for `user_id`, creating it if needed.
    pub async fn session(&self, user_id: u64) -> Arc<Mutex<Session>> {
        if let Some(existing) = self.sessions.read().await.get(&user_id) {
            return Arc::clone(existing);
        }

        let mut sessions = self.sessions.write().await;
        Arc::clone(sessions.entry(user_id).or_insert_with(|| {
            debug!("Starting session for user {user_id}");
            Arc::new(Mutex::new(Session::new(Utc::now().date_naive())))
        }))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{store::MemoryStore, test_utils::*};

    fn session_with_coffee() -> Session {
        let mut session = Session::new(today());
        session
            .add_to_cart(&catalog_item(1, "Coffee", 25.0))
            .unwrap();
        session
    }

    #[test]
    fn test_new_session_defaults() {
        let session = Session::new(today());
        assert_eq!(session.tab(), Tab::Purchase);
        assert_eq!(session.checkout(), CheckoutState::Hidden);
        assert_eq!(session.manage_mode(), &ManageMode::Browsing);
        assert_eq!(session.report_date(), today());
    }

    #[test]
    fn test_open_checkout_requires_items() {
        let mut session = Session::new(today());
        assert!(matches!(session.open_checkout(), Err(Error::EmptyCart)));
        assert_eq!(session.checkout(), CheckoutState::Hidden);
    }

    #[test]
    fn test_cancel_checkout_transitions() {
        let mut session = session_with_coffee();
        assert!(matches!(
            session.cancel_checkout(),
            Err(Error::CheckoutNotOpen)
        ));

        session.open_checkout().unwrap();
        session.cancel_checkout().unwrap();
        assert_eq!(session.checkout(), CheckoutState::Hidden);
        assert_eq!(session.cart().item_count(), 1);
    }

    #[test]
    fn test_submitting_blocks_everything() {
        let mut session = session_with_coffee();
        session.open_checkout().unwrap();
        session.begin_confirm(Utc::now()).unwrap();

        assert!(matches!(
            session.begin_confirm(Utc::now()),
            Err(Error::CheckoutInProgress)
        ));
        assert!(matches!(
            session.cancel_checkout(),
            Err(Error::CheckoutInProgress)
        ));
        assert!(matches!(
            session.open_checkout(),
            Err(Error::CheckoutInProgress)
        ));
        assert!(matches!(
            session.add_to_cart(&catalog_item(2, "Tea", 20.0)),
            Err(Error::CheckoutInProgress)
        ));
        assert_eq!(session.checkout(), CheckoutState::Submitting);
    }

    #[test]
    fn test_finish_confirm_outcomes() {
        let mut session = session_with_coffee();
        session.open_checkout().unwrap();
        session.begin_confirm(Utc::now()).unwrap();
        session.finish_confirm(false);
        assert_eq!(session.checkout(), CheckoutState::Shown);
        assert!(!session.cart().is_empty());

        session.begin_confirm(Utc::now()).unwrap();
        session.finish_confirm(true);
        assert_eq!(session.checkout(), CheckoutState::Hidden);
        assert!(session.cart().is_empty());
    }

    #[test]
    fn test_changing_cart_dismisses_summary() {
        let mut session = session_with_coffee();
        session.open_checkout().unwrap();

        session.set_cart_quantity(1, 3).unwrap();

        assert_eq!(session.checkout(), CheckoutState::Hidden);
        assert_eq!(session.cart().quantity_of(1), Some(3));
    }

    #[test]
    fn test_leaving_purchase_tab_dismisses_summary() {
        let mut session = session_with_coffee();
        session.open_checkout().unwrap();

        session.select_tab(Tab::Reports);

        assert_eq!(session.tab(), Tab::Reports);
        assert_eq!(session.checkout(), CheckoutState::Hidden);
    }

    #[test]
    fn test_forms_replace_each_other() {
        let mut session = Session::new(today());
        let tea = catalog_item(2, "Tea", 20.0);

        session.open_add_form();
        session.draft_mut().unwrap().name = "Juice".to_string();
        session.start_edit(&tea);

        assert_eq!(
            session.manage_mode(),
            &ManageMode::Editing {
                id: 2,
                draft: ItemDraft {
                    name: "Tea".to_string(),
                    price: "20".to_string(),
                },
            }
        );
        assert_eq!(session.tab(), Tab::Manage);

        session.cancel_form();
        assert!(session.draft_mut().is_none());
    }

    #[test]
    fn test_report_date_is_remembered() {
        let mut session = session_with_coffee();
        session.select_report_date(date(2024, 3, 5));

        session.select_tab(Tab::Purchase);

        assert_eq!(session.report_date(), date(2024, 3, 5));
    }

    #[tokio::test]
    async fn test_rejected_form_can_be_cancelled() {
        let store = MemoryStore::new();
        let mut session = Session::new(today());
        session.open_add_form();

        assert!(session.submit_form(&store).await.is_err());
        assert_eq!(session.tab(), Tab::Manage);
        assert!(matches!(session.manage_mode(), ManageMode::Adding(_)));

        session.cancel_form();
        assert_eq!(session.manage_mode(), &ManageMode::Browsing);
    }

    #[tokio::test]
    async fn test_submit_add_form() -> Result<()> {
        let store = MemoryStore::new();
        let mut session = Session::new(today());
        session.open_add_form();
        if let Some(draft) = session.draft_mut() {
            draft.name = "Juice".to_string();
            draft.price = "35".to_string();
        }

        let saved = session.submit_form(&store).await?;

        assert_eq!(saved.name, "Juice");
        assert_eq!(session.manage_mode(), &ManageMode::Browsing);
        assert_eq!(store.list_items().await?, vec![saved]);
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_form_stays_open() -> Result<()> {
        let store = MemoryStore::new();
        let mut session = Session::new(today());
        session.open_add_form();
        if let Some(draft) = session.draft_mut() {
            draft.name = "Juice".to_string();
            draft.price = "lots".to_string();
        }

        let result = session.submit_form(&store).await;

        assert!(matches!(result, Err(Error::Validation { message: _ })));
        assert!(matches!(session.manage_mode(), ManageMode::Adding(_)));
        assert!(store.list_items().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_submit_edit_form_unknown_item() {
        let store = MemoryStore::new();
        let mut session = Session::new(today());
        session.start_edit(&catalog_item(9, "Ghost", 1.0));

        let result = session.submit_form(&store).await;

        assert!(matches!(result, Err(Error::ItemNotFound { id: 9 })));
        assert!(matches!(session.manage_mode(), ManageMode::Editing { .. }));
    }

    #[tokio::test]
    async fn test_submit_without_form() {
        let store = MemoryStore::new();
        let mut session = Session::new(today());
        assert!(matches!(
            session.submit_form(&store).await,
            Err(Error::Validation { message: _ })
        ));
    }

    #[tokio::test]
    async fn test_registry_reuses_sessions() {
        let registry = SessionRegistry::new();
        let first = registry.session(7).await;
        first
            .lock()
            .await
            .add_to_cart(&catalog_item(1, "Coffee", 25.0))
            .unwrap();

        let again = registry.session(7).await;
        assert!(Arc::ptr_eq(&first, &again));
        assert!(registry.session(8).await.lock().await.cart().is_empty());
    }
}
