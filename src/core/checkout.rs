//! Checkout business logic - Records a cart as a purchase.
//!
//! Every purchase line is a snapshot of the item's name and price at confirmation time,
//! so later catalog edits or deletions never change a recorded purchase. The header and
//! its lines are handed to the store in a single call, which writes them atomically.

use crate::{
    core::{cart::Cart, session::Session},
    errors::{Error, Result},
    models::{NewPurchase, Purchase, PurchaseLine},
    store::PurchaseStore,
};
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{error, info, instrument};

/// Builds the purchase that confirming `cart` at `purchased_at` would record.
///
/// # Errors
/// Returns [`Error::EmptyCart`] if the cart has no lines.
pub fn prepare_purchase(cart: &Cart, purchased_at: DateTime<Utc>) -> Result<NewPurchase> {
    if cart.is_empty() {
        return Err(Error::EmptyCart);
    }

    let lines: Vec<PurchaseLine> = cart.lines().iter().map(PurchaseLine::from).collect();
    let total = lines.iter().map(PurchaseLine::subtotal).sum();

    Ok(NewPurchase {
        lines,
        total,
        purchased_at,
    })
}

/// Records the cart as a purchase and clears it.
///
/// Nothing is sent to the store for an empty cart. If the store call fails the cart is
/// left as it was.
///
/// # Errors
/// Returns [`Error::EmptyCart`] for an empty cart, or the store's error.
pub async fn confirm<S>(store: &S, cart: &mut Cart) -> Result<Purchase>
where
    S: PurchaseStore + ?Sized,
{
    let pending = prepare_purchase(cart, Utc::now())?;
    let purchase = store.record_purchase(&pending).await?;
    cart.clear();
    Ok(purchase)
}

/// Confirms the open checkout of a session.
///
/// The session lock is not held while the store call is in flight. During that time the
/// session is in the submitting state, so a second confirm for the same cart is rejected
/// with [`Error::CheckoutInProgress`] instead of recording a duplicate purchase.
///
/// # Errors
/// Returns [`Error::CheckoutNotOpen`] if checkout was not opened,
/// [`Error::CheckoutInProgress`] if a confirm is already running, or the store's error.
#[instrument(skip(session, store))]
pub async fn confirm_checkout<S>(session: &Mutex<Session>, store: &S) -> Result<Purchase>
where
    S: PurchaseStore + ?Sized,
{
    let pending = session.lock().await.begin_confirm(Utc::now())?;

    let result = store.record_purchase(&pending).await;

    let mut guard = session.lock().await;
    match &result {
        Ok(purchase) => {
            guard.finish_confirm(true);
            info!(
                "Purchase {} confirmed: {} lines, total {}",
                purchase.id,
                purchase.lines.len(),
                purchase.total
            );
        }
        Err(e) => {
            guard.finish_confirm(false);
            error!("Failed to record purchase: {e}");
        }
    }
    result
}
