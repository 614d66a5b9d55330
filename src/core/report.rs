//! Report generation business logic.
//!
//! Daily reports are derived on demand from the full purchase history and the selected
//! date; nothing about a report is stored. The formatting helpers return plain strings
//! that the bot layer places into its replies.

use crate::{
    errors::{Error, Result},
    models::{Purchase, PurchaseLine},
};
use chrono::NaiveDate;

/// Sales for one calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyReport {
    /// The day being reported
    pub date: NaiveDate,
    /// Purchases made that day, newest first
    pub purchases: Vec<Purchase>,
    /// Sum of the purchase totals
    pub total: f64,
}

impl DailyReport {
    /// Number of purchases that day.
    #[must_use]
    pub fn count(&self) -> usize {
        self.purchases.len()
    }
}

/// Builds the report for `date` from all recorded purchases.
///
/// A purchase belongs to the day of its UTC timestamp.
#[must_use]
pub fn daily_report(purchases: &[Purchase], date: NaiveDate) -> DailyReport {
    let mut matching: Vec<Purchase> = purchases
        .iter()
        .filter(|purchase| purchase.purchased_at.date_naive() == date)
        .cloned()
        .collect();
    matching.sort_by(|a, b| b.purchased_at.cmp(&a.purchased_at).then(b.id.cmp(&a.id)));

    let total = matching.iter().map(|purchase| purchase.total).sum();

    DailyReport {
        date,
        purchases: matching,
        total,
    }
}

/// Parses a report date in `YYYY-MM-DD` form.
///
/// # Errors
/// Returns [`Error::Validation`] if the text is not a valid date.
pub fn parse_report_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|e| Error::Validation {
        message: format!("'{trimmed}' is not a date in YYYY-MM-DD form: {e}"),
    })
}

/// Formats an amount with the currency symbol, dropping the decimals of whole amounts.
///
/// `format_amount("₹", 25.0)` gives `"₹25"`, `format_amount("₹", 12.5)` gives `"₹12.50"`.
#[must_use]
pub fn format_amount(currency: &str, amount: f64) -> String {
    if amount.fract().abs() < f64::EPSILON {
        format!("{currency}{amount:.0}")
    } else {
        format!("{currency}{amount:.2}")
    }
}

/// Formats one purchase line like `"Coffee × 2 = ₹50"`.
#[must_use]
pub fn format_purchase_line(currency: &str, line: &PurchaseLine) -> String {
    format!(
        "{} × {} = {}",
        line.name,
        line.quantity,
        format_amount(currency, line.subtotal())
    )
}

/// `"1 transaction"`, `"3 transactions"`.
#[must_use]
pub fn pluralize(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}
