//! Derived totals for the booking summary panel.
//!
//! Pure functions of the draft and the fetched add-on catalog; nothing here
//! is cached. The reservations API recomputes the authoritative total
//! (including taxes) at submission time, so these figures drive the display
//! only.

use super::state::BookingDraft;
use crate::types::Addon;
use serde::{Deserialize, Serialize};

/// Breakdown of the displayed totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TotalsBreakdown {
    /// Room portion.
    pub room_subtotal: f64,
    /// Add-on portion.
    pub addon_subtotal: f64,
    /// Sum of the two.
    pub grand_total: f64,
}

/// Room subtotal: nightly price times room count.
#[must_use]
pub fn room_subtotal(draft: &BookingDraft) -> f64 {
    draft.price_per_night.unwrap_or(0.0) * f64::from(draft.room_count.max(1))
}

/// Add-on subtotal: catalog price of every add-on with quantity above zero.
///
/// The toggle is binary, so the price counts once per selection rather than
/// scaling with a quantity.
pub fn addon_subtotal<'a, I>(draft: &BookingDraft, catalog: I) -> f64
where
    I: IntoIterator<Item = &'a Addon>,
{
    catalog
        .into_iter()
        .filter(|addon| draft.addon_quantity(addon.addon_id) > 0)
        .map(|addon| addon.price)
        .sum()
}

/// Grand total: room subtotal plus add-on subtotal.
pub fn grand_total<'a, I>(draft: &BookingDraft, catalog: I) -> f64
where
    I: IntoIterator<Item = &'a Addon>,
{
    room_subtotal(draft) + addon_subtotal(draft, catalog)
}

/// Full breakdown in one pass.
pub fn breakdown<'a, I>(draft: &BookingDraft, catalog: I) -> TotalsBreakdown
where
    I: IntoIterator<Item = &'a Addon>,
{
    let room = room_subtotal(draft);
    let addons = addon_subtotal(draft, catalog);
    TotalsBreakdown {
        room_subtotal: room,
        addon_subtotal: addons,
        grand_total: room + addons,
    }
}
