//! Cart presentation
//!
//! Pure projection from cart state to a displayable view plus a table of
//! logical action bindings. The physical frontend is responsible for
//! binding real input events to these actions and for re-rendering after
//! every store mutation; cart sizes are human-scale, so each render is a
//! full replace rather than an incremental patch.

use crate::cart::CartEntry;

/// Fixed placeholder shown in place of a computed total. Pricing is
/// quote-based and resolved out-of-band after the order is submitted.
pub const TOTAL_PLACEHOLDER: &str = "Price on request";

/// Sentinel message shown when the cart has no entries.
pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty.";

/// Logical interaction available on a rendered cart row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CartAction {
    /// Add one unit of the bound entry.
    Increment,

    /// Remove one unit of the bound entry.
    Decrement,

    /// Delete the bound entry outright.
    Remove,
}

/// Pairing of a logical action with the entry id it applies to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionBinding {
    /// The action to perform.
    pub action: CartAction,

    /// Id of the cart entry the action is bound to.
    pub item_id: String,
}

/// One renderable cart row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartRow {
    /// Id of the backing cart entry.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Units of this entry in the cart.
    pub quantity: u32,
}

/// Renderable projection of the cart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartView {
    /// One row per cart entry, in cart order.
    pub rows: Vec<CartRow>,

    /// Actions the frontend should wire to its input events.
    pub bindings: Vec<ActionBinding>,

    /// Total item count across all entries, shown on the cart badge.
    pub badge_count: u32,

    /// Total-price field; always the fixed placeholder label.
    pub total_label: &'static str,

    /// Sentinel message, present only when the cart is empty.
    pub empty_message: Option<&'static str>,
}

/// Project the given cart entries into a displayable view.
///
/// An empty cart yields a zero badge count, no rows or bindings, and the
/// empty-cart sentinel message.
#[must_use]
pub fn render(entries: &[CartEntry]) -> CartView {
    let badge_count = entries.iter().map(|entry| entry.quantity).sum();

    let rows = entries
        .iter()
        .map(|entry| CartRow {
            id: entry.id.clone(),
            name: entry.name.clone(),
            quantity: entry.quantity,
        })
        .collect();

    let bindings = entries
        .iter()
        .flat_map(|entry| {
            [
                CartAction::Increment,
                CartAction::Decrement,
                CartAction::Remove,
            ]
            .into_iter()
            .map(|action| ActionBinding {
                action,
                item_id: entry.id.clone(),
            })
        })
        .collect();

    CartView {
        rows,
        bindings,
        badge_count,
        total_label: TOTAL_PLACEHOLDER,
        empty_message: entries.is_empty().then_some(EMPTY_CART_MESSAGE),
    }
}
