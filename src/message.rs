//! Outbound order message
//!
//! Serializes cart contents plus contact fields into the structured text
//! block handed to the messaging service. Formatting is deterministic; the
//! produced link is percent-encoded for the service's `?text=` parameter.
//! No I/O happens here.

use crate::{cart::CartEntry, checkout::Contact, config::StorefrontConfig};

/// Fixed greeting opening every order message. The asterisks are the
/// messaging service's bold markers.
const GREETING: &str = "*Hello! I would like to request a quote:*";

/// Render the order message for the given cart entries and contact.
///
/// Layout: greeting, a `PRODUCTS:` section with one `- <quantity>x <name>`
/// line per entry, a `CUSTOMER DATA:` section with the contact fields, and
/// a trailing observation line only when the observation is non-empty.
/// Callers guard against empty carts before invoking this.
#[must_use]
pub fn order_message(entries: &[CartEntry], contact: &Contact) -> String {
    let mut message = format!("{GREETING}\n\n*PRODUCTS:*\n");

    for entry in entries {
        message.push_str(&format!("- {}x {}\n", entry.quantity, entry.name));
    }

    message.push_str("\n*CUSTOMER DATA:*\n");
    message.push_str(&format!("Name: {}\n", contact.name));
    message.push_str(&format!("Phone: {}\n", contact.phone));
    message.push_str(&format!("Email: {}\n", contact.email));
    message.push_str(&format!("City: {}\n", contact.city));

    if let Some(observation) = contact.observation.as_deref()
        && !observation.trim().is_empty()
    {
        message.push_str(&format!("Obs: {observation}"));
    }

    message
}

/// Build the messaging-service deep link for a rendered message.
///
/// The link has the form `<base>/<recipient>?text=<percent-encoded body>`;
/// the recipient is fixed configuration, never user input.
#[must_use]
pub fn order_link(config: &StorefrontConfig, message: &str) -> String {
    format!(
        "{}/{}?text={}",
        config.message_base.trim_end_matches('/'),
        config.recipient,
        urlencoding::encode(message)
    )
}
