//! Checkout flow
//!
//! Drives the cart-to-order journey: `Idle -> CartOpen -> CheckoutOpen ->
//! submitted (back to `Idle`, cart cleared)`. Opening checkout requires a
//! non-empty cart; submission requires a complete contact.

use thiserror::Error;
use tracing::info;

use crate::{
    cart::{CartEntry, CartStore},
    config::StorefrontConfig,
    message::{order_link, order_message},
    storage::CartRepository,
};

/// Customer-identification fields supplied at checkout.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Contact {
    /// Customer name.
    pub name: String,

    /// Contact phone number.
    pub phone: String,

    /// Contact email address.
    pub email: String,

    /// Delivery city.
    pub city: String,

    /// Optional free-form note; omitted from the order message when empty.
    pub observation: Option<String>,
}

/// Errors raised by contact validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContactError {
    /// A required field was empty or missing.
    #[error("missing required contact field: {0}")]
    MissingField(&'static str),
}

impl Contact {
    /// Check that every required field is present and non-empty.
    ///
    /// # Errors
    ///
    /// Returns a [`ContactError::MissingField`] naming the first required
    /// field that is empty after trimming.
    pub fn validate(&self) -> Result<(), ContactError> {
        let required = [
            ("name", &self.name),
            ("phone", &self.phone),
            ("email", &self.email),
            ("city", &self.city),
        ];

        for (label, value) in required {
            if value.trim().is_empty() {
                return Err(ContactError::MissingField(label));
            }
        }

        Ok(())
    }
}

/// Errors that block a checkout transition.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// Checkout was attempted with no items in the cart. Surfaced as a
    /// user-visible notice; the flow state is unchanged.
    #[error("your cart is empty")]
    EmptyCart,

    /// The supplied contact failed validation.
    #[error(transparent)]
    Contact(#[from] ContactError),

    /// Submission was attempted while the checkout form was not open.
    #[error("checkout is not open")]
    NotOpen,
}

/// Observable states of the checkout flow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CheckoutState {
    /// Nothing open; the resting state.
    #[default]
    Idle,

    /// The cart panel is open.
    CartOpen,

    /// The checkout form is open.
    CheckoutOpen,
}

/// Outbound order request handed to the external opener.
///
/// Producing this value performs no network I/O; opening the link in a new
/// browsing context is the external collaborator's responsibility.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderRequest {
    /// Fully rendered order message body.
    pub message: String,

    /// Messaging-service deep link carrying the percent-encoded body.
    pub url: String,
}

/// State machine driving the checkout journey.
#[derive(Debug, Default)]
pub struct CheckoutFlow {
    state: CheckoutState,
}

impl CheckoutFlow {
    /// Create a flow in the idle state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current flow state.
    #[must_use]
    pub fn state(&self) -> CheckoutState {
        self.state
    }

    /// Open the cart panel.
    pub fn open_cart(&mut self) {
        self.state = CheckoutState::CartOpen;
    }

    /// Close everything and return to the resting state.
    pub fn close(&mut self) {
        self.state = CheckoutState::Idle;
    }

    /// Open the checkout form.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] when the cart has no entries at
    /// the moment of the attempt; the flow state is left unchanged.
    pub fn open_checkout(&mut self, entries: &[CartEntry]) -> Result<(), CheckoutError> {
        if entries.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        self.state = CheckoutState::CheckoutOpen;

        Ok(())
    }

    /// Cancel an open checkout form, falling back to the cart panel.
    pub fn cancel(&mut self) {
        self.state = match self.state {
            CheckoutState::CheckoutOpen => CheckoutState::CartOpen,
            CheckoutState::CartOpen | CheckoutState::Idle => CheckoutState::Idle,
        };
    }

    /// Submit the order: validate the contact, format the outbound message
    /// and link, clear the cart, and return to the idle state.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::NotOpen`] when the checkout form is not
    /// open, [`CheckoutError::EmptyCart`] when the cart emptied since the
    /// form was opened, or a [`ContactError`] when a required contact field
    /// is missing. The cart and flow state are unchanged on error.
    pub fn submit<R: CartRepository>(
        &mut self,
        store: &mut CartStore<R>,
        contact: &Contact,
        config: &StorefrontConfig,
    ) -> Result<OrderRequest, CheckoutError> {
        if self.state != CheckoutState::CheckoutOpen {
            return Err(CheckoutError::NotOpen);
        }

        if store.snapshot().is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        contact.validate()?;

        let message = order_message(store.snapshot(), contact);
        let url = order_link(config, &message);

        store.clear();
        self.state = CheckoutState::Idle;

        info!(recipient = %config.recipient, "order submitted");

        Ok(OrderRequest { message, url })
    }
}
