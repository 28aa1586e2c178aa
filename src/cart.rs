//! Cart state

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::storage::CartRepository;

/// One line item in the cart.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    /// Opaque catalog identifier, unique within the cart.
    pub id: String,

    /// Display name, copied from the catalog at add time.
    pub name: String,

    /// Number of units. An entry with a quantity of zero never exists; it
    /// is removed instead.
    pub quantity: u32,
}

/// Ordered sequence of cart entries, keyed by entry id.
///
/// Insertion order is preserved for display purposes but carries no
/// semantic weight. Serializes transparently as a plain array of entries,
/// which is also the persisted layout.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    /// The entries in the cart, in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Check whether the cart has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of the quantities of all entries.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.entries.iter().map(|entry| entry.quantity).sum()
    }
}

/// Owner of the authoritative, persisted cart.
///
/// All cart mutations go through this store; every mutation is followed by
/// a best-effort persistence write. Collaborators read a fresh snapshot on
/// each invocation rather than holding their own copy.
#[derive(Debug)]
pub struct CartStore<R> {
    cart: Cart,
    repository: R,
}

impl<R: CartRepository> CartStore<R> {
    /// Rehydrate a store from persisted state.
    ///
    /// Malformed persisted data must not crash the store: a read failure is
    /// logged and degrades to an empty cart.
    pub fn open(repository: R) -> Self {
        let cart = match repository.load() {
            Ok(cart) => cart,
            Err(error) => {
                warn!(%error, "failed to load persisted cart, starting empty");
                Cart::default()
            }
        };

        Self { cart, repository }
    }

    /// Add one unit of the given catalog item.
    ///
    /// An existing entry with the same id has its quantity incremented;
    /// otherwise a new entry with quantity 1 is appended.
    pub fn add(&mut self, id: &str, name: &str) {
        match self.cart.entries.iter_mut().find(|entry| entry.id == id) {
            Some(entry) => entry.quantity = entry.quantity.saturating_add(1),
            None => self.cart.entries.push(CartEntry {
                id: id.to_owned(),
                name: name.to_owned(),
                quantity: 1,
            }),
        }

        debug!(id, "added item to cart");
        self.persist();
    }

    /// Adjust the quantity of the entry with the given id by a signed delta.
    ///
    /// An unknown id is a no-op. A resulting quantity of zero or less
    /// removes the entry entirely.
    pub fn change_quantity(&mut self, id: &str, delta: i32) {
        let Some(position) = self.cart.entries.iter().position(|entry| entry.id == id) else {
            return;
        };

        let current = self
            .cart
            .entries
            .get(position)
            .map_or(0, |entry| i64::from(entry.quantity));
        let updated = current.saturating_add(i64::from(delta));

        if updated <= 0 {
            self.cart.entries.remove(position);
            debug!(id, "removed item from cart");
        } else if let Some(entry) = self.cart.entries.get_mut(position) {
            entry.quantity = u32::try_from(updated).unwrap_or(u32::MAX);
            debug!(id, quantity = entry.quantity, "changed item quantity");
        }

        self.persist();
    }

    /// Delete the entry with the given id; no-op if absent.
    pub fn remove(&mut self, id: &str) {
        self.cart.entries.retain(|entry| entry.id != id);

        debug!(id, "removed item from cart");
        self.persist();
    }

    /// Empty the cart. Invoked after a successful order submission.
    pub fn clear(&mut self) {
        self.cart.entries.clear();

        debug!("cleared cart");
        self.persist();
    }

    /// Read-only view of the current entries; callers must not retain it
    /// across mutations.
    #[must_use]
    pub fn snapshot(&self) -> &[CartEntry] {
        self.cart.entries()
    }

    /// Persistence is best-effort: a failed write is logged, not surfaced.
    fn persist(&self) {
        if let Err(error) = self.repository.save(&self.cart) {
            warn!(%error, "failed to persist cart");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use crate::storage::StorageError;

    use super::*;

    /// In-memory repository standing in for the local storage file.
    #[derive(Debug, Default)]
    struct MemoryStore {
        saved: RefCell<Option<Cart>>,
    }

    impl CartRepository for MemoryStore {
        fn load(&self) -> Result<Cart, StorageError> {
            Ok(self.saved.borrow().clone().unwrap_or_default())
        }

        fn save(&self, cart: &Cart) -> Result<(), StorageError> {
            *self.saved.borrow_mut() = Some(cart.clone());
            Ok(())
        }
    }

    /// Repository whose reads always fail with malformed content.
    #[derive(Debug)]
    struct BrokenStore;

    impl CartRepository for BrokenStore {
        fn load(&self) -> Result<Cart, StorageError> {
            serde_json::from_str::<Cart>("not json").map_err(StorageError::from)
        }

        fn save(&self, _cart: &Cart) -> Result<(), StorageError> {
            Ok(())
        }
    }

    fn quantities(store: &CartStore<MemoryStore>) -> Vec<(String, u32)> {
        store
            .snapshot()
            .iter()
            .map(|entry| (entry.id.clone(), entry.quantity))
            .collect()
    }

    #[test]
    fn add_appends_new_entry_with_quantity_one() {
        let mut store = CartStore::open(MemoryStore::default());

        store.add("tulip-01", "Tulip");

        assert_eq!(quantities(&store), vec![("tulip-01".to_owned(), 1)]);
    }

    #[test]
    fn add_same_id_twice_merges_into_one_entry() {
        let mut store = CartStore::open(MemoryStore::default());

        store.add("tulip-01", "Tulip");
        store.add("tulip-01", "Tulip");

        assert_eq!(quantities(&store), vec![("tulip-01".to_owned(), 2)]);
    }

    #[test]
    fn add_preserves_insertion_order() {
        let mut store = CartStore::open(MemoryStore::default());

        store.add("b", "Second");
        store.add("a", "First");
        store.add("b", "Second");

        let ids: Vec<&str> = store.snapshot().iter().map(|entry| entry.id.as_str()).collect();

        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn change_quantity_applies_signed_delta() {
        let mut store = CartStore::open(MemoryStore::default());

        store.add("vase", "Vase");
        store.change_quantity("vase", 3);
        store.change_quantity("vase", -1);

        assert_eq!(quantities(&store), vec![("vase".to_owned(), 3)]);
    }

    #[test]
    fn change_quantity_to_zero_removes_entry() {
        let mut store = CartStore::open(MemoryStore::default());

        store.add("vase", "Vase");
        store.add("vase", "Vase");
        store.change_quantity("vase", -2);

        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn change_quantity_below_zero_removes_entry() {
        let mut store = CartStore::open(MemoryStore::default());

        store.add("vase", "Vase");
        store.change_quantity("vase", -5);

        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn change_quantity_unknown_id_is_noop() {
        let mut store = CartStore::open(MemoryStore::default());

        store.add("vase", "Vase");
        store.change_quantity("missing", 1);

        assert_eq!(quantities(&store), vec![("vase".to_owned(), 1)]);
    }

    #[test]
    fn no_sequence_of_mutations_leaves_a_zero_quantity_entry() {
        let mut store = CartStore::open(MemoryStore::default());

        store.add("a", "A");
        store.add("b", "B");
        store.change_quantity("a", -1);
        store.change_quantity("b", 2);
        store.change_quantity("b", -3);
        store.remove("missing");
        store.add("c", "C");

        assert!(store.snapshot().iter().all(|entry| entry.quantity >= 1));
    }

    #[test]
    fn remove_deletes_matching_entry() {
        let mut store = CartStore::open(MemoryStore::default());

        store.add("a", "A");
        store.add("b", "B");
        store.remove("a");

        assert_eq!(quantities(&store), vec![("b".to_owned(), 1)]);
    }

    #[test]
    fn remove_unknown_id_is_noop() {
        let mut store = CartStore::open(MemoryStore::default());

        store.add("a", "A");
        store.remove("missing");

        assert_eq!(quantities(&store), vec![("a".to_owned(), 1)]);
    }

    #[test]
    fn clear_empties_the_cart() {
        let mut store = CartStore::open(MemoryStore::default());

        store.add("a", "A");
        store.add("b", "B");
        store.clear();

        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn every_mutation_is_persisted() {
        let repository = MemoryStore::default();
        let mut store = CartStore::open(repository);

        store.add("a", "A");

        let persisted = store.repository.saved.borrow().clone();

        assert_eq!(persisted.as_ref().map(Cart::total_quantity), Some(1));
    }

    #[test]
    fn open_with_malformed_persisted_data_degrades_to_empty() {
        let store = CartStore::open(BrokenStore);

        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn total_quantity_sums_all_entries() {
        let mut store = CartStore::open(MemoryStore::default());

        store.add("a", "A");
        store.add("a", "A");
        store.add("b", "B");

        let total: u32 = store.snapshot().iter().map(|entry| entry.quantity).sum();

        assert_eq!(total, 3);
    }
}
