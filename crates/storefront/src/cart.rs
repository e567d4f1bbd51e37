//! Persistent cart store.
//!
//! [`CartStore`] owns the shopper's [`Cart`], mirrors it to a durable
//! [`KeyValueStore`] slot after every command, and notifies registered
//! observers so views can re-render.
//!
//! Storage is best effort: a failed read starts an empty cart and a failed
//! write leaves the previous snapshot on disk. Neither is reported to the
//! caller, and neither affects the in-memory cart.

use rust_decimal::Decimal;
use tracing::{debug, error, instrument, warn};

use corner_shop_core::cart::{Cart, CartAction, CartLineItem};

use crate::storage::KeyValueStore;

/// Storage key holding the serialized cart.
pub const CART_STORAGE_KEY: &str = "shopify_cart";

/// Something that happened to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// A line was added or its quantity merged.
    ItemAdded { id: String, quantity: u32 },
    /// A line was removed (or was already absent).
    ItemRemoved { id: String },
    /// A line's quantity was set. Zero or less removes it.
    QuantityUpdated { id: String, quantity: i64 },
}

impl CartEvent {
    /// Toast text to show the shopper, if this event warrants one.
    ///
    /// Quantity changes happen inline in the cart and are not announced.
    #[must_use]
    pub const fn notice(&self) -> Option<&'static str> {
        match self {
            Self::ItemAdded { .. } => Some("Added to cart"),
            Self::ItemRemoved { .. } => Some("Item removed from cart"),
            Self::QuantityUpdated { .. } => None,
        }
    }
}

/// Receives cart events along with the cart state after the change.
pub trait CartObserver: Send + Sync {
    fn on_cart_event(&self, event: &CartEvent, cart: &Cart);
}

impl<F> CartObserver for F
where
    F: Fn(&CartEvent, &Cart) + Send + Sync,
{
    fn on_cart_event(&self, event: &CartEvent, cart: &Cart) {
        self(event, cart);
    }
}

/// The shopper's cart, persisted to a storage slot.
pub struct CartStore<S> {
    cart: Cart,
    storage: S,
    observers: Vec<Box<dyn CartObserver>>,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Restore the cart from storage.
    ///
    /// A missing slot, unreadable storage, or unparseable contents all start
    /// an empty cart.
    #[instrument(skip(storage))]
    pub fn load(storage: S) -> Self {
        let cart = match storage.get(CART_STORAGE_KEY) {
            Ok(Some(raw)) => serde_json::from_str::<Cart>(&raw).unwrap_or_else(|e| {
                warn!(error = %e, "Failed to parse stored cart, starting empty");
                Cart::new()
            }),
            Ok(None) => {
                debug!("No stored cart");
                Cart::new()
            }
            Err(e) => {
                error!(error = %e, "Failed to read stored cart, starting empty");
                Cart::new()
            }
        };

        debug!(lines = cart.len(), "Cart restored");

        Self {
            cart,
            storage,
            observers: Vec::new(),
        }
    }

    /// Register an observer for future cart events.
    pub fn subscribe(&mut self, observer: impl CartObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Add a line, merging quantities with an existing line of the same ID.
    pub fn add_item(&mut self, item: CartLineItem) {
        let event = CartEvent::ItemAdded {
            id: item.id.clone(),
            quantity: item.quantity,
        };
        self.dispatch(CartAction::AddItem(item), &event);
    }

    /// Remove a line. Removing an absent line is not an error.
    pub fn remove_item(&mut self, id: &str) {
        let event = CartEvent::ItemRemoved { id: id.to_string() };
        self.dispatch(CartAction::RemoveItem { id: id.to_string() }, &event);
    }

    /// Set a line's quantity. Zero or less removes the line.
    pub fn update_quantity(&mut self, id: &str, quantity: i64) {
        let event = CartEvent::QuantityUpdated {
            id: id.to_string(),
            quantity,
        };
        self.dispatch(
            CartAction::UpdateQuantity {
                id: id.to_string(),
                quantity,
            },
            &event,
        );
    }

    fn dispatch(&mut self, action: CartAction, event: &CartEvent) {
        let changed = self.cart.apply(action);
        debug!(?event, changed, "Cart command applied");

        self.persist();

        for observer in &self.observers {
            observer.on_cart_event(event, &self.cart);
        }
    }

    fn persist(&self) {
        let raw = match serde_json::to_string(&self.cart) {
            Ok(raw) => raw,
            Err(e) => {
                error!(error = %e, "Failed to serialize cart");
                return;
            }
        };
        if let Err(e) = self.storage.set(CART_STORAGE_KEY, &raw) {
            error!(error = %e, "Failed to save cart");
        }
    }

    /// Current cart state.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Sum of `price × quantity` over all lines.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.cart.subtotal()
    }
}

impl<S> std::fmt::Debug for CartStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::storage::{MemoryStore, StorageError};

    fn line(id: &str, price: i64, quantity: u32) -> CartLineItem {
        CartLineItem {
            id: id.to_string(),
            title: format!("Product {id}"),
            variant_title: None,
            image: None,
            price: Decimal::from(price),
            quantity,
        }
    }

    /// Storage whose reads and writes always fail.
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Poisoned)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Poisoned)
        }
    }

    #[test]
    fn test_load_empty_storage() {
        let store = CartStore::load(MemoryStore::new());
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_load_malformed_storage_starts_empty() {
        let storage = MemoryStore::new();
        storage.set(CART_STORAGE_KEY, "{not json").unwrap();
        let store = CartStore::load(storage);
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_load_unreadable_storage_starts_empty() {
        let store = CartStore::load(BrokenStore);
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_every_command_persists() {
        let storage = Arc::new(MemoryStore::new());
        let mut store = CartStore::load(Arc::clone(&storage));

        store.add_item(line("a", 10, 2));
        let saved = storage.get(CART_STORAGE_KEY).unwrap().unwrap();
        assert!(saved.contains("\"quantity\":2"));

        store.update_quantity("a", 5);
        let saved = storage.get(CART_STORAGE_KEY).unwrap().unwrap();
        assert!(saved.contains("\"quantity\":5"));

        store.remove_item("a");
        let saved = storage.get(CART_STORAGE_KEY).unwrap().unwrap();
        assert_eq!(saved, r#"{"items":[]}"#);
    }

    #[test]
    fn test_reload_restores_identical_cart() {
        let storage = Arc::new(MemoryStore::new());
        let mut store = CartStore::load(Arc::clone(&storage));
        store.add_item(line("b", 5, 3));
        store.add_item(line("a", 10, 2));
        store.add_item(line("b", 5, 1));

        let reloaded = CartStore::load(Arc::clone(&storage));
        assert_eq!(reloaded.cart(), store.cart());
        assert_eq!(reloaded.subtotal(), Decimal::from(40));
    }

    #[test]
    fn test_write_failure_keeps_in_memory_state() {
        let mut store = CartStore::load(BrokenStore);
        store.add_item(line("a", 10, 2));
        store.add_item(line("b", 5, 3));
        assert_eq!(store.cart().len(), 2);
        assert_eq!(store.subtotal(), Decimal::from(35));
    }

    #[test]
    fn test_observers_receive_events_and_notices() {
        let seen: Arc<Mutex<Vec<(CartEvent, usize)>>> = Arc::default();
        let mut store = CartStore::load(MemoryStore::new());
        let sink = Arc::clone(&seen);
        store.subscribe(move |event: &CartEvent, cart: &Cart| {
            sink.lock().unwrap().push((event.clone(), cart.len()));
        });

        store.add_item(line("a", 10, 1));
        store.update_quantity("a", 3);
        store.remove_item("missing");

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0].0.notice(), Some("Added to cart"));
        assert_eq!(seen[0].1, 1);
        assert_eq!(seen[1].0.notice(), None);
        assert_eq!(seen[2].0.notice(), Some("Item removed from cart"));
        assert_eq!(seen[2].1, 1);
    }

    #[test]
    fn test_remove_absent_id_leaves_cart_unchanged() {
        let mut store = CartStore::load(MemoryStore::new());
        store.add_item(line("a", 10, 1));
        let before = store.cart().clone();
        store.remove_item("missing");
        assert_eq!(store.cart(), &before);
    }
}
