//! Cart synchronization against the remote commerce platform.
//!
//! [`CartSync`] owns exactly one local view of the shopper's cart. The
//! platform is the sole source of truth: every mutation sends a request and
//! adopts the returned cart wholesale as the new snapshot - quantities and
//! totals are never computed locally. The active cart identifier is
//! persisted through an injected [`CartIdStore`] so the cart survives
//! process restarts, and the remote API is reached through an injected
//! [`CartService`] so the component can be driven against a stand-in.
//!
//! # State
//!
//! The component moves between four observable states, derived from one
//! mutex-guarded record:
//!
//! ```text
//! Uninitialized -> Loading -> { Ready, Errored }
//! ```
//!
//! Any operation from `Ready` passes through `Loading` and settles back to
//! `Ready` or `Errored`. `Errored` never blocks further operations - the
//! next successful call returns to `Ready`. [`CartSync::clear`] returns to
//! `Uninitialized` from any state.
//!
//! # Failures
//!
//! Operations record their outcome in component state instead of returning
//! errors: a failed mutation leaves the previous snapshot untouched and
//! sets an error message for the view layer to display. Business-rule
//! rejections surface their platform message verbatim; transport failures
//! surface a generic message. Nothing is retried automatically - retry is a
//! caller action (re-invoke the operation, or [`CartSync::refresh`]).
//!
//! # Concurrency
//!
//! Mutations are not serialized against each other. Remote calls are
//! awaited outside the state lock, so two overlapping mutations both go
//! out, and whichever response arrives last becomes the snapshot. The
//! platform reconciles concurrent mutations server-side, so the local view
//! converges once the final response lands.

mod service;
mod store;

pub use service::{CartService, CartServiceError};
pub use store::{CartIdStore, FileStore, MemoryStore, StoreError};

use std::sync::{Mutex, MutexGuard, PoisonError};

use rust_decimal::Decimal;

use driftwood_core::{CartId, CartLineId, VariantId};

use crate::shopify::types::{Cart, CartLineInput, CartLineUpdateInput};

/// Observable component state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartStatus {
    /// No cart has been loaded or created yet.
    Uninitialized,
    /// At least one remote operation is in flight.
    Loading,
    /// A snapshot is present and the last operation succeeded.
    Ready,
    /// The last operation failed; any prior snapshot is still shown.
    Errored,
}

#[derive(Debug, Default)]
struct CartState {
    snapshot: Option<Cart>,
    pending: usize,
    error: Option<String>,
}

/// Synchronized local view of the shopper's remote cart.
pub struct CartSync<S, P> {
    service: S,
    store: P,
    state: Mutex<CartState>,
}

impl<S: CartService, P: CartIdStore> CartSync<S, P> {
    /// Create a component with no cart loaded.
    pub fn new(service: S, store: P) -> Self {
        Self {
            service,
            store,
            state: Mutex::new(CartState::default()),
        }
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Load the persisted cart, or create a fresh one.
    ///
    /// Run once per session start. A persisted identifier that no longer
    /// resolves (expired or deleted remotely) is replaced by a newly created
    /// cart; that recovery is silent, not an error.
    pub async fn initialize(&self) {
        self.begin();
        let outcome = self.sync_from_store().await;
        self.settle(outcome);
    }

    /// Re-read the persisted identifier and re-fetch from the platform.
    ///
    /// The documented recovery path when the view is believed stale.
    pub async fn refresh(&self) {
        self.initialize().await;
    }

    /// Add `quantity` of a variant to the cart.
    ///
    /// Creates a cart first when none exists yet. On success the platform's
    /// returned cart replaces the snapshot; the local view is never
    /// incremented optimistically.
    pub async fn add_line(&self, variant: VariantId, quantity: u32) {
        self.begin();

        let cart_id = match self.current_cart_id() {
            Some(id) => id,
            None => match self.sync_from_store().await {
                Ok(cart) => {
                    let id = cart.id.clone();
                    // Adopt the discovered cart now, so a failing add still
                    // leaves it visible.
                    self.lock().snapshot = Some(cart);
                    id
                }
                Err(message) => {
                    self.settle(Err(message));
                    return;
                }
            },
        };

        let lines = vec![CartLineInput {
            merchandise_id: variant,
            quantity: i64::from(quantity),
        }];

        let outcome = self
            .service
            .add_lines(&cart_id, lines)
            .await
            .map_err(|err| surface(&err, "Failed to add item to cart"));
        self.settle(outcome);
    }

    /// Set the quantity of an existing line.
    ///
    /// A target quantity of zero or less removes the line instead; the
    /// platform's update operation is never called with a non-positive
    /// quantity.
    pub async fn update_line(&self, line_id: &CartLineId, quantity: i64) {
        if quantity <= 0 {
            self.remove_line(line_id).await;
            return;
        }

        self.begin();

        let Some(cart_id) = self.current_cart_id() else {
            self.settle(Err("No cart to update".to_string()));
            return;
        };

        let lines = vec![CartLineUpdateInput {
            id: line_id.clone(),
            quantity,
        }];

        let outcome = self
            .service
            .update_lines(&cart_id, lines)
            .await
            .map_err(|err| surface(&err, "Failed to update cart item"));
        self.settle(outcome);
    }

    /// Remove a line from the cart.
    pub async fn remove_line(&self, line_id: &CartLineId) {
        self.begin();

        let Some(cart_id) = self.current_cart_id() else {
            self.settle(Err("No cart to remove from".to_string()));
            return;
        };

        let outcome = self
            .service
            .remove_lines(&cart_id, vec![line_id.clone()])
            .await
            .map_err(|err| surface(&err, "Failed to remove item from cart"));
        self.settle(outcome);
    }

    /// Forget the cart without contacting the platform.
    ///
    /// Removes the persisted identifier and discards the snapshot. The next
    /// operation behaves as if no cart had ever existed.
    pub fn clear(&self) {
        if let Err(err) = self.store.clear() {
            tracing::warn!(error = %err, "failed to clear persisted cart id");
        }
        let mut state = self.lock();
        state.snapshot = None;
        state.error = None;
    }

    // =========================================================================
    // Reads (never touch the network)
    // =========================================================================

    /// The current snapshot, if any.
    #[must_use]
    pub fn snapshot(&self) -> Option<Cart> {
        self.lock().snapshot.clone()
    }

    /// Total item quantity across all lines, 0 when no cart is loaded.
    #[must_use]
    pub fn item_count(&self) -> i64 {
        self.lock().snapshot.as_ref().map_or(0, |c| c.total_quantity)
    }

    /// The cart total, `0` when no cart is loaded.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lock()
            .snapshot
            .as_ref()
            .map_or(Decimal::ZERO, |c| c.cost.total_amount.amount)
    }

    /// Message from the last failed operation, if it has not been cleared by
    /// a later success.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    /// Whether any remote operation is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.lock().pending > 0
    }

    /// The current observable state.
    #[must_use]
    pub fn status(&self) -> CartStatus {
        let state = self.lock();
        if state.pending > 0 {
            CartStatus::Loading
        } else if state.error.is_some() {
            CartStatus::Errored
        } else if state.snapshot.is_some() {
            CartStatus::Ready
        } else {
            CartStatus::Uninitialized
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn lock(&self) -> MutexGuard<'_, CartState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin(&self) {
        self.lock().pending += 1;
    }

    /// Record an operation's outcome. A success replaces the snapshot
    /// wholesale and clears any stale error; a failure leaves the snapshot
    /// exactly as it was.
    fn settle(&self, outcome: Result<Cart, String>) {
        let mut state = self.lock();
        state.pending = state.pending.saturating_sub(1);
        match outcome {
            Ok(cart) => {
                state.snapshot = Some(cart);
                state.error = None;
            }
            Err(message) => {
                state.error = Some(message);
            }
        }
    }

    fn current_cart_id(&self) -> Option<CartId> {
        self.lock().snapshot.as_ref().map(|c| c.id.clone())
    }

    /// Fetch the persisted cart, creating a fresh one when there is no
    /// persisted identifier or the persisted one no longer resolves.
    async fn sync_from_store(&self) -> Result<Cart, String> {
        match self.store.load() {
            Some(id) => match self.service.fetch_cart(&id).await {
                Ok(cart) => Ok(cart),
                Err(CartServiceError::NotFound) => {
                    tracing::debug!(cart_id = %id, "persisted cart no longer exists, creating a fresh one");
                    self.create_fresh_cart().await
                }
                Err(err) => {
                    tracing::warn!(cart_id = %id, error = %err, "cart fetch failed, creating a fresh one");
                    self.create_fresh_cart().await
                }
            },
            None => self.create_fresh_cart().await,
        }
    }

    async fn create_fresh_cart(&self) -> Result<Cart, String> {
        match self.service.create_cart().await {
            Ok(cart) => {
                if let Err(err) = self.store.save(&cart.id) {
                    // The remote cart exists either way; only re-discovery
                    // across restarts is lost.
                    tracing::warn!(error = %err, "failed to persist cart id");
                }
                Ok(cart)
            }
            Err(err) => Err(surface(&err, "Failed to create cart")),
        }
    }
}

/// Turn a service error into the message shown to the shopper: rejection
/// messages verbatim, everything else the generic fallback.
fn surface(err: &CartServiceError, fallback: &str) -> String {
    match err {
        CartServiceError::Rejected(message) => message.clone(),
        other => {
            tracing::warn!(error = %other, "cart operation failed");
            fallback.to_string()
        }
    }
}
