//! The session order store.

use std::sync::Arc;

use common::SessionId;
use tokio::sync::watch;

use crate::catalog::CatalogSnapshot;
use crate::command::StoreCommand;
use crate::state::OrderState;
use crate::value_objects::Money;

/// Fallback message when a load fails without saying why.
const UNSPECIFIED_LOAD_ERROR: &str = "failed to load restaurant data";

/// Identifies one catalog load started with [`OrderStore::begin_load`].
///
/// Tokens increase monotonically per store; only the most recent one may
/// complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadToken(u64);

/// Single authoritative holder of one session's [`OrderState`].
///
/// Writes go through `&mut self`, so there is exactly one writer at a time.
/// Every dispatch publishes the new state to subscribers.
pub struct OrderStore {
    session_id: SessionId,
    state: Arc<OrderState>,
    publisher: watch::Sender<Arc<OrderState>>,
    latest_load: u64,
}

impl OrderStore {
    /// Creates an empty store for a new session.
    pub fn new() -> Self {
        Self::for_session(SessionId::new())
    }

    /// Creates an empty store for the given session.
    pub fn for_session(session_id: SessionId) -> Self {
        let state = Arc::new(OrderState::new());
        let (publisher, _) = watch::channel(Arc::clone(&state));
        Self {
            session_id,
            state,
            publisher,
            latest_load: 0,
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Returns the current state.
    pub fn state(&self) -> &OrderState {
        &self.state
    }

    /// Returns a shared handle to the current state.
    pub fn snapshot(&self) -> Arc<OrderState> {
        Arc::clone(&self.state)
    }

    /// Returns a receiver that observes every state published after this call.
    pub fn subscribe(&self) -> watch::Receiver<Arc<OrderState>> {
        self.publisher.subscribe()
    }

    /// Applies a command and publishes the resulting state.
    pub fn dispatch(&mut self, command: StoreCommand) -> &OrderState {
        let command_type = command.command_type();
        metrics::counter!("order_store_commands_total", "command" => command_type).increment(1);

        if matches!(command, StoreCommand::Unknown) {
            tracing::debug!(session = %self.session_id, "ignoring unrecognised command");
        } else {
            tracing::debug!(session = %self.session_id, command = command_type, "dispatching");
        }

        let next = Arc::new(self.state.reduce(command));
        self.state = Arc::clone(&next);
        self.publisher.send_replace(next);

        &self.state
    }

    /// Sum of price times quantity over the cart.
    pub fn cart_total(&self) -> Money {
        self.state.cart_total()
    }

    /// Sum of quantities over the cart.
    pub fn cart_item_count(&self) -> u64 {
        self.state.cart_item_count()
    }

    /// Marks a new catalog load as in flight and returns its token.
    ///
    /// Any token issued earlier becomes stale.
    pub fn begin_load(&mut self) -> LoadToken {
        self.latest_load += 1;
        self.dispatch(StoreCommand::set_loading(true));
        LoadToken(self.latest_load)
    }

    /// Returns true if `token` is the most recently issued load token.
    pub fn is_current(&self, token: LoadToken) -> bool {
        token.0 == self.latest_load
    }

    /// Applies the outcome of the load identified by `token`.
    ///
    /// Results from a load that has since been superseded are dropped and
    /// `false` is returned.
    pub fn complete_load(
        &mut self,
        token: LoadToken,
        outcome: Result<CatalogSnapshot, String>,
    ) -> bool {
        if !self.is_current(token) {
            metrics::counter!("order_store_stale_loads_total").increment(1);
            tracing::debug!(
                session = %self.session_id,
                token = token.0,
                latest = self.latest_load,
                "discarding stale load result"
            );
            return false;
        }

        let command = match outcome {
            Ok(snapshot) => StoreCommand::SetRestaurantData(snapshot),
            Err(msg) if msg.is_empty() => StoreCommand::set_error(Some(UNSPECIFIED_LOAD_ERROR)),
            Err(msg) => StoreCommand::set_error(Some(msg)),
        };
        self.dispatch(command);
        true
    }
}

impl Default for OrderStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for OrderStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderStore")
            .field("session_id", &self.session_id)
            .field("state", &self.state)
            .field("latest_load", &self.latest_load)
            .finish()
    }
}
