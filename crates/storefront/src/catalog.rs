//! Product grid controller: one-shot fetch plus infinite-scroll windowing.
//!
//! The grid fetches the full product set once, then reveals more of it each
//! time the scroll sentinel reports a visibility crossing. The window
//! arithmetic lives in `fjordhem_core::catalog`; this controller adds the
//! fetch, the error surface, and the observer contract.

use std::sync::Mutex;

use fjordhem_core::{DisplayWindow, Product};

use crate::api::ApiClient;
use crate::observer::{ListenerId, Listeners};

/// Observable grid state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridState {
    /// The full fetched product set.
    pub products: Vec<Product>,
    /// The revealed window over it, absent until the fetch completes.
    window: Option<DisplayWindow>,
    /// Whether the initial fetch is in flight.
    pub is_loading: bool,
    /// User-facing message from a failed fetch.
    pub error: Option<String>,
}

impl GridState {
    /// The currently revealed products.
    #[must_use]
    pub fn visible(&self) -> &[Product] {
        self.window
            .as_ref()
            .map_or(&[], |window| window.slice(&self.products))
    }

    /// Whether the sentinel (and its loading indicator) should be shown.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.window.as_ref().is_some_and(DisplayWindow::has_more)
    }

    /// Whether the fetch finished with no products at all.
    #[must_use]
    pub fn is_catalog_empty(&self) -> bool {
        !self.is_loading && self.error.is_none() && self.products.is_empty()
    }
}

/// Controller for the storefront product grid.
pub struct ProductGrid {
    client: ApiClient,
    state: Mutex<GridState>,
    listeners: Listeners<GridState>,
}

impl ProductGrid {
    /// Create a grid over a backend client. Nothing is fetched yet.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: Mutex::new(GridState {
                is_loading: true,
                ..GridState::default()
            }),
            listeners: Listeners::default(),
        }
    }

    /// Snapshot of the current grid state.
    #[must_use]
    pub fn state(&self) -> GridState {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Register a listener invoked after every grid transition.
    pub fn subscribe(&self, listener: impl Fn(&GridState) + Send + Sync + 'static) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    /// Remove a previously registered listener.
    pub fn unsubscribe(&self, id: ListenerId) {
        self.listeners.unsubscribe(id);
    }

    fn transition(&self, f: impl FnOnce(&mut GridState)) -> GridState {
        let next = {
            let mut state = self
                .state
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            f(&mut state);
            state.clone()
        };
        self.listeners.notify(&next);
        next
    }

    /// Fetch the full product set and reveal the first page.
    ///
    /// On failure the user-facing message is stored verbatim in
    /// [`GridState::error`]; the grid renders an error panel instead of
    /// products.
    pub async fn load(&self) -> GridState {
        self.transition(|state| {
            state.is_loading = true;
            state.error = None;
        });

        match self.client.list_products().await {
            Ok(products) => self.transition(|state| {
                state.window = Some(DisplayWindow::new(products.len()));
                state.products = products;
                state.is_loading = false;
            }),
            Err(e) => self.transition(|state| {
                state.is_loading = false;
                state.error = Some(e.user_message());
            }),
        }
    }

    /// Handle a visibility crossing from the scroll sentinel.
    ///
    /// Advances the window; a no-op before the fetch completes or when the
    /// whole catalog is already revealed.
    pub fn on_sentinel_visible(&self) -> GridState {
        self.transition(|state| {
            if state.products.is_empty() {
                return;
            }
            if let Some(window) = state.window.as_mut() {
                window.advance();
            }
        })
    }
}
