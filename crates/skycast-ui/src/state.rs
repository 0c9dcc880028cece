//! Shared selection state: the selected place and the "city is loading" hint.
//!
//! Both cells are `watch` channels. The store is cloned into every component
//! that needs it; observers hold a receiver and see every write made before
//! their next check, collapsed to the latest value.

use std::sync::Arc;

use tokio::sync::watch;

/// Place used when no usable default is configured
pub const FALLBACK_PLACE: &str = "London";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("Place name must not be empty")]
    EmptyPlace,
}

#[derive(Debug)]
struct Cells {
    place: watch::Sender<String>,
    loading_city: watch::Sender<bool>,
}

/// Observable store for the selected place and the loading-city flag.
#[derive(Debug, Clone)]
pub struct SelectionStore {
    cells: Arc<Cells>,
}

impl SelectionStore {
    pub fn new(default_place: &str) -> Self {
        let default_place = match default_place.trim() {
            "" => FALLBACK_PLACE,
            name => name,
        };
        let (place, _) = watch::channel(default_place.to_string());
        let (loading_city, _) = watch::channel(false);

        Self {
            cells: Arc::new(Cells {
                place,
                loading_city,
            }),
        }
    }

    /// Currently selected place
    pub fn place(&self) -> String {
        self.cells.place.borrow().clone()
    }

    /// Select a place. Returns `Ok(true)` when the value changed and observers
    /// were notified; writing the current value again is a no-op.
    pub fn set_place(&self, name: &str) -> Result<bool, StateError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StateError::EmptyPlace);
        }

        let changed = self.cells.place.send_if_modified(|current| {
            if current == name {
                false
            } else {
                *current = name.to_string();
                true
            }
        });

        if changed {
            tracing::info!("Selected place changed to {}", name);
        }
        Ok(changed)
    }

    pub fn subscribe_place(&self) -> watch::Receiver<String> {
        self.cells.place.subscribe()
    }

    pub fn loading_city(&self) -> bool {
        *self.cells.loading_city.borrow()
    }

    pub fn set_loading_city(&self, loading: bool) {
        self.cells.loading_city.send_if_modified(|current| {
            let changed = *current != loading;
            *current = loading;
            changed
        });
    }

    pub fn subscribe_loading_city(&self) -> watch::Receiver<bool> {
        self.cells.loading_city.subscribe()
    }
}

impl Default for SelectionStore {
    fn default() -> Self {
        Self::new(FALLBACK_PLACE)
    }
}
