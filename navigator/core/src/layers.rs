//! Layer Registry
//!
//! Owns every registered [`UiElement`] and partitions them by [`Layer`]. For
//! each layer it also tracks the *active list*: the elements currently shown
//! on that layer, ordered by their ordering key (back to front).
//!
//! # Invariants
//!
//! - An identity is registered at most once; the first registration wins.
//! - An identity appears in at most one active list, and at most once in it.
//!   Since an element never changes layer, the list is always its own layer's.

use std::collections::HashMap;

use crate::element::{ElementId, Layer, UiElement};
use crate::error::NavigationError;

/// Entry in a layer's active list
#[derive(Clone, Debug, PartialEq, Eq)]
struct ActiveEntry {
    id: ElementId,
    ordering_key: i32,
}

/// Registry of UI elements partitioned by layer
#[derive(Debug, Default)]
pub struct LayerRegistry {
    /// All elements, keyed by ID
    elements: HashMap<ElementId, UiElement>,
    /// Registration order per layer
    buckets: HashMap<Layer, Vec<ElementId>>,
    /// Currently active elements per layer, sorted by ordering key
    active: HashMap<Layer, Vec<ActiveEntry>>,
}

impl LayerRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an element under its layer
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::DuplicateRegistration`] if the identity is
    /// already taken. The existing element is left untouched.
    pub fn register(&mut self, element: UiElement) -> Result<(), NavigationError> {
        let id = element.id().clone();
        if self.elements.contains_key(&id) {
            tracing::warn!(
                element = %id,
                layer = %element.layer(),
                "Duplicate UI element registration rejected"
            );
            return Err(NavigationError::DuplicateRegistration(id));
        }

        let layer = element.layer();
        self.buckets.entry(layer).or_default().push(id.clone());
        self.elements.insert(id.clone(), element);
        tracing::debug!(element = %id, layer = %layer, "UI element registered");
        Ok(())
    }

    /// Add an element to its layer's active list and re-sort the list
    ///
    /// An already active element keeps a single entry; only its ordering key
    /// is refreshed. The sort is stable, so equal keys keep their prior order.
    /// Returns false if the identity is not registered.
    pub fn activate(&mut self, id: &str, ordering_key: i32) -> bool {
        let Some(element) = self.elements.get(id) else {
            return false;
        };
        let layer = element.layer();
        let list = self.active.entry(layer).or_default();

        match list.iter_mut().find(|entry| entry.id.as_str() == id) {
            Some(entry) => entry.ordering_key = ordering_key,
            None => list.push(ActiveEntry {
                id: element.id().clone(),
                ordering_key,
            }),
        }
        list.sort_by_key(|entry| entry.ordering_key);
        true
    }

    /// Remove an element from its layer's active list
    ///
    /// Returns whether an entry was removed.
    pub fn deactivate(&mut self, id: &str) -> bool {
        let Some(layer) = self.elements.get(id).map(UiElement::layer) else {
            return false;
        };
        let Some(list) = self.active.get_mut(&layer) else {
            return false;
        };
        let before = list.len();
        list.retain(|entry| entry.id.as_str() != id);
        list.len() != before
    }

    /// Snapshot of the active list for a layer, back to front
    #[must_use]
    pub fn active_in(&self, layer: Layer) -> Vec<ElementId> {
        self.active
            .get(&layer)
            .map(|list| list.iter().map(|entry| entry.id.clone()).collect())
            .unwrap_or_default()
    }

    /// Whether the element is in its layer's active list
    #[must_use]
    pub fn is_active(&self, id: &str) -> bool {
        self.active
            .values()
            .any(|list| list.iter().any(|entry| entry.id.as_str() == id))
    }

    /// Empty every active list
    pub fn clear_active(&mut self) {
        self.active.clear();
    }

    /// Get an element by ID
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&UiElement> {
        self.elements.get(id)
    }

    /// Get a mutable element by ID
    pub fn get_mut(&mut self, id: &str) -> Option<&mut UiElement> {
        self.elements.get_mut(id)
    }

    /// Check if an identity is registered
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    /// Number of registered elements
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether nothing is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Elements registered on a layer, in registration order
    pub fn elements_in(&self, layer: Layer) -> impl Iterator<Item = &UiElement> {
        self.buckets
            .get(&layer)
            .into_iter()
            .flatten()
            .filter_map(|id| self.elements.get(id))
    }

    /// All identities, layer by layer, in registration order
    #[must_use]
    pub fn ids(&self) -> Vec<ElementId> {
        Layer::ALL
            .iter()
            .filter_map(|layer| self.buckets.get(layer))
            .flatten()
            .cloned()
            .collect()
    }

    /// Remove and return every element, in [`ids`](Self::ids) order
    pub fn drain(&mut self) -> Vec<UiElement> {
        let order = self.ids();
        let drained = order
            .iter()
            .filter_map(|id| self.elements.remove(id))
            .collect();
        self.buckets.clear();
        self.active.clear();
        drained
    }
}
