//! The player's collected items.

use serde::{Deserialize, Serialize};

use esc_core::{EscError, EscResult};

/// Item names in the order they were picked up. Duplicates are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<String>,
}

impl Inventory {
    /// Create an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item. Empty names are ignored; returns whether anything was added.
    pub fn add(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if name.is_empty() {
            return false;
        }
        self.items.push(name);
        true
    }

    /// Item at a slot.
    pub fn get(&self, index: usize) -> EscResult<&str> {
        self.items
            .get(index)
            .map(String::as_str)
            .ok_or(EscError::ItemOutOfRange {
                index,
                count: self.items.len(),
            })
    }

    /// Remove the item at a slot, shifting later items down.
    pub fn remove_at(&mut self, index: usize) -> EscResult<String> {
        if index >= self.items.len() {
            return Err(EscError::ItemOutOfRange {
                index,
                count: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    /// All items in acquisition order.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Number of items held.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing is held.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<Vec<String>> for Inventory {
    fn from(items: Vec<String>) -> Self {
        Self { items }
    }
}
