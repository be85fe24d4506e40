//! Which properties a document offers for editing.

use super::Property;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Properties whose backing structure was found in a document.
///
/// Informational only: it tells a caller which controls to show, while
/// serialization is driven entirely by the property values written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AvailabilityMap {
    available: BTreeSet<Property>,
}

impl AvailabilityMap {
    /// Create an empty map (nothing available).
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether a property is available.
    pub fn is_available(&self, property: Property) -> bool {
        self.available.contains(&property)
    }

    /// Mark a property as available.
    pub fn mark(&mut self, property: Property) {
        self.available.insert(property);
    }

    /// Mark several properties as available.
    pub fn mark_all(&mut self, properties: &[Property]) {
        self.available.extend(properties.iter().copied());
    }

    /// Available properties in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = Property> + '_ {
        self.available.iter().copied()
    }

    /// Number of available properties.
    pub fn len(&self) -> usize {
        self.available.len()
    }

    /// Check if nothing is available.
    pub fn is_empty(&self) -> bool {
        self.available.is_empty()
    }
}
