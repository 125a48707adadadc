//! Work units: one simulated decision request each.

use uuid::Uuid;

use crate::constants::{ACCOUNT_ID_ATTRIBUTE, RING_ATTRIBUTE, USER_ID_PREFIX};
use crate::decision::{AttributeValue, Attributes};

/// A single simulated request, identified by its index in the batch.
///
/// Built inside the task that executes it and never shared.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkUnit {
    user_id: String,
    attributes: Attributes,
}

impl WorkUnit {
    /// Build the unit for `index`, with a fresh account identifier.
    #[must_use]
    pub fn new(index: usize, ring: &str) -> Self {
        let mut attributes = Attributes::new();
        attributes.insert(
            ACCOUNT_ID_ATTRIBUTE.to_string(),
            AttributeValue::String(Uuid::new_v4().to_string()),
        );
        attributes.insert(
            RING_ATTRIBUTE.to_string(),
            AttributeValue::String(ring.to_string()),
        );
        Self {
            user_id: user_id_for(index),
            attributes,
        }
    }

    /// Split into identity and attributes for context creation.
    #[must_use]
    pub fn into_parts(self) -> (String, Attributes) {
        (self.user_id, self.attributes)
    }
}

/// Synthetic user identity for a unit index.
#[must_use]
pub fn user_id_for(index: usize) -> String {
    format!("{USER_ID_PREFIX}{index}")
}
