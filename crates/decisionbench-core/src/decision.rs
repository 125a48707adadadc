//! Decision collaborator interfaces.
//!
//! `DecisionClient` stands in for the decision service SDK: it creates a
//! per-user `DecisionContext`, and the context evaluates every flag at once.
//! The harness only observes latency and success or failure; the decisions
//! themselves are opaque.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cancel::CancellationToken;
use crate::error::DecisionError;

/// Value of a single user attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// String attribute.
    String(String),
    /// Boolean attribute.
    Bool(bool),
    /// Integer attribute.
    Integer(i64),
    /// Floating point attribute.
    Float(f64),
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

/// User attributes passed to the collaborator.
pub type Attributes = BTreeMap<String, AttributeValue>;

/// Outcome of evaluating one flag for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// Flag key.
    pub flag_key: String,
    /// Variation served, if any.
    pub variation_key: Option<String>,
    /// Whether the flag is enabled for the user.
    pub enabled: bool,
}

/// All decisions for a user, keyed by flag.
pub type Decisions = BTreeMap<String, Decision>;

/// Per-user evaluation context.
pub trait DecisionContext: Send {
    /// Evaluate every flag for this user.
    ///
    /// Implementations that support it should return
    /// [`DecisionError::Cancelled`] when `cancel` fires mid-call.
    fn evaluate_all(&self, cancel: &CancellationToken) -> Result<Decisions, DecisionError>;
}

/// Client for a decision service.
pub trait DecisionClient: Send + Sync {
    /// Create an evaluation context for a user.
    fn create_context(
        &self,
        user_id: &str,
        attributes: Attributes,
    ) -> Result<Box<dyn DecisionContext>, DecisionError>;

    /// Short name used in logs.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_values_serialize_untagged() {
        let mut attrs = Attributes::new();
        attrs.insert("ring".into(), "us".into());
        attrs.insert("beta".into(), true.into());
        attrs.insert("tier".into(), 3i64.into());
        let json = serde_json::to_string(&attrs).unwrap();
        assert_eq!(json, r#"{"beta":true,"ring":"us","tier":3}"#);
    }

    #[test]
    fn attribute_value_conversions() {
        assert_eq!(
            AttributeValue::from(String::from("x")),
            AttributeValue::String("x".into())
        );
        assert_eq!(AttributeValue::from(false), AttributeValue::Bool(false));
    }
}
