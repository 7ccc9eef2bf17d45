//! The three-tier criteria tree in the platform's wire format.

use super::comparison_operation::ComparisonOperation;
use crate::expr::LogicalOp;
use serde::{Deserialize, Serialize};

/// Connective of a [`Level1`] or [`Level2`] node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogicalOperation {
    And,
    Or,
}

impl LogicalOperation {
    /// Lower-case keyword used in expression text.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

impl From<LogicalOp> for LogicalOperation {
    fn from(op: LogicalOp) -> Self {
        match op {
            LogicalOp::And => Self::And,
            LogicalOp::Or => Self::Or,
        }
    }
}

/// Root of a criteria tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level1 {
    pub operation: LogicalOperation,
    pub children: Vec<Level2>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level2 {
    pub operation: LogicalOperation,
    pub children: Vec<Level3>,
}

/// A leaf predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level3 {
    pub operation: ComparisonOperation,
    pub key: CriteriaKey,

    #[serde(flatten)]
    pub value: LeafValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KeyType {
    Identity,
    Account,
    Entitlement,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriteriaKey {
    #[serde(rename = "type")]
    pub key_type: KeyType,

    /// Always `attribute.` followed by the attribute name.
    pub property: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
}

/// Prefix every [`CriteriaKey::property`] carries on the wire.
pub const PROPERTY_PREFIX: &str = "attribute.";

impl CriteriaKey {
    /// The attribute name without the `attribute.` prefix.
    #[must_use]
    pub fn attribute_name(&self) -> &str {
        self.property.strip_prefix(PROPERTY_PREFIX).unwrap_or(&self.property)
    }
}

/// Value of a leaf: `stringValue` for a single value or `values` for a set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeafValue {
    #[serde(rename = "stringValue")]
    Single(String),

    #[serde(rename = "values")]
    List(Vec<String>),
}
