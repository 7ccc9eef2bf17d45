use crate::expr::ComparisonOp;
use serde::{Deserialize, Serialize};

/// The platform's comparison vocabulary for leaf predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComparisonOperation {
    Equals,
    NotEquals,
    Contains,
    DoesNotContain,
    StartsWith,
    EndsWith,
    GreaterThan,
    GreaterThanEquals,
    LessThan,
    LessThanEquals,
}

impl ComparisonOperation {
    /// The expression keyword that compiles to this operation.
    #[must_use]
    pub const fn keyword(self) -> ComparisonOp {
        match self {
            Self::Equals => ComparisonOp::Eq,
            Self::NotEquals => ComparisonOp::Ne,
            Self::Contains => ComparisonOp::Co,
            Self::DoesNotContain => ComparisonOp::Nc,
            Self::StartsWith => ComparisonOp::Sw,
            Self::EndsWith => ComparisonOp::Ew,
            Self::GreaterThan => ComparisonOp::Gt,
            Self::GreaterThanEquals => ComparisonOp::Ge,
            Self::LessThan => ComparisonOp::Lt,
            Self::LessThanEquals => ComparisonOp::Le,
        }
    }
}

impl From<ComparisonOp> for ComparisonOperation {
    fn from(op: ComparisonOp) -> Self {
        match op {
            ComparisonOp::Eq | ComparisonOp::In => Self::Equals,
            ComparisonOp::Ne => Self::NotEquals,
            ComparisonOp::Co => Self::Contains,
            ComparisonOp::Nc => Self::DoesNotContain,
            ComparisonOp::Sw => Self::StartsWith,
            ComparisonOp::Ew => Self::EndsWith,
            ComparisonOp::Gt => Self::GreaterThan,
            ComparisonOp::Ge => Self::GreaterThanEquals,
            ComparisonOp::Lt => Self::LessThan,
            ComparisonOp::Le => Self::LessThanEquals,
        }
    }
}
