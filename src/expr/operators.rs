use strum::{Display, EnumString, IntoStaticStr};

/// Comparison keyword of a single predicate.
///
/// Keywords are matched case-insensitively. `in` is an alias of `eq` intended for value lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ComparisonOp {
    Eq,
    Ne,
    Co,
    Sw,
    Ew,
    Ge,
    Gt,
    Lt,
    Le,
    Nc,
    In,
}

/// Boolean connective joining the children of a logical operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogicalOp {
    And,
    Or,
}

impl LogicalOp {
    /// The other connective.
    #[must_use]
    pub const fn complement(self) -> Self {
        match self {
            Self::And => Self::Or,
            Self::Or => Self::And,
        }
    }
}
