use thiserror::Error;

/// A grammar violation found while parsing a criteria expression.
///
/// Offsets are byte offsets into the original expression text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("no token found")]
    NoToken,

    #[error("empty expression")]
    EmptyExpression,

    #[error("no matching parenthesis for '(' at offset {open}")]
    UnmatchedParenthesis { open: usize },

    #[error("no matching {quote} for the quote at offset {open}")]
    UnmatchedQuote { quote: char, open: usize },

    #[error("expected '.' after '{after}' at offset {offset}")]
    MissingSeparator { after: String, offset: usize },

    #[error("unknown comparison operator '{token}' at offset {offset}")]
    UnknownOperator { token: String, offset: usize },

    #[error("unknown attribute kind '{token}' at offset {offset}, expected 'attribute' or 'entitlement'")]
    UnknownAttributeKind { token: String, offset: usize },

    #[error("expected a logical operator at offset {offset}, found '{token}'")]
    ExpectedLogicalOperator { token: String, offset: usize },

    #[error("'{found}' at offset {offset} mixes with '{expected}' at the same level, group them with parentheses")]
    MixedLogicalOperators { expected: String, found: String, offset: usize },

    #[error("unexpected '{token}' at offset {offset}")]
    UnexpectedToken { token: String, offset: usize },

    #[error("expression ends with a dangling logical operator")]
    DanglingLogicalOperator,

    #[error("empty value list at offset {offset}")]
    EmptyValueList { offset: usize },
}
