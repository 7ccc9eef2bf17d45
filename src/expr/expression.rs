//! Expression AST produced by the parser.

use super::cursor::{is_quote, is_token_delimiter};
use super::operators::{ComparisonOp, LogicalOp};
use core::fmt::{self, Display, Formatter, Write};

/// Where an attribute lives.
///
/// Account and entitlement attributes carry the human-entered source name; it is resolved to a
/// source id only when the expression is compiled.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttributeScope {
    Identity,
    AccountOf(String),
    EntitlementOf(String),
}

impl AttributeScope {
    /// The source name, if the scope has one.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        match self {
            Self::Identity => None,
            Self::AccountOf(source) | Self::EntitlementOf(source) => Some(source),
        }
    }
}

/// Left-hand side of a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Attribute {
    pub scope: AttributeScope,
    pub property: String,
}

/// Right-hand side of a comparison.
///
/// A list literal is the only way to express set membership.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Literal {
    Single(String),
    List(Vec<String>),
}

/// A single leaf predicate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComparisonOperator {
    pub op: ComparisonOp,
    pub attribute: Attribute,
    pub value: Literal,
}

/// Children joined by one connective.
///
/// All children were combined with the same connective in the source text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogicalOperator {
    pub op: LogicalOp,
    pub children: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expression {
    Comparison(ComparisonOperator),
    Logical(LogicalOperator),
}

impl Expression {
    #[must_use]
    pub const fn is_comparison(&self) -> bool {
        matches!(self, Self::Comparison(_))
    }

    /// Number of logical operator levels from this node down to its deepest comparison.
    #[must_use]
    pub fn logical_depth(&self) -> usize {
        match self {
            Self::Comparison(_) => 0,
            Self::Logical(logical) => 1 + logical.children.iter().map(Self::logical_depth).max().unwrap_or(0),
        }
    }
}

/// Writes `text` between single quotes, doubling embedded quotes.
fn write_quoted(f: &mut impl Write, text: &str) -> fmt::Result {
    f.write_char('\'')?;
    for c in text.chars() {
        if c == '\'' {
            f.write_str("''")?;
        } else {
            f.write_char(c)?;
        }
    }
    f.write_char('\'')
}

impl Display for Attribute {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.scope {
            AttributeScope::Identity => f.write_str("identity")?,
            AttributeScope::AccountOf(source) => {
                write_quoted(f, source)?;
                f.write_str(".attribute")?;
            }
            AttributeScope::EntitlementOf(source) => {
                write_quoted(f, source)?;
                f.write_str(".entitlement")?;
            }
        }
        f.write_char('.')?;
        if self.property.is_empty() || self.property.chars().any(|c| is_token_delimiter(c) || is_quote(c)) {
            write_quoted(f, &self.property)
        } else {
            f.write_str(&self.property)
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(value) => write_quoted(f, value),
            Self::List(values) => {
                f.write_char('(')?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write_quoted(f, value)?;
                }
                f.write_char(')')
            }
        }
    }
}

impl Display for ComparisonOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.attribute, self.op, self.value)
    }
}

impl Display for LogicalOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, child) in self.children.iter().enumerate() {
            if i > 0 {
                write!(f, " {} ", self.op)?;
            }
            match child {
                Expression::Comparison(comparison) => write!(f, "{comparison}")?,
                Expression::Logical(logical) => write!(f, "({logical})")?,
            }
        }
        Ok(())
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Comparison(comparison) => comparison.fmt(f),
            Self::Logical(logical) => logical.fmt(f),
        }
    }
}
