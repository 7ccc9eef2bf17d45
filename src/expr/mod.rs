//! Expression language front end
//!
//! Turns membership criteria text into an [`Expression`] tree. The [`Cursor`] scans characters,
//! the [`parse`] function builds the tree by recursive descent, and the [`Visitor`] trait walks
//! it for passes that only need to read it. The criteria compiler lowers the tree by matching
//! on it directly.
//!
//! ```text
//! identity.department eq "Accounting"
//! 'Active Directory'.entitlement.memberOf eq "CN=Accounting,OU=Groups"
//! (identity.type eq 'Employee' and 'HR'.attribute.status eq 'A') or identity.location in ('Berlin', 'Paris')
//! ```

mod cursor;
mod expression;
mod operators;
mod parse_error;
mod parser;
mod visitor;

pub use cursor::{Cursor, Token};
pub use expression::{Attribute, AttributeScope, ComparisonOperator, Expression, Literal, LogicalOperator};
pub use operators::{ComparisonOp, LogicalOp};
pub use parse_error::ParseError;
pub use parser::parse;
pub use visitor::{Visitor, source_names};
