//! membership-criteria crate
//!
//! Converts human-readable membership criteria expressions (for example
//! `identity.department eq "Accounting"`) into the fixed three-tier criteria tree used by the
//! governance platform's API, and renders such trees back into text.
//!
//! # Module Organization
//!
//! - [`expr`]: Cursor, parser, and expression AST
//! - [`criteria`]: Criteria tree wire model, compiler, and renderer
//! - [`resolver`]: Source name resolution used by the compiler and the renderer
//!
//! ```text
//! text --parse--> Expression --compile--> Level1 --render--> text
//! ```

/// Result type alias using `ohno::AppError` as the default error type.
pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

#[doc(hidden)]
pub mod config;

pub mod criteria;
pub mod expr;
pub mod resolver;

pub use criteria::{CriteriaCompiler, CriteriaError, Level1, Level2, Level3, Variant, compile_dimension, compile_role, render};
pub use expr::{Expression, ParseError, parse};
pub use resolver::{CachedResolver, DirectoryResolver, NameResolver, ResolveError};
