//! Source name resolution
//!
//! Criteria trees reference sources by platform id while expressions name them the way
//! operators know them. A [`NameResolver`] bridges the two; the compiler uses one that maps
//! names to ids and the renderer one that maps ids back to names.
//!
//! [`CachedResolver`] memoizes an inner resolver so that a source used by many leaves, or by many
//! expressions in a batch, costs a single underlying lookup.

mod cached;
mod directory;
mod name_resolver;

pub use cached::CachedResolver;
pub use directory::DirectoryResolver;
pub use name_resolver::{NameResolver, ResolveError};
