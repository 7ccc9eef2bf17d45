use core::future::Future;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("'{0}' was not found")]
    NotFound(String),

    #[error("unable to look up '{name}': {reason}")]
    Unavailable { name: String, reason: String },
}

/// Maps a name to an identifier, or an identifier back to a name.
///
/// The compiler uses a name-to-id resolver for source names; the renderer uses one going the
/// other way. Implementations typically sit in front of network lookups.
pub trait NameResolver {
    fn resolve(&self, name: &str) -> impl Future<Output = Result<String, ResolveError>> + Send;
}

impl<R: NameResolver + Sync> NameResolver for &R {
    fn resolve(&self, name: &str) -> impl Future<Output = Result<String, ResolveError>> + Send {
        (**self).resolve(name)
    }
}

impl<R: NameResolver + Send + Sync> NameResolver for Arc<R> {
    fn resolve(&self, name: &str) -> impl Future<Output = Result<String, ResolveError>> + Send {
        (**self).resolve(name)
    }
}
