use super::name_resolver::{NameResolver, ResolveError};
use core::sync::atomic::{AtomicUsize, Ordering};
use futures::future::try_join_all;
use std::collections::HashMap;
use tokio::sync::Mutex;

const LOG_TARGET: &str = "  resolver";

/// Memoizes successful lookups of an inner resolver.
///
/// Failures are not cached, so a later call retries the inner resolver.
#[derive(Debug)]
pub struct CachedResolver<R> {
    inner: R,
    cache: Mutex<HashMap<String, String>>,
    lookups: AtomicUsize,
}

impl<R: NameResolver + Sync> CachedResolver<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
            lookups: AtomicUsize::new(0),
        }
    }

    /// Number of lookups forwarded to the inner resolver so far.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }

    /// Resolve the given names concurrently and cache the results.
    ///
    /// Names already cached and duplicates are looked up once at most. The first failure is returned.
    pub async fn warm<I, S>(&self, names: I) -> Result<(), ResolveError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let pending: Vec<String> = {
            let cache = self.cache.lock().await;
            let mut pending: Vec<String> = Vec::new();
            for name in names {
                let name = name.as_ref();
                if !cache.contains_key(name) && !pending.iter().any(|p| p == name) {
                    pending.push(name.to_string());
                }
            }
            pending
        };

        if pending.is_empty() {
            return Ok(());
        }

        log::debug!(target: LOG_TARGET, "Warming cache with {} name(s)", pending.len());
        _ = try_join_all(pending.iter().map(|name| self.resolve(name))).await?;
        Ok(())
    }
}

impl<R: NameResolver + Sync> NameResolver for CachedResolver<R> {
    async fn resolve(&self, name: &str) -> Result<String, ResolveError> {
        if let Some(id) = self.cache.lock().await.get(name) {
            log::debug!(target: LOG_TARGET, "Cache hit for '{name}'");
            return Ok(id.clone());
        }

        log::debug!(target: LOG_TARGET, "Cache miss for '{name}'");
        _ = self.lookups.fetch_add(1, Ordering::Relaxed);
        let id = self.inner.resolve(name).await?;

        _ = self.cache.lock().await.insert(name.to_string(), id.clone());
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::DirectoryResolver;
    use core::time::Duration;

    fn directory() -> DirectoryResolver {
        DirectoryResolver::from_pairs([("Active Directory", "id-ad"), ("Workday", "id-wd")])
    }

    #[tokio::test]
    async fn test_repeated_name_costs_one_lookup() {
        let resolver = CachedResolver::new(directory());
        for _ in 0..5 {
            assert_eq!(resolver.resolve("Active Directory").await.unwrap(), "id-ad");
        }
        assert_eq!(resolver.lookups(), 1);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let resolver = CachedResolver::new(directory());
        assert!(resolver.resolve("Nope").await.is_err());
        assert!(resolver.resolve("Nope").await.is_err());
        assert_eq!(resolver.lookups(), 2);
    }

    #[tokio::test]
    async fn test_warm_skips_duplicates_and_cached_names() {
        let resolver = CachedResolver::new(directory());
        _ = resolver.resolve("Workday").await.unwrap();

        resolver.warm(["Active Directory", "Workday", "Active Directory"]).await.unwrap();
        assert_eq!(resolver.lookups(), 2);

        _ = resolver.resolve("Active Directory").await.unwrap();
        assert_eq!(resolver.lookups(), 2);
    }

    #[tokio::test]
    async fn test_warm_reports_first_failure() {
        let resolver = CachedResolver::new(directory());
        let err = resolver.warm(["Workday", "Missing"]).await.unwrap_err();
        assert_eq!(err, ResolveError::NotFound("Missing".to_string()));
    }

    #[derive(Debug, Default)]
    struct SlowResolver {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    impl NameResolver for SlowResolver {
        async fn resolve(&self, name: &str) -> Result<String, ResolveError> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            _ = self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            _ = self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(format!("id-{name}"))
        }
    }

    #[tokio::test]
    async fn test_warm_resolves_concurrently() {
        let resolver = CachedResolver::new(SlowResolver::default());
        let names: Vec<String> = (0..10).map(|i| format!("source-{i}")).collect();

        resolver.warm(&names).await.unwrap();
        assert_eq!(resolver.inner.peak.load(Ordering::SeqCst), 10);
        assert_eq!(resolver.lookups(), 10);
        assert_eq!(resolver.resolve("source-3").await.unwrap(), "id-source-3");
    }
}
