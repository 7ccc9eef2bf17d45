use super::name_resolver::{NameResolver, ResolveError};
use std::collections::HashMap;

/// An in-memory name directory.
///
/// Backs the command-line tool with the `sources` table from the configuration file, and serves
/// as a test double elsewhere.
#[derive(Debug, Clone, Default)]
pub struct DirectoryResolver {
    entries: HashMap<String, String>,
}

impl DirectoryResolver {
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// A directory that maps each value back to its key.
    ///
    /// When several keys share a value, the lexically smallest key wins.
    #[must_use]
    pub fn inverted(&self) -> Self {
        let mut entries: HashMap<String, String> = HashMap::with_capacity(self.entries.len());
        for (key, value) in &self.entries {
            match entries.get(value) {
                Some(existing) if existing <= key => {}
                _ => {
                    _ = entries.insert(value.clone(), key.clone());
                }
            }
        }

        Self { entries }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl NameResolver for DirectoryResolver {
    async fn resolve(&self, name: &str) -> Result<String, ResolveError> {
        self.entries.get(name).cloned().ok_or_else(|| ResolveError::NotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_resolve_known_and_unknown() {
        let directory = DirectoryResolver::from_pairs([("Active Directory", "2c91808a"), ("Workday", "2c91808b")]);
        assert_eq!(directory.resolve("Workday").await.unwrap(), "2c91808b");
        assert_eq!(
            directory.resolve("workday").await.unwrap_err(),
            ResolveError::NotFound("workday".to_string())
        );
    }

    #[tokio::test]
    async fn test_inverted() {
        let directory = DirectoryResolver::from_pairs([("Active Directory", "2c91808a")]);
        let inverse = directory.inverted();
        assert_eq!(inverse.resolve("2c91808a").await.unwrap(), "Active Directory");
        assert!(inverse.resolve("Active Directory").await.is_err());
    }

    #[tokio::test]
    async fn test_inverted_with_shared_value_is_deterministic() {
        let directory = DirectoryResolver::from_pairs([("b", "1"), ("a", "1"), ("c", "1")]);
        let inverse = directory.inverted();
        assert_eq!(inverse.len(), 1);
        assert_eq!(inverse.resolve("1").await.unwrap(), "a");
    }

    #[test]
    fn test_empty() {
        assert!(DirectoryResolver::default().is_empty());
    }
}
