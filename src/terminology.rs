//! Value-set membership, the only terminology contract the model consumes.

use std::collections::{HashMap, HashSet};

#[cfg(feature = "lru-cache")]
use lru::LruCache;
#[cfg(feature = "lru-cache")]
use std::num::NonZeroUsize;
#[cfg(feature = "lru-cache")]
use std::sync::{Mutex, PoisonError};

#[cfg(feature = "lru-cache")]
use crate::error::{FhirModelError, Result};

/// Answers membership questions for value sets too large to embed in a
/// binding. Implementations must be cheap to call from inside `build()`.
pub trait TerminologyService: Send + Sync {
    fn has_value_set(&self, url: &str) -> bool;

    /// Whether `code` (optionally qualified by `system`) is in `value_set`.
    fn is_member(&self, system: Option<&str>, code: &str, value_set: &str) -> bool;
}

/// Drops a `|version` suffix from a canonical URL.
pub fn unversioned(url: &str) -> &str {
    url.split_once('|').map_or(url, |(base, _)| base)
}

/// Value sets held as explicit (system, code) enumerations.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTerminology {
    value_sets: HashMap<String, HashSet<(String, String)>>,
}

impl InMemoryTerminology {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value_set<I, S>(mut self, url: &str, system: &str, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let concepts = self
            .value_sets
            .entry(unversioned(url).to_string())
            .or_default();
        concepts.extend(
            codes
                .into_iter()
                .map(|code| (system.to_string(), code.into())),
        );
        self
    }

    pub fn add_concept(&mut self, url: &str, system: &str, code: &str) {
        self.value_sets
            .entry(unversioned(url).to_string())
            .or_default()
            .insert((system.to_string(), code.to_string()));
    }

    pub fn value_set_count(&self) -> usize {
        self.value_sets.len()
    }
}

impl TerminologyService for InMemoryTerminology {
    fn has_value_set(&self, url: &str) -> bool {
        self.value_sets.contains_key(unversioned(url))
    }

    fn is_member(&self, system: Option<&str>, code: &str, value_set: &str) -> bool {
        let Some(concepts) = self.value_sets.get(unversioned(value_set)) else {
            return false;
        };
        match system {
            Some(system) => concepts.contains(&(system.to_string(), code.to_string())),
            None => concepts.iter().any(|(_, member)| member == code),
        }
    }
}

#[cfg(feature = "lru-cache")]
type MembershipKey = (Option<String>, String, String);

/// Memoizes `is_member` answers of another service in an LRU cache.
#[cfg(feature = "lru-cache")]
pub struct CachingTerminology<T> {
    inner: T,
    cache: Mutex<LruCache<MembershipKey, bool>>,
}

#[cfg(feature = "lru-cache")]
impl<T: TerminologyService> CachingTerminology<T> {
    pub fn new(inner: T, capacity: usize) -> Result<Self> {
        let capacity = NonZeroUsize::new(capacity).ok_or_else(|| {
            FhirModelError::configuration_error("Terminology cache capacity cannot be zero")
        })?;
        Ok(Self {
            inner,
            cache: Mutex::new(LruCache::new(capacity)),
        })
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }

    pub fn cached_len(&self) -> usize {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn clear(&self) {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

#[cfg(feature = "lru-cache")]
impl<T: TerminologyService> TerminologyService for CachingTerminology<T> {
    fn has_value_set(&self, url: &str) -> bool {
        self.inner.has_value_set(url)
    }

    fn is_member(&self, system: Option<&str>, code: &str, value_set: &str) -> bool {
        let key = (
            system.map(str::to_string),
            code.to_string(),
            unversioned(value_set).to_string(),
        );
        if let Some(hit) = self
            .cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return *hit;
        }
        let member = self.inner.is_member(system, code, value_set);
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .put(key, member);
        member
    }
}

#[cfg(feature = "lru-cache")]
impl<T> std::fmt::Debug for CachingTerminology<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachingTerminology").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_suffix_is_ignored() {
        let terminology = InMemoryTerminology::new().with_value_set(
            "http://example.org/ValueSet/colors|1.0.0",
            "http://example.org/colors",
            ["red", "green"],
        );
        assert!(terminology.has_value_set("http://example.org/ValueSet/colors"));
        assert!(terminology.has_value_set("http://example.org/ValueSet/colors|2.0.0"));
        assert!(terminology.is_member(
            Some("http://example.org/colors"),
            "red",
            "http://example.org/ValueSet/colors|2.0.0"
        ));
    }

    #[test]
    fn system_qualifies_membership_when_given() {
        let terminology = InMemoryTerminology::new().with_value_set(
            "http://example.org/ValueSet/colors",
            "http://example.org/colors",
            ["red"],
        );
        let url = "http://example.org/ValueSet/colors";
        assert!(terminology.is_member(None, "red", url));
        assert!(!terminology.is_member(Some("http://other.org"), "red", url));
        assert!(!terminology.is_member(None, "blue", url));
    }
}
