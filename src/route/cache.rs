// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use lru::LruCache;

use super::{route, RouteError, RouteQuery};
use crate::Graph;

/// Memoizes route results keyed by the exact [RouteQuery].
///
/// The graph is static, so a cached path never becomes stale; entries
/// are only dropped by LRU eviction once `capacity` distinct queries
/// have been seen. The cache is the one mutable structure shared by
/// concurrent request handlers: the internal lock is held across the
/// whole check-compute-insert sequence, so two concurrent identical
/// queries never run the search twice, and a reader never observes a
/// partially inserted entry. Failed computations are not cached.
pub struct RouteCache {
    inner: Mutex<LruCache<RouteQuery, Arc<Vec<i64>>>>,
}

impl RouteCache {
    /// Creates a cache remembering up to `capacity` distinct queries.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            inner: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Number of currently cached routes.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if no routes are cached.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Returns the memoized path for `query`, or runs `compute`,
    /// remembers its result and returns it.
    pub fn get_or_compute<F>(
        &self,
        query: &RouteQuery,
        compute: F,
    ) -> Result<Arc<Vec<i64>>, RouteError>
    where
        F: FnOnce() -> Result<Vec<i64>, RouteError>,
    {
        let mut inner = self.lock();

        if let Some(path) = inner.get(query) {
            return Ok(Arc::clone(path));
        }

        let path = Arc::new(compute()?);
        inner.put(*query, Arc::clone(&path));
        Ok(path)
    }

    /// Memoized variant of [route](super::route): snap both endpoints
    /// and find the shortest path, unless the exact same query was
    /// already answered.
    pub fn route(&self, g: &Graph, query: &RouteQuery) -> Result<Arc<Vec<i64>>, RouteError> {
        self.get_or_compute(query, || route(g, query))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LruCache<RouteQuery, Arc<Vec<i64>>>> {
        // A panic while holding the lock leaves the cache itself intact,
        // as entries are only inserted complete.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(seed: f64) -> RouteQuery {
        RouteQuery {
            start_lon: seed,
            start_lat: 0.0,
            end_lon: 1.0,
            end_lat: 1.0,
        }
    }

    fn capacity(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_get_or_compute_runs_the_search_once() {
        let cache = RouteCache::new(capacity(8));
        let mut calls = 0;

        let first = cache
            .get_or_compute(&query(0.0), || {
                calls += 1;
                Ok(vec![1, 2, 3])
            })
            .unwrap();
        let second = cache
            .get_or_compute(&query(0.0), || {
                calls += 1;
                Ok(vec![1, 2, 3])
            })
            .unwrap();

        assert_eq!(calls, 1);
        assert_eq!(first, second);
        assert_eq!(*first, vec![1, 2, 3]);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_distinct_queries_are_distinct_entries() {
        let cache = RouteCache::new(capacity(8));
        let mut calls = 0;

        for seed in [0.0, 0.5, 0.0, 0.5] {
            cache
                .get_or_compute(&query(seed), || {
                    calls += 1;
                    Ok(vec![])
                })
                .unwrap();
        }

        assert_eq!(calls, 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_eviction_forces_a_recompute() {
        let cache = RouteCache::new(capacity(1));
        let mut calls = 0;
        let mut run = |seed| {
            cache
                .get_or_compute(&query(seed), || {
                    calls += 1;
                    Ok(vec![])
                })
                .unwrap()
        };

        run(0.0);
        run(0.5); // evicts the previous entry
        run(0.0);

        assert_eq!(calls, 3);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_failures_are_not_cached() {
        let cache = RouteCache::new(capacity(8));
        let mut calls = 0;

        for _ in 0..2 {
            let got = cache.get_or_compute(&query(0.0), || {
                calls += 1;
                Err(RouteError::Unreachable { from: 1, to: 2 })
            });
            assert_eq!(got, Err(RouteError::Unreachable { from: 1, to: 2 }));
        }

        assert_eq!(calls, 2);
        assert!(cache.is_empty());
    }
}
