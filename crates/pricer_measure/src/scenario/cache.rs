//! Fixed-size, lock-free memo of per-scenario views.

use std::fmt;

use once_cell::race::OnceBox;
use pricer_core::market_data::ScenarioIndexError;

/// One install-if-absent slot per scenario.
///
/// Each slot is a [`OnceBox`]: an atomic pointer that is published with a
/// single compare-and-exchange. Readers of an occupied slot take no lock
/// and write nothing. Two threads resolving the same empty slot may both run
/// the resolver; the first to publish wins, the other drops its candidate
/// and returns the published value. Slots never change once occupied.
///
/// A resolver error is returned as-is and the slot stays empty.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::MarketDataError;
/// use pricer_measure::scenario::ScenarioViewCache;
///
/// let cache: ScenarioViewCache<String> = ScenarioViewCache::new(2);
///
/// let first = cache
///     .get_or_try_resolve(1, || Ok::<_, MarketDataError>("scenario 1".to_string()))
///     .unwrap();
/// assert_eq!(first, "scenario 1");
///
/// // Occupied: the resolver is not called again.
/// let again = cache
///     .get_or_try_resolve(1, || -> Result<String, MarketDataError> { unreachable!() })
///     .unwrap();
/// assert!(std::ptr::eq(first, again));
///
/// assert!(cache
///     .get_or_try_resolve(2, || Ok::<_, MarketDataError>(String::new()))
///     .is_err());
/// ```
pub struct ScenarioViewCache<V> {
    slots: Box<[OnceBox<V>]>,
}

impl<V> ScenarioViewCache<V> {
    /// Cache with `len` empty slots.
    pub fn new(len: usize) -> Self {
        Self {
            slots: (0..len).map(|_| OnceBox::new()).collect(),
        }
    }

    /// Number of slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether there are no slots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The stored value for `index`, without resolving.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&V> {
        self.slots.get(index).and_then(OnceBox::get)
    }

    /// Number of occupied slots.
    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|slot| slot.get().is_some()).count()
    }

    /// The value for `index`, resolving and installing it if the slot is empty.
    ///
    /// # Errors
    ///
    /// - `index >= len()`: a [`ScenarioIndexError`] converted into `E`;
    ///   `resolve` is not called.
    /// - `resolve` fails: its error, unchanged; the slot stays empty.
    pub fn get_or_try_resolve<E, F>(&self, index: usize, resolve: F) -> Result<&V, E>
    where
        F: FnOnce() -> Result<V, E>,
        E: From<ScenarioIndexError>,
    {
        let slot = self.slots.get(index).ok_or(ScenarioIndexError {
            index,
            count: self.slots.len(),
        })?;
        if let Some(value) = slot.get() {
            return Ok(value);
        }
        tracing::trace!(index, "resolving scenario view");
        slot.get_or_try_init(|| resolve().map(Box::new))
    }
}

impl<V> fmt::Debug for ScenarioViewCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScenarioViewCache")
            .field("len", &self.len())
            .field("occupied", &self.occupied())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_core::market_data::MarketDataError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Barrier;

    #[test]
    fn test_new_cache_is_empty() {
        let cache: ScenarioViewCache<u32> = ScenarioViewCache::new(4);
        assert_eq!(cache.len(), 4);
        assert_eq!(cache.occupied(), 0);
        assert!((0..4).all(|i| cache.get(i).is_none()));
    }

    #[test]
    fn test_zero_slots() {
        let cache: ScenarioViewCache<u32> = ScenarioViewCache::new(0);
        assert!(cache.is_empty());
        let result = cache.get_or_try_resolve(0, || Ok::<_, MarketDataError>(1));
        assert_eq!(
            result,
            Err(MarketDataError::ScenarioIndexOutOfRange { index: 0, count: 0 })
        );
    }

    #[test]
    fn test_resolves_once() {
        let calls = AtomicUsize::new(0);
        let cache: ScenarioViewCache<u32> = ScenarioViewCache::new(2);
        let resolve = || {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, MarketDataError>(42)
        };
        let a = cache.get_or_try_resolve(0, resolve).unwrap();
        let b = cache.get_or_try_resolve(0, resolve).unwrap();
        assert!(std::ptr::eq(a, b));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.occupied(), 1);
    }

    #[test]
    fn test_out_of_range_does_not_resolve() {
        let cache: ScenarioViewCache<u32> = ScenarioViewCache::new(2);
        cache
            .get_or_try_resolve(0, || Ok::<_, MarketDataError>(1))
            .unwrap();
        let result = cache.get_or_try_resolve(2, || -> Result<u32, MarketDataError> {
            panic!("resolver must not run for a bad index")
        });
        assert_eq!(
            result,
            Err(MarketDataError::ScenarioIndexOutOfRange { index: 2, count: 2 })
        );
        assert_eq!(cache.get(0), Some(&1));
        assert_eq!(cache.get(1), None);
    }

    #[test]
    fn test_failure_is_not_cached() {
        let cache: ScenarioViewCache<u32> = ScenarioViewCache::new(1);
        let missing = MarketDataError::configuration("not yet");
        let first = cache.get_or_try_resolve(0, || Err(missing.clone()));
        assert_eq!(first, Err(missing));
        assert!(cache.get(0).is_none());

        let retry = cache.get_or_try_resolve(0, || Ok::<_, MarketDataError>(7));
        assert_eq!(retry, Ok(&7));
    }

    #[test]
    fn test_concurrent_first_writers_converge() {
        const THREADS: usize = 8;
        let cache: ScenarioViewCache<usize> = ScenarioViewCache::new(1);
        let barrier = Barrier::new(THREADS);

        let results: Vec<usize> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..THREADS)
                .map(|t| {
                    let cache = &cache;
                    let barrier = &barrier;
                    s.spawn(move || {
                        barrier.wait();
                        let v = cache
                            .get_or_try_resolve(0, || Ok::<_, MarketDataError>(t))
                            .unwrap();
                        v as *const usize as usize
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        // Every thread saw the one published value.
        assert!(results.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(cache.occupied(), 1);
    }

    #[test]
    fn test_debug_reports_occupancy() {
        let cache: ScenarioViewCache<u8> = ScenarioViewCache::new(3);
        cache
            .get_or_try_resolve(2, || Ok::<_, MarketDataError>(0))
            .unwrap();
        assert_eq!(
            format!("{:?}", cache),
            "ScenarioViewCache { len: 3, occupied: 1 }"
        );
    }
}
