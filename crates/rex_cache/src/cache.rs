//! The concurrency-safe LRU cache of lazily compiled regexes.

use std::collections::HashMap;
use std::mem;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use regex::Regex;
use rex_once::{CompileFn, Dialect, LazyRegex, PatternError};

use crate::list::RecencyList;

/// LRU cache mapping pattern text to shared [`LazyRegex`] handles.
///
/// All methods are safe for concurrent use. A single mutex serializes the
/// table and recency-list bookkeeping; it is held for O(1) work only and
/// never across a compile, so a slow pattern cannot stall other callers of
/// the cache. Compilation happens on first use of a returned handle.
///
/// A capacity of zero means unbounded. Once the capacity is exceeded, the
/// least recently used pattern is evicted. Eviction only ends cache
/// membership: handles are reference counted, so callers already holding an
/// evicted entry keep using it and the resource is released with the last
/// handle.
///
/// A pattern the engine rejects stays resident with its failure as terminal
/// state; every later lookup of that pattern replays the same error instead
/// of recompiling a known-bad pattern.
pub struct RegexCache {
    /// Serializes all bookkeeping. Never held across a compile.
    inner: Mutex<Inner>,

    /// Compile capability installed into every cell this cache creates.
    compile: CompileFn,
}

struct Inner {
    /// Pattern -> arena index of its list node. The node holds the same
    /// `Arc<str>`, so eviction can delete the table entry without forcing
    /// the pattern to compile.
    table: HashMap<Arc<str>, usize>,

    list: RecencyList,

    /// Maximum resident entries; zero means unbounded.
    capacity: usize,
}

impl RegexCache {
    /// Creates a cache for the standard dialect.
    ///
    /// `capacity` is the maximum number of resident patterns; zero means
    /// unbounded.
    pub fn new(capacity: usize) -> Self {
        Self::with_dialect(capacity, Dialect::Standard)
    }

    /// Creates a cache whose entries compile under `dialect`.
    pub fn with_dialect(capacity: usize, dialect: Dialect) -> Self {
        Self::with_compile_fn(capacity, dialect.compile_fn())
    }

    /// Creates a cache with a custom compile capability.
    ///
    /// Admission is keyed by pattern text alone; the capability only decides
    /// how a pattern turns into a [`Regex`] when its cell first resolves.
    pub fn with_compile_fn(capacity: usize, compile: CompileFn) -> Self {
        Self {
            inner: Mutex::new(Inner {
                table: HashMap::new(),
                list: RecencyList::new(),
                capacity,
            }),
            compile,
        }
    }

    /// Returns the shared handle for `pattern`, admitting it on a miss.
    ///
    /// A hit moves the entry to the front of the recency order. A miss first
    /// evicts the least recently used entry if the cache is at capacity,
    /// then inserts a fresh unresolved cell at the front. Never compiles;
    /// compilation is deferred to [`LazyRegex::resolve`] on the returned
    /// handle, outside this cache's lock.
    pub fn get(&self, pattern: &str) -> Arc<LazyRegex> {
        let mut inner = self.lock();
        if let Some(&index) = inner.table.get(pattern) {
            inner.list.move_to_front(index);
            return Arc::clone(inner.list.cell(index));
        }
        if inner.capacity != 0 && inner.list.len() >= inner.capacity {
            inner.evict_back();
        }
        let key: Arc<str> = Arc::from(pattern);
        let cell = Arc::new(LazyRegex::with_compile_fn(pattern, self.compile));
        let index = inner.list.push_front(Arc::clone(&key), Arc::clone(&cell));
        inner.table.insert(key, index);
        cell
    }

    /// Resolves `pattern` through the cache and returns the compiled regex.
    ///
    /// [`Regex`] is reference counted internally, so the terminal state is
    /// cloned cheaply out of the shared cell. A failure is sticky: while the
    /// pattern stays resident, every call gets the same error without the
    /// engine being asked again.
    pub fn compile(&self, pattern: &str) -> Result<Regex, PatternError> {
        let cell = self.get(pattern);
        cell.resolve().map(Regex::clone).map_err(PatternError::clone)
    }

    /// Sets the capacity and returns the previous one.
    ///
    /// Shrinking below the resident count evicts from the back until the
    /// cache fits. Zero lifts the bound without evicting anything.
    pub fn set_capacity(&self, capacity: usize) -> usize {
        let mut inner = self.lock();
        if capacity != 0 {
            while inner.list.len() > capacity {
                inner.evict_back();
            }
        }
        mem::replace(&mut inner.capacity, capacity)
    }

    /// The current capacity; zero means unbounded.
    pub fn capacity(&self) -> usize {
        self.lock().capacity
    }

    /// Number of resident patterns.
    pub fn len(&self) -> usize {
        self.lock().list.len()
    }

    /// Returns `true` when no pattern is resident.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reports whether `pattern` is resident, without touching its recency.
    pub fn contains(&self, pattern: &str) -> bool {
        self.lock().table.contains_key(pattern)
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // No caller code runs under this lock, so a poisoned guard cannot
        // expose a broken table/list invariant.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for RegexCache {
    /// An unbounded standard-dialect cache.
    fn default() -> Self {
        Self::new(0)
    }
}

impl Inner {
    /// Evicts the least recently used entry, if any.
    fn evict_back(&mut self) {
        if let Some(back) = self.list.back() {
            let key = self.list.remove(back);
            self.table.remove(&key);
        }
    }
}

#[cfg(test)]
impl RegexCache {
    /// Table and list must describe the same set of entries at all times.
    fn assert_coherent(&self) {
        let inner = self.lock();
        assert_eq!(inner.table.len(), inner.list.len());
        for (key, &index) in &inner.table {
            assert_eq!(inner.list.key(index), &**key);
        }
    }

    /// Resident patterns, most recently used first.
    fn patterns_by_recency(&self) -> Vec<String> {
        self.lock().list.keys_front_to_back()
    }
}
