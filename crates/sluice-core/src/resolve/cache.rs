use crate::tuple::QueryTuple;

use crossbeam_channel::Sender;
use parking_lot::RwLock;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock, Weak};

/// The process-wide resolution caches.
///
/// Three maps share one discipline: readers never block on a miss — they
/// resolve outside the lock and attempt to install, first writer wins.
/// Instances are explicit, injectable state; most callers use the shared
/// [`global`](ResolverCaches::global) instance. Dropping the last clone of an
/// instance disconnects its reclamation queue and ends its sweep thread.
#[derive(Debug, Clone)]
pub struct ResolverCaches {
    shared: Arc<CacheShared>,
    reclaim_tx: Sender<u64>,
}

#[derive(Debug)]
pub(super) struct CacheShared {
    /// site id -> resolved tuple prototype
    identity: RwLock<HashMap<u64, Arc<QueryTuple>>>,
    /// accessor name -> derived property name
    decode: RwLock<HashMap<String, String>>,
    /// (entity name, property name) -> resolved tuple prototype
    coordinates: RwLock<HashMap<(String, String), Arc<QueryTuple>>>,
    stats: StatCells,
}

impl ResolverCaches {
    pub fn new() -> Self {
        let shared = Arc::new(CacheShared {
            identity: RwLock::new(HashMap::new()),
            decode: RwLock::new(HashMap::new()),
            coordinates: RwLock::new(HashMap::new()),
            stats: StatCells::default(),
        });
        let reclaim_tx = super::reclaim::spawn(Arc::downgrade(&shared));

        ResolverCaches { shared, reclaim_tx }
    }

    /// The process-wide default instance.
    pub fn global() -> &'static ResolverCaches {
        static GLOBAL: OnceLock<ResolverCaches> = OnceLock::new();
        GLOBAL.get_or_init(ResolverCaches::new)
    }

    pub(super) fn lookup_identity(&self, site: u64) -> Option<Arc<QueryTuple>> {
        let found = self.shared.identity.read().get(&site).cloned();
        match &found {
            Some(_) => self.shared.stats.hits.fetch_add(1, Ordering::Relaxed),
            None => self.shared.stats.misses.fetch_add(1, Ordering::Relaxed),
        };
        found
    }

    /// Put-if-absent: the first writer wins and losers adopt the installed
    /// value, discarding their own work.
    pub(super) fn install_identity(&self, site: u64, tuple: Arc<QueryTuple>) -> Arc<QueryTuple> {
        match self.shared.identity.write().entry(site) {
            Entry::Occupied(entry) => entry.get().clone(),
            Entry::Vacant(entry) => entry.insert(tuple).clone(),
        }
    }

    /// Derived property name for an accessor, computed at most once per
    /// distinct accessor name.
    pub(super) fn decode_property(&self, accessor: &str) -> String {
        if let Some(property) = self.shared.decode.read().get(accessor) {
            return property.clone();
        }

        self.shared.stats.decodes.fetch_add(1, Ordering::Relaxed);
        let derived = crate::schema::property_name(accessor);

        match self.shared.decode.write().entry(accessor.to_string()) {
            Entry::Occupied(entry) => entry.get().clone(),
            Entry::Vacant(entry) => entry.insert(derived).clone(),
        }
    }

    pub(super) fn lookup_coordinates(&self, entity: &str, property: &str) -> Option<Arc<QueryTuple>> {
        self.shared
            .coordinates
            .read()
            .get(&(entity.to_string(), property.to_string()))
            .cloned()
    }

    pub(super) fn install_coordinates(
        &self,
        entity: String,
        property: String,
        tuple: Arc<QueryTuple>,
    ) -> Arc<QueryTuple> {
        match self.shared.coordinates.write().entry((entity, property)) {
            Entry::Occupied(entry) => entry.get().clone(),
            Entry::Vacant(entry) => entry.insert(tuple).clone(),
        }
    }

    pub(super) fn reclaim_sender(&self) -> &Sender<u64> {
        &self.reclaim_tx
    }

    /// Number of live identity-cache entries. The reclamation sweep makes
    /// this converge toward the count of still-reachable call sites.
    pub fn site_entries(&self) -> usize {
        self.shared.identity.read().len()
    }

    pub fn stats(&self) -> CacheStats {
        self.shared.stats.snapshot()
    }
}

impl Default for ResolverCaches {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheShared {
    /// Remove one stale identity entry. Called from the sweep thread.
    pub(super) fn remove_site(&self, site: u64) -> bool {
        let removed = self.identity.write().remove(&site).is_some();
        if removed {
            self.stats.reclaimed.fetch_add(1, Ordering::Relaxed);
        }
        removed
    }
}

#[derive(Debug, Default)]
struct StatCells {
    hits: AtomicU64,
    misses: AtomicU64,
    decodes: AtomicU64,
    reclaimed: AtomicU64,
}

impl StatCells {
    fn snapshot(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            decodes: self.decodes.load(Ordering::Relaxed),
            reclaimed: self.reclaimed.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time view of cache activity, for observing hit/decode behavior
/// in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub decodes: u64,
    pub reclaimed: u64,
}

pub(super) type SharedWeak = Weak<CacheShared>;
