use crate::resolve::ResolverCaches;
use crate::schema::Entity;
use crate::tuple::QueryTuple;
use crate::Result;

use crossbeam_channel::Sender;
use std::any::TypeId;
use std::borrow::Cow;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

static NEXT_SITE_ID: AtomicU64 = AtomicU64::new(0);

/// The identity of one accessor call site.
///
/// `entity!`-generated accessor functions intern one token per call site in a
/// `OnceLock` static, so the token stays reachable as long as the call site
/// is. When the last clone of a token drops, its id is enqueued for the
/// asynchronous cache sweep.
#[derive(Debug)]
pub struct SiteToken {
    id: u64,
    type_id: TypeId,
    entity: &'static str,
    accessor: Cow<'static, str>,
    reclaim: OnceLock<Sender<u64>>,
}

impl SiteToken {
    /// Token for a compile-time accessor, interned by the `entity!` macro.
    pub fn new<M: Entity>(accessor: &'static str) -> Arc<Self> {
        Self::build::<M>(Cow::Borrowed(accessor))
    }

    /// Token for an accessor constructed at runtime. Dynamic tokens are
    /// transient: once every clone drops, the matching cache entry is
    /// reclaimed.
    pub fn dynamic<M: Entity>(accessor: impl Into<String>) -> Arc<Self> {
        Self::build::<M>(Cow::Owned(accessor.into()))
    }

    fn build<M: Entity>(accessor: Cow<'static, str>) -> Arc<Self> {
        Arc::new(SiteToken {
            id: NEXT_SITE_ID.fetch_add(1, Ordering::Relaxed),
            type_id: TypeId::of::<M>(),
            entity: M::descriptor().name(),
            accessor,
            reclaim: OnceLock::new(),
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn entity(&self) -> &'static str {
        self.entity
    }

    pub fn accessor(&self) -> &str {
        &self.accessor
    }

    /// Hook this token up to a reclamation queue. The first queue wins; a
    /// token resolved against several cache instances notifies only the
    /// first.
    pub(crate) fn attach(&self, reclaim: Sender<u64>) {
        let _ = self.reclaim.set(reclaim);
    }
}

impl Drop for SiteToken {
    fn drop(&mut self) {
        if let Some(reclaim) = self.reclaim.get() {
            // The sweep may already be gone during shutdown.
            let _ = reclaim.send(self.id);
        }
    }
}

/// A typed accessor token: the compile-time field selector callers pass to
/// predicate methods in place of a string column name.
pub struct Getter<M, T> {
    site: Arc<SiteToken>,
    _marker: PhantomData<fn(&M) -> T>,
}

impl<M: Entity, T> Getter<M, T> {
    /// Wrap an interned site token. Used by `entity!`-generated accessors.
    pub fn from_site(site: Arc<SiteToken>) -> Self {
        Getter {
            site,
            _marker: PhantomData,
        }
    }

    /// Build an accessor at runtime from a field's accessor name.
    pub fn dynamic(accessor: impl Into<String>) -> Self {
        Self::from_site(SiteToken::dynamic::<M>(accessor))
    }

    pub fn site(&self) -> &Arc<SiteToken> {
        &self.site
    }

    pub fn accessor(&self) -> &str {
        self.site.accessor()
    }

    /// Resolve this accessor to its [`QueryTuple`] prototype, consulting and
    /// populating the given caches.
    pub fn resolve(&self, caches: &ResolverCaches) -> Result<Arc<QueryTuple>> {
        super::resolver::resolve(caches, &self.site, M::descriptor())
    }
}

impl<M, T> Clone for Getter<M, T> {
    fn clone(&self) -> Self {
        Getter {
            site: self.site.clone(),
            _marker: PhantomData,
        }
    }
}

impl<M, T> core::fmt::Debug for Getter<M, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{}::{}", self.site.entity(), self.site.accessor())
    }
}
