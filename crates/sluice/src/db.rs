use crate::layer::QueryLayer;
use crate::stream::{QueryStream, StatementKind};

use sluice_core::{Entity, ResolverCaches};
use sluice_sql::Flavor;

use std::sync::Arc;

/// Entry point for compiling queries: a query layer, the resolver caches,
/// and the active dialect flavor. Cloning is cheap; clones share the layer
/// and caches.
#[derive(Clone)]
pub struct Sluice {
    layer: Arc<dyn QueryLayer>,
    caches: ResolverCaches,
    flavor: Flavor,
}

impl Sluice {
    pub fn new(layer: impl QueryLayer) -> Self {
        Self::with_layer(Arc::new(layer))
    }

    pub fn with_layer(layer: Arc<dyn QueryLayer>) -> Self {
        Sluice {
            layer,
            caches: ResolverCaches::global().clone(),
            flavor: Flavor::default(),
        }
    }

    /// Swap in an isolated cache instance, e.g. to keep tests independent of
    /// the process-wide caches.
    pub fn with_caches(mut self, caches: ResolverCaches) -> Self {
        self.caches = caches;
        self
    }

    pub fn with_flavor(mut self, flavor: Flavor) -> Self {
        self.flavor = flavor;
        self
    }

    /// Start a SELECT stream rooted at `M`, alias `c0` unless the session
    /// counter has advanced.
    pub fn select<M: Entity>(&self) -> QueryStream<M> {
        self.root(StatementKind::Select, None)
    }

    /// Start a SELECT stream with a caller-supplied root alias.
    pub fn select_as<M: Entity>(&self, alias: impl Into<String>) -> QueryStream<M> {
        self.root(StatementKind::Select, Some(alias.into()))
    }

    pub fn update<M: Entity>(&self) -> QueryStream<M> {
        self.root(StatementKind::Update, None)
    }

    pub fn delete<M: Entity>(&self) -> QueryStream<M> {
        self.root(StatementKind::Delete, None)
    }

    fn root<M: Entity>(&self, stmt: StatementKind, alias: Option<String>) -> QueryStream<M> {
        QueryStream::root_with(
            self.layer.clone(),
            self.caches.clone(),
            self.flavor,
            stmt,
            alias,
        )
    }
}

impl core::fmt::Debug for Sluice {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("Sluice")
            .field("flavor", &self.flavor)
            .finish_non_exhaustive()
    }
}
