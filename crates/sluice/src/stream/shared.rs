use crate::layer::QueryLayer;

use sluice_core::schema::DEFAULT_ALIAS_PREFIX;
use sluice_core::{CounterTuple, ParameterTuple, ResolverCaches, SuffixTuple, TemporalType, Value};
use sluice_sql::Flavor;

use std::any::TypeId;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

/// State shared by a root stream and every descendant sub-stream it spawns:
/// the alias counter, the parameter-name suffix counter, the parameter
/// registry, and the per-entity alias table. One compiling session runs on a
/// single logical thread.
pub(crate) struct Shared {
    counter: CounterTuple,
    suffix: SuffixTuple,
    params: RefCell<Vec<ParameterTuple>>,
    aliases: RefCell<Vec<(TypeId, String)>>,
    pub(crate) caches: ResolverCaches,
    pub(crate) layer: Arc<dyn QueryLayer>,
    pub(crate) flavor: Flavor,
}

impl Shared {
    pub(crate) fn new(
        layer: Arc<dyn QueryLayer>,
        caches: ResolverCaches,
        flavor: Flavor,
    ) -> Rc<Self> {
        Rc::new(Shared {
            counter: CounterTuple::new(),
            suffix: SuffixTuple::new(),
            params: RefCell::new(Vec::new()),
            aliases: RefCell::new(Vec::new()),
            caches,
            layer,
            flavor,
        })
    }

    /// Next unused alias: `c0`, `c1`, ...
    pub(crate) fn mint_alias(&self) -> String {
        format!("{}{}", DEFAULT_ALIAS_PREFIX, self.counter.next())
    }

    pub(crate) fn register_alias(&self, type_id: TypeId, alias: String) {
        self.aliases.borrow_mut().push((type_id, alias));
    }

    /// The alias assigned to an entity type, minting and registering one on
    /// first touch.
    pub(crate) fn alias_for(&self, type_id: TypeId) -> String {
        if let Some((_, alias)) = self
            .aliases
            .borrow()
            .iter()
            .find(|(registered, _)| *registered == type_id)
        {
            return alias.clone();
        }

        let alias = self.mint_alias();
        self.register_alias(type_id, alias.clone());
        alias
    }

    /// Register one named parameter and return its unique name.
    pub(crate) fn register_param(
        &self,
        property: &str,
        value: Value,
        temporal: Option<TemporalType>,
    ) -> String {
        let name = format!("{}_{}", property, self.suffix.next());
        let mut params = self.params.borrow_mut();
        let ordinal = params.len();
        params.push(ParameterTuple::new(name.clone(), value, temporal, ordinal));
        name
    }

    pub(crate) fn params_snapshot(&self) -> Vec<ParameterTuple> {
        self.params.borrow().clone()
    }
}
