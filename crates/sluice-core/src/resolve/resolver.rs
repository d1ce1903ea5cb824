use super::{ResolverCaches, SiteToken};
use crate::schema::EntityDescriptor;
use crate::tuple::QueryTuple;
use crate::{Error, Result};

use std::sync::Arc;

/// Resolve an accessor site to its tuple prototype.
///
/// The hot path is a read-only identity-cache hit. On a miss the accessor is
/// decoded against the entity's field descriptors, installed put-if-absent,
/// and hooked up to the reclamation queue; a racing resolver's installed
/// value wins over ours.
pub(super) fn resolve(
    caches: &ResolverCaches,
    site: &Arc<SiteToken>,
    descriptor: &'static EntityDescriptor,
) -> Result<Arc<QueryTuple>> {
    if let Some(tuple) = caches.lookup_identity(site.id()) {
        return Ok(tuple);
    }

    let field = descriptor
        .field(site.accessor())
        .ok_or_else(|| Error::field_not_resolvable(descriptor.name(), site.accessor()))?;

    let property = match field.property_override() {
        Some(property) => property.to_string(),
        None => caches.decode_property(site.accessor()),
    };
    let column = descriptor.column_of(field);

    let tuple = Arc::new(QueryTuple::new(
        descriptor.name(),
        descriptor.type_id(),
        site.accessor().to_string().into(),
        property.clone(),
        column,
        field.temporal_type(),
    ));

    let installed = caches.install_identity(site.id(), tuple);
    site.attach(caches.reclaim_sender().clone());
    caches.install_coordinates(descriptor.name().to_string(), property, installed.clone());

    Ok(installed)
}

/// Resolve a field by its string coordinates (entity name, property name),
/// consulting and populating the coordinate cache.
pub fn resolve_coordinates(
    caches: &ResolverCaches,
    descriptor: &'static EntityDescriptor,
    property: &str,
) -> Result<Arc<QueryTuple>> {
    if let Some(tuple) = caches.lookup_coordinates(descriptor.name(), property) {
        return Ok(tuple);
    }

    let field = descriptor
        .field_by_property(property)
        .ok_or_else(|| Error::field_not_resolvable(descriptor.name(), property))?;

    let tuple = Arc::new(QueryTuple::new(
        descriptor.name(),
        descriptor.type_id(),
        field.accessor().to_string().into(),
        descriptor.property_of(field),
        descriptor.column_of(field),
        field.temporal_type(),
    ));

    Ok(caches.install_coordinates(
        descriptor.name().to_string(),
        property.to_string(),
        tuple,
    ))
}
