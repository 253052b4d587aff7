//! ## Crate layout
//! - `core`: entity models, index declarations, definitions, and the resolver.
//!
//! Declare entity models as statics, register them once at startup, then
//! resolve the index definitions of each collection root.
//!
//! ```ignore
//! use docindex::prelude::*;
//!
//! static FIELDS: [FieldModel; 1] = [FieldModel::new("email", FieldType::scalar("String"))
//!     .indexed(FieldIndex::Indexed(IndexedSpec::new().unique()))];
//! static USER: EntityModel = EntityModel::document("app::User", &FIELDS);
//!
//! let registry = docindex::registry([&USER])?;
//! let indexes = docindex::resolve_all(&registry)?;
//! ```

pub use docindex_core as core;

pub use docindex_core::{ErrorClass, IndexError};

use docindex_core::{
    index::IndexDefinitionHolder,
    model::entity::EntityModel,
    registry::EntityRegistry,
    resolver::{EntityIndexResolver, IndexResolver},
};

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build a registry from a fixed set of models.
pub fn registry(
    models: impl IntoIterator<Item = &'static EntityModel>,
) -> Result<EntityRegistry, IndexError> {
    let mut registry = EntityRegistry::new();
    registry.register_all(models)?;

    Ok(registry)
}

/// Resolve the index definitions of every registered collection root, in
/// type-path order.
pub fn resolve_all(
    registry: &EntityRegistry,
) -> Result<Vec<(&'static str, Vec<IndexDefinitionHolder>)>, IndexError> {
    let resolver = EntityIndexResolver::new(registry);

    registry
        .collection_roots()
        .map(|root| -> Result<_, IndexError> {
            Ok((root.path, resolver.resolve_index_for(root.path)?))
        })
        .collect()
}

///
/// Prelude
///

pub mod prelude {
    pub use bson::{Bson, Document};
    pub use docindex_core::prelude::*;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;
    use bson::doc;

    static ORDER_INDEXES: [CompoundIndexSpec; 1] =
        [CompoundIndexSpec::new("{'customer': 1, 'placedAt': -1}").named("customer_recent")];
    static ORDER_FIELDS: [FieldModel; 1] = [FieldModel::new("number", FieldType::scalar("u64"))
        .indexed(FieldIndex::Indexed(IndexedSpec::new().unique()))];
    static ORDER: EntityModel = EntityModel::document("shop::Order", &ORDER_FIELDS)
        .in_collection("orders")
        .with_compound_indexes(&ORDER_INDEXES);

    static LINE_FIELDS: [FieldModel; 1] = [FieldModel::new("sku", FieldType::scalar("String"))];
    static LINE: EntityModel = EntityModel::embedded("shop::Line", &LINE_FIELDS);

    #[test]
    fn resolve_all_covers_collection_roots_only() {
        let registry = registry([&ORDER, &LINE]).unwrap();
        let resolved = resolve_all(&registry).unwrap();

        assert_eq!(resolved.len(), 1);

        let (path, holders) = &resolved[0];
        assert_eq!(*path, "shop::Order");
        assert_eq!(
            holders.iter().map(IndexDefinitionHolder::path).collect::<Vec<_>>(),
            ["customer_recent", "number"]
        );
        assert!(holders.iter().all(|h| h.collection() == Some("orders")));
        assert_eq!(
            holders[0].index_keys().unwrap(),
            doc! { "customer": 1, "placedAt": -1 }
        );
    }

    #[test]
    fn registry_rejects_duplicates() {
        assert!(registry([&LINE, &LINE]).is_err());
    }
}
