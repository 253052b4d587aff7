//! Entity graph walk that collects index definitions.
//!
//! Starting from a collection root, every property is visited in declaration
//! order. Embedded entity properties are descended into with the dotted path
//! extended by the stored field name, and the root's collection is carried
//! down unchanged; a nested type's own collection marker is never consulted.

use crate::{
    config::{CyclePolicy, ResolverConfig},
    error::IndexError,
    index::{
        builder::{IndexContext, compound_index_definitions, field_index_definition},
        holder::IndexDefinitionHolder,
    },
    model::{entity::EntityModel, field::FieldModel},
    registry::{EntityMetadata, EntitySchema},
};

///
/// IndexResolver
///

pub trait IndexResolver {
    /// Resolve every index definition for the collection root at `type_path`.
    fn resolve_index_for(&self, type_path: &str)
    -> Result<Vec<IndexDefinitionHolder>, IndexError>;
}

///
/// EntityIndexResolver
///
/// Resolves index definitions against an `EntityMetadata` source.
/// Holds no mutable state; each call builds its own result list.
///

#[derive(Debug)]
pub struct EntityIndexResolver<'m, M: ?Sized> {
    metadata: &'m M,
    config: ResolverConfig,
}

impl<'m, M> EntityIndexResolver<'m, M>
where
    M: EntityMetadata + ?Sized,
{
    #[must_use]
    pub fn new(metadata: &'m M) -> Self {
        Self {
            metadata,
            config: ResolverConfig::default(),
        }
    }

    pub fn with_config(metadata: &'m M, config: ResolverConfig) -> Result<Self, IndexError> {
        config.validate()?;

        Ok(Self { metadata, config })
    }

    #[must_use]
    pub const fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve a statically declared collection root.
    pub fn resolve_index_for_type<E: EntitySchema>(
        &self,
    ) -> Result<Vec<IndexDefinitionHolder>, IndexError> {
        self.resolve_index_for_entity(E::MODEL)
    }

    /// Resolve an already looked-up root entity.
    pub fn resolve_index_for_entity(
        &self,
        root: &EntityModel,
    ) -> Result<Vec<IndexDefinitionHolder>, IndexError> {
        let collection = root.collection().ok_or_else(|| {
            IndexError::invalid_argument(format!("entity '{}' is not a collection root", root.path))
        })?;

        tracing::debug!(
            entity = root.path,
            collection = %collection,
            "resolving index definitions"
        );

        let mut walk = Walk {
            holders: Vec::new(),
            stack: vec![root.path],
        };
        self.resolve_entity(root, "", &collection, 0, &mut walk)?;

        tracing::debug!(
            entity = root.path,
            indexes = walk.holders.len(),
            "resolved index definitions"
        );

        Ok(walk.holders)
    }

    // Compound declarations on the type first, then each property in order.
    fn resolve_entity(
        &self,
        entity: &EntityModel,
        path: &str,
        collection: &str,
        depth: usize,
        walk: &mut Walk,
    ) -> Result<(), IndexError> {
        let ctx = IndexContext::new(path, collection);
        let compound = compound_index_definitions(entity.compound_indexes, ctx)?;
        for holder in compound {
            walk.push(holder);
        }

        for field in entity.fields {
            let property_path = dotted_path(path, field.field_name());

            if field.is_entity() {
                self.resolve_embedded(field, &property_path, collection, depth + 1, walk)?;
            }

            let ctx = IndexContext::new(&property_path, collection);
            if let Some(holder) = field_index_definition(field, ctx)? {
                walk.push(holder);
            }
        }

        Ok(())
    }

    fn resolve_embedded(
        &self,
        field: &FieldModel,
        path: &str,
        collection: &str,
        depth: usize,
        walk: &mut Walk,
    ) -> Result<(), IndexError> {
        let actual = field.actual_type();

        if walk.stack.contains(&actual) {
            return match self.config.on_cycle {
                CyclePolicy::Skip => {
                    tracing::warn!(
                        path,
                        entity = actual,
                        "skipping cyclic entity reference during index resolution"
                    );
                    Ok(())
                }
                CyclePolicy::Error => Err(IndexError::CyclicReference {
                    path: path.to_string(),
                    entity: actual.to_string(),
                }),
            };
        }

        if depth > self.config.max_depth {
            return Err(IndexError::DepthLimitExceeded {
                path: path.to_string(),
                max_depth: self.config.max_depth,
            });
        }

        let entity = self.metadata.entity(actual).ok_or_else(|| {
            IndexError::invalid_argument(format!(
                "entity '{actual}' embedded at '{path}' is not registered"
            ))
        })?;

        walk.stack.push(actual);
        let result = self.resolve_entity(entity, path, collection, depth, walk);
        walk.stack.pop();

        result
    }
}

impl<M> IndexResolver for EntityIndexResolver<'_, M>
where
    M: EntityMetadata + ?Sized,
{
    fn resolve_index_for(
        &self,
        type_path: &str,
    ) -> Result<Vec<IndexDefinitionHolder>, IndexError> {
        let root = self.metadata.entity(type_path).ok_or_else(|| {
            IndexError::invalid_argument(format!("entity '{type_path}' is not registered"))
        })?;

        self.resolve_index_for_entity(root)
    }
}

// Per-call accumulator: emitted holders plus the entity types currently
// being descended through.
struct Walk {
    holders: Vec<IndexDefinitionHolder>,
    stack: Vec<&'static str>,
}

impl Walk {
    fn push(&mut self, holder: IndexDefinitionHolder) {
        tracing::trace!(
            path = holder.path(),
            collection = holder.collection(),
            "index definition"
        );
        self.holders.push(holder);
    }
}

/// Join a parent path and a field name with `.`; the root path is empty.
#[must_use]
pub fn dotted_path(parent: &str, field_name: &str) -> String {
    if parent.is_empty() {
        field_name.to_string()
    } else {
        format!("{parent}.{field_name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::{
            field::FieldType,
            index::{FieldIndex, IndexedSpec},
        },
        registry::EntityRegistry,
    };
    use proptest::prelude::*;
    use tracing_test::traced_test;

    static CATEGORY_FIELDS: [FieldModel; 2] = [
        FieldModel::new("slug", FieldType::scalar("String"))
            .indexed(FieldIndex::Indexed(IndexedSpec::new().unique())),
        FieldModel::new("parent", FieldType::entity("test::Category")),
    ];
    static CATEGORY: EntityModel = EntityModel::document("test::Category", &CATEGORY_FIELDS);

    #[traced_test]
    #[test]
    fn self_reference_is_skipped_with_warning() {
        let mut registry = EntityRegistry::new();
        registry.register(&CATEGORY).unwrap();

        let holders = EntityIndexResolver::new(&registry)
            .resolve_index_for("test::Category")
            .unwrap();

        assert_eq!(holders.len(), 1);
        assert_eq!(holders[0].path(), "slug");
        assert_eq!(holders[0].collection(), Some("category"));
        assert!(logs_contain("skipping cyclic entity reference"));
    }

    #[test]
    fn dotted_path_has_no_leading_dot() {
        assert_eq!(dotted_path("", "address"), "address");
        assert_eq!(dotted_path("address", "zip"), "address.zip");
        assert_eq!(dotted_path("a.b", "c"), "a.b.c");
    }

    proptest! {
        #[test]
        fn dotted_path_segments_round_trip(segments in prop::collection::vec("[a-zA-Z_][a-zA-Z0-9_]{0,8}", 1..6)) {
            let path = segments
                .iter()
                .fold(String::new(), |parent, segment| dotted_path(&parent, segment));

            prop_assert!(!path.starts_with('.'));
            prop_assert_eq!(path.split('.').collect::<Vec<_>>(), segments.iter().map(String::as_str).collect::<Vec<_>>());
        }
    }
}
