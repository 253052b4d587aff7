use crate::{
    error::IndexError,
    index::key_pattern::parse_key_pattern,
    model::{entity::EntityModel, field::has_text},
};
use std::collections::{BTreeMap, BTreeSet};

///
/// EntitySchema
///
/// Static metadata for a modeled Rust type.
///

pub trait EntitySchema {
    const MODEL: &'static EntityModel;
}

///
/// EntityMetadata
///
/// Lookup of entity models by type path. Implementations must be read-only
/// while resolution runs.
///

pub trait EntityMetadata {
    fn entity(&self, path: &str) -> Option<&EntityModel>;
}

///
/// EntityRegistry
///
/// Registered entity models keyed by type path. Models are validated on
/// registration so resolution only fails on graph-level problems.
///

#[derive(Clone, Debug, Default)]
pub struct EntityRegistry {
    entities: BTreeMap<&'static str, &'static EntityModel>,
}

impl EntityRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the model of a statically declared type.
    pub fn register_kind<E: EntitySchema>(&mut self) -> Result<(), IndexError> {
        self.register(E::MODEL)
    }

    pub fn register(&mut self, model: &'static EntityModel) -> Result<(), IndexError> {
        validate_model(model)?;

        if self.entities.contains_key(model.path) {
            return Err(IndexError::invalid_argument(format!(
                "entity '{}' already registered",
                model.path
            )));
        }
        self.entities.insert(model.path, model);

        tracing::debug!(
            entity = model.path,
            fields = model.fields.len(),
            compound_indexes = model.compound_indexes.len(),
            root = model.is_collection_root(),
            "registered entity model"
        );

        Ok(())
    }

    /// Register several models, stopping at the first failure.
    pub fn register_all(
        &mut self,
        models: impl IntoIterator<Item = &'static EntityModel>,
    ) -> Result<(), IndexError> {
        models.into_iter().try_for_each(|model| self.register(model))
    }

    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.entities.contains_key(path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterate registered models in path order.
    pub fn iter(&self) -> impl Iterator<Item = &'static EntityModel> + '_ {
        self.entities.values().copied()
    }

    /// Iterate the registered collection roots in path order.
    pub fn collection_roots(&self) -> impl Iterator<Item = &'static EntityModel> + '_ {
        self.iter().filter(|model| model.is_collection_root())
    }
}

impl EntityMetadata for EntityRegistry {
    fn entity(&self, path: &str) -> Option<&EntityModel> {
        self.entities.get(path).copied()
    }
}

// Structural checks for one model; cross-entity references are checked
// lazily during resolution.
fn validate_model(model: &EntityModel) -> Result<(), IndexError> {
    if !has_text(model.path) {
        return Err(IndexError::invalid_argument("entity path is empty"));
    }

    let mut seen = BTreeSet::new();
    for field in model.fields {
        if !has_text(field.name) {
            return Err(IndexError::invalid_argument(format!(
                "entity '{}' declares a field with an empty name",
                model.path
            )));
        }
        if !seen.insert(field.field_name()) {
            return Err(IndexError::invalid_argument(format!(
                "entity '{}' stores more than one field as '{}'",
                model.path,
                field.field_name()
            )));
        }
        if field.is_entity() && !has_text(field.actual_type()) {
            return Err(IndexError::invalid_argument(format!(
                "field '{}.{}' is an entity but names no actual type",
                model.path, field.name
            )));
        }
    }

    for spec in model.compound_indexes {
        parse_key_pattern(spec.def).map_err(|err| {
            IndexError::malformed(
                model.path,
                format!("compound index definition '{}': {err}", spec.def),
            )
        })?;
    }

    Ok(())
}
