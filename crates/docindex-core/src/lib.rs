//! Core of docindex: static entity models, index declarations, and the
//! resolver that turns an entity graph into index definitions.
#![warn(unreachable_pub)]

pub mod config;
pub mod error;
pub mod index;
pub mod model;
pub mod registry;
pub mod resolver;

pub use error::{ErrorClass, IndexError};

///
/// Prelude
///
/// Declaration vocabulary plus the resolver entry points.
///

pub mod prelude {
    pub use crate::{
        config::{CyclePolicy, ResolverConfig},
        error::IndexError,
        index::{IndexDefinition, IndexDefinitionHolder},
        model::{
            entity::EntityModel,
            field::{Cardinality, FieldModel, FieldType},
            index::{
                CompoundIndexSpec, FieldIndex, GeoSpatialIndexType, GeoSpatialIndexedSpec,
                IndexDirection, IndexedSpec,
            },
        },
        registry::{EntityMetadata, EntityRegistry, EntitySchema},
        resolver::{EntityIndexResolver, IndexResolver},
    };
}
