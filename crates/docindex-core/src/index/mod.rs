pub mod builder;
pub mod definition;
pub mod holder;
pub mod key_pattern;

pub use builder::IndexContext;
pub use definition::{
    CompoundIndexDefinition, Duplicates, GeospatialIndex, Index, IndexDefinition, IndexOptions,
};
pub use holder::IndexDefinitionHolder;
pub use key_pattern::{KeyPatternError, parse_key_pattern};
