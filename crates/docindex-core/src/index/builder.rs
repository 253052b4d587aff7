//! Turns one index declaration plus its resolution context into a holder.
//!
//! Naming and collection defaults are shared by all three builders:
//! - collection: explicit non-blank collection, else the inherited one
//! - `unique` maps to `Duplicates::Drop` or `Duplicates::Retain`
//! - a negative `expire_after_seconds` means no TTL; zero is a real TTL
//!
//! Name fallbacks differ: single-field and compound fall back to the dotted
//! path, geospatial falls back to the bare property name.

use crate::{
    error::IndexError,
    index::{
        definition::{CompoundIndexDefinition, Duplicates, GeospatialIndex, Index},
        holder::IndexDefinitionHolder,
        key_pattern::parse_key_pattern,
    },
    model::{
        field::{FieldModel, explicit},
        index::{CompoundIndexSpec, FieldIndex, GeoSpatialIndexType, GeoSpatialIndexedSpec, IndexedSpec},
    },
};

///
/// IndexContext
/// Where a declaration sits in the entity graph being resolved.
///

#[derive(Clone, Copy, Debug)]
pub struct IndexContext<'a> {
    /// Dotted path of the declaring property, or of the embedding property
    /// for type-level declarations. Empty at the root.
    pub path: &'a str,
    /// Collection inherited from the enclosing call.
    pub collection: &'a str,
}

impl<'a> IndexContext<'a> {
    #[must_use]
    pub const fn new(path: &'a str, collection: &'a str) -> Self {
        Self { path, collection }
    }

    fn collection_for(&self, declared: Option<&'static str>) -> String {
        let declared: Option<&str> = explicit(declared);

        declared.unwrap_or(self.collection).to_string()
    }
}

/// Build holders for every compound declaration on a type, in order.
pub fn compound_index_definitions(
    specs: &[CompoundIndexSpec],
    ctx: IndexContext<'_>,
) -> Result<Vec<IndexDefinitionHolder>, IndexError> {
    specs
        .iter()
        .map(|spec| compound_index_definition(spec, ctx))
        .collect()
}

/// Build one compound index from its raw key pattern.
pub fn compound_index_definition(
    spec: &CompoundIndexSpec,
    ctx: IndexContext<'_>,
) -> Result<IndexDefinitionHolder, IndexError> {
    let name: Option<&str> = explicit(spec.name);
    let holder_path = name.unwrap_or(ctx.path);

    let pattern = parse_key_pattern(spec.def).map_err(|err| {
        IndexError::malformed(
            holder_path,
            format!("compound index definition '{}': {err}", spec.def),
        )
    })?;

    let definition_name = name.or_else(|| Some(ctx.path).filter(|p| !p.is_empty()));
    let collection = ctx.collection_for(spec.collection);
    let flags = Flags {
        unique: spec.unique,
        drop_dups: spec.drop_dups,
        sparse: spec.sparse,
        background: spec.background,
        expire_after_seconds: spec.expire_after_seconds,
    };

    let definition = CompoundIndexDefinition::new(pattern).configure(|index| {
        let index = index.in_collection(collection);
        let index = match definition_name {
            Some(name) => index.named(name),
            None => index,
        };

        flags.apply(index)
    });

    Ok(IndexDefinitionHolder::new(holder_path).with_definition(definition))
}

/// Build the holder for a property's field-level declaration, if any.
pub fn field_index_definition(
    field: &FieldModel,
    ctx: IndexContext<'_>,
) -> Result<Option<IndexDefinitionHolder>, IndexError> {
    match &field.index {
        Some(FieldIndex::Indexed(spec)) => Ok(Some(single_field_index_definition(spec, ctx))),
        Some(FieldIndex::GeoSpatial(spec)) => geospatial_index_definition(field, spec, ctx).map(Some),
        None => Ok(None),
    }
}

/// Build a single-field index keyed on the dotted path.
#[must_use]
pub fn single_field_index_definition(
    spec: &IndexedSpec,
    ctx: IndexContext<'_>,
) -> IndexDefinitionHolder {
    let name: Option<&str> = explicit(spec.name);
    let name = name.unwrap_or(ctx.path);
    let flags = Flags {
        unique: spec.unique,
        drop_dups: spec.drop_dups,
        sparse: spec.sparse,
        background: spec.background,
        expire_after_seconds: spec.expire_after_seconds,
    };

    let index = Index::new()
        .in_collection(ctx.collection_for(spec.collection))
        .named(name)
        .on(ctx.path, spec.direction);

    IndexDefinitionHolder::new(ctx.path).with_definition(flags.apply(index))
}

/// Build a geospatial index keyed on the dotted path.
///
/// An unnamed geospatial index is named after the bare property name, not
/// the dotted path, unlike the other builders.
pub fn geospatial_index_definition(
    field: &FieldModel,
    spec: &GeoSpatialIndexedSpec,
    ctx: IndexContext<'_>,
) -> Result<IndexDefinitionHolder, IndexError> {
    let additional_field = explicit(spec.additional_field);

    if spec.kind == GeoSpatialIndexType::GeoHaystack && additional_field.is_none() {
        return Err(IndexError::malformed(
            ctx.path,
            "geoHaystack index requires an additional field",
        ));
    }

    let index = GeospatialIndex::new(ctx.path)
        .in_collection(ctx.collection_for(spec.collection))
        .with_bits(spec.bits)
        .with_min(spec.min)
        .with_max(spec.max)
        .named(explicit(spec.name).unwrap_or(field.name))
        .typed(spec.kind)
        .with_bucket_size(spec.bucket_size)
        .with_additional_field(additional_field);

    Ok(IndexDefinitionHolder::new(ctx.path).with_definition(index))
}

// Flags shared by the single-field and compound declarations.
struct Flags {
    unique: bool,
    drop_dups: bool,
    sparse: bool,
    background: bool,
    expire_after_seconds: i64,
}

impl Flags {
    fn apply(&self, mut index: Index) -> Index {
        if self.unique {
            index = index.unique(if self.drop_dups {
                Duplicates::Drop
            } else {
                Duplicates::Retain
            });
        }
        if self.sparse {
            index = index.sparse();
        }
        if self.background {
            index = index.background();
        }
        if let Ok(seconds) = u64::try_from(self.expire_after_seconds) {
            index = index.expire_after_seconds(seconds);
        }

        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::field::FieldType;
    use bson::doc;
    use proptest::prelude::*;

    fn ctx<'a>(path: &'a str) -> IndexContext<'a> {
        IndexContext::new(path, "person")
    }

    #[test]
    fn single_field_defaults_to_dotted_path_name_and_key() {
        let holder = single_field_index_definition(&IndexedSpec::new(), ctx("address.zip"));

        assert_eq!(holder.path(), "address.zip");
        assert_eq!(holder.collection(), Some("person"));
        assert_eq!(holder.index_keys().unwrap(), doc! { "address.zip": 1 });
        assert_eq!(
            holder.index_options().unwrap(),
            doc! { "name": "address.zip" }
        );
    }

    #[test]
    fn single_field_explicit_overrides() {
        let spec = IndexedSpec::new()
            .named("by_age")
            .in_collection("archive")
            .descending()
            .unique()
            .sparse()
            .background();
        let holder = single_field_index_definition(&spec, ctx("age"));

        assert_eq!(holder.collection(), Some("archive"));
        assert_eq!(holder.index_keys().unwrap(), doc! { "age": -1 });
        assert_eq!(
            holder.index_options().unwrap(),
            doc! { "name": "by_age", "unique": true, "sparse": true, "background": true }
        );
    }

    #[test]
    fn blank_name_and_collection_fall_back() {
        let spec = IndexedSpec::new().named("   ").in_collection("");
        let holder = single_field_index_definition(&spec, ctx("email"));

        assert_eq!(holder.collection(), Some("person"));
        assert_eq!(holder.index_options().unwrap(), doc! { "name": "email" });
    }

    #[test]
    fn compound_unique_drop_dups_encodes_drop_policy() {
        let spec = CompoundIndexSpec::new("{'a':1,'b':-1}")
            .named("idx1")
            .unique()
            .drop_dups();
        let holder = compound_index_definition(&spec, ctx("")).unwrap();

        assert_eq!(holder.path(), "idx1");
        assert_eq!(holder.index_keys().unwrap(), doc! { "a": 1, "b": -1 });
        assert_eq!(
            holder.index_options().unwrap(),
            doc! { "name": "idx1", "unique": true, "dropDups": true }
        );
    }

    #[test]
    fn unnamed_root_compound_has_empty_path_and_no_name() {
        let spec = CompoundIndexSpec::new("{'a': 1}");
        let holder = compound_index_definition(&spec, ctx("")).unwrap();

        assert_eq!(holder.path(), "");
        assert!(holder.index_options().unwrap().is_empty());
    }

    #[test]
    fn unnamed_nested_compound_is_named_after_path() {
        let spec = CompoundIndexSpec::new("{'a': 1}").in_collection("other");
        let holder = compound_index_definition(&spec, ctx("address")).unwrap();

        assert_eq!(holder.path(), "address");
        assert_eq!(holder.collection(), Some("other"));
        assert_eq!(holder.index_options().unwrap(), doc! { "name": "address" });
    }

    #[test]
    fn malformed_compound_pattern_names_the_declaration() {
        let spec = CompoundIndexSpec::new("{'a': }").named("broken");
        let err = compound_index_definition(&spec, ctx("")).unwrap_err();

        match err {
            IndexError::MalformedConfiguration { path, message } => {
                assert_eq!(path, "broken");
                assert!(message.contains("{'a': }"), "message was: {message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn geospatial_falls_back_to_bare_property_name() {
        let field = FieldModel::new("location", FieldType::scalar("Point"));
        let holder =
            geospatial_index_definition(&field, &GeoSpatialIndexedSpec::new(), ctx("place.location"))
                .unwrap();

        assert_eq!(holder.path(), "place.location");
        assert_eq!(holder.index_keys().unwrap(), doc! { "place.location": "2d" });
        assert_eq!(
            holder.index_options().unwrap(),
            doc! { "name": "location", "min": -180, "max": 180, "bits": 26 }
        );
    }

    #[test]
    fn geo_haystack_without_additional_field_is_rejected() {
        let field = FieldModel::new("pos", FieldType::scalar("Point"));
        let spec = GeoSpatialIndexedSpec::new().kind(GeoSpatialIndexType::GeoHaystack);
        let err = geospatial_index_definition(&field, &spec, ctx("pos")).unwrap_err();

        assert!(matches!(err, IndexError::MalformedConfiguration { .. }));
    }

    #[test]
    fn field_without_declaration_yields_nothing() {
        let field = FieldModel::new("plain", FieldType::scalar("String"));

        assert!(field_index_definition(&field, ctx("plain")).unwrap().is_none());
    }

    proptest! {
        #[test]
        fn ttl_is_set_only_for_non_negative_seconds(seconds in -1_000_i64..1_000) {
            let spec = IndexedSpec::new().expire_after_seconds(seconds);
            let options = single_field_index_definition(&spec, ctx("created"))
                .index_options()
                .unwrap();

            if seconds >= 0 {
                prop_assert_eq!(options.get_i64("expireAfterSeconds").ok(), Some(seconds));
            } else {
                prop_assert!(!options.contains_key("expireAfterSeconds"));
            }
        }
    }
}
