use crate::model::index::{GeoSpatialIndexType, IndexDirection};
use bson::Document;
use derive_more::Display;

///
/// Duplicates
/// What happens to documents violating a unique index at creation time.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Duplicates {
    Retain,
    Drop,
}

///
/// IndexOptions
///
/// Flags shared by single-field and compound definitions.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct IndexOptions {
    pub name: Option<String>,
    pub unique: Option<Duplicates>,
    pub sparse: bool,
    pub background: bool,
    pub expire_after_seconds: Option<u64>,
}

impl IndexOptions {
    #[must_use]
    pub fn to_document(&self) -> Document {
        let mut options = Document::new();

        if let Some(name) = &self.name {
            options.insert("name", name.as_str());
        }
        if let Some(duplicates) = self.unique {
            options.insert("unique", true);
            if duplicates == Duplicates::Drop {
                options.insert("dropDups", true);
            }
        }
        if self.sparse {
            options.insert("sparse", true);
        }
        if self.background {
            options.insert("background", true);
        }
        if let Some(seconds) = self.expire_after_seconds {
            options.insert("expireAfterSeconds", i64::try_from(seconds).unwrap_or(i64::MAX));
        }

        options
    }
}

///
/// Index
///
/// Index over explicitly listed keys. Used for single-field declarations and
/// as the base of compound definitions.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Index {
    collection: Option<String>,
    keys: Document,
    options: IndexOptions,
}

impl Index {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on(mut self, key: impl Into<String>, direction: IndexDirection) -> Self {
        self.keys.insert(key.into(), direction.as_key_value());
        self
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.options.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn in_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    #[must_use]
    pub const fn unique(mut self, duplicates: Duplicates) -> Self {
        self.options.unique = Some(duplicates);
        self
    }

    #[must_use]
    pub const fn sparse(mut self) -> Self {
        self.options.sparse = true;
        self
    }

    #[must_use]
    pub const fn background(mut self) -> Self {
        self.options.background = true;
        self
    }

    #[must_use]
    pub const fn expire_after_seconds(mut self, seconds: u64) -> Self {
        self.options.expire_after_seconds = Some(seconds);
        self
    }

    #[must_use]
    pub fn collection(&self) -> Option<&str> {
        self.collection.as_deref()
    }

    #[must_use]
    pub const fn options(&self) -> &IndexOptions {
        &self.options
    }

    #[must_use]
    pub fn index_keys(&self) -> Document {
        self.keys.clone()
    }

    #[must_use]
    pub fn index_options(&self) -> Document {
        self.options.to_document()
    }
}

///
/// CompoundIndexDefinition
///
/// Index whose keys come from a caller-supplied key pattern rather than from
/// property names.
///

#[derive(Clone, Debug, PartialEq)]
pub struct CompoundIndexDefinition {
    pattern: Document,
    index: Index,
}

impl CompoundIndexDefinition {
    #[must_use]
    pub fn new(pattern: Document) -> Self {
        Self {
            pattern,
            index: Index::new(),
        }
    }

    /// Apply shared flags and naming through the underlying `Index`.
    #[must_use]
    pub fn configure(mut self, f: impl FnOnce(Index) -> Index) -> Self {
        self.index = f(self.index);
        self
    }

    #[must_use]
    pub fn collection(&self) -> Option<&str> {
        self.index.collection()
    }

    #[must_use]
    pub const fn options(&self) -> &IndexOptions {
        self.index.options()
    }

    /// Key pattern followed by any keys added through `configure`.
    #[must_use]
    pub fn index_keys(&self) -> Document {
        let mut keys = self.pattern.clone();
        for (key, value) in self.index.index_keys() {
            keys.insert(key, value);
        }

        keys
    }

    #[must_use]
    pub fn index_options(&self) -> Document {
        self.index.index_options()
    }
}

///
/// GeospatialIndex
///
/// Geo index on one field. Which parameters reach the options document
/// depends on the index type.
///

#[derive(Clone, Debug, PartialEq)]
pub struct GeospatialIndex {
    field: String,
    collection: Option<String>,
    name: Option<String>,
    kind: GeoSpatialIndexType,
    bits: i32,
    min: i32,
    max: i32,
    bucket_size: f64,
    additional_field: Option<String>,
}

impl GeospatialIndex {
    #[must_use]
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            collection: None,
            name: None,
            kind: GeoSpatialIndexType::Geo2d,
            bits: 26,
            min: -180,
            max: 180,
            bucket_size: 1.0,
            additional_field: None,
        }
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn in_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    #[must_use]
    pub const fn typed(mut self, kind: GeoSpatialIndexType) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub const fn with_bits(mut self, bits: i32) -> Self {
        self.bits = bits;
        self
    }

    #[must_use]
    pub const fn with_min(mut self, min: i32) -> Self {
        self.min = min;
        self
    }

    #[must_use]
    pub const fn with_max(mut self, max: i32) -> Self {
        self.max = max;
        self
    }

    #[must_use]
    pub const fn with_bucket_size(mut self, bucket_size: f64) -> Self {
        self.bucket_size = bucket_size;
        self
    }

    #[must_use]
    pub fn with_additional_field(mut self, field: Option<impl Into<String>>) -> Self {
        self.additional_field = field.map(Into::into);
        self
    }

    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    #[must_use]
    pub const fn kind(&self) -> GeoSpatialIndexType {
        self.kind
    }

    #[must_use]
    pub fn collection(&self) -> Option<&str> {
        self.collection.as_deref()
    }

    #[must_use]
    pub fn index_keys(&self) -> Document {
        let mut keys = Document::new();
        keys.insert(self.field.as_str(), self.kind.to_string());

        if self.kind == GeoSpatialIndexType::GeoHaystack {
            if let Some(additional) = &self.additional_field {
                keys.insert(additional.as_str(), 1);
            }
        }

        keys
    }

    #[must_use]
    pub fn index_options(&self) -> Document {
        let mut options = Document::new();

        if let Some(name) = &self.name {
            options.insert("name", name.as_str());
        }
        match self.kind {
            GeoSpatialIndexType::Geo2d => {
                options.insert("min", self.min);
                options.insert("max", self.max);
                options.insert("bits", self.bits);
            }
            GeoSpatialIndexType::Geo2dSphere => {}
            GeoSpatialIndexType::GeoHaystack => {
                options.insert("bucketSize", self.bucket_size);
            }
        }

        options
    }
}

///
/// IndexDefinition
///

#[derive(Clone, Debug, PartialEq)]
pub enum IndexDefinition {
    Single(Index),
    Compound(CompoundIndexDefinition),
    Geospatial(GeospatialIndex),
}

impl IndexDefinition {
    /// Collection the index belongs to.
    #[must_use]
    pub fn collection(&self) -> Option<&str> {
        match self {
            Self::Single(index) => index.collection(),
            Self::Compound(index) => index.collection(),
            Self::Geospatial(index) => index.collection(),
        }
    }

    /// Field to direction (or index type) mapping, in key order.
    #[must_use]
    pub fn index_keys(&self) -> Document {
        match self {
            Self::Single(index) => index.index_keys(),
            Self::Compound(index) => index.index_keys(),
            Self::Geospatial(index) => index.index_keys(),
        }
    }

    /// Options passed alongside the keys when creating the index.
    #[must_use]
    pub fn index_options(&self) -> Document {
        match self {
            Self::Single(index) => index.index_options(),
            Self::Compound(index) => index.index_options(),
            Self::Geospatial(index) => index.index_options(),
        }
    }
}

impl From<Index> for IndexDefinition {
    fn from(index: Index) -> Self {
        Self::Single(index)
    }
}

impl From<CompoundIndexDefinition> for IndexDefinition {
    fn from(index: CompoundIndexDefinition) -> Self {
        Self::Compound(index)
    }
}

impl From<GeospatialIndex> for IndexDefinition {
    fn from(index: GeospatialIndex) -> Self {
        Self::Geospatial(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn unique_retain_omits_drop_dups() {
        let options = Index::new()
            .on("email", IndexDirection::Ascending)
            .unique(Duplicates::Retain)
            .index_options();

        assert_eq!(options, doc! { "unique": true });
    }

    #[test]
    fn options_are_written_in_stable_order() {
        let options = Index::new()
            .named("ttl_idx")
            .unique(Duplicates::Drop)
            .sparse()
            .background()
            .expire_after_seconds(3600)
            .index_options();

        assert_eq!(
            options,
            doc! {
                "name": "ttl_idx",
                "unique": true,
                "dropDups": true,
                "sparse": true,
                "background": true,
                "expireAfterSeconds": 3600_i64,
            }
        );
    }

    #[test]
    fn compound_keys_start_with_pattern() {
        let index = CompoundIndexDefinition::new(doc! { "a": 1, "b": -1 })
            .configure(|index| index.on("c", IndexDirection::Descending));

        assert_eq!(index.index_keys(), doc! { "a": 1, "b": -1, "c": -1 });
    }

    #[test]
    fn geo_options_depend_on_type() {
        let flat = GeospatialIndex::new("location").named("loc").with_bits(30);
        assert_eq!(
            flat.index_options(),
            doc! { "name": "loc", "min": -180, "max": 180, "bits": 30 }
        );

        let sphere = GeospatialIndex::new("location").typed(GeoSpatialIndexType::Geo2dSphere);
        assert_eq!(sphere.index_keys(), doc! { "location": "2dsphere" });
        assert!(sphere.index_options().is_empty());

        let haystack = GeospatialIndex::new("pos")
            .typed(GeoSpatialIndexType::GeoHaystack)
            .with_bucket_size(2.5)
            .with_additional_field(Some("type"));
        assert_eq!(
            haystack.index_keys(),
            doc! { "pos": "geoHaystack", "type": 1 }
        );
        assert_eq!(haystack.index_options(), doc! { "bucketSize": 2.5 });
    }

    #[test]
    fn definition_delegates_to_variant() {
        let definition: IndexDefinition = Index::new()
            .on("zip", IndexDirection::Ascending)
            .in_collection("person")
            .into();

        assert_eq!(definition.collection(), Some("person"));
        assert_eq!(definition.index_keys(), doc! { "zip": 1 });
        assert!(definition.index_options().is_empty());
    }
}
