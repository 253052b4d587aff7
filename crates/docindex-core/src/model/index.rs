use derive_more::Display;

/// Value used by `expire_after_seconds` when no TTL is declared.
pub const NO_EXPIRY: i64 = -1;

///
/// IndexDirection
///

#[derive(Clone, Copy, Debug, Default, Display, Eq, PartialEq)]
pub enum IndexDirection {
    #[default]
    Ascending,
    Descending,
}

impl IndexDirection {
    /// Key-pattern value for this direction.
    #[must_use]
    pub const fn as_key_value(self) -> i32 {
        match self {
            Self::Ascending => 1,
            Self::Descending => -1,
        }
    }
}

///
/// GeoSpatialIndexType
///

#[derive(Clone, Copy, Debug, Default, Display, Eq, PartialEq)]
pub enum GeoSpatialIndexType {
    #[default]
    #[display("2d")]
    Geo2d,

    #[display("2dsphere")]
    Geo2dSphere,

    #[display("geoHaystack")]
    GeoHaystack,
}

///
/// IndexedSpec
///
/// Single-field index declared on a property.
///

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndexedSpec {
    pub name: Option<&'static str>,
    pub collection: Option<&'static str>,
    pub direction: IndexDirection,
    pub unique: bool,
    pub drop_dups: bool,
    pub sparse: bool,
    pub background: bool,
    pub expire_after_seconds: i64,
}

impl IndexedSpec {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            name: None,
            collection: None,
            direction: IndexDirection::Ascending,
            unique: false,
            drop_dups: false,
            sparse: false,
            background: false,
            expire_after_seconds: NO_EXPIRY,
        }
    }

    #[must_use]
    pub const fn named(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }

    #[must_use]
    pub const fn in_collection(mut self, collection: &'static str) -> Self {
        self.collection = Some(collection);
        self
    }

    #[must_use]
    pub const fn descending(mut self) -> Self {
        self.direction = IndexDirection::Descending;
        self
    }

    #[must_use]
    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    #[must_use]
    pub const fn drop_dups(mut self) -> Self {
        self.drop_dups = true;
        self
    }

    #[must_use]
    pub const fn sparse(mut self) -> Self {
        self.sparse = true;
        self
    }

    #[must_use]
    pub const fn background(mut self) -> Self {
        self.background = true;
        self
    }

    #[must_use]
    pub const fn expire_after_seconds(mut self, seconds: i64) -> Self {
        self.expire_after_seconds = seconds;
        self
    }
}

impl Default for IndexedSpec {
    fn default() -> Self {
        Self::new()
    }
}

///
/// GeoSpatialIndexedSpec
///
/// Geospatial index declared on a property. Parameters are carried verbatim
/// into the index options.
///

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoSpatialIndexedSpec {
    pub name: Option<&'static str>,
    pub collection: Option<&'static str>,
    pub bits: i32,
    pub min: i32,
    pub max: i32,
    pub kind: GeoSpatialIndexType,
    pub bucket_size: f64,
    pub additional_field: Option<&'static str>,
}

impl GeoSpatialIndexedSpec {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            name: None,
            collection: None,
            bits: 26,
            min: -180,
            max: 180,
            kind: GeoSpatialIndexType::Geo2d,
            bucket_size: 1.0,
            additional_field: None,
        }
    }

    #[must_use]
    pub const fn named(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }

    #[must_use]
    pub const fn in_collection(mut self, collection: &'static str) -> Self {
        self.collection = Some(collection);
        self
    }

    #[must_use]
    pub const fn bits(mut self, bits: i32) -> Self {
        self.bits = bits;
        self
    }

    #[must_use]
    pub const fn bounds(mut self, min: i32, max: i32) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    #[must_use]
    pub const fn kind(mut self, kind: GeoSpatialIndexType) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub const fn bucket_size(mut self, bucket_size: f64) -> Self {
        self.bucket_size = bucket_size;
        self
    }

    #[must_use]
    pub const fn additional_field(mut self, field: &'static str) -> Self {
        self.additional_field = Some(field);
        self
    }
}

impl Default for GeoSpatialIndexedSpec {
    fn default() -> Self {
        Self::new()
    }
}

///
/// CompoundIndexSpec
///
/// Compound index declared on a type. `def` is the raw key pattern, e.g.
/// `{'lastName': 1, 'age': -1}`.
///

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompoundIndexSpec {
    pub name: Option<&'static str>,
    pub def: &'static str,
    pub collection: Option<&'static str>,
    pub unique: bool,
    pub drop_dups: bool,
    pub sparse: bool,
    pub background: bool,
    pub expire_after_seconds: i64,
}

impl CompoundIndexSpec {
    #[must_use]
    pub const fn new(def: &'static str) -> Self {
        Self {
            name: None,
            def,
            collection: None,
            unique: false,
            drop_dups: false,
            sparse: false,
            background: false,
            expire_after_seconds: NO_EXPIRY,
        }
    }

    #[must_use]
    pub const fn named(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }

    #[must_use]
    pub const fn in_collection(mut self, collection: &'static str) -> Self {
        self.collection = Some(collection);
        self
    }

    #[must_use]
    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    #[must_use]
    pub const fn drop_dups(mut self) -> Self {
        self.drop_dups = true;
        self
    }

    #[must_use]
    pub const fn sparse(mut self) -> Self {
        self.sparse = true;
        self
    }

    #[must_use]
    pub const fn background(mut self) -> Self {
        self.background = true;
        self
    }

    #[must_use]
    pub const fn expire_after_seconds(mut self, seconds: i64) -> Self {
        self.expire_after_seconds = seconds;
        self
    }
}

///
/// FieldIndex
///
/// Index declaration attached to a single property.
/// Type-level declarations live on `EntityModel::compound_indexes`.
///

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldIndex {
    Indexed(IndexedSpec),
    GeoSpatial(GeoSpatialIndexedSpec),
}

impl FieldIndex {
    #[must_use]
    pub const fn name(&self) -> Option<&'static str> {
        match self {
            Self::Indexed(spec) => spec.name,
            Self::GeoSpatial(spec) => spec.name,
        }
    }

    #[must_use]
    pub const fn collection(&self) -> Option<&'static str> {
        match self {
            Self::Indexed(spec) => spec.collection,
            Self::GeoSpatial(spec) => spec.collection,
        }
    }
}
