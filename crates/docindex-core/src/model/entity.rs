use crate::model::{
    field::{FieldModel, explicit},
    index::CompoundIndexSpec,
};
use std::borrow::Cow;

///
/// CollectionRoot
/// Marks an entity as stored in its own top-level collection.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CollectionRoot {
    pub collection: Option<&'static str>,
}

///
/// EntityModel
///
/// Static metadata for one modeled type: either a collection root or an
/// embedded document type reachable from one.
///

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntityModel {
    /// Fully-qualified type path, used as the registry key.
    pub path: &'static str,
    /// Present when the type is stored as a top-level document.
    pub root: Option<CollectionRoot>,
    /// Type-level compound index declarations, in declaration order.
    pub compound_indexes: &'static [CompoundIndexSpec],
    /// Persistent properties, in declaration order.
    pub fields: &'static [FieldModel],
}

impl EntityModel {
    /// Collection root using the collection name derived from the type name.
    #[must_use]
    pub const fn document(path: &'static str, fields: &'static [FieldModel]) -> Self {
        Self {
            path,
            root: Some(CollectionRoot { collection: None }),
            compound_indexes: &[],
            fields,
        }
    }

    /// Type embedded inside other documents.
    #[must_use]
    pub const fn embedded(path: &'static str, fields: &'static [FieldModel]) -> Self {
        Self {
            path,
            root: None,
            compound_indexes: &[],
            fields,
        }
    }

    #[must_use]
    pub const fn in_collection(mut self, collection: &'static str) -> Self {
        self.root = Some(CollectionRoot {
            collection: Some(collection),
        });
        self
    }

    #[must_use]
    pub const fn with_compound_indexes(mut self, indexes: &'static [CompoundIndexSpec]) -> Self {
        self.compound_indexes = indexes;
        self
    }

    #[must_use]
    pub const fn is_collection_root(&self) -> bool {
        self.root.is_some()
    }

    /// Unqualified type name (last `::` segment of the path).
    #[must_use]
    pub fn simple_name(&self) -> &'static str {
        self.path.rsplit("::").next().unwrap_or(self.path)
    }

    /// Collection this entity is stored in, if it is a collection root.
    /// Falls back to the simple type name with a lower-cased first letter.
    #[must_use]
    pub fn collection(&self) -> Option<Cow<'static, str>> {
        let root = self.root?;

        Some(match explicit(root.collection) {
            Some(collection) => Cow::Borrowed(collection),
            None => Cow::Owned(uncapitalize(self.simple_name())),
        })
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'static FieldModel> {
        self.fields.iter().find(|f| f.name == name)
    }
}

fn uncapitalize(name: &str) -> String {
    let mut chars = name.chars();

    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::field::FieldType;

    static FIELDS: [FieldModel; 1] = [FieldModel::new("zip", FieldType::scalar("String"))];

    #[test]
    fn derived_collection_uncapitalizes_simple_name() {
        let model = EntityModel::document("app::model::PersonRecord", &FIELDS);

        assert_eq!(model.simple_name(), "PersonRecord");
        assert_eq!(model.collection().as_deref(), Some("personRecord"));
    }

    #[test]
    fn explicit_collection_wins_over_derived_name() {
        let model = EntityModel::document("app::Person", &FIELDS).in_collection("people");

        assert_eq!(model.collection().as_deref(), Some("people"));
    }

    #[test]
    fn embedded_entity_has_no_collection() {
        let model = EntityModel::embedded("app::Address", &FIELDS);

        assert!(!model.is_collection_root());
        assert!(model.collection().is_none());
        assert!(model.field("zip").is_some());
    }
}
