use crate::model::index::FieldIndex;
use derive_more::Display;

///
/// Cardinality
///

#[derive(Clone, Copy, Debug, Default, Display, Eq, PartialEq)]
pub enum Cardinality {
    #[default]
    One,
    Opt,
    Many,
}

///
/// FieldType
///
/// Declared type of a property and the element type it unwraps to.
/// `entity` marks element types that are themselves modeled entities and
/// therefore get walked by the resolver.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FieldType {
    pub declared: &'static str,
    pub actual: &'static str,
    pub cardinality: Cardinality,
    pub entity: bool,
}

impl FieldType {
    /// Plain value type, e.g. `String` or `i64`.
    #[must_use]
    pub const fn scalar(ty: &'static str) -> Self {
        Self {
            declared: ty,
            actual: ty,
            cardinality: Cardinality::One,
            entity: false,
        }
    }

    /// Embedded entity held by value.
    #[must_use]
    pub const fn entity(path: &'static str) -> Self {
        Self {
            declared: path,
            actual: path,
            cardinality: Cardinality::One,
            entity: true,
        }
    }

    /// Container type unwrapping to `actual`, e.g. `Vec<Address>`.
    #[must_use]
    pub const fn wrapped(
        declared: &'static str,
        actual: &'static str,
        cardinality: Cardinality,
        entity: bool,
    ) -> Self {
        Self {
            declared,
            actual,
            cardinality,
            entity,
        }
    }
}

///
/// FieldModel
///
/// One persistent property. `name` is the property name; `field_name`
/// overrides the name stored in documents.
///

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldModel {
    pub name: &'static str,
    pub field_name: Option<&'static str>,
    pub ty: FieldType,
    pub index: Option<FieldIndex>,
}

impl FieldModel {
    #[must_use]
    pub const fn new(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            field_name: None,
            ty,
            index: None,
        }
    }

    #[must_use]
    pub const fn stored_as(mut self, field_name: &'static str) -> Self {
        self.field_name = Some(field_name);
        self
    }

    #[must_use]
    pub const fn indexed(mut self, index: FieldIndex) -> Self {
        self.index = Some(index);
        self
    }

    /// Name of the field inside stored documents.
    #[must_use]
    pub fn field_name(&self) -> &'static str {
        match self.field_name {
            Some(name) if has_text(name) => name,
            _ => self.name,
        }
    }

    #[must_use]
    pub const fn actual_type(&self) -> &'static str {
        self.ty.actual
    }

    #[must_use]
    pub const fn is_entity(&self) -> bool {
        self.ty.entity
    }
}

/// Whether a declared string carries any non-whitespace content.
pub(crate) fn has_text(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Explicit declaration value if present and non-blank.
pub(crate) fn explicit(value: Option<&'static str>) -> Option<&'static str> {
    value.filter(|v| has_text(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_name_prefers_non_blank_override() {
        let plain = FieldModel::new("zipCode", FieldType::scalar("String"));
        let renamed = plain.stored_as("zip");
        let blank = plain.stored_as("  ");

        assert_eq!(plain.field_name(), "zipCode");
        assert_eq!(renamed.field_name(), "zip");
        assert_eq!(blank.field_name(), "zipCode");
    }

    #[test]
    fn wrapped_entity_reports_element_type() {
        let field = FieldModel::new(
            "addresses",
            FieldType::wrapped("Vec<Address>", "app::Address", Cardinality::Many, true),
        );

        assert!(field.is_entity());
        assert_eq!(field.actual_type(), "app::Address");
        assert_eq!(field.ty.cardinality, Cardinality::Many);
    }
}
