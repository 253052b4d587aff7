use crate::{error::IndexError, index::definition::IndexDefinition};
use bson::Document;

///
/// IndexDefinitionHolder
///
/// Dotted path paired with the index definition resolved for it.
/// Resolution always attaches a definition before handing a holder out.
///

#[derive(Clone, Debug, PartialEq)]
pub struct IndexDefinitionHolder {
    path: String,
    definition: Option<IndexDefinition>,
}

impl IndexDefinitionHolder {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            definition: None,
        }
    }

    #[must_use]
    pub fn with_definition(mut self, definition: impl Into<IndexDefinition>) -> Self {
        self.definition = Some(definition.into());
        self
    }

    pub fn set_index_definition(&mut self, definition: impl Into<IndexDefinition>) {
        self.definition = Some(definition.into());
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub const fn index_definition(&self) -> Option<&IndexDefinition> {
        self.definition.as_ref()
    }

    #[must_use]
    pub fn collection(&self) -> Option<&str> {
        self.definition.as_ref().and_then(IndexDefinition::collection)
    }

    pub fn index_keys(&self) -> Result<Document, IndexError> {
        self.definition().map(IndexDefinition::index_keys)
    }

    pub fn index_options(&self) -> Result<Document, IndexError> {
        self.definition().map(IndexDefinition::index_options)
    }

    fn definition(&self) -> Result<&IndexDefinition, IndexError> {
        self.definition.as_ref().ok_or_else(|| IndexError::NullState {
            path: self.path.clone(),
        })
    }
}
