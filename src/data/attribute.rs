//! Attribute descriptors.

use super::DatasetId;
use crate::engine::Owner;

/// A named auxiliary value attached to a dataset or a variable.
///
/// Unlike a [`Variable`](super::Variable), an attribute has no fixed type or
/// length: the first write establishes them and later writes may change them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Attribute {
    dataset: DatasetId,
    owner: Owner,
    name: String,
}

impl Attribute {
    pub(crate) fn new(dataset: DatasetId, owner: Owner, name: impl Into<String>) -> Self {
        Self {
            dataset,
            owner,
            name: name.into(),
        }
    }

    /// Id of the dataset this attribute belongs to.
    pub fn dataset_id(&self) -> DatasetId {
        self.dataset
    }

    /// Entity the attribute is attached to.
    pub fn owner(&self) -> &Owner {
        &self.owner
    }

    /// Attribute name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this is a dataset-level attribute.
    pub fn is_global(&self) -> bool {
        self.owner == Owner::Global
    }
}
