//! Variable descriptors.

use super::{Attribute, DatasetId};
use crate::element::ElementType;
use crate::engine::{Dimension, Owner, VariableInfo};

/// A named, typed array inside a [`Dataset`](super::Dataset).
///
/// A `Variable` is a descriptor: it records where the array lives and what it
/// holds, but never owns the data. It stays valid only for the dataset it was
/// obtained from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    dataset: DatasetId,
    name: String,
    info: VariableInfo,
}

impl Variable {
    pub(crate) fn new(dataset: DatasetId, name: impl Into<String>, info: VariableInfo) -> Self {
        Self {
            dataset,
            name: name.into(),
            info,
        }
    }

    /// Id of the dataset this variable belongs to.
    pub fn dataset_id(&self) -> DatasetId {
        self.dataset
    }

    /// Variable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared element type.
    pub fn element_type(&self) -> ElementType {
        self.info.element_type
    }

    /// Dimensions, slowest varying first.
    pub fn dimensions(&self) -> &[Dimension] {
        &self.info.dimensions
    }

    /// Length along each dimension.
    pub fn shape(&self) -> Vec<usize> {
        self.info.dimensions.iter().map(|d| d.len).collect()
    }

    /// Number of dimensions (0 for a scalar).
    pub fn ndim(&self) -> usize {
        self.info.dimensions.len()
    }

    /// Total element count.
    pub fn len(&self) -> usize {
        self.info.len()
    }

    /// Whether the variable holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Descriptor for the attribute `name` of this variable.
    ///
    /// No storage call is made; the attribute need not exist yet.
    pub fn attribute(&self, name: impl Into<String>) -> Attribute {
        Attribute::new(self.dataset, Owner::Variable(self.name.clone()), name)
    }
}
