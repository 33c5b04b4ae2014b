//! Storage engine boundary.
//!
//! An [`Engine`] is the black box the typed accessors talk to. It addresses
//! variables and attributes by name, moves whole arrays through sum-typed
//! buffers and reports failures as [`Error::Storage`](crate::Error::Storage).
//! Engines perform no type or length validation on behalf of callers; the
//! dataset layer has already done that by the time a data call arrives.

mod memory;
mod nc;

pub use memory::MemoryEngine;
pub use nc::NetcdfEngine;

use crate::element::{Buffer, BufferMut, ElementType};
use crate::error::Result;
use std::fmt;

/// Entity an attribute is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Owner {
    /// The dataset itself.
    Global,
    /// The named variable.
    Variable(String),
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Owner::Global => f.write_str("<global>"),
            Owner::Variable(name) => f.write_str(name),
        }
    }
}

/// A named, fixed-length dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dimension {
    /// Dimension name.
    pub name: String,
    /// Number of indices along the dimension.
    pub len: usize,
}

/// Metadata of a stored variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableInfo {
    /// Declared element type.
    pub element_type: ElementType,
    /// Dimensions, slowest varying first.
    pub dimensions: Vec<Dimension>,
}

impl VariableInfo {
    /// Total element count (1 for a scalar).
    pub fn len(&self) -> usize {
        self.dimensions.iter().map(|d| d.len).product()
    }

    /// Whether the variable holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Metadata of a stored attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeInfo {
    /// Numeric type, or `None` for text attributes.
    pub element_type: Option<ElementType>,
    /// Number of stored values.
    pub len: usize,
}

/// Operations a storage engine exposes to the accessor layer.
pub trait Engine {
    /// Define a fixed-length dimension.
    fn add_dimension(&mut self, name: &str, len: usize) -> Result<()>;

    /// Length of a dimension.
    fn dimension_len(&self, name: &str) -> Result<usize>;

    /// All dimensions in definition order.
    fn dimensions(&self) -> Result<Vec<Dimension>>;

    /// Define a variable over existing dimensions.
    fn add_variable(&mut self, name: &str, element_type: ElementType, dims: &[&str]) -> Result<()>;

    /// Type and shape of a variable.
    fn inquire_variable(&self, name: &str) -> Result<VariableInfo>;

    /// Names of all variables in definition order.
    fn variable_names(&self) -> Result<Vec<String>>;

    /// Overwrite the whole variable from `data`.
    fn put_variable_array(&mut self, name: &str, data: Buffer<'_>) -> Result<()>;

    /// Read the whole variable into `out`.
    fn get_variable_array(&self, name: &str, out: BufferMut<'_>) -> Result<()>;

    /// Create or replace an attribute, establishing its type and length.
    fn put_attribute(&mut self, owner: &Owner, name: &str, values: Buffer<'_>) -> Result<()>;

    /// Type and length of an existing attribute.
    fn inquire_attribute(&self, owner: &Owner, name: &str) -> Result<AttributeInfo>;

    /// Names of the attributes attached to `owner`.
    fn attribute_names(&self, owner: &Owner) -> Result<Vec<String>>;

    /// Read an attribute into `out`.
    fn get_attribute(&self, owner: &Owner, name: &str, out: BufferMut<'_>) -> Result<()>;

    /// Release the engine's resources.
    fn close(self) -> Result<()>
    where
        Self: Sized;
}
