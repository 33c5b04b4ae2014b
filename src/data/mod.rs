//! Datasets, variables and attributes.
//!
//! This module holds the handle types callers work with and the typed
//! accessors that move whole arrays between storage and caller buffers.

mod accessor;
mod attribute;
mod dataset;
mod reader;
mod variable;

pub use attribute::Attribute;
pub use dataset::{Dataset, DatasetId};
pub use reader::{get_array, ArrayRead, AttributeView, VariableView};
pub use variable::Variable;
