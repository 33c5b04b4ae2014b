//! Whole-array reads into freshly allocated buffers.

use super::{Attribute, Dataset, Variable};
use crate::element::Element;
use crate::engine::Engine;
use crate::error::{Error, Result};
use ndarray::{ArrayD, IxDyn};

/// A source of a fixed-length sequence of `T`.
pub trait ArrayRead<T: Element> {
    /// Current number of elements.
    fn len(&self) -> Result<usize>;

    /// Read every element into `buffer`, which holds exactly `len()` elements.
    fn read(&self, buffer: &mut [T]) -> Result<()>;
}

/// Read everything `reader` holds into a new `Vec`.
///
/// Queries the length, allocates exactly that many elements and reads into
/// them. If the length query fails the read is not attempted.
pub fn get_array<T, R>(reader: &R) -> Result<Vec<T>>
where
    T: Element,
    R: ArrayRead<T> + ?Sized,
{
    let len = reader.len()?;
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|source| Error::Allocation { len, source })?;
    data.resize(len, T::default());
    reader.read(&mut data)?;
    Ok(data)
}

/// A variable bound to the dataset it lives in.
#[derive(Debug)]
pub struct VariableView<'d, E: Engine> {
    dataset: &'d Dataset<E>,
    variable: &'d Variable,
}

impl<E: Engine, T: Element> ArrayRead<T> for VariableView<'_, E> {
    fn len(&self) -> Result<usize> {
        self.dataset.check_id(self.variable.dataset_id())?;
        Ok(self.variable.len())
    }

    fn read(&self, buffer: &mut [T]) -> Result<()> {
        self.dataset.read_array(self.variable, buffer)
    }
}

/// An attribute bound to the dataset it lives in.
#[derive(Debug)]
pub struct AttributeView<'d, E: Engine> {
    dataset: &'d Dataset<E>,
    attribute: &'d Attribute,
}

impl<E: Engine, T: Element> ArrayRead<T> for AttributeView<'_, E> {
    fn len(&self) -> Result<usize> {
        self.dataset.attribute_len(self.attribute)
    }

    fn read(&self, buffer: &mut [T]) -> Result<()> {
        self.dataset.read_attribute(self.attribute, buffer)
    }
}

impl<E: Engine> Dataset<E> {
    /// Bind `var` to this dataset for use with [`get_array`].
    pub fn view<'d>(&'d self, var: &'d Variable) -> VariableView<'d, E> {
        VariableView {
            dataset: self,
            variable: var,
        }
    }

    /// Bind `attr` to this dataset for use with [`get_array`].
    pub fn attribute_view<'d>(&'d self, attr: &'d Attribute) -> AttributeView<'d, E> {
        AttributeView {
            dataset: self,
            attribute: attr,
        }
    }

    /// Read the whole of `var` into a new `Vec`.
    pub fn get_array<T: Element>(&self, var: &Variable) -> Result<Vec<T>> {
        get_array(&self.view(var))
    }

    /// Read the whole value of `attr` into a new `Vec`.
    pub fn get_attribute<T: Element>(&self, attr: &Attribute) -> Result<Vec<T>> {
        get_array(&self.attribute_view(attr))
    }

    /// Read the whole of `var` into an array shaped like the variable.
    pub fn read_ndarray<T: Element>(&self, var: &Variable) -> Result<ArrayD<T>> {
        let data = self.get_array(var)?;
        Ok(ArrayD::from_shape_vec(IxDyn(&var.shape()), data)?)
    }
}
