//! Typed whole-array accessors.
//!
//! Every accessor validates the caller's buffer against what storage holds
//! before issuing exactly one engine data call. A validation failure returns
//! [`Error::TypeOrLengthMismatch`] and leaves storage untouched.

use super::{Attribute, Dataset, Variable};
use crate::element::{Element, ElementType};
use crate::engine::Engine;
use crate::error::{Error, Result, StoredType};

/// Check a buffer of `buffer_len` elements of `T` against stored metadata.
fn check_data<T: Element>(
    stored_type: StoredType,
    stored_len: usize,
    buffer_len: usize,
) -> Result<()> {
    if stored_type != StoredType::Numeric(T::TYPE) || stored_len != buffer_len {
        return Err(Error::mismatch(stored_type, stored_len, T::TYPE, buffer_len));
    }
    Ok(())
}

fn stored(element_type: Option<ElementType>) -> StoredType {
    element_type.map_or(StoredType::Text, StoredType::Numeric)
}

impl<E: Engine> Dataset<E> {
    /// Overwrite the whole of `var` with `data`.
    ///
    /// `data` must hold exactly `var.len()` elements of the variable's
    /// declared type.
    pub fn write_array<T: Element>(&mut self, var: &Variable, data: &[T]) -> Result<()> {
        self.check_id(var.dataset_id())?;
        check_data::<T>(var.element_type().into(), var.len(), data.len())?;
        tracing::trace!("Writing {} x {} to {}", data.len(), T::TYPE, var.name());
        self.engine_mut()
            .put_variable_array(var.name(), T::buffer(data))
    }

    /// Read the whole of `var` into `buffer`, in row-major order.
    ///
    /// `buffer` must hold exactly `var.len()` elements of the variable's
    /// declared type. A longer buffer is rejected too, so read and write
    /// accept the same buffers; slice it to `var.len()` first if needed.
    pub fn read_array<T: Element>(&self, var: &Variable, buffer: &mut [T]) -> Result<()> {
        self.check_id(var.dataset_id())?;
        check_data::<T>(var.element_type().into(), var.len(), buffer.len())?;
        tracing::trace!("Reading {} x {} from {}", buffer.len(), T::TYPE, var.name());
        self.engine()
            .get_variable_array(var.name(), T::buffer_mut(buffer))
    }

    /// Set the value of `attr`, creating it if needed.
    ///
    /// The stored type and length become those of `values`, replacing
    /// whatever the attribute held before.
    pub fn write_attribute<T: Element>(&mut self, attr: &Attribute, values: &[T]) -> Result<()> {
        self.check_id(attr.dataset_id())?;
        tracing::trace!(
            "Writing attribute {}:{} = {} x {}",
            attr.owner(),
            attr.name(),
            values.len(),
            T::TYPE
        );
        self.engine_mut()
            .put_attribute(attr.owner(), attr.name(), T::buffer(values))
    }

    /// Read the value of `attr` into `buffer`.
    ///
    /// `buffer` must match the attribute's stored type and length.
    pub fn read_attribute<T: Element>(&self, attr: &Attribute, buffer: &mut [T]) -> Result<()> {
        let info = self.attribute_info(attr)?;
        check_data::<T>(stored(info.element_type), info.len, buffer.len())?;
        tracing::trace!(
            "Reading attribute {}:{} ({} x {})",
            attr.owner(),
            attr.name(),
            buffer.len(),
            T::TYPE
        );
        self.engine()
            .get_attribute(attr.owner(), attr.name(), T::buffer_mut(buffer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Buffer, BufferMut};
    use crate::engine::{AttributeInfo, Dimension, MemoryEngine, Owner, VariableInfo};
    use crate::status::Status;
    use std::cell::Cell;

    /// Counts data calls reaching the wrapped engine.
    #[derive(Debug, Default)]
    struct Counting {
        inner: MemoryEngine,
        data_calls: Cell<usize>,
    }

    impl Counting {
        fn hit(&self) {
            self.data_calls.set(self.data_calls.get() + 1);
        }
    }

    impl Engine for Counting {
        fn add_dimension(&mut self, name: &str, len: usize) -> Result<()> {
            self.inner.add_dimension(name, len)
        }
        fn dimension_len(&self, name: &str) -> Result<usize> {
            self.inner.dimension_len(name)
        }
        fn dimensions(&self) -> Result<Vec<Dimension>> {
            self.inner.dimensions()
        }
        fn add_variable(&mut self, name: &str, ty: ElementType, dims: &[&str]) -> Result<()> {
            self.inner.add_variable(name, ty, dims)
        }
        fn inquire_variable(&self, name: &str) -> Result<VariableInfo> {
            self.inner.inquire_variable(name)
        }
        fn variable_names(&self) -> Result<Vec<String>> {
            self.inner.variable_names()
        }
        fn put_variable_array(&mut self, name: &str, data: Buffer<'_>) -> Result<()> {
            self.hit();
            self.inner.put_variable_array(name, data)
        }
        fn get_variable_array(&self, name: &str, out: BufferMut<'_>) -> Result<()> {
            self.hit();
            self.inner.get_variable_array(name, out)
        }
        fn put_attribute(&mut self, owner: &Owner, name: &str, values: Buffer<'_>) -> Result<()> {
            self.hit();
            self.inner.put_attribute(owner, name, values)
        }
        fn inquire_attribute(&self, owner: &Owner, name: &str) -> Result<AttributeInfo> {
            self.inner.inquire_attribute(owner, name)
        }
        fn attribute_names(&self, owner: &Owner) -> Result<Vec<String>> {
            self.inner.attribute_names(owner)
        }
        fn get_attribute(&self, owner: &Owner, name: &str, out: BufferMut<'_>) -> Result<()> {
            self.hit();
            self.inner.get_attribute(owner, name, out)
        }
        fn close(self) -> Result<()> {
            self.inner.close()
        }
    }

    fn dataset() -> (Dataset<Counting>, Variable) {
        let mut ds = Dataset::with_engine(Counting::default());
        ds.add_dimension("n", 5).unwrap();
        let var = ds.add_variable::<f64>("v", &["n"]).unwrap();
        (ds, var)
    }

    fn calls(ds: &Dataset<Counting>) -> usize {
        ds.engine().data_calls.get()
    }

    #[test]
    fn round_trip_uses_one_call_each_way() {
        let (mut ds, var) = dataset();
        ds.write_array(&var, &[10.0, 11.0, 12.0, 13.0, 14.0]).unwrap();
        let mut out = [0.0; 5];
        ds.read_array(&var, &mut out).unwrap();
        assert_eq!(out, [10.0, 11.0, 12.0, 13.0, 14.0]);
        assert_eq!(calls(&ds), 2);
    }

    #[test]
    fn wrong_length_never_reaches_engine() {
        let (mut ds, var) = dataset();
        let err = ds.write_array(&var, &[1.0, 2.0]).unwrap_err();
        assert!(err.is_mismatch());
        let mut short = [0.0; 3];
        let err = ds.read_array(&var, &mut short).unwrap_err();
        assert!(err.is_mismatch());
        let mut long = [0.0; 6];
        let err = ds.read_array(&var, &mut long).unwrap_err();
        assert!(err.is_mismatch());
        assert_eq!(calls(&ds), 0);
    }

    #[test]
    fn wrong_type_never_reaches_engine() {
        let (mut ds, var) = dataset();
        let err = ds.write_array(&var, &[1i32, 2, 3, 4, 5]).unwrap_err();
        match err {
            Error::TypeOrLengthMismatch {
                stored_type,
                buffer_type,
                ..
            } => {
                assert_eq!(stored_type, StoredType::Numeric(ElementType::F64));
                assert_eq!(buffer_type, ElementType::I32);
            }
            other => panic!("unexpected error: {other}"),
        }
        let mut out = [0f32; 5];
        assert!(ds.read_array(&var, &mut out).unwrap_err().is_mismatch());
        assert_eq!(calls(&ds), 0);
    }

    #[test]
    fn attribute_write_skips_validation() {
        let (mut ds, var) = dataset();
        let attr = var.attribute("valid_range");
        ds.write_attribute(&attr, &[0.0f32, 1.0]).unwrap();
        ds.write_attribute(&attr, &[7i16]).unwrap();
        let mut out = [0i16; 1];
        ds.read_attribute(&attr, &mut out).unwrap();
        assert_eq!(out, [7]);
        assert_eq!(calls(&ds), 3);
    }

    #[test]
    fn attribute_read_validates_before_reading() {
        let (mut ds, _) = dataset();
        let attr = ds.attribute("units");
        ds.write_attribute(&attr, &[1.5f64]).unwrap();

        let mut too_long = [0.0f64; 2];
        assert!(ds.read_attribute(&attr, &mut too_long).unwrap_err().is_mismatch());
        let mut wrong_type = [0.0f32; 1];
        assert!(ds.read_attribute(&attr, &mut wrong_type).unwrap_err().is_mismatch());
        assert_eq!(calls(&ds), 1);
    }

    #[test]
    fn missing_attribute_is_a_storage_error() {
        let (ds, var) = dataset();
        let mut out = [0u8; 1];
        let err = ds.read_attribute(&var.attribute("nope"), &mut out).unwrap_err();
        assert_eq!(err.storage_status(), Some(Status::AttributeNotFound));
    }

    #[test]
    fn check_data_accepts_exact_match_only() {
        assert!(check_data::<u32>(ElementType::U32.into(), 4, 4).is_ok());
        assert!(check_data::<u32>(ElementType::U32.into(), 4, 5).is_err());
        assert!(check_data::<u32>(ElementType::I32.into(), 4, 4).is_err());
        assert!(check_data::<u8>(StoredType::Text, 4, 4).is_err());
    }
}
