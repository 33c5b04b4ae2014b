//! libnetcdf engine, through the `netcdf` crate.

use super::{AttributeInfo, Dimension, Engine, Owner, VariableInfo};
use crate::element::{with_payload, Buffer, BufferMut, ElementType};
use crate::error::{Error, Result};
use crate::options::{Mode, OpenOptions};
use crate::status::Status;
use netcdf::types::{FloatType, IntType, NcVariableType};
use netcdf::AttributeValue;
use std::fmt;
use std::path::{Path, PathBuf};

enum Handle {
    ReadOnly(netcdf::File),
    Writable(netcdf::FileMut),
}

/// Engine backed by a netCDF file on disk.
pub struct NetcdfEngine {
    handle: Handle,
    path: PathBuf,
}

impl fmt::Debug for NetcdfEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetcdfEngine")
            .field("path", &self.path)
            .field("writable", &matches!(self.handle, Handle::Writable(_)))
            .finish()
    }
}

fn variable_not_found(name: &str) -> Error {
    Error::storage(Status::VariableNotFound, format!("variable '{}' not found", name))
}

fn attribute_not_found(owner: &Owner, name: &str) -> Error {
    Error::storage(
        Status::AttributeNotFound,
        format!("attribute '{}' not found on {}", name, owner),
    )
}

fn element_type_of(vartype: NcVariableType) -> Option<ElementType> {
    match vartype {
        NcVariableType::Int(IntType::I8) => Some(ElementType::I8),
        NcVariableType::Int(IntType::U8) => Some(ElementType::U8),
        NcVariableType::Int(IntType::I16) => Some(ElementType::I16),
        NcVariableType::Int(IntType::U16) => Some(ElementType::U16),
        NcVariableType::Int(IntType::I32) => Some(ElementType::I32),
        NcVariableType::Int(IntType::U32) => Some(ElementType::U32),
        NcVariableType::Int(IntType::I64) => Some(ElementType::I64),
        NcVariableType::Int(IntType::U64) => Some(ElementType::U64),
        NcVariableType::Float(FloatType::F32) => Some(ElementType::F32),
        NcVariableType::Float(FloatType::F64) => Some(ElementType::F64),
        _ => None,
    }
}

fn attribute_value(values: Buffer<'_>) -> AttributeValue {
    match values {
        Buffer::I8(v) => AttributeValue::Schars(v.to_vec()),
        Buffer::U8(v) => AttributeValue::Uchars(v.to_vec()),
        Buffer::I16(v) => AttributeValue::Shorts(v.to_vec()),
        Buffer::U16(v) => AttributeValue::Ushorts(v.to_vec()),
        Buffer::I32(v) => AttributeValue::Ints(v.to_vec()),
        Buffer::U32(v) => AttributeValue::Uints(v.to_vec()),
        Buffer::I64(v) => AttributeValue::Longlongs(v.to_vec()),
        Buffer::U64(v) => AttributeValue::Ulonglongs(v.to_vec()),
        Buffer::F32(v) => AttributeValue::Floats(v.to_vec()),
        Buffer::F64(v) => AttributeValue::Doubles(v.to_vec()),
    }
}

fn attribute_info(value: &AttributeValue) -> AttributeInfo {
    let (element_type, len) = match value {
        AttributeValue::Schar(_) => (Some(ElementType::I8), 1),
        AttributeValue::Schars(v) => (Some(ElementType::I8), v.len()),
        AttributeValue::Uchar(_) => (Some(ElementType::U8), 1),
        AttributeValue::Uchars(v) => (Some(ElementType::U8), v.len()),
        AttributeValue::Short(_) => (Some(ElementType::I16), 1),
        AttributeValue::Shorts(v) => (Some(ElementType::I16), v.len()),
        AttributeValue::Ushort(_) => (Some(ElementType::U16), 1),
        AttributeValue::Ushorts(v) => (Some(ElementType::U16), v.len()),
        AttributeValue::Int(_) => (Some(ElementType::I32), 1),
        AttributeValue::Ints(v) => (Some(ElementType::I32), v.len()),
        AttributeValue::Uint(_) => (Some(ElementType::U32), 1),
        AttributeValue::Uints(v) => (Some(ElementType::U32), v.len()),
        AttributeValue::Longlong(_) => (Some(ElementType::I64), 1),
        AttributeValue::Longlongs(v) => (Some(ElementType::I64), v.len()),
        AttributeValue::Ulonglong(_) => (Some(ElementType::U64), 1),
        AttributeValue::Ulonglongs(v) => (Some(ElementType::U64), v.len()),
        AttributeValue::Float(_) => (Some(ElementType::F32), 1),
        AttributeValue::Floats(v) => (Some(ElementType::F32), v.len()),
        AttributeValue::Double(_) => (Some(ElementType::F64), 1),
        AttributeValue::Doubles(v) => (Some(ElementType::F64), v.len()),
        AttributeValue::Str(s) => (None, s.len()),
        AttributeValue::Strs(v) => (None, v.len()),
    };
    AttributeInfo { element_type, len }
}

fn copy_values<T: Copy>(out: &mut [T], values: Vec<T>) -> Result<()> {
    if out.len() != values.len() {
        return Err(Error::storage(
            Status::EdgeOutOfBounds,
            format!("engine returned {} values for a buffer of {}", values.len(), out.len()),
        ));
    }
    out.copy_from_slice(&values);
    Ok(())
}

fn copy_attribute(value: AttributeValue, out: BufferMut<'_>) -> Result<()> {
    match (value, out) {
        (AttributeValue::Schar(v), BufferMut::I8(out)) => copy_values(out, vec![v]),
        (AttributeValue::Schars(v), BufferMut::I8(out)) => copy_values(out, v),
        (AttributeValue::Uchar(v), BufferMut::U8(out)) => copy_values(out, vec![v]),
        (AttributeValue::Uchars(v), BufferMut::U8(out)) => copy_values(out, v),
        (AttributeValue::Short(v), BufferMut::I16(out)) => copy_values(out, vec![v]),
        (AttributeValue::Shorts(v), BufferMut::I16(out)) => copy_values(out, v),
        (AttributeValue::Ushort(v), BufferMut::U16(out)) => copy_values(out, vec![v]),
        (AttributeValue::Ushorts(v), BufferMut::U16(out)) => copy_values(out, v),
        (AttributeValue::Int(v), BufferMut::I32(out)) => copy_values(out, vec![v]),
        (AttributeValue::Ints(v), BufferMut::I32(out)) => copy_values(out, v),
        (AttributeValue::Uint(v), BufferMut::U32(out)) => copy_values(out, vec![v]),
        (AttributeValue::Uints(v), BufferMut::U32(out)) => copy_values(out, v),
        (AttributeValue::Longlong(v), BufferMut::I64(out)) => copy_values(out, vec![v]),
        (AttributeValue::Longlongs(v), BufferMut::I64(out)) => copy_values(out, v),
        (AttributeValue::Ulonglong(v), BufferMut::U64(out)) => copy_values(out, vec![v]),
        (AttributeValue::Ulonglongs(v), BufferMut::U64(out)) => copy_values(out, v),
        (AttributeValue::Float(v), BufferMut::F32(out)) => copy_values(out, vec![v]),
        (AttributeValue::Floats(v), BufferMut::F32(out)) => copy_values(out, v),
        (AttributeValue::Double(v), BufferMut::F64(out)) => copy_values(out, vec![v]),
        (AttributeValue::Doubles(v), BufferMut::F64(out)) => copy_values(out, v),
        _ => Err(Error::status(Status::BadType)),
    }
}

impl NetcdfEngine {
    /// Open or create the file at `path`.
    pub fn open_with(path: &Path, options: &OpenOptions) -> Result<Self> {
        let handle = match options.mode {
            Mode::Read => Handle::ReadOnly(netcdf::open(path)?),
            Mode::Append => Handle::Writable(netcdf::append(path)?),
            Mode::Create => {
                Handle::Writable(netcdf::create_with(path, options.netcdf_options())?)
            }
        };
        tracing::debug!(
            "Opened netCDF file {} ({:?}, {:?})",
            path.display(),
            options.mode,
            options.format
        );
        Ok(Self {
            handle,
            path: path.to_path_buf(),
        })
    }

    /// Path the engine was opened with.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn file(&self) -> &netcdf::File {
        match &self.handle {
            Handle::ReadOnly(file) => file,
            Handle::Writable(file) => file,
        }
    }

    fn file_mut(&mut self) -> Result<&mut netcdf::FileMut> {
        match &mut self.handle {
            Handle::Writable(file) => Ok(file),
            Handle::ReadOnly(_) => Err(Error::storage(
                Status::Permission,
                format!("{} is open read-only", self.path.display()),
            )),
        }
    }

    fn attribute_value_of(&self, owner: &Owner, name: &str) -> Result<AttributeValue> {
        match owner {
            Owner::Global => {
                let attr = self
                    .file()
                    .attribute(name)
                    .ok_or_else(|| attribute_not_found(owner, name))?;
                Ok(attr.value()?)
            }
            Owner::Variable(var_name) => {
                let var = self
                    .file()
                    .variable(var_name)
                    .ok_or_else(|| variable_not_found(var_name))?;
                let attr = var
                    .attribute(name)
                    .ok_or_else(|| attribute_not_found(owner, name))?;
                Ok(attr.value()?)
            }
        }
    }
}

impl Engine for NetcdfEngine {
    fn add_dimension(&mut self, name: &str, len: usize) -> Result<()> {
        self.file_mut()?.add_dimension(name, len)?;
        Ok(())
    }

    fn dimension_len(&self, name: &str) -> Result<usize> {
        self.file()
            .dimensions()
            .find(|d| d.name() == name)
            .map(|d| d.len())
            .ok_or_else(|| {
                Error::storage(Status::BadDimension, format!("dimension '{}' not found", name))
            })
    }

    fn dimensions(&self) -> Result<Vec<Dimension>> {
        Ok(self
            .file()
            .dimensions()
            .map(|d| Dimension {
                name: d.name().to_string(),
                len: d.len(),
            })
            .collect())
    }

    fn add_variable(&mut self, name: &str, element_type: ElementType, dims: &[&str]) -> Result<()> {
        let file = self.file_mut()?;
        match element_type {
            ElementType::I8 => {
                file.add_variable::<i8>(name, dims)?;
            }
            ElementType::U8 => {
                file.add_variable::<u8>(name, dims)?;
            }
            ElementType::I16 => {
                file.add_variable::<i16>(name, dims)?;
            }
            ElementType::U16 => {
                file.add_variable::<u16>(name, dims)?;
            }
            ElementType::I32 => {
                file.add_variable::<i32>(name, dims)?;
            }
            ElementType::U32 => {
                file.add_variable::<u32>(name, dims)?;
            }
            ElementType::I64 => {
                file.add_variable::<i64>(name, dims)?;
            }
            ElementType::U64 => {
                file.add_variable::<u64>(name, dims)?;
            }
            ElementType::F32 => {
                file.add_variable::<f32>(name, dims)?;
            }
            ElementType::F64 => {
                file.add_variable::<f64>(name, dims)?;
            }
        }
        Ok(())
    }

    fn inquire_variable(&self, name: &str) -> Result<VariableInfo> {
        let var = self
            .file()
            .variable(name)
            .ok_or_else(|| variable_not_found(name))?;
        let element_type = element_type_of(var.vartype()).ok_or_else(|| {
            Error::storage(
                Status::BadType,
                format!("variable '{}' has non-numeric type {:?}", name, var.vartype()),
            )
        })?;
        let dimensions = var
            .dimensions()
            .iter()
            .map(|d: &netcdf::Dimension<'_>| Dimension {
                name: d.name().to_string(),
                len: d.len(),
            })
            .collect();
        Ok(VariableInfo {
            element_type,
            dimensions,
        })
    }

    fn variable_names(&self) -> Result<Vec<String>> {
        Ok(self
            .file()
            .variables()
            .map(|v| v.name().to_string())
            .collect())
    }

    fn put_variable_array(&mut self, name: &str, data: Buffer<'_>) -> Result<()> {
        let file = self.file_mut()?;
        let mut var = file
            .variable_mut(name)
            .ok_or_else(|| variable_not_found(name))?;
        with_payload!(data, Buffer, |values| var.put_values(values, ..)?);
        Ok(())
    }

    fn get_variable_array(&self, name: &str, out: BufferMut<'_>) -> Result<()> {
        let var = self
            .file()
            .variable(name)
            .ok_or_else(|| variable_not_found(name))?;
        with_payload!(out, BufferMut, |out| var.get_values_into(out, ..)?);
        Ok(())
    }

    fn put_attribute(&mut self, owner: &Owner, name: &str, values: Buffer<'_>) -> Result<()> {
        let value = attribute_value(values);
        let file = self.file_mut()?;
        match owner {
            Owner::Global => {
                file.add_attribute(name, value)?;
            }
            Owner::Variable(var_name) => {
                let mut var = file
                    .variable_mut(var_name)
                    .ok_or_else(|| variable_not_found(var_name))?;
                var.put_attribute(name, value)?;
            }
        }
        Ok(())
    }

    fn inquire_attribute(&self, owner: &Owner, name: &str) -> Result<AttributeInfo> {
        Ok(attribute_info(&self.attribute_value_of(owner, name)?))
    }

    fn attribute_names(&self, owner: &Owner) -> Result<Vec<String>> {
        match owner {
            Owner::Global => Ok(self
                .file()
                .attributes()
                .map(|a| a.name().to_string())
                .collect()),
            Owner::Variable(var_name) => {
                let var = self
                    .file()
                    .variable(var_name)
                    .ok_or_else(|| variable_not_found(var_name))?;
                let names = var.attributes().map(|a| a.name().to_string()).collect();
                Ok(names)
            }
        }
    }

    fn get_attribute(&self, owner: &Owner, name: &str, out: BufferMut<'_>) -> Result<()> {
        copy_attribute(self.attribute_value_of(owner, name)?, out)
    }

    fn close(self) -> Result<()> {
        tracing::debug!("Closing netCDF file {}", self.path.display());
        // libnetcdf flushes and releases the file id when the handle drops
        drop(self.handle);
        Ok(())
    }
}
