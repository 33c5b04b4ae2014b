//! In-process engine.
//!
//! Keeps every dimension, variable and attribute in memory and answers with
//! the same status codes libnetcdf uses, so code written against it behaves
//! the same when pointed at a real file.

use super::{AttributeInfo, Dimension, Engine, Owner, VariableInfo};
use crate::element::{Buffer, BufferMut, ElementType, Values};
use crate::error::{Error, Result};
use crate::status::Status;

#[derive(Debug, Clone)]
struct StoredVariable {
    name: String,
    dims: Vec<String>,
    values: Values,
    attributes: Vec<(String, Values)>,
}

/// Engine backed by process memory.
#[derive(Debug, Default)]
pub struct MemoryEngine {
    dimensions: Vec<Dimension>,
    variables: Vec<StoredVariable>,
    globals: Vec<(String, Values)>,
    read_only: bool,
}

fn check_name(name: &str) -> Result<()> {
    if name.is_empty() || name.contains('/') || name.contains('\0') {
        return Err(Error::status(Status::BadName));
    }
    Ok(())
}

fn find_attribute<'a>(attributes: &'a [(String, Values)], name: &str) -> Result<&'a Values> {
    attributes
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v)
        .ok_or_else(|| {
            Error::storage(
                Status::AttributeNotFound,
                format!("attribute '{}' not found", name),
            )
        })
}

impl MemoryEngine {
    /// An empty, writable engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject (or accept again) every mutating call with [`Status::Permission`].
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    fn check_writable(&self) -> Result<()> {
        if self.read_only {
            return Err(Error::status(Status::Permission));
        }
        Ok(())
    }

    fn variable(&self, name: &str) -> Result<&StoredVariable> {
        self.variables
            .iter()
            .find(|v| v.name == name)
            .ok_or_else(|| {
                Error::storage(
                    Status::VariableNotFound,
                    format!("variable '{}' not found", name),
                )
            })
    }

    fn variable_mut(&mut self, name: &str) -> Result<&mut StoredVariable> {
        self.variables
            .iter_mut()
            .find(|v| v.name == name)
            .ok_or_else(|| {
                Error::storage(
                    Status::VariableNotFound,
                    format!("variable '{}' not found", name),
                )
            })
    }

    fn attributes(&self, owner: &Owner) -> Result<&Vec<(String, Values)>> {
        match owner {
            Owner::Global => Ok(&self.globals),
            Owner::Variable(var) => Ok(&self.variable(var)?.attributes),
        }
    }

    fn attributes_mut(&mut self, owner: &Owner) -> Result<&mut Vec<(String, Values)>> {
        match owner {
            Owner::Global => Ok(&mut self.globals),
            Owner::Variable(var) => Ok(&mut self.variable_mut(var)?.attributes),
        }
    }
}

impl Engine for MemoryEngine {
    fn add_dimension(&mut self, name: &str, len: usize) -> Result<()> {
        self.check_writable()?;
        check_name(name)?;
        if self.dimensions.iter().any(|d| d.name == name) {
            return Err(Error::status(Status::NameInUse));
        }
        self.dimensions.push(Dimension {
            name: name.to_string(),
            len,
        });
        Ok(())
    }

    fn dimension_len(&self, name: &str) -> Result<usize> {
        self.dimensions
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.len)
            .ok_or_else(|| {
                Error::storage(
                    Status::BadDimension,
                    format!("dimension '{}' not found", name),
                )
            })
    }

    fn dimensions(&self) -> Result<Vec<Dimension>> {
        Ok(self.dimensions.clone())
    }

    fn add_variable(&mut self, name: &str, element_type: ElementType, dims: &[&str]) -> Result<()> {
        self.check_writable()?;
        check_name(name)?;
        if self.variables.iter().any(|v| v.name == name) {
            return Err(Error::status(Status::NameInUse));
        }
        let mut len = 1usize;
        for dim in dims {
            len *= self.dimension_len(dim)?;
        }
        self.variables.push(StoredVariable {
            name: name.to_string(),
            dims: dims.iter().map(|d| d.to_string()).collect(),
            values: Values::zeroed(element_type, len),
            attributes: Vec::new(),
        });
        Ok(())
    }

    fn inquire_variable(&self, name: &str) -> Result<VariableInfo> {
        let var = self.variable(name)?;
        let dimensions = var
            .dims
            .iter()
            .map(|d| {
                Ok(Dimension {
                    name: d.clone(),
                    len: self.dimension_len(d)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(VariableInfo {
            element_type: var.values.element_type(),
            dimensions,
        })
    }

    fn variable_names(&self) -> Result<Vec<String>> {
        Ok(self.variables.iter().map(|v| v.name.clone()).collect())
    }

    fn put_variable_array(&mut self, name: &str, data: Buffer<'_>) -> Result<()> {
        self.check_writable()?;
        let var = self.variable_mut(name)?;
        if var.values.element_type() != data.element_type() {
            return Err(Error::status(Status::BadType));
        }
        if var.values.len() != data.len() {
            return Err(Error::status(Status::EdgeOutOfBounds));
        }
        var.values = data.to_values();
        Ok(())
    }

    fn get_variable_array(&self, name: &str, out: BufferMut<'_>) -> Result<()> {
        self.variable(name)?
            .values
            .copy_into(out)
            .map_err(Error::status)
    }

    fn put_attribute(&mut self, owner: &Owner, name: &str, values: Buffer<'_>) -> Result<()> {
        self.check_writable()?;
        check_name(name)?;
        let attributes = self.attributes_mut(owner)?;
        let values = values.to_values();
        match attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, stored)) => *stored = values,
            None => attributes.push((name.to_string(), values)),
        }
        Ok(())
    }

    fn inquire_attribute(&self, owner: &Owner, name: &str) -> Result<AttributeInfo> {
        let values = find_attribute(self.attributes(owner)?, name)?;
        Ok(AttributeInfo {
            element_type: Some(values.element_type()),
            len: values.len(),
        })
    }

    fn attribute_names(&self, owner: &Owner) -> Result<Vec<String>> {
        Ok(self.attributes(owner)?.iter().map(|(n, _)| n.clone()).collect())
    }

    fn get_attribute(&self, owner: &Owner, name: &str, out: BufferMut<'_>) -> Result<()> {
        find_attribute(self.attributes(owner)?, name)?
            .copy_into(out)
            .map_err(Error::status)
    }

    fn close(self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Element;

    fn engine() -> MemoryEngine {
        let mut engine = MemoryEngine::new();
        engine.add_dimension("x", 2).unwrap();
        engine.add_dimension("y", 3).unwrap();
        engine.add_variable("grid", ElementType::I16, &["x", "y"]).unwrap();
        engine
    }

    #[test]
    fn new_variable_is_zero_filled() {
        let engine = engine();
        let info = engine.inquire_variable("grid").unwrap();
        assert_eq!(info.element_type, ElementType::I16);
        assert_eq!(info.len(), 6);

        let mut out = [1i16; 6];
        engine.get_variable_array("grid", i16::buffer_mut(&mut out)).unwrap();
        assert_eq!(out, [0; 6]);
    }

    #[test]
    fn unknown_names_use_netcdf_statuses() {
        let mut engine = engine();
        let err = engine.inquire_variable("nope").unwrap_err();
        assert_eq!(err.storage_status(), Some(Status::VariableNotFound));

        let err = engine.add_variable("v", ElementType::F32, &["z"]).unwrap_err();
        assert_eq!(err.storage_status(), Some(Status::BadDimension));

        let err = engine.inquire_attribute(&Owner::Global, "title").unwrap_err();
        assert_eq!(err.storage_status(), Some(Status::AttributeNotFound));

        let err = engine.add_dimension("x", 1).unwrap_err();
        assert_eq!(err.storage_status(), Some(Status::NameInUse));

        let err = engine.add_dimension("", 1).unwrap_err();
        assert_eq!(err.storage_status(), Some(Status::BadName));
    }

    #[test]
    fn attributes_may_change_type() {
        let mut engine = engine();
        let owner = Owner::Variable("grid".to_string());
        engine.put_attribute(&owner, "scale", f32::buffer(&[0.5])).unwrap();
        engine.put_attribute(&owner, "scale", u8::buffer(&[1, 2, 3])).unwrap();

        let info = engine.inquire_attribute(&owner, "scale").unwrap();
        assert_eq!(info.element_type, Some(ElementType::U8));
        assert_eq!(info.len, 3);
        assert_eq!(engine.attribute_names(&owner).unwrap(), vec!["scale".to_string()]);
    }

    #[test]
    fn read_only_rejects_writes() {
        let mut engine = engine();
        engine.set_read_only(true);
        let err = engine
            .put_variable_array("grid", i16::buffer(&[0; 6]))
            .unwrap_err();
        assert_eq!(err.storage_status(), Some(Status::Permission));
        let err = engine
            .put_attribute(&Owner::Global, "title", u8::buffer(&[1]))
            .unwrap_err();
        assert_eq!(err.storage_status(), Some(Status::Permission));
    }
}
