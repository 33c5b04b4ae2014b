//! Dataset handles.

use super::{Attribute, Variable};
use crate::element::{Element, ElementType};
use crate::engine::{AttributeInfo, Dimension, Engine, MemoryEngine, NetcdfEngine, Owner};
use crate::error::{Error, Result};
use crate::options::{Mode, OpenOptions};
use crate::status::Status;
use std::fmt;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier of an open dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DatasetId(u64);

impl DatasetId {
    fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for DatasetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dataset#{}", self.0)
    }
}

/// An open storage container.
///
/// The dataset owns its engine handle. [`Variable`] and [`Attribute`]
/// descriptors obtained from it carry its [`DatasetId`] and are rejected by
/// every other dataset with [`Status::BadId`].
#[derive(Debug)]
pub struct Dataset<E: Engine = NetcdfEngine> {
    id: DatasetId,
    engine: E,
}

impl Dataset<NetcdfEngine> {
    /// Open an existing netCDF file read-only.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(path, &OpenOptions::new(Mode::Read))
    }

    /// Open an existing netCDF file for reading and writing.
    pub fn append(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(path, &OpenOptions::new(Mode::Append))
    }

    /// Create a netCDF-4 file, replacing any existing file.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(path, &OpenOptions::new(Mode::Create))
    }

    /// Open a netCDF file with explicit options.
    pub fn open_with(path: impl AsRef<Path>, options: &OpenOptions) -> Result<Self> {
        let engine = NetcdfEngine::open_with(path.as_ref(), options)?;
        Ok(Self::with_engine(engine))
    }

    /// Path of the underlying file.
    pub fn path(&self) -> &Path {
        self.engine.path()
    }
}

impl Dataset<MemoryEngine> {
    /// A new, empty dataset held in memory.
    pub fn in_memory() -> Self {
        Self::with_engine(MemoryEngine::new())
    }
}

impl<E: Engine> Dataset<E> {
    /// Wrap an already opened engine.
    pub fn with_engine(engine: E) -> Self {
        let id = DatasetId::next();
        tracing::debug!("Opened {}", id);
        Self { id, engine }
    }

    /// Identifier of this dataset.
    pub fn id(&self) -> DatasetId {
        self.id
    }

    /// The engine behind this dataset.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub(crate) fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Fail with [`Status::BadId`] unless `id` names this dataset.
    pub(crate) fn check_id(&self, id: DatasetId) -> Result<()> {
        if id != self.id {
            return Err(Error::storage(
                Status::BadId,
                format!("handle belongs to {}, not {}", id, self.id),
            ));
        }
        Ok(())
    }

    /// Define a fixed-length dimension.
    ///
    /// `len` must be non-zero: libnetcdf treats a zero length as unlimited.
    pub fn add_dimension(&mut self, name: &str, len: usize) -> Result<()> {
        if len == 0 {
            return Err(Error::storage(
                Status::InvalidArgument,
                format!("dimension '{}' must have a non-zero length", name),
            ));
        }
        tracing::debug!("Adding dimension {} = {} to {}", name, len, self.id);
        self.engine.add_dimension(name, len)
    }

    /// Length of the named dimension.
    pub fn dimension_len(&self, name: &str) -> Result<usize> {
        self.engine.dimension_len(name)
    }

    /// All dimensions in definition order.
    pub fn dimensions(&self) -> Result<Vec<Dimension>> {
        self.engine.dimensions()
    }

    /// Define a variable of element type `T` over the named dimensions.
    ///
    /// An empty `dims` defines a scalar.
    pub fn add_variable<T: Element>(&mut self, name: &str, dims: &[&str]) -> Result<Variable> {
        self.add_variable_of(name, T::TYPE, dims)
    }

    /// Define a variable whose element type is only known at runtime.
    pub fn add_variable_of(
        &mut self,
        name: &str,
        element_type: ElementType,
        dims: &[&str],
    ) -> Result<Variable> {
        tracing::debug!(
            "Adding variable {} ({}) over {:?} to {}",
            name,
            element_type,
            dims,
            self.id
        );
        self.engine.add_variable(name, element_type, dims)?;
        self.variable(name)
    }

    /// Look up a variable by name.
    pub fn variable(&self, name: &str) -> Result<Variable> {
        let info = self.engine.inquire_variable(name)?;
        Ok(Variable::new(self.id, name, info))
    }

    /// Every numeric variable in the dataset.
    ///
    /// Variables of other types are skipped.
    pub fn variables(&self) -> Result<Vec<Variable>> {
        let mut variables = Vec::new();
        for name in self.engine.variable_names()? {
            match self.variable(&name) {
                Ok(var) => variables.push(var),
                Err(Error::Storage {
                    status: Status::BadType,
                    ..
                }) => continue,
                Err(err) => return Err(err),
            }
        }
        Ok(variables)
    }

    /// Descriptor for the global attribute `name`.
    ///
    /// No storage call is made; the attribute need not exist yet.
    pub fn attribute(&self, name: impl Into<String>) -> Attribute {
        Attribute::new(self.id, Owner::Global, name)
    }

    /// Every global attribute.
    pub fn attributes(&self) -> Result<Vec<Attribute>> {
        self.attributes_of(&Owner::Global)
    }

    /// Every attribute attached to `var`.
    pub fn variable_attributes(&self, var: &Variable) -> Result<Vec<Attribute>> {
        self.check_id(var.dataset_id())?;
        self.attributes_of(&Owner::Variable(var.name().to_string()))
    }

    fn attributes_of(&self, owner: &Owner) -> Result<Vec<Attribute>> {
        Ok(self
            .engine
            .attribute_names(owner)?
            .into_iter()
            .map(|name| Attribute::new(self.id, owner.clone(), name))
            .collect())
    }

    /// Stored type and length of an attribute.
    pub fn attribute_info(&self, attr: &Attribute) -> Result<AttributeInfo> {
        self.check_id(attr.dataset_id())?;
        self.engine.inquire_attribute(attr.owner(), attr.name())
    }

    /// Stored length of an attribute.
    pub fn attribute_len(&self, attr: &Attribute) -> Result<usize> {
        Ok(self.attribute_info(attr)?.len)
    }

    /// Release the dataset.
    ///
    /// Descriptors obtained from it are invalid afterwards.
    pub fn close(self) -> Result<()> {
        tracing::debug!("Closing {}", self.id);
        self.engine.close()
    }
}
