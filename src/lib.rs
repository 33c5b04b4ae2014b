//! ncaccess - typed whole-array access to netCDF variables and attributes.
//!
//! ncaccess moves numeric arrays between caller-owned buffers and a storage
//! engine. The engine (libnetcdf by default) does all of the encoding and file
//! I/O; this crate checks that each buffer fits what storage holds and then
//! hands the whole array over in a single call.
//!
//! # Features
//!
//! - One generic read/write contract for `i8` through `u64`, `f32` and `f64`
//! - Type and length validation before any engine call
//! - Global and per-variable attributes that may be re-typed on overwrite
//! - [`get_array`] for reading anything with a known length into a new `Vec`
//! - An in-memory engine with netCDF status codes for scratch data and tests
//!
//! # Example
//!
//! ```no_run
//! use ncaccess::Dataset;
//!
//! # fn main() -> ncaccess::Result<()> {
//! let mut ds = Dataset::create("out.nc")?;
//! ds.add_dimension("n", 5)?;
//! let var = ds.add_variable::<f64>("v", &["n"])?;
//!
//! ds.write_array(&var, &[10.0, 11.0, 12.0, 13.0, 14.0])?;
//! ds.write_attribute(&var.attribute("units"), &[1.5f64])?;
//!
//! let mut back = [0.0; 5];
//! ds.read_array(&var, &mut back)?;
//! let units: Vec<f64> = ds.get_attribute(&var.attribute("units"))?;
//! ds.close()?;
//! # Ok(())
//! # }
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
#![deny(unsafe_code)]

pub mod data;
pub mod element;
pub mod engine;
pub mod error;
pub mod options;
pub mod status;

pub use data::{
    get_array, ArrayRead, Attribute, AttributeView, Dataset, DatasetId, Variable, VariableView,
};
pub use element::{Element, ElementType};
pub use engine::{AttributeInfo, Dimension, Engine, MemoryEngine, NetcdfEngine, Owner, VariableInfo};
pub use error::{Error, Result, StoredType};
pub use options::{Format, Mode, OpenOptions};
pub use status::Status;
