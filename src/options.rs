//! Options controlling how a dataset is opened.

/// Access mode for a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Open an existing file read-only.
    #[default]
    Read,
    /// Open an existing file for reading and writing.
    Append,
    /// Create a new file.
    Create,
}

/// On-disk format used when creating a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// netCDF-4 (HDF5 based). Supports every element type.
    #[default]
    Netcdf4,
    /// Classic netCDF-3. Unsigned and 64-bit integer types are rejected by
    /// the engine.
    Classic,
}

/// Open configuration for a netCDF dataset.
#[derive(Debug, Clone)]
pub struct OpenOptions {
    /// Access mode.
    pub mode: Mode,
    /// Format for newly created files. Ignored unless `mode` is [`Mode::Create`].
    pub format: Format,
    /// Overwrite an existing file on create.
    pub clobber: bool,
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self {
            mode: Mode::Read,
            format: Format::Netcdf4,
            clobber: true,
        }
    }
}

impl OpenOptions {
    /// Options for the given mode, other fields defaulted.
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Set the format used on create.
    pub fn format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Set whether create may overwrite an existing file.
    pub fn clobber(mut self, clobber: bool) -> Self {
        self.clobber = clobber;
        self
    }

    /// Whether datasets opened with these options accept writes.
    pub fn is_writable(&self) -> bool {
        self.mode != Mode::Read
    }

    pub(crate) fn netcdf_options(&self) -> netcdf::Options {
        let mut options = match self.format {
            Format::Netcdf4 => netcdf::Options::NETCDF4,
            Format::Classic => netcdf::Options::default(),
        };
        if !self.clobber {
            options |= netcdf::Options::NOCLOBBER;
        }
        options
    }
}
