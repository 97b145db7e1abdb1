// crates/fmu-rs-loader/src/error.rs

use fmu_rs_md::MdError;
use std::fmt;
use std::io;

/// Errors raised while opening an unpacked FMU.
#[derive(Debug)]
pub enum LoaderError {
    /// Reading `modelDescription.xml` failed.
    Io(io::Error),
    /// The shared library could not be loaded.
    Library(libloading::Error),
    /// A required FMI2 entry point is not exported by the library.
    MissingSymbol(&'static str),
    /// The model description was rejected.
    Description(MdError),
    /// The model description has no `<CoSimulation>` element.
    MissingCoSimulation,
}

impl fmt::Display for LoaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::Library(e) => write!(f, "Failed to load shared library: {}", e),
            Self::MissingSymbol(name) => write!(f, "Missing FMI2 symbol '{}'", name),
            Self::Description(e) => write!(f, "Invalid model description: {}", e),
            Self::MissingCoSimulation => {
                write!(f, "Model description does not declare co-simulation support")
            }
        }
    }
}

impl std::error::Error for LoaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Library(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for LoaderError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<libloading::Error> for LoaderError {
    fn from(e: libloading::Error) -> Self {
        Self::Library(e)
    }
}

impl From<MdError> for LoaderError {
    fn from(e: MdError) -> Self {
        Self::Description(e)
    }
}
