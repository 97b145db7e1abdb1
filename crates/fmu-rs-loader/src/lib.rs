// crates/fmu-rs-loader/src/lib.rs

//! Opens unpacked FMI 2.0 co-simulation FMUs.
//!
//! The model description is parsed with `fmu-rs-md`; the platform library is
//! loaded with `libloading` and checked for the complete FMI2 entry point set.

mod error;
mod fmu;
mod platform;
mod symbols;

pub use error::LoaderError;
pub use fmu::{ImportedFmu, MODEL_DESCRIPTION_FILE, read_model_description};
pub use platform::{LIBRARY_EXTENSION, PLATFORM_FOLDER, platform_library_path};
pub use symbols::{FMI2_MODEL_EXCHANGE_SYMBOLS, FMI2_SYMBOLS, Fmi2Symbols, SharedLibrary, SymbolResolver};
