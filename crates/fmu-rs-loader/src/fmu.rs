// crates/fmu-rs-loader/src/fmu.rs

use crate::error::LoaderError;
use crate::platform::platform_library_path;
use crate::symbols::{Fmi2Symbols, SharedLibrary};
use fmu_rs_md::{ImportedModel, load_model_description_from_str};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the model description at the root of an unpacked FMU.
pub const MODEL_DESCRIPTION_FILE: &str = "modelDescription.xml";

/// Reads and parses `dir/modelDescription.xml`.
///
/// # Errors
/// `Io` if the file cannot be read, `Description` if it is rejected.
pub fn read_model_description(dir: &Path) -> Result<ImportedModel, LoaderError> {
    let xml = fs::read_to_string(dir.join(MODEL_DESCRIPTION_FILE))?;
    Ok(load_model_description_from_str(&xml)?)
}

/// An unpacked co-simulation FMU with its library loaded.
pub struct ImportedFmu {
    dir: PathBuf,
    model: ImportedModel,
    // Declared before `library` so the addresses are dropped first.
    symbols: Fmi2Symbols,
    library: SharedLibrary,
}

impl ImportedFmu {
    /// Opens the unpacked FMU in `dir`.
    ///
    /// Parses the model description, loads the platform library named after
    /// the `CoSimulation` model identifier and resolves every FMI2 entry point.
    ///
    /// # Safety
    /// Loading the library runs foreign initialisation code. See
    /// [`SharedLibrary::open`].
    pub unsafe fn open(dir: impl AsRef<Path>) -> Result<Self, LoaderError> {
        let dir = dir.as_ref().to_path_buf();
        let model = read_model_description(&dir)?;
        let identifier = model
            .description
            .co_simulation
            .as_ref()
            .map(|cs| cs.model_identifier.clone())
            .ok_or(LoaderError::MissingCoSimulation)?;
        if identifier.is_empty() {
            warn!("CoSimulation element of {} has an empty modelIdentifier", dir.display());
        }

        let path = platform_library_path(&dir, &identifier);
        let library = unsafe { SharedLibrary::open(&path) }?;
        let symbols = Fmi2Symbols::resolve_all(&library)?;
        info!(
            "Opened FMU '{}' ({} variables) from {}",
            model.description.info.model_name,
            model.description.variables.len(),
            dir.display()
        );
        Ok(Self {
            dir,
            model,
            symbols,
            library,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The parsed model description and its namespace tree.
    pub fn model(&self) -> &ImportedModel {
        &self.model
    }

    pub fn symbols(&self) -> &Fmi2Symbols {
        &self.symbols
    }

    pub fn library(&self) -> &SharedLibrary {
        &self.library
    }
}
