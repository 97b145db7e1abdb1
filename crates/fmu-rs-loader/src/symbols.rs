// crates/fmu-rs-loader/src/symbols.rs

use crate::error::LoaderError;
use log::{debug, trace};
use std::collections::BTreeMap;
use std::ffi::c_void;

/// Every entry point an FMI 2.0 co-simulation library must export.
pub const FMI2_SYMBOLS: [&str; 34] = [
    "fmi2GetTypesPlatform",
    "fmi2GetVersion",
    "fmi2SetDebugLogging",
    "fmi2Instantiate",
    "fmi2FreeInstance",
    "fmi2SetupExperiment",
    "fmi2EnterInitializationMode",
    "fmi2ExitInitializationMode",
    "fmi2Terminate",
    "fmi2Reset",
    "fmi2GetReal",
    "fmi2GetInteger",
    "fmi2GetBoolean",
    "fmi2GetString",
    "fmi2SetReal",
    "fmi2SetInteger",
    "fmi2SetBoolean",
    "fmi2SetString",
    "fmi2GetFMUstate",
    "fmi2SetFMUstate",
    "fmi2FreeFMUstate",
    "fmi2SerializedFMUstateSize",
    "fmi2SerializeFMUstate",
    "fmi2DeSerializeFMUstate",
    "fmi2GetDirectionalDerivative",
    "fmi2SetRealInputDerivatives",
    "fmi2GetRealOutputDerivatives",
    "fmi2DoStep",
    "fmi2CancelStep",
    "fmi2GetStatus",
    "fmi2GetRealStatus",
    "fmi2GetIntegerStatus",
    "fmi2GetBooleanStatus",
    "fmi2GetStringStatus",
];

/// The ModelExchange-only entry points. Not required of a co-simulation
/// library, and never resolved by [`Fmi2Symbols::resolve_all`].
pub const FMI2_MODEL_EXCHANGE_SYMBOLS: [&str; 10] = [
    "fmi2EnterEventMode",
    "fmi2NewDiscreteStates",
    "fmi2EnterContinuousTimeMode",
    "fmi2CompletedIntegratorStep",
    "fmi2SetTime",
    "fmi2SetContinuousStates",
    "fmi2GetDerivatives",
    "fmi2GetEventIndicators",
    "fmi2GetContinuousStates",
    "fmi2GetNominalsOfContinuousStates",
];

/// Looks up exported symbols by name.
///
/// Implemented for loaded shared libraries; tests substitute a table.
pub trait SymbolResolver {
    /// Returns the address of `name`, or `None` if it is not exported.
    fn resolve(&self, name: &str) -> Option<*const c_void>;
}

/// A shared library opened with `libloading`.
pub struct SharedLibrary {
    library: libloading::Library,
}

impl SharedLibrary {
    /// Loads the library at `path`.
    ///
    /// # Safety
    /// Loading runs the library's initialisation routines, which may do
    /// anything. The caller must trust the library.
    pub unsafe fn open(path: &std::path::Path) -> Result<Self, LoaderError> {
        debug!("Loading shared library {}", path.display());
        let library = unsafe { libloading::Library::new(path) }?;
        Ok(Self { library })
    }
}

impl SymbolResolver for SharedLibrary {
    fn resolve(&self, name: &str) -> Option<*const c_void> {
        // The symbol is only looked up, never called here, so the pointer type
        // does not need to match the real signature.
        let symbol: libloading::Symbol<*const c_void> =
            unsafe { self.library.get(name.as_bytes()) }.ok()?;
        Some(*symbol)
    }
}

/// The resolved FMI2 entry points of one library.
///
/// The addresses stay valid only while the library they came from is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fmi2Symbols {
    table: BTreeMap<&'static str, *const c_void>,
}

impl Fmi2Symbols {
    /// Resolves every name in [`FMI2_SYMBOLS`].
    ///
    /// # Errors
    /// `MissingSymbol` naming the first entry point, in list order, that the
    /// resolver does not know.
    pub fn resolve_all(resolver: &dyn SymbolResolver) -> Result<Self, LoaderError> {
        let mut table = BTreeMap::new();
        for name in FMI2_SYMBOLS {
            let address = resolver
                .resolve(name)
                .ok_or(LoaderError::MissingSymbol(name))?;
            trace!("Resolved {} at {:p}", name, address);
            table.insert(name, address);
        }
        Ok(Self { table })
    }

    /// Address of a resolved entry point.
    pub fn get(&self, name: &str) -> Option<*const c_void> {
        self.table.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    /// Resolves every name except those listed.
    struct TableResolver {
        missing: BTreeSet<&'static str>,
    }

    impl SymbolResolver for TableResolver {
        fn resolve(&self, name: &str) -> Option<*const c_void> {
            if self.missing.contains(name) {
                return None;
            }
            let index = FMI2_SYMBOLS.iter().position(|s| *s == name)?;
            Some((0x1000 + index * 8) as *const c_void)
        }
    }

    #[test]
    fn test_symbol_list_is_unique() {
        let unique: BTreeSet<_> = FMI2_SYMBOLS
            .iter()
            .chain(FMI2_MODEL_EXCHANGE_SYMBOLS.iter())
            .collect();
        assert_eq!(unique.len(), FMI2_SYMBOLS.len() + FMI2_MODEL_EXCHANGE_SYMBOLS.len());
        assert!(FMI2_SYMBOLS.contains(&"fmi2DoStep"));
        assert!(FMI2_SYMBOLS.contains(&"fmi2GetStringStatus"));
    }

    #[test]
    fn test_resolve_all() {
        let resolver = TableResolver {
            missing: BTreeSet::new(),
        };
        let symbols = Fmi2Symbols::resolve_all(&resolver).unwrap();
        assert_eq!(symbols.len(), FMI2_SYMBOLS.len());
        assert_eq!(symbols.get("fmi2GetTypesPlatform"), Some(0x1000 as *const c_void));
        assert!(symbols.get("fmi3DoStep").is_none());
    }

    #[test]
    fn test_first_missing_symbol_is_reported() {
        let resolver = TableResolver {
            missing: ["fmi2CancelStep", "fmi2GetReal"].into_iter().collect(),
        };
        // fmi2GetReal comes first in the list.
        assert!(matches!(
            Fmi2Symbols::resolve_all(&resolver),
            Err(LoaderError::MissingSymbol("fmi2GetReal"))
        ));
    }
}
