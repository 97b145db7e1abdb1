#![cfg_attr(not(feature = "std"), no_std)]

// 'alloc' is used for dynamic allocation (names, start values, closures)
extern crate alloc;

// --- Foundation Modules ---
pub mod types;
pub mod error;
pub mod log;
pub mod units;

// --- Variables ---
pub mod variable;
pub mod registry;

// --- Runtime ---
pub mod lifecycle;
pub mod component;

// --- Top-level Exports ---
pub use component::{Component, DefaultExperiment, ModelInfo, StepModel, TIME_VARIABLE};
pub use error::FmuError;
pub use lifecycle::{Lifecycle, LifecycleEvent, MachineState, is_set_allowed};
pub use crate::log::{InstanceContext, LogCategories, LoggerCallback};
pub use registry::{RegisteredVariable, VariableDefinition, VariableKey, VariableRegistry};
pub use types::{FmuType, Status, Value, ValueReference, ValueType};
pub use units::{UnitCatalog, UnitDefinition, UnitTable};
pub use variable::{Causality, Initial, ScalarValue, Variability, VariableBinding, VariableDescriptor};
