// crates/fmu-rs/src/variable/mod.rs

mod attributes;
mod binding;
mod descriptor;

pub use attributes::{Causality, Initial, Variability};
pub use binding::{Accessor, ScalarValue, VariableBinding};
pub use descriptor::{ResolvedAttributes, StartRequirement, VariableDescriptor, resolve_attributes};
