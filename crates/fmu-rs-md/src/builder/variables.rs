// crates/fmu-rs-md/src/builder/variables.rs

use crate::model::{ScalarVariable, TypeElement};
use alloc::string::ToString;
use fmu_rs::types::DEFAULT_UNIT;
use fmu_rs::{Causality, Initial, ValueType, Variability, VariableDescriptor};

/// Converts a descriptor into a `<ScalarVariable>`, omitting default
/// causality, variability and initial.
pub(super) fn build_scalar_variable(variable: &VariableDescriptor) -> ScalarVariable {
    let element = TypeElement {
        declared_type: None,
        unit: (variable.value_type() == ValueType::Real && variable.unit() != DEFAULT_UNIT)
            .then(|| variable.unit().to_string()),
        start: variable.start().map(|v| v.to_xml_string()),
    };

    let mut sv = ScalarVariable {
        name: Some(variable.name().to_string()),
        value_reference: Some(variable.value_reference().to_string()),
        description: (!variable.description().is_empty()).then(|| variable.description().to_string()),
        causality: (variable.causality() != Causality::default()).then(|| variable.causality().to_string()),
        variability: (variable.variability() != Variability::default())
            .then(|| variable.variability().to_string()),
        initial: (variable.initial() != Initial::None).then(|| variable.initial().to_string()),
        ..Default::default()
    };

    match variable.value_type() {
        ValueType::Real => sv.real = Some(element),
        ValueType::Integer => sv.integer = Some(element),
        ValueType::Boolean => sv.boolean = Some(element),
        ValueType::String => sv.string = Some(element),
    }
    sv
}
