//! Serializes a `ModelDescription` into a `modelDescription.xml` string.
//!
//! Converts the public `types` into the internal `model` structs and lets
//! `quick-xml` write them. Attributes equal to their FMI default are omitted.

mod variables;

use crate::error::MdError;
use crate::model;
use crate::types::{CoSimulationCapabilities, LogCategory, ModelDescription};
use alloc::string::{String, ToString};
use core::fmt::Write;
use fmu_rs::{DefaultExperiment, ModelInfo, UnitDefinition, Value};
use log::debug;
use serde::Serialize;

const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

/// Serializes a `ModelDescription` into a complete XML document.
///
/// Variables are written in the order of `description.variables`, which for
/// a component snapshot is `(value type, value reference)` order.
pub fn save_model_description_to_string(description: &ModelDescription) -> Result<String, MdError> {
    let root = build_root(description);

    let mut buffer = String::new();
    write!(&mut buffer, "{}", XML_HEADER)?;

    let mut serializer = quick_xml::se::Serializer::new(&mut buffer);
    serializer.indent(' ', 2);

    root.serialize(serializer)?;
    debug!(
        "Serialized model description '{}' with {} variables",
        description.info.model_name,
        description.variables.len()
    );
    Ok(buffer)
}

fn build_root(description: &ModelDescription) -> model::FmiModelDescription {
    let info = &description.info;
    let fmi_version = if description.fmi_version.is_empty() {
        crate::types::FMI_VERSION.to_string()
    } else {
        description.fmi_version.clone()
    };

    model::FmiModelDescription {
        fmi_version,
        model_name: info.model_name.clone(),
        guid: info.guid.clone(),
        description: non_empty(&info.description),
        generation_tool: non_empty(&info.generation_tool),
        variable_naming_convention: non_empty(&info.variable_naming_convention),
        number_of_event_indicators: build_event_indicators(info),
        co_simulation: description.co_simulation.as_ref().map(build_co_simulation),
        unit_definitions: build_units(&description.units),
        log_categories: build_log_categories(&description.log_categories),
        default_experiment: description.default_experiment.as_ref().map(build_default_experiment),
        model_variables: model::ModelVariables {
            scalar_variable: description.variables.iter().map(variables::build_scalar_variable).collect(),
        },
        model_structure: build_model_structure(&description.outputs),
    }
}

fn non_empty(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}

fn build_event_indicators(info: &ModelInfo) -> Option<String> {
    (info.number_of_event_indicators > 0).then(|| info.number_of_event_indicators.to_string())
}

fn build_co_simulation(caps: &CoSimulationCapabilities) -> model::CoSimulation {
    model::CoSimulation {
        model_identifier: caps.model_identifier.clone(),
        can_handle_variable_communication_step_size: caps.can_handle_variable_communication_step_size,
        can_interpolate_inputs: caps.can_interpolate_inputs,
        max_output_derivative_order: caps.max_output_derivative_order,
        can_get_and_set_fmu_state: caps.can_get_and_set_fmu_state,
        can_serialize_fmu_state: caps.can_serialize_fmu_state,
        provides_directional_derivative: caps.provides_directional_derivative,
    }
}

fn build_units(units: &[UnitDefinition]) -> Option<model::UnitDefinitions> {
    if units.is_empty() {
        return None;
    }
    let exponent = |e: i32| (e != 0).then_some(e);
    let unit = units
        .iter()
        .map(|u| model::Unit {
            name: u.name.clone(),
            base_unit: Some(model::BaseUnit {
                kg: exponent(u.kg),
                m: exponent(u.m),
                s: exponent(u.s),
                a: exponent(u.a),
                k: exponent(u.k),
                mol: exponent(u.mol),
                cd: exponent(u.cd),
                rad: exponent(u.rad),
            }),
        })
        .collect();
    Some(model::UnitDefinitions { unit })
}

fn build_log_categories(categories: &[LogCategory]) -> Option<model::LogCategories> {
    if categories.is_empty() {
        return None;
    }
    Some(model::LogCategories {
        category: categories
            .iter()
            .map(|c| model::Category {
                name: c.name.clone(),
                description: non_empty(&c.description),
            })
            .collect(),
    })
}

/// `stepSize` and `tolerance` are only written when positive.
fn build_default_experiment(experiment: &DefaultExperiment) -> model::DefaultExperiment {
    let positive = |v: f64| (v > 0.0).then(|| format_real(v));
    model::DefaultExperiment {
        start_time: Some(format_real(experiment.start_time)),
        stop_time: Some(format_real(experiment.stop_time)),
        step_size: positive(experiment.step_size),
        tolerance: positive(experiment.tolerance),
    }
}

fn build_model_structure(outputs: &[usize]) -> model::ModelStructure {
    if outputs.is_empty() {
        return model::ModelStructure::default();
    }
    model::ModelStructure {
        outputs: Some(model::Outputs {
            unknown: outputs
                .iter()
                .map(|i| model::Unknown { index: i.to_string() })
                .collect(),
        }),
    }
}

fn format_real(value: f64) -> String {
    Value::Real(value).to_xml_string()
}
