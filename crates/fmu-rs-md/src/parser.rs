// src/parser.rs

use crate::error::MdError;
use crate::model::{self, ScalarVariable, TypeElement};
use crate::tree::VariableTree;
use crate::types::{CoSimulationCapabilities, FMI_VERSION, ImportedModel, LogCategory, ModelDescription};
use alloc::collections::BTreeSet;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::str::FromStr;
use fmu_rs::types::DEFAULT_UNIT;
use fmu_rs::{
    Causality, DefaultExperiment, Initial, ModelInfo, UnitDefinition, Value, ValueType, Variability,
    VariableDescriptor,
};
use log::{debug, warn};

/// Parses a `modelDescription.xml` string into a `ModelDescription` and
/// builds the namespace tree over its variable names.
///
/// # Errors
/// Any malformed part rejects the whole document: XML errors, a variable
/// without `name` or `valueReference`, unparsable attribute values, illegal
/// causality/variability/initial combinations and over-deep names.
pub fn load_model_description_from_str(xml_content: &str) -> Result<ImportedModel, MdError> {
    // 1. Deserialize the raw XML string into our internal model.
    let root: model::FmiModelDescription = quick_xml::de::from_str(xml_content)?;
    if root.fmi_version != FMI_VERSION {
        warn!(
            "Model description declares fmiVersion '{}', expected '{}'",
            root.fmi_version, FMI_VERSION
        );
    }

    // 2. Root attributes and capability flags.
    let co_simulation = root.co_simulation.map(parse_co_simulation);
    let info = ModelInfo {
        model_name: root.model_name,
        model_identifier: co_simulation
            .as_ref()
            .map(|c| c.model_identifier.clone())
            .unwrap_or_default(),
        guid: root.guid,
        description: root.description.unwrap_or_default(),
        generation_tool: root.generation_tool.unwrap_or_default(),
        variable_naming_convention: root
            .variable_naming_convention
            .unwrap_or_else(|| String::from("flat")),
        number_of_event_indicators: root
            .number_of_event_indicators
            .as_deref()
            .map(|s| parse_number(s, "numberOfEventIndicators"))
            .transpose()?
            .unwrap_or(0),
    };

    // 3. Variables, in document order.
    let mut names = BTreeSet::new();
    let mut variables = Vec::with_capacity(root.model_variables.scalar_variable.len());
    for sv in root.model_variables.scalar_variable {
        let descriptor = parse_scalar_variable(sv)?;
        if !names.insert(descriptor.name().to_string()) {
            return Err(MdError::DuplicateName {
                name: descriptor.name().to_string(),
            });
        }
        variables.push(descriptor);
    }

    let outputs = parse_outputs(root.model_structure, variables.len())?;

    let description = ModelDescription {
        fmi_version: root.fmi_version,
        info,
        co_simulation,
        units: root.unit_definitions.map(parse_units).unwrap_or_default(),
        log_categories: root
            .log_categories
            .map(|lc| {
                lc.category
                    .into_iter()
                    .map(|c| LogCategory {
                        name: c.name,
                        description: c.description.unwrap_or_default(),
                    })
                    .collect()
            })
            .unwrap_or_default(),
        default_experiment: root
            .default_experiment
            .map(parse_default_experiment)
            .transpose()?,
        variables,
        outputs,
    };

    // 4. Namespace tree over the flat names.
    let tree = VariableTree::build(&description.variables)?;
    debug!(
        "Loaded model description '{}' with {} variables",
        description.info.model_name,
        description.variables.len()
    );
    Ok(ImportedModel { description, tree })
}

fn parse_number<T: FromStr>(text: &str, attribute: &'static str) -> Result<T, MdError> {
    text.trim()
        .parse()
        .map_err(|_| MdError::InvalidAttributeFormat { attribute })
}

/// Parses an optional enumeration attribute; absence yields the FMI default.
fn parse_enum<T: Default>(
    text: Option<&str>,
    from_xml: fn(&str) -> Option<T>,
    attribute: &'static str,
) -> Result<T, MdError> {
    match text {
        None => Ok(T::default()),
        Some(t) => from_xml(t.trim()).ok_or(MdError::InvalidAttributeFormat { attribute }),
    }
}

fn parse_co_simulation(cs: model::CoSimulation) -> CoSimulationCapabilities {
    CoSimulationCapabilities {
        model_identifier: cs.model_identifier,
        can_handle_variable_communication_step_size: cs.can_handle_variable_communication_step_size,
        can_interpolate_inputs: cs.can_interpolate_inputs,
        max_output_derivative_order: cs.max_output_derivative_order,
        can_get_and_set_fmu_state: cs.can_get_and_set_fmu_state,
        can_serialize_fmu_state: cs.can_serialize_fmu_state,
        provides_directional_derivative: cs.provides_directional_derivative,
    }
}

fn parse_units(defs: model::UnitDefinitions) -> Vec<UnitDefinition> {
    defs.unit
        .into_iter()
        .map(|u| {
            let base = u.base_unit.unwrap_or_default();
            UnitDefinition::new(u.name)
                .kg(base.kg.unwrap_or(0))
                .m(base.m.unwrap_or(0))
                .s(base.s.unwrap_or(0))
                .a(base.a.unwrap_or(0))
                .k(base.k.unwrap_or(0))
                .mol(base.mol.unwrap_or(0))
                .cd(base.cd.unwrap_or(0))
                .rad(base.rad.unwrap_or(0))
        })
        .collect()
}

fn parse_default_experiment(de: model::DefaultExperiment) -> Result<DefaultExperiment, MdError> {
    let defaults = DefaultExperiment::default();
    let field = |text: Option<String>, attribute: &'static str, fallback: f64| -> Result<f64, MdError> {
        text.as_deref()
            .map(|t| parse_number(t, attribute))
            .transpose()
            .map(|v| v.unwrap_or(fallback))
    };
    Ok(DefaultExperiment {
        start_time: field(de.start_time, "startTime", defaults.start_time)?,
        stop_time: field(de.stop_time, "stopTime", defaults.stop_time)?,
        step_size: field(de.step_size, "stepSize", 0.0)?,
        tolerance: field(de.tolerance, "tolerance", 0.0)?,
    })
}

fn parse_outputs(structure: model::ModelStructure, count: usize) -> Result<Vec<usize>, MdError> {
    let Some(outputs) = structure.outputs else {
        return Ok(Vec::new());
    };
    outputs
        .unknown
        .iter()
        .map(|u| {
            let index: usize = parse_number(&u.index, "index")?;
            if index == 0 || index > count {
                return Err(MdError::InvalidAttributeFormat { attribute: "index" });
            }
            Ok(index)
        })
        .collect()
}

/// Picks the type element. An absent or unrecognised element is read as an
/// unconstrained `Real`.
fn select_type(sv: &mut ScalarVariable, name: &str) -> (ValueType, TypeElement) {
    if let Some(e) = sv.real.take() {
        (ValueType::Real, e)
    } else if let Some(e) = sv.integer.take() {
        (ValueType::Integer, e)
    } else if let Some(e) = sv.boolean.take() {
        (ValueType::Boolean, e)
    } else if let Some(e) = sv.string.take() {
        (ValueType::String, e)
    } else {
        warn!("Variable '{}' has no recognised type element; treating it as Real", name);
        (ValueType::Real, TypeElement::default())
    }
}

fn parse_scalar_variable(mut sv: ScalarVariable) -> Result<VariableDescriptor, MdError> {
    let name = sv
        .name
        .take()
        .ok_or(MdError::MissingAttribute { attribute: "name" })?;
    let value_reference: u32 = parse_number(
        sv.value_reference
            .as_deref()
            .ok_or(MdError::MissingAttribute {
                attribute: "valueReference",
            })?,
        "valueReference",
    )?;

    let causality = parse_enum(sv.causality.as_deref(), Causality::from_xml, "causality")?;
    let variability = parse_enum(sv.variability.as_deref(), Variability::from_xml, "variability")?;
    let initial = parse_enum(sv.initial.as_deref(), Initial::from_xml, "initial")?;

    let (value_type, element) = select_type(&mut sv, &name);

    let mut descriptor = VariableDescriptor::new(name, value_type, causality, variability, initial)?
        .with_value_reference(value_reference)
        .with_description(sv.description.unwrap_or_default());
    if value_type == ValueType::Real {
        descriptor = descriptor.with_unit(element.unit.unwrap_or_else(|| String::from(DEFAULT_UNIT)));
    }

    match element.start {
        Some(text) => {
            let start = Value::parse(value_type, &text)
                .map_err(|_| MdError::InvalidAttributeFormat { attribute: "start" })?;
            descriptor = descriptor.with_start(start)?;
        }
        None if descriptor.required_start() => {
            warn!("Variable '{}' requires a start value but has none", descriptor.name());
        }
        None => {}
    }
    Ok(descriptor)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<fmiModelDescription fmiVersion="2.0" modelName="M" guid="{g}">
  <CoSimulation modelIdentifier="M"/>
  <ModelVariables>
    <ScalarVariable name="x" valueReference="4">
      <Real/>
    </ScalarVariable>
  </ModelVariables>
  <ModelStructure/>
</fmiModelDescription>"#;

    #[test]
    fn test_minimal_document_defaults() {
        let model = load_model_description_from_str(MINIMAL).unwrap();
        let md = &model.description;
        assert_eq!(md.info.model_identifier, "M");
        assert_eq!(md.variables.len(), 1);
        let x = &md.variables[0];
        assert_eq!(x.value_reference(), 4);
        assert_eq!(x.causality(), Causality::Local);
        assert_eq!(x.variability(), Variability::Continuous);
        assert_eq!(x.initial(), Initial::Calculated);
        assert_eq!(x.unit(), "1");
        assert!(md.default_experiment.is_none());
        assert!(md.outputs.is_empty());
    }

    #[test]
    fn test_missing_type_element_defaults_to_real() {
        let xml = MINIMAL.replace("<Real/>", "<Enumeration declaredType=\"E\"/>");
        let model = load_model_description_from_str(&xml).unwrap();
        assert_eq!(model.description.variables[0].value_type(), ValueType::Real);
    }

    #[test]
    fn test_missing_value_reference_rejects_document() {
        let xml = MINIMAL.replace(" valueReference=\"4\"", "");
        assert!(matches!(
            load_model_description_from_str(&xml),
            Err(MdError::MissingAttribute {
                attribute: "valueReference"
            })
        ));
    }

    #[test]
    fn test_missing_name_rejects_document() {
        let xml = MINIMAL.replace("name=\"x\" ", "");
        assert!(matches!(
            load_model_description_from_str(&xml),
            Err(MdError::MissingAttribute { attribute: "name" })
        ));
    }

    #[test]
    fn test_bad_enum_and_number() {
        let xml = MINIMAL.replace("valueReference=\"4\"", "valueReference=\"4\" causality=\"sideways\"");
        assert!(matches!(
            load_model_description_from_str(&xml),
            Err(MdError::InvalidAttributeFormat { attribute: "causality" })
        ));

        let xml = MINIMAL.replace("valueReference=\"4\"", "valueReference=\"-4\"");
        assert!(matches!(
            load_model_description_from_str(&xml),
            Err(MdError::InvalidAttributeFormat {
                attribute: "valueReference"
            })
        ));
    }

    #[test]
    fn test_illegal_combination_rejects_document() {
        let xml = MINIMAL.replace(
            "valueReference=\"4\"",
            "valueReference=\"4\" causality=\"parameter\" variability=\"continuous\"",
        );
        assert!(matches!(
            load_model_description_from_str(&xml),
            Err(MdError::Attribute(fmu_rs::FmuError::InvalidAttributes { .. }))
        ));
    }

    #[test]
    fn test_output_index_out_of_range() {
        let xml = MINIMAL.replace(
            "<ModelStructure/>",
            "<ModelStructure><Outputs><Unknown index=\"2\"/></Outputs></ModelStructure>",
        );
        assert!(matches!(
            load_model_description_from_str(&xml),
            Err(MdError::InvalidAttributeFormat { attribute: "index" })
        ));
    }
}
