use super::attributes::{Causality, Initial, Variability};
use crate::FmuError;
use crate::lifecycle::{MachineState, is_set_allowed};
use crate::types::{DEFAULT_UNIT, FmuType, Value, ValueReference, ValueType};
use alloc::string::{String, ToString};
use log::trace;

/// Whether a start value may or must be given for a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StartRequirement {
    pub allowed: bool,
    pub required: bool,
}

/// The outcome of validating an attribute triple: the effective `initial`
/// and the derived start-value requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedAttributes {
    pub initial: Initial,
    pub start: StartRequirement,
}

/// Applies the FMI 2.0.2 Section 2.2.7 defaulting and legality rules.
///
/// The order matters: `initial` is defaulted first, because the bans that
/// follow inspect the defaulted value.
pub fn resolve_attributes(
    causality: Causality,
    variability: Variability,
    mut initial: Initial,
) -> Result<ResolvedAttributes, &'static str> {
    use Causality as C;
    use Variability as V;

    // 1. Default / validate `initial`. The three guards are disjoint.
    let case_a = (variability == V::Constant && matches!(causality, C::Output | C::Local))
        || (matches!(variability, V::Fixed | V::Tunable) && causality == C::Parameter);
    let case_b = matches!(variability, V::Fixed | V::Tunable)
        && matches!(causality, C::CalculatedParameter | C::Local);
    let case_c = matches!(variability, V::Discrete | V::Continuous)
        && matches!(causality, C::Output | C::Local);

    if case_a {
        match initial {
            Initial::None => initial = Initial::Exact,
            Initial::Exact => {}
            _ => return Err("initial must be 'exact' for this causality/variability"),
        }
    } else if case_b {
        match initial {
            Initial::None => initial = Initial::Calculated,
            Initial::Approx | Initial::Calculated => {}
            Initial::Exact => {
                return Err("initial must be 'approx' or 'calculated' for this causality/variability");
            }
        }
    } else if case_c && initial == Initial::None {
        initial = Initial::Calculated;
    }

    // 2. Causality-specific bans on `initial`.
    if causality == C::Independent && initial != Initial::None {
        return Err("independent variables cannot define initial");
    }
    if causality == C::Input && initial != Initial::None {
        return Err("input variables cannot define initial");
    }

    // 3. Start-value requirement.
    let mut start = StartRequirement {
        allowed: true,
        required: false,
    };
    if initial == Initial::Calculated || causality == C::Independent {
        start.allowed = false;
    }
    if matches!(initial, Initial::Exact | Initial::Approx) || causality == C::Input {
        start.allowed = true;
        start.required = true;
    }

    // 4. Cross-attribute bans.
    if variability == V::Constant
        && matches!(causality, C::Parameter | C::CalculatedParameter | C::Input)
    {
        return Err("constant variables cannot be parameters, calculated parameters or inputs");
    }
    if matches!(variability, V::Discrete | V::Continuous)
        && matches!(causality, C::Parameter | C::CalculatedParameter)
    {
        return Err("parameters must be fixed or tunable");
    }
    if causality == C::Independent && variability != V::Continuous {
        return Err("independent variables must be continuous");
    }
    if causality == C::Input && matches!(variability, V::Fixed | V::Tunable) {
        return Err("fixed or tunable inputs must be declared as parameters");
    }

    Ok(ResolvedAttributes { initial, start })
}

/// Immutable metadata of one model variable.
///
/// Only the value reference (assigned once by the registry) and the start
/// value (back-filled from the binding on registration) change after
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDescriptor {
    name: String,
    value_type: ValueType,
    causality: Causality,
    variability: Variability,
    initial: Initial,
    unit: String,
    description: String,
    value_reference: ValueReference,
    start_requirement: StartRequirement,
    start: Option<Value>,
}

impl VariableDescriptor {
    /// Creates a descriptor, validating and defaulting the attribute triple.
    pub fn new(
        name: impl Into<String>,
        value_type: ValueType,
        causality: Causality,
        variability: Variability,
        initial: Initial,
    ) -> Result<Self, FmuError> {
        let name = name.into();
        let resolved = resolve_attributes(causality, variability, initial).map_err(|reason| {
            FmuError::InvalidAttributes {
                name: name.clone(),
                reason,
            }
        })?;
        if resolved.initial != initial {
            trace!(
                "Variable '{}': initial defaulted from {} to {}",
                name, initial, resolved.initial
            );
        }

        Ok(Self {
            name,
            value_type,
            causality,
            variability,
            initial: resolved.initial,
            unit: DEFAULT_UNIT.to_string(),
            description: String::new(),
            value_reference: 0,
            start_requirement: resolved.start,
            start: None,
        })
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_value_reference(mut self, value_reference: ValueReference) -> Self {
        self.value_reference = value_reference;
        self
    }

    /// Attaches an explicit start value.
    ///
    /// Fails if the value type differs from the descriptor's, or if the
    /// attribute combination forbids a start value.
    pub fn with_start(mut self, value: Value) -> Result<Self, FmuError> {
        self.set_start(value)?;
        Ok(self)
    }

    pub(crate) fn set_value_reference(&mut self, value_reference: ValueReference) {
        self.value_reference = value_reference;
    }

    pub(crate) fn set_start(&mut self, value: Value) -> Result<(), FmuError> {
        if value.value_type() != self.value_type {
            return Err(FmuError::TypeMismatch {
                expected: self.value_type,
                found: value.value_type(),
            });
        }
        if !self.start_requirement.allowed {
            return Err(FmuError::InvalidAttributes {
                name: self.name.clone(),
                reason: "a start value is not allowed for this causality/initial",
            });
        }
        self.start = Some(value);
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn causality(&self) -> Causality {
        self.causality
    }

    pub fn variability(&self) -> Variability {
        self.variability
    }

    /// The effective `initial`, after defaulting.
    pub fn initial(&self) -> Initial {
        self.initial
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn value_reference(&self) -> ValueReference {
        self.value_reference
    }

    pub fn allowed_start(&self) -> bool {
        self.start_requirement.allowed
    }

    pub fn required_start(&self) -> bool {
        self.start_requirement.required
    }

    pub fn has_start(&self) -> bool {
        self.start.is_some()
    }

    pub fn start(&self) -> Option<&Value> {
        self.start.as_ref()
    }

    /// Returns `true` if a co-simulation master may set this variable in `state`.
    pub fn is_settable_in(&self, state: MachineState) -> bool {
        is_set_allowed(self, FmuType::CoSimulation, state)
    }

    /// Returns `true` if there is at least one state in which the variable
    /// may be set.
    pub fn is_settable(&self) -> bool {
        self.is_settable_in(MachineState::AnySettable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    /// Expected effective `initial` for every (causality, variability) pair
    /// when `initial` is left unspecified. `None` marks an illegal pair.
    fn expected_default(c: Causality, v: Variability) -> Option<Initial> {
        use Causality as C;
        use Variability as V;
        match (c, v) {
            (C::Parameter, V::Fixed | V::Tunable) => Some(Initial::Exact),
            (C::CalculatedParameter, V::Fixed | V::Tunable) => Some(Initial::Calculated),
            (C::Input, V::Discrete | V::Continuous) => Some(Initial::None),
            (C::Output, V::Constant) => Some(Initial::Exact),
            (C::Output, V::Fixed | V::Tunable) => Some(Initial::None),
            (C::Output, V::Discrete | V::Continuous) => Some(Initial::Calculated),
            (C::Local, V::Constant) => Some(Initial::Exact),
            (C::Local, V::Fixed | V::Tunable) => Some(Initial::Calculated),
            (C::Local, V::Discrete | V::Continuous) => Some(Initial::Calculated),
            (C::Independent, V::Continuous) => Some(Initial::None),
            _ => None,
        }
    }

    #[test]
    fn test_attribute_table_with_default_initial() {
        let mut legal = Vec::new();
        for value_type in ValueType::ALL {
            for c in Causality::ALL {
                for v in Variability::ALL {
                    let result = VariableDescriptor::new("x", value_type, c, v, Initial::None);
                    match (expected_default(c, v), result) {
                        (Some(expected), Ok(desc)) => {
                            assert_eq!(desc.initial(), expected, "{:?}/{:?}", c, v);
                            if value_type == ValueType::Real {
                                legal.push((c, v));
                            }
                        }
                        (None, Err(FmuError::InvalidAttributes { .. })) => {}
                        (expected, result) => {
                            panic!("{:?}/{:?}: expected {:?}, got {:?}", c, v, expected, result)
                        }
                    }
                }
            }
        }
        assert_eq!(legal.len(), 17);
    }

    #[test]
    fn test_rule_a_requires_exact() {
        assert!(resolve_attributes(Causality::Parameter, Variability::Fixed, Initial::Exact).is_ok());
        assert!(resolve_attributes(Causality::Parameter, Variability::Fixed, Initial::Approx).is_err());
        assert!(resolve_attributes(Causality::Local, Variability::Constant, Initial::Calculated).is_err());
    }

    #[test]
    fn test_rule_b_rejects_exact() {
        let r = resolve_attributes(Causality::CalculatedParameter, Variability::Tunable, Initial::Approx)
            .unwrap();
        assert_eq!(r.initial, Initial::Approx);
        assert!(
            resolve_attributes(Causality::Local, Variability::Fixed, Initial::Exact).is_err()
        );
    }

    #[test]
    fn test_rule_c_keeps_explicit_initial() {
        let r = resolve_attributes(Causality::Output, Variability::Continuous, Initial::Exact).unwrap();
        assert_eq!(r.initial, Initial::Exact);
        assert!(r.start.required);
    }

    #[test]
    fn test_input_and_independent_forbid_initial() {
        assert!(resolve_attributes(Causality::Input, Variability::Continuous, Initial::Approx).is_err());
        assert!(
            resolve_attributes(Causality::Independent, Variability::Continuous, Initial::Exact).is_err()
        );
    }

    #[test]
    fn test_start_requirements() {
        let input = resolve_attributes(Causality::Input, Variability::Continuous, Initial::None).unwrap();
        assert_eq!(input.start, StartRequirement { allowed: true, required: true });

        let time =
            resolve_attributes(Causality::Independent, Variability::Continuous, Initial::None).unwrap();
        assert_eq!(time.start, StartRequirement { allowed: false, required: false });

        let out = resolve_attributes(Causality::Output, Variability::Continuous, Initial::None).unwrap();
        assert_eq!(out.initial, Initial::Calculated);
        assert!(!out.start.allowed);

        let param = resolve_attributes(Causality::Parameter, Variability::Fixed, Initial::None).unwrap();
        assert!(param.start.required);
    }

    #[test]
    fn test_with_start_checks_type_and_permission() {
        let desc = VariableDescriptor::new(
            "k",
            ValueType::Real,
            Causality::Parameter,
            Variability::Fixed,
            Initial::None,
        )
        .unwrap();
        assert!(matches!(
            desc.clone().with_start(Value::Integer(1)),
            Err(FmuError::TypeMismatch { .. })
        ));
        let desc = desc.with_start(Value::Real(2.5)).unwrap();
        assert!(desc.has_start());

        let out = VariableDescriptor::new(
            "y",
            ValueType::Real,
            Causality::Output,
            Variability::Continuous,
            Initial::None,
        )
        .unwrap();
        assert!(matches!(
            out.with_start(Value::Real(0.0)),
            Err(FmuError::InvalidAttributes { .. })
        ));
    }

    #[test]
    fn test_settable_in_some_state() {
        let param = VariableDescriptor::new(
            "k",
            ValueType::Real,
            Causality::Parameter,
            Variability::Fixed,
            Initial::None,
        )
        .unwrap();
        assert!(param.is_settable());

        let out = VariableDescriptor::new(
            "y",
            ValueType::Real,
            Causality::Output,
            Variability::Continuous,
            Initial::None,
        )
        .unwrap();
        assert!(!out.is_settable());
    }
}
