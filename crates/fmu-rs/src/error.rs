use crate::lifecycle::{LifecycleEvent, MachineState};
use crate::types::{ValueReference, ValueType};
use alloc::string::String;
use core::fmt;

/// Defines a portable, descriptive Error type for the FMU core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FmuError {
    /// The causality/variability/initial combination of a variable is illegal
    /// (FMI 2.0.2, Section 2.2.7).
    InvalidAttributes {
        name: String,
        reason: &'static str,
    },
    /// A variable with this name is already registered.
    DuplicateName(String),
    /// The unit is neither defined nor part of the unit catalog.
    UnknownUnit(String),
    /// No variable of this type carries the given value reference.
    UnknownVariable {
        value_type: ValueType,
        value_reference: ValueReference,
    },
    /// The variable exists but may not be set in the current machine state.
    NotSettable {
        name: String,
        state: MachineState,
    },
    /// A value of the wrong type was read from or written to a binding.
    TypeMismatch {
        expected: ValueType,
        found: ValueType,
    },
    /// The lifecycle state machine rejected an event.
    InvalidTransition {
        from: MachineState,
        event: LifecycleEvent,
    },
    /// A log category that the component does not declare.
    UnknownLogCategory(String),
    /// The host model failed to advance.
    StepFailed(&'static str),
}

impl fmt::Display for FmuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAttributes { name, reason } => {
                write!(f, "Illegal attributes for variable '{}': {}", name, reason)
            }
            Self::DuplicateName(name) => {
                write!(f, "A variable named '{}' is already registered", name)
            }
            Self::UnknownUnit(unit) => write!(f, "Unit '{}' is not defined", unit),
            Self::UnknownVariable {
                value_type,
                value_reference,
            } => write!(
                f,
                "No {} variable with value reference {}",
                value_type, value_reference
            ),
            Self::NotSettable { name, state } => {
                write!(f, "Variable '{}' cannot be set in state {:?}", name, state)
            }
            Self::TypeMismatch { expected, found } => write!(
                f,
                "Type mismatch: variable is {} but a {} was supplied",
                expected, found
            ),
            Self::InvalidTransition { from, event } => {
                write!(f, "Event {:?} is not allowed in state {:?}", event, from)
            }
            Self::UnknownLogCategory(c) => write!(f, "Unknown log category '{}'", c),
            Self::StepFailed(msg) => write!(f, "Step failed: {}", msg),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FmuError {}
