// crates/fmu-rs/src/lifecycle/gate.rs

//! Decides whether a variable may be set in a given machine state.
//! (Reference: FMI 2.0.2, Section 4.2.4, Table "Allowed function calls")

use super::states::MachineState;
use crate::types::FmuType;
use crate::variable::{Causality, Initial, Variability, VariableDescriptor};
use log::trace;

/// Returns `true` if `fmi2Set{Type}` is legal for `variable` in `state`.
///
/// The clauses are independent; a variable may qualify through more than
/// one of them, so each is checked on its own and the results are OR-ed.
pub fn is_set_allowed(variable: &VariableDescriptor, fmu_type: FmuType, state: MachineState) -> bool {
    use MachineState as S;

    if fmu_type == FmuType::ModelExchange {
        trace!("ModelExchange set legality is not supported; denying '{}'", variable.name());
        return false;
    }

    let mut allowed = false;

    if variable.variability() != Variability::Constant {
        allowed |= match variable.initial() {
            Initial::Approx => matches!(state, S::Instantiated | S::AnySettable),
            Initial::Exact => matches!(
                state,
                S::Instantiated | S::InitializationMode | S::AnySettable
            ),
            _ => false,
        };
    }

    let causality = variable.causality();
    if causality == Causality::Input
        || (causality == Causality::Parameter && variable.variability() == Variability::Tunable)
    {
        allowed |= matches!(
            state,
            S::InitializationMode | S::StepCompleted | S::AnySettable
        );
    }

    allowed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ValueType;

    fn var(c: Causality, v: Variability, i: Initial) -> VariableDescriptor {
        VariableDescriptor::new("v", ValueType::Real, c, v, i).unwrap()
    }

    fn cs(desc: &VariableDescriptor, state: MachineState) -> bool {
        is_set_allowed(desc, FmuType::CoSimulation, state)
    }

    #[test]
    fn test_fixed_exact_parameter() {
        let p = var(Causality::Parameter, Variability::Fixed, Initial::Exact);
        assert!(cs(&p, MachineState::Instantiated));
        assert!(cs(&p, MachineState::InitializationMode));
        assert!(!cs(&p, MachineState::StepCompleted));
        assert!(!cs(&p, MachineState::Terminated));
    }

    #[test]
    fn test_input() {
        let u = var(Causality::Input, Variability::Continuous, Initial::None);
        assert!(!cs(&u, MachineState::Instantiated));
        assert!(cs(&u, MachineState::InitializationMode));
        assert!(cs(&u, MachineState::StepCompleted));
        assert!(!cs(&u, MachineState::StepInProgress));
    }

    #[test]
    fn test_tunable_parameter_matches_both_clauses() {
        let p = var(Causality::Parameter, Variability::Tunable, Initial::None);
        assert_eq!(p.initial(), Initial::Exact);
        assert!(cs(&p, MachineState::Instantiated));
        assert!(cs(&p, MachineState::InitializationMode));
        assert!(cs(&p, MachineState::StepCompleted));
        assert!(!cs(&p, MachineState::StepFailed));
    }

    #[test]
    fn test_approx_only_before_initialization() {
        let p = var(Causality::CalculatedParameter, Variability::Fixed, Initial::Approx);
        assert!(cs(&p, MachineState::Instantiated));
        assert!(!cs(&p, MachineState::InitializationMode));
    }

    #[test]
    fn test_constants_and_outputs_are_never_settable() {
        let k = var(Causality::Local, Variability::Constant, Initial::None);
        assert_eq!(k.initial(), Initial::Exact);
        assert!(!cs(&k, MachineState::Instantiated));
        assert!(!cs(&k, MachineState::AnySettable));

        let y = var(Causality::Output, Variability::Continuous, Initial::None);
        assert!(!cs(&y, MachineState::AnySettable));
    }

    #[test]
    fn test_model_exchange_always_denied() {
        let u = var(Causality::Input, Variability::Continuous, Initial::None);
        assert!(!is_set_allowed(&u, FmuType::ModelExchange, MachineState::StepCompleted));
        assert!(!is_set_allowed(&u, FmuType::ModelExchange, MachineState::AnySettable));
    }
}
