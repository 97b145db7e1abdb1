// crates/fmu-rs/src/lifecycle/state_machine.rs
use super::events::LifecycleEvent;
use super::states::MachineState;
use crate::FmuError;
use log::{debug, warn};

/// Owns the lifecycle state of one component.
///
/// The state only changes through [`Lifecycle::transition`]; the set-gate
/// reads it as a plain value.
#[derive(Debug, Clone, Default)]
pub struct Lifecycle {
    state: MachineState,
}

impl Lifecycle {
    /// Creates a state machine in `Instantiated`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current state.
    pub fn state(&self) -> MachineState {
        self.state
    }

    /// Applies an event, returning the new state.
    ///
    /// (Reference: FMI 2.0.2, Section 4.2.4)
    pub fn transition(&mut self, event: LifecycleEvent) -> Result<MachineState, FmuError> {
        use LifecycleEvent as E;
        use MachineState as S;

        let next = match (self.state, event) {
            // Failure states are reachable from anywhere and never left.
            (_, E::Fatal) => S::Fatal,
            (S::Fatal, _) => return Err(self.reject(event)),
            (_, E::Error) => S::Error,
            (S::Error, _) => return Err(self.reject(event)),

            // --- Initialisation ---
            (S::Instantiated, E::EnterInitializationMode) => S::InitializationMode,
            (S::InitializationMode, E::ExitInitializationMode) => S::StepCompleted,

            // --- Stepping ---
            (S::StepCompleted, E::StepStarted) => S::StepInProgress,
            (S::StepInProgress, E::StepFinished) => S::StepCompleted,
            (S::StepInProgress, E::StepFailed) => S::StepFailed,
            (S::StepInProgress | S::StepCompleted, E::StepCanceled) => S::StepCanceled,

            // --- Shutdown ---
            (S::StepCompleted | S::StepFailed | S::StepCanceled, E::Terminate) => S::Terminated,
            (
                S::Instantiated
                | S::InitializationMode
                | S::StepCompleted
                | S::StepFailed
                | S::StepCanceled
                | S::Terminated,
                E::Reset,
            ) => S::Instantiated,

            _ => return Err(self.reject(event)),
        };

        debug!("[FMU] Lifecycle {:?} --{:?}--> {:?}", self.state, event, next);
        self.state = next;
        Ok(next)
    }

    fn reject(&self, event: LifecycleEvent) -> FmuError {
        warn!("[FMU] Event {:?} rejected in state {:?}", event, self.state);
        FmuError::InvalidTransition {
            from: self.state,
            event,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let mut lc = Lifecycle::new();
        assert_eq!(lc.state(), MachineState::Instantiated);

        lc.transition(LifecycleEvent::EnterInitializationMode).unwrap();
        assert_eq!(lc.state(), MachineState::InitializationMode);

        lc.transition(LifecycleEvent::ExitInitializationMode).unwrap();
        assert_eq!(lc.state(), MachineState::StepCompleted);

        for _ in 0..3 {
            lc.transition(LifecycleEvent::StepStarted).unwrap();
            assert_eq!(lc.state(), MachineState::StepInProgress);
            lc.transition(LifecycleEvent::StepFinished).unwrap();
            assert_eq!(lc.state(), MachineState::StepCompleted);
        }

        assert_eq!(
            lc.transition(LifecycleEvent::Terminate),
            Ok(MachineState::Terminated)
        );
    }

    #[test]
    fn test_cannot_step_before_initialization() {
        let mut lc = Lifecycle::new();
        assert_eq!(
            lc.transition(LifecycleEvent::StepStarted),
            Err(FmuError::InvalidTransition {
                from: MachineState::Instantiated,
                event: LifecycleEvent::StepStarted,
            })
        );
        // A rejected event leaves the state untouched.
        assert_eq!(lc.state(), MachineState::Instantiated);
    }

    #[test]
    fn test_failed_step_can_only_terminate_or_reset() {
        let mut lc = Lifecycle::new();
        lc.transition(LifecycleEvent::EnterInitializationMode).unwrap();
        lc.transition(LifecycleEvent::ExitInitializationMode).unwrap();
        lc.transition(LifecycleEvent::StepStarted).unwrap();
        lc.transition(LifecycleEvent::StepFailed).unwrap();
        assert!(lc.transition(LifecycleEvent::StepStarted).is_err());
        assert_eq!(lc.clone().transition(LifecycleEvent::Terminate), Ok(MachineState::Terminated));
        assert_eq!(lc.transition(LifecycleEvent::Reset), Ok(MachineState::Instantiated));
    }

    #[test]
    fn test_error_and_fatal_are_absorbing() {
        let mut lc = Lifecycle::new();
        lc.transition(LifecycleEvent::EnterInitializationMode).unwrap();
        assert_eq!(lc.transition(LifecycleEvent::Error), Ok(MachineState::Error));
        assert!(lc.transition(LifecycleEvent::Reset).is_err());
        assert!(lc.transition(LifecycleEvent::Terminate).is_err());
        assert_eq!(lc.state(), MachineState::Error);

        assert_eq!(lc.transition(LifecycleEvent::Fatal), Ok(MachineState::Fatal));
        assert!(lc.transition(LifecycleEvent::Error).is_err());
        assert!(lc.transition(LifecycleEvent::Reset).is_err());
        assert_eq!(lc.state(), MachineState::Fatal);
    }

    #[test]
    fn test_cancel_from_step_completed() {
        let mut lc = Lifecycle::new();
        lc.transition(LifecycleEvent::EnterInitializationMode).unwrap();
        lc.transition(LifecycleEvent::ExitInitializationMode).unwrap();
        assert_eq!(
            lc.transition(LifecycleEvent::StepCanceled),
            Ok(MachineState::StepCanceled)
        );
        assert_eq!(lc.transition(LifecycleEvent::Terminate), Ok(MachineState::Terminated));
        assert!(lc.transition(LifecycleEvent::EnterInitializationMode).is_err());
    }
}
