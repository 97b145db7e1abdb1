// crates/fmu-rs/src/lifecycle/states.rs

/// The lifecycle states of an FMI 2.0 component.
/// (Reference: FMI 2.0.2, Section 4.2.4, Figure 10)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MachineState {
    /// After `fmi2Instantiate`; start values and parameters may be set.
    #[default]
    Instantiated,
    /// Between `fmi2EnterInitializationMode` and `fmi2ExitInitializationMode`.
    InitializationMode,
    /// A communication step finished; the master may read outputs and set inputs.
    StepCompleted,
    /// `fmi2DoStep` has not returned yet.
    StepInProgress,
    /// The last step failed; only termination is meaningful.
    StepFailed,
    /// The last step was canceled by the master.
    StepCanceled,
    /// After `fmi2Terminate`.
    Terminated,
    /// A recoverable error occurred; the component must be reset or freed.
    Error,
    /// An unrecoverable error occurred; the component must be freed.
    Fatal,

    // --- ModelExchange-only states (unreachable for co-simulation) ---
    /// ModelExchange event mode.
    EventMode,
    /// ModelExchange continuous-time mode.
    ContinuousTimeMode,

    /// Not a runtime state. Used to ask whether a variable is settable in
    /// *some* state without naming one.
    AnySettable,
}

impl MachineState {
    /// `true` for `Error` and `Fatal`.
    pub fn is_failed(&self) -> bool {
        matches!(self, MachineState::Error | MachineState::Fatal)
    }
}
