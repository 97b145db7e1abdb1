// crates/fmu-rs/src/lifecycle/events.rs

/// Defines events that can trigger a transition of the component lifecycle.
///
/// Each corresponds to an FMI entry point or to the outcome of one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    /// Corresponds to `fmi2EnterInitializationMode`.
    EnterInitializationMode,
    /// Corresponds to `fmi2ExitInitializationMode`.
    ExitInitializationMode,
    /// `fmi2DoStep` was entered.
    StepStarted,
    /// The step finished successfully.
    StepFinished,
    /// The step returned an error.
    StepFailed,
    /// Corresponds to `fmi2CancelStep`.
    StepCanceled,
    /// Corresponds to `fmi2Terminate`.
    Terminate,
    /// Corresponds to `fmi2Reset`.
    Reset,
    /// A recoverable error was reported.
    Error,
    /// An unrecoverable error was reported.
    Fatal,
}
