// crates/fmu-rs/src/lifecycle/mod.rs

mod events;
mod gate;
mod state_machine;
mod states;

pub use events::LifecycleEvent;
pub use gate::is_set_allowed;
pub use state_machine::Lifecycle;
pub use states::MachineState;
