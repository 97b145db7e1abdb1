use super::StepModel;
use super::config::{DefaultExperiment, ModelInfo};
use crate::lifecycle::{Lifecycle, LifecycleEvent, MachineState, is_set_allowed};
use crate::log::{InstanceContext, LogCategories, LoggerCallback, my_debug, my_error, my_info, my_trace, my_warn};
use crate::registry::{VariableDefinition, VariableRegistry};
use crate::types::{FmuType, Status, ValueReference};
use crate::units::{UnitCatalog, UnitDefinition};
use crate::variable::{Causality, ScalarValue, Variability, VariableBinding, VariableDescriptor};
use crate::FmuError;
use alloc::boxed::Box;
use alloc::format;
use alloc::rc::Rc;
use alloc::string::{String, ToString};
use core::cell::Cell;

/// Name of the independent variable every component exposes.
pub const TIME_VARIABLE: &str = "time";

/// Relative tolerance when comparing the master's communication point
/// against the component's own clock.
const TIME_TOLERANCE: f64 = 1e-9;

/// A co-simulation slave: the variables of one model instance, its
/// lifecycle and its simulation clock.
pub struct Component {
    context: InstanceContext,
    info: ModelInfo,
    default_experiment: DefaultExperiment,
    fmu_type: FmuType,
    registry: VariableRegistry,
    lifecycle: Lifecycle,
    time: Rc<Cell<f64>>,
    start_time: f64,
    stop_time: Option<f64>,
    log_categories: LogCategories,
    debug_logging: bool,
    logger: Option<LoggerCallback>,
    model: Box<dyn StepModel>,
}

impl Component {
    /// Creates a component in `Instantiated` and registers the `time`
    /// variable.
    ///
    /// `catalog` supplies the units variables may name without defining
    /// them first.
    pub fn new(
        instance_name: impl Into<String>,
        info: ModelInfo,
        fmu_type: FmuType,
        catalog: UnitCatalog,
        model: impl StepModel + 'static,
    ) -> Result<Self, FmuError> {
        let context = InstanceContext {
            model_identifier: info.model_identifier.clone(),
            instance_name: instance_name.into(),
        };
        my_info!(context, "Instantiating {:?} component", fmu_type);

        let mut registry = VariableRegistry::new(catalog);
        registry.units_mut().define(UnitDefinition::new("s").s(1));

        let time = Rc::new(Cell::new(0.0));
        let clock = Rc::clone(&time);
        registry.register(
            VariableDefinition::new(TIME_VARIABLE, Causality::Independent, Variability::Continuous)
                .unit("s")
                .description("Simulation time"),
            VariableBinding::read_only(move || clock.get()),
        )?;

        Ok(Self {
            context,
            info,
            default_experiment: DefaultExperiment::default(),
            fmu_type,
            registry,
            lifecycle: Lifecycle::new(),
            time,
            start_time: 0.0,
            stop_time: None,
            log_categories: LogCategories::default(),
            debug_logging: false,
            logger: None,
            model: Box::new(model),
        })
    }

    // --- Configuration ---

    pub fn instance_name(&self) -> &str {
        &self.context.instance_name
    }

    pub fn info(&self) -> &ModelInfo {
        &self.info
    }

    pub fn fmu_type(&self) -> FmuType {
        self.fmu_type
    }

    pub fn default_experiment(&self) -> &DefaultExperiment {
        &self.default_experiment
    }

    pub fn set_default_experiment(&mut self, experiment: DefaultExperiment) {
        self.default_experiment = experiment;
    }

    pub fn log_categories(&self) -> &LogCategories {
        &self.log_categories
    }

    /// Declares an additional, model-specific log category.
    pub fn add_log_category(&mut self, name: impl Into<String>, description: impl Into<String>) {
        self.log_categories.add(name, description);
    }

    pub fn registry(&self) -> &VariableRegistry {
        &self.registry
    }

    /// Adds or replaces a unit in the component's unit table.
    pub fn define_unit(&mut self, unit: UnitDefinition) {
        self.registry.units_mut().define(unit);
    }

    /// Registers a model variable. See [`VariableRegistry::register`].
    pub fn register_variable(
        &mut self,
        definition: VariableDefinition,
        binding: VariableBinding,
    ) -> Result<&VariableDescriptor, FmuError> {
        self.registry.register(definition, binding)
    }

    /// Points an existing variable at new storage.
    pub fn rebind_variable(&mut self, name: &str, binding: VariableBinding) -> bool {
        self.registry.rebind(binding, name)
    }

    pub fn state(&self) -> MachineState {
        self.lifecycle.state()
    }

    /// Current simulation time.
    pub fn time(&self) -> f64 {
        self.time.get()
    }

    // --- Logging ---

    /// Installs the host's log sink.
    pub fn set_logger(&mut self, logger: LoggerCallback) {
        self.logger = Some(logger);
    }

    /// Turns debug logging on or off for `categories` (all if empty).
    /// An unknown category rejects the whole call and changes nothing.
    pub fn set_debug_logging(&mut self, on: bool, categories: &[&str]) -> Status {
        match self.log_categories.set_enabled(categories, on) {
            Ok(()) => {
                self.debug_logging = on;
                Status::Ok
            }
            Err(e) => self.report(Status::Error, &e),
        }
    }

    /// Logs a message to the `log` facade and, when debug logging is on and
    /// the category is enabled, to the host's logger.
    pub fn log_message(&mut self, status: Status, category: &str, message: &str) {
        match status {
            Status::Ok | Status::Pending => my_debug!(self.context, "{}: {}", category, message),
            Status::Warning | Status::Discard => my_warn!(self.context, "{}: {}", category, message),
            Status::Error | Status::Fatal => my_error!(self.context, "{}: {}", category, message),
        }

        let enabled = self.log_categories.is_enabled(category) || self.log_categories.is_enabled("logAll");
        if !self.debug_logging || !enabled {
            return;
        }
        if let Some(logger) = self.logger.as_mut() {
            logger(&self.context.instance_name, status, category, message);
        }
    }

    fn report(&mut self, status: Status, error: &FmuError) -> Status {
        let message = error.to_string();
        self.log_message(status, status.log_category(), &message);
        status
    }

    fn apply(&mut self, event: LifecycleEvent) -> Status {
        match self.lifecycle.transition(event) {
            Ok(_) => Status::Ok,
            Err(e) => self.report(Status::Error, &e),
        }
    }

    // --- Lifecycle ---

    /// Sets the start time (and optionally the stop time) of the run.
    /// Only legal in `Instantiated`.
    pub fn setup_experiment(&mut self, tolerance: Option<f64>, start_time: f64, stop_time: Option<f64>) -> Status {
        if self.state() != MachineState::Instantiated {
            let message = format!("setup_experiment is not allowed in state {:?}", self.state());
            self.log_message(Status::Error, Status::Error.log_category(), &message);
            return Status::Error;
        }
        if let Some(tol) = tolerance {
            my_debug!(self.context, "Ignoring tolerance {} for a fixed-step slave", tol);
        }
        self.start_time = start_time;
        self.stop_time = stop_time;
        self.time.set(start_time);
        Status::Ok
    }

    pub fn enter_initialization_mode(&mut self) -> Status {
        self.apply(LifecycleEvent::EnterInitializationMode)
    }

    pub fn exit_initialization_mode(&mut self) -> Status {
        self.apply(LifecycleEvent::ExitInitializationMode)
    }

    /// Advances the model from `current_communication_point` by `step_size`.
    ///
    /// A communication point that does not match the component's clock is
    /// logged and stepping continues from the component's own time.
    pub fn do_step(&mut self, current_communication_point: f64, step_size: f64) -> Status {
        if step_size <= 0.0 || step_size.is_nan() {
            let message = format!("Step size must be positive, got {}", step_size);
            self.log_message(Status::Error, Status::Error.log_category(), &message);
            return Status::Error;
        }

        let time = self.time.get();
        if let Some(stop) = self.stop_time {
            if time + step_size > stop + TIME_TOLERANCE * step_size {
                let message = format!("Step to {} would pass the stop time {}", time + step_size, stop);
                self.log_message(Status::Error, Status::Error.log_category(), &message);
                return Status::Error;
            }
        }

        let status = self.apply(LifecycleEvent::StepStarted);
        if status != Status::Ok {
            return status;
        }

        let drift = current_communication_point - time;
        let bound = TIME_TOLERANCE * if step_size > 1.0 { step_size } else { 1.0 };
        if drift > bound || drift < -bound {
            let message = format!(
                "Communication point {} does not match component time {}",
                current_communication_point, time
            );
            self.log_message(Status::Warning, Status::Warning.log_category(), &message);
        }

        match self.model.do_step(time, step_size) {
            Ok(()) => {
                self.time.set(time + step_size);
                my_trace!(self.context, "Step completed, t={}", self.time.get());
                self.apply(LifecycleEvent::StepFinished)
            }
            Err(e) => {
                let status = self.report(Status::Error, &e);
                status.max(self.apply(LifecycleEvent::StepFailed))
            }
        }
    }

    /// Cancels the running or most recent step.
    pub fn cancel_step(&mut self) -> Status {
        self.apply(LifecycleEvent::StepCanceled)
    }

    pub fn terminate(&mut self) -> Status {
        self.apply(LifecycleEvent::Terminate)
    }

    /// Returns the component to `Instantiated` and rewinds the clock to the
    /// start time. Bound variables keep their values.
    pub fn reset(&mut self) -> Status {
        let status = self.apply(LifecycleEvent::Reset);
        if status == Status::Ok {
            self.time.set(self.start_time);
        }
        status
    }

    // --- Variable access ---

    /// Reads the variables `vrs` of type `T` into `out`.
    ///
    /// Stops at the first unknown reference and returns `Status::Error`;
    /// entries before it are already filled.
    pub fn get_variable<T: ScalarValue>(&mut self, vrs: &[ValueReference], out: &mut [T]) -> Status {
        if vrs.len() != out.len() {
            let message = format!("{} value references but {} output slots", vrs.len(), out.len());
            self.log_message(Status::Error, Status::Error.log_category(), &message);
            return Status::Error;
        }
        for (vr, slot) in vrs.iter().zip(out.iter_mut()) {
            match self.read_one::<T>(*vr) {
                Ok(value) => *slot = value,
                Err(e) => return self.report(Status::Error, &e),
            }
        }
        Status::Ok
    }

    /// Writes `values` to the variables `vrs` of type `T`.
    ///
    /// Each write is checked against the set-gate for the current state.
    /// Stops at the first rejected element and returns `Status::Error`;
    /// writes before it are not rolled back.
    pub fn set_variable<T: ScalarValue>(&mut self, vrs: &[ValueReference], values: &[T]) -> Status {
        if vrs.len() != values.len() {
            let message = format!("{} value references but {} values", vrs.len(), values.len());
            self.log_message(Status::Error, Status::Error.log_category(), &message);
            return Status::Error;
        }
        for (vr, value) in vrs.iter().zip(values) {
            if let Err(e) = self.write_one(*vr, value.clone()) {
                return self.report(Status::Error, &e);
            }
        }
        Status::Ok
    }

    fn read_one<T: ScalarValue>(&self, vr: ValueReference) -> Result<T, FmuError> {
        let var = self
            .registry
            .find_by_reference(vr, T::VALUE_TYPE)
            .ok_or(FmuError::UnknownVariable {
                value_type: T::VALUE_TYPE,
                value_reference: vr,
            })?;
        var.binding().get::<T>()
    }

    fn write_one<T: ScalarValue>(&mut self, vr: ValueReference, value: T) -> Result<(), FmuError> {
        let state = self.lifecycle.state();
        let var = self
            .registry
            .find_by_reference_mut(vr, T::VALUE_TYPE)
            .ok_or(FmuError::UnknownVariable {
                value_type: T::VALUE_TYPE,
                value_reference: vr,
            })?;
        if !is_set_allowed(var.descriptor(), self.fmu_type, state) {
            return Err(FmuError::NotSettable {
                name: var.descriptor().name().to_string(),
                state,
            });
        }
        my_trace!(
            self.context,
            "Set '{}' = {}",
            var.descriptor().name(),
            value.clone().into_value().to_xml_string()
        );
        var.binding_mut().set(value)
    }
}
