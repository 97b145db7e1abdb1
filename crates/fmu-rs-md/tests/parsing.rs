// crates/fmu-rs-md/tests/parsing.rs

use fmu_rs::{Causality, Initial, Value, ValueType, Variability};
use fmu_rs_md::load_model_description_from_str;
use std::fs;
use std::path::PathBuf;

/// Helper function to load a test file from the `tests/data/` directory.
fn load_test_file(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("data");
    path.push(name);

    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read test file {:?}: {}", path, e))
}

#[test]
fn test_load_pendulum_header() {
    let _ = env_logger::builder().is_test(true).try_init();
    let xml = load_test_file("Pendulum.xml");
    let model = load_model_description_from_str(&xml).expect("Failed to parse Pendulum.xml");
    let md = &model.description;

    assert_eq!(md.fmi_version, "2.0");
    assert_eq!(md.info.model_name, "Pendulum");
    assert_eq!(md.info.model_identifier, "Pendulum");
    assert_eq!(md.info.variable_naming_convention, "structured");

    let cs = md.co_simulation.as_ref().expect("CoSimulation element");
    assert!(cs.can_handle_variable_communication_step_size);
    assert_eq!(cs.max_output_derivative_order, 1);
    assert!(!cs.can_get_and_set_fmu_state);

    let de = md.default_experiment.expect("DefaultExperiment element");
    assert_eq!(de.stop_time, 10.0);
    assert_eq!(de.step_size, 0.001);
    assert_eq!(de.tolerance, 0.0);

    assert_eq!(md.units.len(), 6);
    assert_eq!(md.unit("rad/s").unwrap().exponents(), [0, 0, -1, 0, 0, 0, 0, 1]);
    assert_eq!(md.log_categories.len(), 2);
    assert_eq!(md.log_categories[1].description, "");
    assert_eq!(md.outputs, vec![4, 5, 8]);
}

#[test]
fn test_load_pendulum_variables() {
    let xml = load_test_file("Pendulum.xml");
    let md = load_model_description_from_str(&xml).unwrap().description;
    assert_eq!(md.variables.len(), 9);

    let time = md.find_variable("time").unwrap();
    assert_eq!(time.causality(), Causality::Independent);
    assert_eq!(time.unit(), "s");
    assert!(!time.has_start());

    let m = md.find_variable("m").unwrap();
    assert_eq!(m.initial(), Initial::Exact);
    assert_eq!(m.start(), Some(&Value::Real(1.0)));

    let theta_dt = md.find_variable("theta_dt").unwrap();
    assert_eq!(theta_dt.initial(), Initial::Calculated);
    assert_eq!(theta_dt.variability(), Variability::Continuous);

    let x_tt = md.find_variable("x_tt").unwrap();
    assert_eq!(x_tt.causality(), Causality::Input);
    assert_eq!(x_tt.unit(), "1");
    assert_eq!(x_tt.start(), Some(&Value::Real(0.0)));

    let enabled = md.find_variable("visualizer.enabled").unwrap();
    assert_eq!(enabled.value_type(), ValueType::Boolean);
    assert_eq!(enabled.start(), Some(&Value::Boolean(true)));

    // Value references are per type: three different types share vr 1.
    let shared: Vec<_> = md
        .variables
        .iter()
        .filter(|v| v.value_reference() == 1)
        .map(|v| v.value_type())
        .collect();
    assert_eq!(
        shared,
        [ValueType::Real, ValueType::String, ValueType::Integer, ValueType::Boolean]
    );
}

#[test]
fn test_pendulum_namespace_tree() {
    let xml = load_test_file("Pendulum.xml");
    let model = load_model_description_from_str(&xml).unwrap();

    let shape = model.tree.find("visualizer.shape").unwrap();
    let names: Vec<&str> = shape.children().map(|(name, _)| name).collect();
    assert_eq!(names, ["color", "type"]);

    let color = shape.child("color").unwrap().variable().unwrap();
    assert_eq!(model.description.variables[color].name(), "visualizer.shape.color");

    let visualizer = model.tree.find("visualizer").unwrap();
    assert_eq!(visualizer.len(), 2);
    assert_eq!(model.tree.leaves().len(), 9);
}
