//! Feasibility checking of whole models.

use conic_tests::prelude::*;
use pretty_assertions::assert_eq;

#[test]
fn test_boundary_point_is_feasible() {
    let mut f = ConeFixture::new(Domain::NonNegativeReals);
    f.model.add_second_order_cone("soc", &f.point).unwrap();

    let violations = f.model.check_assignment(&f.at(3.0, 4.0, 5.0)).unwrap();

    assert!(violations.is_empty());
}

#[test]
fn test_interior_and_exterior_points() {
    let mut f = ConeFixture::new(Domain::NonNegativeReals);
    f.model.add_second_order_cone("soc", &f.point).unwrap();

    assert!(f.model.check_assignment(&f.at(0.0, 0.0, 1.0)).unwrap().is_empty());

    let violations = f.model.check_assignment(&f.at(1.0, 1.0, 1.0)).unwrap();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations.all()[0].severity, ViolationSeverity::Error);
    assert_eq!(violations.all()[0].residual, 1.0);
}

#[test]
fn test_negative_z_reported_against_domain() {
    // GIVEN - x^2 + y^2 <= z^2 also holds for z = -5, only the domain rejects it
    let mut f = ConeFixture::new(Domain::NonNegativeReals);
    f.model.add_second_order_cone("soc", &f.point).unwrap();

    // WHEN
    let violations = f.model.check_assignment(&f.at(3.0, 4.0, -5.0)).unwrap();

    // THEN
    assert_eq!(violations.len(), 1);
    let v = &violations.all()[0];
    assert_eq!(v.constraint_name, "z");
    assert_eq!(v.var_id, Some(f.point.z.id()));
    assert_eq!(v.residual, 5.0);
}

#[test]
fn test_tolerance_turns_tiny_violation_into_warning() {
    let config = ModelConfig::default().with_feasibility_tolerance(1e-3);
    let mut f = ConeFixture::with_config(Domain::NonNegativeReals, config);
    f.model.add_second_order_cone("soc", &f.point).unwrap();

    let violations = f.model.check_assignment(&f.at(3.0, 4.0, 4.99999)).unwrap();

    assert!(violations.has_only_warnings());
}

#[test]
fn test_strict_config_rejects_tiny_violation() {
    let mut f = ConeFixture::with_config(Domain::NonNegativeReals, ModelConfig::strict());
    f.model.add_second_order_cone("soc", &f.point).unwrap();

    let violations = f.model.check_assignment(&f.at(3.0, 4.0, 4.99999)).unwrap();

    assert!(violations.has_errors());
}

#[test]
fn test_unassigned_variable_is_an_error() {
    let mut f = ConeFixture::new(Domain::NonNegativeReals);
    f.model.add_second_order_cone("soc", &f.point).unwrap();
    f.model.set_value(&f.point.x, 1.0).unwrap();

    let err = f.model.check().unwrap_err();

    assert!(matches!(err, ModelError::Constraint(ConstraintError::Expr(_))));
}

#[test]
fn test_duals_round_trip_through_suffix() {
    let mut f = ConeFixture::new(Domain::NonNegativeReals);
    let soc = f.model.add_second_order_cone("soc", &f.point).unwrap();
    f.model.add_suffix("dual", SuffixDirection::Import).unwrap();

    f.model.suffix_mut("dual").unwrap().set(soc, 0.5);

    let duals: Vec<_> = f
        .model
        .active_constraints()
        .map(|c| (c.name.clone(), f.model.suffix("dual").unwrap().get(c.id)))
        .collect();
    assert_eq!(duals, vec![("soc".to_string(), Some(0.5))]);
}

#[test]
fn test_config_from_json_drives_checking() {
    let config = ModelConfig::from_json(r#"{ "feasibility_tolerance": 0.0 }"#).unwrap();
    let mut f = ConeFixture::with_config(Domain::NonNegativeReals, config);
    f.model.add_second_order_cone("soc", &f.point).unwrap();

    assert!(f.model.check_assignment(&f.at(3.0, 4.0, 5.0)).unwrap().is_empty());
}
