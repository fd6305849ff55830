//! Sets, indexed components, and per-element suffix data.

use conic_expr::Expr;
use conic_tests::prelude::*;
use pretty_assertions::assert_eq;

/// Production model: `Σ_j a[i][j]·x[j] <= b[i]` for each resource `i`.
fn production_model() -> Model {
    let mut model = Model::new("production");
    model
        .add_set(IndexSet::new("J").with_members(["Widget", "Gadget"]))
        .unwrap();
    model
        .add_set(IndexSet::new("I").with_members(["Steel", "Film", "Labor"]))
        .unwrap();
    let x = model.add_indexed_var("x", "J", Domain::NonNegativeReals).unwrap();

    let usage = |resource: &Member, product: &str| -> f64 {
        match (resource.to_string().as_str(), product) {
            ("Steel", "Widget") => 2.0,
            ("Steel", "Gadget") => 1.0,
            ("Film", "Widget") => 1.0,
            ("Film", "Gadget") => 3.0,
            _ => 1.0,
        }
    };
    let capacity = |resource: &Member| -> f64 {
        match resource.to_string().as_str() {
            "Steel" => 8.0,
            "Film" => 9.0,
            _ => 4.0,
        }
    };

    model
        .add_indexed_constraint("AxbConstraint", "I", |resource| {
            let lhs = Expr::sum(x.iter().map(|(product, var)| {
                usage(resource, &product.to_string()) * var.expr()
            }));
            Ok(Some(lhs.le(capacity(resource))))
        })
        .unwrap();
    model
}

#[test]
fn test_indexed_constraint_elements_follow_set_order() {
    let model = production_model();

    let axb = model.indexed_constraint("AxbConstraint").unwrap();

    let names: Vec<String> = axb
        .values()
        .map(|id| model.constraint_by_id(*id).unwrap().name.clone())
        .collect();
    assert_eq!(
        names,
        vec!["AxbConstraint[Steel]", "AxbConstraint[Film]", "AxbConstraint[Labor]"]
    );
    assert_eq!(
        model.constraint_at("AxbConstraint", "Film").unwrap().constraint.to_string(),
        "1*x[Widget] + 3*x[Gadget] <= 9"
    );
}

#[test]
fn test_duals_per_element_through_import_suffix() {
    // GIVEN - a solver filled the dual suffix for the binding rows
    let mut model = production_model();
    model.add_suffix("dual", SuffixDirection::Import).unwrap();
    let steel = model.constraint_at("AxbConstraint", "Steel").unwrap().id;
    let film = model.constraint_at("AxbConstraint", "Film").unwrap().id;
    {
        let dual = model.suffix_mut("dual").unwrap();
        dual.set(steel, 0.4);
        dual.set(film, 0.2);
    }

    // WHEN - walk every active indexed constraint and read each element's dual
    let dual = model.suffix("dual").unwrap();
    let mut report = Vec::new();
    for c in model.indexed_constraints() {
        for (index, id) in c.iter() {
            if model.constraint_by_id(*id).is_some_and(|data| data.active) {
                report.push((c.name().to_string(), index.to_string(), dual.get(*id)));
            }
        }
    }

    // THEN
    assert_eq!(
        report,
        vec![
            ("AxbConstraint".to_string(), "Steel".to_string(), Some(0.4)),
            ("AxbConstraint".to_string(), "Film".to_string(), Some(0.2)),
            ("AxbConstraint".to_string(), "Labor".to_string(), None),
        ]
    );
    let film_row = model.constraint_at("AxbConstraint", "Film").unwrap();
    assert_eq!(dual.get(film_row.id), Some(0.2));
}

#[test]
fn test_deactivated_element_is_skipped() {
    let mut model = production_model();
    model.deactivate("AxbConstraint[Labor]").unwrap();
    let x = model.indexed_var("x").unwrap().clone();
    let point = Assignment::new()
        .with(x.get("Widget").unwrap(), 3.0)
        .with(x.get("Gadget").unwrap(), 2.0);

    // Steel 8 <= 8 and Film 9 <= 9 hold; Labor would need 5 <= 4
    let violations = model.check_assignment(&point).unwrap();

    assert!(violations.is_empty());
    assert_eq!(model.active_constraints().count(), 2);

    model.activate("AxbConstraint[Labor]").unwrap();
    let violations = model.check_assignment(&point).unwrap();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations.all()[0].constraint_name, "AxbConstraint[Labor]");
}

#[test]
fn test_cone_per_member() {
    // GIVEN - one cone ‖(x[k], y[k])‖ <= z[k] per period
    let mut model = Model::new("periods");
    model
        .add_set(IndexSet::sorted("K").with_members([3, 1, 2]))
        .unwrap();
    let x = model.add_indexed_var("x", "K", Domain::Reals).unwrap();
    let y = model.add_indexed_var("y", "K", Domain::Reals).unwrap();
    let z = model.add_indexed_var("z", "K", Domain::NonNegativeReals).unwrap();

    // WHEN
    let cones = model
        .add_indexed_constraint("soc", "K", |k| {
            let point = Point3::new(
                x.get(k).unwrap().clone(),
                y.get(k).unwrap().clone(),
                z.get(k).unwrap().clone(),
            );
            Ok(Some(SecondOrderCone::new(&point)?))
        })
        .unwrap();

    // THEN
    let members: Vec<String> = cones.members().map(|m| m.to_string()).collect();
    assert_eq!(members, vec!["1", "2", "3"]);
    assert_eq!(model.conic_constraints().count(), 3);
    assert_eq!(
        model.constraint_at("soc", 2).unwrap().constraint.to_string(),
        "x[2]^2 + y[2]^2 <= z[2]^2"
    );

    // (3, 4, 5) in every period except period 2, which gets z = 4
    let mut point = Assignment::new();
    for k in 1..=3 {
        point.insert(x.get(k).unwrap().id(), 3.0);
        point.insert(y.get(k).unwrap().id(), 4.0);
        point.insert(z.get(k).unwrap().id(), if k == 2 { 4.0 } else { 5.0 });
    }
    let violations = model.check_assignment(&point).unwrap();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations.all()[0].constraint_name, "soc[2]");
}

#[test]
fn test_untagged_bound_in_one_member_registers_nothing() {
    let mut model = Model::new("m");
    model.add_set(IndexSet::new("K").with_members([1, 2])).unwrap();
    let x = model.add_indexed_var("x", "K", Domain::Reals).unwrap();

    let err = model
        .add_indexed_constraint("soc", "K", |k| {
            let v = x.get(k).unwrap().clone();
            Ok(Some(SecondOrderCone::new(&Point3::new(v.clone(), v.clone(), v))?))
        })
        .unwrap_err();

    assert!(err.is_precondition());
    assert_eq!(model.constraint_count(), 0);
}

#[test]
fn test_model_data_declares_indexed_variables() {
    let data = ModelData::from_json(
        r#"{
            "sets": [{ "name": "K", "ordering": "Sorted", "members": [2, 1] }],
            "vars": [
                { "name": "x", "index": "K" },
                { "name": "z", "domain": "NonNegativeReals", "index": "K", "value": 5.0 }
            ]
        }"#,
    )
    .unwrap();
    let mut model = Model::new("loaded");

    model.load(&data).unwrap();

    assert_eq!(model.set("K").unwrap().first().unwrap(), &Member::Int(1));
    let z1 = model.var_at("z", 1).unwrap();
    assert_eq!(z1.name(), "z[1]");
    assert_eq!(model.value(&z1).unwrap(), Some(5.0));
    let point = Point3::new(model.var_at("x", 1).unwrap(), model.var_at("x", 2).unwrap(), z1);
    assert!(model.add_second_order_cone("soc", &point).is_ok());
}
