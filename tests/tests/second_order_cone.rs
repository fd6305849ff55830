//! Second-order cone construction and registration.

use conic_tests::prelude::*;
use pretty_assertions::assert_eq;

mod construction {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tagged_z_yields_sum_of_squares_inequality() {
        // GIVEN
        let f = ConeFixture::new(Domain::NonNegativeReals);

        // WHEN
        let cone = SecondOrderCone::new(&f.point).unwrap();

        // THEN
        let c = cone.constraint();
        let (x, y, z) = (&f.point.x, &f.point.y, &f.point.z);
        assert_eq!(c.lhs(), &(x.square() + y.square()));
        assert_eq!(c.rhs(), &z.square());
        assert_eq!(c.op(), RelOp::LessEq);
        assert_eq!(c.kind(), ConstraintKind::SecondOrderCone);
        assert!(c.is_convex());
    }

    #[test]
    fn test_untagged_z_is_precondition_violation() {
        let f = ConeFixture::new(Domain::Reals);

        let err = SecondOrderCone::new(&f.point).unwrap_err();

        assert!(matches!(err, ConstraintError::PreconditionViolation { .. }));
    }

    #[test]
    fn test_three_four_five() {
        // GIVEN
        let f = ConeFixture::new(Domain::NonNegativeReals);
        let cone = SecondOrderCone::new(&f.point).unwrap();
        let assignment = f.at(3.0, 4.0, 5.0);

        // WHEN
        let evaluator = Evaluator::new(&assignment);
        let lhs = evaluator.eval(cone.constraint().lhs()).unwrap();
        let rhs = evaluator.eval(cone.constraint().rhs()).unwrap();

        // THEN - 25 <= 25
        assert_eq!((lhs, rhs), (25.0, 25.0));
        assert!(cone.constraint().relation().holds(&evaluator).unwrap());
    }

    /// Any type exposing x, y, z works as a point.
    struct Named {
        horizontal: VarRef,
        vertical: VarRef,
        radius: VarRef,
    }

    impl ConePoint for Named {
        fn x(&self) -> &VarRef {
            &self.horizontal
        }

        fn y(&self) -> &VarRef {
            &self.vertical
        }

        fn z(&self) -> &VarRef {
            &self.radius
        }
    }

    #[test]
    fn test_custom_point_type() {
        let mut model = Model::new("custom");
        let point = Named {
            horizontal: model.add_var("h", Domain::Reals).unwrap(),
            vertical: model.add_var("v", Domain::Reals).unwrap(),
            radius: model.add_var("r", Domain::PositiveReals).unwrap(),
        };

        model.add_second_order_cone("disc", &point).unwrap();

        assert_eq!(
            model.constraint("disc").unwrap().constraint.to_string(),
            "h^2 + v^2 <= r^2"
        );
    }
}

mod registration {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_registered_cone_is_active_and_conic() {
        let mut f = ConeFixture::new(Domain::NonNegativeReals);

        let id = f.model.add_second_order_cone("soc", &f.point).unwrap();

        let names: Vec<&str> = f.model.conic_constraints().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["soc"]);
        assert_eq!(f.model.constraint_by_id(id).unwrap().name, "soc");
    }

    #[test]
    fn test_failed_precondition_leaves_model_untouched() {
        let mut f = ConeFixture::new(Domain::Integers);

        let err = f.model.add_second_order_cone("soc", &f.point).unwrap_err();

        assert!(err.is_precondition());
        assert_eq!(f.model.constraint_count(), 0);
    }

    #[test]
    fn test_prebuilt_cone_registers_via_into() {
        let mut f = ConeFixture::new(Domain::NonNegativeReals);
        let cone = SecondOrderCone::new(&f.point).unwrap();

        f.model.add_constraint("soc", cone).unwrap();

        assert!(f.model.constraint("soc").unwrap().constraint.is_conic());
    }
}

mod cone_families {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rotated_cone_in_model() {
        let mut model = Model::new("rotated");
        let r = model.add_var("r", Domain::Reals).unwrap();
        let a = model.add_var("a", Domain::NonNegativeReals).unwrap();
        let b = model.add_var("b", Domain::NonNegativeReals).unwrap();

        let cone = RotatedQuadraticCone::new(&[r.clone()], &a, &b).unwrap();
        model.add_constraint("rq", cone).unwrap();

        let feasible = Assignment::new().with(&r, 2.0).with(&a, 1.0).with(&b, 2.0);
        let infeasible = Assignment::new().with(&r, 3.0).with(&a, 1.0).with(&b, 2.0);
        assert!(model.check_assignment(&feasible).unwrap().is_empty());
        assert!(model.check_assignment(&infeasible).unwrap().has_errors());
    }

    #[test]
    fn test_quadratic_cone_untagged_bound() {
        let mut model = Model::new("q");
        let r = model.add_var("r", Domain::Reals).unwrap();
        let t = model.add_var("t", Domain::NonPositiveReals).unwrap();

        let err = QuadraticCone::new(&[r], &t).unwrap_err();

        assert!(err.is_precondition());
    }
}
