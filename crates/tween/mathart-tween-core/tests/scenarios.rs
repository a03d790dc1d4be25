use std::rc::Rc;

use approx::assert_relative_eq;
use mathart_tween_core::{
    interpolate_continuous, interpolate_stepped, Color, Config, Generator, LayerState,
    NominalPlan, PropertyBag, PropertySchema, Snapshot, TweenSession, Value,
};

fn mk_flags(bits: &[u8]) -> Vec<Value> {
    bits.iter().map(|b| Value::Flag(*b == 1)).collect()
}

fn mk_point_generator(x: f64, y: f64) -> PropertyBag {
    PropertyBag::new(PropertySchema::new().with_xy("x", "y"))
        .with_value("x", x)
        .with_value("y", y)
}

fn number(generator: &PropertyBag, name: &str) -> f64 {
    generator
        .property(name)
        .and_then(Value::as_number)
        .unwrap_or(f64::NAN)
}

#[test]
fn continuous_scalar_at_quarter() {
    let v = interpolate_continuous(&Value::Number(10.0), &Value::Number(20.0), 0.25, false);
    assert_eq!(v, Value::Number(12.5));
}

#[test]
fn stepped_scalar_growing_and_shrinking() {
    let up = interpolate_stepped(&Value::Number(2.0), &Value::Number(10.0), 0.5, false);
    assert_eq!(up, Value::Number(6.0));
    let down = interpolate_stepped(&Value::Number(10.0), &Value::Number(2.0), 0.5, false);
    assert_eq!(down, Value::Number(6.0));
}

#[test]
fn nominal_growing_array_plan() {
    let start = mk_flags(&[1, 0, 0]);
    let end = mk_flags(&[0, 1, 1, 1]);
    let plan = NominalPlan::new(&start, &end);
    assert_eq!(plan.num_add, 1);
    assert_eq!(plan.num_delete, 0);
    assert_eq!(plan.to_set, vec![1, 2]);
    assert_eq!(plan.to_clear, vec![0]);
    assert_eq!(plan.steps(), 4);

    // one edit applied: the first flag switched on
    let one = plan.apply_steps(&start, &end, 1, false, false);
    assert_eq!(one, mk_flags(&[1, 1, 0]));
    // looping applies the insertion before any flips
    let one_looping = plan.apply_steps(&start, &end, 1, true, false);
    assert_eq!(one_looping, mk_flags(&[1, 0, 0, 1]));
}

#[test]
fn xy_loop_follows_arc_and_closes() {
    let mut generator = mk_point_generator(0.0, 0.0);
    let mut state = LayerState::default();
    let start = Rc::new(Snapshot::capture(&generator, &state));
    generator.set_property("x", Value::Number(10.0));
    let schema = generator.schema().clone();
    let mut session = TweenSession::new(schema, start, 800.0, 600.0, Config::default());
    session.capture_end(&generator, &mut state);

    session.compute_frame(&mut generator, 1.0, true);
    assert_eq!(generator.property("x"), Some(&Value::Number(0.0)));
    assert_eq!(generator.property("y"), Some(&Value::Number(0.0)));

    for t in [0.6, 0.7, 0.75] {
        session.compute_frame(&mut generator, t, true);
        let (x, y) = (number(&generator, "x"), number(&generator, "y"));
        assert_relative_eq!((x - 7.5).hypot(y), 2.5, epsilon = 1e-9);
    }
    for t in [0.8, 0.9] {
        session.compute_frame(&mut generator, t, true);
        let (x, y) = (number(&generator, "x"), number(&generator, "y"));
        assert_relative_eq!((x - 2.5).hypot(y), 2.5, epsilon = 1e-9);
    }

    // outbound half is a straight line
    session.compute_frame(&mut generator, 0.25, true);
    assert_eq!(generator.property("x"), Some(&Value::Number(5.0)));
}

#[test]
fn colour_midpoint_literal() {
    let start = Value::Color("rgb(0,0,0)".parse::<Color>().unwrap());
    let end = Value::Color("rgb(100,200,50)".parse::<Color>().unwrap());
    let mid = interpolate_continuous(&start, &end, 0.5, false);
    match mid {
        Value::Color(c) => assert_eq!(c.to_string(), "rgba(50, 100, 25, 1)"),
        other => panic!("expected a colour, got {other:?}"),
    }
}
