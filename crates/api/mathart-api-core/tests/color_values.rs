use approx::assert_relative_eq;
use mathart_api_core::{parse_value, value_to_json, Color, ColorSystem, Value};
use serde_json::json;

fn mk_color(literal: &str) -> Color {
    literal.parse().expect("valid colour literal")
}

#[test]
fn midpoint_of_black_and_rgb_is_reencoded_as_rgba() {
    let start = mk_color("rgb(0,0,0)");
    let end = mk_color("rgb(100,200,50)");
    let mid = start.lerp(&end, 0.5);
    assert_eq!(mid.to_string(), "rgba(50, 100, 25, 1)");
    assert_eq!(mid.system(), ColorSystem::Rgb);
}

#[test]
fn lerp_endpoints_are_exact() {
    let start = mk_color("hsla(10, 20%, 30%, 0.4)");
    let end = mk_color("hsla(200, 80%, 60%, 1)");
    assert_eq!(start.lerp(&end, 0.0), start);
    assert_eq!(start.lerp(&end, 1.0), end);
}

#[test]
fn mixed_systems_interpolate_in_start_system() {
    let start = mk_color("hsl(0, 0%, 0%)");
    let end = mk_color("rgb(100, 50, 20)");
    let mid = start.lerp(&end, 0.5);
    assert_eq!(mid.system(), ColorSystem::Hsl);
    assert_eq!(mid.channels(), [50.0, 25.0, 10.0, 1.0]);
}

#[test]
fn colour_values_serialize_as_literals() {
    let v = parse_value(json!(["rgba(1, 2, 3, 0.5)", "hsl(120, 50%, 50%)"])).unwrap();
    assert_eq!(
        value_to_json(&v),
        json!(["rgba(1, 2, 3, 0.5)", "hsla(120, 50%, 50%, 1)"])
    );
    let back: Value = serde_json::from_value(value_to_json(&v)).unwrap();
    assert_eq!(back, v);
}

#[test]
fn luma_thresholds() {
    assert!(mk_color("#ffffff").luma() >= 0.5);
    assert!(mk_color("#202020").luma() < 0.5);
    assert_relative_eq!(mk_color("hsl(0, 0%, 100%)").luma(), 1.0);
}
