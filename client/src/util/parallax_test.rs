use super::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn hero_at_rest() {
    let t = hero_transforms(0.0);
    assert!(close(t.illustration_y, 0.0));
    assert!(close(t.background_scale, 1.0));
    assert!(close(t.content_opacity, 1.0));
}

#[test]
fn hero_rates() {
    let t = hero_transforms(100.0);
    assert!(close(t.illustration_y, 30.0));
    assert!(close(t.background_y, 50.0));
    assert!(close(t.background_scale, 1.05));
    assert!(close(t.content_opacity, 0.5));
}

#[test]
fn hero_opacity_clamps_at_zero() {
    assert!(close(hero_transforms(200.0).content_opacity, 0.0));
    assert!(close(hero_transforms(1000.0).content_opacity, 0.0));
}

#[test]
fn negative_scroll_is_treated_as_zero() {
    assert_eq!(hero_transforms(-40.0), hero_transforms(0.0));
}

#[test]
fn css_strings() {
    let t = hero_transforms(0.0);
    assert_eq!(t.illustration_css(), "translateY(0px)");
    assert_eq!(t.background_css(), "translateY(0px) scale(1)");
}

#[test]
fn layer_speed_defaults_to_one() {
    assert!(close(layer_speed(None), 1.0));
    assert!(close(layer_speed(Some("fast")), 1.0));
    assert!(close(layer_speed(Some("0")), 1.0));
    assert!(close(layer_speed(Some(" 0.5 ")), 0.5));
}

#[test]
fn pointer_offset_is_zero_at_center_and_scales_to_edges() {
    assert_eq!(layer_pointer_offset(100.0, 50.0, 200.0, 100.0, 1.0), (0.0, 0.0));
    let (dx, dy) = layer_pointer_offset(200.0, 0.0, 200.0, 100.0, 2.0);
    assert!(close(dx, 40.0));
    assert!(close(dy, -40.0));
    assert_eq!(layer_pointer_offset(5.0, 5.0, 0.0, 0.0, 1.0), (0.0, 0.0));
}

#[test]
fn scroll_offset_moves_layers_up() {
    assert!(close(layer_scroll_offset(100.0, 2.0), -60.0));
}
