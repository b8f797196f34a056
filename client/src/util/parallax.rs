//! Hero parallax effects for the console sections.
//!
//! The math is plain functions of the scroll offset or pointer position; the
//! hydrate-only helpers below push the results into inline styles of the
//! fragment's hero elements.

#[cfg(test)]
#[path = "parallax_test.rs"]
mod parallax_test;

const ILLUSTRATION_RATE: f64 = 0.3;
const BACKGROUND_RATE: f64 = 0.5;
const BACKGROUND_ZOOM_RATE: f64 = 0.0005;
const FADE_DISTANCE: f64 = 200.0;
const LAYER_POINTER_TRAVEL: f64 = 20.0;

/// Styles for the hero block at a given scroll offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeroTransforms {
    pub illustration_y: f64,
    pub background_y: f64,
    pub background_scale: f64,
    pub content_opacity: f64,
}

impl HeroTransforms {
    pub fn illustration_css(&self) -> String {
        format!("translateY({}px)", self.illustration_y)
    }

    pub fn background_css(&self) -> String {
        format!("translateY({}px) scale({})", self.background_y, self.background_scale)
    }
}

pub fn hero_transforms(scroll_top: f64) -> HeroTransforms {
    let scroll = scroll_top.max(0.0);
    HeroTransforms {
        illustration_y: scroll * ILLUSTRATION_RATE,
        background_y: scroll * BACKGROUND_RATE,
        background_scale: 1.0 + scroll * BACKGROUND_ZOOM_RATE,
        content_opacity: (1.0 - scroll / FADE_DISTANCE).max(0.0),
    }
}

/// `data-speed` of a layer; missing, invalid and zero values mean 1.
pub fn layer_speed(attr: Option<&str>) -> f64 {
    attr.and_then(|s| s.trim().parse::<f64>().ok()).filter(|s| s.is_finite() && *s != 0.0).unwrap_or(1.0)
}

/// Offset of a layer for a pointer at (`x`, `y`) inside a `width`×`height`
/// container.
pub fn layer_pointer_offset(x: f64, y: f64, width: f64, height: f64, speed: f64) -> (f64, f64) {
    let cx = width / 2.0;
    let cy = height / 2.0;
    if cx <= 0.0 || cy <= 0.0 {
        return (0.0, 0.0);
    }
    ((x - cx) / cx * LAYER_POINTER_TRAVEL * speed, (y - cy) / cy * LAYER_POINTER_TRAVEL * speed)
}

/// Vertical offset of a layer while its section scrolls.
pub fn layer_scroll_offset(scroll_top: f64, speed: f64) -> f64 {
    -(scroll_top * speed * ILLUSTRATION_RATE)
}

/// Apply hero transforms inside `container` for its current scroll offset.
#[cfg(feature = "hydrate")]
pub fn apply_scroll(container: &web_sys::Element) {
    use wasm_bindgen::JsCast;

    let t = hero_transforms(f64::from(container.scroll_top()));
    let set = |selector: &str, prop: &str, value: &str| {
        if let Ok(list) = container.query_selector_all(selector) {
            for i in 0..list.length() {
                if let Some(el) = list.item(i).and_then(|n| n.dyn_into::<web_sys::HtmlElement>().ok()) {
                    let _ = el.style().set_property(prop, value);
                }
            }
        }
    };
    set(".hero-illustration", "transform", &t.illustration_css());
    set(".hero-background", "transform", &t.background_css());
    set(".hero-content", "opacity", &t.content_opacity.to_string());
}

/// Drive the hero transforms from the scroll offset of every
/// `.section-container` below `root`.
#[cfg(feature = "hydrate")]
pub fn bind_hero(root: &web_sys::Element) {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;

    let Ok(sections) = root.query_selector_all(".section-container") else {
        return;
    };
    for i in 0..sections.length() {
        let Some(section) = sections.item(i).and_then(|n| n.dyn_into::<web_sys::Element>().ok()) else {
            continue;
        };
        let target = section.clone();
        let on_scroll = Closure::<dyn FnMut()>::new(move || apply_scroll(&target));
        let _ = section.add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref());
        on_scroll.forget();
    }
}

/// Wire pointer and scroll parallax onto every `.parallax-container` below
/// `root`. Listeners live as long as the elements they are attached to.
#[cfg(feature = "hydrate")]
pub fn bind_layers(root: &web_sys::Element) {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;

    let Ok(containers) = root.query_selector_all(".parallax-container") else {
        return;
    };
    for i in 0..containers.length() {
        let Some(container) = containers.item(i).and_then(|n| n.dyn_into::<web_sys::HtmlElement>().ok()) else {
            continue;
        };
        let layers = collect_layers(&container);
        if layers.is_empty() {
            continue;
        }

        let move_layers = layers.clone();
        let move_container = container.clone();
        let on_move = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |e: web_sys::MouseEvent| {
            let rect = move_container.get_bounding_client_rect();
            let x = f64::from(e.client_x()) - rect.left();
            let y = f64::from(e.client_y()) - rect.top();
            for layer in &move_layers {
                let speed = layer_speed(layer.get_attribute("data-speed").as_deref());
                let (dx, dy) = layer_pointer_offset(x, y, rect.width(), rect.height(), speed);
                let _ = layer.style().set_property("transform", &format!("translate({dx}px, {dy}px)"));
            }
        });
        let _ = container.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref());
        on_move.forget();

        let leave_layers = layers.clone();
        let on_leave = Closure::<dyn FnMut()>::new(move || {
            for layer in &leave_layers {
                let _ = layer.style().set_property("transform", "translate(0, 0)");
            }
        });
        let _ = container.add_event_listener_with_callback("mouseleave", on_leave.as_ref().unchecked_ref());
        on_leave.forget();

        if let Ok(Some(section)) = container.closest(".section-container") {
            let scroll_section = section.clone();
            let on_scroll = Closure::<dyn FnMut()>::new(move || {
                let top = f64::from(scroll_section.scroll_top());
                for layer in &layers {
                    let speed = layer_speed(layer.get_attribute("data-speed").as_deref());
                    let y = layer_scroll_offset(top, speed);
                    let _ = layer.style().set_property("transform", &format!("translateY({y}px)"));
                }
            });
            let _ = section.add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref());
            on_scroll.forget();
        }
    }
}

#[cfg(feature = "hydrate")]
fn collect_layers(container: &web_sys::HtmlElement) -> Vec<web_sys::HtmlElement> {
    use wasm_bindgen::JsCast;

    let Ok(list) = container.query_selector_all(".parallax-layer") else {
        return Vec::new();
    };
    (0..list.length()).filter_map(|i| list.item(i).and_then(|n| n.dyn_into::<web_sys::HtmlElement>().ok())).collect()
}
