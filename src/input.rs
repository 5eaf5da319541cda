use glam::Vec2;

/// Pointer position relative to the viewport centre, in CSS pixels
/// (+x right, +y down).
#[inline]
pub fn pointer_offset(client_x: f64, client_y: f64, viewport_w: f64, viewport_h: f64) -> Vec2 {
    Vec2::new(
        (client_x - viewport_w * 0.5) as f32,
        (client_y - viewport_h * 0.5) as f32,
    )
}

/// First touch wins; an empty touch list yields nothing.
#[inline]
pub fn first_touch_offset(
    touches: &[(f64, f64)],
    viewport_w: f64,
    viewport_h: f64,
) -> Option<Vec2> {
    touches
        .first()
        .map(|&(x, y)| pointer_offset(x, y, viewport_w, viewport_h))
}

/// Backing-store size for a CSS box, with the device pixel ratio capped to
/// keep fill rate bounded on dense displays. Never returns a zero dimension.
pub fn backing_size(css_w: f64, css_h: f64, dpr: f64, max_dpr: f64) -> (u32, u32) {
    let ratio = if dpr.is_finite() && dpr > 0.0 {
        dpr.min(max_dpr)
    } else {
        1.0
    };
    let px = |css: f64| -> u32 {
        let v = (css.max(0.0) * ratio).round();
        if v.is_finite() {
            (v as u32).max(1)
        } else {
            1
        }
    };
    (px(css_w), px(css_h))
}

#[inline]
pub fn aspect_ratio(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}
