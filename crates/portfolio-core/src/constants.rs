// Shared tuning constants for the background scene and the typing intro.

// Sphere geometry
pub const SPHERE_RADIUS: f32 = 2.2;
pub const W_SEG: usize = 12; // longitude segments (meridians)
pub const H_SEG: usize = 8; // latitude segments (parallels + poles)
pub const EXPLOSION_SCALE_MIN: f32 = 1.5;
pub const EXPLOSION_SCALE_MAX: f32 = 4.0;

// Camera
pub const CAMERA_Z: f32 = 6.0; // resting eye distance on +Z
pub const CAMERA_MIN_DISTANCE: f32 = 2.0; // keeps the eye outside the sphere
pub const CAMERA_SMOOTH: f32 = 0.05; // per-frame lerp toward the scroll target
pub const FOV_DEGREES: f32 = 50.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 100.0;

// Bloom
pub const SPREAD_AMOUNT: f32 = 1.8; // how far vertices bloom out at full open
pub const OPEN_LERP: f32 = 0.03; // lerp fraction per frame at the reference rate
pub const REFERENCE_FPS: f32 = 60.0;
pub const BLOOM_EPSILON: f32 = 0.001;

// Rotation
pub const ROTATE_X: f32 = 0.054; // rad/s
pub const ROTATE_Y: f32 = 0.09; // rad/s
pub const MOUSE_SENS: f32 = 0.0003; // rad per pixel from viewport centre
pub const MOUSE_SMOOTH: f32 = 0.05; // per-frame lerp toward the tilt target
pub const SCROLL_X_SENS: f32 = 0.0005; // outer X tilt per scrolled pixel
pub const SCROLL_ZOOM: f32 = 0.0015; // camera retreat per scrolled pixel

// Frame loop
pub const MAX_FRAME_DT: f32 = 0.1; // seconds; guards against resume-from-background jumps

// Typing intro
pub const TYPING_TEXT: &str = "Hello, World.";
pub const TYPING_SPEED_MS: f64 = 100.0; // per character
pub const TYPING_START_MS: f64 = 800.0; // before the first character
pub const TYPING_END_MS: f64 = 1000.0; // after the last character, before opening
pub const OPENED_SESSION_KEY: &str = "portfolio-opened";

// Accent palette (sRGB hex)
pub const ACCENT_LIGHT: &str = "#00b37a";
pub const ACCENT_DARK: &str = "#00e5a0";

/// Number of vertices in the UV sphere: two poles plus the interior rings.
pub const fn vertex_count() -> usize {
    2 + (H_SEG - 1) * W_SEG
}

/// Number of line segments: pole fans, ring loops and ring-to-ring links.
pub const fn edge_count() -> usize {
    W_SEG * 2 + (H_SEG - 1) * W_SEG + (H_SEG - 2) * W_SEG
}
