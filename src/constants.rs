/// Page wiring and material constants for the browser front-end.
///
/// Animation tuning lives in `portfolio_core::constants`; this module only
/// holds what the DOM and the GPU passes need.

// Element ids
pub const BG_CANVAS_ID: &str = "bg-canvas";
pub const TYPING_OVERLAY_ID: &str = "typing-overlay";
pub const TYPING_TEXT_ID: &str = "typing-text";
pub const CONTACT_FORM_ID: &str = "contact-form";
pub const CONTACT_NAME_ID: &str = "contact-name";
pub const CONTACT_EMAIL_ID: &str = "contact-email";
pub const CONTACT_MESSAGE_ID: &str = "contact-message";
pub const CONTACT_REVIEW_ID: &str = "contact-review";
pub const CONTACT_BACK_ID: &str = "contact-back";
pub const CONTACT_SEND_ID: &str = "contact-send";
pub const CONTACT_RESET_ID: &str = "contact-reset";
pub const CONTACT_NOTICE_ID: &str = "contact-notice";

// Classes toggled on the page
pub const OPENED_BODY_CLASS: &str = "opening-done";
pub const TYPING_DONE_CLASS: &str = "typing-done";
pub const CURSOR_CLASS: &str = "typing-cursor";
pub const HIDDEN_CLASS: &str = "hidden";
pub const FIELD_ERROR_CLASS: &str = "field-error";
pub const STAGE_ATTR: &str = "data-stage";

// Material
pub const LINE_OPACITY: f32 = 0.2;
pub const POINT_SIZE: f32 = 0.12; // world units, attenuated by distance
pub const POINT_DISC_CUTOFF: f32 = 30.0 / 32.0; // fraction of the billboard half-size kept

// Canvas backing store
pub const MAX_DEVICE_PIXEL_RATIO: f64 = 2.0;

// Contact endpoint
pub const CONTACT_ENDPOINT: &str = "/api/contact";
