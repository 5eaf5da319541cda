use glam::Vec2;

/// Latest pointer and scroll readings. Listeners overwrite it; the frame loop
/// reads one copy per frame. Only the most recent value matters.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputSample {
    /// Pixels from the viewport centre (+x right, +y down).
    pub pointer_offset: Vec2,
    /// Vertical page scroll in pixels.
    pub scroll_offset: f32,
}

impl InputSample {
    pub fn set_pointer(&mut self, offset: Vec2) {
        self.pointer_offset = offset;
    }

    pub fn set_scroll(&mut self, scroll_y: f32) {
        self.scroll_offset = scroll_y;
    }
}
