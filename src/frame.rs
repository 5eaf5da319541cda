use crate::input;
use crate::overlay::TypingOverlay;
use crate::render;
use crate::storage::BrowserSessionStore;
use instant::Instant;
use portfolio_core::{InputSample, OpeningSignal, Scene, Theme, TypingTrigger};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Everything one animation frame touches. Owned by the RAF closure.
pub struct FrameContext {
    pub scene: Scene,
    pub typing: TypingTrigger<BrowserSessionStore>,
    pub signal: OpeningSignal,
    pub overlay: TypingOverlay,
    pub input: Rc<RefCell<InputSample>>,
    pub theme: Rc<Cell<Theme>>,
    pub canvas: Option<web::HtmlCanvasElement>,
    pub gpu: Option<render::GpuState>,

    pub last_instant: Instant,
    pub applied_theme: Theme,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;

        if !self.typing.is_done() {
            let events = self.typing.advance(dt.as_secs_f64() * 1000.0);
            if !events.is_empty() {
                self.overlay.apply(&events, self.typing.visible_text());
            }
        }

        let sample = *self.input.borrow();
        self.scene
            .tick(dt.as_secs_f32(), &sample, self.signal.is_open());

        let (Some(g), Some(canvas)) = (&mut self.gpu, &self.canvas) else {
            return;
        };
        let theme = self.theme.get();
        if theme != self.applied_theme {
            g.set_theme(theme);
            self.applied_theme = theme;
        }
        g.resize_if_needed(canvas.width(), canvas.height());
        if self.scene.take_positions_dirty() {
            g.upload_positions(self.scene.positions());
        }
        let (w, h) = g.size();
        let camera = self.scene.camera(input::aspect_ratio(w, h));
        g.set_transforms(
            camera.view_matrix(),
            camera.projection_matrix(),
            self.scene.model_matrix(),
        );
        if let Err(e) = g.render() {
            log::error!("[gpu] render error: {:?}", e);
        }
    }
}

/// A running requestAnimationFrame chain. Dropping it cancels the pending
/// frame and releases the closure (and with it the `FrameContext`).
pub struct FrameLoop {
    raf_id: Rc<Cell<Option<i32>>>,
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>, raf_id: &Cell<Option<i32>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        match w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => raf_id.set(Some(id)),
            Err(e) => log::error!("[scene] requestAnimationFrame failed: {:?}", e),
        }
    }
}

pub fn start_loop(mut frame_ctx: FrameContext) -> FrameLoop {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let raf_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));

    let tick_clone = tick.clone();
    let raf_clone = raf_id.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        raf_clone.set(None);
        frame_ctx.frame();
        request_frame(&tick_clone, &raf_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick, &raf_id);

    FrameLoop { raf_id, tick }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        if let Some(id) = self.raf_id.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
        // breaks the closure -> Rc -> closure cycle
        self.tick.borrow_mut().take();
        log::info!("[scene] frame loop stopped");
    }
}
