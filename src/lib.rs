#![cfg(target_arch = "wasm32")]
use crate::constants::BG_CANVAS_ID;
use crate::events::ListenerGuard;
use crate::frame::FrameContext;
use crate::mount::MountGate;
use crate::overlay::TypingOverlay;
use crate::storage::BrowserSessionStore;
use instant::Instant;
use portfolio_core::{InputSample, OpeningSignal, Scene, SceneParams, Theme, TypingTrigger};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod contact;
mod dom;
mod events;
mod frame;
mod input;
mod mount;
mod overlay;
mod render;
mod storage;
mod theme;

/// A mounted background. Dropping it stops the frame loop and detaches every
/// listener it registered.
struct Background {
    _frame_loop: frame::FrameLoop,
    _listeners: Vec<ListenerGuard>,
    _contact: Option<contact::ContactWiring>,
    theme: Rc<Cell<Theme>>,
}

thread_local! {
    static BACKGROUND: RefCell<Option<Background>> = const { RefCell::new(None) };
    static MOUNT_GATE: RefCell<MountGate> = RefCell::new(MountGate::default());
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("portfolio-web starting");
    mount_background();
    Ok(())
}

#[wasm_bindgen]
pub fn mount_background() {
    let mounted = BACKGROUND.with(|b| b.borrow().is_some());
    if !MOUNT_GATE.with(|g| g.borrow_mut().request_mount(mounted)) {
        return;
    }
    spawn_local(async move {
        let result = mount().await;
        let keep = MOUNT_GATE.with(|g| g.borrow_mut().settle());
        match result {
            Ok(bg) if keep => {
                BACKGROUND.with(|b| *b.borrow_mut() = Some(bg));
                log::info!("[scene] background mounted");
            }
            Ok(_) => log::info!("[scene] unmounted while mounting; discarded"),
            Err(e) => log::error!("mount error: {:?}", e),
        }
    });
}

#[wasm_bindgen]
pub fn unmount_background() {
    MOUNT_GATE.with(|g| g.borrow_mut().request_unmount());
    let bg = BACKGROUND.with(|b| b.borrow_mut().take());
    if bg.is_some() {
        log::info!("[scene] background unmounted");
    }
}

/// Explicit theme switch from the page's toggle; unknown names are ignored.
#[wasm_bindgen]
pub fn set_background_theme(name: &str) {
    let Some(next) = Theme::from_name(name) else {
        log::warn!("[scene] unknown theme {:?}", name);
        return;
    };
    BACKGROUND.with(|b| {
        if let Some(bg) = b.borrow().as_ref() {
            bg.theme.set(next);
        }
    });
}

async fn mount() -> anyhow::Result<Background> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: Option<web::HtmlCanvasElement> = dom::element_by_id(&document, BG_CANVAS_ID);

    let mut listeners = Vec::new();
    if let Some(canvas) = &canvas {
        // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
        dom::sync_canvas_backing_size(canvas);
        let canvas_resize = canvas.clone();
        listeners.push(ListenerGuard::add(&window, "resize", true, move |_| {
            dom::sync_canvas_backing_size(&canvas_resize);
        })?);
    } else {
        log::warn!("[scene] missing #{}; running without the sphere", BG_CANVAS_ID);
    }

    let input = Rc::new(RefCell::new(InputSample::default()));
    listeners.extend(events::wire_pointer_input(&window, input.clone())?);

    let page_theme = Rc::new(Cell::new(theme::resolve_page_theme(&window, &document)));
    listeners.extend(theme::watch_color_scheme(&window, &document, page_theme.clone()));

    let signal = OpeningSignal::new();
    let overlay = TypingOverlay::new(&document);
    let typing = TypingTrigger::new(BrowserSessionStore::new(&window), signal.clone());
    if typing.is_done() {
        overlay.mark_opened();
    }

    let scene = Scene::new(SceneParams::default());
    let gpu = match &canvas {
        Some(canvas) => {
            let initial_theme = page_theme.get();
            match render::GpuState::new(canvas, scene.mesh(), scene.positions(), initial_theme)
                .await
            {
                Ok(g) => Some(g),
                Err(e) => {
                    log::error!("[gpu] WebGPU init error: {:?}", e);
                    None
                }
            }
        }
        None => None,
    };

    let frame_loop = frame::start_loop(FrameContext {
        scene,
        typing,
        signal,
        overlay,
        input,
        theme: page_theme.clone(),
        canvas,
        gpu,
        last_instant: Instant::now(),
        applied_theme: page_theme.get(),
    });

    Ok(Background {
        _frame_loop: frame_loop,
        _listeners: listeners,
        _contact: contact::wire_contact_form(&document),
        theme: page_theme,
    })
}
