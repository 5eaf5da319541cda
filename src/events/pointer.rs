use super::ListenerGuard;
use crate::dom;
use crate::input;
use portfolio_core::InputSample;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Feed pointer, touch and scroll readings into the shared sample.
/// Touch and scroll listeners are passive; nothing here cancels defaults.
pub fn wire_pointer_input(
    window: &web::Window,
    sample: Rc<RefCell<InputSample>>,
) -> anyhow::Result<Vec<ListenerGuard>> {
    let mut guards = Vec::with_capacity(3);

    let s = sample.clone();
    guards.push(ListenerGuard::add(window, "mousemove", false, move |ev| {
        if let Some(me) = ev.dyn_ref::<web::MouseEvent>() {
            let (vw, vh) = dom::viewport_size();
            let offset = input::pointer_offset(me.client_x() as f64, me.client_y() as f64, vw, vh);
            s.borrow_mut().set_pointer(offset);
        }
    })?);

    let s = sample.clone();
    guards.push(ListenerGuard::add(window, "touchmove", true, move |ev| {
        let Some(te) = ev.dyn_ref::<web::TouchEvent>() else {
            return;
        };
        let touches: Vec<(f64, f64)> = te
            .touches()
            .get(0)
            .map(|t| (t.client_x() as f64, t.client_y() as f64))
            .into_iter()
            .collect();
        let (vw, vh) = dom::viewport_size();
        if let Some(offset) = input::first_touch_offset(&touches, vw, vh) {
            s.borrow_mut().set_pointer(offset);
        }
    })?);

    // pick up a restored scroll position before the first event arrives
    if let Ok(y) = window.scroll_y() {
        sample.borrow_mut().set_scroll(y as f32);
    }

    let s = sample;
    let win = window.clone();
    guards.push(ListenerGuard::add(window, "scroll", true, move |_| {
        let y = win.scroll_y().unwrap_or(0.0);
        s.borrow_mut().set_scroll(y as f32);
    })?);

    Ok(guards)
}
