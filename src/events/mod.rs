pub mod pointer;

pub use pointer::wire_pointer_input;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// A registered DOM listener. Dropping the guard removes the listener and
/// frees its closure, so nothing fires after teardown.
pub struct ListenerGuard {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl ListenerGuard {
    pub fn add(
        target: &web::EventTarget,
        event: &'static str,
        passive: bool,
        mut handler: impl FnMut(web::Event) + 'static,
    ) -> anyhow::Result<Self> {
        let closure =
            Closure::wrap(Box::new(move |ev: web::Event| handler(ev)) as Box<dyn FnMut(_)>);
        let opts = web::AddEventListenerOptions::new();
        opts.set_passive(passive);
        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                event,
                closure.as_ref().unchecked_ref(),
                &opts,
            )
            .map_err(crate::dom::js_err)?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }

    pub fn on_click(
        document: &web::Document,
        element_id: &str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Option<Self> {
        let el = document.get_element_by_id(element_id)?;
        match Self::add(&el, "click", false, handler) {
            Ok(g) => Some(g),
            Err(e) => {
                log::warn!("click listener on #{} failed: {:?}", element_id, e);
                None
            }
        }
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}
