use crate::events::ListenerGuard;
use portfolio_core::Theme;
use std::cell::Cell;
use std::rc::Rc;
use web_sys as web;

const PREFERS_LIGHT: &str = "(prefers-color-scheme: light)";

fn explicit_class(document: &web::Document) -> Option<&'static str> {
    let cl = document.document_element()?.class_list();
    if cl.contains("light") {
        Some("light")
    } else if cl.contains("dark") {
        Some("dark")
    } else {
        None
    }
}

fn prefers_light(window: &web::Window) -> bool {
    matches!(window.match_media(PREFERS_LIGHT), Ok(Some(mq)) if mq.matches())
}

/// `<html class="light|dark">` wins over the OS preference.
pub fn resolve_page_theme(window: &web::Window, document: &web::Document) -> Theme {
    Theme::resolve(explicit_class(document), prefers_light(window))
}

/// Re-resolve the theme whenever the OS preference flips.
pub fn watch_color_scheme(
    window: &web::Window,
    document: &web::Document,
    theme: Rc<Cell<Theme>>,
) -> Option<ListenerGuard> {
    let mq = window.match_media(PREFERS_LIGHT).ok().flatten()?;
    let win = window.clone();
    let doc = document.clone();
    match ListenerGuard::add(&mq, "change", false, move |_| {
        let next = resolve_page_theme(&win, &doc);
        if theme.replace(next) != next {
            log::info!("[scene] theme -> {:?}", next);
        }
    }) {
        Ok(g) => Some(g),
        Err(e) => {
            log::warn!("[scene] color-scheme watch failed: {:?}", e);
            None
        }
    }
}
