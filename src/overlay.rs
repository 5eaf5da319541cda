use crate::constants::{
    CURSOR_CLASS, HIDDEN_CLASS, OPENED_BODY_CLASS, TYPING_DONE_CLASS, TYPING_OVERLAY_ID,
    TYPING_TEXT_ID,
};
use crate::dom;
use portfolio_core::TypingEvent;
use web_sys as web;

/// The "Hello, World." overlay. Missing elements are tolerated so the
/// background still runs on pages without the intro markup.
pub struct TypingOverlay {
    overlay: Option<web::Element>,
    text: Option<web::Element>,
    body: Option<web::HtmlElement>,
}

impl TypingOverlay {
    pub fn new(document: &web::Document) -> Self {
        Self {
            overlay: document.get_element_by_id(TYPING_OVERLAY_ID),
            text: document.get_element_by_id(TYPING_TEXT_ID),
            body: document.body(),
        }
    }

    pub fn apply(&self, events: &[TypingEvent], visible_text: &str) {
        for ev in events {
            match ev {
                TypingEvent::Started => {
                    if let Some(el) = &self.text {
                        dom::set_class(el, CURSOR_CLASS, true);
                    }
                }
                TypingEvent::Revealed(_) => {}
                TypingEvent::Settled => {
                    if let Some(el) = &self.overlay {
                        dom::set_class(el, TYPING_DONE_CLASS, true);
                    }
                }
                TypingEvent::Opened => self.mark_opened(),
            }
        }
        if events.iter().any(|e| matches!(e, TypingEvent::Revealed(_))) {
            if let Some(el) = &self.text {
                el.set_text_content(Some(visible_text));
            }
        }
    }

    /// Hide the overlay and let the page know the intro is over.
    pub fn mark_opened(&self) {
        if let Some(el) = &self.text {
            dom::set_class(el, CURSOR_CLASS, false);
        }
        if let Some(el) = &self.overlay {
            dom::set_class(el, HIDDEN_CLASS, true);
        }
        if let Some(body) = &self.body {
            dom::set_class(body, OPENED_BODY_CLASS, true);
        }
    }
}
