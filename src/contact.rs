use crate::constants::*;
use crate::dom::{self, js_err};
use crate::events::ListenerGuard;
use portfolio_core::contact::{ContactField, ContactFlow, ContactForm, ContactReply, FlowStage};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Contact form: review, confirm, send. Dropping it detaches every button.
pub struct ContactWiring {
    _listeners: Vec<ListenerGuard>,
}

fn field_error_id(field: ContactField) -> String {
    format!("contact-{}-error", field.as_str())
}

fn read_form(document: &web::Document) -> ContactForm {
    let input = |id: &str| {
        dom::element_by_id::<web::HtmlInputElement>(document, id)
            .map(|el| el.value())
            .unwrap_or_default()
    };
    let message = dom::element_by_id::<web::HtmlTextAreaElement>(document, CONTACT_MESSAGE_ID)
        .map(|el| el.value())
        .unwrap_or_default();
    ContactForm {
        name: input(CONTACT_NAME_ID),
        email: input(CONTACT_EMAIL_ID),
        message,
    }
}

fn stage_name(stage: FlowStage) -> &'static str {
    match stage {
        FlowStage::Editing => "editing",
        FlowStage::Confirming => "confirming",
        FlowStage::Sending => "sending",
        FlowStage::Sent => "sent",
        FlowStage::Failed => "failed",
    }
}

/// Mirror the flow onto the page: stage attribute, per-field errors, notice.
fn render_flow(document: &web::Document, flow: &ContactFlow) {
    if let Some(form_el) = document.get_element_by_id(CONTACT_FORM_ID) {
        _ = form_el.set_attribute(STAGE_ATTR, stage_name(flow.stage()));
    }
    for field in ContactField::ALL {
        let messages = flow.field_errors().get(field);
        if let Some(el) = document.get_element_by_id(&field_error_id(field)) {
            el.set_text_content(Some(&messages.join(" ")));
            dom::set_class(&el, FIELD_ERROR_CLASS, !messages.is_empty());
        }
    }
    if let Some(el) = document.get_element_by_id(CONTACT_NOTICE_ID) {
        el.set_text_content(flow.notice());
    }
    if let Some(btn) = dom::element_by_id::<web::HtmlButtonElement>(document, CONTACT_SEND_ID) {
        btn.set_disabled(flow.stage() == FlowStage::Sending);
    }
}

async fn post_contact(form: &ContactForm) -> anyhow::Result<(u16, Option<ContactReply>)> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let body = serde_json::to_string(form)?;

    let headers = web::Headers::new().map_err(js_err)?;
    headers
        .set("Content-Type", "application/json")
        .map_err(js_err)?;
    let init = web::RequestInit::new();
    init.set_method("POST");
    init.set_mode(web::RequestMode::SameOrigin);
    init.set_headers(&headers);
    init.set_body(&JsValue::from_str(&body));
    let request =
        web::Request::new_with_str_and_init(CONTACT_ENDPOINT, &init).map_err(js_err)?;

    let resp: web::Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_err)?
        .dyn_into()
        .map_err(js_err)?;
    let status = resp.status();
    let text = JsFuture::from(resp.text().map_err(js_err)?)
        .await
        .map_err(js_err)?;
    let reply = text
        .as_string()
        .and_then(|t| serde_json::from_str::<ContactReply>(&t).ok());
    Ok((status, reply))
}

fn send(document: web::Document, flow: Rc<RefCell<ContactFlow>>) {
    let form = match flow.borrow_mut().begin_send() {
        Ok(f) => f.clone(),
        Err(e) => {
            log::warn!("[contact] {}", e);
            return;
        }
    };
    render_flow(&document, &flow.borrow());
    spawn_local(async move {
        let outcome = post_contact(&form).await;
        let mut f = flow.borrow_mut();
        let applied = match outcome {
            Ok((status, reply)) => {
                log::info!("[contact] endpoint answered {}", status);
                f.finish(status, reply)
            }
            Err(e) => {
                log::error!("[contact] request failed: {:?}", e);
                f.fail_network()
            }
        };
        if let Err(e) = applied {
            log::warn!("[contact] {}", e);
        }
        render_flow(&document, &f);
    });
}

/// Attach the form buttons. Returns `None` on pages without the form.
pub fn wire_contact_form(document: &web::Document) -> Option<ContactWiring> {
    document.get_element_by_id(CONTACT_FORM_ID)?;
    let flow = Rc::new(RefCell::new(ContactFlow::new()));
    let mut listeners = Vec::with_capacity(4);

    let (doc, fl) = (document.clone(), flow.clone());
    listeners.extend(ListenerGuard::on_click(document, CONTACT_REVIEW_ID, move |ev| {
        ev.prevent_default();
        let form = read_form(&doc);
        let mut f = fl.borrow_mut();
        if let Err(e) = f.review(form) {
            log::warn!("[contact] {}", e);
        }
        render_flow(&doc, &f);
    }));

    let (doc, fl) = (document.clone(), flow.clone());
    listeners.extend(ListenerGuard::on_click(document, CONTACT_BACK_ID, move |ev| {
        ev.prevent_default();
        let mut f = fl.borrow_mut();
        if let Err(e) = f.back() {
            log::warn!("[contact] {}", e);
        }
        render_flow(&doc, &f);
    }));

    let (doc, fl) = (document.clone(), flow.clone());
    listeners.extend(ListenerGuard::on_click(document, CONTACT_SEND_ID, move |ev| {
        ev.prevent_default();
        send(doc.clone(), fl.clone());
    }));

    let (doc, fl) = (document.clone(), flow.clone());
    listeners.extend(ListenerGuard::on_click(document, CONTACT_RESET_ID, move |ev| {
        ev.prevent_default();
        let mut f = fl.borrow_mut();
        f.reset();
        if let Some(form_el) = dom::element_by_id::<web::HtmlFormElement>(&doc, CONTACT_FORM_ID) {
            form_el.reset();
        }
        render_flow(&doc, &f);
    }));

    render_flow(document, &flow.borrow());
    log::info!("[contact] form wired");
    Some(ContactWiring {
        _listeners: listeners,
    })
}
