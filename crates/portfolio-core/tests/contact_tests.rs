// Integration tests for contact submission handling and the client flow.

use portfolio_core::contact::*;
use serde_json::{json, Value};
use std::cell::{Cell, RefCell};

#[derive(Default)]
struct RecordingStore {
    saved: RefCell<Vec<ContactForm>>,
    fail: bool,
}

impl ContactStore for RecordingStore {
    fn create(&self, form: &ContactForm) -> Result<(), StoreError> {
        if self.fail {
            return Err(StoreError("cms returned 503".into()));
        }
        self.saved.borrow_mut().push(form.clone());
        Ok(())
    }
}

#[derive(Default)]
struct CountingNotifier {
    calls: Cell<usize>,
    fail: bool,
}

impl ContactNotifier for CountingNotifier {
    fn notify(&self, _message: &WebhookMessage) -> Result<(), NotifyError> {
        self.calls.set(self.calls.get() + 1);
        if self.fail {
            Err(NotifyError("webhook 500".into()))
        } else {
            Ok(())
        }
    }
}

fn form(name: &str, email: &str, message: &str) -> ContactForm {
    ContactForm {
        name: name.into(),
        email: email.into(),
        message: message.into(),
    }
}

fn body(name: &str, email: &str, message: &str) -> String {
    json!({ "name": name, "email": email, "message": message }).to_string()
}

#[test]
fn name_length_boundaries() {
    let ok = "a".repeat(NAME_MAX_CHARS);
    let long = "a".repeat(NAME_MAX_CHARS + 1);
    assert!(validate(&form(&ok, "a@example.com", "hi")).is_ok());
    let errs = validate(&form(&long, "a@example.com", "hi")).unwrap_err();
    assert_eq!(errs.fields().collect::<Vec<_>>(), vec![ContactField::Name]);
}

#[test]
fn message_length_boundaries() {
    let ok = "x".repeat(MESSAGE_MAX_CHARS);
    let long = "x".repeat(MESSAGE_MAX_CHARS + 1);
    assert!(validate(&form("Taro", "a@example.com", &ok)).is_ok());
    let errs = validate(&form("Taro", "a@example.com", &long)).unwrap_err();
    assert_eq!(errs.get(ContactField::Message).len(), 1);
}

#[test]
fn lengths_count_characters_not_bytes() {
    let name = "山".repeat(NAME_MAX_CHARS);
    assert!(name.len() > NAME_MAX_CHARS);
    assert!(validate(&form(&name, "a@example.com", "hi")).is_ok());
}

#[test]
fn empty_form_reports_every_field_once() {
    let errs = validate(&ContactForm::default()).unwrap_err();
    for field in ContactField::ALL {
        assert_eq!(errs.get(field).len(), 1, "{}", field.as_str());
    }
}

#[test]
fn valid_submission_is_stored_and_notified() {
    let store = RecordingStore::default();
    let notifier = CountingNotifier::default();
    let resp = handle_submission(
        &body("Taro", "taro@example.com", "Hello"),
        &store,
        Some(&notifier),
    );
    assert_eq!(resp.status, 200);
    assert!(resp.body.ok);
    assert_eq!(store.saved.borrow().len(), 1);
    assert_eq!(store.saved.borrow()[0].name, "Taro");
    assert_eq!(notifier.calls.get(), 1);
}

#[test]
fn malformed_json_is_400() {
    let store = RecordingStore::default();
    let resp = handle_submission("{not json", &store, None);
    assert_eq!(resp.status, 400);
    assert_eq!(resp.body.error.as_deref(), Some(MSG_MALFORMED));
    assert!(resp.body.field_errors.is_none());
    assert!(store.saved.borrow().is_empty());
}

#[test]
fn invalid_fields_are_422_with_field_errors() {
    let store = RecordingStore::default();
    let notifier = CountingNotifier::default();
    let resp = handle_submission(&body("", "nope", "Hello"), &store, Some(&notifier));
    assert_eq!(resp.status, 422);
    let fe = resp.body.field_errors.expect("field errors present");
    assert_eq!(fe.fields().collect::<Vec<_>>(), vec![ContactField::Name, ContactField::Email]);
    assert!(store.saved.borrow().is_empty());
    assert_eq!(notifier.calls.get(), 0);
}

#[test]
fn store_failure_is_500_and_skips_notify() {
    let store = RecordingStore {
        fail: true,
        ..Default::default()
    };
    let notifier = CountingNotifier::default();
    let resp = handle_submission(
        &body("Taro", "taro@example.com", "Hello"),
        &store,
        Some(&notifier),
    );
    assert_eq!(resp.status, 500);
    assert_eq!(resp.body.error.as_deref(), Some(MSG_SERVER));
    assert_eq!(notifier.calls.get(), 0);
}

#[test]
fn notifier_failure_still_answers_200() {
    let store = RecordingStore::default();
    let notifier = CountingNotifier {
        fail: true,
        ..Default::default()
    };
    let resp = handle_submission(
        &body("Taro", "taro@example.com", "Hello"),
        &store,
        Some(&notifier),
    );
    assert_eq!(resp, ContactResponse::ok());
    assert_eq!(notifier.calls.get(), 1);
}

#[test]
fn error_reply_serializes_camel_case_field_errors() {
    let store = RecordingStore::default();
    let resp = handle_submission(&body("Taro", "", "Hello"), &store, None);
    let v: Value = serde_json::to_value(&resp.body).unwrap();
    assert_eq!(v["error"], MSG_INVALID);
    assert!(v.get("ok").is_none());
    assert_eq!(v["fieldErrors"]["email"].as_array().map(Vec::len), Some(1));
}

#[test]
fn webhook_payload_shape() {
    let msg = WebhookMessage::for_submission(&form("Taro", "taro@example.com", "line1\nline2"));
    let v: Value = serde_json::from_str(&msg.to_json().unwrap()).unwrap();
    assert!(v["text"].as_str().is_some());
    assert_eq!(v["blocks"][0]["type"], "section");
    assert_eq!(v["blocks"][0]["text"]["type"], "mrkdwn");
    let text = v["blocks"][0]["text"]["text"].as_str().unwrap();
    assert!(text.contains("taro@example.com"));
    assert!(text.contains("line1\nline2"));
}

#[test]
fn flow_happy_path() {
    let mut flow = ContactFlow::new();
    assert_eq!(flow.stage(), FlowStage::Editing);
    assert!(flow.review(form("Taro", "taro@example.com", "Hi")).unwrap());
    assert_eq!(flow.stage(), FlowStage::Confirming);

    let sent = flow.begin_send().unwrap().clone();
    assert_eq!(sent.name, "Taro");
    assert_eq!(flow.stage(), FlowStage::Sending);

    flow.finish(200, Some(ContactResponse::ok().body)).unwrap();
    assert_eq!(flow.stage(), FlowStage::Sent);
    flow.reset();
    assert_eq!(flow.stage(), FlowStage::Editing);
    assert_eq!(flow.form(), &ContactForm::default());
}

#[test]
fn flow_stays_in_editing_on_local_errors() {
    let mut flow = ContactFlow::new();
    assert!(!flow.review(form("", "taro@example.com", "Hi")).unwrap());
    assert_eq!(flow.stage(), FlowStage::Editing);
    assert_eq!(flow.field_errors().get(ContactField::Name).len(), 1);
    assert!(flow.begin_send().is_err());
}

#[test]
fn flow_back_returns_to_editing() {
    let mut flow = ContactFlow::new();
    flow.review(form("Taro", "taro@example.com", "Hi")).unwrap();
    flow.back().unwrap();
    assert_eq!(flow.stage(), FlowStage::Editing);
    assert_eq!(flow.form().name, "Taro");
    assert_eq!(
        flow.back(),
        Err(FlowError {
            from: FlowStage::Editing,
            action: "go back"
        })
    );
}

#[test]
fn flow_server_validation_returns_to_editing() {
    let mut flow = ContactFlow::new();
    flow.review(form("Taro", "taro@example.com", "Hi")).unwrap();
    flow.begin_send().unwrap();

    let store = RecordingStore::default();
    let resp = handle_submission(&body("Taro", "bad", "Hi"), &store, None);
    flow.finish(resp.status, Some(resp.body)).unwrap();
    assert_eq!(flow.stage(), FlowStage::Editing);
    assert_eq!(flow.notice(), Some(MSG_INVALID));
    assert_eq!(flow.field_errors().get(ContactField::Email).len(), 1);
}

#[test]
fn flow_failures_allow_resend() {
    let mut flow = ContactFlow::new();
    flow.review(form("Taro", "taro@example.com", "Hi")).unwrap();
    flow.begin_send().unwrap();
    flow.finish(500, None).unwrap();
    assert_eq!(flow.stage(), FlowStage::Failed);
    assert_eq!(flow.notice(), Some(MSG_SERVER));

    flow.begin_send().unwrap();
    flow.fail_network().unwrap();
    assert_eq!(flow.stage(), FlowStage::Failed);
    assert_eq!(flow.notice(), Some(MSG_NETWORK));

    flow.begin_send().unwrap();
    assert_eq!(flow.notice(), None);
    assert!(flow.finish(200, None).is_ok());
    assert_eq!(flow.stage(), FlowStage::Sent);
}

#[test]
fn finish_outside_sending_is_rejected() {
    let mut flow = ContactFlow::new();
    let err = flow.finish(200, None).unwrap_err();
    assert_eq!(err.from, FlowStage::Editing);
    assert!(flow.fail_network().is_err());
}
