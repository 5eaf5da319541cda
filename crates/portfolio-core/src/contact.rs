//! Contact form contract: field rules, server-side submission handling,
//! webhook payload shaping and the client-side multi-stage flow.
//!
//! Transport is left to the host. The server side hands the raw request body
//! to [`handle_submission`] together with a [`ContactStore`] and an optional
//! [`ContactNotifier`]; the browser side drives a [`ContactFlow`].

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use thiserror::Error;

pub const NAME_MAX_CHARS: usize = 100;
pub const MESSAGE_MAX_CHARS: usize = 2000;

pub const MSG_MALFORMED: &str = "The request could not be read.";
pub const MSG_INVALID: &str = "Please check the highlighted fields.";
pub const MSG_SERVER: &str = "Sending failed. Please wait a moment and try again.";
pub const MSG_NETWORK: &str =
    "Could not reach the server. Please check your connection and try again.";

const WEBHOOK_HEADLINE: &str = "A new enquiry arrived from the portfolio site";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    Name,
    Email,
    Message,
}

impl ContactField {
    pub const ALL: [ContactField; 3] =
        [ContactField::Name, ContactField::Email, ContactField::Message];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContactField::Name => "name",
            ContactField::Email => "email",
            ContactField::Message => "message",
        }
    }
}

/// Per-field messages, serialized as `{"name": ["..."], ...}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<ContactField, Vec<String>>);

impl FieldErrors {
    pub fn push(&mut self, field: ContactField, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn get(&self, field: ContactField) -> &[String] {
        self.0.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = ContactField> + '_ {
        self.0.keys().copied()
    }
}

/// Local part, `@`, dotted domain with an alphabetic TLD.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[a-z0-9_'+\-.]*[a-z0-9_+\-]@([a-z0-9][a-z0-9\-]*\.)+[a-z]{2,}$")
        .unwrap_or_else(|e| panic!("email pattern must compile: {e}"))
});

pub fn is_valid_email(email: &str) -> bool {
    !email.starts_with('.') && !email.contains("..") && EMAIL_RE.is_match(email)
}

/// Field rules: name 1..=100 chars, email present and well formed,
/// message 1..=2000 chars. Every failing field is reported.
pub fn validate(form: &ContactForm) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();

    let name_len = form.name.chars().count();
    if name_len == 0 {
        errors.push(ContactField::Name, "Please enter your name.");
    } else if name_len > NAME_MAX_CHARS {
        errors.push(
            ContactField::Name,
            format!("Name must be at most {} characters.", NAME_MAX_CHARS),
        );
    }

    if form.email.is_empty() {
        errors.push(ContactField::Email, "Please enter your email address.");
    } else if !is_valid_email(&form.email) {
        errors.push(ContactField::Email, "Please enter a valid email address.");
    }

    let message_len = form.message.chars().count();
    if message_len == 0 {
        errors.push(ContactField::Message, "Please enter a message.");
    } else if message_len > MESSAGE_MAX_CHARS {
        errors.push(
            ContactField::Message,
            format!("Message must be at most {} characters.", MESSAGE_MAX_CHARS),
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

impl ContactForm {
    /// Shape check on an already-parsed JSON body: every field must be a
    /// string. Missing or mistyped fields are field errors, not parse errors.
    pub fn from_value(value: &Value) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();
        let mut take = |field: ContactField| -> String {
            match value.get(field.as_str()) {
                Some(Value::String(s)) => s.clone(),
                Some(_) => {
                    errors.push(field, "Expected text.");
                    String::new()
                }
                None => {
                    errors.push(field, "This field is required.");
                    String::new()
                }
            }
        };
        let form = ContactForm {
            name: take(ContactField::Name),
            email: take(ContactField::Email),
            message: take(ContactField::Message),
        };
        if errors.is_empty() {
            Ok(form)
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Error)]
#[error("content store error: {0}")]
pub struct StoreError(pub String);

#[derive(Debug, Error)]
#[error("notification error: {0}")]
pub struct NotifyError(pub String);

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("malformed request body")]
    Malformed(#[source] serde_json::Error),
    #[error("validation failed")]
    Invalid(FieldErrors),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ContactError {
    pub fn status(&self) -> u16 {
        match self {
            ContactError::Malformed(_) => 400,
            ContactError::Invalid(_) => 422,
            ContactError::Store(_) => 500,
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            ContactError::Malformed(_) => MSG_MALFORMED,
            ContactError::Invalid(_) => MSG_INVALID,
            ContactError::Store(_) => MSG_SERVER,
        }
    }
}

/// Persists validated submissions (the CMS `contacts` endpoint in production).
pub trait ContactStore {
    fn create(&self, form: &ContactForm) -> Result<(), StoreError>;
}

/// Chat webhook; failures are logged and never surface to the visitor.
pub trait ContactNotifier {
    fn notify(&self, message: &WebhookMessage) -> Result<(), NotifyError>;
}

#[derive(Clone, Debug, Serialize)]
pub struct WebhookText {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct WebhookBlock {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: WebhookText,
}

#[derive(Clone, Debug, Serialize)]
pub struct WebhookMessage {
    pub text: String,
    pub blocks: Vec<WebhookBlock>,
}

impl WebhookMessage {
    pub fn for_submission(form: &ContactForm) -> Self {
        let body = [
            "*New enquiry*".to_string(),
            format!("*Name:* {}", form.name),
            format!("*Email:* {}", form.email),
            format!("*Message:*\n{}", form.message),
        ]
        .join("\n");
        Self {
            text: WEBHOOK_HEADLINE.to_string(),
            blocks: vec![WebhookBlock {
                kind: "section",
                text: WebhookText {
                    kind: "mrkdwn",
                    text: body,
                },
            }],
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Response body shared by the endpoint and the browser client.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactReply {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(rename = "fieldErrors", default, skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<FieldErrors>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ContactResponse {
    pub status: u16,
    pub body: ContactReply,
}

impl ContactResponse {
    pub fn ok() -> Self {
        Self {
            status: 200,
            body: ContactReply {
                ok: true,
                ..Default::default()
            },
        }
    }

    pub fn from_error(err: &ContactError) -> Self {
        let field_errors = match err {
            ContactError::Invalid(fe) => Some(fe.clone()),
            _ => None,
        };
        Self {
            status: err.status(),
            body: ContactReply {
                ok: false,
                error: Some(err.user_message().to_string()),
                field_errors,
            },
        }
    }
}

/// Parse, validate and persist one submission.
pub fn submit(raw_body: &str, store: &dyn ContactStore) -> Result<ContactForm, ContactError> {
    let value: Value = serde_json::from_str(raw_body).map_err(ContactError::Malformed)?;
    let form = ContactForm::from_value(&value).map_err(ContactError::Invalid)?;
    validate(&form).map_err(ContactError::Invalid)?;
    store.create(&form)?;
    Ok(form)
}

/// Endpoint handler: status mapping plus best-effort notification.
pub fn handle_submission(
    raw_body: &str,
    store: &dyn ContactStore,
    notifier: Option<&dyn ContactNotifier>,
) -> ContactResponse {
    match submit(raw_body, store) {
        Ok(form) => {
            if let Some(n) = notifier {
                if let Err(e) = n.notify(&WebhookMessage::for_submission(&form)) {
                    log::error!("[contact] webhook notify failed: {}", e);
                }
            }
            ContactResponse::ok()
        }
        Err(err) => {
            match &err {
                ContactError::Store(e) => log::error!("[contact] store failed: {}", e),
                other => log::warn!("[contact] rejected submission: {}", other),
            }
            ContactResponse::from_error(&err)
        }
    }
}

// ---------------- Client-side flow ----------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowStage {
    Editing,
    Confirming,
    Sending,
    Sent,
    Failed,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("cannot {action} while {from:?}")]
pub struct FlowError {
    pub from: FlowStage,
    pub action: &'static str,
}

/// Editing → Confirming → Sending → Sent, with Failed allowing a resend.
#[derive(Clone, Debug)]
pub struct ContactFlow {
    stage: FlowStage,
    form: ContactForm,
    field_errors: FieldErrors,
    notice: Option<String>,
}

impl Default for ContactFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactFlow {
    pub fn new() -> Self {
        Self {
            stage: FlowStage::Editing,
            form: ContactForm::default(),
            field_errors: FieldErrors::default(),
            notice: None,
        }
    }

    pub fn stage(&self) -> FlowStage {
        self.stage
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    fn guard(&self, allowed: &[FlowStage], action: &'static str) -> Result<(), FlowError> {
        if allowed.contains(&self.stage) {
            Ok(())
        } else {
            Err(FlowError {
                from: self.stage,
                action,
            })
        }
    }

    /// Validate locally and move to the confirmation step.
    /// Returns `Ok(false)` when the form stays in editing with field errors.
    pub fn review(&mut self, form: ContactForm) -> Result<bool, FlowError> {
        self.guard(&[FlowStage::Editing, FlowStage::Failed], "review")?;
        self.form = form;
        self.notice = None;
        match validate(&self.form) {
            Ok(()) => {
                self.field_errors = FieldErrors::default();
                self.stage = FlowStage::Confirming;
                Ok(true)
            }
            Err(errors) => {
                self.field_errors = errors;
                self.stage = FlowStage::Editing;
                Ok(false)
            }
        }
    }

    pub fn back(&mut self) -> Result<(), FlowError> {
        self.guard(&[FlowStage::Confirming, FlowStage::Failed], "go back")?;
        self.stage = FlowStage::Editing;
        Ok(())
    }

    /// Enter `Sending` and hand out the form to transmit.
    pub fn begin_send(&mut self) -> Result<&ContactForm, FlowError> {
        self.guard(&[FlowStage::Confirming, FlowStage::Failed], "send")?;
        self.stage = FlowStage::Sending;
        self.notice = None;
        Ok(&self.form)
    }

    /// Apply the endpoint's answer.
    pub fn finish(&mut self, status: u16, reply: Option<ContactReply>) -> Result<(), FlowError> {
        self.guard(&[FlowStage::Sending], "finish")?;
        let reply = reply.unwrap_or_default();
        match status {
            200..=299 => {
                self.stage = FlowStage::Sent;
                self.field_errors = FieldErrors::default();
                self.notice = None;
            }
            400 | 422 => {
                self.stage = FlowStage::Editing;
                self.field_errors = reply.field_errors.unwrap_or_default();
                let fallback = if status == 400 { MSG_MALFORMED } else { MSG_INVALID };
                self.notice = Some(reply.error.unwrap_or_else(|| fallback.to_string()));
            }
            _ => {
                self.stage = FlowStage::Failed;
                self.notice = Some(reply.error.unwrap_or_else(|| MSG_SERVER.to_string()));
            }
        }
        Ok(())
    }

    /// The request never produced a response.
    pub fn fail_network(&mut self) -> Result<(), FlowError> {
        self.guard(&[FlowStage::Sending], "fail")?;
        self.stage = FlowStage::Failed;
        self.notice = Some(MSG_NETWORK.to_string());
        Ok(())
    }

    /// Start over after a successful send.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("hello@taro-yamada.dev"));
        assert!(is_valid_email("first.last+tag@sub.example.co.jp"));
        assert!(!is_valid_email("no-at-sign.example.com"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email(".lead@example.com"));
        assert!(!is_valid_email("double..dot@example.com"));
        assert!(!is_valid_email("trailing.@example.com"));
        assert!(!is_valid_email("spaces in@example.com"));
    }

    #[test]
    fn field_errors_serialize_by_field_name() {
        let mut fe = FieldErrors::default();
        fe.push(ContactField::Email, "bad");
        let json = serde_json::to_string(&fe).unwrap();
        assert_eq!(json, r#"{"email":["bad"]}"#);
    }

    #[test]
    fn reply_omits_empty_parts() {
        let json = serde_json::to_string(&ContactResponse::ok().body).unwrap();
        assert_eq!(json, r#"{"ok":true}"#);
    }

    #[test]
    fn missing_fields_are_field_errors() {
        let v: Value = serde_json::json!({ "name": "A", "email": 5 });
        let errs = ContactForm::from_value(&v).unwrap_err();
        assert_eq!(
            errs.fields().collect::<Vec<_>>(),
            vec![ContactField::Email, ContactField::Message]
        );
    }
}
