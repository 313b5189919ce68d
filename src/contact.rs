//! Contact form: a local draft that is handed to a sink on submit.
//!
//! Delivery is someone else's job. The form forgets its fields as soon as
//! the record has been handed off.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::util::fill_template;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
  pub name: String,
  pub email: String,
  pub message: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
  Name,
  Email,
  Message,
}

/// Receives submitted contact messages.
pub trait ContactSink: Send + Sync {
  fn deliver(&self, msg: &ContactMessage);
}

/// Records hand-offs in the log. Message bodies are logged by length only.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl ContactSink for LogSink {
  fn deliver(&self, msg: &ContactMessage) {
    info!(
      target: "contact",
      name = %msg.name,
      email = %msg.email,
      message_len = msg.message.chars().count(),
      "Contact form submitted"
    );
  }
}

/// Draft state of the form on one surface.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactForm {
  draft: ContactMessage,
}

impl From<ContactMessage> for ContactForm {
  fn from(draft: ContactMessage) -> Self {
    Self { draft }
  }
}

impl ContactForm {
  pub fn draft(&self) -> &ContactMessage {
    &self.draft
  }

  pub fn update(&mut self, field: ContactField, value: String) {
    match field {
      ContactField::Name => self.draft.name = value,
      ContactField::Email => self.draft.email = value,
      ContactField::Message => self.draft.message = value,
    }
  }

  /// Hand the draft to `sink` and clear the form. Returns the record sent.
  pub fn submit(&mut self, sink: &dyn ContactSink) -> ContactMessage {
    let msg = std::mem::take(&mut self.draft);
    sink.deliver(&msg);
    msg
  }
}

/// Acknowledgement shown to the sender.
pub fn acknowledgement(template: &str, msg: &ContactMessage) -> String {
  fill_template(template, &[("name", msg.name.as_str())])
}
