//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - Selecting and submitting quiz answers (with logging of each transition)
//!   - Handing out the access code for the copy action
//!   - Building share links
//!   - Handing contact messages to the configured sink

use tracing::{debug, info, instrument};

use crate::contact::{acknowledgement, ContactForm};
use crate::error::QuizError;
use crate::quiz::{QuizSession, Selection, Submission};
use crate::share::{share_url, SharePlatform};
use crate::state::AppState;

#[instrument(level = "debug", skip(state, session), fields(quiz_state = %session.state()))]
pub fn select_answer(state: &AppState, session: &mut QuizSession, option_id: &str) -> Result<Selection, QuizError> {
  let result = session.select_option(&state.quiz, option_id);
  match &result {
    Ok(Selection::Selected) => debug!(target: "quiz", %option_id, "Option selected"),
    Ok(Selection::Locked) => debug!(target: "quiz", %option_id, "Selection ignored: session already submitted"),
    Err(e) => debug!(target: "quiz", %option_id, error = %e, "Selection rejected"),
  }
  result
}

#[instrument(level = "debug", skip(state, session), fields(quiz_state = %session.state()))]
pub fn submit_answer(state: &AppState, session: &mut QuizSession) -> Result<Submission, QuizError> {
  let result = session.submit(&state.quiz, || state.issue_code());
  match &result {
    Ok(Submission::Correct) => {
      let code_len = session.access_code().map(|c| c.value().len()).unwrap_or_default();
      info!(target: "quiz", selected = ?session.selected_option_id(), code_len, "Correct answer; access code issued");
    }
    Ok(Submission::Incorrect) => {
      info!(target: "quiz", selected = ?session.selected_option_id(), "Incorrect answer");
    }
    Ok(Submission::AlreadySubmitted) => debug!(target: "quiz", "Repeated submit ignored"),
    Err(e) => debug!(target: "quiz", error = %e, "Submit without selection"),
  }
  result
}

/// Code and acknowledgement for the copy action, if the session earned one.
pub fn copy_code(state: &AppState, session: &QuizSession) -> Option<(String, String)> {
  let code = session.access_code()?;
  Some((code.value().to_string(), state.content.copy_ack.clone()))
}

/// Share link for `platform`, falling back to the site's public URL.
pub fn share_link(state: &AppState, platform: SharePlatform, page_url: Option<&str>) -> String {
  let page_url = page_url.filter(|u| !u.trim().is_empty()).unwrap_or(state.public_url.as_str());
  debug!(target: "quiz", %platform, %page_url, "Share link built");
  share_url(platform, &state.content.share_message, page_url)
}

/// The contact form follows the quiz: closed until the session is submitted.
pub fn ensure_contact_open(session: &QuizSession) -> Result<(), QuizError> {
  if session.submitted() { Ok(()) } else { Err(QuizError::NotSubmitted) }
}

/// Hand the form to the sink (clearing it) and return the acknowledgement.
/// Before submission the form is left untouched and nothing is delivered.
pub fn submit_contact(state: &AppState, session: &QuizSession, form: &mut ContactForm) -> Result<String, QuizError> {
  ensure_contact_open(session)?;
  let sent = form.submit(state.contact_sink.as_ref());
  Ok(acknowledgement(&state.content.contact_ack_template, &sent))
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::Arc;

  use crate::config::SiteConfig;
  use crate::contact::tests::MemorySink;
  use crate::contact::{ContactField, ContactMessage};

  fn state() -> (AppState, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::default());
    (AppState::from_config(SiteConfig::default(), sink.clone()), sink)
  }

  #[test]
  fn copy_requires_a_code() {
    let (state, _) = state();
    let mut s = QuizSession::new();
    assert!(copy_code(&state, &s).is_none());

    select_answer(&state, &mut s, "c").unwrap();
    submit_answer(&state, &mut s).unwrap();
    let (code, ack) = copy_code(&state, &s).unwrap();
    assert!(state.codes.recognizes(&code));
    assert_eq!(ack, "Access code copied to clipboard!");
  }

  #[test]
  fn unknown_option_is_rejected_without_change() {
    let (state, _) = state();
    let mut s = QuizSession::new();
    assert_eq!(select_answer(&state, &mut s, "zz"), Err(QuizError::UnknownOption("zz".into())));
    assert_eq!(s, QuizSession::Unanswered);
  }

  #[test]
  fn copy_is_refused_after_wrong_answer() {
    let (state, _) = state();
    let mut s = QuizSession::new();
    select_answer(&state, &mut s, "a").unwrap();
    submit_answer(&state, &mut s).unwrap();
    assert!(copy_code(&state, &s).is_none());
  }

  #[test]
  fn share_link_falls_back_to_public_url() {
    let (state, _) = state();
    let url = share_link(&state, SharePlatform::Twitter, None);
    assert!(url.ends_with(&format!("url={}", urlencoding::encode("http://localhost:3000/"))));

    let url = share_link(&state, SharePlatform::Twitter, Some("  "));
    assert!(url.contains(&*urlencoding::encode("http://localhost:3000/")));

    let url = share_link(&state, SharePlatform::Facebook, Some("https://glitchcore.example/"));
    assert!(url.contains("u=https%3A%2F%2Fglitchcore.example%2F"));
  }

  fn submitted_session(state: &AppState, option: &str) -> QuizSession {
    let mut s = QuizSession::new();
    select_answer(state, &mut s, option).unwrap();
    submit_answer(state, &mut s).unwrap();
    s
  }

  #[test]
  fn contact_is_closed_before_submission() {
    let (state, sink) = state();
    let mut form = ContactForm::default();
    form.update(ContactField::Name, "Molly".into());

    let mut s = QuizSession::new();
    assert_eq!(submit_contact(&state, &s, &mut form), Err(QuizError::NotSubmitted));
    select_answer(&state, &mut s, "c").unwrap();
    assert_eq!(submit_contact(&state, &s, &mut form), Err(QuizError::NotSubmitted));

    assert!(sink.received.lock().unwrap().is_empty());
    assert_eq!(form.draft().name, "Molly");
  }

  #[test]
  fn contact_opens_after_either_outcome() {
    let (state, sink) = state();
    for option in ["c", "a"] {
      let s = submitted_session(&state, option);
      assert_eq!(ensure_contact_open(&s), Ok(()));
      let mut form = ContactForm::default();
      assert!(submit_contact(&state, &s, &mut form).is_ok());
    }
    assert_eq!(sink.received.lock().unwrap().len(), 2);
  }

  #[test]
  fn contact_submit_acknowledges_and_clears() {
    let (state, sink) = state();
    let s = submitted_session(&state, "b");
    let mut form = ContactForm::default();
    form.update(ContactField::Name, "Molly".into());
    form.update(ContactField::Message, "Restock?".into());

    let ack = submit_contact(&state, &s, &mut form).unwrap();

    assert_eq!(ack, "Data-link established, Molly! We'll transmit a response shortly.");
    assert_eq!(form.draft(), &ContactMessage::default());
    assert_eq!(sink.received.lock().unwrap()[0].message, "Restock?");
  }
}
