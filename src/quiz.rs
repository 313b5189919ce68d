//! Quiz session state machine.
//!
//! ```text
//! Unanswered --select--> Answered --select--> Answered
//!                           |
//!                         submit
//!                           v
//!            SubmittedCorrect | SubmittedIncorrect   (terminal)
//! ```
//!
//! A session never leaves a submitted state: later selections and submits
//! are no-ops. The access code is produced inside the correct transition,
//! so it exists exactly when the session is `SubmittedCorrect`.

use serde::Serialize;

use crate::domain::QuizDefinition;
use crate::error::QuizError;
use crate::reward::AccessCode;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum QuizSession {
  #[default]
  Unanswered,
  Answered {
    selected_option_id: String,
  },
  SubmittedCorrect {
    selected_option_id: String,
    access_code: AccessCode,
  },
  SubmittedIncorrect {
    selected_option_id: String,
  },
}

/// Field-less view of the session state, for logs and wire messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizState {
  Unanswered,
  Answered,
  SubmittedCorrect,
  SubmittedIncorrect,
}

impl std::fmt::Display for QuizState {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let s = match self {
      QuizState::Unanswered => "unanswered",
      QuizState::Answered => "answered",
      QuizState::SubmittedCorrect => "submitted_correct",
      QuizState::SubmittedIncorrect => "submitted_incorrect",
    };
    f.write_str(s)
  }
}

/// Result of a `select_option` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
  Selected,
  /// Session already submitted; nothing changed.
  Locked,
}

/// Result of a `submit` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Submission {
  Correct,
  Incorrect,
  /// Session already submitted; nothing changed.
  AlreadySubmitted,
}

impl QuizSession {
  pub fn new() -> Self {
    Self::Unanswered
  }

  pub fn state(&self) -> QuizState {
    match self {
      Self::Unanswered => QuizState::Unanswered,
      Self::Answered { .. } => QuizState::Answered,
      Self::SubmittedCorrect { .. } => QuizState::SubmittedCorrect,
      Self::SubmittedIncorrect { .. } => QuizState::SubmittedIncorrect,
    }
  }

  pub fn selected_option_id(&self) -> Option<&str> {
    match self {
      Self::Unanswered => None,
      Self::Answered { selected_option_id }
      | Self::SubmittedCorrect { selected_option_id, .. }
      | Self::SubmittedIncorrect { selected_option_id } => Some(selected_option_id),
    }
  }

  pub fn submitted(&self) -> bool {
    matches!(self, Self::SubmittedCorrect { .. } | Self::SubmittedIncorrect { .. })
  }

  /// `Some` exactly when the session has been submitted.
  pub fn is_correct(&self) -> Option<bool> {
    match self {
      Self::SubmittedCorrect { .. } => Some(true),
      Self::SubmittedIncorrect { .. } => Some(false),
      Self::Unanswered | Self::Answered { .. } => None,
    }
  }

  pub fn access_code(&self) -> Option<&AccessCode> {
    match self {
      Self::SubmittedCorrect { access_code, .. } => Some(access_code),
      _ => None,
    }
  }

  /// Select an option. Replaces any earlier selection.
  pub fn select_option(&mut self, quiz: &QuizDefinition, option_id: &str) -> Result<Selection, QuizError> {
    if self.submitted() {
      return Ok(Selection::Locked);
    }
    if quiz.option(option_id).is_none() {
      return Err(QuizError::UnknownOption(option_id.to_string()));
    }
    *self = Self::Answered { selected_option_id: option_id.to_string() };
    Ok(Selection::Selected)
  }

  /// Lock the selection and grade it. `generate` runs only on a correct
  /// answer, and at most once per session since the result is terminal.
  pub fn submit<F>(&mut self, quiz: &QuizDefinition, generate: F) -> Result<Submission, QuizError>
  where
    F: FnOnce() -> AccessCode,
  {
    let selected_option_id = match self {
      Self::Unanswered => return Err(QuizError::NoSelection),
      Self::SubmittedCorrect { .. } | Self::SubmittedIncorrect { .. } => return Ok(Submission::AlreadySubmitted),
      Self::Answered { selected_option_id } => std::mem::take(selected_option_id),
    };

    if quiz.is_correct(&selected_option_id) {
      *self = Self::SubmittedCorrect { selected_option_id, access_code: generate() };
      Ok(Submission::Correct)
    } else {
      *self = Self::SubmittedIncorrect { selected_option_id };
      Ok(Submission::Incorrect)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::reward::AccessCodeGenerator;
  use crate::seeds::default_quiz;
  use std::cell::Cell;

  fn counting_generator(calls: &Cell<u32>) -> impl FnOnce() -> AccessCode + '_ {
    move || {
      calls.set(calls.get() + 1);
      AccessCodeGenerator::default().generate(&mut rand::thread_rng())
    }
  }

  fn assert_invariants(s: &QuizSession) {
    assert_eq!(s.is_correct().is_some(), s.submitted());
    assert_eq!(s.access_code().is_some(), s.is_correct() == Some(true));
  }

  #[test]
  fn starts_unanswered() {
    let s = QuizSession::new();
    assert_eq!(s.state(), QuizState::Unanswered);
    assert_eq!(s.selected_option_id(), None);
    assert!(!s.submitted());
    assert_invariants(&s);
  }

  #[test]
  fn submit_without_selection_is_rejected() {
    let quiz = default_quiz();
    let calls = Cell::new(0);
    let mut s = QuizSession::new();
    assert_eq!(s.submit(&quiz, counting_generator(&calls)), Err(QuizError::NoSelection));
    assert_eq!(s.state(), QuizState::Unanswered);
    assert_eq!(calls.get(), 0);
    assert_invariants(&s);
  }

  #[test]
  fn correct_answer_issues_exactly_one_code() {
    let quiz = default_quiz();
    let calls = Cell::new(0);
    let mut s = QuizSession::new();
    assert_eq!(s.select_option(&quiz, "c"), Ok(Selection::Selected));
    assert_eq!(s.state(), QuizState::Answered);
    assert_eq!(s.submit(&quiz, counting_generator(&calls)), Ok(Submission::Correct));

    assert_eq!(s.state(), QuizState::SubmittedCorrect);
    assert_eq!(s.is_correct(), Some(true));
    assert_eq!(calls.get(), 1);
    assert!(s.access_code().is_some());
    assert_invariants(&s);
  }

  #[test]
  fn wrong_answers_issue_no_code() {
    let quiz = default_quiz();
    for id in ["a", "b", "d"] {
      let calls = Cell::new(0);
      let mut s = QuizSession::new();
      s.select_option(&quiz, id).unwrap();
      assert_eq!(s.submit(&quiz, counting_generator(&calls)), Ok(Submission::Incorrect));
      assert_eq!(s.is_correct(), Some(false), "option {id}");
      assert_eq!(calls.get(), 0, "option {id}");
      assert!(s.access_code().is_none());
      assert_invariants(&s);
    }
  }

  #[test]
  fn last_selection_wins() {
    let quiz = default_quiz();
    let mut s = QuizSession::new();
    s.select_option(&quiz, "a").unwrap();
    s.select_option(&quiz, "b").unwrap();
    assert_eq!(s.selected_option_id(), Some("b"));
    s.submit(&quiz, || unreachable!("b is not the correct option")).unwrap();
    assert_eq!(s.selected_option_id(), Some("b"));
    assert_eq!(s.state(), QuizState::SubmittedIncorrect);
  }

  #[test]
  fn submitted_session_is_terminal() {
    let quiz = default_quiz();
    let calls = Cell::new(0);
    let mut s = QuizSession::new();
    s.select_option(&quiz, "c").unwrap();
    s.submit(&quiz, counting_generator(&calls)).unwrap();
    let snapshot = s.clone();

    assert_eq!(s.select_option(&quiz, "a"), Ok(Selection::Locked));
    assert_eq!(s.submit(&quiz, counting_generator(&calls)), Ok(Submission::AlreadySubmitted));
    assert_eq!(s.submit(&quiz, counting_generator(&calls)), Ok(Submission::AlreadySubmitted));

    assert_eq!(s, snapshot);
    assert_eq!(calls.get(), 1);
    assert_invariants(&s);
  }

  #[test]
  fn incorrect_session_is_terminal_too() {
    let quiz = default_quiz();
    let mut s = QuizSession::new();
    s.select_option(&quiz, "d").unwrap();
    s.submit(&quiz, || unreachable!()).unwrap();
    let snapshot = s.clone();

    assert_eq!(s.select_option(&quiz, "c"), Ok(Selection::Locked));
    assert_eq!(s.submit(&quiz, || unreachable!()), Ok(Submission::AlreadySubmitted));
    assert_eq!(s, snapshot);
  }

  #[test]
  fn unknown_option_leaves_state_alone() {
    let quiz = default_quiz();
    let mut s = QuizSession::new();
    s.select_option(&quiz, "a").unwrap();
    assert_eq!(s.select_option(&quiz, "z"), Err(QuizError::UnknownOption("z".into())));
    assert_eq!(s.selected_option_id(), Some("a"));
  }
}
