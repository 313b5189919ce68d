//! Error types: domain errors for the quiz core and their HTTP mapping.
//!
//! Every HTTP error produces a JSON body with a machine-readable `error`
//! field and a human-readable `message`.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Errors from quiz session transitions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuizError {
  /// Submit was attempted before any option was selected.
  #[error("no option selected")]
  NoSelection,

  /// The option id is not part of the quiz.
  #[error("unknown option '{0}'")]
  UnknownOption(String),

  /// The contact form opens only once the quiz has been submitted.
  #[error("quiz not submitted yet")]
  NotSubmitted,
}

/// Errors found while validating a quiz definition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DefinitionError {
  #[error("quiz prompt is empty")]
  EmptyPrompt,

  #[error("quiz needs at least 2 options, got {count}")]
  TooFewOptions { count: usize },

  #[error("quiz option #{index} has an empty id")]
  EmptyOptionId { index: usize },

  #[error("quiz option id '{id}' is used more than once")]
  DuplicateOption { id: String },

  #[error("correct option '{id}' is not one of the quiz options")]
  MissingCorrectOption { id: String },
}

/// Application-level error returned from HTTP handlers.
#[derive(Debug)]
pub enum AppError {
  /// Submit without a selection; carries the user-facing prompt.
  NoSelection(String),
  /// Requested session or code not found.
  NotFound(String),
  /// Client sent invalid input.
  BadRequest(String),
  /// Action not available in the session's current state.
  NotSubmitted(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
  error: &'static str,
  message: String,
}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
    let (status, error_type, message) = match self {
      Self::NoSelection(msg) => (StatusCode::UNPROCESSABLE_ENTITY, "no_selection", msg),
      Self::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
      Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
      Self::NotSubmitted(msg) => (StatusCode::CONFLICT, "not_submitted", msg),
    };

    (status, axum::Json(ErrorBody { error: error_type, message })).into_response()
  }
}

impl From<QuizError> for AppError {
  fn from(err: QuizError) -> Self {
    match err {
      QuizError::NoSelection => Self::NoSelection(err.to_string()),
      QuizError::UnknownOption(_) => Self::BadRequest(err.to_string()),
      QuizError::NotSubmitted => Self::NotSubmitted(err.to_string()),
    }
  }
}

impl From<JsonRejection> for AppError {
  fn from(rejection: JsonRejection) -> Self {
    Self::BadRequest(rejection.body_text())
  }
}

impl From<QueryRejection> for AppError {
  fn from(rejection: QueryRejection) -> Self {
    Self::BadRequest(rejection.body_text())
  }
}
