//! Domain models: the quiz definition and its options.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::DefinitionError;
use crate::seeds::default_quiz;

/// One answer the user can pick.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
  pub id: String,
  pub label: String,
}

/// The question, its options and the id of the correct one.
/// Immutable for the lifetime of every session that uses it.
/// Fields missing from a config section fall back to the built-in quiz.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizDefinition {
  pub prompt: String,
  pub options: Vec<QuizOption>,
  pub correct_option_id: String,
}

impl Default for QuizDefinition {
  fn default() -> Self {
    default_quiz()
  }
}

impl QuizDefinition {
  /// Check the invariants a quiz must hold before sessions can run on it.
  pub fn validate(&self) -> Result<(), DefinitionError> {
    if self.prompt.trim().is_empty() {
      return Err(DefinitionError::EmptyPrompt);
    }
    if self.options.len() < 2 {
      return Err(DefinitionError::TooFewOptions { count: self.options.len() });
    }

    let mut seen = HashSet::new();
    for (index, opt) in self.options.iter().enumerate() {
      if opt.id.is_empty() {
        return Err(DefinitionError::EmptyOptionId { index });
      }
      if !seen.insert(opt.id.as_str()) {
        return Err(DefinitionError::DuplicateOption { id: opt.id.clone() });
      }
    }

    if !seen.contains(self.correct_option_id.as_str()) {
      return Err(DefinitionError::MissingCorrectOption { id: self.correct_option_id.clone() });
    }
    Ok(())
  }

  pub fn option(&self, id: &str) -> Option<&QuizOption> {
    self.options.iter().find(|o| o.id == id)
  }

  pub fn is_correct(&self, id: &str) -> bool {
    self.correct_option_id == id
  }
}
