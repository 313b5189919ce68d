//! Built-in content: the GlitchCore quiz served when no config overrides it.

use crate::domain::{QuizDefinition, QuizOption};

/// The landing-page quiz. Option `c` is the correct answer.
pub fn default_quiz() -> QuizDefinition {
  QuizDefinition {
    prompt: "Your operating system just crashed. What's your first thought?".into(),
    options: vec![
      option("a", "Reboot and optimize."),
      option("b", "Blame the megacorp."),
      option("c", "Hack a workaround, then upgrade to a neural interface."),
      option("d", "Wait for the system to fix itself."),
    ],
    correct_option_id: "c".into(),
  }
}

fn option(id: &str, label: &str) -> QuizOption {
  QuizOption { id: id.into(), label: label.into() }
}
