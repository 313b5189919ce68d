//! Chooses what the page shows for a session snapshot.
//!
//! Pure mapping from session state to one of three panels; it never
//! advances the session.

use serde::Serialize;

use crate::config::{Link, SiteContent};
use crate::domain::QuizDefinition;
use crate::quiz::QuizSession;
use crate::share::SharePlatform;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OptionView {
  pub id: String,
  pub label: String,
  pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ShareTarget {
  pub platform: SharePlatform,
  pub label: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "panel", rename_all = "snake_case")]
pub enum Panel {
  /// Not submitted yet: question, options and the submit control.
  Question {
    prompt: String,
    options: Vec<OptionView>,
    #[serde(rename = "canSubmit")]
    can_submit: bool,
  },
  /// Submitted and correct.
  Reward {
    verdict: String,
    headline: String,
    offer: String,
    #[serde(rename = "accessCode")]
    access_code: String,
    catalog: Link,
    #[serde(rename = "shareHeading")]
    share_heading: String,
    #[serde(rename = "sharePitch")]
    share_pitch: String,
    shares: Vec<ShareTarget>,
    /// Present once submitted: the contact form opens with either outcome.
    #[serde(rename = "contactHeading")]
    contact_heading: String,
  },
  /// Submitted and wrong.
  Retry {
    verdict: String,
    headline: String,
    pitch: String,
    links: Vec<Link>,
    #[serde(rename = "calibrateHeading")]
    calibrate_heading: String,
    #[serde(rename = "calibratePitch")]
    calibrate_pitch: String,
    #[serde(rename = "styleQuiz")]
    style_quiz: Link,
    #[serde(rename = "contactHeading")]
    contact_heading: String,
  },
}

pub fn present(quiz: &QuizDefinition, content: &SiteContent, session: &QuizSession) -> Panel {
  match session {
    QuizSession::Unanswered | QuizSession::Answered { .. } => {
      let selected = session.selected_option_id();
      Panel::Question {
        prompt: quiz.prompt.clone(),
        options: quiz
          .options
          .iter()
          .map(|o| OptionView {
            id: o.id.clone(),
            label: o.label.clone(),
            selected: selected == Some(o.id.as_str()),
          })
          .collect(),
        can_submit: selected.is_some(),
      }
    }
    QuizSession::SubmittedCorrect { access_code, .. } => Panel::Reward {
      verdict: content.verdict_correct.clone(),
      headline: content.reward_headline.clone(),
      offer: content.reward_offer.clone(),
      access_code: access_code.value().to_string(),
      catalog: content.catalog.clone(),
      share_heading: content.share_heading.clone(),
      share_pitch: content.share_pitch.clone(),
      shares: SharePlatform::ALL
        .iter()
        .map(|&platform| ShareTarget { platform, label: platform.label() })
        .collect(),
      contact_heading: content.contact_heading.clone(),
    },
    QuizSession::SubmittedIncorrect { .. } => Panel::Retry {
      verdict: content.verdict_incorrect.clone(),
      headline: content.retry_headline.clone(),
      pitch: content.retry_pitch.clone(),
      links: content.retry_links.clone(),
      calibrate_heading: content.calibrate_heading.clone(),
      calibrate_pitch: content.calibrate_pitch.clone(),
      style_quiz: content.style_quiz.clone(),
      contact_heading: content.contact_heading.clone(),
    },
  }
}
