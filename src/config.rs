//! Loading site configuration (quiz, reward prefix, page copy) from TOML.
//!
//! Every section is optional; missing values fall back to the built-in
//! GlitchCore landing page. See `SiteConfig` for the expected schema.

use serde::Deserialize;
use tracing::{error, info, warn};

use crate::domain::QuizDefinition;
use crate::reward::DEFAULT_CODE_PREFIX;
use crate::seeds::default_quiz;

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
  /// Address shared on social platforms when the client does not send one.
  pub public_url: String,
  /// Idle lifetime of an HTTP quiz session.
  pub session_ttl_secs: u64,
  pub quiz: QuizDefinition,
  pub reward: RewardCfg,
  pub content: SiteContent,
}

impl Default for SiteConfig {
  fn default() -> Self {
    Self {
      public_url: "http://localhost:3000/".into(),
      session_ttl_secs: 3600,
      quiz: QuizDefinition::default(),
      reward: RewardCfg::default(),
      content: SiteContent::default(),
    }
  }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RewardCfg {
  pub code_prefix: String,
}

impl Default for RewardCfg {
  fn default() -> Self {
    Self { code_prefix: DEFAULT_CODE_PREFIX.into() }
  }
}

/// A labelled link on one of the follow-up panels.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, serde::Serialize)]
pub struct Link {
  pub label: String,
  pub href: String,
}

impl Link {
  fn new(label: &str, href: &str) -> Self {
    Self { label: label.into(), href: href.into() }
  }
}

/// User-facing copy for every panel and acknowledgement.
/// `contact_ack_template` accepts a `{name}` placeholder.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SiteContent {
  pub no_selection_prompt: String,
  // result banners
  pub verdict_correct: String,
  pub verdict_incorrect: String,
  // reward panel
  pub reward_headline: String,
  pub reward_offer: String,
  pub catalog: Link,
  pub share_heading: String,
  pub share_pitch: String,
  pub share_message: String,
  pub copy_ack: String,
  // retry panel
  pub retry_headline: String,
  pub retry_pitch: String,
  pub retry_links: Vec<Link>,
  pub calibrate_heading: String,
  pub calibrate_pitch: String,
  pub style_quiz: Link,
  // contact form
  pub contact_heading: String,
  pub contact_locked_prompt: String,
  pub contact_ack_template: String,
}

impl Default for SiteContent {
  fn default() -> Self {
    Self {
      no_selection_prompt: "Select a response, citizen.".into(),
      verdict_correct: "System Access Granted: You're one of us. Welcome to the Core.".into(),
      verdict_incorrect: "Error 404: Style Not Found. Initiate GlitchCore Protocol.".into(),
      reward_headline: "Inner Core Access Unlocked!".into(),
      reward_offer: "As a verified member, enjoy 20% off your first Glitch-Gear purchase! Use code:".into(),
      catalog: Link::new("Access Glitch-Gear Catalog", "#shop-now"),
      share_heading: "Transmit Your Status!".into(),
      share_pitch: "Let the network know your cyber-cred is verified!".into(),
      share_message: "System Access Granted! I passed the GlitchCore test. My style is on point. #GlitchCore #CyberpunkFashion".into(),
      copy_ack: "Access code copied to clipboard!".into(),
      retry_headline: "Initiate GlitchCore Protocol!".into(),
      retry_pitch: "Your aesthetic needs an upgrade. Let us re-program your wardrobe.".into(),
      retry_links: vec![
        Link::new("Explore Core Concepts", "#core-concepts"),
        Link::new("View Entry Point Collection", "#entry-point"),
      ],
      calibrate_heading: "Calibrate Your Look?".into(),
      calibrate_pitch: "Take our 'Cyber-Style Architect' quiz to find your perfect gear.".into(),
      style_quiz: Link::new("Run Style Diagnostics", "#style-quiz"),
      contact_heading: "Need a direct data-link?".into(),
      contact_locked_prompt: "Complete the quiz to open a data-link.".into(),
      contact_ack_template: "Data-link established, {name}! We'll transmit a response shortly.".into(),
    }
  }
}

impl SiteConfig {
  /// Parse TOML and replace an invalid quiz with the built-in one.
  pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
    let mut cfg = toml::from_str::<SiteConfig>(s)?;
    if let Err(e) = cfg.quiz.validate() {
      error!(target: "glitchcore", error = %e, "Configured quiz is invalid; using built-in quiz");
      cfg.quiz = default_quiz();
    }
    if cfg.reward.code_prefix.is_empty() {
      warn!(target: "glitchcore", "Empty reward code prefix; codes will be bare 5-character suffixes");
    }
    Ok(cfg)
  }
}

/// Load `SiteConfig` from SITE_CONFIG_PATH. Any IO/parse error falls back to defaults.
pub fn load_site_config_from_env() -> SiteConfig {
  let Ok(path) = std::env::var("SITE_CONFIG_PATH") else {
    info!(target: "glitchcore", "SITE_CONFIG_PATH not set; using built-in site config");
    return SiteConfig::default();
  };
  match std::fs::read_to_string(&path) {
    Ok(s) => match SiteConfig::from_toml_str(&s) {
      Ok(cfg) => {
        info!(target: "glitchcore", %path, "Loaded site config (TOML)");
        cfg
      }
      Err(e) => {
        error!(target: "glitchcore", %path, error = %e, "Failed to parse TOML config");
        SiteConfig::default()
      }
    },
    Err(e) => {
      error!(target: "glitchcore", %path, error = %e, "Failed to read TOML config file");
      SiteConfig::default()
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_toml_yields_defaults() {
    let cfg = SiteConfig::from_toml_str("").unwrap();
    assert_eq!(cfg.quiz, default_quiz());
    assert_eq!(cfg.reward.code_prefix, "GLITCH");
    assert_eq!(cfg.session_ttl_secs, 3600);
    assert_eq!(cfg.content.retry_links.len(), 2);
  }

  #[test]
  fn overrides_quiz_and_copy() {
    let cfg = SiteConfig::from_toml_str(
      r##"
public_url = "https://glitchcore.example/"

[quiz]
prompt = "Pick your layer"
correct_option_id = "shell"
options = [
  { id = "shell", label = "Waterproof shell" },
  { id = "hoodie", label = "Cotton hoodie" },
]

[reward]
code_prefix = "CORE"

[content]
verdict_correct = "Welcome in."
"##,
    )
    .unwrap();

    assert_eq!(cfg.public_url, "https://glitchcore.example/");
    assert_eq!(cfg.quiz.correct_option_id, "shell");
    assert_eq!(cfg.quiz.options.len(), 2);
    assert_eq!(cfg.reward.code_prefix, "CORE");
    assert_eq!(cfg.content.verdict_correct, "Welcome in.");
    // untouched copy keeps its default
    assert_eq!(cfg.content.copy_ack, "Access code copied to clipboard!");
  }

  #[test]
  fn partial_quiz_section_keeps_builtin_options() {
    let cfg = SiteConfig::from_toml_str(
      r#"
public_url = "https://glitchcore.example/"
session_ttl_secs = 60

[quiz]
prompt = "Your deck just fried. Now what?"
"#,
    )
    .unwrap();
    assert_eq!(cfg.public_url, "https://glitchcore.example/");
    assert_eq!(cfg.session_ttl_secs, 60);
    assert_eq!(cfg.quiz.prompt, "Your deck just fried. Now what?");
    assert_eq!(cfg.quiz.options, default_quiz().options);
    assert_eq!(cfg.quiz.correct_option_id, "c");
  }

  #[test]
  fn invalid_quiz_falls_back_to_builtin() {
    let cfg = SiteConfig::from_toml_str(
      r#"
[quiz]
prompt = "Broken"
correct_option_id = "x"
options = [{ id = "a", label = "A" }, { id = "b", label = "B" }]
"#,
    )
    .unwrap();
    assert_eq!(cfg.quiz, default_quiz());
  }

  #[test]
  fn example_config_parses() {
    let cfg = SiteConfig::from_toml_str(include_str!("../config/site.example.toml")).unwrap();
    assert_eq!(cfg.quiz, default_quiz());
    assert_eq!(cfg.public_url, "https://glitchcore.example/");
    assert_eq!(cfg.content.catalog.href, "#shop-now");
  }

  #[test]
  fn malformed_toml_is_an_error() {
    assert!(SiteConfig::from_toml_str("session_ttl_secs = \"soon\"").is_err());
  }
}
