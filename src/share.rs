//! Social share links.
//!
//! Each platform owns its URL scheme; we only keep a fixed template per
//! platform and percent-encode what goes into it.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::util::fill_template;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SharePlatform {
  Twitter,
  Facebook,
}

impl SharePlatform {
  pub const ALL: [SharePlatform; 2] = [SharePlatform::Twitter, SharePlatform::Facebook];

  /// URL template with `{text}` and `{url}` placeholders.
  pub fn template(self) -> &'static str {
    match self {
      SharePlatform::Twitter => "https://twitter.com/intent/tweet?text={text}&url={url}",
      SharePlatform::Facebook => "https://www.facebook.com/sharer/sharer.php?u={url}&quote={text}",
    }
  }

  /// Button label shown on the reward panel.
  pub fn label(self) -> &'static str {
    match self {
      SharePlatform::Twitter => "Share on X",
      SharePlatform::Facebook => "Share on Meta",
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      SharePlatform::Twitter => "twitter",
      SharePlatform::Facebook => "facebook",
    }
  }
}

impl FromStr for SharePlatform {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "twitter" | "x" => Ok(SharePlatform::Twitter),
      "facebook" | "meta" => Ok(SharePlatform::Facebook),
      other => Err(format!("unsupported share platform '{other}'")),
    }
  }
}

impl std::fmt::Display for SharePlatform {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

pub fn share_url(platform: SharePlatform, text: &str, page_url: &str) -> String {
  let text = urlencoding::encode(text);
  let url = urlencoding::encode(page_url);
  fill_template(platform.template(), &[("text", text.as_ref()), ("url", url.as_ref())])
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;

  const MESSAGE: &str = "System Access Granted! I passed the GlitchCore test. My style is on point. #GlitchCore #CyberpunkFashion";
  const PAGE: &str = "https://glitchcore.example/landing?ref=quiz&lang=en#top";

  fn query_params(url: &str) -> HashMap<String, String> {
    let (_, query) = url.split_once('?').unwrap();
    query
      .split('&')
      .map(|pair| {
        let (k, v) = pair.split_once('=').unwrap();
        (k.to_string(), urlencoding::decode(v).unwrap().into_owned())
      })
      .collect()
  }

  #[test]
  fn twitter_url_round_trips_text_and_address() {
    let url = share_url(SharePlatform::Twitter, MESSAGE, PAGE);
    assert!(url.starts_with("https://twitter.com/intent/tweet?"));

    let params = query_params(&url);
    assert_eq!(params.len(), 2);
    assert_eq!(params["text"], MESSAGE);
    assert_eq!(params["url"], PAGE);
  }

  #[test]
  fn facebook_url_uses_u_and_quote() {
    let url = share_url(SharePlatform::Facebook, MESSAGE, PAGE);
    assert!(url.starts_with("https://www.facebook.com/sharer/sharer.php?"));

    let params = query_params(&url);
    assert_eq!(params["u"], PAGE);
    assert_eq!(params["quote"], MESSAGE);
  }

  #[test]
  fn reserved_characters_are_escaped() {
    let url = share_url(SharePlatform::Twitter, "a&b=c #d", PAGE);
    assert!(!url.contains(' '));
    assert!(!url.contains('#'));
    assert_eq!(url.matches('&').count(), 1);
  }

  #[test]
  fn parses_platform_names() {
    assert_eq!("twitter".parse::<SharePlatform>(), Ok(SharePlatform::Twitter));
    assert_eq!("X".parse::<SharePlatform>(), Ok(SharePlatform::Twitter));
    assert_eq!("facebook".parse::<SharePlatform>(), Ok(SharePlatform::Facebook));
    assert!("myspace".parse::<SharePlatform>().is_err());
  }
}
