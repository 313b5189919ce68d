//! Access code generation for users who pass the quiz.
//!
//! Codes are a fixed prefix plus 5 characters from `0-9A-Z`, short enough
//! to read aloud. They are promotional, not secrets.

use rand::Rng;
use serde::Serialize;

pub const DEFAULT_CODE_PREFIX: &str = "GLITCH";
pub const SUFFIX_LEN: usize = 5;
const ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AccessCode {
  value: String,
}

impl AccessCode {
  pub fn value(&self) -> &str {
    &self.value
  }
}

#[derive(Clone, Debug)]
pub struct AccessCodeGenerator {
  prefix: String,
}

impl Default for AccessCodeGenerator {
  fn default() -> Self {
    Self::new(DEFAULT_CODE_PREFIX)
  }
}

impl AccessCodeGenerator {
  pub fn new(prefix: impl Into<String>) -> Self {
    Self { prefix: prefix.into() }
  }

  pub fn prefix(&self) -> &str {
    &self.prefix
  }

  pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> AccessCode {
    let mut value = String::with_capacity(self.prefix.len() + SUFFIX_LEN);
    value.push_str(&self.prefix);
    for _ in 0..SUFFIX_LEN {
      value.push(ALPHABET[rng.gen_range(0..ALPHABET.len())] as char);
    }
    AccessCode { value }
  }

  /// True if `code` has this generator's prefix followed by a valid suffix.
  #[cfg(test)]
  pub fn recognizes(&self, code: &str) -> bool {
    match code.strip_prefix(self.prefix.as_str()) {
      Some(suffix) => {
        suffix.len() == SUFFIX_LEN
          && suffix.bytes().all(|b| b.is_ascii_digit() || b.is_ascii_uppercase())
      }
      None => false,
    }
  }
}
