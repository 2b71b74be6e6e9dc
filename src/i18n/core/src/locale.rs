/* src/i18n/core/src/locale.rs */

use std::fmt;
use std::str::FromStr;

use icu::locale::extensions::unicode::{Key, Value};
use icu::locale::locale;
use serde::{Deserialize, Serialize};

use crate::errors::I18nError;

/// A validated, canonicalized BCP 47 language tag (`en`, `en-US`, `zh-Hant-TW`).
///
/// Parsed by ICU's locale parser. Underscores are accepted as separators on
/// input (`en_US`) and normalized to hyphens. Casing follows the registry
/// conventions: lowercase language, titlecase script, uppercase region.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale(String);

impl Locale {
  pub fn parse(raw: &str) -> Result<Self, I18nError> {
    let tag = raw.trim().replace('_', "-");
    if tag.is_empty() {
      return Err(I18nError::InvalidLocale(raw.to_string()));
    }
    tag
      .parse::<icu::locale::Locale>()
      .map(|parsed| Self(parsed.to_string()))
      .map_err(|_| I18nError::InvalidLocale(raw.to_string()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Primary language subtag, e.g. `zh` for `zh-Hant-TW`.
  pub fn language(&self) -> &str {
    self.0.split('-').next().unwrap_or_default()
  }

  /// The tag as an ICU locale, with Unicode extension keywords appended
  /// (`[("hc", "h12")]`). Keywords the tag already carries are replaced.
  pub(crate) fn to_icu(&self, keywords: &[(&str, &str)]) -> icu::locale::Locale {
    let mut locale = self.0.parse::<icu::locale::Locale>().unwrap_or(locale!("und"));
    for (key, value) in keywords {
      if let (Ok(key), Ok(value)) = (key.parse::<Key>(), value.parse::<Value>()) {
        locale.extensions.unicode.keywords.set(key, value);
      }
    }
    locale
  }
}

impl fmt::Display for Locale {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl FromStr for Locale {
  type Err = I18nError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::parse(s)
  }
}

impl TryFrom<String> for Locale {
  type Error = I18nError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    Self::parse(&value)
  }
}

impl From<Locale> for String {
  fn from(locale: Locale) -> Self {
    locale.0
  }
}

impl AsRef<str> for Locale {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

impl PartialEq<str> for Locale {
  fn eq(&self, other: &str) -> bool {
    self.0 == other
  }
}

impl PartialEq<&str> for Locale {
  fn eq(&self, other: &&str) -> bool {
    self.0 == *other
  }
}
