/* src/i18n/core/src/format/mod.rs */

pub mod datetime;
pub mod list;
pub mod message;
pub mod number;
pub mod plural;
pub mod relative;
pub mod zone;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use datetime::{DateTimeOptions, Digits, MonthWidth, Style, WeekdayWidth};
pub use list::{ListOptions, ListType};
pub use number::{NumberOptions, NumberStyle};
pub use zone::TimeZone;

/// Named format presets shared by formatters and message arguments
/// (`{price, number, money}`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Formats {
  #[serde(skip_serializing_if = "BTreeMap::is_empty")]
  pub date_time: BTreeMap<String, DateTimeOptions>,
  #[serde(skip_serializing_if = "BTreeMap::is_empty")]
  pub number: BTreeMap<String, NumberOptions>,
  #[serde(skip_serializing_if = "BTreeMap::is_empty")]
  pub list: BTreeMap<String, ListOptions>,
}

impl Formats {
  pub fn is_empty(&self) -> bool {
    self.date_time.is_empty() && self.number.is_empty() && self.list.is_empty()
  }

  /// User presets first, then built-ins.
  pub fn date_time(&self, name: &str) -> Option<DateTimeOptions> {
    self.date_time.get(name).cloned().or_else(|| DateTimeOptions::builtin(name))
  }

  pub fn number(&self, name: &str) -> Option<NumberOptions> {
    self.number.get(name).cloned().or_else(|| NumberOptions::builtin(name))
  }

  pub fn list(&self, name: &str) -> Option<ListOptions> {
    self.list.get(name).cloned().or_else(|| ListOptions::builtin(name))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn user_presets_shadow_builtins() {
    let mut formats = Formats::default();
    assert!(formats.is_empty());
    formats.number.insert(
      "integer".into(),
      NumberOptions { minimum_fraction_digits: Some(1), ..NumberOptions::default() },
    );
    assert_eq!(formats.number("integer").unwrap().minimum_fraction_digits, Some(1));
    assert_eq!(formats.number("percent").unwrap().style, NumberStyle::Percent);
    assert!(formats.number("nope").is_none());
    assert!(formats.date_time("short").is_some());
    assert!(formats.list("or").is_some());
  }

  #[test]
  fn deserializes_preset_tables() {
    let formats: Formats = serde_json::from_value(serde_json::json!({
      "date_time": { "short": { "date_style": "short" } },
      "number": { "money": { "style": "currency", "currency": "EUR" } }
    }))
    .unwrap();
    assert_eq!(formats.date_time("short").unwrap().date_style, Some(Style::Short));
    assert_eq!(formats.number("money").unwrap().currency.as_deref(), Some("EUR"));
  }
}
