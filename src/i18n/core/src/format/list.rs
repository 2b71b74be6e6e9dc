/* src/i18n/core/src/format/list.rs */

use icu::list::ListFormatter;
use icu::list::options::{ListFormatterOptions, ListLength};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::locale::Locale;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListType {
  #[default]
  Conjunction,
  Disjunction,
  Unit,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListOptions {
  #[serde(rename = "type")]
  pub list_type: ListType,
}

impl ListOptions {
  pub fn builtin(name: &str) -> Option<Self> {
    let list_type = match name {
      "and" | "conjunction" => ListType::Conjunction,
      "or" | "disjunction" => ListType::Disjunction,
      "unit" => ListType::Unit,
      _ => return None,
    };
    Some(Self { list_type })
  }
}

/// Join `items` into a locale-appropriate list. Locales without list data
/// fall back to a plain comma join.
pub fn format_list<S: AsRef<str>>(locale: &Locale, items: &[S], options: &ListOptions) -> String {
  let prefs = locale.to_icu(&[]).into();
  let wide = ListFormatterOptions::default().with_length(ListLength::Wide);
  let formatter = match options.list_type {
    ListType::Conjunction => ListFormatter::try_new_and(prefs, wide),
    ListType::Disjunction => ListFormatter::try_new_or(prefs, wide),
    ListType::Unit => ListFormatter::try_new_unit(prefs, wide),
  };
  match formatter {
    Ok(formatter) => formatter.format_to_string(items.iter().map(AsRef::<str>::as_ref)),
    Err(e) => {
      debug!(locale = %locale, error = %e, "no list data, joining with commas");
      items.iter().map(AsRef::<str>::as_ref).collect::<Vec<&str>>().join(", ")
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn list(locale: &str, items: &[&str], kind: &str) -> String {
    let opts = ListOptions::builtin(kind).unwrap();
    format_list(&Locale::parse(locale).unwrap(), items, &opts)
  }

  #[test]
  fn trivial_lengths() {
    assert_eq!(list("en", &[], "and"), "");
    assert_eq!(list("en", &["a"], "and"), "a");
    assert_eq!(list("en", &["a", "b"], "and"), "a and b");
  }

  #[test]
  fn english_oxford_comma() {
    assert_eq!(list("en", &["a", "b", "c"], "and"), "a, b, and c");
    assert_eq!(list("en-GB", &["a", "b", "c"], "and"), "a, b and c");
    assert_eq!(list("en", &["a", "b", "c"], "or"), "a, b, or c");
    assert_eq!(list("en", &["a", "b", "c"], "unit"), "a, b, c");
  }

  #[test]
  fn other_languages() {
    assert_eq!(list("de", &["Rot", "Grün", "Blau"], "and"), "Rot, Grün und Blau");
    assert_eq!(list("ru", &["a", "b"], "and"), "a и b");
    assert_eq!(list("fr", &["a", "b"], "or"), "a ou b");
    assert_eq!(list("es", &["a", "b", "c"], "and"), "a, b y c");
    assert_eq!(list("ja", &["りんご", "みかん", "ぶどう"], "and"), "りんご、みかん、ぶどう");
    assert_eq!(list("zh", &["甲", "乙", "丙"], "and"), "甲、乙和丙");
  }

  #[test]
  fn accepts_owned_strings() {
    let items = vec!["x".to_string(), "y".to_string()];
    let en = Locale::parse("en").unwrap();
    assert_eq!(format_list(&en, &items, &ListOptions::default()), "x and y");
  }
}
