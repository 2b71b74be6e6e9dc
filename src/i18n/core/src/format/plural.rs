/* src/i18n/core/src/format/plural.rs */

//! CLDR plural category selection.

use fixed_decimal::{Decimal, FloatPrecision};
use icu::plurals::PluralRules;
use tracing::debug;

use crate::locale::Locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluralCategory {
  Zero,
  One,
  Two,
  Few,
  Many,
  Other,
}

impl PluralCategory {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Zero => "zero",
      Self::One => "one",
      Self::Two => "two",
      Self::Few => "few",
      Self::Many => "many",
      Self::Other => "other",
    }
  }

  pub fn from_keyword(keyword: &str) -> Option<Self> {
    match keyword {
      "zero" => Some(Self::Zero),
      "one" => Some(Self::One),
      "two" => Some(Self::Two),
      "few" => Some(Self::Few),
      "many" => Some(Self::Many),
      "other" => Some(Self::Other),
      _ => None,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluralKind {
  Cardinal,
  Ordinal,
}

/// Select the plural category for `n` in `locale` from CLDR plural rules.
pub fn select(locale: &Locale, kind: PluralKind, n: f64) -> PluralCategory {
  let Ok(operands) = Decimal::try_from_f64(n.abs(), FloatPrecision::RoundTrip) else {
    return PluralCategory::Other;
  };
  let prefs = locale.to_icu(&[]).into();
  let rules = match kind {
    PluralKind::Cardinal => PluralRules::try_new_cardinal(prefs),
    PluralKind::Ordinal => PluralRules::try_new_ordinal(prefs),
  };
  match rules {
    Ok(rules) => rules.category_for(&operands).into(),
    Err(e) => {
      debug!(locale = %locale, error = %e, "no plural rules, using other");
      PluralCategory::Other
    }
  }
}

impl From<icu::plurals::PluralCategory> for PluralCategory {
  fn from(category: icu::plurals::PluralCategory) -> Self {
    use icu::plurals::PluralCategory as Cldr;
    match category {
      Cldr::Zero => Self::Zero,
      Cldr::One => Self::One,
      Cldr::Two => Self::Two,
      Cldr::Few => Self::Few,
      Cldr::Many => Self::Many,
      Cldr::Other => Self::Other,
    }
  }
}
