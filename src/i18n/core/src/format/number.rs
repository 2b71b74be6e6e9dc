/* src/i18n/core/src/format/number.rs */

use fixed_decimal::{Decimal, FloatPrecision};
use icu::decimal::DecimalFormatter;
use icu::decimal::options::{DecimalFormatterOptions, GroupingStrategy};
use serde::{Deserialize, Serialize};

use crate::errors::I18nError;
use crate::locale::Locale;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberStyle {
  #[default]
  Decimal,
  Percent,
  Currency,
}

/// Number format preset, usable inline or by name through `formats.number`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberOptions {
  pub style: NumberStyle,
  /// ISO 4217 code, required for `style = "currency"`.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub currency: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub minimum_fraction_digits: Option<u8>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub maximum_fraction_digits: Option<u8>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub use_grouping: Option<bool>,
}

impl NumberOptions {
  /// Built-in named presets available without configuration.
  pub fn builtin(name: &str) -> Option<Self> {
    match name {
      "integer" => Some(Self { maximum_fraction_digits: Some(0), ..Self::default() }),
      "percent" => Some(Self { style: NumberStyle::Percent, ..Self::default() }),
      "precise" => Some(Self { maximum_fraction_digits: Some(6), ..Self::default() }),
      _ => None,
    }
  }
}

/// Highest fraction digit count honoured; larger requests are clamped.
pub const MAX_FRACTION_DIGITS: u8 = 20;

/// Affix placement for one language family. Digits, separators and grouping
/// come from the ICU decimal formatter.
struct Affixes {
  /// Text between the number and `%`.
  percent_gap: &'static str,
  currency_after: bool,
}

const NBSP: &str = "\u{a0}";
const NNBSP: &str = "\u{202f}";

fn affixes(locale: &Locale) -> Affixes {
  match locale.language() {
    "de" | "es" | "it" | "nl" | "ru" | "uk" | "cs" | "sk" | "sv" | "id" | "tr" => {
      Affixes { percent_gap: NBSP, currency_after: true }
    }
    "fr" => Affixes { percent_gap: NNBSP, currency_after: true },
    "pl" => Affixes { percent_gap: "", currency_after: true },
    _ => Affixes { percent_gap: "", currency_after: false },
  }
}

fn currency_symbol(code: &str) -> Option<&'static str> {
  match code {
    "USD" => Some("$"),
    "EUR" => Some("€"),
    "GBP" => Some("£"),
    "JPY" | "CNY" => Some("¥"),
    "KRW" => Some("₩"),
    "INR" => Some("₹"),
    "RUB" => Some("₽"),
    _ => None,
  }
}

fn currency_digits(code: &str) -> u8 {
  match code {
    "JPY" | "KRW" | "VND" | "CLP" | "ISK" => 0,
    _ => 2,
  }
}

/// Format `value` for `locale`. Non-finite values and incomplete currency
/// options are errors; the caller decides the fallback rendering.
pub fn format_number(
  locale: &Locale,
  value: f64,
  options: &NumberOptions,
) -> Result<String, I18nError> {
  if !value.is_finite() {
    return Err(I18nError::formatting(format!("cannot format non-finite number {value}")));
  }

  let currency = match options.style {
    NumberStyle::Currency => {
      let code = options
        .currency
        .as_deref()
        .ok_or_else(|| I18nError::formatting("currency style requires a currency code"))?;
      Some(code.to_ascii_uppercase())
    }
    _ => None,
  };

  let (default_min, default_max) = match (&options.style, &currency) {
    (NumberStyle::Percent, _) => (0, 0),
    (NumberStyle::Currency, Some(code)) => (currency_digits(code), currency_digits(code)),
    _ => (0, 3),
  };
  let requested_min = options.minimum_fraction_digits.map(|d| d.min(MAX_FRACTION_DIGITS));
  let max = match options.maximum_fraction_digits {
    Some(d) => d.min(MAX_FRACTION_DIGITS),
    None => default_max.max(requested_min.unwrap_or(default_min)),
  };
  let min = requested_min.unwrap_or(default_min).min(max);

  let scaled = if options.style == NumberStyle::Percent { value * 100.0 } else { value };
  let digits = decimal_digits(scaled.abs(), min, max)?;
  let negative =
    scaled.is_sign_negative() && digits.to_string().bytes().any(|b| b.is_ascii_digit() && b != b'0');
  let body = render_digits(locale, &digits, options.use_grouping.unwrap_or(true))?;

  let sym = affixes(locale);
  let mut out = String::with_capacity(body.len() + 4);
  if negative {
    out.push('-');
  }
  match (options.style, currency) {
    (NumberStyle::Percent, _) => {
      out.push_str(&body);
      out.push_str(sym.percent_gap);
      out.push('%');
    }
    (NumberStyle::Currency, Some(code)) => {
      let symbol = currency_symbol(&code).map_or_else(|| code.clone(), str::to_string);
      if sym.currency_after {
        out.push_str(&body);
        out.push_str(NBSP);
        out.push_str(&symbol);
      } else {
        out.push_str(&symbol);
        // Alphabetic codes need a gap to stay readable: "CHF 10.00"
        if symbol.chars().all(|c| c.is_ascii_alphabetic()) {
          out.push_str(NBSP);
        }
        out.push_str(&body);
      }
    }
    _ => out.push_str(&body),
  }
  Ok(out)
}

/// `abs` rounded half away from zero to `max` fraction digits, trailing
/// zeros trimmed down to `min`.
fn decimal_digits(abs: f64, min: u8, max: u8) -> Result<Decimal, I18nError> {
  let factor = 10f64.powi(i32::from(max));
  let scaled = abs * factor;
  // `round` on the scaled value is exact only below 2^53
  let rounded = if scaled.is_finite() && scaled < 9_007_199_254_740_992.0 {
    scaled.round() / factor
  } else {
    abs
  };
  let mut decimal = Decimal::try_from_f64(rounded, FloatPrecision::RoundTrip)
    .map_err(|_| I18nError::formatting(format!("cannot represent {abs} as a decimal")))?;
  let limit = -i16::from(max);
  if *decimal.magnitude_range().start() < limit {
    decimal.round(limit);
  }
  decimal.trim_end();
  decimal.pad_end(-i16::from(min));
  Ok(decimal)
}

fn render_digits(locale: &Locale, decimal: &Decimal, grouping: bool) -> Result<String, I18nError> {
  let mut options = DecimalFormatterOptions::default();
  if !grouping {
    options.grouping_strategy = Some(GroupingStrategy::Never);
  }
  let formatter = DecimalFormatter::try_new(locale.to_icu(&[]).into(), options)
    .map_err(|e| I18nError::formatting(format!("no decimal data for {locale}: {e}")))?;
  Ok(formatter.format(decimal).to_string())
}
