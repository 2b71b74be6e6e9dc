/* src/i18n/core/src/format/relative.rs */

use fixed_decimal::Decimal;
use icu_experimental::relativetime::{RelativeTimeFormatter, RelativeTimeFormatterOptions};

use crate::errors::I18nError;
use crate::locale::Locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
  Second,
  Minute,
  Hour,
  Day,
  Week,
  Month,
  Year,
}

const MINUTE: f64 = 60.0;
const HOUR: f64 = 3_600.0;
const DAY: f64 = 86_400.0;
const WEEK: f64 = 604_800.0;
const MONTH: f64 = 2_628_000.0;
const YEAR: f64 = 31_536_000.0;

impl Unit {
  /// Largest unit whose magnitude fits `seconds`, and the rounded value in it.
  #[allow(clippy::cast_possible_truncation)]
  pub fn select(seconds: f64) -> (Self, i64) {
    let abs = seconds.abs();
    let (unit, size) = if abs < MINUTE {
      (Self::Second, 1.0)
    } else if abs < HOUR {
      (Self::Minute, MINUTE)
    } else if abs < DAY {
      (Self::Hour, HOUR)
    } else if abs < WEEK {
      (Self::Day, DAY)
    } else if abs < MONTH {
      (Self::Week, WEEK)
    } else if abs < YEAR {
      (Self::Month, MONTH)
    } else {
      (Self::Year, YEAR)
    };
    (unit, (seconds / size).round() as i64)
  }
}

/// Describe a signed distance in seconds; negative values lie in the past.
pub fn format_relative(locale: &Locale, seconds: f64) -> Result<String, I18nError> {
  let (unit, value) = Unit::select(seconds);
  let prefs = locale.to_icu(&[]).into();
  let options = RelativeTimeFormatterOptions::default();
  let formatter = match unit {
    Unit::Second => RelativeTimeFormatter::try_new_long_second(prefs, options),
    Unit::Minute => RelativeTimeFormatter::try_new_long_minute(prefs, options),
    Unit::Hour => RelativeTimeFormatter::try_new_long_hour(prefs, options),
    Unit::Day => RelativeTimeFormatter::try_new_long_day(prefs, options),
    Unit::Week => RelativeTimeFormatter::try_new_long_week(prefs, options),
    Unit::Month => RelativeTimeFormatter::try_new_long_month(prefs, options),
    Unit::Year => RelativeTimeFormatter::try_new_long_year(prefs, options),
  }
  .map_err(|e| I18nError::formatting(format!("no relative time data for {locale}: {e}")))?;
  Ok(formatter.format(Decimal::from(value)).to_string())
}
