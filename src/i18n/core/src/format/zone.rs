/* src/i18n/core/src/format/zone.rs */

use std::fmt;

use chrono::{DateTime, FixedOffset, Offset, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::errors::I18nError;

/// A time zone applied when formatting dates.
///
/// Accepts `UTC`/`GMT`, fixed offsets (`+02:00`, `-0530`, `+09`) and IANA
/// identifiers from the tz database. Named zones follow their daylight-saving
/// rules at the formatted instant. The identifier is kept so that it crosses
/// the client boundary unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeZone {
  name: String,
  rule: Rule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
  Fixed(FixedOffset),
  Named(Tz),
}

impl TimeZone {
  pub fn utc() -> Self {
    Self { name: "UTC".to_string(), rule: Rule::Fixed(utc_offset()) }
  }

  pub fn parse(raw: &str) -> Result<Self, I18nError> {
    let trimmed = raw.trim();

    if matches!(trimmed.to_ascii_uppercase().as_str(), "UTC" | "GMT" | "Z" | "ETC/UTC" | "ETC/GMT")
    {
      return Ok(Self::utc());
    }
    if let Some(offset) = parse_offset(trimmed) {
      return Ok(Self { name: trimmed.to_string(), rule: Rule::Fixed(offset) });
    }
    Tz::from_str_insensitive(trimmed)
      .map(|tz| Self { name: tz.name().to_string(), rule: Rule::Named(tz) })
      .map_err(|_| I18nError::config(format!("unknown time zone \"{raw}\"")))
  }

  /// A zone for an already-known offset, e.g. the process-local offset.
  pub fn from_offset(name: impl Into<String>, offset: FixedOffset) -> Self {
    Self { name: name.into(), rule: Rule::Fixed(offset) }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  /// UTC offset in effect at `instant`.
  pub fn offset_at(&self, instant: DateTime<Utc>) -> FixedOffset {
    match self.rule {
      Rule::Fixed(offset) => offset,
      Rule::Named(tz) => instant.with_timezone(&tz).offset().fix(),
    }
  }

  /// Wall-clock time in this zone at `instant`.
  pub fn localize(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
    instant.with_timezone(&self.offset_at(instant))
  }

  pub fn is_utc(&self) -> bool {
    self.name == "UTC" && self.rule == Rule::Fixed(utc_offset())
  }
}

fn utc_offset() -> FixedOffset {
  Utc.fix()
}

/// `+02:00`, `-0530`, `+09` → offset; anything else → `None`.
fn parse_offset(raw: &str) -> Option<FixedOffset> {
  let (sign, rest) = match raw.as_bytes().first()? {
    b'+' => (1, &raw[1..]),
    b'-' => (-1, &raw[1..]),
    _ => return None,
  };
  let digits: String = rest.chars().filter(|c| *c != ':').collect();
  if !digits.chars().all(|c| c.is_ascii_digit()) {
    return None;
  }
  let (hours, minutes) = match digits.len() {
    2 => (digits.parse::<i32>().ok()?, 0),
    4 => (digits[..2].parse::<i32>().ok()?, digits[2..].parse::<i32>().ok()?),
    _ => return None,
  };
  if hours > 18 || minutes > 59 {
    return None;
  }
  FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

impl fmt::Display for TimeZone {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.name)
  }
}

impl TryFrom<String> for TimeZone {
  type Error = I18nError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    Self::parse(&value)
  }
}

impl From<TimeZone> for String {
  fn from(zone: TimeZone) -> Self {
    zone.name
  }
}
