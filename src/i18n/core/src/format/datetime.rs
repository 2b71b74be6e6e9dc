/* src/i18n/core/src/format/datetime.rs */

use chrono::{DateTime, Datelike, FixedOffset, Timelike, Utc};
use icu::calendar::Iso;
use icu::datetime::DateTimeFormatter;
use icu::datetime::fieldsets::{
  self,
  enums::{DateAndTimeFieldSet, DateFieldSet, TimeFieldSet},
};
use icu::datetime::options::Length;
use serde::{Deserialize, Serialize};

use super::zone::TimeZone;
use crate::errors::I18nError;
use crate::locale::Locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
  Full,
  Long,
  Medium,
  Short,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Digits {
  #[serde(rename = "numeric")]
  Numeric,
  #[serde(rename = "2-digit")]
  TwoDigit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonthWidth {
  Numeric,
  #[serde(rename = "2-digit")]
  TwoDigit,
  Short,
  Long,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekdayWidth {
  Short,
  Long,
}

/// Date/time format preset. Either styles or individual components; styles
/// win when both are present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateTimeOptions {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub date_style: Option<Style>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub time_style: Option<Style>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub weekday: Option<WeekdayWidth>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub year: Option<Digits>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub month: Option<MonthWidth>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub day: Option<Digits>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub hour: Option<Digits>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub minute: Option<Digits>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub second: Option<Digits>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub hour12: Option<bool>,
  /// Per-preset zone override, e.g. a preset that always renders in UTC.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub time_zone: Option<String>,
}

impl DateTimeOptions {
  pub fn builtin(name: &str) -> Option<Self> {
    let date = |style| Self { date_style: Some(style), ..Self::default() };
    match name {
      "short" => Some(date(Style::Short)),
      "medium" => Some(date(Style::Medium)),
      "long" => Some(date(Style::Long)),
      "full" => Some(date(Style::Full)),
      "time" => Some(Self { time_style: Some(Style::Short), ..Self::default() }),
      "dateTime" => Some(Self {
        date_style: Some(Style::Medium),
        time_style: Some(Style::Short),
        ..Self::default()
      }),
      _ => None,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateShape {
  D,
  MD,
  YMD,
  DE,
  MDE,
  YMDE,
  E,
}

/// The ICU field set an option bag maps to: which date fields, whether a
/// time is shown (and with seconds), and the overall length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Plan {
  date: Option<DateShape>,
  time: Option<bool>,
  length: Length,
}

impl Plan {
  fn from_options(opts: &DateTimeOptions) -> Self {
    if opts.date_style.is_some() || opts.time_style.is_some() {
      return Self::from_styles(opts.date_style, opts.time_style);
    }

    let time = (opts.hour.is_some() || opts.minute.is_some() || opts.second.is_some())
      .then_some(opts.second.is_some());
    let shape = match (opts.year.is_some(), opts.month.is_some(), opts.day.is_some()) {
      (false, false, false) if opts.weekday.is_some() => Some(DateShape::E),
      (false, false, false) if time.is_some() => None,
      (false, false, false) => Some(DateShape::YMD),
      (false, false, true) => Some(DateShape::D),
      (false, true, true) => Some(DateShape::MD),
      // Year-or-month-only requests render the full date
      _ => Some(DateShape::YMD),
    };
    let date = shape.map(|shape| match (shape, opts.weekday.is_some()) {
      (DateShape::D, true) => DateShape::DE,
      (DateShape::MD, true) => DateShape::MDE,
      (DateShape::YMD, true) => DateShape::YMDE,
      (shape, _) => shape,
    });
    let length = match (opts.month, opts.weekday) {
      (Some(MonthWidth::Long), _) | (None, Some(WeekdayWidth::Long)) => Length::Long,
      (Some(MonthWidth::Short), _) => Length::Medium,
      _ => Length::Short,
    };
    Self { date, time, length }
  }

  fn from_styles(date_style: Option<Style>, time_style: Option<Style>) -> Self {
    let length_of = |style| match style {
      Style::Full | Style::Long => Length::Long,
      Style::Medium => Length::Medium,
      Style::Short => Length::Short,
    };
    let date = date_style.map(|style| if style == Style::Full { DateShape::YMDE } else { DateShape::YMD });
    let time = time_style.map(|style| style != Style::Short);
    let length = date_style.or(time_style).map_or(Length::Short, length_of);
    Self { date, time, length }
  }
}

fn date_fields(shape: DateShape, length: Length) -> DateFieldSet {
  match shape {
    DateShape::D => DateFieldSet::D(fieldsets::D::for_length(length)),
    DateShape::MD => DateFieldSet::MD(fieldsets::MD::for_length(length)),
    DateShape::YMD => DateFieldSet::YMD(fieldsets::YMD::for_length(length)),
    DateShape::DE => DateFieldSet::DE(fieldsets::DE::for_length(length)),
    DateShape::MDE => DateFieldSet::MDE(fieldsets::MDE::for_length(length)),
    DateShape::YMDE => DateFieldSet::YMDE(fieldsets::YMDE::for_length(length)),
    DateShape::E => DateFieldSet::E(fieldsets::E::for_length(length)),
  }
}

macro_rules! with_time {
  ($fields:expr, $seconds:expr, $variant:ident) => {
    if $seconds {
      DateAndTimeFieldSet::$variant($fields.with_time_hms())
    } else {
      DateAndTimeFieldSet::$variant($fields.with_time_hm())
    }
  };
}

fn date_time_fields(shape: DateShape, length: Length, seconds: bool) -> DateAndTimeFieldSet {
  match shape {
    DateShape::D => with_time!(fieldsets::D::for_length(length), seconds, DT),
    DateShape::MD => with_time!(fieldsets::MD::for_length(length), seconds, MDT),
    DateShape::YMD => with_time!(fieldsets::YMD::for_length(length), seconds, YMDT),
    DateShape::DE => with_time!(fieldsets::DE::for_length(length), seconds, DET),
    DateShape::MDE => with_time!(fieldsets::MDE::for_length(length), seconds, MDET),
    DateShape::YMDE => with_time!(fieldsets::YMDE::for_length(length), seconds, YMDET),
    DateShape::E => with_time!(fieldsets::E::for_length(length), seconds, ET),
  }
}

fn time_fields(length: Length, seconds: bool) -> TimeFieldSet {
  let fields = if seconds { fieldsets::T::hms() } else { fieldsets::T::hm() };
  TimeFieldSet::T(fields.with_length(length))
}

fn load_error(locale: &Locale, e: impl std::fmt::Display) -> I18nError {
  I18nError::formatting(format!("no date/time data for {locale}: {e}"))
}

/// Render `value` as wall-clock time in `zone` for `locale`.
pub fn format_date_time(
  locale: &Locale,
  value: DateTime<Utc>,
  zone: &TimeZone,
  opts: &DateTimeOptions,
) -> Result<String, I18nError> {
  let local = zone.localize(value);
  let input = icu_date_time(&local)
    .ok_or_else(|| I18nError::formatting(format!("{value} is outside the supported range")))?;

  let hour_cycle = match opts.hour12 {
    Some(true) => &[("hc", "h12")][..],
    Some(false) => &[("hc", "h23")][..],
    None => &[][..],
  };
  let prefs = locale.to_icu(hour_cycle);

  let plan = Plan::from_options(opts);
  let out = match (plan.date, plan.time) {
    (Some(shape), Some(seconds)) => {
      DateTimeFormatter::try_new(prefs.into(), date_time_fields(shape, plan.length, seconds))
        .map_err(|e| load_error(locale, e))?
        .format(&input)
        .to_string()
    }
    (None, Some(seconds)) => DateTimeFormatter::try_new(prefs.into(), time_fields(plan.length, seconds))
      .map_err(|e| load_error(locale, e))?
      .format(&input)
      .to_string(),
    (Some(shape), None) => DateTimeFormatter::try_new(prefs.into(), date_fields(shape, plan.length))
      .map_err(|e| load_error(locale, e))?
      .format(&input)
      .to_string(),
    (None, None) => String::new(),
  };
  Ok(out)
}

fn icu_date_time(local: &DateTime<FixedOffset>) -> Option<icu::datetime::input::DateTime<Iso>> {
  let date = icu::calendar::Date::try_new_iso(
    local.year(),
    u8::try_from(local.month()).ok()?,
    u8::try_from(local.day()).ok()?,
  )
  .ok()?;
  let time = icu::datetime::input::Time::try_new(
    u8::try_from(local.hour()).ok()?,
    u8::try_from(local.minute()).ok()?,
    u8::try_from(local.second()).ok()?,
    0,
  )
  .ok()?;
  Some(icu::datetime::input::DateTime { date, time })
}
