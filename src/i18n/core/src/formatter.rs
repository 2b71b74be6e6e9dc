/* src/i18n/core/src/formatter.rs */

use std::sync::Arc;

use chrono::{DateTime, Local, Utc};

use crate::errors::I18nError;
use crate::format::datetime::{DateTimeOptions, Style, format_date_time};
use crate::format::list::{ListOptions, format_list};
use crate::format::message::FormatContext;
use crate::format::number::{NumberOptions, format_number};
use crate::format::relative::format_relative;
use crate::format::zone::TimeZone;
use crate::locale::Locale;
use crate::resolved::ResolvedConfig;

/// Date, number, relative-time and list formatting bound to one resolved
/// configuration. Failures are reported through `on_error`; every method
/// still returns a printable string.
#[derive(Clone)]
pub struct Formatter {
  config: Arc<ResolvedConfig>,
}

impl Formatter {
  pub fn new(config: Arc<ResolvedConfig>) -> Self {
    Self { config }
  }

  pub fn config(&self) -> &Arc<ResolvedConfig> {
    &self.config
  }

  // -- date / time --

  pub fn date_time(&self, value: DateTime<Utc>) -> String {
    self.date_time_options(value, &DateTimeOptions::default())
  }

  /// Format with a named preset from `formats.date_time` or the built-ins.
  pub fn date_time_with(&self, value: DateTime<Utc>, preset: &str) -> String {
    let options = self.date_time_preset(preset);
    self.date_time_options(value, &options)
  }

  pub fn date_time_options(&self, value: DateTime<Utc>, options: &DateTimeOptions) -> String {
    self.try_date_time(value, options).unwrap_or_else(|e| {
      self.config.report(&e);
      value.to_rfc3339()
    })
  }

  fn try_date_time(
    &self,
    value: DateTime<Utc>,
    options: &DateTimeOptions,
  ) -> Result<String, I18nError> {
    let zone = self.zone_for(options);
    format_date_time(self.config.locale(), value, &zone, options)
  }

  /// Epoch milliseconds, as sent by clients.
  pub fn date_time_millis(&self, millis: i64, preset: Option<&str>) -> String {
    match DateTime::from_timestamp_millis(millis) {
      Some(value) => match preset {
        Some(name) => self.date_time_with(value, name),
        None => self.date_time(value),
      },
      None => {
        self.config.report(&I18nError::formatting(format!("timestamp {millis} is out of range")));
        millis.to_string()
      }
    }
  }

  // -- numbers --

  pub fn number(&self, value: f64) -> String {
    self.number_options(value, &NumberOptions::default())
  }

  pub fn number_with(&self, value: f64, preset: &str) -> String {
    let options = self.number_preset(preset);
    self.number_options(value, &options)
  }

  pub fn number_options(&self, value: f64, options: &NumberOptions) -> String {
    format_number(self.config.locale(), value, options).unwrap_or_else(|e| {
      self.config.report(&e);
      value.to_string()
    })
  }

  // -- relative time --

  /// Distance from the reference instant to `value` ("1 hour ago").
  ///
  /// Reference: the `now` argument, else the configured `now`, else the
  /// clock (reported as an environment fallback).
  #[allow(clippy::cast_precision_loss)]
  pub fn relative_time(&self, value: DateTime<Utc>, now: Option<DateTime<Utc>>) -> String {
    let reference = now.or(self.config.now()).unwrap_or_else(|| {
      self.config.report(&I18nError::EnvironmentFallback(
        "no `now` configured; relative time uses the current clock".to_string(),
      ));
      Utc::now()
    });
    let seconds = (value - reference).num_milliseconds() as f64 / 1000.0;
    format_relative(self.config.locale(), seconds).unwrap_or_else(|e| {
      self.config.report(&e);
      format!("{seconds}s")
    })
  }

  // -- lists --

  pub fn list<S: AsRef<str>>(&self, items: &[S]) -> String {
    format_list(self.config.locale(), items, &ListOptions::default())
  }

  pub fn list_with<S: AsRef<str>>(&self, items: &[S], preset: &str) -> String {
    let options = self.list_preset(preset);
    format_list(self.config.locale(), items, &options)
  }

  // -- presets --

  fn missing_format(&self, kind: &'static str, name: &str) {
    self.config.report(&I18nError::MissingFormat { kind, name: name.to_string() });
  }

  fn date_time_preset(&self, name: &str) -> DateTimeOptions {
    self.config.formats().date_time(name).unwrap_or_else(|| {
      self.missing_format("dateTime", name);
      DateTimeOptions::default()
    })
  }

  fn number_preset(&self, name: &str) -> NumberOptions {
    self.config.formats().number(name).unwrap_or_else(|| {
      self.missing_format("number", name);
      NumberOptions::default()
    })
  }

  fn list_preset(&self, name: &str) -> ListOptions {
    self.config.formats().list(name).unwrap_or_else(|| {
      self.missing_format("list", name);
      ListOptions::default()
    })
  }

  /// Preset zone override, then the configured zone, then the process-local
  /// offset (server and client may disagree, so it is reported).
  fn zone_for(&self, options: &DateTimeOptions) -> TimeZone {
    if let Some(raw) = &options.time_zone {
      match TimeZone::parse(raw) {
        Ok(zone) => return zone,
        Err(e) => self.config.report(&e),
      }
    }
    if let Some(zone) = self.config.time_zone() {
      return zone.clone();
    }
    self.config.report(&I18nError::EnvironmentFallback(
      "no time zone configured; using the process-local offset".to_string(),
    ));
    let offset = *Local::now().offset();
    TimeZone::from_offset(offset.to_string(), offset)
  }
}

impl FormatContext for Formatter {
  fn locale(&self) -> &Locale {
    self.config.locale()
  }

  fn number(&self, value: f64, preset: Option<&str>) -> Result<String, I18nError> {
    let options = preset.map(|name| self.number_preset(name)).unwrap_or_default();
    format_number(self.config.locale(), value, &options)
  }

  fn date_time(
    &self,
    value: DateTime<Utc>,
    preset: Option<&str>,
    time_only: bool,
  ) -> Result<String, I18nError> {
    let options = match (preset, time_only) {
      (None, false) => DateTimeOptions::default(),
      (Some(name), false) => self.date_time_preset(name),
      (name, true) => {
        let style = match name {
          None | Some("short") => Some(Style::Short),
          Some("medium") => Some(Style::Medium),
          Some("long") => Some(Style::Long),
          Some("full") => Some(Style::Full),
          Some(_) => None,
        };
        match (style, name) {
          (Some(style), _) => DateTimeOptions { time_style: Some(style), ..DateTimeOptions::default() },
          (None, Some(name)) => self.date_time_preset(name),
          (None, None) => DateTimeOptions::default(),
        }
      }
    };
    self.try_date_time(value, &options)
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Mutex;

  use chrono::{Duration, TimeZone as _};

  use super::*;
  use crate::format::{Formats, NumberStyle};
  use crate::messages::Messages;

  struct Harness {
    formatter: Formatter,
    errors: Arc<Mutex<Vec<&'static str>>>,
  }

  fn harness(locale: &str, configure: impl FnOnce(ResolvedConfig) -> ResolvedConfig) -> Harness {
    let errors = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&errors);
    let config = ResolvedConfig::new(Locale::parse(locale).unwrap(), Messages::empty())
      .with_on_error(move |e| sink.lock().unwrap().push(e.code()));
    let config = Arc::new(configure(config));
    Harness { formatter: config.formatter(), errors }
  }

  fn utc(config: ResolvedConfig) -> ResolvedConfig {
    config.with_time_zone(Some(TimeZone::utc()))
  }

  fn instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 15, 4, 5).unwrap()
  }

  #[test]
  fn relative_time_against_fixed_now() {
    let now = instant();
    let h = harness("en", |c| c.with_now(Some(now)));
    let an_hour_ago = now - Duration::seconds(3600);
    assert_eq!(h.formatter.relative_time(an_hour_ago, None), "1 hour ago");
    assert_eq!(h.formatter.relative_time(an_hour_ago, None), "1 hour ago");
    assert!(h.errors.lock().unwrap().is_empty());
  }

  #[test]
  fn relative_time_call_argument_overrides_config() {
    let now = instant();
    let h = harness("de", |c| c.with_now(Some(now)));
    let later = now + Duration::days(2);
    assert_eq!(h.formatter.relative_time(now, Some(later)), "vor 2 Tagen");
  }

  #[test]
  fn relative_time_without_now_reports_fallback() {
    let h = harness("en", |c| c);
    let out = h.formatter.relative_time(Utc::now() + Duration::hours(3), None);
    assert!(out.starts_with("in "), "{out}");
    assert_eq!(*h.errors.lock().unwrap(), vec!["ENVIRONMENT_FALLBACK"]);
  }

  #[test]
  fn dates_use_configured_zone() {
    let h = harness("en", |c| c.with_time_zone(Some(TimeZone::parse("Asia/Tokyo").unwrap())));
    assert_eq!(h.formatter.date_time_with(instant(), "short"), "1/16/24");
    assert!(h.errors.lock().unwrap().is_empty());
  }

  #[test]
  fn named_zone_applies_summer_offset() {
    let h = harness("de", |c| c.with_time_zone(Some(TimeZone::parse("Europe/Berlin").unwrap())));
    let july = Utc.with_ymd_and_hms(2024, 7, 15, 12, 0, 0).unwrap();
    assert_eq!(h.formatter.date_time_with(july, "time"), "14:00");
    assert_eq!(h.formatter.date_time_with(instant(), "time"), "16:04");
  }

  #[test]
  fn missing_zone_falls_back_to_local_offset() {
    let h = harness("en", |c| c);
    let _ = h.formatter.date_time(instant());
    assert_eq!(*h.errors.lock().unwrap(), vec!["ENVIRONMENT_FALLBACK"]);
  }

  #[test]
  fn preset_zone_override() {
    let mut formats = Formats::default();
    formats.date_time.insert(
      "utcTime".into(),
      DateTimeOptions {
        time_style: Some(Style::Short),
        hour12: Some(false),
        time_zone: Some("UTC".into()),
        ..DateTimeOptions::default()
      },
    );
    let h = harness("en", |c| {
      c.with_formats(formats).with_time_zone(Some(TimeZone::parse("+02:00").unwrap()))
    });
    assert_eq!(h.formatter.date_time_with(instant(), "utcTime"), "15:04");
    assert_eq!(h.formatter.date_time_with(instant(), "time").replace('\u{202f}', " "), "5:04 PM");
  }

  #[test]
  fn unknown_preset_reports_and_uses_default() {
    let h = harness("en", utc);
    assert_eq!(h.formatter.date_time_with(instant(), "nope"), "1/15/24");
    assert_eq!(h.formatter.number_with(1234.5, "nope"), "1,234.5");
    assert_eq!(h.formatter.list_with(&["a", "b"], "nope"), "a and b");
    assert_eq!(*h.errors.lock().unwrap(), vec!["MISSING_FORMAT"; 3]);
  }

  #[test]
  fn configured_number_presets() {
    let mut formats = Formats::default();
    formats.number.insert(
      "money".into(),
      NumberOptions {
        style: NumberStyle::Currency,
        currency: Some("EUR".into()),
        ..NumberOptions::default()
      },
    );
    let h = harness("de", |c| c.with_formats(formats));
    assert_eq!(h.formatter.number_with(1234.5, "money"), "1.234,50\u{a0}€");
    assert_eq!(h.formatter.number_with(0.5, "percent"), "50\u{a0}%");
  }

  #[test]
  fn invalid_number_is_best_effort() {
    let h = harness("en", utc);
    assert_eq!(h.formatter.number(f64::NAN), "NaN");
    assert_eq!(*h.errors.lock().unwrap(), vec!["FORMATTING_ERROR"]);
  }

  #[test]
  fn lists_and_millis() {
    let h = harness("en", utc);
    assert_eq!(h.formatter.list(&["x", "y", "z"]), "x, y, and z");
    assert_eq!(h.formatter.list_with(&["x", "y"], "or"), "x or y");
    let ms = instant().timestamp_millis();
    assert_eq!(h.formatter.date_time_millis(ms, Some("medium")), "Jan 15, 2024");
    assert_eq!(h.formatter.date_time_millis(i64::MAX, None), i64::MAX.to_string());
    assert_eq!(*h.errors.lock().unwrap(), vec!["FORMATTING_ERROR"]);
  }
}
