/* src/i18n/core/src/resolved.rs */

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, error, warn};

use crate::errors::I18nError;
use crate::format::{Formats, TimeZone};
use crate::formatter::Formatter;
use crate::locale::Locale;
use crate::messages::Messages;
use crate::translator::Translator;

/// Receives every render-time failure. Must not panic.
pub type ErrorHandler = Arc<dyn Fn(&I18nError) + Send + Sync>;

/// Produces the string shown in place of a message that could not be rendered.
pub type MessageFallback = Arc<dyn Fn(&MessageFallbackInfo<'_>) -> String + Send + Sync>;

/// What the fallback hook knows about a failed lookup.
#[derive(Debug)]
pub struct MessageFallbackInfo<'a> {
  pub namespace: Option<&'a str>,
  pub key: &'a str,
  /// `namespace.key`, the default fallback text.
  pub path: &'a str,
  pub error: &'a I18nError,
}

/// Default `on_error`: log and carry on.
pub fn default_on_error(err: &I18nError) {
  match err {
    I18nError::EnvironmentFallback(_) => debug!(code = err.code(), "{err}"),
    _ if err.is_recoverable_miss() => warn!(code = err.code(), "{err}"),
    _ => error!(code = err.code(), "{err}"),
  }
}

/// Everything translators and formatters need for one request. Immutable
/// once built; shared as `Arc<ResolvedConfig>`.
#[derive(Clone)]
pub struct ResolvedConfig {
  locale: Locale,
  messages: Messages,
  formats: Formats,
  time_zone: Option<TimeZone>,
  now: Option<DateTime<Utc>>,
  on_error: ErrorHandler,
  message_fallback: Option<MessageFallback>,
}

impl ResolvedConfig {
  pub fn new(locale: Locale, messages: Messages) -> Self {
    Self {
      locale,
      messages,
      formats: Formats::default(),
      time_zone: None,
      now: None,
      on_error: Arc::new(default_on_error),
      message_fallback: None,
    }
  }

  #[must_use]
  pub fn with_formats(mut self, formats: Formats) -> Self {
    self.formats = formats;
    self
  }

  #[must_use]
  pub fn with_time_zone(mut self, time_zone: Option<TimeZone>) -> Self {
    self.time_zone = time_zone;
    self
  }

  #[must_use]
  pub fn with_now(mut self, now: Option<DateTime<Utc>>) -> Self {
    self.now = now;
    self
  }

  #[must_use]
  pub fn with_error_handler(mut self, on_error: ErrorHandler) -> Self {
    self.on_error = on_error;
    self
  }

  #[must_use]
  pub fn with_on_error(self, on_error: impl Fn(&I18nError) + Send + Sync + 'static) -> Self {
    self.with_error_handler(Arc::new(on_error))
  }

  #[must_use]
  pub fn with_message_fallback(mut self, fallback: Option<MessageFallback>) -> Self {
    self.message_fallback = fallback;
    self
  }

  pub fn locale(&self) -> &Locale {
    &self.locale
  }

  pub fn messages(&self) -> &Messages {
    &self.messages
  }

  pub fn formats(&self) -> &Formats {
    &self.formats
  }

  pub fn time_zone(&self) -> Option<&TimeZone> {
    self.time_zone.as_ref()
  }

  pub fn now(&self) -> Option<DateTime<Utc>> {
    self.now
  }

  pub fn error_handler(&self) -> &ErrorHandler {
    &self.on_error
  }

  pub fn message_fallback(&self) -> Option<&MessageFallback> {
    self.message_fallback.as_ref()
  }

  /// Route a failure to the configured handler.
  pub fn report(&self, err: &I18nError) {
    (self.on_error)(err);
  }

  pub(crate) fn fallback_text(&self, info: &MessageFallbackInfo<'_>) -> String {
    match &self.message_fallback {
      Some(hook) => hook(info),
      None => info.path.to_string(),
    }
  }

  /// A translator bound to `namespace` (or the catalog root).
  pub fn translator(self: &Arc<Self>, namespace: Option<&str>) -> Translator {
    Translator::new(Arc::clone(self), namespace)
  }

  pub fn formatter(self: &Arc<Self>) -> Formatter {
    Formatter::new(Arc::clone(self))
  }
}

impl fmt::Debug for ResolvedConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ResolvedConfig")
      .field("locale", &self.locale)
      .field("messages", &self.messages.message_count())
      .field("formats", &self.formats)
      .field("time_zone", &self.time_zone)
      .field("now", &self.now)
      .field("message_fallback", &self.message_fallback.is_some())
      .finish_non_exhaustive()
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Mutex;

  use super::*;

  #[test]
  fn report_reaches_custom_handler() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let config = ResolvedConfig::new(Locale::parse("en").unwrap(), Messages::empty())
      .with_on_error(move |e| sink.lock().unwrap().push(e.code()));
    config.report(&I18nError::formatting("boom"));
    assert_eq!(*seen.lock().unwrap(), vec!["FORMATTING_ERROR"]);
  }

  #[test]
  fn fallback_defaults_to_path() {
    let config = ResolvedConfig::new(Locale::parse("en").unwrap(), Messages::empty());
    let err = I18nError::InsufficientPath { path: "Index".into() };
    let info = MessageFallbackInfo { namespace: None, key: "Index", path: "Index", error: &err };
    assert_eq!(config.fallback_text(&info), "Index");

    let hook: MessageFallback = Arc::new(|info: &MessageFallbackInfo<'_>| format!("[{}]", info.key));
    let config = config.with_message_fallback(Some(hook));
    assert_eq!(config.fallback_text(&info), "[Index]");
  }

  #[test]
  fn debug_hides_handlers() {
    let config = ResolvedConfig::new(Locale::parse("de").unwrap(), Messages::empty());
    let out = format!("{config:?}");
    assert!(out.contains("locale: Locale(\"de\")"));
    assert!(out.contains(".."));
  }
}
