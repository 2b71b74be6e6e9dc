/* src/i18n/core/src/translator.rs */

use std::sync::Arc;

use crate::errors::I18nError;
use crate::format::message::Message;
use crate::formatter::Formatter;
use crate::messages::{Lookup, Messages};
use crate::resolved::{MessageFallbackInfo, ResolvedConfig};
use crate::values::Values;

/// Looks up and formats messages under one namespace.
///
/// Never fails: a missing key, a group where a message was expected, or a
/// message that does not parse or format is reported through `on_error` and
/// rendered as its key path (or whatever the `message_fallback` hook returns).
#[derive(Clone)]
pub struct Translator {
  config: Arc<ResolvedConfig>,
  namespace: Option<String>,
}

impl Translator {
  pub fn new(config: Arc<ResolvedConfig>, namespace: Option<&str>) -> Self {
    let namespace = namespace.filter(|ns| !ns.is_empty()).map(str::to_string);
    Self { config, namespace }
  }

  pub fn config(&self) -> &Arc<ResolvedConfig> {
    &self.config
  }

  pub fn namespace(&self) -> Option<&str> {
    self.namespace.as_deref()
  }

  fn path(&self, key: &str) -> String {
    match &self.namespace {
      Some(ns) if key.is_empty() => ns.clone(),
      Some(ns) => format!("{ns}.{key}"),
      None => key.to_string(),
    }
  }

  pub fn t(&self, key: &str) -> String {
    self.t_with(key, &Values::new())
  }

  pub fn t_with(&self, key: &str, values: &Values) -> String {
    let path = self.path(key);
    let source = match self.config.messages().lookup(&path) {
      Lookup::Message(source) => source,
      Lookup::Group(_) => {
        return self.fail(key, &path, I18nError::InsufficientPath { path: path.clone() });
      }
      Lookup::Missing => {
        let err = I18nError::MissingMessage {
          locale: self.config.locale().to_string(),
          path: path.clone(),
        };
        return self.fail(key, &path, err);
      }
    };

    let message = match Message::parse(source) {
      Ok(message) => message,
      Err(reason) => {
        return self.fail(key, &path, I18nError::InvalidMessage { path: path.clone(), reason });
      }
    };
    match message.format(&self.formatter(), values) {
      Ok(text) => text,
      Err(err) => self.fail(key, &path, err),
    }
  }

  /// Whether `key` names a message. Never reports.
  pub fn has(&self, key: &str) -> bool {
    matches!(self.config.messages().lookup(&self.path(key)), Lookup::Message(_))
  }

  /// The raw message source or group under `key`, unformatted.
  pub fn raw(&self, key: &str) -> Option<&Messages> {
    self.config.messages().get(&self.path(key))
  }

  fn formatter(&self) -> Formatter {
    Formatter::new(Arc::clone(&self.config))
  }

  fn fail(&self, key: &str, path: &str, err: I18nError) -> String {
    self.config.report(&err);
    let info = MessageFallbackInfo { namespace: self.namespace(), key, path, error: &err };
    self.config.fallback_text(&info)
  }
}

#[cfg(test)]
mod tests;
