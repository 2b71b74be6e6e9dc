/* src/i18n/core/src/errors.rs */

use thiserror::Error;

/// Every failure the i18n core can observe.
///
/// Render-time failures (lookup, formatting) never escape a translate or
/// format call; they are routed through the configured `on_error` handler.
/// Setup failures (builder, settings, snapshot decoding) are returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum I18nError {
  #[error("invalid locale \"{0}\"")]
  InvalidLocale(String),

  #[error("failed to load messages for \"{locale}\": {reason}")]
  LoadFailed { locale: String, reason: String },

  #[error("missing message \"{path}\" in locale \"{locale}\"")]
  MissingMessage { locale: String, path: String },

  #[error("\"{path}\" points to a group of messages, not a message")]
  InsufficientPath { path: String },

  #[error("invalid message \"{path}\": {reason}")]
  InvalidMessage { path: String, reason: String },

  #[error("formatting failed: {0}")]
  Formatting(String),

  #[error("unknown {kind} format \"{name}\"")]
  MissingFormat { kind: &'static str, name: String },

  #[error("{0}")]
  EnvironmentFallback(String),

  #[error("configuration error: {0}")]
  Config(String),
}

impl I18nError {
  pub fn load_failed(locale: impl Into<String>, reason: impl ToString) -> Self {
    Self::LoadFailed { locale: locale.into(), reason: reason.to_string() }
  }

  pub fn config(msg: impl Into<String>) -> Self {
    Self::Config(msg.into())
  }

  pub fn formatting(msg: impl Into<String>) -> Self {
    Self::Formatting(msg.into())
  }

  /// Stable machine-readable code, mirrored in HTTP error bodies.
  pub fn code(&self) -> &'static str {
    match self {
      Self::InvalidLocale(_) => "INVALID_LOCALE",
      Self::LoadFailed { .. } => "LOAD_FAILED",
      Self::MissingMessage { .. } => "MISSING_MESSAGE",
      Self::InsufficientPath { .. } => "INSUFFICIENT_PATH",
      Self::InvalidMessage { .. } => "INVALID_MESSAGE",
      Self::Formatting(_) => "FORMATTING_ERROR",
      Self::MissingFormat { .. } => "MISSING_FORMAT",
      Self::EnvironmentFallback(_) => "ENVIRONMENT_FALLBACK",
      Self::Config(_) => "CONFIG",
    }
  }

  /// Lookup misses and environment fallbacks are expected during development
  /// and are logged below error level by the default handler.
  pub fn is_recoverable_miss(&self) -> bool {
    matches!(
      self,
      Self::MissingMessage { .. } | Self::InsufficientPath { .. } | Self::EnvironmentFallback(_)
    )
  }
}
