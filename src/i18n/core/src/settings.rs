/* src/i18n/core/src/settings.rs */

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::I18nError;
use crate::format::{Formats, TimeZone};
use crate::locale::Locale;

pub const SETTINGS_FILE: &str = "seam-i18n.toml";

/// Static i18n settings, read from `seam-i18n.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct I18nSettings {
  pub locales: Vec<String>,
  #[serde(default = "default_locale")]
  pub default_locale: String,
  #[serde(default)]
  pub fallback_locale: Option<String>,
  #[serde(default = "default_messages_dir")]
  pub messages_dir: String,
  #[serde(default)]
  pub time_zone: Option<String>,
  /// `id` of the injected `<script type="application/json">` element.
  #[serde(default = "default_data_id")]
  pub data_id: String,
  #[serde(default)]
  pub formats: Formats,
  #[serde(skip)]
  base_dir: Option<PathBuf>,
}

fn default_locale() -> String {
  "en".to_string()
}

fn default_messages_dir() -> String {
  "messages".to_string()
}

fn default_data_id() -> String {
  "__i18n".to_string()
}

impl I18nSettings {
  pub fn from_toml_str(content: &str) -> Result<Self, I18nError> {
    let settings: Self =
      toml::from_str(content).map_err(|e| I18nError::config(format!("failed to parse settings: {e}")))?;
    settings.validate()?;
    Ok(settings)
  }

  /// Read and validate a settings file; `messages_dir` becomes relative to
  /// the file's directory.
  pub fn load(path: &Path) -> Result<Self, I18nError> {
    let content = std::fs::read_to_string(path)
      .map_err(|e| I18nError::config(format!("failed to read {}: {e}", path.display())))?;
    let mut settings = Self::from_toml_str(&content)
      .map_err(|e| I18nError::config(format!("{}: {e}", path.display())))?;
    settings.base_dir = path.parent().map(Path::to_path_buf);
    Ok(settings)
  }

  /// Walk upward from `start` to the nearest `seam-i18n.toml`.
  pub fn find(start: &Path) -> Result<PathBuf, I18nError> {
    let mut dir = start
      .canonicalize()
      .map_err(|e| I18nError::config(format!("failed to canonicalize {}: {e}", start.display())))?;
    loop {
      let candidate = dir.join(SETTINGS_FILE);
      if candidate.is_file() {
        return Ok(candidate);
      }
      if !dir.pop() {
        return Err(I18nError::config(format!(
          "{SETTINGS_FILE} not found (searched upward from {})",
          start.display()
        )));
      }
    }
  }

  pub fn validate(&self) -> Result<(), I18nError> {
    if self.locales.is_empty() {
      return Err(I18nError::config("locales must not be empty"));
    }
    let locales = self.parsed_locales()?;
    let listed = |raw: &str, field: &str| -> Result<(), I18nError> {
      let locale = Locale::parse(raw)?;
      if locales.contains(&locale) {
        Ok(())
      } else {
        Err(I18nError::config(format!("{field} \"{raw}\" is not in locales {:?}", self.locales)))
      }
    };
    listed(&self.default_locale, "default_locale")?;
    if let Some(fallback) = &self.fallback_locale {
      listed(fallback, "fallback_locale")?;
    }
    if let Some(zone) = &self.time_zone {
      TimeZone::parse(zone)?;
    }
    if self.data_id.trim().is_empty() {
      return Err(I18nError::config("data_id must not be empty"));
    }
    Ok(())
  }

  pub fn parsed_locales(&self) -> Result<Vec<Locale>, I18nError> {
    self.locales.iter().map(|raw| Locale::parse(raw)).collect()
  }

  pub fn messages_path(&self) -> PathBuf {
    match &self.base_dir {
      Some(base) => base.join(&self.messages_dir),
      None => PathBuf::from(&self.messages_dir),
    }
  }
}
