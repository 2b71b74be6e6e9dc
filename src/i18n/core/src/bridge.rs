/* src/i18n/core/src/bridge.rs */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::I18nError;
use crate::escape::script_safe_json;
use crate::format::{Formats, TimeZone};
use crate::locale::Locale;
use crate::messages::Messages;
use crate::resolved::ResolvedConfig;

/// The transferable part of a [`ResolvedConfig`]: plain data, no handlers.
///
/// The server serializes it into the page; client-side code hydrates it back
/// into a config for its own translators and formatters without touching a
/// catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSnapshot {
  pub locale: Locale,
  pub messages: Messages,
  #[serde(default, skip_serializing_if = "Formats::is_empty")]
  pub formats: Formats,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub time_zone: Option<TimeZone>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub now: Option<DateTime<Utc>>,
}

impl ClientSnapshot {
  pub fn from_config(config: &ResolvedConfig) -> Self {
    Self {
      locale: config.locale().clone(),
      messages: config.messages().clone(),
      formats: config.formats().clone(),
      time_zone: config.time_zone().cloned(),
      now: config.now(),
    }
  }

  /// Keep only the listed namespaces; an empty list keeps everything.
  #[must_use]
  pub fn pick<S: AsRef<str>>(mut self, namespaces: &[S]) -> Self {
    self.messages = self.messages.pick(namespaces);
    self
  }

  /// Rebuild a config on the receiving side. It carries the default error
  /// handler; attach another with [`ResolvedConfig::with_on_error`].
  pub fn hydrate(self) -> ResolvedConfig {
    ResolvedConfig::new(self.locale, self.messages)
      .with_formats(self.formats)
      .with_time_zone(self.time_zone)
      .with_now(self.now)
  }

  pub fn to_json(&self) -> String {
    serde_json::to_string(self).unwrap_or_default()
  }

  /// JSON safe to place verbatim inside `<script type="application/json">`.
  pub fn to_script_json(&self) -> String {
    script_safe_json(&self.to_json())
  }

  pub fn from_json(json: &str) -> Result<Self, I18nError> {
    serde_json::from_str(json).map_err(|e| I18nError::config(format!("invalid i18n snapshot: {e}")))
  }

  /// Embed the snapshot before `</body>` and set `<html lang>`.
  pub fn inject_into_html(&self, html: &str, data_id: &str) -> String {
    let html = inject_html_lang(html, self.locale.as_str());
    inject_data_script(&html, data_id, &self.to_script_json())
  }

  /// Read back a snapshot written by [`ClientSnapshot::inject_into_html`].
  pub fn extract_from_html(html: &str, data_id: &str) -> Result<Self, I18nError> {
    let open = script_open_tag(data_id);
    let start = html
      .find(&open)
      .map(|pos| pos + open.len())
      .ok_or_else(|| I18nError::config(format!("no <script id=\"{data_id}\"> in document")))?;
    let len = html[start..]
      .find("</script>")
      .ok_or_else(|| I18nError::config(format!("unterminated <script id=\"{data_id}\">")))?;
    Self::from_json(&html[start..start + len])
  }
}

fn script_open_tag(data_id: &str) -> String {
  format!(r#"<script id="{data_id}" type="application/json">"#)
}

fn inject_data_script(html: &str, data_id: &str, json: &str) -> String {
  let script = format!("{}{json}</script>", script_open_tag(data_id));
  if let Some(pos) = html.rfind("</body>") {
    let mut result = String::with_capacity(html.len() + script.len());
    result.push_str(&html[..pos]);
    result.push_str(&script);
    result.push_str(&html[pos..]);
    result
  } else {
    format!("{html}{script}")
  }
}

/// Set `lang` on the root element unless the template already has one.
fn inject_html_lang(html: &str, locale: &str) -> String {
  match html.find("<html") {
    Some(pos) if !html[pos..].split('>').next().unwrap_or_default().contains(" lang=") => {
      html.replacen("<html", &format!("<html lang=\"{locale}\""), 1)
    }
    _ => html.to_string(),
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use chrono::TimeZone as _;
  use serde_json::json;

  use super::*;

  fn config() -> ResolvedConfig {
    let messages = Messages::from_value(json!({
      "Index": {"title": "Hello <world> & you"},
      "ClientCounter": {"count": "{n, plural, one {# click} other {# clicks}}"},
      "Manifest": {"name": "Seam"}
    }))
    .unwrap();
    ResolvedConfig::new(Locale::parse("en").unwrap(), messages)
      .with_time_zone(Some(TimeZone::parse("Europe/Berlin").unwrap()))
      .with_now(Some(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()))
  }

  #[test]
  fn snapshot_round_trips_through_html() {
    let snapshot = ClientSnapshot::from_config(&config()).pick(&["ClientCounter", "Index"]);
    let html = snapshot.inject_into_html("<html><body><main></main></body></html>", "__i18n");

    assert!(html.starts_with(r#"<html lang="en">"#));
    assert!(html.contains(r#"<script id="__i18n" type="application/json">"#));
    assert!(html.ends_with("</script></body></html>"));
    assert!(!html.contains("<world>"));

    let back = ClientSnapshot::extract_from_html(&html, "__i18n").unwrap();
    assert_eq!(back, snapshot);
    assert!(back.messages.get("Manifest").is_none());
  }

  #[test]
  fn hydrated_config_translates_like_the_server() {
    let server = Arc::new(config());
    let json = ClientSnapshot::from_config(&server).pick(&["ClientCounter"]).to_script_json();

    let client = Arc::new(ClientSnapshot::from_json(&json).unwrap().hydrate());
    assert_eq!(client.locale(), server.locale());
    assert_eq!(client.time_zone(), server.time_zone());
    assert_eq!(client.now(), server.now());

    let n = crate::values::Values::new().with("n", 3);
    assert_eq!(client.translator(Some("ClientCounter")).t_with("count", &n), "3 clicks");
    assert_eq!(
      server.translator(Some("ClientCounter")).t_with("count", &n),
      client.translator(Some("ClientCounter")).t_with("count", &n),
    );
  }

  #[test]
  fn serialized_shape() {
    let snapshot = ClientSnapshot::from_config(&config()).pick(&["Manifest"]);
    let value: serde_json::Value = serde_json::from_str(&snapshot.to_json()).unwrap();
    assert_eq!(
      value,
      json!({
        "locale": "en",
        "messages": {"Manifest": {"name": "Seam"}},
        "timeZone": "Europe/Berlin",
        "now": "2025-01-01T00:00:00Z"
      })
    );
  }

  #[test]
  fn keeps_existing_lang_and_appends_without_body() {
    let snapshot = ClientSnapshot::from_config(&config()).pick(&["Manifest"]);
    let html = snapshot.inject_into_html(r#"<html lang="de"><p>x</p></html>"#, "d");
    assert!(html.starts_with(r#"<html lang="de">"#));
    assert!(html.ends_with("</script>"));
  }

  #[test]
  fn extraction_errors() {
    assert_eq!(ClientSnapshot::extract_from_html("<html></html>", "__i18n").unwrap_err().code(), "CONFIG");
    let broken = r#"<script id="__i18n" type="application/json">{"locale":"en""#;
    assert_eq!(ClientSnapshot::extract_from_html(broken, "__i18n").unwrap_err().code(), "CONFIG");
    let bad = r#"<script id="__i18n" type="application/json">{"locale":"","messages":{}}</script>"#;
    assert!(ClientSnapshot::extract_from_html(bad, "__i18n").is_err());
  }
}
