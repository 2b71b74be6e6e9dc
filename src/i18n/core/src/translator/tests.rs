/* src/i18n/core/src/translator/tests.rs */

use std::sync::{Arc, Mutex};

use super::Translator;
use crate::errors::I18nError;
use crate::format::TimeZone;
use crate::locale::Locale;
use crate::messages::Messages;
use crate::resolved::{MessageFallback, MessageFallbackInfo, ResolvedConfig};
use crate::values::Values;

type Seen = Arc<Mutex<Vec<I18nError>>>;

fn config(locale: &str, messages: serde_json::Value) -> (Arc<ResolvedConfig>, Seen) {
  let seen: Seen = Arc::new(Mutex::new(Vec::new()));
  let sink = Arc::clone(&seen);
  let config = ResolvedConfig::new(Locale::parse(locale).unwrap(), Messages::from_value(messages).unwrap())
    .with_time_zone(Some(TimeZone::utc()))
    .with_on_error(move |e| sink.lock().unwrap().push(e.clone()));
  (Arc::new(config), seen)
}

fn codes(seen: &Seen) -> Vec<&'static str> {
  seen.lock().unwrap().iter().map(I18nError::code).collect()
}

#[test]
fn namespaced_lookup() {
  let (config, seen) = config("en", serde_json::json!({"Index": {"title": "Hello world!"}}));
  let t = config.translator(Some("Index"));
  assert_eq!(t.t("title"), "Hello world!");
  assert!(codes(&seen).is_empty());
}

#[test]
fn root_and_nested_keys() {
  let (config, _) = config(
    "en",
    serde_json::json!({"Nav": {"menu": {"home": "Home"}}, "brand": "Seam"}),
  );
  let root = config.translator(None);
  assert_eq!(root.t("brand"), "Seam");
  assert_eq!(root.t("Nav.menu.home"), "Home");
  assert_eq!(config.translator(Some("Nav")).t("menu.home"), "Home");
  assert_eq!(config.translator(Some("Nav.menu")).t("home"), "Home");
  assert_eq!(config.translator(Some("")).t("brand"), "Seam");
}

#[test]
fn missing_key_returns_path_and_reports_once() {
  let (config, seen) = config("en", serde_json::json!({"Index": {"title": "Hi"}}));
  let t = config.translator(Some("Index"));
  assert_eq!(t.t("subtitle"), "Index.subtitle");
  assert_eq!(codes(&seen), vec!["MISSING_MESSAGE"]);
  match &seen.lock().unwrap()[0] {
    I18nError::MissingMessage { locale, path } => {
      assert_eq!(locale, "en");
      assert_eq!(path, "Index.subtitle");
    }
    other => panic!("unexpected {other:?}"),
  }
}

#[test]
fn group_is_insufficient_path() {
  let (config, seen) = config("en", serde_json::json!({"Index": {"title": "Hi"}}));
  assert_eq!(config.translator(None).t("Index"), "Index");
  assert_eq!(codes(&seen), vec!["INSUFFICIENT_PATH"]);
}

#[test]
fn interpolation_and_plurals() {
  let (config, seen) = config(
    "en",
    serde_json::json!({"Cart": {
      "greeting": "Hello {name}!",
      "items": "{count, plural, =0 {Your cart is empty} one {# item} other {# items}}"
    }}),
  );
  let t = config.translator(Some("Cart"));
  assert_eq!(t.t_with("greeting", &Values::new().with("name", "Ada")), "Hello Ada!");
  assert_eq!(t.t_with("items", &Values::new().with("count", 0)), "Your cart is empty");
  assert_eq!(t.t_with("items", &Values::new().with("count", 1)), "1 item");
  assert_eq!(t.t_with("items", &Values::new().with("count", 2000)), "2,000 items");
  assert!(codes(&seen).is_empty());
}

#[test]
fn locale_drives_number_arguments() {
  let (config, _) = config("de", serde_json::json!({"price": "Preis: {amount, number}"}));
  let t = config.translator(None);
  assert_eq!(t.t_with("price", &Values::new().with("amount", 1234.5)), "Preis: 1.234,5");
}

#[test]
fn broken_messages_fall_back_to_path() {
  let (config, seen) = config(
    "en",
    serde_json::json!({"A": {"bad": "Hello {name", "needs": "Hi {name}"}}),
  );
  let t = config.translator(Some("A"));
  assert_eq!(t.t("bad"), "A.bad");
  assert_eq!(t.t("needs"), "A.needs");
  assert_eq!(codes(&seen), vec!["INVALID_MESSAGE", "FORMATTING_ERROR"]);
}

#[test]
fn has_and_raw_do_not_report() {
  let (config, seen) = config("en", serde_json::json!({"Index": {"title": "Hi {name}"}}));
  let t = config.translator(Some("Index"));
  assert!(t.has("title"));
  assert!(!t.has("nope"));
  assert!(!config.translator(None).has("Index"));
  assert_eq!(t.raw("title"), Some(&Messages::Text("Hi {name}".into())));
  assert!(config.translator(None).raw("Index").is_some());
  assert!(t.raw("nope").is_none());
  assert!(codes(&seen).is_empty());
}

#[test]
fn message_fallback_hook() {
  let (config, seen) = config("en", serde_json::json!({}));
  let hook: MessageFallback = Arc::new(|info: &MessageFallbackInfo<'_>| {
    format!("{}::{} ({})", info.namespace.unwrap_or("-"), info.key, info.error.code())
  });
  let config = Arc::new((*config).clone().with_message_fallback(Some(hook)));
  let t = Translator::new(config, Some("Index"));
  assert_eq!(t.t("title"), "Index::title (MISSING_MESSAGE)");
  assert_eq!(codes(&seen), vec!["MISSING_MESSAGE"]);
}

#[test]
fn translators_share_the_config() {
  let (config, _) = config("en", serde_json::json!({"a": "A"}));
  let t1 = config.translator(None);
  let t2 = config.translator(Some("x"));
  assert!(Arc::ptr_eq(t1.config(), t2.config()));
  assert!(Arc::ptr_eq(t1.config(), &config));
  assert_eq!(t2.namespace(), Some("x"));
}
