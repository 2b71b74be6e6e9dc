/* demo/backend/rust/src/pages.rs */

use axum::Json;
use axum::response::Html;
use chrono::{DateTime, Utc};
use seam_i18n::{Formatter, Translator, Values};
use seam_i18n_axum::{ExplicitLocale, I18n, render_page};
use serde_json::json;

const SHELL: &str = r#"<!doctype html>
<html>
<head><meta charset="utf-8"><title>seam i18n</title></head>
<body>
<main>{{content}}</main>
</body>
</html>"#;

fn escape_html(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for ch in s.chars() {
    match ch {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#x27;"),
      c => out.push(c),
    }
  }
  out
}

fn index_content(t: &Translator, f: &Formatter, updated: DateTime<Utc>) -> String {
  let lines = [
    t.t_with("greeting", &Values::new().with("name", "Ada")),
    t.t_with("inbox", &Values::new().with("count", 3)),
    t.t_with("price", &Values::new().with("amount", 1234.5)),
    t.t_with("updated", &Values::new().with("when", updated)),
    f.list(&["Rust", "Axum", "Tokio"]),
  ];
  let mut content = format!("<h1>{}</h1>", escape_html(&t.t("title")));
  for line in &lines {
    content.push_str(&format!("<p>{}</p>", escape_html(line)));
  }
  content
}

pub async fn index(i18n: I18n) -> Html<String> {
  let t = i18n.translator(Some("Index")).await;
  let f = i18n.formatter().await;
  let updated = f.config().now().unwrap_or_else(Utc::now);
  let content = index_content(&t, &f, updated);
  render_page(&SHELL.replace("{{content}}", &content), &i18n, &["ClientCounter"]).await
}

pub async fn manifest(explicit: ExplicitLocale) -> Json<serde_json::Value> {
  let t = explicit.translator(Some("Manifest")).await;
  Json(json!({
    "name": t.t("name"),
    "description": t.t("description"),
    "lang": t.config().locale().as_str(),
    "start_url": "/",
  }))
}

pub async fn greeting(i18n: I18n) -> Json<serde_json::Value> {
  let config = i18n.config().await;
  let t = i18n.translator(Some("Index")).await;
  Json(json!({
    "locale": config.locale().as_str(),
    "title": t.t("title"),
    "greeting": t.t_with("greeting", &Values::new().with("name", "Ada")),
  }))
}


#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use seam_i18n::{Locale, Messages, ResolvedConfig, TimeZone};
  use serde_json::json;

  use super::*;

  #[test]
  fn escape_html_special_chars() {
    assert_eq!(escape_html("<>&\"'"), "&lt;&gt;&amp;&quot;&#x27;");
    assert_eq!(escape_html("hello world"), "hello world");
  }

  #[test]
  fn index_content_escapes_messages_and_arguments() {
    let messages = Messages::from_value(json!({
      "Index": {
        "title": "<script>alert(1)</script>",
        "greeting": "Hi {name} & welcome"
      }
    }))
    .unwrap();
    let config = ResolvedConfig::new(Locale::parse("en").unwrap(), messages)
      .with_time_zone(Some(TimeZone::utc()))
      .with_on_error(|_| {});
    let config = Arc::new(config);
    let content = index_content(&config.translator(Some("Index")), &config.formatter(), Utc::now());

    assert!(content.starts_with("<h1>&lt;script&gt;alert(1)&lt;/script&gt;</h1>"), "{content}");
    assert!(content.contains("<p>Hi Ada &amp; welcome</p>"), "{content}");
    assert!(!content.contains("<script>"));
  }
}
