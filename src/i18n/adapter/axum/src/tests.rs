/* src/i18n/adapter/axum/src/tests.rs */

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::routing::get;
use http_body_util::BodyExt;
use seam_i18n::{ClientSnapshot, ConfigResolver, Messages, StaticCatalog};
use serde_json::json;
use tower::ServiceExt;

use crate::{ExplicitLocale, I18n, I18nLayer, render_page};

const TEMPLATE: &str = "<!doctype html><html><head></head><body><main></main></body></html>";

fn resolver() -> Arc<ConfigResolver> {
  let catalog = StaticCatalog::new()
    .with(
      "en",
      Messages::from_value(json!({
        "Index": {"title": "Hello world!"},
        "Manifest": {"name": "Seam Demo"},
        "ClientCounter": {"label": "Count"}
      }))
      .unwrap(),
    )
    .with(
      "de",
      Messages::from_value(json!({
        "Index": {"title": "Hallo Welt!"},
        "Manifest": {"name": "Seam-Demo"},
        "ClientCounter": {"label": "Zähler"}
      }))
      .unwrap(),
    );
  Arc::new(ConfigResolver::builder(catalog).locales(["en", "de"]).time_zone("UTC").build().unwrap())
}

async fn title(i18n: I18n) -> String {
  i18n.translator(Some("Index")).await.t("title")
}

async fn shared(i18n: I18n) -> axum::Json<serde_json::Value> {
  let t = i18n.translator(None).await;
  let f = i18n.formatter().await;
  let config = i18n.config().await;
  axum::Json(json!({
    "same": Arc::ptr_eq(t.config(), f.config()) && Arc::ptr_eq(&config, f.config()),
    "locale": config.locale().as_str(),
  }))
}

async fn page(i18n: I18n) -> axum::response::Html<String> {
  render_page(TEMPLATE, &i18n, &["ClientCounter"]).await
}

async fn manifest(explicit: ExplicitLocale) -> String {
  explicit.translator(Some("Manifest")).await.t("name")
}

fn app(resolver: &Arc<ConfigResolver>) -> Router {
  Router::new()
    .route("/title", get(title))
    .route("/shared", get(shared))
    .route("/page", get(page))
    .route("/manifest", get(manifest))
    .layer(I18nLayer::new(Arc::clone(resolver)).data_id("__i18n"))
}

async fn send(router: Router, req: Request<Body>) -> (StatusCode, String) {
  let resp = router.oneshot(req).await.unwrap();
  let status = resp.status();
  let body = resp.into_body().collect().await.unwrap().to_bytes();
  (status, String::from_utf8(body.to_vec()).unwrap())
}

fn get_req(uri: &str) -> axum::http::request::Builder {
  Request::builder().uri(uri)
}

#[tokio::test]
async fn accept_language_selects_locale() {
  let req = get_req("/title").header(header::ACCEPT_LANGUAGE, "de-DE,de;q=0.9").body(Body::empty()).unwrap();
  let (status, body) = send(app(&resolver()), req).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, "Hallo Welt!");
}

#[tokio::test]
async fn cookie_and_query_select_locale() {
  let resolver = resolver();
  let req = get_req("/title").header(header::COOKIE, "theme=dark; seam-locale=de").body(Body::empty()).unwrap();
  assert_eq!(send(app(&resolver), req).await.1, "Hallo Welt!");

  let req = get_req("/title?lang=en").header(header::COOKIE, "seam-locale=de").body(Body::empty()).unwrap();
  assert_eq!(send(app(&resolver), req).await.1, "Hello world!");
}

#[tokio::test]
async fn one_config_per_request_and_evicted_after() {
  let resolver = resolver();
  let req = get_req("/shared").header(header::ACCEPT_LANGUAGE, "de").body(Body::empty()).unwrap();
  let (status, body) = send(app(&resolver), req).await;
  assert_eq!(status, StatusCode::OK);
  let value: serde_json::Value = serde_json::from_str(&body).unwrap();
  assert_eq!(value, json!({"same": true, "locale": "de"}));
  assert_eq!(resolver.active_requests(), 0);
}

#[tokio::test]
async fn handle_kept_past_response_sees_same_config() {
  let resolver = resolver();
  let kept: Arc<Mutex<Option<(I18n, Arc<seam_i18n::ResolvedConfig>)>>> = Arc::default();
  let stash = Arc::clone(&kept);
  let router = Router::new()
    .route(
      "/kept",
      get(move |i18n: I18n| async move {
        let config = i18n.config().await;
        let title = i18n.translator(Some("Index")).await.t("title");
        stash.lock().unwrap().replace((i18n, config));
        title
      }),
    )
    .layer(I18nLayer::new(Arc::clone(&resolver)));

  let req = get_req("/kept").header(header::ACCEPT_LANGUAGE, "de").body(Body::empty()).unwrap();
  assert_eq!(send(router, req).await.1, "Hallo Welt!");
  assert_eq!(resolver.active_requests(), 1);

  let (i18n, during) = kept.lock().unwrap().take().unwrap();
  let after = i18n.config().await;
  assert!(Arc::ptr_eq(&during, &after));
  assert_eq!(i18n.translator(Some("Index")).await.t("title"), "Hallo Welt!");
  drop(i18n);
  assert_eq!(resolver.active_requests(), 0);
}

#[tokio::test]
async fn page_embeds_picked_snapshot() {
  let req = get_req("/page").header(header::ACCEPT_LANGUAGE, "de").body(Body::empty()).unwrap();
  let (status, body) = send(app(&resolver()), req).await;
  assert_eq!(status, StatusCode::OK);
  assert!(body.contains(r#"<html lang="de">"#));

  let snapshot = ClientSnapshot::extract_from_html(&body, "__i18n").unwrap();
  assert_eq!(snapshot.locale.as_str(), "de");
  assert!(snapshot.messages.get("Index").is_none());
  let client = Arc::new(snapshot.hydrate());
  assert_eq!(client.translator(Some("ClientCounter")).t("label"), "Zähler");
}

#[tokio::test]
async fn explicit_locale_ignores_request_locale() {
  let resolver = resolver();
  let req = get_req("/manifest?locale=en").header(header::ACCEPT_LANGUAGE, "de").body(Body::empty()).unwrap();
  assert_eq!(send(app(&resolver), req).await.1, "Seam Demo");

  let req = get_req("/manifest?locale=de").body(Body::empty()).unwrap();
  assert_eq!(send(app(&resolver), req).await.1, "Seam-Demo");

  let req = get_req("/manifest?locale=xx").body(Body::empty()).unwrap();
  assert_eq!(send(app(&resolver), req).await.1, "Seam Demo");

  let req = get_req("/manifest").body(Body::empty()).unwrap();
  assert_eq!(send(app(&resolver), req).await.1, "Seam Demo");
}

#[tokio::test]
async fn missing_layer_is_a_json_error() {
  let router = Router::new().route("/title", get(title));
  let (status, body) = send(router, get_req("/title").body(Body::empty()).unwrap()).await;
  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  let value: serde_json::Value = serde_json::from_str(&body).unwrap();
  assert_eq!(value["ok"], false);
  assert_eq!(value["error"]["code"], "CONFIG");
  assert_eq!(value["error"]["transient"], false);
}
