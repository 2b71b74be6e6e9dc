/* src/i18n/adapter/axum/src/page.rs */

use axum::response::Html;

use crate::extract::I18n;

/// Inject the request's snapshot (narrowed to `namespaces`, all when empty)
/// into an HTML document and set its `lang`.
pub async fn render_page<S: AsRef<str>>(html: &str, i18n: &I18n, namespaces: &[S]) -> Html<String> {
  let snapshot = i18n.snapshot().await.pick(namespaces);
  Html(snapshot.inject_into_html(html, i18n.data_id()))
}
