/* src/i18n/core/src/request.rs */

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Process-unique identity of one inbound request or render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

static NEXT_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

impl RequestId {
  pub fn next() -> Self {
    Self(NEXT_REQUEST_ID.fetch_add(1, Ordering::Relaxed))
  }
}

impl fmt::Display for RequestId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "req-{}", self.0)
  }
}

/// The locale-relevant slice of a request, plus its identity.
///
/// Built by the embedding environment when it starts handling a request;
/// the resolver reads it, the cache keys on `id`.
#[derive(Debug, Clone)]
pub struct RequestContext {
  pub id: RequestId,
  /// Path and query of the request URI (`/docs?lang=de`).
  pub url: Option<String>,
  pub cookie_header: Option<String>,
  pub accept_language: Option<String>,
  /// A locale already determined by routing, e.g. a `/:lang/` path segment.
  pub locale_hint: Option<String>,
}

impl Default for RequestContext {
  fn default() -> Self {
    Self::new()
  }
}

impl RequestContext {
  /// A fresh context with a newly allocated id and no request data.
  pub fn new() -> Self {
    Self { id: RequestId::next(), url: None, cookie_header: None, accept_language: None, locale_hint: None }
  }

  #[must_use]
  pub fn url(mut self, url: impl Into<String>) -> Self {
    self.url = Some(url.into());
    self
  }

  #[must_use]
  pub fn cookie_header(mut self, header: impl Into<String>) -> Self {
    self.cookie_header = Some(header.into());
    self
  }

  #[must_use]
  pub fn accept_language(mut self, header: impl Into<String>) -> Self {
    self.accept_language = Some(header.into());
    self
  }

  #[must_use]
  pub fn locale_hint(mut self, locale: impl Into<String>) -> Self {
    self.locale_hint = Some(locale.into());
    self
  }

  /// Value of query parameter `name` in `url`, without percent-decoding.
  pub fn query_param(&self, name: &str) -> Option<&str> {
    let (_, query) = self.url.as_deref()?.split_once('?')?;
    let query = query.split('#').next().unwrap_or_default();
    query.split('&').find_map(|pair| {
      let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
      (key == name).then_some(value)
    })
  }

  /// Value of cookie `name` in the `Cookie` header.
  pub fn cookie(&self, name: &str) -> Option<&str> {
    self.cookie_header.as_deref()?.split(';').find_map(|pair| {
      let (key, value) = pair.trim().split_once('=')?;
      (key.trim() == name).then(|| value.trim())
    })
  }
}
