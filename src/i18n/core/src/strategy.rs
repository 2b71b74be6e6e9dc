/* src/i18n/core/src/strategy.rs */

use tracing::debug;

use crate::locale::Locale;
use crate::request::RequestContext;

/// Inputs every locale strategy sees.
pub struct ResolveData<'a> {
  pub request: &'a RequestContext,
  pub locales: &'a [Locale],
  pub default_locale: &'a Locale,
}

impl ResolveData<'_> {
  /// Match a raw tag against the configured locales: exact tag first, then
  /// the bare language (`de-AT` → `de`).
  pub fn supported(&self, raw: &str) -> Option<Locale> {
    match_supported(self.locales, raw)
  }
}

pub(crate) fn match_supported(locales: &[Locale], raw: &str) -> Option<Locale> {
  let candidate = Locale::parse(raw).ok()?;
  if let Some(hit) = locales.iter().find(|l| **l == candidate) {
    return Some(hit.clone());
  }
  locales.iter().find(|l| l.as_str() == candidate.language()).cloned()
}

/// One step of the locale resolution chain. Strategies run in order; the
/// first that yields a supported locale wins.
pub trait ResolveStrategy: Send + Sync {
  fn kind(&self) -> &'static str;
  fn resolve(&self, data: &ResolveData<'_>) -> Option<Locale>;
}

struct FromHint;

impl ResolveStrategy for FromHint {
  fn kind(&self) -> &'static str {
    "hint"
  }

  fn resolve(&self, data: &ResolveData<'_>) -> Option<Locale> {
    data.supported(data.request.locale_hint.as_deref()?)
  }
}

struct FromUrlQuery {
  param: String,
}

impl ResolveStrategy for FromUrlQuery {
  fn kind(&self) -> &'static str {
    "url_query"
  }

  fn resolve(&self, data: &ResolveData<'_>) -> Option<Locale> {
    data.supported(data.request.query_param(&self.param)?)
  }
}

struct FromCookie {
  name: String,
}

impl ResolveStrategy for FromCookie {
  fn kind(&self) -> &'static str {
    "cookie"
  }

  fn resolve(&self, data: &ResolveData<'_>) -> Option<Locale> {
    data.supported(data.request.cookie(&self.name)?)
  }
}

struct FromAcceptLanguage;

impl ResolveStrategy for FromAcceptLanguage {
  fn kind(&self) -> &'static str {
    "accept_language"
  }

  fn resolve(&self, data: &ResolveData<'_>) -> Option<Locale> {
    let header = data.request.accept_language.as_deref()?;
    parse_accept_language(header).into_iter().find_map(|tag| data.supported(tag))
  }
}

/// Tags from an `Accept-Language` header ordered by descending q-value.
/// Wildcards and `q=0` entries are dropped; ties keep header order.
fn parse_accept_language(header: &str) -> Vec<&str> {
  let mut entries: Vec<(&str, f64)> = Vec::new();
  for part in header.split(',') {
    let mut segments = part.split(';');
    let tag = segments.next().unwrap_or_default().trim();
    if tag.is_empty() || tag == "*" {
      continue;
    }
    let q = segments
      .filter_map(|s| s.trim().strip_prefix("q="))
      .find_map(|v| v.trim().parse::<f64>().ok())
      .unwrap_or(1.0);
    if q > 0.0 {
      entries.push((tag, q));
    }
  }
  entries.sort_by(|a, b| b.1.total_cmp(&a.1));
  entries.into_iter().map(|(tag, _)| tag).collect()
}

pub fn from_hint() -> Box<dyn ResolveStrategy> {
  Box::new(FromHint)
}

pub fn from_url_query(param: &str) -> Box<dyn ResolveStrategy> {
  Box::new(FromUrlQuery { param: param.to_string() })
}

pub fn from_cookie(name: &str) -> Box<dyn ResolveStrategy> {
  Box::new(FromCookie { name: name.to_string() })
}

pub fn from_accept_language() -> Box<dyn ResolveStrategy> {
  Box::new(FromAcceptLanguage)
}

/// hint -> `?lang=` -> cookie `seam-locale` -> Accept-Language -> default
pub fn default_strategies() -> Vec<Box<dyn ResolveStrategy>> {
  vec![from_hint(), from_url_query("lang"), from_cookie("seam-locale"), from_accept_language()]
}

/// Run `strategies` in order, falling back to the default locale.
pub fn resolve_chain(strategies: &[Box<dyn ResolveStrategy>], data: &ResolveData<'_>) -> Locale {
  for strategy in strategies {
    if let Some(locale) = strategy.resolve(data) {
      debug!(request = %data.request.id, strategy = strategy.kind(), locale = %locale, "locale resolved");
      return locale;
    }
  }
  debug!(request = %data.request.id, locale = %data.default_locale, "locale defaulted");
  data.default_locale.clone()
}
