/* src/i18n/adapter/axum/src/extract.rs */

use std::sync::Arc;

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use seam_i18n::{ClientSnapshot, ConfigResolver, Formatter, I18nError, RequestScope, ResolvedConfig, Translator};
use serde::Deserialize;

use crate::error::AxumError;
use crate::layer::Installed;

fn installed(parts: &Parts) -> Result<Installed, AxumError> {
  parts
    .extensions
    .get::<Installed>()
    .cloned()
    .ok_or_else(|| AxumError(I18nError::config("I18nLayer is not installed on this route")))
}

/// The current request's i18n scope. Every call resolves through the same
/// cache entry, so all translators and formatters of one request agree.
#[derive(Clone)]
pub struct I18n {
  scope: Arc<RequestScope>,
  data_id: Arc<str>,
}

impl I18n {
  pub fn scope(&self) -> &Arc<RequestScope> {
    &self.scope
  }

  pub fn data_id(&self) -> &str {
    &self.data_id
  }

  pub async fn config(&self) -> Arc<ResolvedConfig> {
    self.scope.config().await
  }

  pub async fn translator(&self, namespace: Option<&str>) -> Translator {
    self.scope.translator(namespace).await
  }

  pub async fn formatter(&self) -> Formatter {
    self.scope.formatter().await
  }

  pub async fn snapshot(&self) -> ClientSnapshot {
    ClientSnapshot::from_config(&*self.config().await)
  }
}

impl<S: Send + Sync> FromRequestParts<S> for I18n {
  type Rejection = AxumError;

  async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
    let Installed { scope, data_id } = installed(parts)?;
    Ok(Self { scope, data_id })
  }
}

#[derive(Deserialize)]
struct LocaleQuery {
  locale: Option<String>,
}

/// `?locale=` for handlers that name their locale instead of deriving it
/// from the request (metadata, manifests). Resolution bypasses the request
/// cache; an unknown locale is reported and replaced by the default.
pub struct ExplicitLocale {
  pub locale: Option<String>,
  resolver: Arc<ConfigResolver>,
}

impl ExplicitLocale {
  pub async fn config(&self) -> Arc<ResolvedConfig> {
    match &self.locale {
      Some(locale) => self.resolver.resolve_explicit(locale).await,
      None => self.resolver.resolve_explicit(self.resolver.default_locale().as_str()).await,
    }
  }

  pub async fn translator(&self, namespace: Option<&str>) -> Translator {
    self.config().await.translator(namespace)
  }
}

impl<S: Send + Sync> FromRequestParts<S> for ExplicitLocale {
  type Rejection = AxumError;

  async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
    let resolver = Arc::clone(installed(parts)?.scope.resolver());
    let Query(query) = Query::<LocaleQuery>::from_request_parts(parts, state)
      .await
      .map_err(|e| AxumError(I18nError::InvalidLocale(e.body_text())))?;
    Ok(Self { locale: query.locale.filter(|l| !l.is_empty()), resolver })
  }
}
