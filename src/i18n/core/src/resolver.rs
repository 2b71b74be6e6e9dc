/* src/i18n/core/src/resolver.rs */

use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::cache::RequestCache;
use crate::catalog::{BoxFuture, CatalogSource, DirectoryCatalog};
use crate::errors::I18nError;
use crate::format::{Formats, TimeZone};
use crate::locale::Locale;
use crate::messages::Messages;
use crate::request::{RequestContext, RequestId};
use crate::resolved::{ErrorHandler, MessageFallback, MessageFallbackInfo, ResolvedConfig, default_on_error};
use crate::scope::RequestScope;
use crate::settings::I18nSettings;
use crate::strategy::{ResolveData, ResolveStrategy, default_strategies, match_supported, resolve_chain};
use crate::translator::Translator;

/// Per-request overrides returned by the request config hook.
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
  pub time_zone: Option<TimeZone>,
  pub now: Option<DateTime<Utc>>,
  pub formats: Option<Formats>,
}

pub type RequestConfigHook = Arc<dyn Fn(&Locale) -> BoxFuture<'static, RequestConfig> + Send + Sync>;

/// Turns a request into its [`ResolvedConfig`], once per request.
///
/// Shared across the whole server (`Arc<ConfigResolver>`); per-request state
/// lives in the internal [`RequestCache`] until the request ends.
pub struct ConfigResolver {
  catalog: Arc<dyn CatalogSource>,
  locales: Vec<Locale>,
  default_locale: Locale,
  fallback_locale: Option<Locale>,
  strategies: Vec<Box<dyn ResolveStrategy>>,
  formats: Formats,
  time_zone: Option<TimeZone>,
  now: Option<DateTime<Utc>>,
  on_error: ErrorHandler,
  message_fallback: Option<MessageFallback>,
  request_config: Option<RequestConfigHook>,
  cache: RequestCache<ResolvedConfig>,
}

impl ConfigResolver {
  pub fn builder(catalog: impl CatalogSource + 'static) -> ConfigResolverBuilder {
    ConfigResolverBuilder::new(Arc::new(catalog))
  }

  /// Resolver reading `<messages_dir>/<locale>.json` as configured by `settings`.
  pub fn from_settings(settings: &I18nSettings) -> Result<Self, I18nError> {
    Self::builder(DirectoryCatalog::new(settings.messages_path())).settings(settings).build()
  }

  pub fn locales(&self) -> &[Locale] {
    &self.locales
  }

  pub fn default_locale(&self) -> &Locale {
    &self.default_locale
  }

  /// Number of requests with a live cache entry.
  pub fn active_requests(&self) -> usize {
    self.cache.len()
  }

  /// The configuration for `ctx`, computed on first use and shared by every
  /// later or concurrent call for the same request.
  pub async fn resolve(&self, ctx: &RequestContext) -> Arc<ResolvedConfig> {
    self
      .cache
      .memoize(ctx.id, || async {
        let data = ResolveData {
          request: ctx,
          locales: &self.locales,
          default_locale: &self.default_locale,
        };
        let locale = resolve_chain(&self.strategies, &data);
        self.build_config(locale).await
      })
      .await
  }

  /// Resolve for a caller that names its locale and has no request context
  /// (metadata, manifests, generic handlers). Never touches the request
  /// cache. An unknown locale is reported and replaced by the default.
  pub async fn resolve_explicit(&self, locale: &str) -> Arc<ResolvedConfig> {
    let locale = match_supported(&self.locales, locale).unwrap_or_else(|| {
      (self.on_error)(&I18nError::InvalidLocale(locale.to_string()));
      self.default_locale.clone()
    });
    Arc::new(self.build_config(locale).await)
  }

  pub async fn translator_explicit(&self, locale: &str, namespace: Option<&str>) -> Translator {
    self.resolve_explicit(locale).await.translator(namespace)
  }

  /// Drop the cached configuration of a finished request.
  pub fn end_request(&self, id: RequestId) -> bool {
    self.cache.end(id)
  }

  /// Open a request scope; its cache entry is evicted when the scope drops.
  pub fn scope(self: &Arc<Self>, ctx: RequestContext) -> RequestScope {
    RequestScope::new(Arc::clone(self), ctx)
  }

  async fn build_config(&self, locale: Locale) -> ResolvedConfig {
    let messages = self.load_messages(&locale).await;
    debug!(locale = %locale, messages = messages.message_count(), "resolved i18n config");

    let mut time_zone = self.time_zone.clone();
    let mut now = self.now;
    let mut formats = self.formats.clone();
    if let Some(hook) = &self.request_config {
      let overrides = hook(&locale).await;
      time_zone = overrides.time_zone.or(time_zone);
      now = overrides.now.or(now);
      if let Some(extra) = overrides.formats {
        formats.date_time.extend(extra.date_time);
        formats.number.extend(extra.number);
        formats.list.extend(extra.list);
      }
    }

    ResolvedConfig::new(locale, messages)
      .with_formats(formats)
      .with_time_zone(time_zone)
      .with_now(now)
      .with_error_handler(Arc::clone(&self.on_error))
      .with_message_fallback(self.message_fallback.clone())
  }

  async fn load_messages(&self, locale: &Locale) -> Messages {
    let mut messages = match self.catalog.load(locale).await {
      Ok(messages) => messages,
      Err(e) => {
        (self.on_error)(&e);
        Messages::empty()
      }
    };
    if let Some(fallback) = self.fallback_locale.as_ref().filter(|f| *f != locale) {
      match self.catalog.load(fallback).await {
        Ok(fb) => {
          let filled = messages.fill_missing_from(&fb);
          if filled > 0 {
            debug!(locale = %locale, fallback = %fallback, filled, "filled messages from fallback locale");
          }
        }
        Err(e) => (self.on_error)(&e),
      }
    }
    messages
  }
}

/// Builder for [`ConfigResolver`]; `build` validates the locale setup.
pub struct ConfigResolverBuilder {
  catalog: Arc<dyn CatalogSource>,
  locales: Vec<String>,
  default_locale: Option<String>,
  fallback_locale: Option<String>,
  strategies: Option<Vec<Box<dyn ResolveStrategy>>>,
  formats: Formats,
  time_zone: Option<String>,
  now: Option<DateTime<Utc>>,
  on_error: Option<ErrorHandler>,
  message_fallback: Option<MessageFallback>,
  request_config: Option<RequestConfigHook>,
}

impl ConfigResolverBuilder {
  pub fn new(catalog: Arc<dyn CatalogSource>) -> Self {
    Self {
      catalog,
      locales: Vec::new(),
      default_locale: None,
      fallback_locale: None,
      strategies: None,
      formats: Formats::default(),
      time_zone: None,
      now: None,
      on_error: None,
      message_fallback: None,
      request_config: None,
    }
  }

  /// Copy locales, fallback, time zone and presets from a settings file.
  pub fn settings(mut self, settings: &I18nSettings) -> Self {
    self.locales.clone_from(&settings.locales);
    self.default_locale = Some(settings.default_locale.clone());
    self.fallback_locale.clone_from(&settings.fallback_locale);
    self.time_zone.clone_from(&settings.time_zone);
    self.formats = settings.formats.clone();
    self
  }

  pub fn locales<I, S>(mut self, locales: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.locales = locales.into_iter().map(Into::into).collect();
    self
  }

  pub fn default_locale(mut self, locale: impl Into<String>) -> Self {
    self.default_locale = Some(locale.into());
    self
  }

  pub fn fallback_locale(mut self, locale: impl Into<String>) -> Self {
    self.fallback_locale = Some(locale.into());
    self
  }

  /// Replace the default hint -> query -> cookie -> Accept-Language chain.
  pub fn strategies(mut self, strategies: Vec<Box<dyn ResolveStrategy>>) -> Self {
    self.strategies = Some(strategies);
    self
  }

  pub fn formats(mut self, formats: Formats) -> Self {
    self.formats = formats;
    self
  }

  pub fn time_zone(mut self, zone: impl Into<String>) -> Self {
    self.time_zone = Some(zone.into());
    self
  }

  /// Fixed reference instant for relative time (reproducible output).
  pub fn now(mut self, now: DateTime<Utc>) -> Self {
    self.now = Some(now);
    self
  }

  pub fn on_error(mut self, handler: impl Fn(&I18nError) + Send + Sync + 'static) -> Self {
    self.on_error = Some(Arc::new(handler));
    self
  }

  pub fn message_fallback(
    mut self,
    hook: impl Fn(&MessageFallbackInfo<'_>) -> String + Send + Sync + 'static,
  ) -> Self {
    self.message_fallback = Some(Arc::new(hook));
    self
  }

  /// Async hook run once per resolution to override zone, `now` or presets.
  pub fn request_config<F, Fut>(mut self, hook: F) -> Self
  where
    F: Fn(&Locale) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = RequestConfig> + Send + 'static,
  {
    self.request_config = Some(Arc::new(move |locale: &Locale| -> BoxFuture<'static, RequestConfig> {
      Box::pin(hook(locale))
    }));
    self
  }

  pub fn build(self) -> Result<ConfigResolver, I18nError> {
    if self.locales.is_empty() {
      return Err(I18nError::config("at least one locale is required"));
    }
    let locales = self.locales.iter().map(|raw| Locale::parse(raw)).collect::<Result<Vec<_>, _>>()?;

    let listed = |raw: &str, field: &str| -> Result<Locale, I18nError> {
      let locale = Locale::parse(raw)?;
      if locales.contains(&locale) {
        Ok(locale)
      } else {
        Err(I18nError::config(format!("{field} \"{raw}\" is not one of the configured locales")))
      }
    };
    let default_locale = match &self.default_locale {
      Some(raw) => listed(raw, "default locale")?,
      None => locales[0].clone(),
    };
    let fallback_locale =
      self.fallback_locale.as_deref().map(|raw| listed(raw, "fallback locale")).transpose()?;
    let time_zone = self.time_zone.as_deref().map(TimeZone::parse).transpose()?;

    info!(
      locales = ?locales.iter().map(Locale::as_str).collect::<Vec<_>>(),
      default = %default_locale,
      "i18n resolver ready"
    );

    Ok(ConfigResolver {
      catalog: self.catalog,
      locales,
      default_locale,
      fallback_locale,
      strategies: self.strategies.unwrap_or_else(default_strategies),
      formats: self.formats,
      time_zone,
      now: self.now,
      on_error: self.on_error.unwrap_or_else(|| Arc::new(default_on_error)),
      message_fallback: self.message_fallback,
      request_config: self.request_config,
      cache: RequestCache::new(),
    })
  }
}
