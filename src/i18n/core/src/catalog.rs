/* src/i18n/core/src/catalog.rs */

use std::collections::HashMap;
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use tracing::debug;

use crate::errors::I18nError;
use crate::locale::Locale;
use crate::messages::Messages;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Supplies raw message data per locale. Loading is the only place the
/// resolver suspends.
pub trait CatalogSource: Send + Sync {
  fn load<'a>(&'a self, locale: &'a Locale) -> BoxFuture<'a, Result<Messages, I18nError>>;
}

/// In-memory catalogs, mostly for tests and embedded message bundles.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
  catalogs: HashMap<String, Messages>,
}

impl StaticCatalog {
  pub fn new() -> Self {
    Self::default()
  }

  #[must_use]
  pub fn with(mut self, locale: &str, messages: Messages) -> Self {
    self.insert(locale, messages);
    self
  }

  pub fn insert(&mut self, locale: &str, messages: Messages) {
    self.catalogs.insert(locale.to_string(), messages);
  }

  /// Exact tag first, then the bare language (`de-AT` → `de`).
  fn find(&self, locale: &Locale) -> Option<&Messages> {
    self.catalogs.get(locale.as_str()).or_else(|| self.catalogs.get(locale.language()))
  }
}

impl CatalogSource for StaticCatalog {
  fn load<'a>(&'a self, locale: &'a Locale) -> BoxFuture<'a, Result<Messages, I18nError>> {
    let found = self
      .find(locale)
      .cloned()
      .ok_or_else(|| I18nError::load_failed(locale.as_str(), "no catalog registered"));
    Box::pin(async move { found })
  }
}

/// Reads `<dir>/<locale>.json`, falling back to `<dir>/<language>.json`.
#[derive(Debug, Clone)]
pub struct DirectoryCatalog {
  dir: PathBuf,
}

impl DirectoryCatalog {
  pub fn new(dir: impl Into<PathBuf>) -> Self {
    Self { dir: dir.into() }
  }

  pub fn dir(&self) -> &Path {
    &self.dir
  }

  fn candidates(&self, locale: &Locale) -> Vec<PathBuf> {
    let mut paths = vec![self.dir.join(format!("{locale}.json"))];
    if locale.language() != locale.as_str() {
      paths.push(self.dir.join(format!("{}.json", locale.language())));
    }
    paths
  }
}

impl CatalogSource for DirectoryCatalog {
  fn load<'a>(&'a self, locale: &'a Locale) -> BoxFuture<'a, Result<Messages, I18nError>> {
    Box::pin(async move {
      for path in self.candidates(locale) {
        let content = match tokio::fs::read_to_string(&path).await {
          Ok(content) => content,
          Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
          Err(e) => {
            return Err(I18nError::load_failed(
              locale.as_str(),
              format!("failed to read {}: {e}", path.display()),
            ));
          }
        };
        debug!(locale = %locale, path = %path.display(), "loaded message catalog");
        return Messages::from_json(&content).map_err(|e| {
          I18nError::load_failed(locale.as_str(), format!("{}: {e}", path.display()))
        });
      }
      Err(I18nError::load_failed(
        locale.as_str(),
        format!("no catalog file in {}", self.dir.display()),
      ))
    })
  }
}

/// Adapts an async closure, e.g. a fetch from a translation service.
pub struct FnCatalog<F> {
  load: F,
}

impl<F> FnCatalog<F> {
  pub fn new(load: F) -> Self {
    Self { load }
  }
}

impl<F, Fut> CatalogSource for FnCatalog<F>
where
  F: Fn(&Locale) -> Fut + Send + Sync,
  Fut: Future<Output = Result<Messages, I18nError>> + Send + 'static,
{
  fn load<'a>(&'a self, locale: &'a Locale) -> BoxFuture<'a, Result<Messages, I18nError>> {
    Box::pin((self.load)(locale))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn loc(s: &str) -> Locale {
    Locale::parse(s).unwrap()
  }

  #[tokio::test]
  async fn static_catalog_falls_back_to_language() {
    let catalog =
      StaticCatalog::new().with("de", Messages::from_json(r#"{"Index":{"title":"Hallo"}}"#).unwrap());
    let msgs = catalog.load(&loc("de-AT")).await.unwrap();
    assert!(msgs.get("Index.title").is_some());
    let err = catalog.load(&loc("fr")).await.unwrap_err();
    assert_eq!(err.code(), "LOAD_FAILED");
  }

  #[tokio::test]
  async fn directory_catalog_reads_json_files() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("en.json"), r#"{"Index":{"title":"Hello world!"}}"#).unwrap();
    std::fs::write(dir.path().join("zh-Hant.json"), r#"{"Index":{"title":"你好"}}"#).unwrap();
    let catalog = DirectoryCatalog::new(dir.path());

    let en = catalog.load(&loc("en-US")).await.unwrap();
    assert_eq!(en.get("Index.title"), Some(&Messages::Text("Hello world!".into())));
    let zh = catalog.load(&loc("zh-Hant")).await.unwrap();
    assert_eq!(zh.get("Index.title"), Some(&Messages::Text("你好".into())));
  }

  #[tokio::test]
  async fn directory_catalog_errors() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("en.json"), "{ not json").unwrap();
    let catalog = DirectoryCatalog::new(dir.path());
    assert_eq!(catalog.load(&loc("en")).await.unwrap_err().code(), "LOAD_FAILED");
    assert_eq!(catalog.load(&loc("de")).await.unwrap_err().code(), "LOAD_FAILED");
  }

  #[tokio::test]
  async fn fn_catalog_runs_closure() {
    let catalog = FnCatalog::new(|locale: &Locale| {
      let tag = locale.to_string();
      async move { Messages::from_value(serde_json::json!({ "tag": tag })) }
    });
    let msgs = catalog.load(&loc("ja")).await.unwrap();
    assert_eq!(msgs.get("tag"), Some(&Messages::Text("ja".into())));
  }
}
