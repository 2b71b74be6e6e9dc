/* src/i18n/core/src/lib.rs */

pub mod bridge;
pub mod cache;
pub mod catalog;
pub mod errors;
pub mod escape;
pub mod format;
pub mod formatter;
pub mod locale;
pub mod messages;
pub mod request;
pub mod resolved;
pub mod resolver;
pub mod scope;
pub mod settings;
pub mod strategy;
pub mod translator;
pub mod values;

// Re-exports for ergonomic use
pub use bridge::ClientSnapshot;
pub use cache::RequestCache;
pub use catalog::{BoxFuture, CatalogSource, DirectoryCatalog, FnCatalog, StaticCatalog};
pub use errors::I18nError;
pub use escape::script_safe_json;
pub use format::{DateTimeOptions, Formats, ListOptions, ListType, NumberOptions, NumberStyle, TimeZone};
pub use formatter::Formatter;
pub use locale::Locale;
pub use messages::{Lookup, Messages};
pub use request::{RequestContext, RequestId};
pub use resolved::{ErrorHandler, MessageFallback, MessageFallbackInfo, ResolvedConfig, default_on_error};
pub use resolver::{ConfigResolver, ConfigResolverBuilder, RequestConfig};
pub use scope::RequestScope;
pub use settings::{I18nSettings, SETTINGS_FILE};
pub use strategy::{
  ResolveData, ResolveStrategy, default_strategies, from_accept_language, from_cookie, from_hint,
  from_url_query, resolve_chain,
};
pub use translator::Translator;
pub use values::{Value, Values};
