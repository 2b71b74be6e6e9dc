/* src/i18n/core/src/scope.rs */

use std::sync::Arc;

use crate::formatter::Formatter;
use crate::request::{RequestContext, RequestId};
use crate::resolved::ResolvedConfig;
use crate::resolver::ConfigResolver;
use crate::translator::Translator;

/// One request's handle on the resolver.
///
/// Thread it (or an `Arc` of it) to every call site that renders for the
/// request. Dropping the scope ends the request and evicts its cache entry.
pub struct RequestScope {
  resolver: Arc<ConfigResolver>,
  context: RequestContext,
}

impl RequestScope {
  pub fn new(resolver: Arc<ConfigResolver>, context: RequestContext) -> Self {
    Self { resolver, context }
  }

  pub fn id(&self) -> RequestId {
    self.context.id
  }

  pub fn context(&self) -> &RequestContext {
    &self.context
  }

  pub fn resolver(&self) -> &Arc<ConfigResolver> {
    &self.resolver
  }

  pub async fn config(&self) -> Arc<ResolvedConfig> {
    self.resolver.resolve(&self.context).await
  }

  pub async fn translator(&self, namespace: Option<&str>) -> Translator {
    self.config().await.translator(namespace)
  }

  pub async fn formatter(&self) -> Formatter {
    self.config().await.formatter()
  }
}

impl Drop for RequestScope {
  fn drop(&mut self) {
    self.resolver.end_request(self.context.id);
  }
}
