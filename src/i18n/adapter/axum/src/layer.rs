/* src/i18n/adapter/axum/src/layer.rs */

use std::sync::Arc;
use std::task::{Context, Poll};

use axum::http::{Request, header};
use seam_i18n::{BoxFuture, ConfigResolver, RequestContext, RequestScope};
use tower::{Layer, Service};
use tracing::debug;

const DEFAULT_DATA_ID: &str = "__i18n";

/// What the layer leaves in request extensions for the extractors.
#[derive(Clone)]
pub(crate) struct Installed {
  pub scope: Arc<RequestScope>,
  pub data_id: Arc<str>,
}

/// Opens a [`RequestScope`] per request. The request ends when the last
/// handle on the scope is dropped, which may be after the response.
#[derive(Clone)]
pub struct I18nLayer {
  resolver: Arc<ConfigResolver>,
  data_id: Arc<str>,
}

impl I18nLayer {
  pub fn new(resolver: Arc<ConfigResolver>) -> Self {
    Self { resolver, data_id: Arc::from(DEFAULT_DATA_ID) }
  }

  /// `id` of the `<script>` element pages embed the snapshot in.
  #[must_use]
  pub fn data_id(mut self, data_id: &str) -> Self {
    self.data_id = Arc::from(data_id);
    self
  }
}

impl<S> Layer<S> for I18nLayer {
  type Service = I18nService<S>;

  fn layer(&self, inner: S) -> Self::Service {
    I18nService { inner, resolver: Arc::clone(&self.resolver), data_id: Arc::clone(&self.data_id) }
  }
}

#[derive(Clone)]
pub struct I18nService<S> {
  inner: S,
  resolver: Arc<ConfigResolver>,
  data_id: Arc<str>,
}

impl<S, B> Service<Request<B>> for I18nService<S>
where
  S: Service<Request<B>> + Clone + Send + 'static,
  S::Future: Send + 'static,
  B: Send + 'static,
{
  type Response = S::Response;
  type Error = S::Error;
  type Future = BoxFuture<'static, Result<S::Response, S::Error>>;

  fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
    self.inner.poll_ready(cx)
  }

  fn call(&mut self, mut req: Request<B>) -> Self::Future {
    let scope = Arc::new(self.resolver.scope(request_context(&req)));
    debug!(request = %scope.id(), path = req.uri().path(), "i18n scope opened");
    req.extensions_mut().insert(Installed { scope, data_id: Arc::clone(&self.data_id) });

    // The clone may not be ready; call the instance that was polled.
    let clone = self.inner.clone();
    let mut inner = std::mem::replace(&mut self.inner, clone);
    Box::pin(async move { inner.call(req).await })
  }
}

fn request_context<B>(req: &Request<B>) -> RequestContext {
  let value = |name: header::HeaderName| req.headers().get(name).and_then(|v| v.to_str().ok());
  let mut ctx = RequestContext::new()
    .url(req.uri().path_and_query().map_or_else(|| req.uri().path(), |pq| pq.as_str()));
  if let Some(cookie) = value(header::COOKIE) {
    ctx = ctx.cookie_header(cookie);
  }
  if let Some(accept) = value(header::ACCEPT_LANGUAGE) {
    ctx = ctx.accept_language(accept);
  }
  ctx
}
