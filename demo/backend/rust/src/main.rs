/* demo/backend/rust/src/main.rs */

mod pages;

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use axum::routing::get;
use seam_i18n::{ConfigResolver, I18nSettings};
use seam_i18n_axum::I18nLayer;
use tracing_subscriber::EnvFilter;

fn init_logging() {
  let filter = EnvFilter::try_from_env("SEAM_I18N_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
  tracing_subscriber::fmt().with_env_filter(filter).with_target(true).init();
}

fn load_settings() -> anyhow::Result<I18nSettings> {
  let path = match env::var("SEAM_I18N_CONFIG") {
    Ok(path) => PathBuf::from(path),
    Err(_) => I18nSettings::find(&env::current_dir()?)?,
  };
  I18nSettings::load(&path).with_context(|| format!("loading {}", path.display()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  init_logging();

  let settings = load_settings()?;
  let resolver = Arc::new(ConfigResolver::from_settings(&settings)?);

  let router = Router::new()
    .route("/", get(pages::index))
    .route("/manifest.webmanifest", get(pages::manifest))
    .route("/api/greeting", get(pages::greeting))
    .layer(I18nLayer::new(resolver).data_id(&settings.data_id));

  let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
  let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
  let actual_port = listener.local_addr()?.port();
  tracing::info!(port = actual_port, "seam i18n demo running on http://localhost:{actual_port}");
  axum::serve(listener, router).await?;
  Ok(())
}
