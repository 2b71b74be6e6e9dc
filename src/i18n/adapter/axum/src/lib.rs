/* src/i18n/adapter/axum/src/lib.rs */

mod error;
mod extract;
mod layer;
mod page;

/// Re-export seam-i18n core for convenience
pub use seam_i18n;

pub use error::AxumError;
pub use extract::{ExplicitLocale, I18n};
pub use layer::{I18nLayer, I18nService};
pub use page::render_page;

#[cfg(test)]
mod tests;
