use crate::extract::OpenGraph;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use url::Url;

/// A saved recipe
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Recipe {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub image_url: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for a new row; id and timestamps are assigned by the store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewRecipe {
    pub title: String,
    pub url: String,
    pub image_url: String,
    pub description: String,
}

impl NewRecipe {
    /// Build a row from extracted metadata.
    ///
    /// `page_url` stands in when the page has no usable `og:url`. Relative
    /// URLs are resolved against it and anything that is not http(s) is
    /// dropped, so a page without a usable `og:image` is stored with an
    /// empty image URL.
    pub fn from_open_graph(og: OpenGraph, page_url: &str) -> Self {
        let base = Url::parse(page_url).ok();
        let image_url = og
            .first_image_url()
            .and_then(|raw| web_url(raw, base.as_ref()))
            .unwrap_or_default();
        let url = web_url(&og.url, base.as_ref()).unwrap_or_else(|| page_url.to_string());

        Self {
            title: og.title,
            url,
            image_url,
            description: og.description,
        }
    }
}

/// Whether `raw` is an absolute http(s) URL, safe to put in `href`/`src`.
pub fn is_web_url(raw: &str) -> bool {
    Url::parse(raw)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// `raw` resolved against `base`, kept only when the result is http(s).
fn web_url(raw: &str, base: Option<&Url>) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let url = match base {
        Some(base) => base.join(raw).ok()?,
        None => Url::parse(raw).ok()?,
    };
    matches!(url.scheme(), "http" | "https").then(|| url.to_string())
}
