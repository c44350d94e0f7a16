use scraper::{Html, Selector};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("page has no Open Graph metadata")]
    NoOpenGraph,

    #[error("invalid selector: {0}")]
    Selector(String),
}

/// One `og:image` entry and the structured properties attached to it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OgImage {
    pub url: String,
    pub secure_url: String,
}

/// Open Graph metadata read from a page's `<meta>` tags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenGraph {
    pub title: String,
    pub url: String,
    pub description: String,
    pub kind: String,
    pub site_name: String,
    pub images: Vec<OgImage>,
}

impl OpenGraph {
    /// Parse Open Graph tags out of an HTML document.
    ///
    /// Tags are matched on `property`, falling back to `name` for pages that
    /// misuse the attribute. Scalar properties keep the last value seen;
    /// `og:image` starts a new image and `og:image:*` refines the current one.
    pub fn from_html(html: &str) -> Result<Self, ExtractError> {
        let document = Html::parse_document(html);
        let meta = Selector::parse("meta[content]")
            .map_err(|e| ExtractError::Selector(e.to_string()))?;

        let mut og = OpenGraph::default();
        let mut seen = false;

        for element in document.select(&meta) {
            let attrs = element.value();
            let Some(key) = ["property", "name"]
                .into_iter()
                .filter_map(|attr| attrs.attr(attr))
                .find_map(|value| value.trim().strip_prefix("og:"))
            else {
                continue;
            };
            let content = attrs.attr("content").unwrap_or_default().to_string();
            seen = true;

            match key {
                "title" => og.title = content,
                "url" => og.url = content,
                "description" => og.description = content,
                "type" => og.kind = content,
                "site_name" => og.site_name = content,
                "image" => og.images.push(OgImage {
                    url: content,
                    ..OgImage::default()
                }),
                "image:url" => og.current_image().url = content,
                "image:secure_url" => og.current_image().secure_url = content,
                _ => {}
            }
        }

        if !seen {
            return Err(ExtractError::NoOpenGraph);
        }
        Ok(og)
    }

    /// URL of the first image, preferring the plain URL over the secure one.
    pub fn first_image_url(&self) -> Option<&str> {
        self.images.first().map(|image| {
            if image.url.is_empty() {
                image.secure_url.as_str()
            } else {
                image.url.as_str()
            }
        })
    }

    fn current_image(&mut self) -> &mut OgImage {
        if self.images.is_empty() {
            self.images.push(OgImage::default());
        }
        let last = self.images.len() - 1;
        &mut self.images[last]
    }
}
