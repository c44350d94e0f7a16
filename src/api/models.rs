use crate::extract::ExtractError;
use crate::fetcher::{FetchError, PageFetcher};
use crate::storage::{RecipeStore, StoreError};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

use super::render;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub store: RecipeStore,
    pub fetcher: PageFetcher,
}

/// Form posted by the index page
#[derive(Debug, Deserialize)]
pub struct AddRecipeForm {
    #[serde(rename = "recipeUrl", default)]
    pub recipe_url: String,
}

impl AddRecipeForm {
    /// The submitted URL, or `MissingUrl` when blank
    pub fn url(&self) -> Result<&str, AppError> {
        let url = self.recipe_url.trim();
        if url.is_empty() {
            return Err(AppError::MissingUrl);
        }
        Ok(url)
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
    pub total_recipes: i64,
}

/// Application error type.
///
/// Every variant renders the index page with no recipes and a message,
/// with status 500.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Please enter a recipe URL")]
    MissingUrl,

    #[error("Could not fetch that page ({0})")]
    Fetch(#[from] FetchError),

    #[error("Could not read recipe details from that page ({0})")]
    Extract(#[from] ExtractError),

    #[error("Could not reach the recipe database")]
    Store(#[from] StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Store(e) => error!("Store error: {}", e),
            other => warn!("Request failed: {}", other),
        }

        let body = render::index_page(&[], Some(&self.to_string()));
        (StatusCode::INTERNAL_SERVER_ERROR, Html(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_url_rejected() {
        let form = AddRecipeForm {
            recipe_url: "   ".to_string(),
        };
        assert!(matches!(form.url(), Err(AppError::MissingUrl)));
    }

    #[test]
    fn test_url_is_trimmed() {
        let form = AddRecipeForm {
            recipe_url: " https://example.com/pie \n".to_string(),
        };
        assert_eq!(form.url().unwrap(), "https://example.com/pie");
    }

    #[test]
    fn test_store_error_hides_details() {
        let err = AppError::Store(StoreError::UnsupportedDatabase("postgres".into()));
        assert_eq!(err.to_string(), "Could not reach the recipe database");
    }

    #[test]
    fn test_errors_render_500() {
        let response = AppError::MissingUrl.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
