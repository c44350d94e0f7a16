use crate::api::models::AppState;
use crate::api::recipes::handlers::{add_recipe_handler, list_recipes_handler};
use axum::{routing::get, Router};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_recipes_handler).post(add_recipe_handler))
}
