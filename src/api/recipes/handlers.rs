use crate::api::models::*;
use crate::api::render;
use crate::extract::OpenGraph;
use crate::storage::NewRecipe;
use axum::{
    extract::{rejection::FormRejection, State},
    response::Html,
    Form,
};
use tracing::{debug, info};

pub async fn list_recipes_handler(
    State(state): State<AppState>,
) -> Result<Html<String>, AppError> {
    let recipes = state.store.list_all().await?;
    Ok(Html(render::index_page(&recipes, None)))
}

pub async fn add_recipe_handler(
    State(state): State<AppState>,
    form: Result<Form<AddRecipeForm>, FormRejection>,
) -> Result<Html<String>, AppError> {
    // A body that is not a urlencoded form carries no recipeUrl.
    let Form(form) = form.map_err(|rejection| {
        debug!(%rejection, "Unreadable form body");
        AppError::MissingUrl
    })?;

    // Validate
    let url = form.url()?;

    // Fetch & extract
    let page = state.fetcher.fetch(url).await?;
    let og = OpenGraph::from_html(&page.body)?;
    debug!(
        site = %og.site_name,
        kind = %og.kind,
        images = og.images.len(),
        "Extracted Open Graph metadata"
    );
    let recipe = NewRecipe::from_open_graph(og, page.final_url.as_str());

    // Store
    let stored = state.store.insert(&recipe).await?;
    info!(id = stored.id, title = %stored.title, url = %stored.url, "Recipe saved");

    let recipes = state.store.list_all().await?;
    Ok(Html(render::index_page(&recipes, None)))
}
