pub mod models;
pub mod recipes;

pub use models::{is_web_url, NewRecipe, Recipe};
pub use recipes::{RecipeStore, StoreError};
