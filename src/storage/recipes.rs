use crate::storage::models::{NewRecipe, Recipe};
use chrono::{SubsecRound, Utc};
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("unsupported database url scheme: {0}")]
    UnsupportedDatabase(String),
}

const MYSQL_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS recipes (
    id          BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
    title       TEXT NOT NULL,
    url         TEXT NOT NULL,
    image_url   TEXT NOT NULL,
    description TEXT NOT NULL,
    created_at  DATETIME(6) NOT NULL,
    updated_at  DATETIME(6) NOT NULL
) DEFAULT CHARSET = utf8mb4
"#;

const SQLITE_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS recipes (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    title       TEXT NOT NULL,
    url         TEXT NOT NULL,
    image_url   TEXT NOT NULL,
    description TEXT NOT NULL,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
)
"#;

const INSERT_RECIPE: &str = "INSERT INTO recipes \
    (title, url, image_url, description, created_at, updated_at) \
    VALUES (?, ?, ?, ?, ?, ?)";

const SELECT_RECIPES: &str = "SELECT id, title, url, image_url, description, \
    created_at, updated_at FROM recipes ORDER BY id";

const COUNT_RECIPES: &str = "SELECT COUNT(*) FROM recipes";

/// Run `$body` against whichever pool backs the store.
macro_rules! on_pool {
    ($store:expr, $pool:ident => $body:expr) => {
        match $store {
            RecipeStore::MySql($pool) => $body,
            RecipeStore::Sqlite($pool) => $body,
        }
    };
}

/// Recipe table behind a long-lived connection pool.
///
/// MySQL is the production backend; SQLite serves local runs and tests. Both
/// use the same statements, only the DDL differs.
#[derive(Debug, Clone)]
pub enum RecipeStore {
    MySql(MySqlPool),
    Sqlite(SqlitePool),
}

impl RecipeStore {
    /// Open a pool for `url` and make sure the `recipes` table exists.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let store = if url.starts_with("mysql:") {
            let pool = MySqlPoolOptions::new()
                .max_connections(max_connections)
                .connect(url)
                .await?;
            RecipeStore::MySql(pool)
        } else if url.starts_with("sqlite:") {
            let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
            let mut pool_options = SqlitePoolOptions::new().max_connections(max_connections);
            // An in-memory database lives only as long as its connection.
            if url.contains(":memory:") {
                pool_options = pool_options
                    .max_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None);
            }
            RecipeStore::Sqlite(pool_options.connect_with(options).await?)
        } else {
            let scheme = url.split(':').next().unwrap_or_default();
            return Err(StoreError::UnsupportedDatabase(scheme.to_string()));
        };

        store.ensure_schema().await?;
        info!(backend = store.backend(), "Database connection succeeded");
        Ok(store)
    }

    async fn ensure_schema(&self) -> Result<(), StoreError> {
        match self {
            RecipeStore::MySql(pool) => {
                sqlx::query(MYSQL_SCHEMA).execute(pool).await?;
            }
            RecipeStore::Sqlite(pool) => {
                sqlx::query(SQLITE_SCHEMA).execute(pool).await?;
            }
        }
        Ok(())
    }

    pub fn backend(&self) -> &'static str {
        match self {
            RecipeStore::MySql(_) => "mysql",
            RecipeStore::Sqlite(_) => "sqlite",
        }
    }

    /// Insert a row and return it with its assigned id and timestamps
    pub async fn insert(&self, recipe: &NewRecipe) -> Result<Recipe, StoreError> {
        // DATETIME(6) keeps microseconds; match it so both backends agree.
        let now = Utc::now().trunc_subsecs(6);

        let id = match self {
            RecipeStore::MySql(pool) => {
                let result = sqlx::query(INSERT_RECIPE)
                    .bind(&recipe.title)
                    .bind(&recipe.url)
                    .bind(&recipe.image_url)
                    .bind(&recipe.description)
                    .bind(now)
                    .bind(now)
                    .execute(pool)
                    .await?;
                result.last_insert_id() as i64
            }
            RecipeStore::Sqlite(pool) => {
                let result = sqlx::query(INSERT_RECIPE)
                    .bind(&recipe.title)
                    .bind(&recipe.url)
                    .bind(&recipe.image_url)
                    .bind(&recipe.description)
                    .bind(now)
                    .bind(now)
                    .execute(pool)
                    .await?;
                result.last_insert_rowid()
            }
        };

        Ok(Recipe {
            id,
            title: recipe.title.clone(),
            url: recipe.url.clone(),
            image_url: recipe.image_url.clone(),
            description: recipe.description.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    /// All recipes in insertion order
    pub async fn list_all(&self) -> Result<Vec<Recipe>, StoreError> {
        let recipes = on_pool!(self, pool => {
            sqlx::query_as::<_, Recipe>(SELECT_RECIPES)
                .fetch_all(pool)
                .await?
        });
        Ok(recipes)
    }

    pub async fn count(&self) -> Result<i64, StoreError> {
        let count = on_pool!(self, pool => {
            sqlx::query_scalar::<_, i64>(COUNT_RECIPES)
                .fetch_one(pool)
                .await?
        });
        Ok(count)
    }

    pub async fn close(&self) {
        on_pool!(self, pool => pool.close().await)
    }
}
