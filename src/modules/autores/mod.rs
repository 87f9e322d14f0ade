//! Author resource: `/Biblioteca/Autor/*`.

pub mod handlers;
pub mod models;
mod openapi;
pub mod store;

use async_trait::async_trait;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use biblioteca_db::Database;
use biblioteca_kernel::{InitCtx, Migration, Module};

use store::AuthorStore;

pub struct AuthorsModule {
    store: AuthorStore,
}

impl AuthorsModule {
    pub fn new(db: &Database) -> Self {
        Self {
            store: AuthorStore::from(db),
        }
    }
}

#[async_trait]
impl Module for AuthorsModule {
    fn name(&self) -> &'static str {
        "Autor"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "author module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/GetAll", get(handlers::list_authors))
            .route("/Get/{id}", get(handlers::get_author_with_books))
            .route("/GetCountBooks", get(handlers::count_books_per_author))
            .route("/GetTopAutores", get(handlers::top_authors))
            .route("/HasBooks/{id}", get(handlers::has_books))
            .route("/Add", post(handlers::create_author))
            .route("/Update/{id}", put(handlers::update_author))
            .route("/Delete/{id}", delete(handlers::delete_author))
            .with_state(self.store.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(openapi::fragment())
    }

    fn migrations(&self) -> Vec<Migration> {
        vec![Migration {
            id: "001_create_autor",
            up: r#"
                CREATE TABLE IF NOT EXISTS Autor (
                    id           INTEGER PRIMARY KEY AUTOINCREMENT,
                    nombre       TEXT NOT NULL,
                    nacionalidad TEXT NOT NULL
                );
                "#,
        }]
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "author module stopped");
        Ok(())
    }
}

/// Create a new instance of the author module
pub fn create_module(db: &Database) -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(AuthorsModule::new(db))
}
