//! Book resource: `/Biblioteca/Libro/*`.

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

use store::BookStore;

pub struct BooksModule {
    store: BookStore,
}

impl BooksModule {
    pub fn new(db: &Database) -> Self {
        Self {
            store: BookStore::from(db),
        }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "Libro"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "book module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/GetAll", get(handlers::list_books))
            .route("/Get/{id}", get(handlers::get_book_with_author))
            .route("/GetByDate", get(handlers::books_since_2000))
            .route("/GetByTitle", get(handlers::books_by_title))
            .route("/GetSkip", get(handlers::books_page))
            .route("/GetLatestBooks/{cantidad}", get(handlers::latest_books))
            .route("/GetTotalBooksByYear", get(handlers::totals_by_year))
            .route("/GetFirstBookByAuthor/{autorId}", get(handlers::first_book_by_author))
            .route("/Add", post(handlers::create_book))
            .route("/Update/{id}", put(handlers::update_book))
            .route("/Delete/{id}", delete(handlers::delete_book))
            .with_state(self.store.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(openapi::fragment())
    }

    fn migrations(&self) -> Vec<Migration> {
        // No foreign key on `autor_id`: authors can be deleted under their books.
        vec![Migration {
            id: "001_create_libro",
            up: r#"
                CREATE TABLE IF NOT EXISTS Libro (
                    id               INTEGER PRIMARY KEY AUTOINCREMENT,
                    titulo           TEXT NOT NULL,
                    anio_publicacion INTEGER NOT NULL,
                    autor_id         INTEGER NOT NULL,
                    categoria_id     INTEGER NOT NULL,
                    resumen          TEXT NOT NULL
                );
                CREATE INDEX IF NOT EXISTS libro_autor_id ON Libro (autor_id);
                "#,
        }]
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "book module stopped");
        Ok(())
    }
}

/// Create a new instance of the book module
pub fn create_module(db: &Database) -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(BooksModule::new(db))
}
