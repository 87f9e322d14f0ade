//! Fixtures shared by the module tests: an in-memory library and a client
//! that drives the full router.

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use biblioteca_db::Database;
use biblioteca_kernel::{settings::Settings, ModuleRegistry};
use tower::ServiceExt;

fn registry(db: &Database) -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    super::register_all(&mut registry, db).unwrap();
    registry
}

/// In-memory database with the `Autor` and `Libro` tables created.
pub async fn library_db() -> Database {
    let db = Database::connect_in_memory().await.unwrap();
    db.apply_migrations(&registry(&db).collect_migrations())
        .await
        .unwrap();
    db
}

/// The complete HTTP application over `db`.
pub fn library_app(db: Database) -> Router {
    biblioteca_http::build_router(&registry(&db), &Settings::default())
}

pub async fn seed_author(db: &Database, name: &str, nationality: &str) -> i64 {
    sqlx::query("INSERT INTO Autor (nombre, nacionalidad) VALUES (?, ?)")
        .bind(name)
        .bind(nationality)
        .execute(db.pool())
        .await
        .unwrap()
        .last_insert_rowid()
}

/// Inserts a book in category 1 with an empty summary.
pub async fn seed_book(db: &Database, title: &str, year: i64, author_id: i64) -> i64 {
    sqlx::query(
        "INSERT INTO Libro (titulo, anio_publicacion, autor_id, categoria_id, resumen) VALUES (?, ?, ?, 1, '')",
    )
    .bind(title)
    .bind(year)
    .bind(author_id)
    .execute(db.pool())
    .await
    .unwrap()
    .last_insert_rowid()
}

pub struct TestClient {
    app: Router,
}

impl TestClient {
    pub fn new(app: Router) -> Self {
        Self { app }
    }

    async fn call(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    pub async fn send(&self, method: &str, uri: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.call(request).await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        self.send("GET", uri).await
    }

    /// GET and parse the body; an empty body parses as `null`.
    pub async fn get_json(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let (status, body) = self.get(uri).await;
        if body.is_empty() {
            return (status, serde_json::Value::Null);
        }
        (status, serde_json::from_str(&body).unwrap())
    }

    pub async fn send_json(
        &self,
        method: &str,
        uri: &str,
        body: serde_json::Value,
    ) -> (StatusCode, String) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.call(request).await
    }
}
