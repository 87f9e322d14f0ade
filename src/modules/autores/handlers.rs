use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use biblioteca_http::{
    error::AppError,
    extract::{JsonBody, PathParam},
};

use super::models::{Author, AuthorBookCount, AuthorInput, AuthorRanking, AuthorWithBook, BookPresence};
use super::store::AuthorStore;

/// `GET /GetAll`: every author; an empty table is a 404.
pub async fn list_authors(State(store): State<AuthorStore>) -> Result<Json<Vec<Author>>, AppError> {
    let authors = store.list().await?;
    if authors.is_empty() {
        return Err(AppError::not_found("Autor"));
    }
    Ok(Json(authors))
}

/// `GET /Get/{id}`: the author repeated once per book title.
///
/// An author without books (or an unknown id) yields `200 []`.
pub async fn get_author_with_books(
    State(store): State<AuthorStore>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<Vec<AuthorWithBook>>, AppError> {
    Ok(Json(store.with_books(id).await?))
}

/// `GET /GetCountBooks`
pub async fn count_books_per_author(
    State(store): State<AuthorStore>,
) -> Result<Json<Vec<AuthorBookCount>>, AppError> {
    Ok(Json(store.book_counts().await?))
}

/// `GET /GetTopAutores`
pub async fn top_authors(State(store): State<AuthorStore>) -> Result<Json<Vec<AuthorRanking>>, AppError> {
    let ranking = store.top_by_book_count().await?;
    if ranking.is_empty() {
        return Err(AppError::not_found("Autor ranking"));
    }
    Ok(Json(ranking))
}

/// `GET /HasBooks/{id}`
pub async fn has_books(
    State(store): State<AuthorStore>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<BookPresence>, AppError> {
    let has_books = store.has_books(id).await?;
    Ok(Json(BookPresence {
        author_id: id,
        has_books,
    }))
}

/// `POST /Add`. Malformed bodies and store failures are echoed back as plain text.
pub async fn create_author(
    State(store): State<AuthorStore>,
    payload: Result<Json<AuthorInput>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(input) = payload.map_err(|rejection| AppError::bad_request_exposed(rejection.body_text()))?;
    let id = store
        .insert(&input)
        .await
        .map_err(AppError::persistence_exposed)?;
    tracing::info!(author_id = id, "author created");
    Ok(StatusCode::OK)
}

/// `PUT /Update/{id}`
pub async fn update_author(
    State(store): State<AuthorStore>,
    PathParam(id): PathParam<i64>,
    JsonBody(input): JsonBody<AuthorInput>,
) -> Result<StatusCode, AppError> {
    let found = store
        .update(id, &input)
        .await
        .map_err(AppError::persistence)?;
    if !found {
        return Err(AppError::not_found(format!("Autor {id}")));
    }
    tracing::info!(author_id = id, "author updated");
    Ok(StatusCode::OK)
}

/// `DELETE /Delete/{id}`
pub async fn delete_author(
    State(store): State<AuthorStore>,
    PathParam(id): PathParam<i64>,
) -> Result<StatusCode, AppError> {
    let found = store.delete(id).await.map_err(AppError::persistence)?;
    if !found {
        return Err(AppError::not_found(format!("Autor {id}")));
    }
    tracing::info!(author_id = id, "author deleted");
    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::modules::testing::{library_app, library_db, seed_author, seed_book, TestClient};

    #[tokio::test]
    async fn test_list_empty_table_is_not_found() {
        let client = TestClient::new(library_app(library_db().await));
        let (status, body) = client.get("/Biblioteca/Autor/GetAll").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_borges_scenario() {
        let db = library_db().await;
        let borges = seed_author(&db, "Borges", "AR").await;
        seed_book(&db, "Ficciones", 1944, borges).await;
        let client = TestClient::new(library_app(db));

        let (status, body) = client.get_json(&format!("/Biblioteca/Autor/Get/{borges}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([{"id": borges, "nombre": "Borges", "nacionalidad": "AR", "libros": "Ficciones"}])
        );

        let (status, body) = client.get_json("/Biblioteca/Autor/GetTopAutores").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([{"id": borges, "nombre": "Borges", "nacionalidad": "AR", "cantidad_libros": 1}])
        );

        let (_, body) = client.get_json("/Biblioteca/Autor/GetCountBooks").await;
        assert_eq!(body[0]["count"], 1);

        let (status, body) = client.get_json(&format!("/Biblioteca/Autor/HasBooks/{borges}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"autor_id": borges, "tiene_libros": true}));

        let (status, body) = client.get_json("/Biblioteca/Autor/HasBooks/99").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"autor_id": 99, "tiene_libros": false}));
    }

    #[tokio::test]
    async fn test_author_without_books_is_an_empty_success() {
        let db = library_db().await;
        let rulfo = seed_author(&db, "Rulfo", "MX").await;
        let client = TestClient::new(library_app(db));

        let (status, body) = client.get_json(&format!("/Biblioteca/Autor/Get/{rulfo}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));

        let (status, body) = client.get_json("/Biblioteca/Autor/GetCountBooks").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));

        let (status, _) = client.get("/Biblioteca/Autor/GetTopAutores").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = client.get_json("/Biblioteca/Autor/GetAll").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_update_delete_round_trip() {
        let client = TestClient::new(library_app(library_db().await));

        let (status, body) = client
            .send_json("POST", "/Biblioteca/Autor/Add", json!({"id": 500, "nombre": "Borges", "nacionalidad": "AR"}))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_empty());

        let (_, authors) = client.get_json("/Biblioteca/Autor/GetAll").await;
        let id = authors[0]["id"].as_i64().unwrap();
        assert_ne!(id, 500, "client-supplied ids are ignored");
        assert_eq!(authors[0]["nombre"], "Borges");
        assert_eq!(authors[0]["nacionalidad"], "AR");

        let (status, _) = client
            .send_json("PUT", &format!("/Biblioteca/Autor/Update/{id}"), json!({"nombre": "Jorge Luis Borges", "nacionalidad": "Argentina"}))
            .await;
        assert_eq!(status, StatusCode::OK);
        let (_, authors) = client.get_json("/Biblioteca/Autor/GetAll").await;
        assert_eq!(authors, json!([{"id": id, "nombre": "Jorge Luis Borges", "nacionalidad": "Argentina"}]));

        let (status, _) = client.send("DELETE", &format!("/Biblioteca/Autor/Delete/{id}")).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = client.send("DELETE", &format!("/Biblioteca/Autor/Delete/{id}")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = client.get("/Biblioteca/Autor/GetAll").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_unknown_author_is_not_found() {
        let client = TestClient::new(library_app(library_db().await));
        let (status, body) = client
            .send_json("PUT", "/Biblioteca/Autor/Update/7", json!({"nombre": "x", "nacionalidad": "y"}))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_create_failure_exposes_store_message() {
        let client = TestClient::new(library_app(library_db().await));
        let (status, body) = client
            .send_json("POST", "/Biblioteca/Autor/Add", json!({"nacionalidad": "AR"}))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("NOT NULL constraint failed"), "unexpected body: {body}");
    }

    #[tokio::test]
    async fn test_update_failure_hides_store_message() {
        let db = library_db().await;
        let id = seed_author(&db, "Borges", "AR").await;
        let client = TestClient::new(library_app(db));

        let (status, body) = client
            .send_json("PUT", &format!("/Biblioteca/Autor/Update/{id}"), json!({"nombre": "Borges"}))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_mistyped_create_body_is_echoed_as_plain_text() {
        let client = TestClient::new(library_app(library_db().await));
        let (status, body) = client
            .send_json("POST", "/Biblioteca/Autor/Add", json!({"nombre": 5, "nacionalidad": "AR"}))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("invalid type"), "unexpected body: {body}");

        let (status, _) = client.get("/Biblioteca/Autor/GetAll").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_mistyped_update_body_is_an_empty_bad_request() {
        let db = library_db().await;
        let id = seed_author(&db, "Borges", "AR").await;
        let client = TestClient::new(library_app(db));

        let (status, body) = client
            .send_json("PUT", &format!("/Biblioteca/Autor/Update/{id}"), json!({"nombre": 5, "nacionalidad": "AR"}))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.is_empty());

        let (_, authors) = client.get_json("/Biblioteca/Autor/GetAll").await;
        assert_eq!(authors[0]["nombre"], "Borges");
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_an_empty_bad_request() {
        let client = TestClient::new(library_app(library_db().await));
        for (method, uri) in [
            ("GET", "/Biblioteca/Autor/Get/abc"),
            ("GET", "/Biblioteca/Autor/HasBooks/abc"),
            ("DELETE", "/Biblioteca/Autor/Delete/abc"),
        ] {
            let (status, body) = client.send(method, uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{method} {uri}");
            assert!(body.is_empty(), "{method} {uri}: {body}");
        }
    }
}
