use axum::{extract::State, http::StatusCode, Json};
use biblioteca_http::{
    error::AppError,
    extract::{JsonBody, PathParam, QueryParams},
};

use super::models::{Book, BookInput, BookWithAuthor, FirstBook, PageQuery, TitleQuery, YearTotal};
use super::store::BookStore;

/// `GET /GetAll`: every book; an empty table is a 404.
pub async fn list_books(State(store): State<BookStore>) -> Result<Json<Vec<Book>>, AppError> {
    let books = store.list().await?;
    if books.is_empty() {
        return Err(AppError::not_found("Libro"));
    }
    Ok(Json(books))
}

/// `GET /Get/{id}`: the book with its author's name.
///
/// Always a list: an unknown id answers `200 []`, never 404.
pub async fn get_book_with_author(
    State(store): State<BookStore>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<Vec<BookWithAuthor>>, AppError> {
    Ok(Json(store.with_author(id).await?))
}

/// `GET /GetByDate`
pub async fn books_since_2000(State(store): State<BookStore>) -> Result<Json<Vec<BookWithAuthor>>, AppError> {
    Ok(Json(store.published_since_2000().await?))
}

/// `GET /GetByTitle?title=`
pub async fn books_by_title(
    State(store): State<BookStore>,
    QueryParams(query): QueryParams<TitleQuery>,
) -> Result<Json<Vec<BookWithAuthor>>, AppError> {
    Ok(Json(store.title_contains(&query.title).await?))
}

/// `GET /GetSkip?skip=`: `skip` is a 1-based page number.
pub async fn books_page(
    State(store): State<BookStore>,
    QueryParams(query): QueryParams<PageQuery>,
) -> Result<Json<Vec<BookWithAuthor>>, AppError> {
    Ok(Json(store.page(query.skip).await?))
}

/// `GET /GetLatestBooks/{cantidad}`
pub async fn latest_books(
    State(store): State<BookStore>,
    PathParam(count): PathParam<i64>,
) -> Result<Json<Vec<Book>>, AppError> {
    let books = store.latest(count).await?;
    if books.is_empty() {
        return Err(AppError::not_found("Libro"));
    }
    Ok(Json(books))
}

/// `GET /GetTotalBooksByYear`
pub async fn totals_by_year(State(store): State<BookStore>) -> Result<Json<Vec<YearTotal>>, AppError> {
    let totals = store.totals_by_year().await?;
    if totals.is_empty() {
        return Err(AppError::not_found("Libro"));
    }
    Ok(Json(totals))
}

/// `GET /GetFirstBookByAuthor/{autorId}`
pub async fn first_book_by_author(
    State(store): State<BookStore>,
    PathParam(author_id): PathParam<i64>,
) -> Result<Json<FirstBook>, AppError> {
    store
        .first_by_author(author_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("Libro of Autor {author_id}")))
}

/// `POST /Add`
pub async fn create_book(
    State(store): State<BookStore>,
    JsonBody(input): JsonBody<BookInput>,
) -> Result<StatusCode, AppError> {
    let id = store.insert(&input).await.map_err(AppError::persistence)?;
    tracing::info!(book_id = id, "book created");
    Ok(StatusCode::OK)
}

/// `PUT /Update/{id}`
pub async fn update_book(
    State(store): State<BookStore>,
    PathParam(id): PathParam<i64>,
    JsonBody(input): JsonBody<BookInput>,
) -> Result<StatusCode, AppError> {
    let found = store
        .update(id, &input)
        .await
        .map_err(AppError::persistence)?;
    if !found {
        return Err(AppError::not_found(format!("Libro {id}")));
    }
    tracing::info!(book_id = id, "book updated");
    Ok(StatusCode::OK)
}

/// `DELETE /Delete/{id}`
pub async fn delete_book(
    State(store): State<BookStore>,
    PathParam(id): PathParam<i64>,
) -> Result<StatusCode, AppError> {
    let found = store.delete(id).await.map_err(AppError::persistence)?;
    if !found {
        return Err(AppError::not_found(format!("Libro {id}")));
    }
    tracing::info!(book_id = id, "book deleted");
    Ok(StatusCode::OK)
}
