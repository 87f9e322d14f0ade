//! Queries over the `Libro` table and its join with `Autor`.

use anyhow::Context;
use biblioteca_db::Database;
use sqlx::SqlitePool;

use super::models::{Book, BookInput, BookWithAuthor, FirstBook, YearTotal};

/// Rows per page of [`BookStore::page`].
pub const PAGE_SIZE: i64 = 2;

/// First year returned by [`BookStore::published_since_2000`].
pub const MODERN_ERA_START: i64 = 2000;

/// Books joined with their author's name, followed by `$tail`.
macro_rules! joined_books {
    ($tail:literal) => {
        concat!(
            "SELECT l.id, l.titulo AS title, l.anio_publicacion AS publication_year, ",
            "a.nombre AS author_name, l.categoria_id AS category_id, l.resumen AS summary ",
            "FROM Libro l INNER JOIN Autor a ON a.id = l.autor_id ",
            $tail
        )
    };
}

/// Plain `Libro` rows, followed by `$tail`.
macro_rules! books {
    ($tail:literal) => {
        concat!(
            "SELECT id, titulo AS title, anio_publicacion AS publication_year, ",
            "autor_id AS author_id, categoria_id AS category_id, resumen AS summary ",
            "FROM Libro ",
            $tail
        )
    };
}

/// Row offset of a 1-based page; pages before the first clamp to zero.
pub fn page_offset(page: i64) -> i64 {
    page.saturating_sub(1).saturating_mul(PAGE_SIZE).max(0)
}

#[derive(Debug, Clone)]
pub struct BookStore {
    pool: SqlitePool,
}

impl From<&Database> for BookStore {
    fn from(db: &Database) -> Self {
        Self {
            pool: db.pool().clone(),
        }
    }
}

impl BookStore {
    pub async fn list(&self) -> anyhow::Result<Vec<Book>> {
        sqlx::query_as(books!("ORDER BY id"))
            .fetch_all(&self.pool)
            .await
            .context("failed to list books")
    }

    /// Zero or one rows; a book whose author is missing is dropped by the join.
    pub async fn with_author(&self, id: i64) -> anyhow::Result<Vec<BookWithAuthor>> {
        sqlx::query_as(joined_books!("WHERE l.id = ?"))
            .bind(id)
            .fetch_all(&self.pool)
            .await
            .with_context(|| format!("failed to load book {id}"))
    }

    pub async fn published_since_2000(&self) -> anyhow::Result<Vec<BookWithAuthor>> {
        sqlx::query_as(joined_books!("WHERE l.anio_publicacion >= ? ORDER BY l.id"))
            .bind(MODERN_ERA_START)
            .fetch_all(&self.pool)
            .await
            .context("failed to filter books by year")
    }

    /// Case-sensitive substring match; the empty string matches every title.
    pub async fn title_contains(&self, text: &str) -> anyhow::Result<Vec<BookWithAuthor>> {
        sqlx::query_as(joined_books!("WHERE instr(l.titulo, ?) > 0 ORDER BY l.id"))
            .bind(text)
            .fetch_all(&self.pool)
            .await
            .with_context(|| format!("failed to search titles for '{text}'"))
    }

    /// At most [`PAGE_SIZE`] joined rows of the 1-based `page`, in id order.
    pub async fn page(&self, page: i64) -> anyhow::Result<Vec<BookWithAuthor>> {
        sqlx::query_as(joined_books!("ORDER BY l.id LIMIT ? OFFSET ?"))
            .bind(PAGE_SIZE)
            .bind(page_offset(page))
            .fetch_all(&self.pool)
            .await
            .with_context(|| format!("failed to load page {page}"))
    }

    /// The `count` most recent books; ties keep id order.
    pub async fn latest(&self, count: i64) -> anyhow::Result<Vec<Book>> {
        // SQLite treats a negative LIMIT as "no limit".
        if count <= 0 {
            return Ok(Vec::new());
        }
        sqlx::query_as(books!("ORDER BY anio_publicacion DESC, id LIMIT ?"))
            .bind(count)
            .fetch_all(&self.pool)
            .await
            .context("failed to load latest books")
    }

    pub async fn totals_by_year(&self) -> anyhow::Result<Vec<YearTotal>> {
        sqlx::query_as(
            r#"
            SELECT anio_publicacion AS year, COUNT(*) AS count
            FROM Libro
            GROUP BY anio_publicacion
            ORDER BY anio_publicacion DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("failed to count books by year")
    }

    pub async fn first_by_author(&self, author_id: i64) -> anyhow::Result<Option<FirstBook>> {
        sqlx::query_as(
            r#"
            SELECT id, titulo AS title, anio_publicacion AS publication_year,
                   categoria_id AS category_id, resumen AS summary
            FROM Libro
            WHERE autor_id = ?
            ORDER BY anio_publicacion, id
            LIMIT 1
            "#,
        )
        .bind(author_id)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("failed to load first book of author {author_id}"))
    }

    /// Insert a new book and return the id assigned by the store.
    pub async fn insert(&self, input: &BookInput) -> anyhow::Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO Libro (titulo, anio_publicacion, autor_id, categoria_id, resumen)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(input.title.as_deref())
        .bind(input.publication_year)
        .bind(input.author_id)
        .bind(input.category_id)
        .bind(input.summary.as_deref())
        .execute(&self.pool)
        .await
        .context("failed to insert book")?;
        Ok(result.last_insert_rowid())
    }

    /// Overwrite every mutable field. Returns `false` when no book has that id.
    pub async fn update(&self, id: i64, input: &BookInput) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE Libro
            SET titulo = ?, anio_publicacion = ?, autor_id = ?, categoria_id = ?, resumen = ?
            WHERE id = ?
            "#,
        )
        .bind(input.title.as_deref())
        .bind(input.publication_year)
        .bind(input.author_id)
        .bind(input.category_id)
        .bind(input.summary.as_deref())
        .bind(id)
        .execute(&self.pool)
        .await
        .with_context(|| format!("failed to update book {id}"))?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(&self, id: i64) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM Libro WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .with_context(|| format!("failed to delete book {id}"))?;
        Ok(result.rows_affected() > 0)
    }
}
