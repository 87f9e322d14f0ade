//! Queries over the `Autor` table and its join with `Libro`.

use anyhow::Context;
use biblioteca_db::Database;
use sqlx::SqlitePool;

use super::models::{Author, AuthorBookCount, AuthorInput, AuthorRanking, AuthorWithBook};

const LIST_AUTHORS: &str =
    "SELECT id, nombre AS name, nacionalidad AS nationality FROM Autor ORDER BY id";

#[derive(Debug, Clone)]
pub struct AuthorStore {
    pool: SqlitePool,
}

impl From<&Database> for AuthorStore {
    fn from(db: &Database) -> Self {
        Self {
            pool: db.pool().clone(),
        }
    }
}

impl AuthorStore {
    pub async fn list(&self) -> anyhow::Result<Vec<Author>> {
        sqlx::query_as(LIST_AUTHORS)
            .fetch_all(&self.pool)
            .await
            .context("failed to list authors")
    }

    /// Inner join with `Libro`: authors without books produce no rows.
    pub async fn with_books(&self, id: i64) -> anyhow::Result<Vec<AuthorWithBook>> {
        sqlx::query_as(
            r#"
            SELECT a.id, a.nombre AS name, a.nacionalidad AS nationality, l.titulo AS book_title
            FROM Autor a
            INNER JOIN Libro l ON l.autor_id = a.id
            WHERE a.id = ?
            ORDER BY l.id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .with_context(|| format!("failed to load books of author {id}"))
    }

    pub async fn book_counts(&self) -> anyhow::Result<Vec<AuthorBookCount>> {
        sqlx::query_as(
            r#"
            SELECT a.id, a.nombre AS name, a.nacionalidad AS nationality, COUNT(*) AS count
            FROM Autor a
            INNER JOIN Libro l ON l.autor_id = a.id
            GROUP BY a.id, a.nombre, a.nacionalidad
            ORDER BY a.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("failed to count books per author")
    }

    /// Authors with at least one book, most prolific first; ties by id.
    pub async fn top_by_book_count(&self) -> anyhow::Result<Vec<AuthorRanking>> {
        sqlx::query_as(
            r#"
            SELECT a.id, a.nombre AS name, a.nacionalidad AS nationality, COUNT(*) AS book_count
            FROM Autor a
            INNER JOIN Libro l ON l.autor_id = a.id
            GROUP BY a.id, a.nombre, a.nacionalidad
            ORDER BY book_count DESC, a.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("failed to rank authors")
    }

    /// True when any book references `id`, whether or not the author exists.
    pub async fn has_books(&self, id: i64) -> anyhow::Result<bool> {
        let exists: i64 = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM Libro WHERE autor_id = ?)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .with_context(|| format!("failed to check books of author {id}"))?;
        Ok(exists != 0)
    }

    /// Insert a new author and return the id assigned by the store.
    pub async fn insert(&self, input: &AuthorInput) -> anyhow::Result<i64> {
        let result = sqlx::query("INSERT INTO Autor (nombre, nacionalidad) VALUES (?, ?)")
            .bind(input.name.as_deref())
            .bind(input.nationality.as_deref())
            .execute(&self.pool)
            .await
            .context("failed to insert author")?;
        Ok(result.last_insert_rowid())
    }

    /// Overwrite both fields. Returns `false` when no author has that id.
    pub async fn update(&self, id: i64, input: &AuthorInput) -> anyhow::Result<bool> {
        let result = sqlx::query("UPDATE Autor SET nombre = ?, nacionalidad = ? WHERE id = ?")
            .bind(input.name.as_deref())
            .bind(input.nationality.as_deref())
            .bind(id)
            .execute(&self.pool)
            .await
            .with_context(|| format!("failed to update author {id}"))?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove the author; dependent books are left untouched.
    pub async fn delete(&self, id: i64) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM Autor WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .with_context(|| format!("failed to delete author {id}"))?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::testing::{library_db, seed_author, seed_book};

    fn input(name: &str, nationality: &str) -> AuthorInput {
        AuthorInput {
            name: Some(name.to_string()),
            nationality: Some(nationality.to_string()),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_ids() {
        let db = library_db().await;
        let store = AuthorStore::from(&db);

        let first = store.insert(&input("Borges", "AR")).await.unwrap();
        let second = store.insert(&input("Cortázar", "AR")).await.unwrap();
        assert!(second > first);

        let authors = store.list().await.unwrap();
        assert_eq!(
            authors,
            vec![
                Author { id: first, name: "Borges".into(), nationality: "AR".into() },
                Author { id: second, name: "Cortázar".into(), nationality: "AR".into() },
            ]
        );
    }

    #[tokio::test]
    async fn test_insert_without_name_violates_constraint() {
        let db = library_db().await;
        let store = AuthorStore::from(&db);

        let err = store
            .insert(&AuthorInput { name: None, nationality: Some("AR".into()) })
            .await
            .unwrap_err();
        assert!(err.root_cause().to_string().contains("NOT NULL"));
    }

    #[tokio::test]
    async fn test_join_excludes_authors_without_books() {
        let db = library_db().await;
        let store = AuthorStore::from(&db);
        let borges = seed_author(&db, "Borges", "AR").await;
        let idle = seed_author(&db, "Rulfo", "MX").await;
        seed_book(&db, "Ficciones", 1944, borges).await;
        seed_book(&db, "El Aleph", 1949, borges).await;

        let rows = store.with_books(borges).await.unwrap();
        let titles: Vec<_> = rows.iter().map(|r| r.book_title.as_str()).collect();
        assert_eq!(titles, vec!["Ficciones", "El Aleph"]);

        assert!(store.with_books(idle).await.unwrap().is_empty());

        let counts = store.book_counts().await.unwrap();
        assert_eq!(counts.len(), 1);
        assert_eq!((counts[0].id, counts[0].count), (borges, 2));

        assert_eq!(store.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_ranking_orders_by_count_then_id() {
        let db = library_db().await;
        let store = AuthorStore::from(&db);
        let a = seed_author(&db, "A", "X").await;
        let b = seed_author(&db, "B", "X").await;
        let c = seed_author(&db, "C", "X").await;
        seed_book(&db, "b1", 2000, b).await;
        seed_book(&db, "b2", 2001, b).await;
        seed_book(&db, "c1", 2002, c).await;
        seed_book(&db, "a1", 2003, a).await;

        let ranked: Vec<_> = store
            .top_by_book_count()
            .await
            .unwrap()
            .into_iter()
            .map(|r| (r.id, r.book_count))
            .collect();
        assert_eq!(ranked, vec![(b, 2), (a, 1), (c, 1)]);
    }

    #[tokio::test]
    async fn test_has_books_ignores_author_existence() {
        let db = library_db().await;
        let store = AuthorStore::from(&db);
        let borges = seed_author(&db, "Borges", "AR").await;
        seed_book(&db, "Ficciones", 1944, borges).await;
        seed_book(&db, "Huérfano", 1990, 42).await;

        assert!(store.has_books(borges).await.unwrap());
        assert!(store.has_books(42).await.unwrap());
        assert!(!store.has_books(99).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_and_delete_report_missing_rows() {
        let db = library_db().await;
        let store = AuthorStore::from(&db);
        let id = seed_author(&db, "Borges", "AR").await;

        assert!(store.update(id, &input("J. L. Borges", "Argentina")).await.unwrap());
        assert!(!store.update(id + 1, &input("x", "y")).await.unwrap());
        assert_eq!(store.list().await.unwrap()[0].name, "J. L. Borges");

        assert!(store.delete(id).await.unwrap());
        assert!(!store.delete(id).await.unwrap());
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_leaves_books_behind() {
        let db = library_db().await;
        let store = AuthorStore::from(&db);
        let id = seed_author(&db, "Borges", "AR").await;
        seed_book(&db, "Ficciones", 1944, id).await;

        assert!(store.delete(id).await.unwrap());
        assert!(store.has_books(id).await.unwrap());
    }
}
