use serde::{Deserialize, Serialize};

/// A row of the `Autor` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Author {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "nacionalidad")]
    pub nationality: String,
}

/// Request body for creating or overwriting an author.
///
/// Any `id` in the body is ignored. Missing fields are passed through to the
/// store, whose `NOT NULL` constraints reject them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthorInput {
    #[serde(rename = "nombre", default)]
    pub name: Option<String>,
    #[serde(rename = "nacionalidad", default)]
    pub nationality: Option<String>,
}

/// One joined row per book written by the author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct AuthorWithBook {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "nacionalidad")]
    pub nationality: String,
    /// Title of the book on this row.
    #[serde(rename = "libros")]
    pub book_title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct AuthorBookCount {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "nacionalidad")]
    pub nationality: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct AuthorRanking {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "nacionalidad")]
    pub nationality: String,
    #[serde(rename = "cantidad_libros")]
    pub book_count: i64,
}

/// Answer to "does this author id have any books".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookPresence {
    #[serde(rename = "autor_id")]
    pub author_id: i64,
    #[serde(rename = "tiene_libros")]
    pub has_books: bool,
}
