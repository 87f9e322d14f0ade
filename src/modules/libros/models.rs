use serde::{Deserialize, Serialize};

/// A row of the `Libro` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Book {
    pub id: i64,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "anio_publicacion")]
    pub publication_year: i64,
    /// Not checked against `Autor`.
    #[serde(rename = "autor_id")]
    pub author_id: i64,
    #[serde(rename = "categoria_id")]
    pub category_id: i64,
    #[serde(rename = "resumen")]
    pub summary: String,
}

/// Request body for creating or overwriting a book.
///
/// Numeric fields default to zero when omitted; missing text fields are
/// left for the store's `NOT NULL` constraints to reject.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookInput {
    #[serde(rename = "titulo", default)]
    pub title: Option<String>,
    #[serde(rename = "anio_publicacion", default)]
    pub publication_year: i64,
    #[serde(rename = "autor_id", default)]
    pub author_id: i64,
    #[serde(rename = "categoria_id", default)]
    pub category_id: i64,
    #[serde(rename = "resumen", default)]
    pub summary: Option<String>,
}

/// Book joined with the name of its author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct BookWithAuthor {
    pub id: i64,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "anio_publicacion")]
    pub publication_year: i64,
    #[serde(rename = "autor")]
    pub author_name: String,
    #[serde(rename = "categoria_id")]
    pub category_id: i64,
    #[serde(rename = "resumen")]
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct YearTotal {
    #[serde(rename = "anio")]
    pub year: i64,
    #[serde(rename = "cantidad")]
    pub count: i64,
}

/// Earliest book of an author; the author id is implied by the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct FirstBook {
    pub id: i64,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "anio_publicacion")]
    pub publication_year: i64,
    #[serde(rename = "categoria_id")]
    pub category_id: i64,
    #[serde(rename = "resumen")]
    pub summary: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TitleQuery {
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    /// 1-based page number.
    #[serde(default)]
    pub skip: i64,
}
