use serde_json::{json, Value};

use crate::modules::docs::{empty, object_schema, ok_json, operation, path_param, query_param, with_body};

const TAG: &str = "Libro";

const BOOK_FIELDS: &[(&str, &str)] = &[
    ("id", "integer"),
    ("titulo", "string"),
    ("anio_publicacion", "integer"),
    ("autor_id", "integer"),
    ("categoria_id", "integer"),
    ("resumen", "string"),
];

const JOINED_FIELDS: &[(&str, &str)] = &[
    ("id", "integer"),
    ("titulo", "string"),
    ("anio_publicacion", "integer"),
    ("autor", "string"),
    ("categoria_id", "integer"),
    ("resumen", "string"),
];

pub fn fragment() -> Value {
    json!({
        "paths": {
            "/GetAll": {
                "get": operation(TAG, "List books", vec![], json!({
                    "200": ok_json("All books", "Libro", true),
                    "404": empty("No books stored"),
                }))
            },
            "/Get/{id}": {
                "get": operation(TAG, "Book with its author's name", vec![path_param("id")], json!({
                    "200": ok_json("Zero or one rows", "LibroAutor", true),
                }))
            },
            "/GetByDate": {
                "get": operation(TAG, "Books published from 2000 onwards", vec![], json!({
                    "200": ok_json("Matching books", "LibroAutor", true),
                }))
            },
            "/GetByTitle": {
                "get": operation(TAG, "Books whose title contains the text", vec![query_param("title", "string")], json!({
                    "200": ok_json("Matching books", "LibroAutor", true),
                }))
            },
            "/GetSkip": {
                "get": operation(TAG, "Page of two books", vec![query_param("skip", "integer")], json!({
                    "200": ok_json("Up to two books", "LibroAutor", true),
                }))
            },
            "/GetLatestBooks/{cantidad}": {
                "get": operation(TAG, "Most recent books", vec![path_param("cantidad")], json!({
                    "200": ok_json("Newest first", "Libro", true),
                    "404": empty("No books"),
                }))
            },
            "/GetTotalBooksByYear": {
                "get": operation(TAG, "Book count per publication year", vec![], json!({
                    "200": ok_json("Latest year first", "LibrosPorAnio", true),
                    "404": empty("No books"),
                }))
            },
            "/GetFirstBookByAuthor/{autorId}": {
                "get": operation(TAG, "Earliest book of an author", vec![path_param("autorId")], json!({
                    "200": ok_json("Earliest book", "PrimerLibro", false),
                    "404": empty("Author has no books"),
                }))
            },
            "/Add": {
                "post": with_body(operation(TAG, "Create a book", vec![], json!({
                    "200": empty("Created"),
                    "400": empty("Malformed body or store rejected the row"),
                })), "LibroInput")
            },
            "/Update/{id}": {
                "put": with_body(operation(TAG, "Overwrite a book", vec![path_param("id")], json!({
                    "200": empty("Updated"),
                    "400": empty("Malformed body or store rejected the row"),
                    "404": empty("Unknown book"),
                })), "LibroInput")
            },
            "/Delete/{id}": {
                "delete": operation(TAG, "Delete a book", vec![path_param("id")], json!({
                    "200": empty("Deleted"),
                    "400": empty("Store rejected the delete"),
                    "404": empty("Unknown book"),
                }))
            }
        },
        "components": {
            "schemas": {
                "Libro": object_schema(BOOK_FIELDS),
                "LibroInput": object_schema(&BOOK_FIELDS[1..]),
                "LibroAutor": object_schema(JOINED_FIELDS),
                "LibrosPorAnio": object_schema(&[("anio", "integer"), ("cantidad", "integer")]),
                "PrimerLibro": object_schema(&[
                    ("id", "integer"),
                    ("titulo", "string"),
                    ("anio_publicacion", "integer"),
                    ("categoria_id", "integer"),
                    ("resumen", "string"),
                ]),
            }
        }
    })
}
