use serde_json::{json, Value};

use crate::modules::docs::{empty, object_schema, ok_json, operation, path_param, with_body};

const TAG: &str = "Autor";

pub fn fragment() -> Value {
    json!({
        "paths": {
            "/GetAll": {
                "get": operation(TAG, "List authors", vec![], json!({
                    "200": ok_json("All authors", "Autor", true),
                    "404": empty("No authors stored"),
                }))
            },
            "/Get/{id}": {
                "get": operation(TAG, "Author joined with the titles of their books", vec![path_param("id")], json!({
                    "200": ok_json("One row per book; empty when the author has none", "AutorLibro", true),
                }))
            },
            "/GetCountBooks": {
                "get": operation(TAG, "Book count per author", vec![], json!({
                    "200": ok_json("Authors with at least one book", "AutorConteo", true),
                }))
            },
            "/GetTopAutores": {
                "get": operation(TAG, "Authors ranked by book count", vec![], json!({
                    "200": ok_json("Most prolific first", "AutorRanking", true),
                    "404": empty("No author has books"),
                }))
            },
            "/HasBooks/{id}": {
                "get": operation(TAG, "Whether any book references the author id", vec![path_param("id")], json!({
                    "200": ok_json("Existence flag", "AutorTieneLibros", false),
                }))
            },
            "/Add": {
                "post": with_body(operation(TAG, "Create an author", vec![], json!({
                    "200": empty("Created"),
                    "400": {
                        "description": "Malformed body or store rejected the row",
                        "content": { "text/plain": { "schema": { "type": "string" } } }
                    },
                })), "AutorInput")
            },
            "/Update/{id}": {
                "put": with_body(operation(TAG, "Overwrite an author", vec![path_param("id")], json!({
                    "200": empty("Updated"),
                    "400": empty("Malformed body or store rejected the row"),
                    "404": empty("Unknown author"),
                })), "AutorInput")
            },
            "/Delete/{id}": {
                "delete": operation(TAG, "Delete an author", vec![path_param("id")], json!({
                    "200": empty("Deleted"),
                    "400": empty("Store rejected the delete"),
                    "404": empty("Unknown author"),
                }))
            }
        },
        "components": {
            "schemas": {
                "Autor": object_schema(&[("id", "integer"), ("nombre", "string"), ("nacionalidad", "string")]),
                "AutorInput": object_schema(&[("nombre", "string"), ("nacionalidad", "string")]),
                "AutorLibro": object_schema(&[("id", "integer"), ("nombre", "string"), ("nacionalidad", "string"), ("libros", "string")]),
                "AutorConteo": object_schema(&[("id", "integer"), ("nombre", "string"), ("nacionalidad", "string"), ("count", "integer")]),
                "AutorRanking": object_schema(&[("id", "integer"), ("nombre", "string"), ("nacionalidad", "string"), ("cantidad_libros", "integer")]),
                "AutorTieneLibros": object_schema(&[("autor_id", "integer"), ("tiene_libros", "boolean")]),
            }
        }
    })
}
