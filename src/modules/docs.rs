//! Small builders for the OpenAPI fragments the modules contribute.

use serde_json::{json, Value};

pub fn operation(tag: &str, summary: &str, parameters: Vec<Value>, responses: Value) -> Value {
    json!({
        "summary": summary,
        "tags": [tag],
        "parameters": parameters,
        "responses": responses,
    })
}

pub fn path_param(name: &str) -> Value {
    json!({
        "name": name,
        "in": "path",
        "required": true,
        "schema": { "type": "integer", "format": "int64" }
    })
}

pub fn query_param(name: &str, kind: &str) -> Value {
    json!({
        "name": name,
        "in": "query",
        "required": false,
        "schema": { "type": kind }
    })
}

/// Attach a required JSON request body to an operation.
pub fn with_body(mut operation: Value, schema: &str) -> Value {
    operation["requestBody"] = json!({
        "required": true,
        "content": {
            "application/json": {
                "schema": { "$ref": format!("#/components/schemas/{schema}") }
            }
        }
    });
    operation
}

/// `200` with a JSON body referencing `schema`, wrapped in an array when `many`.
pub fn ok_json(description: &str, schema: &str, many: bool) -> Value {
    let reference = json!({ "$ref": format!("#/components/schemas/{schema}") });
    let schema = if many {
        json!({ "type": "array", "items": reference })
    } else {
        reference
    };
    json!({
        "description": description,
        "content": { "application/json": { "schema": schema } }
    })
}

pub fn empty(description: &str) -> Value {
    json!({ "description": description })
}

pub fn object_schema(properties: &[(&str, &str)]) -> Value {
    let mut props = serde_json::Map::new();
    let mut required = Vec::new();
    for (name, kind) in properties {
        let schema = match *kind {
            "integer" => json!({ "type": "integer", "format": "int64" }),
            other => json!({ "type": other }),
        };
        props.insert((*name).to_string(), schema);
        required.push(json!(name));
    }
    json!({
        "type": "object",
        "properties": props,
        "required": required,
    })
}
