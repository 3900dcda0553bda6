use super::validate;
use crate::schema::Schema;
use conflux_rs_core::{ValidationError, ValidationKind, path_of};
use pretty_assertions::assert_eq;
use serde_json::json;

fn server_schema() -> Schema {
    Schema::object()
        .field("host", Schema::string().default("localhost"))
        .field("port", Schema::integer().min(1).max(65535).required())
        .field(
            "db",
            Schema::object()
                .field("user", Schema::string().required())
                .field("pool", Schema::integer().default(4)),
        )
}

#[test]
fn casts_env_strings_and_fills_defaults() {
    let schema = Schema::object()
        .field("port", Schema::integer())
        .field("ratio", Schema::number())
        .field("debug", Schema::boolean())
        .field("verbose", Schema::boolean())
        .field("tags", Schema::array(Schema::string()))
        .field("host", Schema::string().default("localhost"));
    let value = validate(
        &schema,
        json!({
            "port": " 8080 ",
            "ratio": "0.5",
            "debug": "yes",
            "verbose": "OFF",
            "tags": "[\"a\", \"b\"]"
        }),
    )
    .expect("valid");
    assert_eq!(
        value,
        json!({
            "port": 8080,
            "ratio": 0.5,
            "debug": true,
            "verbose": false,
            "tags": ["a", "b"],
            "host": "localhost"
        })
    );
}

#[test]
fn missing_required_field_is_undefined() {
    let err = validate(&server_schema(), json!({ "port": 80 })).expect_err("missing");
    assert_eq!(
        err,
        ValidationError::undefined("missing required field", path_of(&["db", "user"]))
    );
}

#[test]
fn null_counts_as_absent() {
    let err = validate(&server_schema(), json!({ "port": null, "db": { "user": "u" } }))
        .expect_err("missing");
    assert_eq!(err.kind, ValidationKind::UndefinedValue);
    assert_eq!(err.path, Some(path_of(&["port"])));
}

#[test]
fn nested_defaults_fill_absent_objects() {
    let schema = Schema::object().field(
        "cache",
        Schema::object()
            .field("ttl", Schema::integer().default(60))
            .field("dir", Schema::string()),
    );
    assert_eq!(
        validate(&schema, json!({})).expect("valid"),
        json!({ "cache": { "ttl": 60 } })
    );

    let empty = Schema::object().field("cache", Schema::object().field("dir", Schema::string()));
    assert_eq!(validate(&empty, json!({})).expect("valid"), json!({}));
}

#[test]
fn type_mismatch_is_invalid() {
    let err = validate(
        &server_schema(),
        json!({ "port": "http", "db": { "user": "u" } }),
    )
    .expect_err("invalid");
    assert_eq!(
        err,
        ValidationError::invalid("expected integer", path_of(&["port"]))
    );

    let err = validate(&server_schema(), json!({ "port": 80, "db": "u" })).expect_err("invalid");
    assert_eq!(
        err,
        ValidationError::invalid("expected object", path_of(&["db"]))
    );
}

#[test]
fn out_of_range_is_invalid() {
    let err = validate(
        &server_schema(),
        json!({ "port": 70000, "db": { "user": "u" } }),
    )
    .expect_err("range");
    assert_eq!(
        err,
        ValidationError::invalid("must be at most 65535", path_of(&["port"]))
    );

    let err = validate(&server_schema(), json!({ "port": "0", "db": { "user": "u" } }))
        .expect_err("range");
    assert_eq!(
        err,
        ValidationError::invalid("must be at least 1", path_of(&["port"]))
    );
}

#[test]
fn unknown_keys_are_invalid_unless_allowed() {
    let err = validate(
        &server_schema(),
        json!({ "port": 80, "db": { "user": "u", "pass": "p" } }),
    )
    .expect_err("unknown");
    assert_eq!(
        err,
        ValidationError::invalid("unknown key", path_of(&["db", "pass"]))
    );

    let open = Schema::object()
        .field("port", Schema::integer())
        .allow_unknown_keys();
    assert_eq!(
        validate(&open, json!({ "port": "1", "extra": true })).expect("valid"),
        json!({ "port": 1, "extra": true })
    );
}

#[test]
fn array_items_report_their_index() {
    let schema = Schema::object().field("ports", Schema::array(Schema::integer()));
    let err = validate(&schema, json!({ "ports": [1, "two"] })).expect_err("item");
    assert_eq!(
        err,
        ValidationError::invalid("expected integer", path_of(&["ports", "1"]))
    );
}

#[test]
fn non_object_root_is_generic() {
    let err = validate(&server_schema(), json!([1, 2])).expect_err("root");
    assert_eq!(err, ValidationError::generic("expected object at root"));
    assert_eq!(err.path, None);
}

#[test]
fn scalar_root_schemas_validate_directly() {
    assert_eq!(
        validate(&Schema::boolean(), json!("1")).expect("valid"),
        json!(true)
    );
    let err = validate(&Schema::integer(), json!("x")).expect_err("invalid");
    assert_eq!(err.kind, ValidationKind::Generic);
}
