//! Tests for resolution, merge precedence, and error decoration.

use conflux_rs_core::{
    BlockingResolver, ConfigBuilder, DataContainer, Loader, MergedContainer, ModelError,
    Reference, Reporter, Resolver, ResolverCause, ResolverOptions, ValidationError, path_of,
};
use conflux_rs_test_utils::{
    AsyncOnlyLoader, CompoundStubLoader, FailingLoader, FailingModel, FnModel, LoadLog,
    StubLoader,
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;

fn three_layers() -> Vec<Arc<dyn Loader>> {
    vec![
        Arc::new(StubLoader::attributed("L1", json!({ "a": 1, "b": { "c": 1 } }))),
        Arc::new(StubLoader::attributed("L2", json!({ "b": { "d": 2 } }))),
        Arc::new(StubLoader::attributed("L3", json!({ "b": { "c": 3 } }))),
    ]
}

/// Three overlapping layers merge per key with later layers winning.
#[tokio::test]
async fn merges_layers_and_attributes_each_leaf() {
    let config = Resolver::new(three_layers()).resolve().await.expect("config");
    assert_eq!(config, json!({ "a": 1, "b": { "c": 3, "d": 2 } }));

    let containers = three_layers()
        .into_iter()
        .map(|loader| {
            loader
                .load_blocking()
                .expect("load")
                .into_container(&loader)
        })
        .collect::<Vec<Arc<dyn DataContainer>>>();
    let merged = MergedContainer::new(containers);
    let source = |segments: &[&str]| {
        merged
            .definition(&path_of(segments))
            .expect("definition")
            .map(|reference| reference.source)
    };
    assert_eq!(source(&["b", "c"]).as_deref(), Some("L3"));
    assert_eq!(source(&["b", "d"]).as_deref(), Some("L2"));
    assert_eq!(source(&["a"]).as_deref(), Some("L1"));
    assert_eq!(source(&["z"]), None);
}

/// A missing value lists every loader that could supply it.
#[tokio::test]
async fn undefined_value_collects_references_from_all_loaders() {
    let resolver = ConfigBuilder::new()
        .loader(StubLoader::new("L1", json!({})))
        .loader(StubLoader::new("L2", json!({})).with_reference(
            &["db", "user"],
            Reference::with_identifier("env", "DB_USER"),
        ))
        .model(FailingModel::Validation(ValidationError::undefined(
            "required",
            path_of(&["db", "user"]),
        )))
        .build();

    let err = resolver.resolve().await.expect_err("undefined");
    assert!(err.is_undefined_error());
    assert_eq!(
        err.references(),
        &[Reference::with_identifier("env", "DB_USER")]
    );
    assert_eq!(err.path(), Some(path_of(&["db", "user"]).as_slice()));
    assert_eq!(
        err.reporter(),
        Some(&Reporter::Model {
            name: "failing-model".to_string()
        })
    );
}

/// Undefined references follow registration order, independent of the merge.
#[test]
fn undefined_references_keep_registration_order() {
    let resolver = ConfigBuilder::new()
        .loader(StubLoader::attributed("file", json!({})))
        .loader(StubLoader::attributed("env", json!({ "other": true })))
        .model(FailingModel::Validation(ValidationError::undefined(
            "required",
            path_of(&["port"]),
        )))
        .build_blocking()
        .expect("blocking");

    let err = resolver.resolve().expect_err("undefined");
    assert_eq!(
        err.references(),
        &[
            Reference::with_identifier("file", "port"),
            Reference::with_identifier("env", "port"),
        ]
    );
}

/// An invalid value names only the loader that supplied it.
#[tokio::test]
async fn invalid_value_references_only_the_effective_source() {
    let resolver = ConfigBuilder::new()
        .loader(StubLoader::attributed("L1", json!({ "port": 1 })))
        .loader(StubLoader::attributed("L2", json!({ "port": 0 })))
        .loader(StubLoader::attributed("L3", json!({ "host": "localhost" })))
        .model(FailingModel::Validation(ValidationError::invalid(
            "too small",
            path_of(&["port"]),
        )))
        .build();

    let err = resolver.resolve().await.expect_err("invalid");
    assert!(!err.is_undefined_error());
    assert_eq!(err.references(), &[Reference::with_identifier("L2", "port")]);
}

/// The first failing loader aborts resolution; later loaders never run.
#[test]
fn loader_failure_is_fail_fast() {
    let log = LoadLog::new();
    let resolver = ConfigBuilder::new()
        .loader(StubLoader::new("first", json!({})).with_log(&log))
        .loader(FailingLoader::new("second", "boom").with_log(&log))
        .loader(StubLoader::new("third", json!({})).with_log(&log))
        .build_blocking()
        .expect("blocking");

    let err = resolver.resolve().expect_err("load failure");
    assert_eq!(log.entries(), vec!["first".to_string(), "second".to_string()]);
    assert_eq!(
        err.reporter(),
        Some(&Reporter::Loader {
            index: 1,
            name: "second".to_string()
        })
    );
    assert!(err.references().is_empty());
    assert_eq!(err.path(), None);
    assert!(matches!(err.cause(), ResolverCause::Load(_)));
}

/// Async sequential loading is fail-fast as well.
#[tokio::test]
async fn async_loader_failure_is_fail_fast() {
    let log = LoadLog::new();
    let resolver = ConfigBuilder::new()
        .loader(FailingLoader::new("first", "boom").with_log(&log))
        .loader(StubLoader::new("second", json!({})).with_log(&log))
        .build();

    let err = resolver.resolve().await.expect_err("load failure");
    assert_eq!(log.entries(), vec!["first".to_string()]);
    assert_eq!(
        err.reporter(),
        Some(&Reporter::Loader {
            index: 0,
            name: "first".to_string()
        })
    );
}

/// Concurrent loading still merges in registration order.
#[tokio::test]
async fn concurrent_loading_preserves_registration_order() {
    let slow = AsyncOnlyLoader::new(
        StubLoader::attributed("slow", json!({ "port": 1, "host": "a" })),
        Duration::from_millis(30),
    );
    let fast = AsyncOnlyLoader::new(
        StubLoader::attributed("fast", json!({ "port": 2 })),
        Duration::from_millis(0),
    );
    let resolver: Resolver<Value> = Resolver::from_parts(
        vec![Arc::new(slow), Arc::new(fast)],
        Arc::new(FailingModel::Validation(ValidationError::invalid(
            "bad port",
            path_of(&["port"]),
        ))),
        ResolverOptions {
            concurrent_loading: true,
        },
    );

    let err = resolver.resolve().await.expect_err("invalid");
    assert_eq!(
        err.references(),
        &[Reference::with_identifier("fast", "port")]
    );

    let value = Resolver::new(resolver.loaders().to_vec())
        .with_options(ResolverOptions {
            concurrent_loading: true,
        })
        .resolve()
        .await
        .expect("config");
    assert_eq!(value, json!({ "port": 2, "host": "a" }));
}

/// With concurrent loading the lowest-indexed failure is reported.
#[tokio::test]
async fn concurrent_loading_reports_lowest_index_failure() {
    let resolver = ConfigBuilder::new()
        .loader(AsyncOnlyLoader::new(
            FailingLoader::new("slow", "slow failure"),
            Duration::from_millis(30),
        ))
        .loader(AsyncOnlyLoader::new(
            FailingLoader::new("fast", "fast failure"),
            Duration::from_millis(0),
        ))
        .concurrent_loading(true)
        .build();

    let err = resolver.resolve().await.expect_err("load failure");
    assert_eq!(
        err.reporter(),
        Some(&Reporter::Loader {
            index: 0,
            name: "slow".to_string()
        })
    );
}

/// Resolving twice with stateless loaders yields identical output.
#[tokio::test]
async fn repeated_resolution_is_idempotent() {
    let resolver = Resolver::new(three_layers());
    let first = resolver.resolve().await.expect("first");
    let second = resolver.resolve().await.expect("second");
    assert_eq!(first, second);
}

/// A shared resolver can run concurrently from several tasks.
#[tokio::test]
async fn shared_resolver_runs_concurrently() {
    let resolver = Arc::new(Resolver::new(three_layers()));
    let handles = (0..4)
        .map(|_| {
            let resolver = resolver.clone();
            tokio::spawn(async move { resolver.resolve().await.expect("config") })
        })
        .collect::<Vec<_>>();
    for handle in handles {
        assert_eq!(
            handle.await.expect("join"),
            json!({ "a": 1, "b": { "c": 3, "d": 2 } })
        );
    }
}

/// Blocking resolvers reject async-only components at construction.
#[test]
fn blocking_resolver_rejects_async_only_components() {
    let err = ConfigBuilder::new()
        .loader(StubLoader::new("sync", json!({})))
        .loader(AsyncOnlyLoader::new(
            StubLoader::new("remote", json!({})),
            Duration::from_millis(0),
        ))
        .build_blocking()
        .expect_err("async-only loader");
    assert!(matches!(err.cause(), ResolverCause::Configuration(_)));
    assert!(err.message().contains("loader #1 (remote)"));

    let err = BlockingResolver::with_model(
        Vec::new(),
        FnModel::async_only(|value: Value| Ok::<_, ModelError>(value)),
    )
    .expect_err("async-only model");
    assert!(err.message().contains("does not support blocking validation"));
}

/// Async-only components still work with the async resolver.
#[tokio::test]
async fn async_resolver_accepts_async_only_components() {
    let resolver = ConfigBuilder::new()
        .loader(AsyncOnlyLoader::new(
            StubLoader::new("remote", json!({ "port": 80 })),
            Duration::from_millis(0),
        ))
        .model(FnModel::async_only(
            |value: Value| -> Result<u64, ModelError> {
                value["port"].as_u64().ok_or_else(|| {
                    ValidationError::invalid("expected integer", path_of(&["port"])).into()
                })
            },
        ))
        .build();
    assert_eq!(resolver.resolve().await.expect("port"), 80);
}

/// Model failures without a validation path carry no references.
#[test]
fn unstructured_model_failure_has_no_references() {
    let resolver = ConfigBuilder::new()
        .loader(StubLoader::attributed("file", json!({ "port": 1 })))
        .model(FailingModel::Message("schema unavailable".to_string()))
        .build_blocking()
        .expect("blocking");

    let err = resolver.resolve().expect_err("failure");
    assert!(err.references().is_empty());
    assert_eq!(err.path(), None);
    assert!(!err.is_undefined_error());
    assert!(err.message().contains("schema unavailable"));
}

/// A compound loader used directly cannot attribute invalid values.
#[test]
fn compound_loader_used_directly_is_rejected() {
    let resolver = ConfigBuilder::new()
        .loader(CompoundStubLoader::new(
            "stack",
            json!({ "port": 0 }),
            &[".env", ".env.local"],
        ))
        .model(FailingModel::Validation(ValidationError::invalid(
            "too small",
            path_of(&["port"]),
        )))
        .build_blocking()
        .expect("blocking");

    let err = resolver.resolve().expect_err("compound");
    assert!(matches!(err.cause(), ResolverCause::Container(_)));
    assert_eq!(err.path(), Some(path_of(&["port"]).as_slice()));
    assert_eq!(err.reporter(), None);
}

/// Compound loaders are fine for undefined values: all references are hints.
#[test]
fn compound_loader_contributes_all_hints_for_missing_values() {
    let resolver = ConfigBuilder::new()
        .loader(CompoundStubLoader::new(
            "stack",
            json!({}),
            &[".env", ".env.local"],
        ))
        .model(FailingModel::Validation(ValidationError::undefined(
            "required",
            path_of(&["port"]),
        )))
        .build_blocking()
        .expect("blocking");

    let err = resolver.resolve().expect_err("undefined");
    assert_eq!(
        err.references(),
        &[
            Reference::with_identifier(".env", "port"),
            Reference::with_identifier(".env.local", "port"),
        ]
    );
}

/// Defaults registered through the builder rank below later loaders.
#[test]
fn builder_defaults_have_lowest_precedence() {
    let config = ConfigBuilder::new()
        .defaults(json!({ "port": 80, "host": "localhost" }))
        .optional(FailingLoader::new("missing.yaml", "not found"))
        .loader(StubLoader::new("env", json!({ "port": "9000" })))
        .build_blocking()
        .expect("blocking")
        .resolve()
        .expect("config");
    assert_eq!(config, json!({ "port": "9000", "host": "localhost" }));
}
