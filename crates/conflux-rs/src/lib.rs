//! Public surface for conflux.
//!
//! This crate re-exports the resolution core, the concrete loaders, and the
//! schema model, and provides a small initialization helper to keep consumer
//! setup consistent.

/// Re-export for convenience.
pub use conflux_rs_core as core;
/// Re-export for convenience.
pub use conflux_rs_loaders as loaders;
/// Re-export for convenience.
pub use conflux_rs_schema as schema;

/// Everything needed to assemble and run a resolver.
pub mod prelude {
    pub use conflux_rs_core::{
        BlockingResolver, ConfigBuilder, Loader, Model, Reference, Resolver, ResolverCause,
        ResolverError, ValidationError,
    };
    pub use conflux_rs_loaders::{
        ENV_SOURCE, ExplicitMapper, KeyMapper, LoaderBuilderExt, MetadataMapper, PrefixMapper,
    };
    pub use conflux_rs_schema::{Schema, SchemaBuilderExt};
}

#[inline]
/// Initialize logging using env_logger if the "logging" feature is enabled.
///
/// This is a no-op if the feature is not enabled. Binaries are still expected
/// to call this early in startup to ensure log output is wired up.
pub fn init_logging() {
    #[cfg(feature = "logging")]
    {
        if env_logger::try_init().is_ok() {
            log::debug!("logging initialized (backend=env_logger)");
        }
    }
}
