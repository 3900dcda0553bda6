use anyhow::{Context, Result, bail};
use clap::Parser;
use conflux_rs::init_logging;
use conflux_rs::prelude::*;
use serde::Deserialize;
use std::path::PathBuf;

/// Resolve the demo configuration from defaults, files, and the environment.
#[derive(Debug, Parser)]
#[command(name = "layered", about = "Layered configuration demo")]
struct Args {
    /// Base configuration file (JSON5).
    #[arg(long, default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/config.json5"))]
    config: PathBuf,
    /// Optional YAML overrides applied on top of the base file.
    #[arg(long, default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/local.yaml"))]
    local: PathBuf,
    /// Prefix for environment variables.
    #[arg(long, default_value = "LAYERED_")]
    prefix: String,
    /// Use the blocking resolver instead of the async one.
    #[arg(long)]
    blocking: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Server {
    host: String,
    port: u16,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Database {
    user: String,
    max_connections: u32,
}

#[derive(Debug, Deserialize)]
struct AppConfig {
    server: Server,
    db: Database,
}

fn schema() -> Schema {
    Schema::object()
        .field(
            "server",
            Schema::object()
                .field("host", Schema::string().describe("bind address"))
                .field(
                    "port",
                    Schema::integer().min(1).max(65535).describe("listen port"),
                ),
        )
        .field(
            "db",
            Schema::object()
                .field("user", Schema::string().required().describe("database login"))
                .field("maxConnections", Schema::integer().min(1).default(4)),
        )
}

/// Print a resolver failure with every place the value can be supplied.
fn report(err: &ResolverError) {
    eprintln!("error: {err}");
    if err.references().is_empty() {
        return;
    }
    let verb = if err.is_undefined_error() {
        "set it in one of"
    } else {
        "supplied by"
    };
    eprintln!("  {verb}:");
    for reference in err.references() {
        eprintln!("    - {reference}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let builder = ConfigBuilder::new()
        .defaults(serde_json::json!({ "server": { "host": "0.0.0.0", "port": 80 } }))
        .json_file(&args.config)
        .optional_yaml_file(&args.local)
        .typed::<AppConfig>(schema())
        .env_for_model(&args.prefix);

    let resolved = if args.blocking {
        let resolver = builder
            .build_blocking()
            .context("failed to build blocking resolver")?;
        resolver.resolve()
    } else {
        builder.build().resolve().await
    };

    let config = match resolved {
        Ok(config) => config,
        Err(err) => {
            report(&err);
            bail!("configuration could not be resolved");
        }
    };
    log::info!(
        "resolved demo config (host={}, port={})",
        config.server.host,
        config.server.port
    );
    println!("{config:#?}");
    Ok(())
}
