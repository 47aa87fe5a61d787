use anyhow::{Context, Result};
use clap::Parser;
use nested_dsl::{ComposeConfig, IndexQuery, IndexSchema, SearchRequest};
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "nested-dsl")]
#[command(about = "Compose Elasticsearch query and aggregation bodies", long_about = None)]
struct Args {
    /// Index schema (JSON)
    #[arg(long, env = "NESTED_DSL_SCHEMA")]
    schema: PathBuf,

    /// Search request (JSON)
    #[arg(long, env = "NESTED_DSL_REQUEST")]
    request: PathBuf,

    /// Composition settings (JSON), defaults when omitted
    #[arg(long, env = "NESTED_DSL_CONFIG")]
    config: Option<PathBuf>,

    /// Pretty-print the body
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    info!("nested-dsl v{}", nested_dsl::VERSION);

    let schema = IndexSchema::from_file(&args.schema)
        .with_context(|| format!("loading schema {}", args.schema.display()))?;
    let config = match &args.config {
        Some(path) => ComposeConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ComposeConfig::default(),
    };
    let raw = std::fs::read_to_string(&args.request)
        .with_context(|| format!("reading request {}", args.request.display()))?;
    let request: SearchRequest = serde_json::from_str(&raw).context("parsing request")?;
    debug!(
        filters = request.filter.len(),
        group = request.group.len(),
        stats = request.stats.len(),
        "request loaded"
    );

    let query = IndexQuery::build(&schema, &config, &request)?;
    if let Some(field) = &query.primary_field {
        info!("primary group field: {}", field);
    }

    let body = query.to_body();
    let out = if args.pretty {
        serde_json::to_string_pretty(&body)?
    } else {
        serde_json::to_string(&body)?
    };
    println!("{}", out);
    Ok(())
}
