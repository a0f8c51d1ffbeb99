use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use sparql_linq::config;
use sparql_linq::query_model::QueryModel;
use sparql_linq::query_translator::compile_query;
use sparql_linq::resource_mapping::ResourceMapping;

/// sparql-linq - compile typed object queries into SPARQL 1.1
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Query model file (JSON, or YAML with a .yaml/.yml extension)
    #[arg(long)]
    query: PathBuf,

    /// Resource mapping YAML file (ontology prefixes, classes, properties)
    #[arg(long)]
    mapping: Option<PathBuf>,

    /// Compiler configuration YAML file (overrides environment variables)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Maximum sub-query nesting depth
    #[arg(long)]
    max_sub_query_depth: Option<usize>,

    /// Write every IRI in full instead of emitting PREFIX declarations
    #[arg(long)]
    no_prefixes: bool,
}

impl From<&Cli> for config::CliConfig {
    fn from(cli: &Cli) -> Self {
        config::CliConfig {
            max_sub_query_depth: cli.max_sub_query_depth,
            emit_prefixes: cli.no_prefixes.then_some(false), // Only an override when set
            mapping_file: cli.mapping.clone(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logger - defaults to WARN level, can be overridden with RUST_LOG env var
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => config::CompilerConfig::from_yaml_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => config::CompilerConfig::from_env().context("reading configuration from environment")?,
    };
    config.merge(config::CliConfig::from(&cli));
    validator::Validate::validate(&config).context("validating configuration")?;

    let mapping = match &config.mapping_file {
        Some(path) => ResourceMapping::from_yaml_file(path)
            .with_context(|| format!("loading resource mapping from {}", path.display()))?,
        None => {
            log::warn!("No resource mapping given; only unmapped queries will compile");
            ResourceMapping::new()
        }
    };

    let query = QueryModel::from_file(&cli.query)
        .with_context(|| format!("loading query model from {}", cli.query.display()))?;

    let compiled = compile_query(&query, &mapping, &config).context("compiling query")?;
    log::info!("Selection variable: {}", compiled.selection);
    println!("{}", compiled.query);
    Ok(())
}
