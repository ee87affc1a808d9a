//! CLI for `proto-openapi`.
//!
//! # Subcommands
//!
//! ```text
//! # Schemas for selected messages (or all of them when --message is omitted)
//! proto-openapi schemas \
//!   --descriptor target/descriptor.bin \
//!   --config api/openapi/schema.yaml \
//!   --message shop.v1.Order \
//!   --format yaml
//!
//! # List messages in a descriptor set
//! proto-openapi list --descriptor target/descriptor.bin
//! ```

#![forbid(unsafe_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use proto_openapi::{
    CyclePolicy, DescriptorPool, EnumType, GeneratorConfig, Naming, TracingSink,
};
use tracing_subscriber::EnvFilter;

/// OpenAPI v3 schema generator for protobuf message descriptors.
#[derive(Parser)]
#[command(name = "proto-openapi", version, about)]
enum Cli {
    /// Generate `components/schemas` for messages in a descriptor set.
    Schemas(SchemasArgs),

    /// Print the fully-qualified names of all messages in a descriptor set.
    List(ListArgs),
}

#[derive(Parser)]
struct SchemasArgs {
    /// Path to the compiled proto `FileDescriptorSet` (binary).
    #[arg(short, long)]
    descriptor: PathBuf,

    /// Path to a generator config YAML file.
    ///
    /// CLI flags override values from the config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fully-qualified message names (repeatable). Defaults to all messages.
    #[arg(short, long = "message")]
    messages: Vec<String>,

    /// Enum representation. Overrides `enum_type` from the config file.
    #[arg(long, value_enum)]
    enum_type: Option<EnumType>,

    /// Property key policy. Overrides `naming` from the config file.
    #[arg(long, value_enum)]
    naming: Option<Naming>,

    /// Self-reference handling. Overrides `cycle_policy` from the config file.
    #[arg(long = "cycles", value_enum)]
    cycle_policy: Option<CyclePolicy>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Yaml)]
    format: Format,

    /// Write output to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log expansion details (equivalent to `RUST_LOG=proto_openapi=debug`).
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Parser)]
struct ListArgs {
    /// Path to the compiled proto `FileDescriptorSet` (binary).
    #[arg(short, long)]
    descriptor: PathBuf,

    /// Include synthetic map-entry messages.
    #[arg(long)]
    map_entries: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Yaml,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli {
        Cli::Schemas(args) => run_schemas(&args),
        Cli::List(args) => run_list(&args),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "proto_openapi=debug"
    } else {
        "proto_openapi=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_pool(path: &Path) -> anyhow::Result<DescriptorPool> {
    let bytes = fs::read(path)
        .with_context(|| format!("failed to read descriptor: {}", path.display()))?;
    DescriptorPool::decode(&bytes)
        .with_context(|| format!("failed to decode descriptor: {}", path.display()))
}

/// Config file values (or defaults), then any flag given on the command line.
fn resolve_config(args: &SchemasArgs) -> anyhow::Result<GeneratorConfig> {
    let mut config = match &args.config {
        Some(path) => GeneratorConfig::load(path)
            .with_context(|| format!("failed to load config: {}", path.display()))?,
        None => GeneratorConfig::default(),
    };
    if let Some(enum_type) = args.enum_type {
        config = config.enum_type(enum_type);
    }
    if let Some(naming) = args.naming {
        config = config.naming(naming);
    }
    if let Some(cycle_policy) = args.cycle_policy {
        config = config.cycle_policy(cycle_policy);
    }
    Ok(config)
}

fn run_schemas(args: &SchemasArgs) -> anyhow::Result<()> {
    init_tracing(args.verbose);

    let config = resolve_config(args)?;
    let pool = load_pool(&args.descriptor)?;
    let names: Vec<&str> = args.messages.iter().map(String::as_str).collect();
    let mut sink = TracingSink;
    let components = proto_openapi::components(&pool, &config, &names, &mut sink)
        .context("failed to generate schemas")?;

    let rendered = match args.format {
        Format::Yaml => components.to_yaml()?,
        Format::Json => components.to_json()?,
    };

    match &args.output {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!(
                "Wrote {} schema(s) to {}",
                components.schemas().len(),
                path.display()
            );
        }
        None => print!("{rendered}"),
    }

    Ok(())
}

fn run_list(args: &ListArgs) -> anyhow::Result<()> {
    let pool = load_pool(&args.descriptor)?;
    for message in pool.messages() {
        if message.is_map_entry() && !args.map_entries {
            continue;
        }
        println!("{}", message.full_name().trim_start_matches('.'));
    }
    Ok(())
}
