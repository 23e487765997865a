//! Object Detail CLI
//!
//! Usage:
//!   object-detail [OPTIONS] --schema <FILE> --data <FILE> --model <NAME> <DISPLAY>
//!
//! Options:
//!   --schema <FILE>     Model schema (TOML)
//!   --data <FILE>       Instance fixture (JSON)
//!   --model <NAME>      Model of the fixture's root object
//!   --settings <FILE>   Presentation settings (TOML)
//!   --routes <FILE>     Named routes for property links (TOML)
//!   --catalog <FILE>    Message catalog for display text (TOML)
//!   --locale <CODE>     Locale to render display text in
//!   --json              Print resolved groups as JSON instead of HTML
//!   -v, --verbose       Log resolution details to stderr (repeat for more)
//!   -h, --help          Print help

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use object_detail::config::DisplayParser;
use object_detail::instance::{load_fixture, FixtureError};
use object_detail::routes::RouteError;
use object_detail::schema::SchemaError;
use object_detail::settings::SettingsError;
use object_detail::text::{Catalog, CatalogError};
use object_detail::{
    ConfigurationError, DetailConfig, RenderError, Resolver, Router, SchemaRegistry, Settings,
};

#[derive(Parser)]
#[command(name = "object-detail")]
#[command(about = "Resolve and render declarative detail views for model instances")]
struct Cli {
    /// Property display configuration (TOML, or JSON by extension)
    display: PathBuf,

    /// Model schema (TOML)
    #[arg(long)]
    schema: PathBuf,

    /// Instance fixture (JSON)
    #[arg(long)]
    data: PathBuf,

    /// Model of the fixture's root object
    #[arg(long)]
    model: String,

    /// Presentation settings (TOML)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Named routes for property links (TOML)
    #[arg(long)]
    routes: Option<PathBuf>,

    /// Message catalog for display text (TOML)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Locale to render display text in
    #[arg(long)]
    locale: Option<String>,

    /// Print resolved groups as JSON instead of HTML
    #[arg(long)]
    json: bool,

    /// Log resolution details to stderr (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("schema '{}': {source}", .path.display())]
    Schema { path: PathBuf, source: SchemaError },

    #[error("fixture '{}': {source}", .path.display())]
    Fixture { path: PathBuf, source: FixtureError },

    #[error("display '{}': {source}", .path.display())]
    Display {
        path: PathBuf,
        source: ConfigurationError,
    },

    #[error("settings '{}': {source}", .path.display())]
    Settings { path: PathBuf, source: SettingsError },

    #[error("routes '{}': {source}", .path.display())]
    Routes { path: PathBuf, source: RouteError },

    #[error("catalog '{}': {source}", .path.display())]
    Catalog { path: PathBuf, source: CatalogError },

    #[error("unknown model '{0}'")]
    UnknownModel(String),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "object_detail=debug",
        _ => "object_detail=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<String, CliError> {
    let schema = SchemaRegistry::from_file(&cli.schema).map_err(|source| CliError::Schema {
        path: cli.schema.clone(),
        source,
    })?;
    if !schema.contains(&cli.model) {
        return Err(CliError::UnknownModel(cli.model.clone()));
    }

    let instance = load_data(&schema, &cli.model, &cli.data)?;

    let mut parser = DisplayParser::new();
    if let Some(path) = &cli.catalog {
        let catalog = Catalog::from_file(path).map_err(|source| CliError::Catalog {
            path: path.clone(),
            source,
        })?;
        parser = parser.with_catalog(Arc::new(catalog));
    }
    let groups = parser
        .parse_file(&cli.display)
        .map_err(|source| CliError::Display {
            path: cli.display.clone(),
            source,
        })?;
    debug!(groups = groups.len(), "loaded property display");

    let router = match &cli.routes {
        Some(path) => Some(Router::from_file(path).map_err(|source| CliError::Routes {
            path: path.clone(),
            source,
        })?),
        None => None,
    };
    let mut resolver = Resolver::new(&schema);
    if let Some(router) = &router {
        resolver = resolver.with_routes(router);
    }

    if cli.json {
        let resolved = resolver.resolve_all(&instance, &groups);
        return Ok(serde_json::to_string_pretty(&resolved)?);
    }

    let settings = match &cli.settings {
        Some(path) => Settings::from_file(path).map_err(|source| CliError::Settings {
            path: path.clone(),
            source,
        })?,
        None => Settings::default(),
    };
    let mut config = DetailConfig::new().with_settings(settings);
    if let Some(locale) = &cli.locale {
        config = config.with_locale(locale.as_str());
    }
    Ok(object_detail::render_object_detail(
        &resolver, &instance, &groups, &config,
    )?)
}

fn load_data(
    schema: &SchemaRegistry,
    model: &str,
    path: &Path,
) -> Result<object_detail::ObjectRef, CliError> {
    let fixture = |source: FixtureError| CliError::Fixture {
        path: path.to_path_buf(),
        source,
    };
    let content = fs::read_to_string(path).map_err(|e| fixture(e.into()))?;
    let json: serde_json::Value = serde_json::from_str(&content).map_err(|e| fixture(e.into()))?;
    load_fixture(schema, model, &json).map_err(fixture)
}
