//! Modelgen CLI.
//!
//! Generates Eloquent models, and optionally their companions, from a schema
//! snapshot or a SQLite database.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use modelgen_compiler::{
    open_source, save_snapshot, AppConfig, Config, GenerationReport, Generator, Relation,
    DEFAULT_CONFIG_FILE,
};

mod ui;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "MODELGEN_LOG";

#[derive(Parser)]
#[command(name = "modelgen", version)]
#[command(about = "Generates Eloquent models from a database schema")]
struct Cli {
    /// Application configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Schema source: a JSON snapshot or a SQLite database
    #[arg(long, global = true)]
    schema: Option<PathBuf>,

    /// Prefix of every physical table name
    #[arg(long, global = true)]
    table_prefix: Option<String>,

    /// Log generator decisions
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a model class, or every model with `all`
    Generate(GenerateArgs),

    /// Print the relations detected for a table
    Inspect {
        /// Table name, without prefix
        table: String,
    },

    /// Write the loaded schema as a JSON snapshot
    Snapshot {
        /// Output file
        output: PathBuf,
    },
}

#[derive(Args)]
struct GenerateArgs {
    /// Model class name, or `all`
    class_name: String,

    #[arg(long)]
    table_name: Option<String>,

    /// Output directory, relative to the app path unless absolute
    #[arg(long)]
    output_path: Option<String>,

    #[arg(long)]
    namespace: Option<String>,

    #[arg(long)]
    base_class_name: Option<String>,

    /// Disable timestamps on the model
    #[arg(long)]
    no_timestamps: bool,

    #[arg(long)]
    date_format: Option<String>,

    #[arg(long)]
    connection: Option<String>,

    /// Comma separated tables skipped by `all`
    #[arg(long)]
    except_tables: Option<String>,

    /// Subdirectory of Http/Controllers for generated controllers
    #[arg(long)]
    controller_path: Option<String>,

    #[arg(long)]
    routes_path: Option<String>,

    #[arg(long)]
    api_routes_path: Option<String>,

    #[arg(long)]
    request_namespace: Option<String>,

    #[arg(long)]
    request_path: Option<String>,

    /// Generate a resource controller
    #[arg(long)]
    controller: bool,

    /// Generate an API resource controller
    #[arg(long)]
    api_controller: bool,

    /// Append a resource route
    #[arg(long)]
    routes: bool,

    /// Append an API resource route
    #[arg(long)]
    api_routes: bool,

    /// Generate create and update form requests
    #[arg(long)]
    request: bool,

    /// Generate a JSON resource
    #[arg(long)]
    resource: bool,

    /// Generate a repository
    #[arg(long)]
    repository: bool,

    /// Controller, routes, requests and repository
    #[arg(long)]
    all: bool,

    /// API controller, API routes, requests, resource and repository
    #[arg(long)]
    all_api: bool,
}

impl GenerateArgs {
    /// Invocation layer of the configuration. Unset options are null so lower
    /// layers keep their values.
    fn into_input(self) -> Vec<(&'static str, Value)> {
        let text = |value: Option<String>| value.map_or(Value::Null, Value::String);
        let flag = |value: bool| if value { Value::Bool(true) } else { Value::Null };

        vec![
            ("class_name", Value::String(self.class_name)),
            ("table_name", text(self.table_name)),
            ("output_path", text(self.output_path)),
            ("namespace", text(self.namespace)),
            ("base_class_name", text(self.base_class_name)),
            ("no_timestamps", flag(self.no_timestamps)),
            ("date_format", text(self.date_format)),
            ("connection", text(self.connection)),
            ("except_tables", text(self.except_tables)),
            ("controller_path", text(self.controller_path)),
            ("routes_path", text(self.routes_path)),
            ("api_routes_path", text(self.api_routes_path)),
            ("request_namespace", text(self.request_namespace)),
            ("request_path", text(self.request_path)),
            ("controller", flag(self.controller)),
            ("api_controller", flag(self.api_controller)),
            ("routes", flag(self.routes)),
            ("api_routes", flag(self.api_routes)),
            ("request", flag(self.request)),
            ("resource", flag(self.resource)),
            ("repository", flag(self.repository)),
            ("all", flag(self.all)),
            ("all_api", flag(self.all_api)),
        ]
    }
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = run(cli);
    if result.is_err() {
        ui::error_header();
    }
    result
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> miette::Result<()> {
    let root = std::env::current_dir()
        .map_err(|e| miette::miette!("Failed to read the working directory: {}", e))?;
    let app = AppConfig::load_or_default(&root.join(&cli.config))?;

    let source_input = [
        ("schema", path_value(cli.schema.as_deref())),
        ("table_prefix", cli.table_prefix.clone().map_or(Value::Null, Value::String)),
    ];
    let source_config = Config::new(source_input.clone(), Some(&app));
    let schema_path = root.join(source_config.require_str("schema")?);
    let prefix = source_config.get_str("table_prefix").unwrap_or_default();
    tracing::debug!(schema = %schema_path.display(), prefix, "resolved schema source");

    ui::print_compact_header(env!("CARGO_PKG_VERSION"));

    let spinner = ui::spinner("Loading schema...");
    let mut source = open_source(&schema_path, prefix)?;
    let loaded = Generator::from_source(source.as_mut());
    spinner.finish_and_clear();
    let mut generator = loaded?.with_root(&root);

    match cli.command {
        Commands::Generate(args) => {
            let mut input = args.into_input();
            input.extend(source_input);
            let config = Config::new(input, Some(&app));
            generate(&mut generator, &config, &root)
        }
        Commands::Inspect { table } => inspect(&generator, &table),
        Commands::Snapshot { output } => {
            let output = root.join(output);
            save_snapshot(generator.schema(), &output)?;
            ui::success(&format!(
                "Schema snapshot written to {} ({} tables)",
                ui::display_path(&output, &root),
                generator.schema().tables.len()
            ));
            Ok(())
        }
    }
}

fn generate(generator: &mut Generator, config: &Config, root: &Path) -> miette::Result<()> {
    let start = Instant::now();
    let all = config.get_str("class_name") == Some("all");

    let reports = if all {
        let spinner = ui::spinner("Generating models...");
        let reports = generator.generate_all(config);
        spinner.finish_and_clear();
        reports?
    } else {
        vec![generator.generate(config)?]
    };

    if reports.is_empty() {
        ui::info("No eligible tables found.");
        return Ok(());
    }
    for report in &reports {
        print_report(report, root);
    }

    println!();
    ui::timing(
        &format!("Generated {} model(s)", reports.len()),
        start.elapsed().as_millis(),
    );
    Ok(())
}

fn print_report(report: &GenerationReport, root: &Path) {
    ui::success(&format!(
        "{} ({}) {}",
        report.class_name,
        report.table_name,
        ui::display_path(&report.model_path, root)
    ));
    let count = report.companions.len();
    for (i, path) in report.companions.iter().enumerate() {
        ui::file_item(path, root, i + 1 == count);
    }
}

fn inspect(generator: &Generator, table: &str) -> miette::Result<()> {
    let relations = generator.inspect(table)?;
    if relations.is_empty() {
        ui::info(&format!("No relations detected for {}", table));
        return Ok(());
    }

    ui::info(&format!("Relations of {}", table));
    println!();
    for relation in &relations {
        let detail = match relation {
            Relation::BelongsToMany(pivot) => format!(
                "via {} ({}, {})",
                pivot.join_table, pivot.foreign_column, pivot.local_column
            ),
            other => format!("{} -> {}", other.foreign_column(), other.local_column()),
        };
        ui::relation_line(relation.builder_method(), relation.related_table(), &detail);
    }
    println!();
    ui::dim(&format!("{} relation(s)", relations.len()));
    Ok(())
}

fn path_value(path: Option<&Path>) -> Value {
    path.map_or(Value::Null, |p| Value::String(p.display().to_string()))
}
