//! reportgen CLI - Generate paginated reports from a SQLite database
//!
//! Usage:
//!   reportgen list [--category <category>]
//!   reportgen describe <category> <identifier>
//!   reportgen generate <category> <identifier> [--field <name>]... [--param <name=value>]...
//!
//! Examples:
//!   reportgen list
//!   reportgen describe Teller Transactions
//!   reportgen generate Teller Transactions --database bank.sqlite --param "Status=OPEN,CLOSED"
//!   reportgen generate Accounting Balancesheet --explain --dialect postgres

use clap::{Parser, Subcommand, ValueEnum};
use reportgen::config::Settings;
use reportgen::executor::SqliteExecutor;
use reportgen::model::{DisplayableField, FieldType, QueryParameter, ReportPage, ReportRequest};
use reportgen::registry::ReportRegistry;
use reportgen::report::ReportSpecification;
use reportgen::service::ReportService;
use reportgen::sql::{BoundValue, Dialect};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "reportgen")]
#[command(about = "reportgen - A pluggable report engine over hierarchical SQL queries")]
#[command(version)]
struct Cli {
    /// Config file (defaults to $REPORTGEN_CONFIG, ./reportgen.toml, then the user config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log executed SQL and other debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available reports
    List {
        /// Only list reports in this category
        #[arg(long)]
        category: Option<String>,
    },

    /// Show the fields and filters of a report
    Describe {
        category: String,
        identifier: String,
    },

    /// Generate one page of a report
    Generate {
        category: String,
        identifier: String,

        /// Field to show, in output order (repeatable; defaults to every declared field)
        #[arg(short, long = "field")]
        fields: Vec<String>,

        /// Filter as NAME=VALUE (repeatable). IN takes a,b,c and BETWEEN takes low..high
        #[arg(short, long = "param")]
        params: Vec<String>,

        /// Zero-based page index
        #[arg(long, default_value_t = 0)]
        page: u32,

        /// Root rows per page (defaults to the configured page size)
        #[arg(long)]
        size: Option<u32>,

        /// SQLite database file (overrides the config file)
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "table")]
        format: OutputFormat,

        /// Print the SQL the page would run instead of running it
        #[arg(long)]
        explain: bool,

        /// SQL dialect for --explain (overrides the config file)
        #[arg(long)]
        dialect: Option<DialectArg>,
    },
}

#[derive(Clone, ValueEnum)]
enum DialectArg {
    Sqlite,
    Postgres,
    Mysql,
    Tsql,
    Duckdb,
}

impl From<DialectArg> for Dialect {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::Sqlite => Dialect::Sqlite,
            DialectArg::Postgres => Dialect::Postgres,
            DialectArg::Mysql => Dialect::MySql,
            DialectArg::Tsql => Dialect::TSql,
            DialectArg::Duckdb => Dialect::DuckDb,
        }
    }
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Pipe-separated rows with a header
    Table,
    /// The page as JSON
    Json,
}

/// Arguments of `generate`, gathered once parsed.
struct GenerateArgs {
    category: String,
    identifier: String,
    fields: Vec<String>,
    params: Vec<String>,
    page: u32,
    size: Option<u32>,
    database: Option<PathBuf>,
    format: OutputFormat,
    explain: bool,
    dialect: Option<DialectArg>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = match &cli.config {
        Some(path) => Settings::from_file(path),
        None => Settings::load(),
    };
    let settings = match settings {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let registry = ReportRegistry::with_defaults().with_lookahead(settings.reports.lookahead);

    match cli.command {
        Commands::List { category } => cmd_list(&registry, category),
        Commands::Describe {
            category,
            identifier,
        } => cmd_describe(&registry, &category, &identifier),
        Commands::Generate {
            category,
            identifier,
            fields,
            params,
            page,
            size,
            database,
            format,
            explain,
            dialect,
        } => cmd_generate(
            &settings,
            &registry,
            GenerateArgs {
                category,
                identifier,
                fields,
                params,
                page,
                size,
                database,
                format,
                explain,
                dialect,
            },
        ),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "reportgen=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_list(registry: &ReportRegistry, category: Option<String>) -> ExitCode {
    let categories: Vec<&str> = match &category {
        Some(c) => vec![c.as_str()],
        None => registry.categories(),
    };

    let mut found = false;
    for category in categories {
        let definitions = registry.definitions(category);
        if definitions.is_empty() {
            continue;
        }
        found = true;
        println!("{}:", category);
        for definition in definitions {
            println!(
                "  - {} ({}): {}",
                definition.identifier, definition.name, definition.description
            );
        }
    }

    if !found {
        println!("No reports defined.");
    }
    ExitCode::SUCCESS
}

fn cmd_describe(registry: &ReportRegistry, category: &str, identifier: &str) -> ExitCode {
    let spec = match registry.lookup(category, identifier) {
        Ok(spec) => spec,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let definition = spec.report_definition();

    println!("{} ({}/{})", definition.name, category, definition.identifier);
    println!("{}", definition.description);
    println!();

    println!("Fields:");
    for field in &definition.displayable_fields {
        let mandatory = if field.mandatory { " [mandatory]" } else { "" };
        println!("  - {} : {}{}", field.name, field.field_type, mandatory);
    }

    if !definition.query_parameters.is_empty() {
        println!();
        println!("Filters:");
        for parameter in &definition.query_parameters {
            println!(
                "  - {} : {} {}",
                parameter.name, parameter.field_type, parameter.operator
            );
        }
    }

    ExitCode::SUCCESS
}

fn cmd_generate(settings: &Settings, registry: &ReportRegistry, args: GenerateArgs) -> ExitCode {
    let spec = match registry.lookup(&args.category, &args.identifier) {
        Ok(spec) => spec,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let request = match build_request(spec, &args.fields, &args.params) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if args.explain {
        let dialect = args
            .dialect
            .map(Dialect::from)
            .unwrap_or(settings.database.dialect);
        return explain(settings, spec, &request, args.page, args.size, dialect);
    }

    let database = match args.database {
        Some(path) => Some(path),
        None => match settings.database.resolved_path() {
            Ok(path) => path,
            Err(e) => {
                eprintln!("Configuration error: {}", e);
                return ExitCode::FAILURE;
            }
        },
    };
    let Some(database) = database else {
        eprintln!("Error: no database given; pass --database or set [database] path");
        return ExitCode::FAILURE;
    };

    let executor = match SqliteExecutor::open(&database) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Error opening '{}': {}", database.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let service = match ReportService::from_settings(settings, Box::new(executor)) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match service.generate(&args.category, &args.identifier, &request, args.page, args.size) {
        Ok(page) => {
            match args.format {
                OutputFormat::Table => print_table(&page, args.page),
                OutputFormat::Json => match serde_json::to_string_pretty(&page) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Error encoding page: {}", e);
                        return ExitCode::FAILURE;
                    }
                },
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Report error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn explain(
    settings: &Settings,
    spec: &ReportSpecification,
    request: &ReportRequest,
    page: u32,
    size: Option<u32>,
    dialect: Dialect,
) -> ExitCode {
    let result = settings
        .reports
        .resolve_page_size(size)
        .and_then(|size| spec.explain(request, page, size, dialect));

    match result {
        Ok(explained) => {
            for query in explained {
                println!("-- {}", query.level);
                if !query.statement.params.is_empty() {
                    let params: Vec<String> =
                        query.statement.params.iter().map(describe_bound).collect();
                    println!("-- params: {}", params.join(", "));
                }
                println!("{}", query.statement.sql);
                println!();
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Report error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn describe_bound(value: &BoundValue) -> String {
    match value {
        BoundValue::Text(s) => format!("'{}'", s),
        other => other.to_string(),
    }
}

/// Build a request from CLI field names and NAME=VALUE filters.
///
/// Declared fields and filters keep their declared type and operator; any
/// other name is passed through as TEXT so validation can report it.
fn build_request(
    spec: &ReportSpecification,
    fields: &[String],
    params: &[String],
) -> Result<ReportRequest, String> {
    let definition = spec.report_definition();
    let mut request = ReportRequest::new();

    if fields.is_empty() {
        for field in &definition.displayable_fields {
            request = request.field(field.clone());
        }
    } else {
        for name in fields {
            let field = definition
                .field(name)
                .cloned()
                .unwrap_or_else(|| DisplayableField::new(name.as_str(), FieldType::Text));
            request = request.field(field);
        }
    }

    for raw in params {
        let (name, value) = raw
            .split_once('=')
            .ok_or_else(|| format!("filter '{}' is not NAME=VALUE", raw))?;
        let name = name.trim();
        let parameter = definition
            .parameter(name)
            .cloned()
            .unwrap_or_else(|| QueryParameter::new(name, FieldType::Text))
            .value(value);
        request = request.parameter(parameter);
    }

    Ok(request)
}

fn print_table(page: &ReportPage, page_index: u32) {
    println!("{}", page.name);
    println!("{}", page.header.column_names.join(" | "));
    for row in &page.rows {
        let cells: Vec<String> = row.values.iter().map(ToString::to_string).collect();
        println!("{}", cells.join(" | "));
    }
    println!();
    println!(
        "page {} | {} rows | more: {} | by {} at {}",
        page_index,
        page.rows.len(),
        page.has_more,
        page.generated_by,
        page.generated_on
    );
}
