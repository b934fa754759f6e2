//! CLI command implementations
//!
//! `query` and `explain` run one compile-and-fetch cycle per invocation:
//! load config, load schema, compile the request's filters, build the
//! keyset page query, then execute it (`query`) or render it (`explain`).
//! `seed` is a standalone maintenance tool and never runs as part of a query.

use std::path::Path;

use chrono::Duration;
use rand::Rng;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::config::Config;
use crate::filter::{FilterCompiler, FilterInput, SkippedFilter};
use crate::observability::{log_event, Event, Logger, Severity};
use crate::pagination::{Cursor, KeysetPaginator};
use crate::query::{Query, Row, SortDirection, SqlRenderer};
use crate::schema::{ColumnRegistry, TableSchema, TypedValue};
use crate::store::MemoryTable;
use crate::temporal::ZonedInstant;

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{read_request, write_error, write_response};

/// Request read by `query` and `explain`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryRequest {
    /// Filters, applied in order
    #[serde(default)]
    pub filters: Vec<FilterInput>,

    /// Continuation token from the previous page
    #[serde(default)]
    pub cursor: Option<String>,

    /// "asc" (default) or "desc"
    #[serde(default)]
    pub direction: Option<String>,
}

/// Filters compiled into a page query, not yet executed
struct RequestPlan {
    query: Query,
    paginator: KeysetPaginator,
    cursor: Option<Cursor>,
    skipped: Vec<SkippedFilter>,
}

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    let (name, result) = match cmd {
        Command::Seed {
            rows,
            out,
            tie_groups,
        } => ("seed", seed(rows, &out, tie_groups)),
        Command::Query { config } => ("query", query(&config)),
        Command::Explain { config } => ("explain", explain(&config)),
    };

    if let Err(err) = &result {
        log_event(
            Severity::Error,
            Event::CommandFailed,
            &[("code", err.code_str()), ("command", name)],
        );
    }
    result
}

/// Write fixture rows for the built-in `user` table
pub fn seed(rows: usize, out: &Path, tie_groups: Option<usize>) -> CliResult<()> {
    if out.exists() {
        return Err(CliError::already_exists(out.display()));
    }

    let table = seed_table(rows, tie_groups, ZonedInstant::now())?;
    table.save_file(out)?;

    log_event(
        Severity::Info,
        Event::FixturesSeeded,
        &[
            ("path", out.display().to_string().as_str()),
            ("rows", rows.to_string().as_str()),
        ],
    );

    write_response(json!({
        "rows": rows,
        "path": out.display().to_string(),
    }))
}

/// Builds `rows` users named `User1..UserN` with increasing `created_at`.
///
/// Without tie groups each row is one minute after the previous, plus
/// sub-minute jitter. With `tie_groups = k`, every k consecutive rows share
/// one timestamp.
pub fn seed_table(rows: usize, tie_groups: Option<usize>, start: ZonedInstant) -> CliResult<MemoryTable> {
    if tie_groups == Some(0) {
        return Err(CliError::invalid_request("--tie-groups must be at least 1"));
    }

    let registry = ColumnRegistry::from_schema(&TableSchema::users())?;
    let mut table = MemoryTable::new(registry);
    let mut rng = rand::thread_rng();

    for i in 0..rows {
        let offset = match tie_groups {
            Some(k) => Duration::minutes((i / k) as i64),
            None => Duration::minutes(i as i64) + Duration::milliseconds(rng.gen_range(0..60_000)),
        };
        let created_at = start
            .checked_add(offset)
            .ok_or_else(|| CliError::invalid_request("timestamp overflow while seeding"))?;

        table.insert(
            Row::new()
                .with("id", TypedValue::Identifier(Uuid::new_v4()))
                .with("name", TypedValue::Text(format!("User{}", i + 1)))
                .with("created_at", TypedValue::DateTimeTz(created_at)),
        )?;
    }
    Ok(table)
}

/// Execute a single query request from stdin and print one page
pub fn query(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;
    let request: QueryRequest = read_request()?;
    respond(execute_query(&config, &request))
}

/// Print the SQL for a query request from stdin
pub fn explain(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;
    let request: QueryRequest = read_request()?;
    respond(explain_query(&config, &request))
}

/// Compiles, fetches and serializes one page
pub fn execute_query(config: &Config, request: &QueryRequest) -> CliResult<Value> {
    let registry = load_registry(config)?;
    let codec = config.timestamp_codec();
    let table = MemoryTable::load_file(config.require_data_path()?, registry, codec)?;

    let plan = plan_request(config, table.registry(), request)?;
    let page = plan
        .paginator
        .fetch_page(&table, &plan.query, plan.cursor.as_ref())?;

    let cursor_codec = config.cursor_codec();
    Ok(json!({
        "rows": page.rows.iter().map(|r| r.to_json(&codec)).collect::<Vec<_>>(),
        "next_cursor": page.next.map(|c| cursor_codec.encode(&c)),
        "skipped": skipped_json(&plan.skipped),
    }))
}

/// Compiles one page query and renders it for the configured dialect
pub fn explain_query(config: &Config, request: &QueryRequest) -> CliResult<Value> {
    let registry = load_registry(config)?;
    let codec = config.timestamp_codec();

    let plan = plan_request(config, &registry, request)?;
    let query = plan.paginator.page_query(plan.query, plan.cursor.as_ref());
    let statement = SqlRenderer::new(config.dialect).render(&query);

    Ok(json!({
        "dialect": config.dialect.as_str(),
        "sql": statement.sql,
        "params": statement.params.iter().map(|p| p.to_json(&codec)).collect::<Vec<_>>(),
        "skipped": skipped_json(&plan.skipped),
    }))
}

fn load_config(config_path: &Path) -> CliResult<Config> {
    let config = Config::load(config_path)?;
    Logger::set_min_severity(config.log_severity()?);
    log_event(
        Severity::Info,
        Event::ConfigLoaded,
        &[("path", config_path.display().to_string().as_str())],
    );
    Ok(config)
}

fn load_registry(config: &Config) -> CliResult<ColumnRegistry> {
    let registry = config.load_registry()?;
    log_event(
        Severity::Info,
        Event::SchemaLoaded,
        &[
            ("columns", registry.len().to_string().as_str()),
            ("table", registry.table()),
        ],
    );
    Ok(registry)
}

fn plan_request(
    config: &Config,
    registry: &ColumnRegistry,
    request: &QueryRequest,
) -> CliResult<RequestPlan> {
    let paginator = KeysetPaginator::new(
        &config.sort_column,
        &config.tie_break_column,
        config.page_size,
    )?
    .with_direction(parse_direction(request.direction.as_deref())?);
    paginator.validate_against(registry)?;

    let cursor = request
        .cursor
        .as_deref()
        .map(|token| config.cursor_codec().decode(token))
        .transpose()?;

    let report = FilterCompiler::with_codec(registry, config.timestamp_codec())
        .compile_with_report(Query::new(registry.table()), &request.filters)?;

    Ok(RequestPlan {
        query: report.query,
        paginator,
        cursor,
        skipped: report.skipped,
    })
}

fn parse_direction(direction: Option<&str>) -> CliResult<SortDirection> {
    match direction.map(|d| d.to_ascii_lowercase()).as_deref() {
        None | Some("asc") => Ok(SortDirection::Asc),
        Some("desc") => Ok(SortDirection::Desc),
        Some(other) => Err(CliError::invalid_request(format!(
            "direction must be 'asc' or 'desc', got '{}'",
            other
        ))),
    }
}

fn skipped_json(skipped: &[SkippedFilter]) -> Value {
    Value::Array(
        skipped
            .iter()
            .map(|s| json!({
                    "field": s.filter.field,
                    "operator": s.filter.operator.as_str(),
                    "reason": s.reason.code(),
                }))
            .collect(),
    )
}

/// Writes the result; request errors also go to stdout as an error response
fn respond(result: CliResult<Value>) -> CliResult<()> {
    match result {
        Ok(data) => write_response(data),
        Err(err) if err.code().is_request_error() => {
            write_error(err.code_str(), err.message())?;
            Err(err)
        }
        Err(err) => Err(err),
    }
}
