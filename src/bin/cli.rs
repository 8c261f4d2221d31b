use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand};
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;

use memquery::io::json::records_from_path;
use memquery::{DataValue, ExportConfig, ExportOutcome, JoinType, QueryEngine, Record, SortDirection};

const HISTORY_FILE: &str = ".mq_history";

#[derive(Parser)]
#[command(author, version, about = "mq - query JSON records in memory")]
struct Cli {
    /// JSON file holding an array of objects
    #[arg(short, long)]
    data: PathBuf,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// CSV field delimiter
    #[arg(long, default_value_t = ',')]
    delimiter: char,

    /// Command to execute
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive shell
    Shell,

    /// Run a pipeline and print the result as JSON (or write CSV)
    Query {
        /// Comma-separated columns to keep
        #[arg(long)]
        select: Option<String>,

        /// Condition, e.g. "age > ? AND city = ?"
        #[arg(long = "where")]
        condition: Option<String>,

        /// Positional parameter for a `?` placeholder (repeatable)
        #[arg(long = "param")]
        params: Vec<String>,

        /// JSON file to join against
        #[arg(long)]
        join: Option<PathBuf>,

        #[arg(long, requires = "join")]
        local_key: Option<String>,

        #[arg(long, requires = "join")]
        foreign_key: Option<String>,

        /// inner or left
        #[arg(long, default_value = "inner")]
        join_type: String,

        /// Prefix for the joined columns
        #[arg(long)]
        alias: Option<String>,

        #[arg(long)]
        order_by: Option<String>,

        #[arg(long)]
        desc: bool,

        #[arg(long)]
        limit: Option<usize>,

        #[arg(long, default_value_t = 0)]
        offset: usize,

        /// Write CSV to this path instead of printing JSON
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Aggregate columns, e.g. --field amount:SUM
    Aggregate {
        #[arg(long = "field", required = true)]
        fields: Vec<String>,

        #[arg(long = "where")]
        condition: Option<String>,

        #[arg(long = "param")]
        params: Vec<String>,
    },

    /// Group records by a column and print the groups
    Group { column: String },

    /// Print one page of records
    Page { page: usize, per_page: usize },
}

fn parse_params(params: &[String]) -> Vec<DataValue> {
    params.iter().map(|p| DataValue::from_untyped(p.trim())).collect()
}

fn parse_field(spec: &str) -> Result<(String, String)> {
    let (column, function) = spec
        .split_once(':')
        .ok_or_else(|| anyhow!("Expected column:FUNCTION, got {:?}", spec))?;
    Ok((column.trim().to_string(), function.trim().to_string()))
}

fn split_columns(columns: &str) -> Vec<String> {
    columns.split(',').map(|c| c.trim().to_string()).collect()
}

/// A command typed into the interactive shell
#[derive(Debug, PartialEq)]
enum ShellCommand {
    Where { condition: String, params: Vec<DataValue> },
    Select(Vec<String>),
    Order { column: String, direction: SortDirection },
    Limit { count: usize, offset: usize },
    Join { path: PathBuf, local_key: String, operator: String, foreign_key: String, join_type: JoinType, alias: Option<String> },
    Group(String),
    Aggregate(Vec<(String, String)>),
    Page { page: usize, per_page: usize },
    Csv(PathBuf),
    Json,
    Show,
    Count,
    Reset,
    Help,
    Exit,
}

impl ShellCommand {
    fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let args: Vec<&str> = rest.split_whitespace().collect();

        let command = match word.to_lowercase().as_str() {
            "where" => {
                // where <condition> [| param, param ...]
                let (condition, params) = match rest.rsplit_once('|') {
                    Some((condition, params)) => (
                        condition.trim().to_string(),
                        params.split(',').map(|p| DataValue::from_untyped(p.trim())).collect(),
                    ),
                    None => (rest.to_string(), Vec::new()),
                };
                ShellCommand::Where { condition, params }
            }
            "select" => ShellCommand::Select(split_columns(rest)),
            "order" => match args.as_slice() {
                [column] => ShellCommand::Order { column: column.to_string(), direction: SortDirection::Asc },
                [column, direction] => ShellCommand::Order {
                    column: column.to_string(),
                    direction: SortDirection::parse(direction),
                },
                _ => bail!("Usage: order <column> [asc|desc]"),
            },
            "limit" => match args.as_slice() {
                [count] => ShellCommand::Limit { count: count.parse()?, offset: 0 },
                [count, offset] => ShellCommand::Limit { count: count.parse()?, offset: offset.parse()? },
                _ => bail!("Usage: limit <count> [offset]"),
            },
            "join" => match args.as_slice() {
                [path, local, op, foreign, extra @ ..] if extra.len() <= 2 => ShellCommand::Join {
                    path: PathBuf::from(*path),
                    local_key: local.to_string(),
                    operator: op.to_string(),
                    foreign_key: foreign.to_string(),
                    join_type: extra.first().map_or(JoinType::Inner, |t| JoinType::parse(t)),
                    alias: extra.get(1).map(|a| a.to_string()),
                },
                _ => bail!("Usage: join <file> <local_key> = <foreign_key> [inner|left] [alias]"),
            },
            "group" => match args.as_slice() {
                [column] => ShellCommand::Group(column.to_string()),
                _ => bail!("Usage: group <column>"),
            },
            "agg" => {
                if args.is_empty() {
                    bail!("Usage: agg <column:FUNCTION>...");
                }
                ShellCommand::Aggregate(args.iter().map(|a| parse_field(a)).collect::<Result<_>>()?)
            }
            "page" => match args.as_slice() {
                [page, per_page] => ShellCommand::Page { page: page.parse()?, per_page: per_page.parse()? },
                _ => bail!("Usage: page <page> <per_page>"),
            },
            "csv" => match args.as_slice() {
                [path] => ShellCommand::Csv(PathBuf::from(*path)),
                _ => bail!("Usage: csv <path>"),
            },
            "json" => ShellCommand::Json,
            "show" => ShellCommand::Show,
            "count" => ShellCommand::Count,
            "reset" => ShellCommand::Reset,
            "help" => ShellCommand::Help,
            "exit" | "quit" => ShellCommand::Exit,
            other => bail!("Unknown command: {}. Type 'help' for assistance.", other),
        };
        Ok(command)
    }
}

// Chainable engine calls consume the engine, so swap it out and back in.
fn chain(engine: &mut QueryEngine, step: impl FnOnce(QueryEngine) -> QueryEngine) {
    let current = std::mem::replace(engine, QueryEngine::new(Vec::new()));
    *engine = step(current);
}

/// Run one shell command. Returns `false` when the shell should exit.
fn run_command(engine: &mut QueryEngine, command: ShellCommand) -> Result<bool> {
    match command {
        ShellCommand::Where { condition, params } => {
            chain(engine, |e| e.filter(&condition, &params));
            println!("({} rows)", engine.len());
        }
        ShellCommand::Select(columns) => chain(engine, |e| e.select(&columns)),
        ShellCommand::Order { column, direction } => chain(engine, |e| e.order_by(&column, direction)),
        ShellCommand::Limit { count, offset } => {
            chain(engine, |e| e.limit(count, offset));
            println!("({} rows)", engine.len());
        }
        ShellCommand::Join { path, local_key, operator, foreign_key, join_type, alias } => {
            let other = records_from_path(&path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            chain(engine, |e| {
                e.join(&other, &local_key, &operator, &foreign_key, join_type, alias.as_deref())
            });
            println!("({} rows)", engine.len());
        }
        ShellCommand::Group(column) => {
            for group in engine.group_by(&column).iter() {
                println!("{}: {} rows", group.key, group.records.len());
            }
        }
        ShellCommand::Aggregate(fields) => {
            for (column, value) in engine.aggregate(&fields) {
                println!("{} = {}", column, value);
            }
        }
        ShellCommand::Page { page, per_page } => {
            let result = engine.paginate(page, per_page);
            display_records(&result.data);
            println!("page {} of {} ({} total)", page.max(1), result.pages, result.total);
        }
        ShellCommand::Csv(path) => match engine.try_export_csv(&path)? {
            ExportOutcome::Written { rows } => println!("Wrote {} rows to {}", rows, path.display()),
            ExportOutcome::SkippedEmpty => println!("Nothing to export"),
        },
        ShellCommand::Json => println!("{}", engine.to_json()?),
        ShellCommand::Show => display_records(engine.get()),
        ShellCommand::Count => println!("{}", engine.len()),
        ShellCommand::Reset => {
            chain(engine, QueryEngine::reset);
            println!("({} rows)", engine.len());
        }
        ShellCommand::Help => print_help(),
        ShellCommand::Exit => return Ok(false),
    }
    Ok(true)
}

fn run_shell(mut engine: QueryEngine) -> Result<()> {
    println!(
        "Loaded {} records. Type 'help' for assistance or 'exit' to quit.",
        engine.len()
    );

    let mut rl = Editor::<(), DefaultHistory>::new()?;
    if let Err(err) = rl.load_history(HISTORY_FILE) {
        if !err.to_string().contains("No such file or directory") {
            println!("Error loading history: {}", err);
        }
    }

    loop {
        match rl.readline("mq> ") {
            Ok(line) => {
                let _ = rl.add_history_entry(&line);
                if line.trim().is_empty() {
                    continue;
                }

                let keep_going = ShellCommand::parse(&line)
                    .and_then(|command| run_command(&mut engine, command));
                match keep_going {
                    Ok(true) => {}
                    Ok(false) => {
                        println!("Goodbye!");
                        break;
                    }
                    Err(err) => println!("Error: {}", err),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                println!("Error: {}", err);
                break;
            }
        }
    }

    if let Err(err) = rl.save_history(HISTORY_FILE) {
        println!("Error saving history: {}", err);
    }
    Ok(())
}

fn print_help() {
    println!("Pipeline commands (each applies to the current records):");
    println!("  where <condition> [| p1, p2]  - Keep matching records; ? binds p1, p2 ...");
    println!("  select <col>, <col> | *       - Keep only these columns");
    println!("  order <column> [asc|desc]     - Sort by a column");
    println!("  limit <count> [offset]        - Keep a slice of records");
    println!("  join <file> <local> = <foreign> [inner|left] [alias]");
    println!("                                - Join with records from a JSON file");
    println!("  reset                         - Go back to the loaded records");
    println!();
    println!("Results:");
    println!("  show | count | json           - Print the current records");
    println!("  group <column>                - Group sizes per value");
    println!("  agg <col:FUNC>...             - SUM, AVG, MIN, MAX or COUNT");
    println!("  page <page> <per_page>        - Print one page");
    println!("  csv <path>                    - Export as CSV");
    println!();
    println!("Other commands:");
    println!("  help                          - Display this help message");
    println!("  exit                          - Exit the shell");
}

/// Columns across all records, in first-seen order
fn collect_headers(records: &[Record]) -> Vec<String> {
    let mut headers: Vec<String> = Vec::new();
    for record in records {
        for column in record.columns() {
            if !headers.iter().any(|h| h == column) {
                headers.push(column.to_string());
            }
        }
    }
    headers
}

fn display_records(records: &[Record]) {
    let headers = collect_headers(records);

    let cells: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            headers
                .iter()
                .map(|h| record.get(h).map_or_else(String::new, |v| v.to_string()))
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.len().max(3)).collect();
    for row in &cells {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    print!("|");
    for (header, width) in headers.iter().zip(&widths) {
        print!(" {:<width$} |", header, width = width);
    }
    println!();

    print!("+");
    for width in &widths {
        print!("{:-<width$}+", "", width = width + 2);
    }
    println!();

    for row in &cells {
        print!("|");
        for (cell, width) in row.iter().zip(&widths) {
            print!(" {:<width$} |", cell, width = width);
        }
        println!();
    }

    println!("({} rows)", records.len());
}

#[allow(clippy::too_many_arguments)]
fn run_query(
    engine: QueryEngine,
    select: Option<String>,
    condition: Option<String>,
    params: Vec<String>,
    join: Option<(Vec<Record>, String, String, JoinType, Option<String>)>,
    order_by: Option<(String, SortDirection)>,
    limit: Option<(usize, usize)>,
    csv: Option<PathBuf>,
) -> Result<()> {
    let mut engine = engine;
    if let Some((other, local_key, foreign_key, join_type, alias)) = join {
        engine = engine.join(&other, &local_key, "=", &foreign_key, join_type, alias.as_deref());
    }
    if let Some(condition) = condition {
        engine = engine.filter(&condition, &parse_params(&params));
    }
    if let Some((column, direction)) = order_by {
        engine = engine.order_by(&column, direction);
    }
    if let Some((count, offset)) = limit {
        engine = engine.limit(count, offset);
    }
    if let Some(columns) = select {
        engine = engine.select(&split_columns(&columns));
    }

    match csv {
        Some(path) => match engine
            .try_export_csv(&path)
            .with_context(|| format!("Failed to write {}", path.display()))?
        {
            ExportOutcome::Written { rows } => eprintln!("Wrote {} rows to {}", rows, path.display()),
            ExportOutcome::SkippedEmpty => eprintln!("No records; nothing written"),
        },
        None => println!("{}", engine.to_json()?),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let delimiter = u8::try_from(cli.delimiter)
        .map_err(|_| anyhow!("CSV delimiter must be a single-byte character"))?;
    let config = ExportConfig::default()
        .with_pretty_json(cli.pretty)
        .with_delimiter(delimiter);

    let records = records_from_path(&cli.data)
        .with_context(|| format!("Failed to load {}", cli.data.display()))?;
    let engine = QueryEngine::new(records).with_config(config);

    match cli.command {
        Some(Commands::Shell) | None => run_shell(engine)?,
        Some(Commands::Query {
            select,
            condition,
            params,
            join,
            local_key,
            foreign_key,
            join_type,
            alias,
            order_by,
            desc,
            limit,
            offset,
            csv,
        }) => {
            let join = match join {
                Some(path) => {
                    let other = records_from_path(&path)
                        .with_context(|| format!("Failed to load {}", path.display()))?;
                    let local_key = local_key.ok_or_else(|| anyhow!("--join needs --local-key"))?;
                    let foreign_key = foreign_key.ok_or_else(|| anyhow!("--join needs --foreign-key"))?;
                    Some((other, local_key, foreign_key, JoinType::parse(&join_type), alias))
                }
                None => None,
            };
            let direction = if desc { SortDirection::Desc } else { SortDirection::Asc };
            run_query(
                engine,
                select,
                condition,
                params,
                join,
                order_by.map(|column| (column, direction)),
                limit.map(|count| (count, offset)),
                csv,
            )?;
        }
        Some(Commands::Aggregate { fields, condition, params }) => {
            let fields = fields.iter().map(|f| parse_field(f)).collect::<Result<Vec<_>>>()?;
            let engine = match condition {
                Some(condition) => engine.filter(&condition, &parse_params(&params)),
                None => engine,
            };
            let mut result = serde_json::Map::new();
            for (column, value) in engine.aggregate(&fields) {
                result.insert(column, serde_json::to_value(&value)?);
            }
            println!("{}", serde_json::Value::Object(result));
        }
        Some(Commands::Group { column }) => {
            for group in engine.group_by(&column).iter() {
                println!("{}: {} rows", group.key, group.records.len());
            }
        }
        Some(Commands::Page { page, per_page }) => {
            let result = engine.paginate(page, per_page);
            println!("{}", serde_json::to_string(&result)?);
        }
    }

    Ok(())
}
