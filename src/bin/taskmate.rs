//! Command-line front end for the taskmate task tracker.
//!
//! Usage:
//!
//! ```text
//! taskmate [--json] <command> [arguments]
//! ```
//!
//! Commands are `add`, `list`, `show`, `update`, `complete`, `delete`,
//! `filter` and `stats`. Tasks are addressed by their full identifier or any
//! unique prefix of it, such as the eight-character short form printed by
//! `list`.
//!
//! The store is configured through `TASKMATE_DATABASE_URL` (or
//! `DATABASE_URL`) and `TASKMATE_POOL_SIZE`. Logs go to stderr and honour
//! `RUST_LOG`.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use mockable::DefaultClock;
use serde::Serialize;
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;
use taskmate::config::{ConfigError, StoreConfig};
use taskmate::task::{
    adapters::postgres::{PostgresTaskRepository, connect},
    domain::{
        Task, TaskDescription, ValidationError,
        validation::{validate_due_date, validate_priority, validate_status},
    },
    ports::TaskRepositoryError,
    services::{
        AddTaskRequest, DueDateFilter, SortOrder, TaskFilter, TaskManager, TaskManagerError,
        TaskStatistics, UpdateTaskRequest,
    },
};
use thiserror::Error;
use tracing::{debug, error};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};


const DEFAULT_LOG_FILTER: &str = "taskmate=info";

type Manager = TaskManager<PostgresTaskRepository, DefaultClock>;

/// Track personal tasks from the terminal.
#[derive(Debug, Parser)]
#[command(name = "taskmate", version, about)]
struct Cli {
    /// Print results as JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create a task.
    Add(AddArgs),
    /// List every task.
    List {
        /// Sort preset: due_date_asc, due_date_desc, priority_high,
        /// priority_low, created_asc, created_desc, status or status_desc.
        #[arg(long)]
        sort: Option<SortOrder>,
    },
    /// Show one task in full.
    Show {
        /// Full identifier or unique prefix.
        query: String,
    },
    /// Change some fields of a task.
    Update {
        /// Full identifier or unique prefix.
        query: String,
        #[command(flatten)]
        changes: UpdateArgs,
    },
    /// Mark a task as completed.
    Complete {
        /// Full identifier or unique prefix.
        query: String,
    },
    /// Delete a task permanently.
    Delete {
        /// Full identifier or unique prefix.
        query: String,
    },
    /// List tasks matching every supplied criterion.
    Filter(FilterArgs),
    /// Summarize tasks by status, priority and due date.
    Stats,
}

#[derive(Debug, Args)]
struct AddArgs {
    /// Task title, 1 to 100 characters.
    title: String,
    /// LOW, MEDIUM or HIGH.
    #[arg(short, long)]
    priority: String,
    /// Free-form description, up to 500 characters.
    #[arg(short, long)]
    description: Option<String>,
    /// Due date as YYYY-MM-DD.
    #[arg(long, value_name = "YYYY-MM-DD")]
    due: Option<String>,
    /// Initial status; defaults to PENDING.
    #[arg(short, long)]
    status: Option<String>,
}

impl AddArgs {
    fn into_request(self) -> AddTaskRequest {
        let Self {
            title,
            priority,
            description,
            due,
            status,
        } = self;
        let mut request = AddTaskRequest::new(title, priority);
        if let Some(text) = description {
            request = request.with_description(text);
        }
        if let Some(date) = due {
            request = request.with_due_date(date);
        }
        if let Some(initial) = status {
            request = request.with_status(initial);
        }
        request
    }
}

#[derive(Debug, Args)]
struct UpdateArgs {
    /// New title.
    #[arg(short, long)]
    title: Option<String>,
    /// New description.
    #[arg(short, long, conflicts_with = "clear_description")]
    description: Option<String>,
    /// Remove the description.
    #[arg(long)]
    clear_description: bool,
    /// New due date as YYYY-MM-DD.
    #[arg(long, value_name = "YYYY-MM-DD", conflicts_with = "clear_due")]
    due: Option<String>,
    /// Remove the due date.
    #[arg(long)]
    clear_due: bool,
    /// New priority.
    #[arg(short, long)]
    priority: Option<String>,
    /// New status.
    #[arg(short, long)]
    status: Option<String>,
}

impl UpdateArgs {
    fn into_request(self) -> UpdateTaskRequest {
        let Self {
            title,
            description,
            clear_description,
            due,
            clear_due,
            priority,
            status,
        } = self;
        let mut request = UpdateTaskRequest::new();
        if let Some(text) = title {
            request = request.with_title(text);
        }
        if let Some(text) = description {
            request = request.with_description(text);
        }
        if clear_description {
            request = request.clear_description();
        }
        if let Some(date) = due {
            request = request.with_due_date(date);
        }
        if clear_due {
            request = request.clear_due_date();
        }
        if let Some(level) = priority {
            request = request.with_priority(level);
        }
        if let Some(state) = status {
            request = request.with_status(state);
        }
        request
    }
}

#[derive(Debug, Args)]
struct FilterArgs {
    /// Required status.
    #[arg(short, long)]
    status: Option<String>,
    /// Required priority.
    #[arg(short, long)]
    priority: Option<String>,
    /// Due strictly before this date.
    #[arg(long, value_name = "YYYY-MM-DD", conflicts_with_all = ["after", "on"])]
    before: Option<String>,
    /// Due strictly after this date.
    #[arg(long, value_name = "YYYY-MM-DD", conflicts_with = "on")]
    after: Option<String>,
    /// Due on this date.
    #[arg(long, value_name = "YYYY-MM-DD")]
    on: Option<String>,
}

impl FilterArgs {
    fn to_filter(&self) -> Result<TaskFilter, ValidationError> {
        let mut filter = TaskFilter::new();
        if let Some(status) = self.status.as_deref() {
            filter = filter.with_status(validate_status(status)?);
        }
        if let Some(priority) = self.priority.as_deref() {
            filter = filter.with_priority(validate_priority(priority)?);
        }
        if let Some(due) = self.due_date_filter()? {
            filter = filter.with_due_date(due);
        }
        Ok(filter)
    }

    fn due_date_filter(&self) -> Result<Option<DueDateFilter>, ValidationError> {
        let predicates: [(Option<&str>, fn(NaiveDate) -> DueDateFilter); 3] = [
            (self.before.as_deref(), DueDateFilter::Before),
            (self.after.as_deref(), DueDateFilter::After),
            (self.on.as_deref(), DueDateFilter::On),
        ];
        predicates
            .into_iter()
            .find_map(|(raw, build)| raw.map(|value| validate_due_date(value).map(build)))
            .transpose()
    }
}

/// Errors surfaced to the user by the CLI.
#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("task store unavailable: {0}")]
    Store(#[from] TaskRepositoryError),
    #[error(transparent)]
    Task(#[from] TaskManagerError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
    #[error("runtime init failed: {0}")]
    RuntimeInit(#[source] io::Error),
}

/// Result of a command, ready to be rendered.
#[derive(Debug)]
enum Outcome {
    Created(Task),
    Updated(Task),
    Completed(Task),
    Deleted(Task),
    Shown(Task),
    Listed(Vec<Task>),
    Stats(TaskStatistics),
}

impl Outcome {
    fn render<W: Write>(&self, out: &mut W, json: bool) -> Result<(), CliError> {
        if json {
            return self.render_json(out);
        }
        match self {
            Self::Created(task) => write_headline(out, "Created", task)?,
            Self::Updated(task) => write_headline(out, "Updated", task)?,
            Self::Completed(task) => write_headline(out, "Completed", task)?,
            Self::Deleted(task) => write_headline(out, "Deleted", task)?,
            Self::Shown(task) => write_details(out, task)?,
            Self::Listed(tasks) => write_table(out, tasks)?,
            Self::Stats(stats) => write_statistics(out, stats)?,
        }
        Ok(())
    }

    fn render_json<W: Write>(&self, out: &mut W) -> Result<(), CliError> {
        match self {
            Self::Created(task)
            | Self::Updated(task)
            | Self::Completed(task)
            | Self::Deleted(task)
            | Self::Shown(task) => write_json(out, task),
            Self::Listed(tasks) => write_json(out, tasks),
            Self::Stats(stats) => write_json(out, stats),
        }
    }
}

fn main() -> io::Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();
    let Err(err) = run(cli) else {
        return Ok(ExitCode::SUCCESS);
    };
    error!(error = %err, "command failed");
    report(&mut io::stderr().lock(), &err)?;
    Ok(ExitCode::FAILURE)
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CliError::RuntimeInit)?;
    let Cli { json, command } = cli;
    let outcome = runtime.block_on(async {
        let manager = open_manager().await?;
        execute(&manager, command).await
    })?;
    outcome.render(&mut io::stdout().lock(), json)
}

async fn open_manager() -> Result<Manager, CliError> {
    let config = StoreConfig::from_env()?;
    let pool = connect(&config)?;
    let repository = PostgresTaskRepository::new(pool);
    repository.apply_schema().await?;
    debug!(pool_size = config.pool_size(), "task store ready");
    Ok(TaskManager::new(Arc::new(repository), Arc::new(DefaultClock)))
}

async fn execute(manager: &Manager, command: Command) -> Result<Outcome, CliError> {
    let outcome = match command {
        Command::Add(args) => Outcome::Created(manager.add_task(args.into_request()).await?),
        Command::List { sort } => Outcome::Listed(manager.list_tasks(sort).await?),
        Command::Show { query } => Outcome::Shown(manager.get_task(&query).await?),
        Command::Update { query, changes } => {
            Outcome::Updated(manager.update_task(&query, changes.into_request()).await?)
        }
        Command::Complete { query } => Outcome::Completed(manager.complete_task(&query).await?),
        Command::Delete { query } => Outcome::Deleted(manager.delete_task(&query).await?),
        Command::Filter(args) => {
            let filter = args.to_filter()?;
            Outcome::Listed(manager.filter_tasks(&filter).await?)
        }
        Command::Stats => Outcome::Stats(manager.statistics().await?),
    };
    Ok(outcome)
}

fn report<W: Write>(out: &mut W, err: &CliError) -> io::Result<()> {
    writeln!(out, "error: {err}")?;
    if let CliError::Task(TaskManagerError::AmbiguousMatch { matches, .. }) = err {
        writeln!(out, "candidates:")?;
        for task in matches {
            writeln!(out, "  {}  {}", task.id().short(), task.title())?;
        }
    }
    Ok(())
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn write_headline<W: Write>(out: &mut W, verb: &str, task: &Task) -> io::Result<()> {
    writeln!(out, "{verb} task {}: {}", task.id().short(), task.title())
}

fn write_table<W: Write>(out: &mut W, tasks: &[Task]) -> io::Result<()> {
    if tasks.is_empty() {
        return writeln!(out, "No tasks found.");
    }
    writeln!(
        out,
        "{:<8}  {:<11}  {:<6}  {:<10}  TITLE",
        "ID", "STATUS", "PRIO", "DUE"
    )?;
    for task in tasks {
        writeln!(
            out,
            "{:<8}  {:<11}  {:<6}  {:<10}  {}",
            task.id().short(),
            task.status().as_str(),
            task.priority().as_str(),
            format_due(task),
            task.title()
        )?;
    }
    Ok(())
}

fn write_details<W: Write>(out: &mut W, task: &Task) -> io::Result<()> {
    writeln!(out, "ID:          {}", task.id())?;
    writeln!(out, "Title:       {}", task.title())?;
    writeln!(
        out,
        "Description: {}",
        task.description().map_or("-", TaskDescription::as_str)
    )?;
    writeln!(out, "Due:         {}", format_due(task))?;
    writeln!(out, "Priority:    {}", task.priority())?;
    writeln!(out, "Status:      {}", task.status())?;
    writeln!(out, "Created:     {}", task.created_at().to_rfc3339())?;
    writeln!(out, "Updated:     {}", task.updated_at().to_rfc3339())
}

fn write_statistics<W: Write>(out: &mut W, stats: &TaskStatistics) -> io::Result<()> {
    writeln!(out, "Total:        {}", stats.total)?;
    writeln!(out, "Pending:      {}", stats.by_status.pending)?;
    writeln!(out, "In progress:  {}", stats.by_status.in_progress)?;
    writeln!(out, "Completed:    {}", stats.by_status.completed)?;
    writeln!(out, "High:         {}", stats.by_priority.high)?;
    writeln!(out, "Medium:       {}", stats.by_priority.medium)?;
    writeln!(out, "Low:          {}", stats.by_priority.low)?;
    writeln!(out, "Overdue:      {}", stats.overdue)?;
    writeln!(out, "Due soon:     {}", stats.due_soon)
}

fn format_due(task: &Task) -> String {
    task.due_date()
        .map_or_else(|| "-".to_owned(), |date| date.to_string())
}
