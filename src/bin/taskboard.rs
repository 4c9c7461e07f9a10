//! Command-line front end for the task board.
//!
//! Usage:
//!
//! ```text
//! taskboard board [--assignee <id>] [--search <text>]
//! taskboard create "Write report" --assignee emp-1 --priority high
//! taskboard move <task-id> forward
//! taskboard drop '{"taskId":"t1","sourceStatus":"pending"}' completed
//! taskboard delete <task-id> --yes
//! ```
//!
//! The backend and its settings come from `TASKBOARD_*` environment
//! variables; see [`taskboard::config`].

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use eyre::{Result, eyre};
use mockable::{Clock, DefaultClock};
use std::io::{self, Write};
use std::sync::Arc;
use taskboard::config::{BackendKind, BoardConfig};
use taskboard::task::{
    adapters::{
        http::{ApiClient, HttpEmployeeDirectory, HttpTaskRepository},
        memory::{InMemoryEmployeeDirectory, InMemoryTaskRepository},
    },
    domain::{EmployeeId, MoveDirection, TaskId, TaskPriority, TaskStatus},
    ports::{EmployeeDirectory, TaskRepository},
    services::{
        BoardLayout, CreateTaskRequest, LayoutOptions, SyncState, TaskBoardError,
        TaskBoardService, TaskCard, TaskFilter,
    },
};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "taskboard")]
#[command(about = "Kanban board for employee tasks", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render the board lanes
    Board {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// List tasks one per line
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Create a task in the "To Do" lane
    Create {
        /// Task title
        title: String,
        /// Assigned employee id
        #[arg(short, long)]
        assignee: Option<String>,
        /// Longer description
        #[arg(short, long)]
        description: Option<String>,
        /// Priority: low, medium, high, urgent
        #[arg(short, long, value_parser = parse_priority)]
        priority: Option<TaskPriority>,
        /// Due date as YYYY-MM-DD
        #[arg(long, value_parser = parse_due_date)]
        due: Option<NaiveDate>,
        /// Label, repeatable
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },
    /// Step a task one lane forward or back
    Move {
        /// Task id
        id: String,
        /// Direction: forward or back
        #[arg(value_parser = parse_direction)]
        direction: MoveDirection,
    },
    /// Set a task's status directly
    SetStatus {
        /// Task id
        id: String,
        /// Target status
        #[arg(value_parser = parse_status)]
        status: TaskStatus,
    },
    /// Drop a dragged card payload on a lane
    Drop {
        /// Move-intent JSON, e.g. {"taskId":"t1","sourceStatus":"pending"}
        payload: String,
        /// Target lane status
        #[arg(value_parser = parse_status)]
        lane: TaskStatus,
    },
    /// Approve a task waiting for approval
    Approve {
        /// Task id
        id: String,
    },
    /// Reject a task waiting for approval
    Reject {
        /// Task id
        id: String,
    },
    /// Delete a task
    Delete {
        /// Task id
        id: String,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Args)]
struct FilterArgs {
    /// Only show tasks assigned to this employee id
    #[arg(long)]
    assignee: Option<String>,
    /// Case-insensitive text search over title and description
    #[arg(long, default_value = "")]
    search: String,
}

impl FilterArgs {
    fn to_filter(&self) -> Result<TaskFilter> {
        let filter = TaskFilter::new().with_search(self.search.as_str());
        match self.assignee.as_deref() {
            Some(raw) => Ok(filter.with_assignee(EmployeeId::new(raw)?)),
            None => Ok(filter),
        }
    }
}

fn parse_status(raw: &str) -> Result<TaskStatus, String> {
    TaskStatus::try_from(raw).map_err(|err| err.to_string())
}

fn parse_priority(raw: &str) -> Result<TaskPriority, String> {
    TaskPriority::try_from(raw).map_err(|err| err.to_string())
}

fn parse_direction(raw: &str) -> Result<MoveDirection, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "forward" => Ok(MoveDirection::Forward),
        "back" => Ok(MoveDirection::Back),
        other => Err(format!("unknown direction '{other}', expected forward or back")),
    }
}

fn parse_due_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|err| err.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "taskboard=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let config = BoardConfig::from_env()?;
    info!(backend = ?config.backend, session = ?config.session, "loaded configuration");

    let clock = Arc::new(DefaultClock);
    match config.backend {
        BackendKind::Memory => {
            let service = TaskBoardService::new(
                Arc::new(InMemoryTaskRepository::new()),
                Arc::new(InMemoryEmployeeDirectory::new()),
                clock,
            )
            .with_failure_policy(config.sync_failure);
            run(&service, cli.command, &config).await
        }
        BackendKind::Http => {
            let client = ApiClient::new(&config.api_url, config.session.clone(), config.timeout)?;
            let service = TaskBoardService::new(
                Arc::new(HttpTaskRepository::with_clock(
                    client.clone(),
                    Arc::clone(&clock),
                )),
                Arc::new(HttpEmployeeDirectory::new(client)),
                clock,
            )
            .with_failure_policy(config.sync_failure);
            run(&service, cli.command, &config).await
        }
    }
}

async fn run<R, D, C>(
    service: &TaskBoardService<R, D, C>,
    command: Command,
    config: &BoardConfig,
) -> Result<()>
where
    R: TaskRepository,
    D: EmployeeDirectory,
    C: Clock + Send + Sync,
{
    service.refresh().await.map_err(report)?;
    let mut out = io::stdout();

    match command {
        Command::Board { filter } => {
            let options = LayoutOptions::new(service.clock().utc())
                .with_preview_chars(config.preview_chars);
            let snapshot = service.snapshot().map_err(report)?;
            let layout = BoardLayout::build(&snapshot, &filter.to_filter()?, &options);
            render_board(&mut out, &layout)?;
        }
        Command::List { filter } => {
            let task_filter = filter.to_filter()?;
            for task in service.list_tasks().map_err(report)? {
                if task_filter.matches(&task) {
                    writeln!(
                        out,
                        "{}\t{}\t{}\t{}",
                        task.id(),
                        task.status(),
                        task.priority(),
                        task.title()
                    )?;
                }
            }
        }
        Command::Create {
            title,
            assignee,
            description,
            priority,
            due,
            tags,
        } => {
            let mut request = CreateTaskRequest::new(title, assignee).with_tags(tags);
            if let Some(text) = description {
                request = request.with_description(text);
            }
            if let Some(level) = priority {
                request = request.with_priority(level);
            }
            if let Some(date) = due {
                let midnight = date
                    .and_hms_opt(0, 0, 0)
                    .ok_or_else(|| eyre!("invalid due date {date}"))?;
                request = request.with_due_date(midnight.and_utc());
            }
            let task = service.create_task(request).await.map_err(report)?;
            writeln!(out, "created {} in {}", task.id(), task.status().label())?;
        }
        Command::Move { id, direction } => {
            let task = service
                .move_task(&TaskId::new(id)?, direction)
                .await
                .map_err(report)?;
            writeln!(out, "{} is now {}", task.id(), task.status().label())?;
        }
        Command::SetStatus { id, status } => {
            let task = service
                .set_status(&TaskId::new(id)?, status)
                .await
                .map_err(report)?;
            writeln!(out, "{} is now {}", task.id(), task.status().label())?;
        }
        Command::Drop { payload, lane } => {
            match service.drop_on_lane(&payload, lane).await.map_err(report)? {
                Some(task) => writeln!(out, "{} is now {}", task.id(), task.status().label())?,
                None => writeln!(out, "dropped on its own lane, nothing to do")?,
            }
        }
        Command::Approve { id } => {
            let task = service.approve(&TaskId::new(id)?).await.map_err(report)?;
            writeln!(out, "{} approved", task.id())?;
        }
        Command::Reject { id } => {
            let task = service.reject(&TaskId::new(id)?).await.map_err(report)?;
            writeln!(out, "{} sent back to {}", task.id(), task.status().label())?;
        }
        Command::Delete { id, yes } => {
            let pending = service.request_delete(&TaskId::new(id)?).map_err(report)?;
            if yes {
                let task_id = pending.task_id().clone();
                service.confirm_delete(pending).await.map_err(report)?;
                writeln!(out, "deleted {task_id}")?;
            } else {
                writeln!(
                    out,
                    "Delete \"{}\"? Re-run with --yes to confirm.",
                    pending.title()
                )?;
                service.cancel_delete(pending);
            }
        }
    }
    Ok(())
}

fn report(err: TaskBoardError) -> eyre::Report {
    let message = err.user_message();
    eyre::Report::new(err).wrap_err(message)
}

fn render_board(out: &mut impl Write, layout: &BoardLayout) -> Result<()> {
    for lane in &layout.lanes {
        writeln!(out, "== {} ({}) ==", lane.label, lane.count)?;
        for card in &lane.cards {
            render_card(out, card)?;
        }
        if lane.accepts_create {
            writeln!(out, "  + Add task")?;
        }
        writeln!(out)?;
    }
    writeln!(out, "{}", layout.summary.showing_line())?;
    let counts: Vec<String> = layout
        .summary
        .per_status
        .iter()
        .map(|(status, count)| format!("{}: {count}", status.label()))
        .collect();
    writeln!(out, "{}", counts.join(" | "))?;
    writeln!(out, "Overdue: {}", layout.summary.overdue)?;
    Ok(())
}

fn render_card(out: &mut impl Write, card: &TaskCard) -> Result<()> {
    let sync = match &card.sync {
        SyncState::Confirmed => String::new(),
        SyncState::Pending => " [saving]".to_owned(),
        SyncState::Failed { message } => format!(" [not saved: {message}]"),
    };
    writeln!(
        out,
        "  [{}] {} ({}, {} {}){sync}",
        card.id, card.title, card.priority, card.assignee.initial, card.assignee.name
    )?;
    if let Some(preview) = &card.description {
        writeln!(out, "      {}", preview.text)?;
    }
    if let Some(due) = card.due {
        let marker = if due.overdue { " OVERDUE" } else { "" };
        writeln!(out, "      due {}{marker}", due.due.date_naive())?;
    }
    if !card.tags.is_empty() {
        writeln!(out, "      #{}", card.tags.join(" #"))?;
    }
    Ok(())
}
