use std::io::{self, Write};
use std::path::PathBuf;
use std::rc::Rc;

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::core::project::Project;
use crate::core::selection::{Filter, Selection, SortOrder};
use crate::core::task::{Priority, Task, TaskDraft, TaskPatch};
use crate::core::view::TaskView;
use crate::storage::file::FileStorage;
use crate::store::{StoreError, TaskManager};

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("no task matches id '{0}'")]
    UnknownTask(String),
    #[error("id '{input}' is ambiguous, candidates: {candidates}")]
    AmbiguousTask { input: String, candidates: String },
    #[error("no project named '{0}'")]
    UnknownProject(String),
}

#[derive(Parser, Debug)]
#[command(name = "taskflow", version, about = "A local-first task manager")]
pub struct Cli {
    /// Directory holding the task and project data files.
    #[arg(long, global = true, env = "TASKFLOW_DATA_DIR", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a task (the due date defaults to today)
    Add(AddArgs),
    /// Show the task panes for a filter (the default command)
    List(ListArgs),
    /// Change fields of an existing task
    Edit(EditArgs),
    /// Toggle a task between done and active
    Done {
        /// Task id, full or a unique prefix
        id: String,
    },
    /// Delete a task
    Rm {
        /// Task id, full or a unique prefix
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Manage projects
    Project {
        #[command(subcommand)]
        command: ProjectCommand,
    },
    /// Print aggregate task counters
    Stats,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    pub title: String,

    /// Longer description shown in the task list.
    #[arg(long)]
    pub desc: Option<String>,

    /// Due date (YYYY-MM-DD).
    #[arg(long, value_name = "DATE", conflicts_with = "no_due")]
    pub due: Option<NaiveDate>,

    /// Create the task without a due date.
    #[arg(long)]
    pub no_due: bool,

    /// One of: low, medium, high.
    #[arg(long)]
    pub priority: Option<Priority>,

    /// Project name to file the task under.
    #[arg(long)]
    pub project: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// One of: all, important, today, upcoming, finished.
    #[arg(long, default_value = "all")]
    pub filter: Filter,

    /// Restrict to a single project.
    #[arg(long)]
    pub project: Option<String>,

    /// Case-insensitive term matched against titles and descriptions.
    #[arg(long)]
    pub search: Option<String>,

    /// Priority order: low-to-high (default) or high-to-low.
    #[arg(long, default_value = "low-to-high")]
    pub sort: SortOrder,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Task id, full or a unique prefix.
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long, conflicts_with = "no_desc")]
    pub desc: Option<String>,

    /// Remove the description.
    #[arg(long)]
    pub no_desc: bool,

    #[arg(long, value_name = "DATE", conflicts_with = "no_due")]
    pub due: Option<NaiveDate>,

    /// Remove the due date.
    #[arg(long)]
    pub no_due: bool,

    #[arg(long, conflicts_with = "no_priority")]
    pub priority: Option<Priority>,

    /// Remove the priority.
    #[arg(long)]
    pub no_priority: bool,

    #[arg(long, conflicts_with = "no_project")]
    pub project: Option<String>,

    /// Unassign the task from its project.
    #[arg(long)]
    pub no_project: bool,
}

#[derive(Subcommand, Debug)]
pub enum ProjectCommand {
    /// Create a project
    Add { name: String },
    /// Delete a project and every task assigned to it
    Rm {
        name: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// List projects with their color tags
    List,
}

/// Opens the stores under the configured data directory and dispatches the
/// parsed command.
pub fn run(cli: Cli) -> Result<(), CliError> {
    let config = AppConfig::resolve(cli.data_dir);
    config.ensure_dir()?;
    let storage = Rc::new(FileStorage::new(&config.data_dir));
    let today = Local::now().date_naive();
    let mut manager = TaskManager::open(storage, today);

    match cli.command.unwrap_or_else(|| Command::List(ListArgs::default())) {
        Command::Add(args) => {
            let task = manager.add_task(build_draft(args, today))?;
            println!("Added task \"{}\" ({})", task.title, short_id(task.id));
        }
        Command::List(args) => {
            let selection = build_selection(args);
            let view = manager.view(&selection, today);
            print!(
                "{}",
                render_view(&view, selection.filter, manager.projects())
            );
        }
        Command::Edit(args) => {
            let id = resolve_id(&manager, &args.id)?;
            let task = manager.update_task(id, &build_patch(&args))?;
            println!("Updated task \"{}\"", task.title);
        }
        Command::Done { id } => {
            let id = resolve_id(&manager, &id)?;
            let task = manager.toggle_task(id)?;
            if task.completed {
                println!("Task \"{}\" marked as complete", task.title);
            } else {
                println!("Task \"{}\" moved back to active tasks", task.title);
            }
        }
        Command::Rm { id, yes } => {
            let id = resolve_id(&manager, &id)?;
            let title = manager
                .task(id)
                .map(|t| t.title.clone())
                .unwrap_or_default();
            if yes || confirm("Are you sure you want to delete this task?")? {
                manager.remove_task(id);
                println!("Deleted task \"{title}\"");
            }
        }
        Command::Project { command } => run_project(command, &mut manager)?,
        Command::Stats => {
            let stats = manager.stats(today);
            println!("Total tasks  {}", stats.total);
            println!("Completed    {}", stats.completed);
            println!("Pending      {}", stats.pending);
            println!("Due today    {}", stats.due_today);
        }
    }

    Ok(())
}

fn run_project(command: ProjectCommand, manager: &mut TaskManager) -> Result<(), CliError> {
    match command {
        ProjectCommand::Add { name } => {
            let project = manager.add_project(&name)?;
            println!("Added project \"{}\"", project.name);
        }
        ProjectCommand::Rm { name, yes } => {
            if manager.project(&name).is_none() {
                return Err(CliError::UnknownProject(name));
            }
            let prompt = format!("Delete project \"{name}\" and all its tasks?");
            if yes || confirm(&prompt)? {
                let removed = manager.remove_project(&name);
                let noun = if removed == 1 { "task" } else { "tasks" };
                println!("Deleted project \"{name}\" and {removed} {noun}");
            }
        }
        ProjectCommand::List => {
            for project in manager.projects() {
                println!("{} {}", colored_dot(&project.color), project.name);
            }
        }
    }
    Ok(())
}

fn build_draft(args: AddArgs, today: NaiveDate) -> TaskDraft {
    let mut draft = TaskDraft::new(args.title);
    draft.description = args.desc;
    draft.due_date = if args.no_due {
        None
    } else {
        Some(args.due.unwrap_or(today))
    };
    draft.priority = args.priority;
    draft.project = args.project;
    draft
}

fn build_selection(args: ListArgs) -> Selection {
    Selection {
        filter: args.filter,
        project: args.project,
        search: args.search,
        sort: args.sort,
    }
}

fn build_patch(args: &EditArgs) -> TaskPatch {
    let mut patch = TaskPatch::new();
    if let Some(title) = &args.title {
        patch = patch.title(title);
    }
    if args.no_desc {
        patch = patch.clear_description();
    } else if let Some(desc) = &args.desc {
        patch = patch.description(desc);
    }
    if args.no_due {
        patch = patch.clear_due_date();
    } else if let Some(due) = args.due {
        patch = patch.due_date(due);
    }
    if args.no_priority {
        patch = patch.clear_priority();
    } else if let Some(priority) = args.priority {
        patch = patch.priority(priority);
    }
    if args.no_project {
        patch = patch.clear_project();
    } else if let Some(project) = &args.project {
        patch = patch.project(project);
    }
    patch
}

/// Accepts a full UUID or a unique prefix of its hyphenated form.
fn resolve_id(manager: &TaskManager, input: &str) -> Result<Uuid, CliError> {
    if let Ok(id) = Uuid::parse_str(input) {
        return match manager.task(id) {
            Some(_) => Ok(id),
            None => Err(CliError::UnknownTask(input.to_string())),
        };
    }

    let needle = input.to_lowercase();
    let matches: Vec<&Task> = manager
        .tasks()
        .iter()
        .filter(|t| t.id.to_string().starts_with(&needle))
        .collect();
    match matches.as_slice() {
        [] => Err(CliError::UnknownTask(input.to_string())),
        [task] => Ok(task.id),
        several => Err(CliError::AmbiguousTask {
            input: input.to_string(),
            candidates: several
                .iter()
                .map(|t| format!("{} ({})", short_id(t.id), t.title))
                .collect::<Vec<_>>()
                .join(", "),
        }),
    }
}

fn render_view(view: &TaskView, filter: Filter, projects: &[Project]) -> String {
    let mut out = String::new();

    if filter == Filter::Finished {
        render_pane(&mut out, filter.title(), &view.today, projects);
        return out;
    }

    render_pane(&mut out, "Today", &view.today, projects);
    out.push('\n');
    render_pane(&mut out, "Upcoming", &view.upcoming, projects);
    out
}

fn render_pane(out: &mut String, heading: &str, tasks: &[Task], projects: &[Project]) {
    out.push_str(&format!("{heading} ({})\n", tasks.len()));
    if tasks.is_empty() {
        out.push_str("  (none)\n");
        return;
    }
    for task in tasks {
        out.push_str(&format!("  {}\n", task_line(task, projects)));
    }
}

fn task_line(task: &Task, projects: &[Project]) -> String {
    let mark = if task.completed { "x" } else { " " };
    let mut line = format!("[{mark}] {}  {}", short_id(task.id), task.title);
    if let Some(priority) = task.priority {
        line.push_str(&format!("  [{}]", priority.as_keyword()));
    }
    if let Some(due) = task.due_date {
        line.push_str(&format!("  due {due}"));
    }
    if let Some(name) = &task.project {
        let dot = projects
            .iter()
            .find(|p| p.name == *name)
            .map(|p| colored_dot(&p.color))
            .unwrap_or_else(|| "●".to_string());
        line.push_str(&format!("  {dot} {name}"));
    }
    line
}

fn short_id(id: Uuid) -> String {
    id.to_string()[..8].to_string()
}

fn confirm(prompt: &str) -> io::Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

/// Renders a 24-bit ANSI dot in the project's tag color, falling back to an
/// uncolored dot for malformed values.
fn colored_dot(hex: &str) -> String {
    match hex_to_rgb(hex) {
        Some((r, g, b)) => format!("\x1b[38;2;{r};{g};{b}m●\x1b[0m"),
        None => "●".to_string(),
    }
}

fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}
