use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;

mod config;
mod display;
mod menu;
mod prompt;
mod session;
mod state;

use crate::config::{init_config, load_config, show_config};
use crate::display::render_task_list;
use crate::menu::{collect_task, print_plan, run_menu, AddArgs};
use crate::session::Session;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("FORTNIGHT_BUILD_SHA"),
    ")"
);

#[derive(Parser, Debug)]
#[command(
    name = "fortnight",
    version,
    long_version = LONG_VERSION,
    about = "Deadline-aware two-week task planner"
)]
struct Cli {
    /// Task file to use instead of the configured one
    #[arg(long, global = true)]
    tasks_file: Option<PathBuf>,

    /// Log engine decisions (placements, evictions) to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive loop: show the plan, then add/delete/quit (default)
    Menu,

    /// Print the two-week schedule and the ranked task list
    Show {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print the ranked task list only
    List,

    /// Add a task; missing fields are prompted for
    Add(AddArgs),

    /// Delete the N-th task of the ranked list
    Delete {
        /// 1-based position as printed by `list`
        number: usize,
    },

    /// Configuration file helpers
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config.toml if none exists
    Init,

    /// Print the effective configuration
    Show,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "error" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cfg = load_config()?;
    let tasks_path = cfg.tasks_path(cli.tasks_file.as_deref())?;
    tracing::debug!(path = %tasks_path.display(), "using task file");

    let open_session = || Session::open(tasks_path.clone(), cfg.planner).context("loading tasks");
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout().lock();

    match cli.command.unwrap_or(Command::Menu) {
        Command::Menu => {
            let mut session = open_session()?;
            run_menu(
                &mut session,
                cfg.display.newest_first,
                local_now,
                &mut input,
                &mut output,
            )?;
        }

        Command::Show { json } => {
            let mut session = open_session()?;
            let now = local_now();
            if json {
                let outcome = session.plan(now);
                let doc = serde_json::json!({
                    "now": now,
                    "tasks": session.tasks,
                    "schedule": outcome,
                });
                writeln!(output, "{}", serde_json::to_string_pretty(&doc)?)?;
            } else {
                print_plan(&mut session, now, cfg.display.newest_first, &mut output)?;
            }
        }

        Command::List => {
            let mut session = open_session()?;
            let now = local_now();
            session.rank(now);
            write!(output, "{}", render_task_list(&session.tasks, now))?;
        }

        Command::Add(args) => {
            let mut session = open_session()?;
            let task = collect_task(args, local_now(), &mut input, &mut output)?;
            let name = task.name.clone();
            session.add(task)?;
            writeln!(output, "Task '{}' added to {}.", name, session.tasks_path.display())?;
        }

        Command::Delete { number } => {
            let mut session = open_session()?;
            // Numbers refer to the ranked order shown by `list`.
            session.rank(local_now());
            let removed = session.delete(number)?;
            writeln!(output, "Task '{}' deleted successfully.", removed.name)?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => init_config()?,
            ConfigCommand::Show => show_config(&cfg, &tasks_path)?,
        },
    }

    Ok(())
}
