//! Add/delete flows and the interactive menu loop.

use anyhow::{bail, Context, Result};
use chrono::NaiveDateTime;
use fortnight_core::{parse_deadline, Group, Task};
use std::io::{BufRead, Write};

use crate::display::{render_calendar, render_problems, render_task_list};
use crate::prompt::{
    accept_digits, accept_future_deadline, accept_group, accept_hours, accept_name, prompt,
    prompt_until, DEADLINE_HINT,
};
use crate::session::Session;

/// Values given on the command line; anything missing is prompted for.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct AddArgs {
    /// Task name
    #[arg(long)]
    pub name: Option<String>,

    /// school, work or extra
    #[arg(long)]
    pub group: Option<String>,

    /// Total hours needed (whole hours)
    #[arg(long)]
    pub hours: Option<String>,

    /// Difficulty rating (0 or more)
    #[arg(long)]
    pub difficulty: Option<String>,

    /// Deadline as "YYYY-MM-DD HH:MM"
    #[arg(long)]
    pub deadline: Option<String>,
}

/// Build a task from flags and prompts. The deadline must be in the future.
pub fn collect_task(
    args: AddArgs,
    now: NaiveDateTime,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<Task> {
    let name = match args.name {
        Some(n) => accept_name(&n).context("--name must be non-empty and must not contain '|'")?,
        None => prompt_until(
            input,
            output,
            "Enter task name: ",
            "Invalid name. Enter task name: ",
            accept_name,
        )?,
    };

    let group = match args.group {
        Some(g) => accept_group(&g).context("--group must be one of school, work, extra")?,
        None => prompt_until(
            input,
            output,
            "Enter group ('school', 'work', or 'extra'): ",
            "Invalid group. Please enter 'school', 'work', or 'extra': ",
            accept_group,
        )?,
    };

    let hours = match args.hours {
        Some(h) => accept_hours(&h).context("--hours must be a whole number of at least 1")?,
        None => prompt_until(
            input,
            output,
            "Enter time commitment in hours (integer): ",
            "Invalid input. Enter time commitment in hours (integer): ",
            accept_hours,
        )?,
    };

    let difficulty = match args.difficulty {
        Some(d) => accept_digits(&d).context("--difficulty must be a non-negative integer")?,
        None => prompt_until(
            input,
            output,
            "Enter difficulty (integer): ",
            "Invalid input. Enter difficulty (integer): ",
            accept_digits,
        )?,
    };

    let deadline = match args.deadline {
        Some(d) => {
            let parsed = parse_deadline(&d)?;
            if parsed <= now {
                bail!("--deadline must be a future date and time");
            }
            parsed
        }
        None => prompt_until(
            input,
            output,
            &format!("Enter deadline (format {DEADLINE_HINT}): "),
            &format!("Deadline must be a future date and time in the format {DEADLINE_HINT}: "),
            |s| accept_future_deadline(s, now),
        )?,
    };

    Ok(Task::new(name, Group::parse(&group)?, hours, difficulty, deadline)?)
}

/// Ask which task to delete. Returns `None` on cancel.
pub fn choose_task_to_delete(
    session: &Session,
    now: NaiveDateTime,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<Option<usize>> {
    if session.tasks.is_empty() {
        writeln!(output, "No tasks to delete.\n")?;
        return Ok(None);
    }
    write!(output, "{}", render_task_list(&session.tasks, now))?;

    let count = session.tasks.len();
    let first = prompt(
        input,
        output,
        "Enter the number of the task to delete (or 'c' to cancel): ",
    )?;
    if first.eq_ignore_ascii_case("c") {
        return Ok(None);
    }
    let accept = |s: &str| accept_digits(s).map(|n| n as usize).filter(|n| (1..=count).contains(n));
    if let Some(n) = accept(&first) {
        return Ok(Some(n));
    }
    let n = prompt_until(
        input,
        output,
        "Invalid choice. Enter a valid task number to delete: ",
        "Invalid choice. Enter a valid task number to delete: ",
        accept,
    )?;
    Ok(Some(n))
}

/// Print the schedule and the ranked list for the current state.
pub fn print_plan(
    session: &mut Session,
    now: NaiveDateTime,
    newest_first: bool,
    output: &mut impl Write,
) -> Result<()> {
    let outcome = session.plan(now);
    write!(output, "{}", render_calendar(&outcome.calendar, &session.tasks, newest_first))?;
    if let Some(problems) = render_problems(&outcome, &session.tasks) {
        write!(output, "\n{problems}")?;
    }
    write!(output, "{}", render_task_list(&session.tasks, now))?;
    writeln!(output)?;
    Ok(())
}

pub fn run_menu(
    session: &mut Session,
    newest_first: bool,
    clock: impl Fn() -> NaiveDateTime,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<()> {
    loop {
        let now = clock();
        print_plan(session, now, newest_first, output)?;

        writeln!(output, "Options:")?;
        writeln!(output, "[A] Add a task")?;
        writeln!(output, "[D] Delete a task")?;
        writeln!(output, "[Q] Quit")?;
        let choice = prompt(input, output, "Enter your choice: ")?.to_lowercase();

        match choice.as_str() {
            "a" => match collect_task(AddArgs::default(), clock(), input, output) {
                Ok(task) => {
                    session.add(task)?;
                    writeln!(output, "Task added successfully.\n")?;
                }
                Err(e) => writeln!(output, "Could not add task: {e:#}\n")?,
            },
            "d" => {
                if let Some(n) = choose_task_to_delete(session, clock(), input, output)? {
                    let removed = session.delete(n)?;
                    writeln!(output, "Task '{}' deleted successfully.\n", removed.name)?;
                }
            }
            "q" => {
                writeln!(output, "Goodbye!")?;
                return Ok(());
            }
            _ => writeln!(output, "Invalid choice. Please select A, D, or Q.\n")?,
        }
    }
}
