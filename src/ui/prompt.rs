use std::io::{self, BufRead, Write};

use crate::model::{NewTask, TaskPatch};

/// Asks one line of input. `None` when the input is closed.
pub fn ask<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
) -> io::Result<Option<String>> {
    write!(output, "{}: ", message)?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(output)?;
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
}

/// The creation form. Closing the input abandons the task.
pub fn create_form<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> io::Result<Option<NewTask>> {
    writeln!(output, "New task (Ctrl-D to cancel)")?;
    let title = match ask(input, output, "Title")? {
        Some(v) => v,
        None => return Ok(None),
    };
    let description = match ask(input, output, "Description")? {
        Some(v) => v,
        None => return Ok(None),
    };
    let status = match ask(input, output, "Status (Open, In Progress, Closed)")? {
        Some(v) => v,
        None => return Ok(None),
    };
    let due_date = match ask(input, output, "Due date (YYYY-MM-DDTHH:MM)")? {
        Some(v) => v,
        None => return Ok(None),
    };
    Ok(Some(NewTask {
        title,
        description,
        status,
        due_date,
    }))
}

/// The edit prompts. Every answer goes into the patch as typed; a closed input
/// leaves that field `None`.
pub fn edit_form<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<TaskPatch> {
    Ok(TaskPatch {
        title: ask(input, output, "Enter new title")?,
        description: ask(input, output, "Enter new description")?,
        status: ask(input, output, "Enter new status (Open, In Progress, Closed)")?,
        due_date: ask(input, output, "Enter new due date (YYYY-MM-DDTHH:MM:SS)")?,
    })
}
