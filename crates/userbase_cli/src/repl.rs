//! Interactive command loop.
//!
//! # Responsibility
//! - Read one command token, collect its fields, invoke the service and
//!   render the outcome.
//! - Act as the single top-level handler for domain errors: print one line
//!   and resume the loop.
//!
//! # Invariants
//! - Malformed input never crashes the loop.
//! - The loop terminates only on `exit` or input exhaustion.

use crate::input::{confirm, parse_age, prompt_field, read_trimmed};
use crate::render::user_table;
use log::info;
use std::io::{self, BufRead, Write};
use userbase_core::{UserRepository, UserService};

const COMMANDS: &[(&str, &str)] = &[
    ("create", "Create a new user in the database."),
    ("get", "Retrieve a user's details by their email."),
    ("list", "List all users in the database."),
    ("update", "Update an existing user's details."),
    ("delete", "Delete a user by their email."),
    ("delete_all", "Delete all users from the database."),
    ("help", "Show the list of available commands and their descriptions."),
    ("exit", "Exit the application."),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Create,
    Get,
    List,
    Update,
    Delete,
    DeleteAll,
    Help,
    Exit,
}

impl Command {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "create" => Some(Self::Create),
            "get" => Some(Self::Get),
            "list" => Some(Self::List),
            "update" => Some(Self::Update),
            "delete" => Some(Self::Delete),
            "delete_all" => Some(Self::DeleteAll),
            "help" => Some(Self::Help),
            "exit" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Runs the read-prompt-act-print cycle until `exit` or EOF.
pub fn run<R, In, Out>(
    service: &UserService<R>,
    input: &mut In,
    output: &mut Out,
) -> io::Result<()>
where
    R: UserRepository,
    In: BufRead,
    Out: Write,
{
    writeln!(output, "Welcome to the users application.")?;
    writeln!(output, "Type 'help' to see the list of available commands.")?;

    loop {
        writeln!(output)?;
        write!(output, ">>> ")?;
        output.flush()?;

        let Some(line) = read_trimmed(input)? else {
            writeln!(output, "Exiting")?;
            break;
        };
        if line.is_empty() {
            continue;
        }

        match Command::parse(&line) {
            Some(Command::Exit) => {
                writeln!(output, "Exiting")?;
                break;
            }
            Some(Command::Help) => print_help(output)?,
            Some(Command::Create) => create_command(service, input, output)?,
            Some(Command::Get) => get_command(service, input, output)?,
            Some(Command::List) => list_command(service, output)?,
            Some(Command::Update) => update_command(service, input, output)?,
            Some(Command::Delete) => delete_command(service, input, output)?,
            Some(Command::DeleteAll) => delete_all_command(service, input, output)?,
            None => writeln!(
                output,
                "Unsupported command! Type 'help' to see the list of commands."
            )?,
        }
    }

    Ok(())
}

fn print_help<Out: Write>(output: &mut Out) -> io::Result<()> {
    writeln!(output, "Available commands:")?;
    for (name, description) in COMMANDS {
        writeln!(output, "  {name}: {description}")?;
    }
    Ok(())
}

fn create_command<R: UserRepository, In: BufRead, Out: Write>(
    service: &UserService<R>,
    input: &mut In,
    output: &mut Out,
) -> io::Result<()> {
    let Some(email) = prompt_field(input, output, "Enter email: ")? else {
        return Ok(());
    };
    let Some(name) = prompt_field(input, output, "Enter name: ")? else {
        return Ok(());
    };
    let Some(surname) = prompt_field(input, output, "Enter surname: ")? else {
        return Ok(());
    };
    let Some(age_raw) = prompt_field(input, output, "Enter age: ")? else {
        return Ok(());
    };
    let age = match parse_age(&age_raw) {
        Ok(age) => age,
        Err(message) => return writeln!(output, "Error: {message}"),
    };

    match service.create_user(&email, &name, &surname, age) {
        Ok(user) => {
            info!("event=user_create module=cli status=ok id={}", user.id);
            writeln!(output, "User {} successfully created.", user.email)
        }
        Err(err) => writeln!(output, "Error: {err}"),
    }
}

fn get_command<R: UserRepository, In: BufRead, Out: Write>(
    service: &UserService<R>,
    input: &mut In,
    output: &mut Out,
) -> io::Result<()> {
    let Some(email) = prompt_field(input, output, "Enter email: ")? else {
        return Ok(());
    };

    match service.get_user(&email) {
        Ok(user) => writeln!(
            output,
            "User found: id={} email={} name={} surname={} age={}",
            user.id, user.email, user.name, user.surname, user.age
        ),
        Err(err) => writeln!(output, "Error: {err}"),
    }
}

fn list_command<R: UserRepository, Out: Write>(
    service: &UserService<R>,
    output: &mut Out,
) -> io::Result<()> {
    match service.list_users() {
        Ok(users) => writeln!(output, "{}", user_table(&users)),
        Err(err) => writeln!(output, "Error: {err}"),
    }
}

fn update_command<R: UserRepository, In: BufRead, Out: Write>(
    service: &UserService<R>,
    input: &mut In,
    output: &mut Out,
) -> io::Result<()> {
    let Some(email) = prompt_field(input, output, "Enter the email of the user to update: ")?
    else {
        return Ok(());
    };
    writeln!(output, "Enter the updated details:")?;
    let Some(name) = prompt_field(input, output, "Enter new name: ")? else {
        return Ok(());
    };
    let Some(surname) = prompt_field(input, output, "Enter new surname: ")? else {
        return Ok(());
    };
    let Some(age_raw) = prompt_field(input, output, "Enter new age: ")? else {
        return Ok(());
    };
    let age = match parse_age(&age_raw) {
        Ok(age) => age,
        Err(message) => return writeln!(output, "Error: {message}"),
    };

    match service.update_user(&email, &name, &surname, age) {
        Ok(()) => writeln!(output, "User {} successfully updated.", email.trim().to_lowercase()),
        Err(err) => writeln!(output, "Error: {err}"),
    }
}

fn delete_command<R: UserRepository, In: BufRead, Out: Write>(
    service: &UserService<R>,
    input: &mut In,
    output: &mut Out,
) -> io::Result<()> {
    let Some(email) = prompt_field(input, output, "Enter email: ")? else {
        return Ok(());
    };

    match service.delete_user(&email) {
        Ok(()) => writeln!(
            output,
            "User with email {} successfully deleted.",
            email.trim().to_lowercase()
        ),
        Err(err) => writeln!(output, "Error: {err}"),
    }
}

fn delete_all_command<R: UserRepository, In: BufRead, Out: Write>(
    service: &UserService<R>,
    input: &mut In,
    output: &mut Out,
) -> io::Result<()> {
    let confirmed = confirm(
        input,
        output,
        "Are you sure you want to delete all users? This action cannot be undone. (yes/no): ",
    )?;
    match confirmed {
        Some(true) => match service.delete_all_users() {
            Ok(removed) => {
                info!("event=user_delete_all module=cli status=ok removed={removed}");
                writeln!(output, "All users have been successfully deleted.")
            }
            Err(err) => writeln!(output, "Error: {err}"),
        },
        Some(false) => writeln!(output, "Action canceled."),
        None => Ok(()),
    }
}
