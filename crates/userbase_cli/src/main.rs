//! Interactive user-management front-end.
//!
//! # Responsibility
//! - Resolve the store path, bootstrap logging and storage, run the
//!   command loop.
//! - Exit non-zero only on unrecoverable startup failure.

mod input;
mod render;
mod repl;

use log::info;
use std::io;
use std::process::ExitCode;
use userbase_core::db::open_db;
use userbase_core::{default_log_level, init_logging, SqliteUserRepository, UserService};

const DEFAULT_DB_PATH: &str = "users.sqlite";

fn main() -> ExitCode {
    let db_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_DB_PATH.to_string());

    init_file_logging();

    let conn = match open_db(&db_path) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("failed to open user store `{db_path}`: {err}");
            return ExitCode::FAILURE;
        }
    };
    let repo = match SqliteUserRepository::try_new(&conn) {
        Ok(repo) => repo,
        Err(err) => {
            eprintln!("failed to prepare user store `{db_path}`: {err}");
            return ExitCode::FAILURE;
        }
    };
    let service = UserService::new(repo);

    info!(
        "event=cli_start module=cli status=ok store={db_path} version={}",
        userbase_core::core_version()
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let result = repl::run(&service, &mut stdin.lock(), &mut stdout.lock());

    match result {
        Ok(()) => {
            info!("event=cli_stop module=cli status=ok");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("terminal I/O failure: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Logging is best-effort for an interactive tool: a failure disables file
/// logs but never blocks the loop.
fn init_file_logging() {
    let log_dir = match std::env::current_dir() {
        Ok(cwd) => cwd.join("logs"),
        Err(err) => {
            eprintln!("warning: file logging disabled: {err}");
            return;
        }
    };
    let Some(log_dir) = log_dir.to_str() else {
        eprintln!("warning: file logging disabled: log path is not valid UTF-8");
        return;
    };
    if let Err(err) = init_logging(default_log_level(), log_dir) {
        eprintln!("warning: file logging disabled: {err}");
    }
}
