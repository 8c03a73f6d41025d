//! User repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `users` table, keyed by unique email.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths call `NewUser::validate()` before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Every operation issues a single statement; autocommit semantics.

use crate::db::migrations::{latest_version, schema_version};
use crate::db::DbError;
use crate::model::user::{NewUser, User, UserValidationError};
use rusqlite::{params, Connection, Row};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

const USER_SELECT_SQL: &str = "SELECT
    id,
    email,
    name,
    surname,
    age
FROM users";

const USERS_TABLE: &str = "users";
const USERS_REQUIRED_COLUMNS: &[&str] = &["id", "email", "name", "surname", "age"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for user persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(UserValidationError),
    Db(DbError),
    /// Insert collided with an existing record on the unique email key.
    DuplicateEmail(String),
    /// Mutation or lookup targeted an email with no matching record.
    NotFound(String),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::DuplicateEmail(email) => {
                write!(f, "a user with email {email} already exists")
            }
            Self::NotFound(email) => write!(f, "user with email {email} not found"),
            Self::InvalidData(message) => write!(f, "invalid persisted user data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{column}` is missing from table `{table}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<UserValidationError> for RepoError {
    fn from(value: UserValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for user CRUD operations.
pub trait UserRepository {
    /// Inserts one record and returns it with the storage-assigned id.
    fn insert_user(&self, new_user: &NewUser) -> RepoResult<User>;
    /// Looks up one record by email; a missing email is `Ok(None)`.
    fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;
    /// Returns all records ordered by id (insertion order).
    fn list_users(&self) -> RepoResult<Vec<User>>;
    /// Replaces name/surname/age of the record keyed by `draft.email`.
    fn update_user(&self, draft: &NewUser) -> RepoResult<()>;
    /// Removes the record keyed by email.
    fn delete_by_email(&self, email: &str) -> RepoResult<()>;
    /// Removes every record, returning how many were deleted.
    fn delete_all(&self) -> RepoResult<usize>;
}

/// SQLite-backed user repository borrowing the process connection.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    /// Builds a repository after verifying the connection was bootstrapped
    /// through `db::open_db`: schema version matches and the `users` table
    /// carries every required column.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version = schema_version(conn)?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        if !table_exists(conn, USERS_TABLE)? {
            return Err(RepoError::MissingRequiredTable(USERS_TABLE));
        }

        let columns = table_columns(conn, USERS_TABLE)?;
        for column in USERS_REQUIRED_COLUMNS {
            if !columns.contains(*column) {
                return Err(RepoError::MissingRequiredColumn {
                    table: USERS_TABLE,
                    column,
                });
            }
        }

        Ok(Self { conn })
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn insert_user(&self, new_user: &NewUser) -> RepoResult<User> {
        new_user.validate()?;

        self.conn
            .execute(
                "INSERT INTO users (email, name, surname, age)
                 VALUES (?1, ?2, ?3, ?4);",
                params![
                    new_user.email.as_str(),
                    new_user.name.as_str(),
                    new_user.surname.as_str(),
                    new_user.age,
                ],
            )
            .map_err(|err| map_unique_violation(err, &new_user.email))?;

        Ok(User::from_draft(self.conn.last_insert_rowid(), new_user))
    }

    fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} WHERE email = ?1;"))?;

        let mut rows = stmt.query([email])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_user_row(row)?));
        }

        Ok(None)
    }

    fn list_users(&self) -> RepoResult<Vec<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} ORDER BY id ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut users = Vec::new();
        while let Some(row) = rows.next()? {
            users.push(parse_user_row(row)?);
        }

        Ok(users)
    }

    fn update_user(&self, draft: &NewUser) -> RepoResult<()> {
        draft.validate()?;

        let changed = self.conn.execute(
            "UPDATE users
             SET name = ?1, surname = ?2, age = ?3
             WHERE email = ?4;",
            params![
                draft.name.as_str(),
                draft.surname.as_str(),
                draft.age,
                draft.email.as_str(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(draft.email.clone()));
        }

        Ok(())
    }

    fn delete_by_email(&self, email: &str) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM users WHERE email = ?1;", [email])?;

        if changed == 0 {
            return Err(RepoError::NotFound(email.to_string()));
        }

        Ok(())
    }

    fn delete_all(&self) -> RepoResult<usize> {
        let removed = self.conn.execute("DELETE FROM users;", [])?;
        Ok(removed)
    }
}

fn parse_user_row(row: &Row<'_>) -> RepoResult<User> {
    let age: i64 = row.get("age")?;
    let age = u32::try_from(age)
        .map_err(|_| RepoError::InvalidData(format!("invalid age value `{age}` in users.age")))?;

    let user = User {
        id: row.get("id")?,
        email: row.get("email")?,
        name: row.get("name")?,
        surname: row.get("surname")?,
        age,
    };
    user.validate()?;
    Ok(user)
}

fn map_unique_violation(err: rusqlite::Error, email: &str) -> RepoError {
    match &err {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            RepoError::DuplicateEmail(email.to_string())
        }
        _ => RepoError::from(err),
    }
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_columns(conn: &Connection, table: &str) -> RepoResult<HashSet<String>> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let mut rows = stmt.query([table])?;
    let mut columns = HashSet::new();
    while let Some(row) = rows.next()? {
        columns.insert(row.get::<_, String>(0)?);
    }
    Ok(columns)
}
