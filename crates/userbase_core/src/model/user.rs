//! User domain model.
//!
//! # Responsibility
//! - Define the persisted `User` record and the validated `NewUser` draft.
//! - Normalize and validate operator-supplied fields in one place.
//!
//! # Invariants
//! - Email, name and surname are stored trimmed and lowercased.
//! - `NewUser` values built through [`NewUser::new`] always satisfy the
//!   field rules; write paths re-check via [`NewUser::validate`].
//! - `User::id` is positive once assigned by storage.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Surrogate identifier assigned by storage on insert.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type UserId = i64;

/// Maximum stored email length, mirrored by the schema CHECK.
pub const MAX_EMAIL_CHARS: usize = 100;
/// Maximum stored name/surname length, mirrored by the schema CHECK.
pub const MAX_NAME_CHARS: usize = 50;
/// Inclusive accepted age range, mirrored by the schema CHECK.
pub const AGE_RANGE: std::ops::RangeInclusive<u32> = 18..=100;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_.+-]+@[A-Za-z0-9-]+\.[A-Za-z0-9.-]+$").expect("valid email regex")
});

/// Field-level validation failure, identifying the offending field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    InvalidEmail(String),
    EmailTooLong(usize),
    EmptyName,
    NameTooLong(usize),
    EmptySurname,
    SurnameTooLong(usize),
    AgeOutOfRange(u32),
    NonPositiveId(UserId),
}

impl Display for UserValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEmail(email) => write!(f, "invalid email address: {email}"),
            Self::EmailTooLong(length) => {
                write!(f, "email is {length} chars, limit is {MAX_EMAIL_CHARS}")
            }
            Self::EmptyName => write!(f, "name cannot be empty"),
            Self::NameTooLong(length) => {
                write!(f, "name is {length} chars, limit is {MAX_NAME_CHARS}")
            }
            Self::EmptySurname => write!(f, "surname cannot be empty"),
            Self::SurnameTooLong(length) => {
                write!(f, "surname is {length} chars, limit is {MAX_NAME_CHARS}")
            }
            Self::AgeOutOfRange(age) => write!(
                f,
                "age {age} is outside the accepted range {}..={}",
                AGE_RANGE.start(),
                AGE_RANGE.end()
            ),
            Self::NonPositiveId(id) => write!(f, "user id must be positive, got {id}"),
        }
    }
}

impl Error for UserValidationError {}

/// Persisted user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Surrogate id assigned by storage; immutable afterwards.
    pub id: UserId,
    /// Unique lookup key, stored lowercase.
    pub email: String,
    pub name: String,
    pub surname: String,
    pub age: u32,
}

/// Validated draft for create and update operations.
///
/// Update is keyed by `email`; `name`, `surname` and `age` are the mutable
/// fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub surname: String,
    pub age: u32,
}

impl NewUser {
    /// Builds a draft from raw operator input, trimming and lowercasing
    /// text fields before validation.
    pub fn new(
        email: &str,
        name: &str,
        surname: &str,
        age: u32,
    ) -> Result<Self, UserValidationError> {
        let draft = Self {
            email: normalize_email(email)?,
            name: name.trim().to_lowercase(),
            surname: surname.trim().to_lowercase(),
            age,
        };
        draft.validate()?;
        Ok(draft)
    }

    /// Re-checks all field rules. Write paths call this before SQL
    /// mutations, so a hand-built or mutated draft cannot bypass them.
    pub fn validate(&self) -> Result<(), UserValidationError> {
        validate_email(&self.email)?;
        validate_name(&self.name, UserValidationError::EmptyName, |len| {
            UserValidationError::NameTooLong(len)
        })?;
        validate_name(&self.surname, UserValidationError::EmptySurname, |len| {
            UserValidationError::SurnameTooLong(len)
        })?;
        validate_age(self.age)?;
        Ok(())
    }
}

impl User {
    /// Combines a storage-assigned id with an accepted draft.
    pub fn from_draft(id: UserId, draft: &NewUser) -> Self {
        Self {
            id,
            email: draft.email.clone(),
            name: draft.name.clone(),
            surname: draft.surname.clone(),
            age: draft.age,
        }
    }

    /// Validates a record loaded from storage. Read paths reject rows that
    /// no longer satisfy the field rules instead of masking them.
    pub fn validate(&self) -> Result<(), UserValidationError> {
        if self.id <= 0 {
            return Err(UserValidationError::NonPositiveId(self.id));
        }
        validate_email(&self.email)?;
        validate_name(&self.name, UserValidationError::EmptyName, |len| {
            UserValidationError::NameTooLong(len)
        })?;
        validate_name(&self.surname, UserValidationError::EmptySurname, |len| {
            UserValidationError::SurnameTooLong(len)
        })?;
        validate_age(self.age)?;
        Ok(())
    }
}

/// Trims, lowercases and validates a raw email. Shared by draft
/// construction and by-email lookups, so both sides agree on the key shape.
pub fn normalize_email(email: &str) -> Result<String, UserValidationError> {
    let normalized = email.trim().to_lowercase();
    validate_email(&normalized)?;
    Ok(normalized)
}

fn validate_email(email: &str) -> Result<(), UserValidationError> {
    if !EMAIL_RE.is_match(email) {
        return Err(UserValidationError::InvalidEmail(email.to_string()));
    }
    let length = email.chars().count();
    if length > MAX_EMAIL_CHARS {
        return Err(UserValidationError::EmailTooLong(length));
    }
    Ok(())
}

fn validate_name(
    value: &str,
    empty: UserValidationError,
    too_long: impl FnOnce(usize) -> UserValidationError,
) -> Result<(), UserValidationError> {
    if value.trim().is_empty() {
        return Err(empty);
    }
    let length = value.chars().count();
    if length > MAX_NAME_CHARS {
        return Err(too_long(length));
    }
    Ok(())
}

fn validate_age(age: u32) -> Result<(), UserValidationError> {
    if !AGE_RANGE.contains(&age) {
        return Err(UserValidationError::AgeOutOfRange(age));
    }
    Ok(())
}
