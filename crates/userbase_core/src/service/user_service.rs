//! User use-case service.
//!
//! # Responsibility
//! - Validate operator input shapes and delegate persistence to the
//!   repository.
//! - Translate missing-lookup results into domain not-found errors.
//!
//! # Invariants
//! - Service APIs never bypass draft validation or repository contracts.
//! - No operation retries; every failure is terminal for the invoking
//!   command.

use crate::model::user::{normalize_email, NewUser, User};
use crate::repo::user_repo::{RepoError, RepoResult, UserRepository};

/// Command-level service wrapper over a user repository.
pub struct UserService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates raw fields and creates one record.
    ///
    /// # Contract
    /// - Bad field shape surfaces as `RepoError::Validation`.
    /// - A taken email surfaces as `RepoError::DuplicateEmail`; the
    ///   existing record is untouched.
    pub fn create_user(
        &self,
        email: &str,
        name: &str,
        surname: &str,
        age: u32,
    ) -> RepoResult<User> {
        let draft = NewUser::new(email, name, surname, age)?;
        self.repo.insert_user(&draft)
    }

    /// Looks up one record by email.
    ///
    /// A missing record is a domain error here, unlike the repository's
    /// `Ok(None)`, because the operator named an email they expect to
    /// exist.
    pub fn get_user(&self, email: &str) -> RepoResult<User> {
        let email = normalize_email(email)?;
        self.repo
            .find_by_email(&email)?
            .ok_or(RepoError::NotFound(email))
    }

    /// Returns all records in insertion order.
    pub fn list_users(&self) -> RepoResult<Vec<User>> {
        self.repo.list_users()
    }

    /// Validates raw fields and replaces name/surname/age of the record
    /// keyed by `email`. Id and email stay fixed.
    pub fn update_user(
        &self,
        email: &str,
        name: &str,
        surname: &str,
        age: u32,
    ) -> RepoResult<()> {
        let draft = NewUser::new(email, name, surname, age)?;
        self.repo.update_user(&draft)
    }

    /// Removes the record keyed by email.
    pub fn delete_user(&self, email: &str) -> RepoResult<()> {
        let email = normalize_email(email)?;
        self.repo.delete_by_email(&email)
    }

    /// Removes every record, returning how many were deleted.
    pub fn delete_all_users(&self) -> RepoResult<usize> {
        self.repo.delete_all()
    }
}
