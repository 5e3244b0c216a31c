//! The backend part of the backend: the database interface
//!
//! The primary entry point to this module is the function [get_store_from_env], which returns a
//! [sqlite::SqliteDataStore]. This object implements the [ReportStore] trait, can be shared between
//! threads in a global application state and be used to create [ReportStoreFacade] instances for
//! interaction with the database. These provide an append-only interface for recording events,
//! students, registrations, attendance and feedback and for querying the per-event reports, using
//! the data models from the [models] module.
//!
//! [sqlite::SqliteDataStore] wraps a pool of SQLite connections and its corresponding
//! [ReportStoreFacade] objects hold one pooled connection each, using the Diesel query DSL for
//! implementing the database interaction. The connection is returned to the pool when the facade
//! is dropped.

use crate::cli_error::CliError;
use crate::setup;

pub mod models;
mod schema;
pub mod sqlite;

/// Get a [sqlite::SqliteDataStore] instance, according the "DATABASE_URL" and
/// "DATABASE_POOL_SIZE" environment variables.
///
/// The DATABASE_URL is the path of the SQLite database file. It is created if it does not exist.
/// The special value ":memory:" creates a transient in-memory database.
pub fn get_store_from_env() -> Result<sqlite::SqliteDataStore, CliError> {
    Ok(sqlite::SqliteDataStore::new(
        &setup::get_database_url_from_env()?,
        setup::get_database_pool_size_from_env()?,
    )?)
}

pub type EventId = i64;
pub type StudentId = i64;
pub type RegistrationId = i64;
pub type AttendanceId = i64;
pub type FeedbackId = i64;

pub trait ReportStoreFacade {
    fn get_event(&mut self, event_id: EventId) -> Result<models::Event, StoreError>;
    fn create_event(&mut self, event: models::NewEvent) -> Result<EventId, StoreError>;

    /// Create a new student.
    ///
    /// # return value
    /// - `Ok(id)` if the student has been created, successfully
    /// - `Err(StoreError::ConflictEntityExists)` if a student with the same email address exists
    ///   already. Nothing is stored in this case.
    /// - `Err(_)` if something different went wrong, as usual
    fn create_student(&mut self, student: models::NewStudent) -> Result<StudentId, StoreError>;

    /// Register a student for an event.
    ///
    /// Neither the existence of the student nor the event is checked.
    ///
    /// # return value
    /// - `Ok(id)` if the registration has been created, successfully
    /// - `Err(StoreError::ConflictEntityExists)` if the student is already registered for the event
    /// - `Err(_)` if something different went wrong, as usual
    fn create_registration(
        &mut self,
        registration: models::NewRegistration,
    ) -> Result<RegistrationId, StoreError>;

    /// Add an attendance record. Repeated records for the same student and event are all kept.
    fn record_attendance(
        &mut self,
        attendance: models::NewAttendance,
    ) -> Result<AttendanceId, StoreError>;

    /// Add a feedback record. The rating is not range-checked.
    fn submit_feedback(&mut self, feedback: models::NewFeedback)
        -> Result<FeedbackId, StoreError>;

    /// Count registrations and present attendance records of the event.
    ///
    /// An event id which does not exist results in a report with zero counts.
    fn get_attendance_report(
        &mut self,
        event_id: EventId,
    ) -> Result<models::AttendanceReport, StoreError>;
    fn get_feedback_report(&mut self, event_id: EventId)
        -> Result<models::FeedbackReport, StoreError>;
    fn get_registration_report(
        &mut self,
        event_id: EventId,
    ) -> Result<models::RegistrationReport, StoreError>;
}

pub trait ReportStore: Send + Sync {
    fn get_facade<'a>(&'a self) -> Result<Box<dyn ReportStoreFacade + 'a>, StoreError>;
}

#[derive(Debug)]
pub enum StoreError {
    /// Connection the database failed. See string description for details.
    ConnectionError(String),
    /// The query could not be executed because of some error not covered by the other members (see
    /// string description)
    QueryError(diesel::result::Error),
    /// The database file is locked by a concurrent transaction for longer than the busy timeout
    TransactionConflict,
    /// The requested entity does not exist
    NotExisting,
    /// The entity could not be created because it violates a uniqueness constraint
    ConflictEntityExists,
    /// The provided data is invalid, i.e. it violates a SQL constraint. See string description
    /// for details.
    InvalidInputData(String),
    /// Some data queried from the database could not be deserialized. See string description for
    /// details.
    InvalidDataInDatabase(String),
    /// Checking or applying the database schema migrations failed
    MigrationError(String),
}

impl From<diesel::result::Error> for StoreError {
    fn from(error: diesel::result::Error) -> Self {
        match error {
            diesel::result::Error::NotFound => Self::NotExisting,
            diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                _,
            ) => Self::ConflictEntityExists,
            // SQLite does not report SQLITE_BUSY with a distinct error kind
            diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::Unknown,
                ref info,
            ) if info.message().contains("database is locked") => Self::TransactionConflict,
            diesel::result::Error::DatabaseError(
                e @ diesel::result::DatabaseErrorKind::ForeignKeyViolation
                | e @ diesel::result::DatabaseErrorKind::CheckViolation
                | e @ diesel::result::DatabaseErrorKind::NotNullViolation,
                _,
            ) => Self::InvalidInputData(format!("{:?}", e)),
            diesel::result::Error::SerializationError(e) => Self::InvalidInputData(e.to_string()),
            diesel::result::Error::DeserializationError(e) => {
                Self::InvalidDataInDatabase(e.to_string())
            }
            _ => Self::QueryError(error),
        }
    }
}

impl From<r2d2::Error> for StoreError {
    fn from(error: r2d2::Error) -> Self {
        Self::ConnectionError(error.to_string())
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConnectionError(e) => write!(f, "Error connecting to database: {}", e),
            Self::QueryError(e) => write!(f, "Error while executing database query: {}", e),
            Self::TransactionConflict => f.write_str("Database is locked by a concurrent transaction"),
            Self::NotExisting => f.write_str("Database record does not exist."),
            Self::ConflictEntityExists => f.write_str("Database record exists already."),
            Self::InvalidInputData(e) => {
                write!(f, "Data to be stored in database is not valid: {}", e)
            }
            Self::InvalidDataInDatabase(e) => {
                write!(f, "Data queried from database could not be deserialized: {}", e)
            }
            Self::MigrationError(e) => write!(f, "Database schema migration failed: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}
