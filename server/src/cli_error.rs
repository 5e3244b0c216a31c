use crate::data_store::{EventId, StoreError};
use crate::setup::SetupError;

#[derive(Debug)]
pub enum CliError {
    /// An environment variable has an invalid value
    SetupError(String),
    /// The SQLite database file could not be opened
    CouldNotConnectToDatabase(String),
    /// A database query of a command failed unexpectedly
    UnexpectedStoreError(String),
    /// Computing the reports of an event failed
    ReportFailed { event_id: EventId, cause: String },
    /// Binding the web server to the configured address and port failed
    BindError(std::io::Error),
    /// The web server terminated with an io error
    ServerError(std::io::Error),
    /// Applying the embedded schema migrations failed
    DatabaseMigrationError(String),
    /// The command needs the current schema, but migrations are pending
    DatabaseMigrationRequired {
        /// Names of the pending migrations
        missing_migrations: Vec<String>,
    },
    /// The database rejected the data of the command
    DataError(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::SetupError(_) | CliError::DataError(_) => 1,
            CliError::UnexpectedStoreError(_) | CliError::ReportFailed { .. } => 2,
            CliError::BindError(_) | CliError::ServerError(_) => 3,
            CliError::CouldNotConnectToDatabase(_) | CliError::DatabaseMigrationError(_) => 4,
            CliError::DatabaseMigrationRequired { .. } => 5,
        }
    }

    /// Wrap a store error which occurred while reading the reports of `event_id`
    pub fn report_failed(event_id: EventId, cause: StoreError) -> Self {
        match cause {
            StoreError::ConnectionError(e) => Self::CouldNotConnectToDatabase(e),
            e => Self::ReportFailed {
                event_id,
                cause: e.to_string(),
            },
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::SetupError(e) => write!(f, "Invalid configuration: {}", e),
            CliError::CouldNotConnectToDatabase(e) => {
                write!(f, "Could not open event database: {}", e)
            }
            CliError::UnexpectedStoreError(e) => write!(f, "Event database query failed: {}", e),
            CliError::ReportFailed { event_id, cause } => {
                write!(f, "Could not compute reports of event {}: {}", event_id, cause)
            }
            CliError::BindError(e) => {
                write!(f, "Could not bind API server to listen address: {}", e)
            }
            CliError::ServerError(e) => write!(f, "API server failed: {}", e),
            CliError::DatabaseMigrationError(e) => {
                write!(f, "Could not migrate event database schema: {}", e)
            }
            CliError::DatabaseMigrationRequired { missing_migrations } => write!(
                f,
                "Event database schema is outdated (pending: {}). Run 'campus-report \
                migrate-database' first.",
                missing_migrations.join(", ")
            ),
            CliError::DataError(e) => write!(f, "Data rejected by event database: {}", e),
        }
    }
}

impl std::error::Error for CliError {}

impl From<StoreError> for CliError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::ConnectionError(e) => Self::CouldNotConnectToDatabase(e),
            StoreError::MigrationError(e) => Self::DatabaseMigrationError(e),
            StoreError::ConflictEntityExists | StoreError::InvalidInputData(_) => {
                Self::DataError(e.to_string())
            }
            e => Self::UnexpectedStoreError(e.to_string()),
        }
    }
}

impl From<SetupError> for CliError {
    fn from(value: SetupError) -> Self {
        Self::SetupError(value.to_string())
    }
}
