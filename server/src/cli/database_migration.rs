//! This module uses the embedded Diesel migration data of the data store to check the database
//! migration status and to migrate the database schema to the current state.
//!
//! The functions are meant to be used directly from the command line interface implementation.
use crate::cli_error::CliError;
use crate::data_store::get_store_from_env;
use crate::data_store::sqlite::SqliteDataStore;

/// Migrate the database schema to the latest known migration for the current application version.
///
/// The database connection URL is taken from the environment variable, using
/// [get_store_from_env]. Information about the migration process is printed to stdout.
pub fn run_migrations() -> Result<(), CliError> {
    let store = get_store_from_env()?;
    let applied_migrations = store.run_pending_migrations()?;
    if applied_migrations.is_empty() {
        println!("Database schema is up to date.");
    }
    for migration in applied_migrations {
        println!("Applied migration {}", migration);
    }
    Ok(())
}

/// Check if the database schema has been migrated to the latest known migration for the current
/// application version. If not, return an error, describing the missing migrations.
pub(crate) fn check_migration_state(store: &SqliteDataStore) -> Result<(), CliError> {
    let pending_migrations = store.pending_migrations()?;
    if !pending_migrations.is_empty() {
        return Err(CliError::DatabaseMigrationRequired {
            missing_migrations: pending_migrations,
        });
    }
    Ok(())
}
