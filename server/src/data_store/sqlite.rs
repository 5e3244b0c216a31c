use super::{
    models, schema, AttendanceId, EventId, FeedbackId, RegistrationId, ReportStore,
    ReportStoreFacade, StoreError, StudentId,
};
use diesel::connection::SimpleConnection;
use diesel::migration::Migration;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::time::Duration;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations/sqlite");

const IN_MEMORY_DATABASE_URL: &str = ":memory:";

/// How long a connection waits for the database file lock of a concurrent writer, before the
/// query fails with [StoreError::TransactionConflict]
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct SqliteDataStore {
    pool: Pool<ConnectionManager<SqliteConnection>>,
}

impl SqliteDataStore {
    /// Create a connection pool for the SQLite database file at `database_url`.
    ///
    /// For an in-memory database (`database_url` = ":memory:"), every connection would open its
    /// own database. Thus, the pool is restricted to a single connection which is kept open for
    /// the lifetime of the pool.
    pub fn new(database_url: &str, pool_size: u32) -> Result<Self, StoreError> {
        let in_memory = database_url == IN_MEMORY_DATABASE_URL;
        let connection_manager = ConnectionManager::<SqliteConnection>::new(database_url);
        let builder = Pool::builder()
            .test_on_check_out(true)
            .connection_customizer(Box::new(ConnectionOptions {
                busy_timeout: BUSY_TIMEOUT,
                write_ahead_log: !in_memory,
            }));
        let builder = if in_memory {
            builder.max_size(1).idle_timeout(None).max_lifetime(None)
        } else {
            builder.max_size(pool_size)
        };
        Ok(Self {
            pool: builder.build(connection_manager)?,
        })
    }

    /// Apply all pending schema migrations to the database. Returns the versions of the applied
    /// migrations.
    pub fn run_pending_migrations(&self) -> Result<Vec<String>, StoreError> {
        let mut connection = self.pool.get()?;
        let connection: &mut SqliteConnection = &mut connection;
        Ok(connection
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| StoreError::MigrationError(e.to_string()))?
            .iter()
            .map(|version| version.to_string())
            .collect())
    }

    /// Get the names of the schema migrations which have not been applied to the database yet
    pub fn pending_migrations(&self) -> Result<Vec<String>, StoreError> {
        let mut connection = self.pool.get()?;
        let connection: &mut SqliteConnection = &mut connection;
        Ok(connection
            .pending_migrations(MIGRATIONS)
            .map_err(|e| StoreError::MigrationError(e.to_string()))?
            .iter()
            .map(|m| m.name().to_string())
            .collect())
    }
}

impl ReportStore for SqliteDataStore {
    fn get_facade<'a>(&'a self) -> Result<Box<dyn ReportStoreFacade + 'a>, StoreError> {
        Ok(Box::new(SqliteDataStoreFacade::with_pooled_connection(
            self.pool.get()?,
        )))
    }
}

/// Per-connection settings, applied by the pool whenever it opens a new connection
#[derive(Debug)]
struct ConnectionOptions {
    busy_timeout: Duration,
    write_ahead_log: bool,
}

impl ConnectionOptions {
    fn apply(&self, connection: &mut SqliteConnection) -> QueryResult<()> {
        connection.batch_execute(&format!(
            "PRAGMA busy_timeout = {};",
            self.busy_timeout.as_millis()
        ))?;
        if self.write_ahead_log {
            connection.batch_execute("PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;")?;
        }
        Ok(())
    }
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, connection: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        self.apply(connection)
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

pub struct SqliteDataStoreFacade {
    connection: PooledConnection<ConnectionManager<SqliteConnection>>,
}

impl SqliteDataStoreFacade {
    pub fn with_pooled_connection(
        connection: PooledConnection<ConnectionManager<SqliteConnection>>,
    ) -> Self {
        Self { connection }
    }
}

impl ReportStoreFacade for SqliteDataStoreFacade {
    fn get_event(&mut self, the_event_id: EventId) -> Result<models::Event, StoreError> {
        use schema::events::dsl::*;

        events
            .filter(id.eq(the_event_id))
            .select(models::Event::as_select())
            .first::<models::Event>(&mut self.connection)
            .map_err(|e| e.into())
    }

    fn create_event(&mut self, event: models::NewEvent) -> Result<EventId, StoreError> {
        use schema::events::dsl::*;

        Ok(diesel::insert_into(events)
            .values(&event)
            .returning(id)
            .get_result::<EventId>(&mut self.connection)?)
    }

    fn create_student(&mut self, student: models::NewStudent) -> Result<StudentId, StoreError> {
        use schema::students::dsl::*;

        Ok(diesel::insert_into(students)
            .values(&student)
            .returning(id)
            .get_result::<StudentId>(&mut self.connection)?)
    }

    fn create_registration(
        &mut self,
        registration: models::NewRegistration,
    ) -> Result<RegistrationId, StoreError> {
        use schema::registrations::dsl::*;

        Ok(diesel::insert_into(registrations)
            .values(&registration)
            .returning(id)
            .get_result::<RegistrationId>(&mut self.connection)?)
    }

    fn record_attendance(
        &mut self,
        the_attendance: models::NewAttendance,
    ) -> Result<AttendanceId, StoreError> {
        use schema::attendance::dsl::*;

        Ok(diesel::insert_into(attendance)
            .values(&the_attendance)
            .returning(id)
            .get_result::<AttendanceId>(&mut self.connection)?)
    }

    fn submit_feedback(
        &mut self,
        the_feedback: models::NewFeedback,
    ) -> Result<FeedbackId, StoreError> {
        use schema::feedback::dsl::*;

        Ok(diesel::insert_into(feedback)
            .values(&the_feedback)
            .returning(id)
            .get_result::<FeedbackId>(&mut self.connection)?)
    }

    fn get_attendance_report(
        &mut self,
        the_event_id: EventId,
    ) -> Result<models::AttendanceReport, StoreError> {
        use schema::{attendance, registrations};

        self.connection.transaction(|connection| {
            let registration_count = registrations::table
                .filter(registrations::event_id.eq(the_event_id))
                .count()
                .get_result::<i64>(connection)?;
            let present_count = attendance::table
                .filter(attendance::event_id.eq(the_event_id))
                .filter(attendance::present.eq(true))
                .count()
                .get_result::<i64>(connection)?;

            Ok(models::AttendanceReport {
                event_id: the_event_id,
                registrations: registration_count,
                present: present_count,
            })
        })
    }

    fn get_feedback_report(
        &mut self,
        the_event_id: EventId,
    ) -> Result<models::FeedbackReport, StoreError> {
        use diesel::dsl::count_star;
        use diesel::sql_types::{Double, Nullable};
        use schema::feedback::dsl::*;

        // Diesel's `avg()` maps SQLite integer averages to `Numeric`, so we use plain SQL to
        // get a floating point number
        let (average_rating, responses) = feedback
            .filter(event_id.eq(the_event_id))
            .select((diesel::dsl::sql::<Nullable<Double>>("AVG(rating)"), count_star()))
            .first::<(Option<f64>, i64)>(&mut self.connection)?;

        Ok(models::FeedbackReport {
            event_id: the_event_id,
            average_rating,
            responses,
        })
    }

    fn get_registration_report(
        &mut self,
        the_event_id: EventId,
    ) -> Result<models::RegistrationReport, StoreError> {
        use schema::registrations::dsl::*;

        let registration_count = registrations
            .filter(event_id.eq(the_event_id))
            .count()
            .get_result::<i64>(&mut self.connection)?;

        Ok(models::RegistrationReport {
            event_id: the_event_id,
            registrations: registration_count,
        })
    }
}
