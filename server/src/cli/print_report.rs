use crate::cli::database_migration::check_migration_state;
use crate::cli_error::CliError;
use crate::data_store::{get_store_from_env, EventId, ReportStore, StoreError};

/// Print the attendance, feedback and registration reports of one event as a table to stdout.
pub fn print_event_report(event_id: EventId) -> Result<(), CliError> {
    let data_store_pool = get_store_from_env()?;
    check_migration_state(&data_store_pool)?;
    let mut data_store = data_store_pool.get_facade()?;

    match data_store.get_event(event_id) {
        Ok(event) => println!(
            "Event {}: {} ({}, {})",
            event.id, event.name, event.event_type, event.date
        ),
        Err(StoreError::NotExisting) => println!("Event {} does not exist.", event_id),
        Err(e) => return Err(e.into()),
    }

    let attendance: campus_report_api_types::AttendanceReport =
        data_store
            .get_attendance_report(event_id)
            .map_err(|e| CliError::report_failed(event_id, e))?
            .into();
    let feedback: campus_report_api_types::FeedbackReport =
        data_store
            .get_feedback_report(event_id)
            .map_err(|e| CliError::report_failed(event_id, e))?
            .into();
    let registrations: campus_report_api_types::RegistrationReport =
        data_store
            .get_registration_report(event_id)
            .map_err(|e| CliError::report_failed(event_id, e))?
            .into();

    let mut table = comfy_table::Table::new();
    table
        .load_preset(comfy_table::presets::ASCII_BORDERS_ONLY_CONDENSED)
        .set_header(vec!["figure", "value"])
        .add_rows(vec![
            vec![
                "registrations".to_owned(),
                registrations.registrations.to_string(),
            ],
            vec!["present".to_owned(), attendance.present.to_string()],
            vec![
                "attendance percentage".to_owned(),
                format!("{:.2} %", attendance.attendance_percentage),
            ],
            vec!["feedback responses".to_owned(), feedback.responses.to_string()],
            vec![
                "average rating".to_owned(),
                feedback
                    .avg_rating
                    .map(|rating| format!("{:.2}", rating))
                    .unwrap_or_else(|| "-".to_owned()),
            ],
        ]);

    println!("{table}");
    Ok(())
}
