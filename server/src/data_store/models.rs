use crate::data_store::{EventId, StudentId};
use diesel::prelude::*;

#[derive(Clone, Debug, Queryable, Selectable)]
#[diesel(table_name=super::schema::events)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Event {
    pub id: EventId,
    pub name: String,
    #[diesel(column_name = type_)]
    pub event_type: String,
    pub date: String,
}

#[derive(Insertable)]
#[diesel(table_name=super::schema::events)]
pub struct NewEvent {
    pub name: String,
    #[diesel(column_name = type_)]
    pub event_type: String,
    pub date: String,
}

impl From<campus_report_api_types::NewEvent> for NewEvent {
    fn from(value: campus_report_api_types::NewEvent) -> Self {
        Self {
            name: value.name,
            event_type: value.event_type,
            date: value.date,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name=super::schema::students)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
}

impl From<campus_report_api_types::NewStudent> for NewStudent {
    fn from(value: campus_report_api_types::NewStudent) -> Self {
        Self {
            name: value.name,
            email: value.email,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name=super::schema::registrations)]
pub struct NewRegistration {
    pub student_id: StudentId,
    pub event_id: EventId,
}

impl From<campus_report_api_types::NewRegistration> for NewRegistration {
    fn from(value: campus_report_api_types::NewRegistration) -> Self {
        Self {
            student_id: value.student_id,
            event_id: value.event_id,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name=super::schema::attendance)]
pub struct NewAttendance {
    pub student_id: StudentId,
    pub event_id: EventId,
    pub present: bool,
}

impl From<campus_report_api_types::NewAttendance> for NewAttendance {
    fn from(value: campus_report_api_types::NewAttendance) -> Self {
        Self {
            student_id: value.student_id,
            event_id: value.event_id,
            present: value.present,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name=super::schema::feedback)]
pub struct NewFeedback {
    pub student_id: StudentId,
    pub event_id: EventId,
    pub rating: i64,
    pub comment: Option<String>,
}

impl From<campus_report_api_types::NewFeedback> for NewFeedback {
    fn from(value: campus_report_api_types::NewFeedback) -> Self {
        Self {
            student_id: value.student_id,
            event_id: value.event_id,
            rating: value.rating,
            comment: value.comment,
        }
    }
}

/// Raw attendance numbers of one event, as counted by the database
#[derive(Clone, Debug, PartialEq)]
pub struct AttendanceReport {
    pub event_id: EventId,
    /// Number of registrations for the event
    pub registrations: i64,
    /// Number of attendance records with `present = true` for the event. Multiple records of the
    /// same student are counted individually.
    pub present: i64,
}

impl AttendanceReport {
    /// Percentage of present attendance records relative to the registrations, rounded to two
    /// decimal places. 0.0 for events without registrations.
    pub fn attendance_percentage(&self) -> f64 {
        if self.registrations == 0 {
            return 0.0;
        }
        round_to_two_decimals(self.present as f64 * 100.0 / self.registrations as f64)
    }
}

impl From<AttendanceReport> for campus_report_api_types::AttendanceReport {
    fn from(value: AttendanceReport) -> Self {
        Self {
            event_id: value.event_id,
            registrations: value.registrations,
            present: value.present,
            attendance_percentage: value.attendance_percentage(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FeedbackReport {
    pub event_id: EventId,
    /// Unrounded average rating, None if there is no feedback for the event
    pub average_rating: Option<f64>,
    pub responses: i64,
}

impl From<FeedbackReport> for campus_report_api_types::FeedbackReport {
    fn from(value: FeedbackReport) -> Self {
        Self {
            event_id: value.event_id,
            avg_rating: value.average_rating.map(round_to_two_decimals),
            responses: value.responses,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RegistrationReport {
    pub event_id: EventId,
    pub registrations: i64,
}

impl From<RegistrationReport> for campus_report_api_types::RegistrationReport {
    fn from(value: RegistrationReport) -> Self {
        Self {
            event_id: value.event_id,
            registrations: value.registrations,
        }
    }
}

/// Exact ties (e.g. 3.125) are rounded to the even neighbour
fn round_to_two_decimals(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
