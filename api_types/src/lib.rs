use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NewEvent {
    pub name: String,
    #[serde(rename = "type")]
    pub event_type: String,
    /// Calendar date of the event, usually in "YYYY-MM-DD" format. Not validated.
    pub date: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NewRegistration {
    pub student_id: i64,
    pub event_id: i64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NewAttendance {
    pub student_id: i64,
    pub event_id: i64,
    pub present: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NewFeedback {
    pub student_id: i64,
    pub event_id: i64,
    pub rating: i64,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Response body of all creation endpoints.
///
/// Creating a student with an existing email address or registering a student twice for the same
/// event is not reported via the HTTP status code, but with the `Rejected` variant in a
/// "200 OK" response. Clients need to inspect the body to tell both cases apart.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum CreationOutcome {
    Created { id: i64, message: String },
    Rejected { error: String },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AttendanceReport {
    pub event_id: i64,
    pub registrations: i64,
    pub present: i64,
    pub attendance_percentage: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FeedbackReport {
    pub event_id: i64,
    /// Always serialized, as `null` if the event has no feedback
    pub avg_rating: Option<f64>,
    pub responses: i64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RegistrationReport {
    pub event_id: i64,
    pub registrations: i64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
}
