use std::fmt::Display;

mod endpoints_attendance;
mod endpoints_event;
mod endpoints_feedback;
mod endpoints_registration;
mod endpoints_report;
mod endpoints_status;
mod endpoints_student;
#[cfg(test)]
mod tests;

use crate::data_store::StoreError;
use actix_web::error::{JsonPayloadError, PathError};
use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    web, HttpResponse,
};
use campus_report_api_types::CreationOutcome;
use serde_json::json;

pub fn configure_app(cfg: &mut web::ServiceConfig) {
    let json_config =
        web::JsonConfig::default().error_handler(|err, _req| APIError::InvalidJson(err).into());
    let path_config =
        web::PathConfig::default().error_handler(|err, _req| APIError::InvalidPath(err).into());
    cfg.app_data(json_config)
        .app_data(path_config)
        .service(endpoints_status::get_status)
        .service(endpoints_event::create_event)
        .service(endpoints_student::create_student)
        .service(endpoints_registration::create_registration)
        .service(endpoints_attendance::record_attendance)
        .service(endpoints_feedback::submit_feedback)
        .service(endpoints_report::get_attendance_report)
        .service(endpoints_report::get_feedback_report)
        .service(endpoints_report::get_registration_report);
}

fn created(id: i64, message: &str) -> web::Json<CreationOutcome> {
    web::Json(CreationOutcome::Created {
        id,
        message: message.to_owned(),
    })
}

/// Response for a creation request which violates a uniqueness constraint. This is still a
/// "200 OK" response; the error is only given in the body.
fn rejected(error: &str) -> web::Json<CreationOutcome> {
    web::Json(CreationOutcome::Rejected {
        error: error.to_owned(),
    })
}

#[derive(Debug)]
pub enum APIError {
    InvalidJson(JsonPayloadError),
    InvalidPath(PathError),
    InvalidData(String),
    TransactionConflict,
    InternalError(String),
}

impl Display for APIError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InternalError(s) => {
                f.write_str("Internal error: ")?;
                f.write_str(s)?;
            }
            Self::InvalidJson(e) => {
                write!(f, "Invalid JSON request data: {}", e)?;
            }
            Self::InvalidPath(e) => {
                write!(f, "Invalid URL path parameter: {}", e)?;
            }
            Self::InvalidData(e) => {
                write!(f, "Invalid request data: {}", e)?;
            }
            Self::TransactionConflict => {
                f.write_str("Database is locked by a concurrent transaction. Please retry request.")?;
            }
        };
        Ok(())
    }
}

impl ResponseError for APIError {
    fn error_response(&self) -> HttpResponse {
        let message = format!("{}", self);

        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(json!({
                "httpCode": self.status_code().as_u16(),
                "message": message
            }))
    }
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidJson(e) => match e {
                JsonPayloadError::ContentType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
                JsonPayloadError::Deserialize(json_error) if json_error.is_data() => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                _ => StatusCode::BAD_REQUEST,
            },
            Self::InvalidPath(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InvalidData(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::TransactionConflict => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl From<StoreError> for APIError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::ConnectionError(error) => {
                Self::InternalError(format!("Could not connect to database: {}", error))
            }
            StoreError::QueryError(diesel_error) => Self::InternalError(format!(
                "Error while executing database query: {}",
                diesel_error
            )),
            StoreError::TransactionConflict => Self::TransactionConflict,
            // No endpoint looks up single records. Uniqueness conflicts are answered by the
            // creation endpoints themselves.
            e @ (StoreError::NotExisting | StoreError::ConflictEntityExists) => {
                Self::InternalError(format!("Unexpected database result: {}", e))
            }
            StoreError::InvalidInputData(e) => Self::InvalidData(e),
            StoreError::InvalidDataInDatabase(e) => Self::InternalError(format!(
                "Data queried from database could not be deserialized: {}",
                e
            )),
            StoreError::MigrationError(e) => {
                Self::InternalError(format!("Database schema migration failed: {}", e))
            }
        }
    }
}

impl From<actix_web::error::BlockingError> for APIError {
    fn from(_e: actix_web::error::BlockingError) -> Self {
        APIError::InternalError(
            "Could not get thread from thread pool for synchronous database operation.".to_owned(),
        )
    }
}
