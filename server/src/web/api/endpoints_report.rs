//! Per-event reports. None of them checks if the event exists: Unknown event ids result in reports
//! with zero counts.
use crate::data_store::EventId;
use crate::web::api::APIError;
use crate::web::AppState;
use actix_web::{get, web, Responder};

#[get("/report/attendance/{event_id}")]
async fn get_attendance_report(
    path: web::Path<EventId>,
    state: web::Data<AppState>,
) -> Result<impl Responder, APIError> {
    let event_id = path.into_inner();
    let report: campus_report_api_types::AttendanceReport =
        web::block(move || -> Result<_, APIError> {
            let mut store = state.store.get_facade()?;
            Ok(store.get_attendance_report(event_id)?)
        })
        .await??
        .into();
    Ok(web::Json(report))
}

#[get("/report/feedback/{event_id}")]
async fn get_feedback_report(
    path: web::Path<EventId>,
    state: web::Data<AppState>,
) -> Result<impl Responder, APIError> {
    let event_id = path.into_inner();
    let report: campus_report_api_types::FeedbackReport =
        web::block(move || -> Result<_, APIError> {
            let mut store = state.store.get_facade()?;
            Ok(store.get_feedback_report(event_id)?)
        })
        .await??
        .into();
    Ok(web::Json(report))
}

#[get("/report/registrations/{event_id}")]
async fn get_registration_report(
    path: web::Path<EventId>,
    state: web::Data<AppState>,
) -> Result<impl Responder, APIError> {
    let event_id = path.into_inner();
    let report: campus_report_api_types::RegistrationReport =
        web::block(move || -> Result<_, APIError> {
            let mut store = state.store.get_facade()?;
            Ok(store.get_registration_report(event_id)?)
        })
        .await??
        .into();
    Ok(web::Json(report))
}
