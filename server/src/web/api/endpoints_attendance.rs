use crate::web::api::{created, APIError};
use crate::web::AppState;
use actix_web::{post, web, Responder};

#[post("/attendance")]
async fn record_attendance(
    data: web::Json<campus_report_api_types::NewAttendance>,
    state: web::Data<AppState>,
) -> Result<impl Responder, APIError> {
    let attendance = data.into_inner();
    let attendance_id = web::block(move || -> Result<_, APIError> {
        let mut store = state.store.get_facade()?;
        Ok(store.record_attendance(attendance.into())?)
    })
    .await??;

    Ok(created(attendance_id, "Attendance recorded"))
}
