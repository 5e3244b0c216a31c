use crate::data_store::StoreError;
use crate::web::api::{created, rejected, APIError};
use crate::web::AppState;
use actix_web::{post, web, Responder};
use log::info;

#[post("/registrations")]
async fn create_registration(
    data: web::Json<campus_report_api_types::NewRegistration>,
    state: web::Data<AppState>,
) -> Result<impl Responder, APIError> {
    let registration = data.into_inner();
    let (student_id, event_id) = (registration.student_id, registration.event_id);
    let result = web::block(move || -> Result<_, APIError> {
        let mut store = state.store.get_facade()?;
        Ok(store.create_registration(registration.into()))
    })
    .await??;

    match result {
        Ok(registration_id) => Ok(created(registration_id, "Registered")),
        Err(StoreError::ConflictEntityExists) => {
            info!(
                "Rejected duplicate registration of student {} for event {}",
                student_id, event_id
            );
            Ok(rejected("Already registered"))
        }
        Err(e) => Err(e.into()),
    }
}
