use crate::data_store::StoreError;
use crate::web::api::{created, rejected, APIError};
use crate::web::AppState;
use actix_web::{post, web, Responder};
use log::info;

#[post("/students")]
async fn create_student(
    data: web::Json<campus_report_api_types::NewStudent>,
    state: web::Data<AppState>,
) -> Result<impl Responder, APIError> {
    let student = data.into_inner();
    let email = student.email.clone();
    let result = web::block(move || -> Result<_, APIError> {
        let mut store = state.store.get_facade()?;
        Ok(store.create_student(student.into()))
    })
    .await??;

    match result {
        Ok(student_id) => Ok(created(student_id, "Student created")),
        Err(StoreError::ConflictEntityExists) => {
            info!("Rejected student with existing email address <{}>", email);
            Ok(rejected("Email already exists"))
        }
        Err(e) => Err(e.into()),
    }
}
