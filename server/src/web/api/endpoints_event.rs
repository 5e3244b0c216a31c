use crate::web::api::{created, APIError};
use crate::web::AppState;
use actix_web::{post, web, Responder};

#[post("/events")]
async fn create_event(
    data: web::Json<campus_report_api_types::NewEvent>,
    state: web::Data<AppState>,
) -> Result<impl Responder, APIError> {
    let event = data.into_inner();
    let event_id = web::block(move || -> Result<_, APIError> {
        let mut store = state.store.get_facade()?;
        Ok(store.create_event(event.into())?)
    })
    .await??;

    Ok(created(event_id, "Event created"))
}
