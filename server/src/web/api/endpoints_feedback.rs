use crate::web::api::{created, APIError};
use crate::web::AppState;
use actix_web::{post, web, Responder};

#[post("/feedback")]
async fn submit_feedback(
    data: web::Json<campus_report_api_types::NewFeedback>,
    state: web::Data<AppState>,
) -> Result<impl Responder, APIError> {
    let feedback = data.into_inner();
    let feedback_id = web::block(move || -> Result<_, APIError> {
        let mut store = state.store.get_facade()?;
        Ok(store.submit_feedback(feedback.into())?)
    })
    .await??;

    Ok(created(feedback_id, "Feedback submitted"))
}
