use actix_web::{get, web, Responder};

#[get("/")]
async fn get_status() -> impl Responder {
    web::Json(campus_report_api_types::HealthStatus {
        status: "ok".to_owned(),
        message: "Campus Event Reporting API is running".to_owned(),
    })
}
