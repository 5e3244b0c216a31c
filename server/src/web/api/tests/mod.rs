
use super::*;
use crate::data_store::sqlite::SqliteDataStore;
use crate::web::AppState;
use actix_web::{http, test, web, App};
use campus_report_api_types::{
    AttendanceReport, CreationOutcome, FeedbackReport, HealthStatus, RegistrationReport,
};
use serde_json::json;
use std::sync::Arc;

fn migrated_in_memory_store() -> SqliteDataStore {
    let store = SqliteDataStore::new(":memory:", 1).unwrap();
    store.run_pending_migrations().unwrap();
    store
}

fn app_state(store: SqliteDataStore) -> AppState {
    AppState {
        store: Arc::new(store),
    }
}

#[actix_web::test]
async fn test_health_status() {
    let state = app_state(migrated_in_memory_store());
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;
    let req = test::TestRequest::get().uri("/").to_request();
    let result: HealthStatus = test::call_and_read_body_json(&app, req).await;
    assert_eq!(result.status, "ok");
}

#[actix_web::test]
async fn test_create_events() {
    let state = app_state(migrated_in_memory_store());
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;

    let mut last_id = 0;
    for name in ["Hackathon", "Career Fair", "Hackathon"] {
        let req = test::TestRequest::post()
            .uri("/events")
            .set_json(json!({"name": name, "type": "Fest", "date": "2025-10-01"}))
            .to_request();
        let result: CreationOutcome = test::call_and_read_body_json(&app, req).await;
        match result {
            CreationOutcome::Created { id, message } => {
                assert!(id > last_id);
                assert_eq!(message, "Event created");
                last_id = id;
            }
            CreationOutcome::Rejected { error } => panic!("Event rejected: {}", error),
        }
    }
}

#[actix_web::test]
async fn test_duplicate_student_email() {
    let state = app_state(migrated_in_memory_store());
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;
    let student = json!({"name": "Alex", "email": "alex@campus.example"});

    let req = test::TestRequest::post()
        .uri("/students")
        .set_json(&student)
        .to_request();
    let result: CreationOutcome = test::call_and_read_body_json(&app, req).await;
    assert!(matches!(result, CreationOutcome::Created { .. }));

    let req = test::TestRequest::post()
        .uri("/students")
        .set_json(&student)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let result: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(result, json!({"error": "Email already exists"}));
}

#[actix_web::test]
async fn test_duplicate_registration() {
    let state = app_state(migrated_in_memory_store());
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;
    let registration = json!({"student_id": 1, "event_id": 1});

    let req = test::TestRequest::post()
        .uri("/registrations")
        .set_json(&registration)
        .to_request();
    let result: CreationOutcome = test::call_and_read_body_json(&app, req).await;
    assert!(matches!(
        result,
        CreationOutcome::Created { ref message, .. } if message == "Registered"
    ));

    let req = test::TestRequest::post()
        .uri("/registrations")
        .set_json(&registration)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let result: CreationOutcome = test::read_body_json(res).await;
    assert_eq!(
        result,
        CreationOutcome::Rejected {
            error: "Already registered".to_owned()
        }
    );

    let req = test::TestRequest::get()
        .uri("/report/registrations/1")
        .to_request();
    let result: RegistrationReport = test::call_and_read_body_json(&app, req).await;
    assert_eq!(result.registrations, 1);
}

#[actix_web::test]
async fn test_attendance_report() {
    let store = migrated_in_memory_store();
    let event_id = sample_data::fill_sample_data(&store);
    let state = app_state(store);
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri(&format!("/report/attendance/{}", event_id))
        .to_request();
    let result: AttendanceReport = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        result,
        AttendanceReport {
            event_id,
            registrations: 10,
            present: 4,
            attendance_percentage: 40.0,
        }
    );

    let req = test::TestRequest::get()
        .uri(&format!("/report/attendance/{}", event_id + 1))
        .to_request();
    let result: AttendanceReport = test::call_and_read_body_json(&app, req).await;
    assert_eq!(result.registrations, 0);
    assert_eq!(result.attendance_percentage, 0.0);
}

#[actix_web::test]
async fn test_attendance_report_counts_repeated_records() {
    let state = app_state(migrated_in_memory_store());
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/registrations")
        .set_json(json!({"student_id": 1, "event_id": 9}))
        .to_request();
    test::call_service(&app, req).await;
    for present in [true, true, false] {
        let req = test::TestRequest::post()
            .uri("/attendance")
            .set_json(json!({"student_id": 1, "event_id": 9, "present": present}))
            .to_request();
        let result: CreationOutcome = test::call_and_read_body_json(&app, req).await;
        assert!(matches!(
            result,
            CreationOutcome::Created { ref message, .. } if message == "Attendance recorded"
        ));
    }

    let req = test::TestRequest::get()
        .uri("/report/attendance/9")
        .to_request();
    let result: AttendanceReport = test::call_and_read_body_json(&app, req).await;
    assert_eq!(result.registrations, 1);
    assert_eq!(result.present, 2);
    assert_eq!(result.attendance_percentage, 200.0);
}

#[actix_web::test]
async fn test_feedback_report() {
    let store = migrated_in_memory_store();
    let event_id = sample_data::fill_sample_data(&store);
    let state = app_state(store);
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri(&format!("/report/feedback/{}", event_id))
        .to_request();
    let result: FeedbackReport = test::call_and_read_body_json(&app, req).await;
    assert_eq!(result.avg_rating, Some(4.0));
    assert_eq!(result.responses, 3);

    let req = test::TestRequest::get()
        .uri(&format!("/report/feedback/{}", event_id + 1))
        .to_request();
    let result: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        result,
        json!({"event_id": event_id + 1, "avg_rating": null, "responses": 0})
    );
}

#[actix_web::test]
async fn test_submit_feedback() {
    let state = app_state(migrated_in_memory_store());
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;

    for body in [
        json!({"student_id": 1, "event_id": 2, "rating": 2}),
        json!({"student_id": 2, "event_id": 2, "rating": 10, "comment": "Too short"}),
        json!({"student_id": 2, "event_id": 2, "rating": -3, "comment": null}),
    ] {
        let req = test::TestRequest::post()
            .uri("/feedback")
            .set_json(body)
            .to_request();
        let result: CreationOutcome = test::call_and_read_body_json(&app, req).await;
        assert!(matches!(
            result,
            CreationOutcome::Created { ref message, .. } if message == "Feedback submitted"
        ));
    }

    let req = test::TestRequest::get()
        .uri("/report/feedback/2")
        .to_request();
    let result: FeedbackReport = test::call_and_read_body_json(&app, req).await;
    assert_eq!(result.avg_rating, Some(3.0));
    assert_eq!(result.responses, 3);
}

#[actix_web::test]
async fn test_registration_report_of_unknown_event() {
    let store = migrated_in_memory_store();
    sample_data::fill_sample_data(&store);
    let state = app_state(store);
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/report/registrations/4711")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let result: RegistrationReport = test::read_body_json(res).await;
    assert_eq!(
        result,
        RegistrationReport {
            event_id: 4711,
            registrations: 0
        }
    );
}

#[actix_web::test]
async fn test_integers_beyond_32_bit() {
    let state = app_state(migrated_in_memory_store());
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;
    let event_id: i64 = 3_000_000_000;

    let req = test::TestRequest::post()
        .uri("/feedback")
        .set_json(json!({"student_id": 1, "event_id": event_id, "rating": 3_000_000_000i64}))
        .to_request();
    let result: CreationOutcome = test::call_and_read_body_json(&app, req).await;
    assert!(matches!(
        result,
        CreationOutcome::Created { ref message, .. } if message == "Feedback submitted"
    ));

    let req = test::TestRequest::get()
        .uri(&format!("/report/feedback/{}", event_id))
        .to_request();
    let result: FeedbackReport = test::call_and_read_body_json(&app, req).await;
    assert_eq!(result.avg_rating, Some(3_000_000_000.0));
    assert_eq!(result.responses, 1);

    let req = test::TestRequest::get()
        .uri(&format!("/report/registrations/{}", event_id))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let result: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(result, json!({"event_id": 3_000_000_000i64, "registrations": 0}));
}

#[actix_web::test]
async fn test_invalid_requests() {
    let state = app_state(migrated_in_memory_store());
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;

    // missing field
    let req = test::TestRequest::post()
        .uri("/events")
        .set_json(json!({"name": "Hackathon", "date": "2025-10-01"}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::UNPROCESSABLE_ENTITY);
    let result: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(result["httpCode"], 422);

    // wrong field type
    let req = test::TestRequest::post()
        .uri("/attendance")
        .set_json(json!({"student_id": 1, "event_id": 1, "present": "yes"}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::UNPROCESSABLE_ENTITY);

    // malformed JSON
    let req = test::TestRequest::post()
        .uri("/students")
        .insert_header(http::header::ContentType::json())
        .set_payload("{\"name\": ")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::BAD_REQUEST);

    // invalid path parameter
    let req = test::TestRequest::get()
        .uri("/report/attendance/first")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::UNPROCESSABLE_ENTITY);
}

#[actix_web::test]
async fn test_storage_failure() {
    // Without migrations, the database has no tables
    let state = app_state(SqliteDataStore::new(":memory:", 1).unwrap());
    let app = test::init_service(
        App::new()
            .configure(configure_app)
            .app_data(web::Data::new(state)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/students")
        .set_json(json!({"name": "Alex", "email": "alex@campus.example"}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), http::StatusCode::INTERNAL_SERVER_ERROR);
    let result: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(result["httpCode"], 500);
}

#[::core::prelude::v1::test]
fn test_store_error_status_codes() {
    assert_eq!(
        APIError::from(StoreError::NotExisting).status_code(),
        http::StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
        APIError::from(StoreError::ConflictEntityExists).status_code(),
        http::StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
        APIError::from(StoreError::TransactionConflict).status_code(),
        http::StatusCode::SERVICE_UNAVAILABLE
    );
    assert_eq!(
        APIError::from(StoreError::InvalidInputData("rating".to_owned())).status_code(),
        http::StatusCode::UNPROCESSABLE_ENTITY
    );
}
