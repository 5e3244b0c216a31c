use crate::web::api::APIError;
use log::{error, warn};

/// Middleware for logging all error responses of the API handlers, together with the requested
/// URI.
///
/// Internal errors are logged at error level, invalid requests and locked databases as warnings.
pub async fn error_logging_middleware<B: actix_web::body::MessageBody>(
    req: actix_web::dev::ServiceRequest,
    next: actix_web::middleware::Next<B>,
) -> Result<actix_web::dev::ServiceResponse<B>, actix_web::Error> {
    let response = next.call(req).await?;

    if let Some(error) = response.response().error() {
        if let Some(api_error) = error.as_error::<APIError>() {
            match api_error {
                APIError::InvalidJson(_) | APIError::InvalidPath(_) | APIError::InvalidData(_) => {
                    warn!(
                        "HTTP {} invalid request at <{}>: {}",
                        response.response().status(),
                        response.request().uri(),
                        api_error
                    );
                }
                APIError::TransactionConflict => {
                    warn!(
                        "HTTP {} database locked at <{}>",
                        response.response().status(),
                        response.request().uri(),
                    );
                }
                APIError::InternalError(e) => {
                    error!(
                        "HTTP {} internal server error at <{}>: {}",
                        response.response().status(),
                        response.request().uri(),
                        e
                    );
                }
            }
        } else {
            error!(
                "HTTP {} unexpected error at <{}>: {:?}",
                response.response().status(),
                response.request().uri(),
                error
            );
        }
    }
    Ok(response)
}
