use crate::cli_error::CliError;
use crate::data_store::{get_store_from_env, ReportStore};
use crate::setup::{get_listen_address_from_env, get_listen_port_from_env};
use actix_web::middleware::from_fn;
use actix_web::{middleware, web, App, HttpServer};
use log::info;
use std::sync::Arc;

mod api;
mod http_error_logging;

/// Open the database, apply pending schema migrations and run the web server until it is
/// terminated.
pub fn serve() -> Result<(), CliError> {
    let state = AppState::new()?;
    let listen_address = get_listen_address_from_env()?;
    let listen_port = get_listen_port_from_env()?;
    info!("Listening on http://{}:{}/", listen_address, listen_port);
    actix_web::rt::System::new()
        .block_on(
            HttpServer::new(move || {
                App::new()
                    .configure(api::configure_app)
                    .app_data(web::Data::new(state.clone()))
                    .wrap(from_fn(http_error_logging::error_logging_middleware))
                    .wrap(middleware::Compress::default())
            })
            .bind((listen_address, listen_port))
            .map_err(CliError::BindError)?
            .run(),
        )
        .map_err(CliError::ServerError)
}

#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn ReportStore>,
}

impl AppState {
    pub fn new() -> Result<Self, CliError> {
        let store = get_store_from_env()?;
        for migration in store.run_pending_migrations()? {
            info!("Applied database migration {}", migration);
        }
        Ok(Self {
            store: Arc::new(store),
        })
    }
}
