use std::env;
use std::env::VarError;
use std::fmt::{Display, Formatter};

const DEFAULT_DATABASE_URL: &str = "events.db";
const DEFAULT_DATABASE_POOL_SIZE: u32 = 4;
const DEFAULT_LISTEN_ADDRESS: &str = "127.0.0.1";
const DEFAULT_LISTEN_PORT: u16 = 8000;

/// Get the database URL (path of the SQLite database file) from the environment variable.
pub fn get_database_url_from_env() -> Result<String, SetupError> {
    Ok(get_optional_env_var("DATABASE_URL")?.unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned()))
}

/// Get the maximum number of pooled database connections from the environment variable
pub fn get_database_pool_size_from_env() -> Result<u32, SetupError> {
    get_optional_env_var("DATABASE_POOL_SIZE")?
        .map(|v| parse_database_pool_size(&v))
        .unwrap_or(Ok(DEFAULT_DATABASE_POOL_SIZE))
}

/// Get the web server TCP listening port from the environment variable
pub fn get_listen_port_from_env() -> Result<u16, SetupError> {
    get_optional_env_var("LISTEN_PORT")?
        .map(|v| parse_listen_port(&v))
        .unwrap_or(Ok(DEFAULT_LISTEN_PORT))
}

/// Get the web server TCP listening interface address from the environment variable
pub fn get_listen_address_from_env() -> Result<String, SetupError> {
    Ok(get_optional_env_var("LISTEN_ADDRESS")?
        .unwrap_or_else(|| DEFAULT_LISTEN_ADDRESS.to_owned()))
}

fn get_optional_env_var(variable_name: &'static str) -> Result<Option<String>, SetupError> {
    match env::var(variable_name) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(SetupError::EnvVariableInvalid {
            variable_name,
            problem: "no valid unicode",
        }),
    }
}

fn parse_listen_port(value: &str) -> Result<u16, SetupError> {
    value.parse().map_err(|_| SetupError::EnvVariableInvalid {
        variable_name: "LISTEN_PORT",
        problem: "Not a valid uint16",
    })
}

fn parse_database_pool_size(value: &str) -> Result<u32, SetupError> {
    match value.parse::<u32>() {
        Ok(0) | Err(_) => Err(SetupError::EnvVariableInvalid {
            variable_name: "DATABASE_POOL_SIZE",
            problem: "Not a positive uint32",
        }),
        Ok(size) => Ok(size),
    }
}

#[derive(Debug)]
pub enum SetupError {
    EnvVariableInvalid {
        variable_name: &'static str,
        problem: &'static str,
    },
}

impl Display for SetupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SetupError::EnvVariableInvalid {
                variable_name,
                problem,
            } => write!(
                f,
                "Value of environment variable {} is invalid: {}",
                variable_name, problem
            ),
        }
    }
}
