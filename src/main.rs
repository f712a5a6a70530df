//! HTTP server for the Compensation Engine.
//!
//! Environment:
//! - `COMPENSATION_CONFIG`: calculator configuration file
//!   (default `./config/calculator.yaml`; built-in defaults when absent)
//! - `COMPENSATION_STORE`: JSON file for employee records (in-memory when unset)
//! - `COMPENSATION_ADDR`: listen address (default `127.0.0.1:3000`)
//! - `RUST_LOG`: log filter (default `info`)

use std::env;
use std::path::Path;
use std::sync::Arc;

use compensation_engine::api::{AppState, create_router};
use compensation_engine::config::ConfigLoader;
use compensation_engine::store::{EmployeeRepository, InMemoryRepository, JsonFileRepository};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_PATH: &str = "./config/calculator.yaml";
const DEFAULT_ADDR: &str = "127.0.0.1:3000";

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn load_config() -> Result<ConfigLoader, compensation_engine::error::EngineError> {
    match env::var("COMPENSATION_CONFIG") {
        Ok(path) => ConfigLoader::load(path),
        Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => ConfigLoader::load(DEFAULT_CONFIG_PATH),
        Err(_) => {
            warn!(path = DEFAULT_CONFIG_PATH, "No configuration file, using built-in defaults");
            Ok(ConfigLoader::default())
        }
    }
}

fn open_repository() -> Result<Arc<dyn EmployeeRepository>, compensation_engine::error::EngineError>
{
    match env::var("COMPENSATION_STORE") {
        Ok(path) => {
            let repository = JsonFileRepository::open(path)?;
            info!(
                path = %repository.path().display(),
                records = repository.list()?.len(),
                "Using JSON record store"
            );
            Ok(Arc::new(repository))
        }
        Err(_) => {
            info!("Using in-memory record store");
            Ok(Arc::new(InMemoryRepository::new()))
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = load_config()?;
    info!(
        annualisation = config.annualisation().as_str(),
        negative_remainder = config.negative_remainder().as_str(),
        "Configuration loaded"
    );

    let state = AppState::new(config, open_repository()?);
    let app = create_router(state);

    let addr = env::var("COMPENSATION_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Compensation engine listening");

    axum::serve(listener, app).await?;
    Ok(())
}
