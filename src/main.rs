use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;
use payroll_engine::store::InMemoryEmployeeDirectory;
use payroll_engine::workflow::PayrollService;

const DEFAULT_CONFIG_DIR: &str = "./config";
const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_dir =
        std::env::var("PAYROLL_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let listen_addr =
        std::env::var("PAYROLL_LISTEN_ADDR").unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string());

    let loader = ConfigLoader::load(&config_dir)?;
    let directory = Arc::new(InMemoryEmployeeDirectory::from_seeds(loader.employees())?);
    let service = PayrollService::in_memory(directory, loader.rules().clone());
    info!(
        config_dir = %config_dir,
        employees = loader.employees().len(),
        "Configuration loaded"
    );

    let app = create_router(AppState::new(service));
    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    info!(listen_addr = %listen_addr, "Payroll engine listening");
    axum::serve(listener, app).await?;

    Ok(())
}
