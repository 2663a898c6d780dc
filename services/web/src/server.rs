use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::site_router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use pioneer_site::config::{AppConfig, AppEnvironment, StorageConfig};
use pioneer_site::error::AppError;
use pioneer_site::intake::{CsvRecordStore, RecordStore, SubmissionService};
use pioneer_site::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(data_dir) = args.data_dir.take() {
        config.storage = StorageConfig::new(data_dir);
    }

    telemetry::init(&config.telemetry)?;

    if config.environment == AppEnvironment::Production && config.session.uses_default_secret() {
        warn!("SESSION_SECRET is unset; using the development default in production");
    }

    let store = Arc::new(CsvRecordStore::new(config.storage.clone()));
    store.ensure_initialized()?;
    let submissions = Arc::new(SubmissionService::new(store));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = site_router(submissions)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        data_dir = %config.storage.data_dir.display(),
        "pioneer site ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
