use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryDraftRepository, LoggingSubmissionPublisher};
use crate::routes::with_application_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use dfsa_wizard::config::AppConfig;
use dfsa_wizard::error::AppError;
use dfsa_wizard::telemetry;
use dfsa_wizard::workflows::fs_application::FsApplicationService;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let visibility = config.drafts.visibility_engine()?;
    let application_service = Arc::new(
        FsApplicationService::new(
            Arc::new(InMemoryDraftRepository::default()),
            Arc::new(LoggingSubmissionPublisher::default()),
        )
        .with_visibility(visibility)
        .with_max_drafts(config.drafts.max_drafts),
    );

    let app = with_application_routes(application_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        max_drafts = config.drafts.max_drafts,
        configured_rules = config.drafts.rules_path.is_some(),
        "dfsa application wizard ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
