use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_screening_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use self_screener::config::AppConfig;
use self_screener::error::AppError;
use self_screener::screening::{InMemorySessionRepository, ScreeningService};
use self_screener::telemetry;
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

    telemetry::init(&config.telemetry, config.environment)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemorySessionRepository::with_limits(
        config.screening.session_capacity,
        config.screening.session_ttl,
    ));
    let capacity = repository.capacity();
    let screening_service = Arc::new(ScreeningService::new(
        repository,
        config.screening.guidance_namespace,
    ));
    let namespace = screening_service.guidance().namespace();

    let app = with_screening_routes(screening_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        %namespace,
        capacity,
        idle_ttl_secs = config.screening.session_ttl.num_seconds(),
        "self-screener service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
