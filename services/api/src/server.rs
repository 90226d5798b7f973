use crate::cli::ServeArgs;
use crate::infra::{load_roster, sample_roster, AppState, InMemoryRosterRepository};
use crate::routes::with_advisory_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use contract_advisor::advisory::ContractAdvisoryService;
use contract_advisor::config::AppConfig;
use contract_advisor::error::AppError;
use contract_advisor::telemetry;
use std::sync::atomic::Ordering;
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

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = if config.roster.csv_path.is_some() {
        load_roster(None, &config.roster)?
    } else {
        warn!("APP_ROSTER_CSV not set; serving the built-in sample roster");
        InMemoryRosterRepository::new(sample_roster())
    };
    let roster_size = repository.len();
    let advisory_service = Arc::new(ContractAdvisoryService::new(Arc::new(repository)));
    let table_version = advisory_service.rule_table().version.clone();

    let app = with_advisory_routes(advisory_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        roster_size,
        %table_version,
        "contract advisor ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
