use crate::cli::ServeArgs;
use crate::infra::{
    seed_demo_data, AppState, InMemoryContentStore, InMemoryProfileSource,
    InMemoryTargetingGroupStore,
};
use crate::routes::with_selection_routes;
use adselect::ads::selection::AdvertisementSelector;
use adselect::ads::targeting::predicate::codec::PredicateFactory;
use adselect::ads::targeting::{EvaluatorPool, TargetingEvaluator};
use adselect::config::AppConfig;
use adselect::error::AppError;
use adselect::telemetry;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
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
    if let Some(pool_size) = args.pool_size.take() {
        config.evaluator.pool_size = pool_size;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let contents = Arc::new(InMemoryContentStore::default());
    let groups = Arc::new(InMemoryTargetingGroupStore::default());
    let profiles = Arc::new(InMemoryProfileSource::default());
    let factory = PredicateFactory::new(profiles.clone());
    seed_demo_data(&contents, &groups, &profiles, &factory);

    // One bounded pool for the whole process; every request's predicate
    // evaluations share it.
    let pool = Arc::new(EvaluatorPool::from_config(&config.evaluator));
    let selector = Arc::new(AdvertisementSelector::new(
        contents,
        groups,
        TargetingEvaluator::new(pool),
    ));

    let app = with_selection_routes(selector)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "advertisement selection service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
