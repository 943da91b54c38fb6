use crate::cli::ServeArgs;
use crate::infra::{load_portfolio, AppState};
use crate::routes::with_analytics_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use portfolio_analytics::analytics::router::AnalyticsState;
use portfolio_analytics::config::AppConfig;
use portfolio_analytics::error::AppError;
use portfolio_analytics::telemetry;
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

    let portfolio = load_portfolio(&config.analytics, None)?;
    info!(
        buildings = portfolio.buildings.len(),
        leases = portfolio.leases.len(),
        tenant_pool = portfolio.tenant_pool.len(),
        missing_rsf = ?config.analytics.missing_rsf,
        "portfolio loaded"
    );
    let analytics = Arc::new(AnalyticsState::new(portfolio, &config.analytics));

    let app = with_analytics_routes(analytics)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "portfolio analytics service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
