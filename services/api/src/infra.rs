use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use portfolio_analytics::config::AnalyticsConfig;
use portfolio_analytics::error::AppError;
use portfolio_analytics::portfolio::{Portfolio, PortfolioImporter};
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Loads the configured CSV portfolio, or the built-in sample when no data
/// directory is set. A CSV portfolio without `tenants.csv` borrows the sample
/// tenant pool so stacking plans still have tenants to place.
pub(crate) fn load_portfolio(
    config: &AnalyticsConfig,
    override_dir: Option<&Path>,
) -> Result<Portfolio, AppError> {
    let dir = override_dir.or(config.data_dir.as_deref());
    let Some(dir) = dir else {
        info!("no portfolio data directory configured; using sample portfolio");
        return Ok(Portfolio::sample());
    };

    let mut portfolio = PortfolioImporter::from_dir(dir)?;
    if portfolio.tenant_pool.is_empty() {
        info!(dir = %dir.display(), "no tenant roster found; using sample tenant pool");
        portfolio.tenant_pool = Portfolio::sample().tenant_pool;
    }
    Ok(portfolio)
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
