use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use chrono::{Local, NaiveDate};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::lease_terms::{
    bucket_lease_terms, LeaseScope, LeaseTermDistribution, LeaseTermOptions, MissingRsfPolicy,
    RegionDirectory, RegionMatch,
};
use super::stacking::views::StackingPlanView;
use super::stacking::{generate_stacking_plan, StackingConfig, MAX_FLOORS};
use crate::config::AnalyticsConfig;
use crate::error::AppError;
use crate::portfolio::domain::{Building, BuildingEnvelope, BuildingId, Portfolio};

/// Read-only data shared by the analytics handlers.
#[derive(Debug, Clone)]
pub struct AnalyticsState {
    pub portfolio: Portfolio,
    pub regions: RegionDirectory,
    pub stacking: StackingConfig,
    pub missing_rsf: MissingRsfPolicy,
    pub stacking_seed: Option<u64>,
}

impl AnalyticsState {
    pub fn new(portfolio: Portfolio, config: &AnalyticsConfig) -> Self {
        Self {
            portfolio,
            regions: RegionDirectory::piedmont(),
            stacking: config.stacking.clone(),
            missing_rsf: config.missing_rsf,
            stacking_seed: config.stacking_seed,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionMatchMode {
    #[default]
    Substring,
    Directory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingRsfMode {
    Default,
    Exclude,
}

#[derive(Debug, Default, Deserialize)]
pub struct LeaseTermsRequest {
    #[serde(default)]
    pub building_id: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub region_match: RegionMatchMode,
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
    #[serde(default)]
    pub missing_rsf: Option<MissingRsfMode>,
}

#[derive(Debug, Serialize)]
pub struct LeaseTermsResponse {
    pub as_of: NaiveDate,
    #[serde(flatten)]
    pub distribution: LeaseTermDistribution,
}

#[derive(Debug, Default, Deserialize)]
pub struct StackingPlanRequest {
    #[serde(default)]
    pub building_id: Option<String>,
    #[serde(default)]
    pub floors: Option<u32>,
    #[serde(default)]
    pub square_foot: Option<u64>,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct StackingPlanResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub building_id: Option<BuildingId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub building_name: Option<String>,
    pub envelope: BuildingEnvelope,
    /// Seed that reproduces this plan.
    pub seed: u64,
    pub rollover_floors: Vec<u32>,
    pub plan: StackingPlanView,
}

#[derive(Debug, Serialize)]
pub struct BuildingSummary {
    pub id: BuildingId,
    pub name: String,
    pub city: String,
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_rentable_area: Option<u64>,
    pub floors: u32,
    pub lease_count: usize,
}

/// Router builder exposing the lease term and stacking plan endpoints.
pub fn analytics_router(state: Arc<AnalyticsState>) -> Router {
    Router::new()
        .route("/api/v1/portfolio/lease-terms", post(lease_terms_handler))
        .route("/api/v1/buildings", get(buildings_handler))
        .route(
            "/api/v1/buildings/stacking-plan",
            post(stacking_plan_handler),
        )
        .with_state(state)
}

pub(crate) async fn lease_terms_handler(
    State(state): State<Arc<AnalyticsState>>,
    Json(request): Json<LeaseTermsRequest>,
) -> Json<LeaseTermsResponse> {
    Json(lease_terms(&state, request, Local::now().date_naive()))
}

pub(crate) async fn buildings_handler(
    State(state): State<Arc<AnalyticsState>>,
) -> Json<Vec<BuildingSummary>> {
    Json(building_roster(&state))
}

pub(crate) async fn stacking_plan_handler(
    State(state): State<Arc<AnalyticsState>>,
    Json(request): Json<StackingPlanRequest>,
) -> Result<Json<StackingPlanResponse>, AppError> {
    stacking_plan(&state, request).map(Json)
}

/// Computes a distribution for the request, using `today` when the request
/// carries no `as_of` date.
pub fn lease_terms(
    state: &AnalyticsState,
    request: LeaseTermsRequest,
    today: NaiveDate,
) -> LeaseTermsResponse {
    let scope = LeaseScope::from_filters(request.building_id.as_deref(), request.region.as_deref());
    let options = LeaseTermOptions {
        region_match: match request.region_match {
            RegionMatchMode::Substring => RegionMatch::Substring,
            RegionMatchMode::Directory => RegionMatch::Directory(state.regions.clone()),
        },
        missing_rsf: match request.missing_rsf {
            Some(MissingRsfMode::Exclude) => MissingRsfPolicy::Exclude,
            Some(MissingRsfMode::Default) => MissingRsfPolicy::default(),
            None => state.missing_rsf,
        },
    };
    let as_of = request.as_of.unwrap_or(today);

    let distribution = bucket_lease_terms(
        &state.portfolio.leases,
        &state.portfolio.buildings,
        &scope,
        &options,
        as_of,
    );

    debug!(
        scope = distribution.scope_label(),
        empty = distribution.is_empty(),
        %as_of,
        "lease term distribution computed"
    );

    LeaseTermsResponse {
        as_of,
        distribution,
    }
}

pub fn building_roster(state: &AnalyticsState) -> Vec<BuildingSummary> {
    state
        .portfolio
        .buildings
        .iter()
        .map(|building| BuildingSummary {
            id: building.id.clone(),
            name: building.name.clone(),
            city: building.city.clone(),
            state: building.state.clone(),
            region: state.regions.region_for(building).map(str::to_string),
            total_rentable_area: building.rentable_area(),
            floors: building.floors,
            lease_count: state
                .portfolio
                .leases
                .iter()
                .filter(|lease| lease.building_id == building.id)
                .count(),
        })
        .collect()
}

/// Resolves the building envelope and lays out a plan. Explicit `floors` and
/// `square_foot` override the building record.
pub fn stacking_plan(
    state: &AnalyticsState,
    request: StackingPlanRequest,
) -> Result<StackingPlanResponse, AppError> {
    let building = match request
        .building_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
    {
        Some(id) => Some(lookup_building(&state.portfolio, id)?),
        None => None,
    };

    let envelope = resolve_envelope(building, request.floors, request.square_foot)?;
    let seed = request
        .seed
        .or(state.stacking_seed)
        .unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let plan = generate_stacking_plan(
        envelope,
        &state.portfolio.tenant_pool,
        &state.stacking,
        &mut rng,
    );

    info!(
        building = building.map(|b| b.id.as_str()).unwrap_or("ad-hoc"),
        floors = envelope.floors,
        square_foot = envelope.square_foot,
        seed,
        tenants_placed = plan.tenants_placed,
        "stacking plan generated"
    );

    Ok(StackingPlanResponse {
        building_id: building.map(|b| b.id.clone()),
        building_name: building.map(|b| b.name.clone()),
        envelope,
        seed,
        rollover_floors: plan.rollover_floors(),
        plan: plan.to_view(),
    })
}

fn lookup_building<'a>(portfolio: &'a Portfolio, id: &str) -> Result<&'a Building, AppError> {
    portfolio
        .building(&BuildingId::new(id))
        .ok_or_else(|| AppError::NotFound(format!("building '{}'", id)))
}

fn resolve_envelope(
    building: Option<&Building>,
    floors: Option<u32>,
    square_foot: Option<u64>,
) -> Result<BuildingEnvelope, AppError> {
    let floors = floors.or(building.map(|b| b.floors));
    let square_foot = square_foot.or(building.and_then(Building::rentable_area));

    match (floors, square_foot) {
        (Some(floors), Some(_)) if floors > MAX_FLOORS => Err(AppError::InvalidRequest(format!(
            "floors must be at most {}, got {}",
            MAX_FLOORS, floors
        ))),
        (Some(floors), Some(square_foot)) => Ok(BuildingEnvelope {
            floors,
            square_foot,
        }),
        (_, None) if building.is_some() => Err(AppError::InvalidRequest(
            "building has no rentable area on record; supply square_foot".to_string(),
        )),
        _ => Err(AppError::InvalidRequest(
            "supply building_id or both floors and square_foot".to_string(),
        )),
    }
}
