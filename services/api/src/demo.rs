use crate::infra::{load_portfolio, parse_date};
use chrono::{Local, NaiveDate};
use clap::Args;
use portfolio_analytics::analytics::lease_terms::TermBucketEntry;
use portfolio_analytics::analytics::router::{
    lease_terms, stacking_plan, AnalyticsState, LeaseTermsRequest, LeaseTermsResponse,
    MissingRsfMode, RegionMatchMode, StackingPlanRequest, StackingPlanResponse,
};
use portfolio_analytics::analytics::stacking::{FloorTier, StackingConfig};
use portfolio_analytics::config::{AnalyticsConfig, AppConfig};
use portfolio_analytics::error::AppError;
use portfolio_analytics::portfolio::Portfolio;
use serde::Serialize;
use std::path::PathBuf;

const DEMO_SEED: u64 = 2024;

#[derive(Args, Debug, Default)]
pub(crate) struct LeaseTermsArgs {
    /// Restrict to a single building id
    #[arg(long)]
    pub(crate) building: Option<String>,
    /// Restrict to buildings whose city, state or region matches
    #[arg(long)]
    pub(crate) region: Option<String>,
    /// Match --region against the city directory instead of by substring
    #[arg(long)]
    pub(crate) directory: bool,
    /// Reference date for remaining terms (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
    /// Drop leases whose building has no rentable area instead of assuming one
    #[arg(long)]
    pub(crate) exclude_missing_rsf: bool,
    /// Directory holding buildings.csv and leases.csv
    #[arg(long)]
    pub(crate) data_dir: Option<PathBuf>,
    /// Print the JSON payload served by the HTTP endpoint
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct StackingPlanArgs {
    /// Building id to lay out
    #[arg(long, required_unless_present_all = ["floors", "square_foot"])]
    pub(crate) building: Option<String>,
    /// Floor count for an ad-hoc envelope, or an override for --building
    #[arg(long)]
    pub(crate) floors: Option<u32>,
    /// Rentable square footage for an ad-hoc envelope
    #[arg(long)]
    pub(crate) square_foot: Option<u64>,
    /// Seed for a reproducible layout
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Directory holding the portfolio CSV exports
    #[arg(long)]
    pub(crate) data_dir: Option<PathBuf>,
    /// Print the JSON payload served by the HTTP endpoint
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Reference date for remaining terms (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
    /// Seed for the stacking plan portion of the demo
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

pub(crate) fn run_lease_terms(args: LeaseTermsArgs) -> Result<(), AppError> {
    let state = load_state(args.data_dir.as_deref())?;
    let today = Local::now().date_naive();
    let request = LeaseTermsRequest {
        building_id: args.building,
        region: args.region,
        region_match: if args.directory {
            RegionMatchMode::Directory
        } else {
            RegionMatchMode::Substring
        },
        as_of: args.as_of,
        missing_rsf: args.exclude_missing_rsf.then_some(MissingRsfMode::Exclude),
    };

    let response = lease_terms(&state, request, today);
    if args.json {
        print_json(&response);
    } else {
        render_lease_terms(&response);
    }
    Ok(())
}

pub(crate) fn run_stacking_plan(args: StackingPlanArgs) -> Result<(), AppError> {
    let state = load_state(args.data_dir.as_deref())?;
    let request = StackingPlanRequest {
        building_id: args.building,
        floors: args.floors,
        square_foot: args.square_foot,
        seed: args.seed,
    };

    let response = stacking_plan(&state, request)?;
    if args.json {
        print_json(&response);
    } else {
        render_stacking_plan(&response, &state.stacking);
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { as_of, seed } = args;
    let today = as_of.unwrap_or_else(|| Local::now().date_naive());
    let state = AnalyticsState::new(Portfolio::sample(), &AnalyticsConfig::default());

    println!("Portfolio analytics demo");
    println!(
        "Sample portfolio: {} buildings, {} leases, {} tenants in the stacking pool",
        state.portfolio.buildings.len(),
        state.portfolio.leases.len(),
        state.portfolio.tenant_pool.len()
    );

    println!();
    render_lease_terms(&lease_terms(&state, LeaseTermsRequest::default(), today));

    println!();
    let regional = LeaseTermsRequest {
        region: Some("Piedmont Triad".to_string()),
        region_match: RegionMatchMode::Directory,
        ..LeaseTermsRequest::default()
    };
    render_lease_terms(&lease_terms(&state, regional, today));

    println!();
    let missing = LeaseTermsRequest {
        building_id: Some("unknown-building".to_string()),
        ..LeaseTermsRequest::default()
    };
    render_lease_terms(&lease_terms(&state, missing, today));

    println!();
    let plan = stacking_plan(
        &state,
        StackingPlanRequest {
            building_id: Some("gso-friendly".to_string()),
            seed: Some(seed.unwrap_or(DEMO_SEED)),
            ..StackingPlanRequest::default()
        },
    )?;
    render_stacking_plan(&plan, &state.stacking);

    Ok(())
}

fn load_state(data_dir: Option<&std::path::Path>) -> Result<AnalyticsState, AppError> {
    let config = AppConfig::load()?;
    let portfolio = load_portfolio(&config.analytics, data_dir)?;
    Ok(AnalyticsState::new(portfolio, &config.analytics))
}

fn print_json<T: Serialize>(payload: &T) {
    match serde_json::to_string_pretty(payload) {
        Ok(json) => println!("{}", json),
        Err(err) => println!("JSON payload unavailable: {}", err),
    }
}

pub(crate) fn render_lease_terms(response: &LeaseTermsResponse) {
    let distribution = &response.distribution;
    println!(
        "Lease term distribution: {} (as of {})",
        distribution.scope_label(),
        response.as_of
    );

    match distribution.summary() {
        Some(summary) => {
            render_buckets(&summary.buckets);
            println!(
                "Total: {:.1}M RSF across {} leases",
                summary.total_rsf_millions, summary.lease_count
            );
            if summary.unclassified_leases > 0 {
                println!(
                    "Unclassified (no expiration date): {}",
                    summary.unclassified_leases
                );
            }
            if summary.defaulted_rsf_leases > 0 {
                println!(
                    "Leases using the default building area: {}",
                    summary.defaulted_rsf_leases
                );
            }
            if summary.excluded_missing_rsf > 0 {
                println!(
                    "Excluded for missing building area: {}",
                    summary.excluded_missing_rsf
                );
            }
        }
        None => {
            println!("No leases with a known term in scope; illustrative distribution shown");
            render_buckets(&distribution.buckets_or_illustrative());
        }
    }
}

fn render_buckets(buckets: &[TermBucketEntry]) {
    for entry in buckets {
        println!(
            "- {:<11} {:>5.1}M RSF {:>5.1}% ({} leases)",
            entry.label, entry.aggregate_rsf_millions, entry.percent_of_scope, entry.lease_count
        );
    }
}

pub(crate) fn render_stacking_plan(response: &StackingPlanResponse, config: &StackingConfig) {
    let name = response.building_name.as_deref().unwrap_or("Ad-hoc building");
    println!(
        "Stacking plan: {} ({} floors, {} RSF, seed {})",
        name, response.envelope.floors, response.envelope.square_foot, response.seed
    );

    let plan = &response.plan;
    println!(
        "Occupancy {:.1}% ({} of {} RSF) | {} tenants placed, {} left in pool",
        plan.occupancy_rate,
        plan.occupied_rsf,
        plan.total_rsf,
        plan.tenants_placed,
        plan.pool_remaining
    );

    for floor in &plan.floors {
        let tier = FloorTier::for_floor(floor.number, response.envelope.floors, config);
        println!(
            "\nFloor {} [{}]: {} RSF, {:.0}% occupied, {} available",
            floor.number,
            tier.label(),
            floor.total_rsf,
            floor.occupancy_rate,
            floor.available_rsf
        );
        if floor.tenants.is_empty() {
            println!("  (no tenants)");
        }
        for slot in &floor.tenants {
            let tenant = &slot.occupancy;
            let name = if tenant.industry.is_empty() {
                tenant.name.clone()
            } else {
                format!("{} ({})", tenant.name, tenant.industry)
            };
            println!(
                "  - Suite {} {}: {} RSF [{}] width {:.0}%",
                tenant.suite, name, tenant.rsf, slot.status_label, slot.display_width_pct
            );
        }
    }

    if !response.rollover_floors.is_empty() {
        let floors: Vec<String> = response
            .rollover_floors
            .iter()
            .map(u32::to_string)
            .collect();
        println!("\nFloors with expiring leases: {}", floors.join(", "));
    }
}
