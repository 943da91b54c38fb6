use chrono::{Duration, NaiveDate};
use portfolio_analytics::analytics::lease_terms::{
    bucket_lease_terms, LeaseScope, LeaseTermDistribution, LeaseTermOptions, MissingRsfPolicy,
    RegionDirectory, RegionMatch, TermBucket,
};
use portfolio_analytics::portfolio::{Building, BuildingId, Lease, Portfolio};
use proptest::prelude::*;

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid as-of date")
}

fn building(index: usize, area: Option<u64>) -> Building {
    Building {
        id: BuildingId::new(format!("b-{index}")),
        name: format!("Building {index}"),
        city: if index % 2 == 0 { "Greensboro" } else { "Durham" }.to_string(),
        state: "NC".to_string(),
        region: None,
        total_rentable_area: area,
        floors: 8,
    }
}

fn lease(index: usize, building: usize, days_out: Option<i64>) -> Lease {
    Lease {
        lease_id: format!("L-{index}"),
        building_id: BuildingId::new(format!("b-{building}")),
        tenant_name: None,
        expiration_date: days_out.map(|days| as_of() + Duration::days(days)),
    }
}

#[test]
fn sample_portfolio_distribution_covers_every_dated_lease() {
    let portfolio = Portfolio::sample();
    let distribution = bucket_lease_terms(
        &portfolio.leases,
        &portfolio.buildings,
        &LeaseScope::Portfolio,
        &LeaseTermOptions::default(),
        as_of(),
    );

    let summary = distribution.summary().expect("sample portfolio has data");
    let undated = portfolio
        .leases
        .iter()
        .filter(|lease| lease.expiration_date.is_none())
        .count();
    assert_eq!(summary.unclassified_leases, undated);
    assert_eq!(summary.lease_count + undated, portfolio.leases.len());
    // hp-market has no rentable area on record
    assert_eq!(summary.defaulted_rsf_leases, 1);
}

#[test]
fn expired_leases_fall_into_the_shortest_band() {
    let buildings = vec![building(0, Some(40_000))];
    let leases = vec![lease(1, 0, Some(-90))];
    let distribution = bucket_lease_terms(
        &leases,
        &buildings,
        &LeaseScope::Portfolio,
        &LeaseTermOptions::default(),
        as_of(),
    );
    let summary = distribution.summary().expect("data");
    assert_eq!(summary.bucket(TermBucket::UnderOneYear).lease_count, 1);
    assert_eq!(
        summary.bucket(TermBucket::UnderOneYear).percent_of_scope,
        100.0
    );
}

#[test]
fn region_filter_through_directory_spans_cities() {
    let portfolio = Portfolio::sample();
    let options = LeaseTermOptions {
        region_match: RegionMatch::Directory(RegionDirectory::piedmont()),
        ..LeaseTermOptions::default()
    };
    let distribution = bucket_lease_terms(
        &portfolio.leases,
        &portfolio.buildings,
        &LeaseScope::from_filters(None, Some("piedmont triad")),
        &options,
        as_of(),
    );
    assert_eq!(distribution.scope_label(), "piedmont triad");
    let summary = distribution.summary().expect("triad leases present");
    // Greensboro, Winston-Salem and High Point buildings
    assert_eq!(summary.lease_count + summary.unclassified_leases, 8);
}

#[test]
fn empty_distribution_serializes_with_status_tag() {
    let distribution = bucket_lease_terms(
        &[],
        &[],
        &LeaseScope::Portfolio,
        &LeaseTermOptions::default(),
        as_of(),
    );
    assert!(matches!(distribution, LeaseTermDistribution::Empty { .. }));
    let json = serde_json::to_value(&distribution).expect("serializes");
    assert_eq!(json["status"], "empty");
    assert_eq!(json["scope_label"], "All Properties");
}

fn portfolio_strategy() -> impl Strategy<Value = (Vec<Building>, Vec<Lease>)> {
    let areas = prop::collection::vec(prop::option::weighted(0.85, 1u64..2_000_000), 1..6);
    areas.prop_flat_map(|areas| {
        let building_count = areas.len();
        let leases = prop::collection::vec(
            (
                0..building_count + 1,
                prop::option::weighted(0.9, -400i64..8_000),
            ),
            0..40,
        );
        (Just(areas), leases)
    })
    .prop_map(|(areas, leases)| {
        let buildings = areas
            .into_iter()
            .enumerate()
            .map(|(index, area)| building(index, area))
            .collect();
        let leases = leases
            .into_iter()
            .enumerate()
            .map(|(index, (building, days))| lease(index, building, days))
            .collect();
        (buildings, leases)
    })
}

fn policy_strategy() -> impl Strategy<Value = MissingRsfPolicy> {
    prop_oneof![
        Just(MissingRsfPolicy::Exclude),
        (1u64..200_000).prop_map(MissingRsfPolicy::UseDefault),
    ]
}

proptest! {
    #[test]
    fn prop_every_in_scope_lease_is_accounted_for(
        (buildings, leases) in portfolio_strategy(),
        policy in policy_strategy(),
    ) {
        let options = LeaseTermOptions { missing_rsf: policy, ..LeaseTermOptions::default() };
        let distribution =
            bucket_lease_terms(&leases, &buildings, &LeaseScope::Portfolio, &options, as_of());

        let accounted = match &distribution {
            LeaseTermDistribution::Data(summary) => {
                summary.lease_count + summary.unclassified_leases + summary.excluded_missing_rsf
            }
            LeaseTermDistribution::Empty { unclassified_leases, excluded_missing_rsf, .. } => {
                unclassified_leases + excluded_missing_rsf
            }
        };
        prop_assert_eq!(accounted, leases.len());
    }

    #[test]
    fn prop_bucket_sums_match_totals(
        (buildings, leases) in portfolio_strategy(),
        policy in policy_strategy(),
    ) {
        let options = LeaseTermOptions { missing_rsf: policy, ..LeaseTermOptions::default() };
        let distribution =
            bucket_lease_terms(&leases, &buildings, &LeaseScope::Portfolio, &options, as_of());

        if let Some(summary) = distribution.summary() {
            let rsf: u64 = summary.buckets.iter().map(|entry| entry.aggregate_rsf).sum();
            let count: usize = summary.buckets.iter().map(|entry| entry.lease_count).sum();
            let percent: f64 = summary.buckets.iter().map(|entry| entry.percent_of_scope).sum();
            prop_assert_eq!(rsf, summary.total_rsf);
            prop_assert_eq!(count, summary.lease_count);
            prop_assert!((percent - 100.0).abs() < 1e-6);
            prop_assert!(summary.total_rsf > 0);
        }
    }

    #[test]
    fn prop_building_scope_never_leaks_other_buildings(
        (buildings, leases) in portfolio_strategy(),
        target in 0usize..6,
    ) {
        let scope = LeaseScope::Building(BuildingId::new(format!("b-{target}")));
        let options = LeaseTermOptions::default();
        let distribution = bucket_lease_terms(&leases, &buildings, &scope, &options, as_of());

        let target_id = format!("b-{target}");
        let in_scope: Vec<&Lease> = leases
            .iter()
            .filter(|lease| lease.building_id.as_str() == target_id)
            .collect();
        match distribution.summary() {
            Some(summary) => {
                prop_assert_eq!(summary.lease_count + summary.unclassified_leases, in_scope.len());
            }
            None => {
                prop_assert!(in_scope.iter().all(|lease| lease.expiration_date.is_none()));
            }
        }
    }
}
