use chrono::NaiveDate;
use portfolio_analytics::analytics::lease_terms::{
    bucket_lease_terms, LeaseScope, LeaseTermOptions, TermBucket,
};
use portfolio_analytics::portfolio::{
    BuildingId, LeaseStatus, PortfolioImportError, PortfolioImporter,
};
use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

const BUILDINGS_CSV: &str = "\
id,name,city,state,region,total_rentable_area,floors
gso-1,Lindley Park Center,Greensboro,NC,,120000,9
clt-1,South End Yard,Charlotte,NC,Charlotte Metro,,5
";

const LEASES_CSV: &str = "\
lease_id,building_id,tenant_name,expiration_date
L-1,gso-1,Acme Insurance,2025-09-30
L-2,gso-1,Bravo Labs,06/30/2031
L-3,clt-1,Cedar Partners,
L-4,clt-1,Delta Freight,not a date
";

const TENANTS_CSV: &str = "\
tenant_id,name,industry,lease_start,lease_end,annual_rent_psf,status
T-1,Acme Insurance,Insurance,2020-01-01,2025-09-30,27.5,expiring-soon
T-2,Bravo Labs,Life Sciences,2021-07-01,2031-06-30,34,active
";

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "portfolio-import-{}-{}",
        name,
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("scratch dir");
    dir
}

#[test]
fn imports_directory_and_feeds_the_bucketer() {
    let dir = scratch_dir("full");
    fs::write(dir.join("buildings.csv"), BUILDINGS_CSV).expect("write buildings");
    fs::write(dir.join("leases.csv"), LEASES_CSV).expect("write leases");
    fs::write(dir.join("tenants.csv"), TENANTS_CSV).expect("write tenants");

    let portfolio = PortfolioImporter::from_dir(&dir).expect("portfolio imports");
    fs::remove_dir_all(&dir).ok();

    assert_eq!(portfolio.buildings.len(), 2);
    assert_eq!(portfolio.leases.len(), 4);
    assert_eq!(portfolio.tenant_pool.len(), 2);
    assert_eq!(portfolio.tenant_pool[0].status, LeaseStatus::ExpiringSoon);

    let charlotte = portfolio
        .building(&BuildingId::new("clt-1"))
        .expect("charlotte building");
    assert_eq!(charlotte.region.as_deref(), Some("Charlotte Metro"));
    assert!(charlotte.envelope().is_none());

    let as_of = NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date");
    let distribution = bucket_lease_terms(
        &portfolio.leases,
        &portfolio.buildings,
        &LeaseScope::Building(BuildingId::new("gso-1")),
        &LeaseTermOptions::default(),
        as_of,
    );
    let summary = distribution.summary().expect("gso-1 has dated leases");
    assert_eq!(summary.scope_label, "Lindley Park Center");
    assert_eq!(summary.bucket(TermBucket::UnderOneYear).lease_count, 1);
    assert_eq!(summary.bucket(TermBucket::FiveToTenYears).lease_count, 1);
    assert_eq!(summary.total_rsf, 240_000);

    let charlotte_terms = bucket_lease_terms(
        &portfolio.leases,
        &portfolio.buildings,
        &LeaseScope::Building(BuildingId::new("clt-1")),
        &LeaseTermOptions::default(),
        as_of,
    );
    // both Charlotte leases lack a usable expiration date
    assert!(charlotte_terms.is_empty());
}

#[test]
fn tenants_file_is_optional() {
    let portfolio = PortfolioImporter::from_readers(
        Cursor::new(BUILDINGS_CSV),
        Cursor::new(LEASES_CSV),
        None::<Cursor<&str>>,
    )
    .expect("imports without tenants");
    assert!(portfolio.tenant_pool.is_empty());
    assert_eq!(portfolio.leases[1].expiration_date, NaiveDate::from_ymd_opt(2031, 6, 30));
}

#[test]
fn missing_leases_file_is_an_io_error() {
    let dir = scratch_dir("partial");
    fs::write(dir.join("buildings.csv"), BUILDINGS_CSV).expect("write buildings");

    let err = PortfolioImporter::from_dir(&dir).expect_err("leases.csv missing");
    fs::remove_dir_all(&dir).ok();
    assert!(matches!(err, PortfolioImportError::Io(_)));
}

#[test]
fn bad_tenant_status_reports_line() {
    let tenants = "\
tenant_id,name,industry,lease_start,lease_end,annual_rent_psf,status
T-1,Acme,Insurance,2020-01-01,2025-09-30,27.5,active
T-2,Bravo,Labs,2021-07-01,2031-06-30,34,holdover
";
    let err = PortfolioImporter::from_readers(
        Cursor::new(BUILDINGS_CSV),
        Cursor::new(LEASES_CSV),
        Some(Cursor::new(tenants)),
    )
    .expect_err("unknown status");
    match err {
        PortfolioImportError::InvalidField { field, line, value } => {
            assert_eq!(field, "status");
            assert_eq!(line, 3);
            assert_eq!(value, "holdover");
        }
        other => panic!("unexpected error: {other}"),
    }
}
