use super::domain::{Building, BuildingId, Lease, LeaseStatus, Portfolio, TenantTemplate};
use chrono::NaiveDate;

impl Portfolio {
    /// Demo portfolio used when no CSV data directory is configured.
    pub fn sample() -> Self {
        Self {
            buildings: sample_buildings(),
            leases: sample_leases(),
            tenant_pool: sample_tenant_pool(),
        }
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

fn building(
    id: &str,
    name: &str,
    city: &str,
    state: &str,
    region: Option<&str>,
    total_rentable_area: Option<u64>,
    floors: u32,
) -> Building {
    Building {
        id: BuildingId::new(id),
        name: name.to_string(),
        city: city.to_string(),
        state: state.to_string(),
        region: region.map(str::to_string),
        total_rentable_area,
        floors,
    }
}

fn sample_buildings() -> Vec<Building> {
    vec![
        building(
            "gso-elm",
            "Elm Street Tower",
            "Greensboro",
            "NC",
            None,
            Some(320_000),
            20,
        ),
        building(
            "gso-friendly",
            "Friendly Center Plaza",
            "Greensboro",
            "NC",
            None,
            Some(145_000),
            8,
        ),
        building(
            "ws-fourth",
            "Fourth Street Commons",
            "Winston-Salem",
            "NC",
            None,
            Some(210_000),
            14,
        ),
        building(
            "hp-market",
            "Market Square Exchange",
            "High Point",
            "NC",
            None,
            None,
            6,
        ),
        building(
            "clt-tryon",
            "Tryon Gateway",
            "Charlotte",
            "NC",
            Some("Charlotte Metro"),
            Some(480_000),
            30,
        ),
        building(
            "rdu-glenwood",
            "Glenwood Point",
            "Raleigh",
            "NC",
            None,
            Some(175_000),
            10,
        ),
        building(
            "atl-peachtree",
            "Peachtree Center West",
            "Atlanta",
            "GA",
            Some("Southeast"),
            Some(260_000),
            16,
        ),
    ]
}

fn lease(id: &str, building_id: &str, tenant: &str, expires: Option<NaiveDate>) -> Lease {
    Lease {
        lease_id: id.to_string(),
        building_id: BuildingId::new(building_id),
        tenant_name: Some(tenant.to_string()),
        expiration_date: expires,
    }
}

fn sample_leases() -> Vec<Lease> {
    vec![
        lease(
            "L-1001",
            "gso-elm",
            "Carolina Mutual Partners",
            Some(date(2027, 3, 31)),
        ),
        lease(
            "L-1002",
            "gso-elm",
            "Blue Ridge Analytics",
            Some(date(2029, 8, 31)),
        ),
        lease("L-1003", "gso-elm", "Haw River Legal", Some(date(2034, 12, 31))),
        lease(
            "L-1004",
            "gso-friendly",
            "Piedmont Dental Group",
            Some(date(2026, 12, 31)),
        ),
        lease("L-1005", "gso-friendly", "Triad Outfitters", None),
        lease(
            "L-1006",
            "ws-fourth",
            "Salem Biosciences",
            Some(date(2031, 5, 31)),
        ),
        lease(
            "L-1007",
            "ws-fourth",
            "Forsyth Credit Union",
            Some(date(2028, 1, 31)),
        ),
        lease(
            "L-1008",
            "hp-market",
            "Furniture Market Holdings",
            Some(date(2030, 6, 30)),
        ),
        lease(
            "L-1009",
            "clt-tryon",
            "Queen City Capital",
            Some(date(2038, 9, 30)),
        ),
        lease(
            "L-1010",
            "clt-tryon",
            "Catawba Engineering",
            Some(date(2027, 10, 31)),
        ),
        lease(
            "L-1011",
            "rdu-glenwood",
            "Triangle Software Labs",
            Some(date(2032, 2, 29)),
        ),
        lease("L-1012", "rdu-glenwood", "Neuse Advisory", None),
        lease(
            "L-1013",
            "atl-peachtree",
            "Southern Logistics Co.",
            Some(date(2029, 4, 30)),
        ),
        lease(
            "L-1014",
            "atl-peachtree",
            "Buckhead Media",
            Some(date(2040, 1, 31)),
        ),
    ]
}

fn tenant(
    id: &str,
    name: &str,
    industry: &str,
    lease_start: NaiveDate,
    lease_end: NaiveDate,
    annual_rent_psf: f64,
    status: LeaseStatus,
) -> TenantTemplate {
    TenantTemplate {
        tenant_id: id.to_string(),
        name: name.to_string(),
        industry: industry.to_string(),
        lease_start,
        lease_end,
        annual_rent_psf,
        status,
    }
}

fn sample_tenant_pool() -> Vec<TenantTemplate> {
    vec![
        tenant(
            "T-01",
            "Carolina Mutual Partners",
            "Financial Services",
            date(2019, 4, 1),
            date(2027, 3, 31),
            34.5,
            LeaseStatus::Active,
        ),
        tenant(
            "T-02",
            "Blue Ridge Analytics",
            "Technology",
            date(2021, 9, 1),
            date(2029, 8, 31),
            31.0,
            LeaseStatus::Active,
        ),
        tenant(
            "T-03",
            "Haw River Legal",
            "Legal",
            date(2020, 1, 1),
            date(2034, 12, 31),
            36.25,
            LeaseStatus::Active,
        ),
        tenant(
            "T-04",
            "Piedmont Dental Group",
            "Healthcare",
            date(2016, 1, 1),
            date(2026, 12, 31),
            27.5,
            LeaseStatus::ExpiringSoon,
        ),
        tenant(
            "T-05",
            "Salem Biosciences",
            "Life Sciences",
            date(2021, 6, 1),
            date(2031, 5, 31),
            38.0,
            LeaseStatus::Active,
        ),
        tenant(
            "T-06",
            "Forsyth Credit Union",
            "Financial Services",
            date(2018, 2, 1),
            date(2028, 1, 31),
            29.75,
            LeaseStatus::Active,
        ),
        tenant(
            "T-07",
            "Queen City Capital",
            "Private Equity",
            date(2023, 10, 1),
            date(2038, 9, 30),
            42.0,
            LeaseStatus::Active,
        ),
        tenant(
            "T-08",
            "Catawba Engineering",
            "Engineering",
            date(2017, 11, 1),
            date(2027, 10, 31),
            28.0,
            LeaseStatus::ExpiringSoon,
        ),
        tenant(
            "T-09",
            "Triangle Software Labs",
            "Technology",
            date(2022, 3, 1),
            date(2032, 2, 29),
            33.5,
            LeaseStatus::Active,
        ),
        tenant(
            "T-10",
            "Southern Logistics Co.",
            "Logistics",
            date(2019, 5, 1),
            date(2029, 4, 30),
            26.0,
            LeaseStatus::Active,
        ),
        tenant(
            "T-11",
            "Buckhead Media",
            "Media",
            date(2025, 2, 1),
            date(2040, 1, 31),
            35.0,
            LeaseStatus::Active,
        ),
        tenant(
            "T-12",
            "Neuse Advisory",
            "Consulting",
            date(2020, 7, 1),
            date(2026, 6, 30),
            30.5,
            LeaseStatus::ExpiringSoon,
        ),
    ]
}
