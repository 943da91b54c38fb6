use crate::portfolio::domain::{Building, BuildingId, Lease};
use std::collections::HashMap;

/// Narrows which leases contribute to a distribution.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LeaseScope {
    #[default]
    Portfolio,
    Building(BuildingId),
    Region(String),
}

impl LeaseScope {
    /// Builds a scope from optional filters; a building filter wins over a
    /// region filter and blank values are ignored.
    pub fn from_filters(building_id: Option<&str>, region: Option<&str>) -> Self {
        let building_id = building_id.map(str::trim).filter(|value| !value.is_empty());
        let region = region.map(str::trim).filter(|value| !value.is_empty());

        match (building_id, region) {
            (Some(id), _) => Self::Building(BuildingId::new(id)),
            (None, Some(region)) => Self::Region(region.to_string()),
            (None, None) => Self::Portfolio,
        }
    }

    pub(crate) fn includes(
        &self,
        lease: &Lease,
        building: Option<&Building>,
        region_match: &RegionMatch,
    ) -> bool {
        match self {
            Self::Portfolio => true,
            Self::Building(id) => &lease.building_id == id,
            Self::Region(region) => {
                building.is_some_and(|building| region_match.matches(building, region))
            }
        }
    }

    pub(crate) fn label(&self, building: Option<&Building>) -> String {
        match self {
            Self::Portfolio => "All Properties".to_string(),
            Self::Building(id) => building
                .map(|building| building.name.clone())
                .unwrap_or_else(|| id.to_string()),
            Self::Region(region) => region.trim().to_string(),
        }
    }
}

/// How a region filter is compared against a building.
#[derive(Debug, Clone, Default)]
pub enum RegionMatch {
    /// Case-insensitive substring of the building's city, state or region.
    #[default]
    Substring,
    /// Exact region lookup through a city directory.
    Directory(RegionDirectory),
}

impl RegionMatch {
    pub fn matches(&self, building: &Building, region: &str) -> bool {
        let region = region.trim();
        match self {
            Self::Substring => {
                let needle = region.to_lowercase();
                [
                    Some(building.city.as_str()),
                    Some(building.state.as_str()),
                    building.region.as_deref(),
                ]
                .into_iter()
                .flatten()
                .any(|field| field.to_lowercase().contains(&needle))
            }
            Self::Directory(directory) => directory
                .region_for(building)
                .is_some_and(|resolved| resolved.eq_ignore_ascii_case(region)),
        }
    }
}

/// City to market-region table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionDirectory {
    cities: HashMap<String, String>,
}

impl RegionDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_city(mut self, city: &str, region: &str) -> Self {
        self.insert(city, region);
        self
    }

    pub fn insert(&mut self, city: &str, region: &str) {
        self.cities
            .insert(city.trim().to_lowercase(), region.trim().to_string());
    }

    pub fn region_of_city(&self, city: &str) -> Option<&str> {
        self.cities
            .get(&city.trim().to_lowercase())
            .map(String::as_str)
    }

    /// An explicit region on the building record takes priority over the
    /// city table.
    pub fn region_for<'a>(&'a self, building: &'a Building) -> Option<&'a str> {
        building
            .region
            .as_deref()
            .filter(|region| !region.trim().is_empty())
            .or_else(|| self.region_of_city(&building.city))
    }

    /// North Carolina markets keyed by city.
    pub fn piedmont() -> Self {
        [
            ("Greensboro", "Piedmont Triad"),
            ("Winston-Salem", "Piedmont Triad"),
            ("High Point", "Piedmont Triad"),
            ("Burlington", "Piedmont Triad"),
            ("Kernersville", "Piedmont Triad"),
            ("Thomasville", "Piedmont Triad"),
            ("Raleigh", "Research Triangle"),
            ("Durham", "Research Triangle"),
            ("Chapel Hill", "Research Triangle"),
            ("Cary", "Research Triangle"),
            ("Charlotte", "Charlotte Metro"),
            ("Concord", "Charlotte Metro"),
            ("Gastonia", "Charlotte Metro"),
        ]
        .into_iter()
        .fold(Self::new(), |directory, (city, region)| {
            directory.with_city(city, region)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn building(city: &str, state: &str, region: Option<&str>) -> Building {
        Building {
            id: BuildingId::new("b-1"),
            name: "Test Building".to_string(),
            city: city.to_string(),
            state: state.to_string(),
            region: region.map(str::to_string),
            total_rentable_area: Some(100_000),
            floors: 5,
        }
    }

    #[test]
    fn building_filter_takes_precedence() {
        assert_eq!(
            LeaseScope::from_filters(Some("b-1"), Some("Southeast")),
            LeaseScope::Building(BuildingId::new("b-1"))
        );
        assert_eq!(
            LeaseScope::from_filters(Some("  "), Some(" Southeast ")),
            LeaseScope::Region("Southeast".to_string())
        );
        assert_eq!(LeaseScope::from_filters(None, Some("")), LeaseScope::Portfolio);
    }

    #[test]
    fn substring_match_checks_city_state_and_region() {
        let mode = RegionMatch::Substring;
        let atlanta = building("Atlanta", "GA", Some("Southeast"));
        assert!(mode.matches(&atlanta, "atl"));
        assert!(mode.matches(&atlanta, "ga"));
        assert!(mode.matches(&atlanta, "SOUTH"));
        assert!(!mode.matches(&atlanta, "Piedmont"));
    }

    #[test]
    fn directory_match_resolves_city_to_region() {
        let mode = RegionMatch::Directory(RegionDirectory::piedmont());
        let greensboro = building("Greensboro", "NC", None);
        assert!(mode.matches(&greensboro, "piedmont triad"));
        // substring of the region name is not enough for a structured lookup
        assert!(!mode.matches(&greensboro, "piedmont"));
        let raleigh = building("Raleigh", "NC", None);
        assert!(!mode.matches(&raleigh, "Piedmont Triad"));
    }

    #[test]
    fn explicit_building_region_overrides_directory() {
        let directory = RegionDirectory::piedmont();
        let relabeled = building("Greensboro", "NC", Some("Downtown Core"));
        assert_eq!(directory.region_for(&relabeled), Some("Downtown Core"));
        let unknown = building("Asheville", "NC", None);
        assert_eq!(directory.region_for(&unknown), None);
    }

    #[test]
    fn region_scope_excludes_leases_without_buildings() {
        let lease = Lease {
            lease_id: "L-1".to_string(),
            building_id: BuildingId::new("missing"),
            tenant_name: None,
            expiration_date: None,
        };
        let scope = LeaseScope::Region("NC".to_string());
        assert!(!scope.includes(&lease, None, &RegionMatch::Substring));
        assert!(LeaseScope::Portfolio.includes(&lease, None, &RegionMatch::Substring));
    }
}
