mod parser;

use super::domain::Portfolio;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

pub const BUILDINGS_FILE: &str = "buildings.csv";
pub const LEASES_FILE: &str = "leases.csv";
pub const TENANTS_FILE: &str = "tenants.csv";

#[derive(Debug, thiserror::Error)]
pub enum PortfolioImportError {
    #[error("failed to read portfolio data: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid portfolio CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid {field} on line {line}: '{value}'")]
    InvalidField {
        field: &'static str,
        line: usize,
        value: String,
    },
}

/// Loads a [`Portfolio`] from CSV exports.
pub struct PortfolioImporter;

impl PortfolioImporter {
    /// Reads `buildings.csv` and `leases.csv` from `dir`, plus `tenants.csv`
    /// when present.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Portfolio, PortfolioImportError> {
        let dir = dir.as_ref();
        let buildings = File::open(dir.join(BUILDINGS_FILE))?;
        let leases = File::open(dir.join(LEASES_FILE))?;
        let tenants_path = dir.join(TENANTS_FILE);
        let tenants = if tenants_path.exists() {
            Some(File::open(tenants_path)?)
        } else {
            None
        };

        let portfolio = Self::from_readers(buildings, leases, tenants)?;
        info!(
            dir = %dir.display(),
            buildings = portfolio.buildings.len(),
            leases = portfolio.leases.len(),
            tenants = portfolio.tenant_pool.len(),
            "portfolio data loaded"
        );
        Ok(portfolio)
    }

    pub fn from_readers<B, L, T>(
        buildings: B,
        leases: L,
        tenants: Option<T>,
    ) -> Result<Portfolio, PortfolioImportError>
    where
        B: Read,
        L: Read,
        T: Read,
    {
        let buildings = parser::parse_buildings(buildings)?;
        let leases = parser::parse_leases(leases)?;
        let tenant_pool = match tenants {
            Some(reader) => parser::parse_tenants(reader)?,
            None => Vec::new(),
        };

        Ok(Portfolio {
            buildings,
            leases,
            tenant_pool,
        })
    }
}
