//! Building, lease and tenant records the analytics read from.

pub mod domain;
pub mod import;
mod sample;

pub use domain::{
    Building, BuildingEnvelope, BuildingId, Lease, LeaseStatus, Portfolio, TenantTemplate,
};
pub use import::{PortfolioImportError, PortfolioImporter};
