pub mod lease_terms;
pub mod router;
pub mod stacking;
