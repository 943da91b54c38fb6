use crate::portfolio::domain::TenantTemplate;

/// Position in the tenant pool. Floors take tenants in order and hand the
/// advanced cursor to the next floor.
#[derive(Debug, Clone, Copy)]
pub struct TenantCursor<'a> {
    pool: &'a [TenantTemplate],
    position: usize,
}

impl<'a> TenantCursor<'a> {
    pub fn new(pool: &'a [TenantTemplate]) -> Self {
        Self { pool, position: 0 }
    }

    pub fn next_tenant(&mut self) -> Option<&'a TenantTemplate> {
        let tenant = self.pool.get(self.position)?;
        self.position += 1;
        Some(tenant)
    }

    pub fn consumed(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.pool.len() - self.position
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }
}
