use std::fmt::Debug;

use chrono::{DateTime, Utc};
use log::trace;

use crate::{
    api::ledger_objects::{ClientSpend, ProfessionEarnings},
    traits::{LedgerError, LedgerManagement},
};

pub const DEFAULT_BEST_CLIENTS_LIMIT: u32 = 2;

/// Read-only reporting aggregations over paid jobs, bounded by a date window.
pub struct ReportingApi<B> {
    db: B,
}

impl<B: Debug> Debug for ReportingApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ReportingApi ({:?})", self.db)
    }
}

impl<B> ReportingApi<B>
where B: LedgerManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    /// The profession that earned the most from jobs paid within `[start, end]`.
    ///
    /// Ties are broken by profession, ascending, so the result is deterministic for a fixed
    /// committed data set and window.
    pub async fn best_profession(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<ProfessionEarnings, LedgerError> {
        check_date_range(start, end)?;
        let best = self.db.best_profession(start, end).await?;
        trace!("📊️ Best profession in [{start}, {end}]: {best:?}");
        best.ok_or(LedgerError::NoRecords)
    }

    /// The clients that paid the most for jobs within `[start, end]`, descending by total.
    /// `limit` defaults to [`DEFAULT_BEST_CLIENTS_LIMIT`].
    pub async fn best_clients(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        limit: Option<u32>,
    ) -> Result<Vec<ClientSpend>, LedgerError> {
        check_date_range(start, end)?;
        let limit = limit.unwrap_or(DEFAULT_BEST_CLIENTS_LIMIT);
        let clients = self.db.best_clients(start, end, limit).await?;
        trace!("📊️ {} best clients in [{start}, {end}]", clients.len());
        if clients.is_empty() {
            return Err(LedgerError::NoRecords);
        }
        Ok(clients)
    }
}

fn check_date_range(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), LedgerError> {
    if start > end {
        return Err(LedgerError::InvalidDateRange);
    }
    Ok(())
}
