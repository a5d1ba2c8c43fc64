use chrono::{DateTime, Utc};

use crate::{
    api::ledger_objects::{ClientSpend, ProfessionEarnings},
    db_types::{Contract, Job, Profile},
    traits::LedgerError,
};

/// Read-only queries over committed ledger state.
///
/// None of these methods opens a write transaction or takes locks beyond the store's default
/// read consistency. The reporting aggregations traverse Job → Contract → Profile over persisted
/// rows only.
#[allow(async_fn_in_trait)]
pub trait LedgerManagement {
    /// Fetches the profile with the given id. If no profile exists, `None` is returned.
    async fn fetch_profile(&self, profile_id: i64) -> Result<Option<Profile>, LedgerError>;

    /// All unpaid jobs under in-progress contracts where the given profile is either party.
    async fn unpaid_jobs_for_profile(&self, profile_id: i64) -> Result<Vec<Job>, LedgerError>;

    /// Fetches the contract with the given id, but only if the given profile is one of its
    /// parties. Returns `None` otherwise.
    async fn contract_for_profile(&self, contract_id: i64, profile_id: i64) -> Result<Option<Contract>, LedgerError>;

    /// All non-terminated contracts where the given profile is either party.
    async fn contracts_for_profile(&self, profile_id: i64) -> Result<Vec<Contract>, LedgerError>;

    /// The profession that earned the most over paid jobs with a payment date in
    /// `[start, end]`, or `None` if no job was paid in the window.
    async fn best_profession(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Option<ProfessionEarnings>, LedgerError>;

    /// The clients that paid the most over paid jobs with a payment date in `[start, end]`,
    /// descending by total, at most `limit` entries.
    async fn best_clients(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        limit: u32,
    ) -> Result<Vec<ClientSpend>, LedgerError>;
}
