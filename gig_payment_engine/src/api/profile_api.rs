use std::fmt::Debug;

use crate::{
    db_types::{Contract, Profile},
    traits::{LedgerError, LedgerManagement},
};

/// Read-only lookups for profiles and their contracts. This is the capability an
/// identity-resolving caller consumes to turn a profile id into a full record.
pub struct ProfileApi<B> {
    db: B,
}

impl<B: Debug> Debug for ProfileApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ProfileApi ({:?})", self.db)
    }
}

impl<B> ProfileApi<B>
where B: LedgerManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub async fn profile_by_id(&self, profile_id: i64) -> Result<Option<Profile>, LedgerError> {
        self.db.fetch_profile(profile_id).await
    }

    /// The contract with the given id, visible only to its client or contractor.
    pub async fn contract_for_profile(
        &self,
        contract_id: i64,
        profile_id: i64,
    ) -> Result<Option<Contract>, LedgerError> {
        self.db.contract_for_profile(contract_id, profile_id).await
    }

    /// All non-terminated contracts where the profile is either party.
    pub async fn contracts_for_profile(&self, profile_id: i64) -> Result<Vec<Contract>, LedgerError> {
        self.db.contracts_for_profile(profile_id).await
    }
}
