use std::fmt::Debug;

use gig_common::Cents;
use log::debug;

use crate::{
    api::ledger_objects::PaidJob,
    db_types::Job,
    traits::{LedgerDatabase, LedgerError},
};

/// `TransferApi` is the caller-facing surface of the payment engine's write path: paying for
/// jobs and depositing funds, plus the unpaid-job listing those operations hinge on.
pub struct TransferApi<B> {
    db: B,
}

impl<B: Debug> Debug for TransferApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TransferApi ({:?})", self.db)
    }
}

impl<B> TransferApi<B>
where B: LedgerDatabase
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    /// Executes the atomic transfer for one job on behalf of the calling profile.
    ///
    /// On success the job is paid, the price has moved from client to contractor, and the
    /// returned view reflects the committed state. On any failure nothing has changed.
    pub async fn pay_job(&self, job_id: i64, caller_profile_id: i64) -> Result<PaidJob, LedgerError> {
        let paid = self.db.pay_job(job_id, caller_profile_id).await?;
        debug!(
            "💸️ Job #{} paid: {} moved from client #{} to contractor #{}",
            paid.job.id, paid.job.price, paid.client.id, paid.contractor.id
        );
        Ok(paid)
    }

    /// Deposits `amount` into the given client's balance, subject to the 25% cap over the
    /// client's outstanding unpaid job obligations. Returns the new balance.
    pub async fn deposit(&self, client_profile_id: i64, amount: Cents) -> Result<Cents, LedgerError> {
        let balance = self.db.deposit(client_profile_id, amount).await?;
        debug!("💸️ Deposited {amount} for client #{client_profile_id}. New balance is {balance}");
        Ok(balance)
    }

    /// All unpaid jobs under in-progress contracts where the profile is either party.
    pub async fn unpaid_jobs(&self, profile_id: i64) -> Result<Vec<Job>, LedgerError> {
        self.db.unpaid_jobs_for_profile(profile_id).await
    }
}
