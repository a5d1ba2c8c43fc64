//! `SqliteDatabase` is a concrete implementation of a ledger store backend.
//!
//! Unsurprisingly, it uses SQLite as the backend and implements the traits defined in the
//! [`crate::traits`] module. Every write operation runs inside a single transaction on the pool;
//! validation failures roll the transaction back explicitly, and a transaction dropped on an
//! error path rolls back implicitly, so no exit leaves a transaction open.
use std::fmt::Debug;

use chrono::{DateTime, Utc};
use gig_common::Cents;
use log::{debug, error, trace};
use sqlx::SqlitePool;

use super::db::{contracts, db_url, jobs, new_pool, profiles, reports, run_migrations};
use crate::{
    api::ledger_objects::{ClientSpend, PaidJob, ProfessionEarnings},
    db_types::{Contract, Job, NewContract, NewJob, NewProfile, Profile},
    traits::{LedgerDatabase, LedgerError, LedgerManagement},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl LedgerDatabase for SqliteDatabase {
    fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Executes the atomic transfer for one job.
    ///
    /// The job lookup is constrained to `paid = 0` and an in-progress contract, and the paid
    /// flag is flipped by a guarded update inside the same transaction, so of two concurrent
    /// payments for one job at most one can commit; the other observes no payable row (or loses
    /// a write conflict) and nothing it did survives.
    async fn pay_job(&self, job_id: i64, caller_profile_id: i64) -> Result<PaidJob, LedgerError> {
        let mut tx = self.pool.begin().await?;
        let Some(mut view) = jobs::fetch_payable_job(job_id, &mut tx).await? else {
            tx.rollback().await?;
            return Err(LedgerError::JobNotFound);
        };
        if view.contract.client_id != caller_profile_id {
            tx.rollback().await?;
            return Err(LedgerError::NotContractClient);
        }
        let price = view.job.price;
        if view.client.balance < price {
            tx.rollback().await?;
            return Err(LedgerError::InsufficientFunds);
        }
        // The guards re-validate at write time; rows_affected == 0 means a concurrent
        // transaction got there first.
        if !profiles::debit_balance(view.client.id, price, &mut tx).await? {
            tx.rollback().await?;
            return Err(LedgerError::InsufficientFunds);
        }
        let contractor_balance = profiles::credit_balance(view.contractor.id, price, &mut tx).await?;
        let paid_at = Utc::now();
        if !jobs::mark_paid(job_id, paid_at, &mut tx).await? {
            tx.rollback().await?;
            return Err(LedgerError::JobNotFound);
        }
        tx.commit().await?;
        debug!("🗃️ Job #{job_id}: {price} moved from profile #{} to profile #{}", view.client.id, view.contractor.id);
        view.client.balance -= price;
        view.contractor.balance = contractor_balance;
        view.job.paid = true;
        view.job.payment_date = Some(paid_at);
        Ok(view)
    }

    /// Applies a deposit under the 25% cap over outstanding unpaid job obligations.
    ///
    /// The obligation sum and the balance write share the transaction; a concurrent payment that
    /// invalidates the snapshot before commit surfaces as a write conflict rather than a deposit
    /// above the limit.
    async fn deposit(&self, client_profile_id: i64, amount: Cents) -> Result<Cents, LedgerError> {
        if !amount.is_positive() {
            return Err(LedgerError::InvalidAmount(format!("deposit must be positive, got {amount}")));
        }
        let mut tx = self.pool.begin().await?;
        let Some(client) = profiles::fetch_client(client_profile_id, &mut tx).await? else {
            tx.rollback().await?;
            return Err(LedgerError::ClientNotFound);
        };
        let outstanding = jobs::outstanding_for_client(client.id, &mut tx).await?;
        let max_deposit = outstanding.percent(25);
        trace!("🗃️ Client #{} has {outstanding} outstanding; deposit cap is {max_deposit}", client.id);
        if amount > max_deposit {
            tx.rollback().await?;
            return Err(LedgerError::DepositLimitExceeded(max_deposit));
        }
        let balance = profiles::credit_balance(client.id, amount, &mut tx).await?;
        tx.commit().await?;
        debug!("🗃️ Deposit of {amount} committed for client #{}. New balance is {balance}", client.id);
        Ok(balance)
    }

    async fn create_profile(&self, profile: NewProfile) -> Result<Profile, LedgerError> {
        if profile.balance < Cents::default() {
            return Err(LedgerError::InvalidAmount(format!(
                "opening balance must not be negative, got {}",
                profile.balance
            )));
        }
        let mut conn = self.pool.acquire().await?;
        let profile = profiles::insert_profile(profile, &mut conn).await?;
        debug!("🗃️ Created {} profile #{}", profile.profile_type, profile.id);
        Ok(profile)
    }

    async fn create_contract(&self, contract: NewContract) -> Result<Contract, LedgerError> {
        let mut conn = self.pool.acquire().await?;
        let contract = contracts::insert_contract(contract, &mut conn).await?;
        debug!("🗃️ Created contract #{} between client #{} and contractor #{}", contract.id, contract.client_id, contract.contractor_id);
        Ok(contract)
    }

    async fn create_job(&self, job: NewJob) -> Result<Job, LedgerError> {
        if !job.price.is_positive() {
            return Err(LedgerError::InvalidAmount(format!("job price must be positive, got {}", job.price)));
        }
        let mut conn = self.pool.acquire().await?;
        let job = jobs::insert_job(job, &mut conn).await?;
        debug!("🗃️ Created job #{} under contract #{} at {}", job.id, job.contract_id, job.price);
        Ok(job)
    }

    async fn close(&mut self) -> Result<(), LedgerError> {
        self.pool.close().await;
        Ok(())
    }
}

impl LedgerManagement for SqliteDatabase {
    async fn fetch_profile(&self, profile_id: i64) -> Result<Option<Profile>, LedgerError> {
        let mut conn = self.pool.acquire().await?;
        profiles::fetch_profile(profile_id, &mut conn).await
    }

    async fn unpaid_jobs_for_profile(&self, profile_id: i64) -> Result<Vec<Job>, LedgerError> {
        let mut conn = self.pool.acquire().await?;
        jobs::unpaid_jobs_for_profile(profile_id, &mut conn).await
    }

    async fn contract_for_profile(&self, contract_id: i64, profile_id: i64) -> Result<Option<Contract>, LedgerError> {
        let mut conn = self.pool.acquire().await?;
        contracts::contract_for_profile(contract_id, profile_id, &mut conn).await
    }

    async fn contracts_for_profile(&self, profile_id: i64) -> Result<Vec<Contract>, LedgerError> {
        let mut conn = self.pool.acquire().await?;
        contracts::contracts_for_profile(profile_id, &mut conn).await
    }

    async fn best_profession(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Option<ProfessionEarnings>, LedgerError> {
        let mut conn = self.pool.acquire().await?;
        reports::best_profession(start, end, &mut conn).await
    }

    async fn best_clients(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        limit: u32,
    ) -> Result<Vec<ClientSpend>, LedgerError> {
        let mut conn = self.pool.acquire().await?;
        reports::best_clients(start, end, limit, &mut conn).await
    }
}

impl SqliteDatabase {
    /// Creates a new database API object against the URL configured in the environment.
    pub async fn new(max_connections: u32) -> Result<Self, sqlx::Error> {
        let url = db_url();
        SqliteDatabase::new_with_url(url.as_str(), max_connections).await
    }

    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        trace!("Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    /// Applies the embedded schema migrations.
    pub async fn migrate(&self) -> Result<(), LedgerError> {
        run_migrations(&self.pool).await.map_err(|e| {
            error!("Error running DB migrations: {e}");
            LedgerError::Database(e.into())
        })
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
