use gig_common::Cents;
use thiserror::Error;

use crate::{
    api::ledger_objects::PaidJob,
    db_types::{Contract, Job, NewContract, NewJob, NewProfile, Profile},
    traits::LedgerManagement,
};

/// Errors surfaced by ledger operations. Each variant renders a short, stable message; the
/// underlying cause of a store failure is available via `source()` for logging but is never part
/// of the message.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Job not found or already paid")]
    JobNotFound,
    #[error("Client not found")]
    ClientNotFound,
    #[error("Only the client can pay for the job")]
    NotContractClient,
    #[error("Insufficient balance")]
    InsufficientFunds,
    #[error("Deposit amount exceeds the allowed limit of {0}")]
    DepositLimitExceeded(Cents),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Start and end dates are required, and start must not be after end")]
    InvalidDateRange,
    #[error("No matching records in the given date range")]
    NoRecords,
    #[error("The ledger was updated concurrently, try again")]
    WriteConflict,
    #[error("Internal ledger error")]
    Database(#[source] sqlx::Error),
}

/// The response-status intent of each error, for callers that map errors onto a transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Forbidden,
    Validation,
    Conflict,
    Internal,
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        use LedgerError::*;
        match self {
            JobNotFound | ClientNotFound | NoRecords => ErrorKind::NotFound,
            NotContractClient => ErrorKind::Forbidden,
            InsufficientFunds | DepositLimitExceeded(_) | InvalidAmount(_) | InvalidDateRange => ErrorKind::Validation,
            WriteConflict => ErrorKind::Conflict,
            Database(_) => ErrorKind::Internal,
        }
    }
}

// SQLITE_BUSY (5), SQLITE_LOCKED (6), SQLITE_BUSY_RECOVERY (261) and SQLITE_BUSY_SNAPSHOT (517)
// are write conflicts the caller may retry; everything else is internal.
impl From<sqlx::Error> for LedgerError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db) if matches!(db.code().as_deref(), Some("5" | "6" | "261" | "517")) => {
                LedgerError::WriteConflict
            },
            _ => LedgerError::Database(e),
        }
    }
}

/// This trait defines the write path of a ledger store backend.
///
/// The deposit and payment operations each open one store transaction, read the rows they need,
/// validate, mutate, and commit or roll back as a single unit. No state in which only part of a
/// transfer has been applied is ever visible to other transactions.
#[allow(async_fn_in_trait)]
pub trait LedgerDatabase: Clone + LedgerManagement {
    /// The URL of the database.
    fn url(&self) -> &str;

    /// Pays for the job with the given id on behalf of `caller_profile_id`, moving the job's
    /// price from the contract's client to its contractor and marking the job paid.
    ///
    /// The job must be unpaid and its contract in progress, the caller must be the contract's
    /// client, and the client's balance must cover the price. At most one call per job can ever
    /// succeed; concurrent calls on the same job either observe the paid flag and fail with
    /// [`LedgerError::JobNotFound`], or lose a write conflict.
    async fn pay_job(&self, job_id: i64, caller_profile_id: i64) -> Result<PaidJob, LedgerError>;

    /// Deposits `amount` into the client's balance, subject to the deposit cap: the amount may
    /// not exceed 25% of the total price of the client's unpaid jobs under in-progress contracts
    /// at the time of the deposit. Returns the new balance.
    async fn deposit(&self, client_profile_id: i64, amount: Cents) -> Result<Cents, LedgerError>;

    /// Stores a new profile and returns the full record.
    async fn create_profile(&self, profile: NewProfile) -> Result<Profile, LedgerError>;

    /// Stores a new contract between two existing profiles and returns the full record.
    async fn create_contract(&self, contract: NewContract) -> Result<Contract, LedgerError>;

    /// Stores a new, unpaid job under an existing contract and returns the full record.
    async fn create_job(&self, job: NewJob) -> Result<Job, LedgerError>;

    /// Closes the connection pool.
    async fn close(&mut self) -> Result<(), LedgerError>;
}
