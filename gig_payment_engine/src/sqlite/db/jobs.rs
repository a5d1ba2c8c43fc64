use chrono::{DateTime, Utc};
use gig_common::Cents;
use log::trace;
use sqlx::SqliteConnection;

use crate::{
    api::ledger_objects::PaidJob,
    db_types::{ContractStatus, Job, NewJob, Profile},
    sqlite::db::{contracts, profiles},
    traits::LedgerError,
};

pub async fn insert_job(job: NewJob, conn: &mut SqliteConnection) -> Result<Job, LedgerError> {
    let job = sqlx::query_as(
        r#"
            INSERT INTO jobs (contract_id, description, price)
            VALUES ($1, $2, $3)
            RETURNING *;
        "#,
    )
    .bind(job.contract_id)
    .bind(job.description)
    .bind(job.price)
    .fetch_one(conn)
    .await?;
    Ok(job)
}

/// Loads the job together with its contract and both parties, constrained to jobs that are
/// eligible for payment: the job is unpaid and its contract is in progress. Returns `None` when
/// no such row exists (job missing, already paid, or contract not in progress).
///
/// The returned view still reflects the unpaid state; the caller applies the transfer to it
/// after the mutations commit.
pub async fn fetch_payable_job(job_id: i64, conn: &mut SqliteConnection) -> Result<Option<PaidJob>, LedgerError> {
    let job: Option<Job> = sqlx::query_as(
        r#"
            SELECT j.* FROM jobs j
            INNER JOIN contracts c ON j.contract_id = c.id
            WHERE j.id = $1 AND j.paid = 0 AND c.status = $2
        "#,
    )
    .bind(job_id)
    .bind(ContractStatus::InProgress)
    .fetch_optional(&mut *conn)
    .await?;
    let Some(job) = job else {
        trace!("🧾️ Job #{job_id} is not payable (missing, paid, or contract not in progress)");
        return Ok(None);
    };
    let contract = contracts::fetch_contract(job.contract_id, &mut *conn)
        .await?
        .ok_or(LedgerError::Database(sqlx::Error::RowNotFound))?;
    let client = fetch_party(contract.client_id, &mut *conn).await?;
    let contractor = fetch_party(contract.contractor_id, &mut *conn).await?;
    Ok(Some(PaidJob { job, contract, client, contractor }))
}

async fn fetch_party(profile_id: i64, conn: &mut SqliteConnection) -> Result<Profile, LedgerError> {
    profiles::fetch_profile(profile_id, conn).await?.ok_or(LedgerError::Database(sqlx::Error::RowNotFound))
}

/// Total price of the client's unpaid jobs under in-progress contracts. This is the obligation
/// sum the deposit cap is computed from.
pub async fn outstanding_for_client(client_id: i64, conn: &mut SqliteConnection) -> Result<Cents, LedgerError> {
    let total = sqlx::query_scalar(
        r#"
            SELECT COALESCE(SUM(j.price), 0) FROM jobs j
            INNER JOIN contracts c ON j.contract_id = c.id
            WHERE c.client_id = $1 AND c.status = $2 AND j.paid = 0
        "#,
    )
    .bind(client_id)
    .bind(ContractStatus::InProgress)
    .fetch_one(conn)
    .await?;
    Ok(total)
}

/// Marks the job paid and stamps the payment date, guarded on the job still being unpaid.
/// Returns `false` if no row was changed, i.e. a concurrent payment won the race.
pub async fn mark_paid(job_id: i64, paid_at: DateTime<Utc>, conn: &mut SqliteConnection) -> Result<bool, LedgerError> {
    let result = sqlx::query(
        r#"
            UPDATE jobs SET paid = 1, payment_date = $1, updated_at = CURRENT_TIMESTAMP
            WHERE id = $2 AND paid = 0;
        "#,
    )
    .bind(paid_at)
    .bind(job_id)
    .execute(conn)
    .await?;
    Ok(result.rows_affected() == 1)
}

/// Unpaid jobs under in-progress contracts where the profile is either party, oldest first.
pub async fn unpaid_jobs_for_profile(profile_id: i64, conn: &mut SqliteConnection) -> Result<Vec<Job>, LedgerError> {
    let jobs = sqlx::query_as(
        r#"
            SELECT j.* FROM jobs j
            INNER JOIN contracts c ON j.contract_id = c.id
            WHERE (c.client_id = $1 OR c.contractor_id = $1) AND c.status = $2 AND j.paid = 0
            ORDER BY j.created_at ASC
        "#,
    )
    .bind(profile_id)
    .bind(ContractStatus::InProgress)
    .fetch_all(conn)
    .await?;
    Ok(jobs)
}
