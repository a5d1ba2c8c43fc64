#![allow(dead_code)]

use std::env::temp_dir;

use gig_common::Cents;
use gig_payment_engine::{
    db_types::{Contract, ContractStatus, Job, NewContract, NewJob, NewProfile, Profile},
    ledger_objects::PaidJob,
    LedgerDatabase,
    LedgerError,
    SqliteDatabase,
};
use log::{info, warn};
use sqlx::{migrate::MigrateDatabase, Sqlite};

/// Creates a fresh, migrated database under a unique path in the system temp directory.
pub async fn new_test_db() -> SqliteDatabase {
    dotenvy::from_filename(".env.test").ok();
    let _ = env_logger::try_init();
    let url = random_db_url();
    create_database(&url).await;
    let db = SqliteDatabase::new_with_url(&url, 8).await.expect("Error creating database");
    db.migrate().await.expect("Error running DB migrations");
    db
}

fn random_db_url() -> String {
    format!("sqlite://{}/gig_ledger_test_{}.db", temp_dir().display(), rand::random::<u64>())
}

async fn create_database(url: &str) {
    if let Err(e) = Sqlite::drop_database(url).await {
        warn!("Error dropping database {url}: {e:?}");
    }
    Sqlite::create_database(url).await.expect("Error creating database");
    info!("Created Sqlite database {url}");
}

/// Pays a job, retrying when the store surfaces a write conflict with a concurrent transaction.
pub async fn pay_with_retry(db: &SqliteDatabase, job_id: i64, caller: i64) -> Result<PaidJob, LedgerError> {
    for _ in 0..10 {
        match db.pay_job(job_id, caller).await {
            Err(LedgerError::WriteConflict) => tokio::task::yield_now().await,
            other => return other,
        }
    }
    Err(LedgerError::WriteConflict)
}

pub fn cents(amount: &str) -> Cents {
    amount.parse().expect("not a monetary amount")
}

pub struct Marketplace {
    pub client: Profile,
    pub contractor: Profile,
    pub contract: Contract,
    pub job: Job,
}

/// One client (with the given balance), one contractor, an in-progress contract between them and
/// a single unpaid job at the given price.
pub async fn seed_marketplace(db: &SqliteDatabase, client_balance: &str, job_price: &str) -> Marketplace {
    let client = db
        .create_profile(NewProfile::client("Ada", "Lovelace", "analyst").with_balance(cents(client_balance)))
        .await
        .expect("Error creating client");
    let contractor = db
        .create_profile(NewProfile::contractor("Charles", "Babbage", "engineer"))
        .await
        .expect("Error creating contractor");
    let contract = db
        .create_contract(
            NewContract::new("one difference engine, assembled", client.id, contractor.id)
                .with_status(ContractStatus::InProgress),
        )
        .await
        .expect("Error creating contract");
    let job = db
        .create_job(NewJob::new(contract.id, "polish the cogs", cents(job_price)))
        .await
        .expect("Error creating job");
    Marketplace { client, contractor, contract, job }
}
