use chrono::{DateTime, Duration, Utc};
use gig_common::Cents;
use gig_payment_engine::{
    db_types::{ContractStatus, NewContract, NewJob, NewProfile, Profile},
    ErrorKind,
    LedgerDatabase,
    LedgerError,
    ReportingApi,
    SqliteDatabase,
    DEFAULT_BEST_CLIENTS_LIMIT,
};

mod support;
use support::{cents, new_test_db};

struct ReportWorld {
    db: SqliteDatabase,
    client_a: Profile,
    client_b: Profile,
    client_c: Profile,
}

async fn contract_between(db: &SqliteDatabase, client: &Profile, contractor: &Profile) -> i64 {
    db.create_contract(
        NewContract::new("ongoing engagement", client.id, contractor.id).with_status(ContractStatus::InProgress),
    )
    .await
    .unwrap()
    .id
}

async fn pay_new_job(db: &SqliteDatabase, client_id: i64, contract_id: i64, price: &str) {
    let job = db.create_job(NewJob::new(contract_id, "a deliverable", cents(price))).await.unwrap();
    db.pay_job(job.id, client_id).await.expect("seed payment should succeed");
}

/// Three clients, two professions. Paid totals: engineer 300.00 (A 200 + C 100), blacksmith
/// 250.00 (B 150 + 100). Client totals: B 250.00, A 200.00, C 100.00. One unpaid job that must
/// never appear in any aggregate.
async fn seed_report_world() -> ReportWorld {
    let db = new_test_db().await;
    let engineer = db.create_profile(NewProfile::contractor("Isambard", "Brunel", "engineer")).await.unwrap();
    let blacksmith = db.create_profile(NewProfile::contractor("Hendrick", "Smid", "blacksmith")).await.unwrap();
    let client_a = db
        .create_profile(NewProfile::client("Ada", "Lovelace", "analyst").with_balance(cents("1000.00")))
        .await
        .unwrap();
    let client_b = db
        .create_profile(NewProfile::client("Grace", "Hopper", "admiral").with_balance(cents("1000.00")))
        .await
        .unwrap();
    let client_c = db
        .create_profile(NewProfile::client("Katherine", "Johnson", "physicist").with_balance(cents("1000.00")))
        .await
        .unwrap();

    let a_engineer = contract_between(&db, &client_a, &engineer).await;
    let b_blacksmith = contract_between(&db, &client_b, &blacksmith).await;
    let c_engineer = contract_between(&db, &client_c, &engineer).await;

    pay_new_job(&db, client_a.id, a_engineer, "200.00").await;
    pay_new_job(&db, client_b.id, b_blacksmith, "150.00").await;
    pay_new_job(&db, client_b.id, b_blacksmith, "100.00").await;
    pay_new_job(&db, client_c.id, c_engineer, "100.00").await;
    // Unpaid work is invisible to the aggregations no matter its price.
    db.create_job(NewJob::new(a_engineer, "unfinished", cents("9999.00"))).await.unwrap();

    ReportWorld { db, client_a, client_b, client_c }
}

fn surrounding_window() -> (DateTime<Utc>, DateTime<Utc>) {
    let now = Utc::now();
    (now - Duration::hours(1), now + Duration::hours(1))
}

#[tokio::test]
async fn best_profession_sums_earnings_by_contractor_profession() {
    let world = seed_report_world().await;
    let api = ReportingApi::new(world.db.clone());
    let (start, end) = surrounding_window();

    let best = api.best_profession(start, end).await.expect("a profession must win");
    assert_eq!(best.profession, "engineer");
    assert_eq!(best.total_earned, cents("300.00"));
}

#[tokio::test]
async fn best_clients_orders_by_total_paid_and_honours_the_limit() {
    let world = seed_report_world().await;
    let api = ReportingApi::new(world.db.clone());
    let (start, end) = surrounding_window();

    let top = api.best_clients(start, end, None).await.unwrap();
    assert_eq!(top.len(), DEFAULT_BEST_CLIENTS_LIMIT as usize);
    assert_eq!(top[0].id, world.client_b.id);
    assert_eq!(top[0].full_name, "Grace Hopper");
    assert_eq!(top[0].total_paid, cents("250.00"));
    assert_eq!(top[1].id, world.client_a.id);
    assert_eq!(top[1].total_paid, cents("200.00"));

    let all = api.best_clients(start, end, Some(10)).await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[2].id, world.client_c.id);
    assert_eq!(all[2].total_paid, cents("100.00"));

    // Deterministic for a fixed committed data set and window.
    let again = api.best_clients(start, end, Some(10)).await.unwrap();
    assert_eq!(all, again);
}

#[tokio::test]
async fn aggregations_exclude_payments_outside_the_window() {
    let world = seed_report_world().await;
    let api = ReportingApi::new(world.db.clone());
    let now = Utc::now();
    let (start, end) = (now + Duration::hours(2), now + Duration::hours(3));

    let err = api.best_profession(start, end).await.expect_err("nothing was paid in this window");
    assert!(matches!(err, LedgerError::NoRecords));
    assert_eq!(err.kind(), ErrorKind::NotFound);
    let err = api.best_clients(start, end, None).await.expect_err("nothing was paid in this window");
    assert!(matches!(err, LedgerError::NoRecords));
}

#[tokio::test]
async fn an_inverted_date_range_is_rejected() {
    let world = seed_report_world().await;
    let api = ReportingApi::new(world.db.clone());
    let now = Utc::now();

    let err = api.best_profession(now, now - Duration::seconds(1)).await.expect_err("start after end");
    assert!(matches!(err, LedgerError::InvalidDateRange));
    assert_eq!(err.kind(), ErrorKind::Validation);
    let err = api.best_clients(now, now - Duration::seconds(1), None).await.expect_err("start after end");
    assert!(matches!(err, LedgerError::InvalidDateRange));
}

#[tokio::test]
async fn equal_earnings_break_ties_by_profession() {
    let db = new_test_db().await;
    let client = db
        .create_profile(NewProfile::client("Mary", "Somerville", "polymath").with_balance(cents("200.00")))
        .await
        .unwrap();
    let engineer = db.create_profile(NewProfile::contractor("George", "Stephenson", "engineer")).await.unwrap();
    let blacksmith = db.create_profile(NewProfile::contractor("John", "Brown", "blacksmith")).await.unwrap();
    let c1 = contract_between(&db, &client, &engineer).await;
    let c2 = contract_between(&db, &client, &blacksmith).await;
    pay_new_job(&db, client.id, c1, "100.00").await;
    pay_new_job(&db, client.id, c2, "100.00").await;

    let api = ReportingApi::new(db.clone());
    let (start, end) = surrounding_window();
    let best = api.best_profession(start, end).await.unwrap();
    assert_eq!(best.profession, "blacksmith");
    assert_eq!(best.total_earned, Cents::from_whole(100));
}
